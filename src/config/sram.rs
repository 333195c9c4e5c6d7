use arcstr::ArcStr;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::clog2;

/// Default multiplier accounting for decoders and other periphery.
pub const DEFAULT_ACCESS_OVERHEAD: f64 = 1.2;

/// Logical shape of a memory macro.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(derive(Debug))]
pub struct MemoryShape {
    #[builder(setter(into))]
    pub name: ArcStr,
    /// Number of bits per word.
    pub width: usize,
    /// Number of words.
    pub depth: usize,
    #[serde(default = "default_one")]
    #[builder(default = "1")]
    pub banks: usize,
    #[serde(default = "default_one")]
    #[builder(default = "1")]
    pub rw_ports: usize,
    #[serde(default = "default_access_overhead")]
    #[builder(default = "DEFAULT_ACCESS_OVERHEAD")]
    pub access_overhead: f64,
    /// Whether each port is clocked independently.
    #[serde(default)]
    #[builder(default)]
    pub independent_port_clocks: bool,
}

fn default_one() -> usize {
    1
}

fn default_access_overhead() -> f64 {
    DEFAULT_ACCESS_OVERHEAD
}

impl MemoryShape {
    #[inline]
    pub fn builder() -> MemoryShapeBuilder {
        MemoryShapeBuilder::default()
    }

    #[inline]
    pub fn addr_width(&self) -> usize {
        clog2(self.depth)
    }

    #[inline]
    pub fn num_bits(&self) -> usize {
        self.width * self.depth
    }
}
