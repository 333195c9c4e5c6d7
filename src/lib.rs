pub use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use tera::Tera;

pub mod abs;
pub mod area;
pub mod cli;
pub mod config;
pub mod error;
pub mod paths;
pub mod plan;
pub mod verilog;

pub const BUILD_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/build");

lazy_static! {
    pub static ref TEMPLATES: Tera =
        match Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/*")) {
            Ok(t) => t,
            Err(e) => panic!("Error parsing templates: {e}"),
        };
}

pub fn bus_bit(name: &str, index: usize) -> String {
    format!("{name}[{index}]")
}

#[inline]
pub(crate) fn clog2(x: usize) -> usize {
    (x as f64).log2().ceil() as usize
}

#[cfg(test)]
pub mod tests {
    use std::path::PathBuf;

    use crate::config::{MemoryShape, ProcessParams};

    use super::BUILD_PATH;

    pub(crate) fn test_work_dir(name: &str) -> PathBuf {
        PathBuf::from(BUILD_PATH).join(name)
    }

    /// A process with power-of-two dimensions, so that every derived
    /// coordinate is exactly representable.
    pub(crate) fn test_process() -> ProcessParams {
        ProcessParams::builder()
            .bitcell_height(0.25)
            .bitcell_width(0.125)
            .column_mux_factor(1usize)
            .pin_width(0.125)
            .pin_pitch(0.5)
            .manufacturing_grid(0.125)
            .metal_prefix("metal")
            .metal_layer("metal4")
            .build()
            .unwrap()
    }

    pub(crate) fn test_shape(name: &str, width: usize, depth: usize) -> MemoryShape {
        MemoryShape::builder()
            .name(name)
            .width(width)
            .depth(depth)
            .build()
            .unwrap()
    }

    #[test]
    fn test_clog2() {
        assert_eq!(super::clog2(1), 0);
        assert_eq!(super::clog2(2), 1);
        assert_eq!(super::clog2(256), 8);
        assert_eq!(super::clog2(257), 9);
        assert_eq!(super::clog2(1000), 10);
    }

    #[test]
    fn test_bus_bit() {
        assert_eq!(super::bus_bit("rd_out_A", 3), "rd_out_A[3]");
    }
}
