use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::Result;

pub mod process;
pub mod sram;

pub use process::{ProcessConfigRaw, ProcessParams, ProcessParamsBuilder};
pub use sram::{MemoryShape, MemoryShapeBuilder};

/// Contents of a configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FakeRamConfigRaw {
    pub process: ProcessConfigRaw,
    #[serde(rename = "sram", alias = "srams", default)]
    pub srams: Vec<MemoryShape>,
}

/// A process together with the memories to generate in it.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeRamConfig {
    pub process: ProcessParams,
    pub srams: Vec<MemoryShape>,
}

impl FakeRamConfig {
    pub fn from_raw(raw: FakeRamConfigRaw) -> Self {
        Self {
            process: ProcessParams::from_raw(&raw.process),
            srams: raw.srams,
        }
    }
}

/// Reads a configuration file.
///
/// Files ending in `.json` are parsed as JSON; anything else is parsed as TOML.
pub fn parse_config(path: impl AsRef<Path>) -> Result<FakeRamConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration file {path:?}"))?;
    let raw: FakeRamConfigRaw = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON configuration {path:?}"))?,
        _ => toml::from_str(&contents)
            .with_context(|| format!("failed to parse TOML configuration {path:?}"))?,
    };
    Ok(FakeRamConfig::from_raw(raw))
}
