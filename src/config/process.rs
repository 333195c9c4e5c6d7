use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::{MacroError, Result};

/// Number of minimum pin pitches between adjacent power straps.
pub const STRAP_PITCH_TRACKS: f64 = 8.0;

/// Width of a power strap, in minimum pin widths.
pub const STRAP_WIDTH_PINS: f64 = 4.0;

/// Process description as written in a configuration file.
///
/// All lengths are in nanometers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessConfigRaw {
    #[serde(default)]
    pub tech_nm: Option<u32>,
    pub metal_prefix: String,
    pub metal_layer: String,
    pub pin_width_nm: f64,
    pub pin_pitch_nm: f64,
    pub manufacturing_grid_nm: f64,
    #[serde(default = "default_column_mux_factor")]
    pub column_mux_factor: usize,
    pub bitcell_width_nm: f64,
    pub bitcell_height_nm: f64,
}

fn default_column_mux_factor() -> usize {
    1
}

/// Geometric rules of the target process.
///
/// All lengths are in microns.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(derive(Debug))]
pub struct ProcessParams {
    /// Height of a single bitcell.
    pub bitcell_height: f64,
    /// Width of a single bitcell.
    pub bitcell_width: f64,
    /// Number of bitcell columns sharing one sense amplifier.
    #[builder(default = "1")]
    pub column_mux_factor: usize,
    /// Minimum width of a signal pin.
    pub pin_width: f64,
    /// Minimum center-to-center spacing of signal pins.
    pub pin_pitch: f64,
    pub manufacturing_grid: f64,
    /// Prefix shared by the names of all metal layers, e.g. `metal`.
    #[builder(setter(into))]
    pub metal_prefix: String,
    /// Layer on which pins and straps are drawn, e.g. `metal4`.
    #[builder(setter(into))]
    pub metal_layer: String,
}

impl ProcessParams {
    #[inline]
    pub fn builder() -> ProcessParamsBuilder {
        ProcessParamsBuilder::default()
    }

    pub fn from_raw(raw: &ProcessConfigRaw) -> Self {
        Self {
            bitcell_height: raw.bitcell_height_nm / 1_000.0,
            bitcell_width: raw.bitcell_width_nm / 1_000.0,
            column_mux_factor: raw.column_mux_factor,
            pin_width: raw.pin_width_nm / 1_000.0,
            pin_pitch: raw.pin_pitch_nm / 1_000.0,
            manufacturing_grid: raw.manufacturing_grid_nm / 1_000.0,
            metal_prefix: raw.metal_prefix.clone(),
            metal_layer: raw.metal_layer.clone(),
        }
    }

    /// Space reserved between the macro boundary and the first pin or strap.
    #[inline]
    pub fn edge_offset(&self) -> f64 {
        self.pin_pitch
    }

    #[inline]
    pub fn strap_pitch(&self) -> f64 {
        self.pin_pitch * STRAP_PITCH_TRACKS
    }

    #[inline]
    pub fn strap_width(&self) -> f64 {
        self.pin_width * STRAP_WIDTH_PINS
    }

    /// The index of the pin layer within the metal stack.
    ///
    /// `metal4` with prefix `metal` is layer 4.
    pub fn pin_layer_number(&self) -> Result<usize> {
        self.metal_layer
            .strip_prefix(&self.metal_prefix)
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| MacroError::InvalidPinLayer {
                layer: self.metal_layer.clone(),
                prefix: self.metal_prefix.clone(),
            })
    }

    /// Name of the `i`-th metal layer.
    #[inline]
    pub fn metal(&self, i: usize) -> String {
        format!("{}{}", self.metal_prefix, i)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::tests::test_process;

    #[test]
    fn test_from_raw_converts_to_microns() {
        let raw = ProcessConfigRaw {
            tech_nm: Some(45),
            metal_prefix: "metal".to_string(),
            metal_layer: "metal4".to_string(),
            pin_width_nm: 70.0,
            pin_pitch_nm: 140.0,
            manufacturing_grid_nm: 5.0,
            column_mux_factor: 2,
            bitcell_width_nm: 570.0,
            bitcell_height_nm: 1150.0,
        };
        let process = ProcessParams::from_raw(&raw);
        assert_relative_eq!(process.pin_width, 0.07);
        assert_relative_eq!(process.pin_pitch, 0.14);
        assert_relative_eq!(process.manufacturing_grid, 0.005);
        assert_relative_eq!(process.bitcell_width, 0.57);
        assert_relative_eq!(process.bitcell_height, 1.15);
        assert_eq!(process.column_mux_factor, 2);
        assert_eq!(process.metal_layer, "metal4");
    }

    #[test]
    fn test_derived_lengths() {
        let process = test_process();
        assert_eq!(process.edge_offset(), 0.5);
        assert_eq!(process.strap_pitch(), 4.0);
        assert_eq!(process.strap_width(), 0.5);
    }

    #[test]
    fn test_pin_layer_number() {
        let mut process = test_process();
        assert_eq!(process.pin_layer_number().unwrap(), 4);
        assert_eq!(process.metal(2), "metal2");

        process.metal_prefix = "M".to_string();
        process.metal_layer = "M10".to_string();
        assert_eq!(process.pin_layer_number().unwrap(), 10);

        process.metal_layer = "metal4".to_string();
        assert!(matches!(
            process.pin_layer_number(),
            Err(MacroError::InvalidPinLayer { .. })
        ));
    }
}
