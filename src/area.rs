//! Macro dimensions derived from the bitcell array.

use serde::{Deserialize, Serialize};

use crate::config::{MemoryShape, ProcessParams};
use crate::error::{MacroError, Result};

/// Extra area for clock distribution when ports are clocked independently.
pub const INDEPENDENT_CLOCK_MARGIN: f64 = 1.1;

/// Bounding box of a macro, in microns.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroDims {
    pub height: f64,
    pub width: f64,
}

impl MacroDims {
    #[inline]
    pub fn area(&self) -> f64 {
        self.height * self.width
    }
}

/// Computes the height and width of a memory macro.
///
/// Banks are folded side by side; column muxing trades height for width.
pub fn compute_dimensions(process: &ProcessParams, shape: &MemoryShape) -> Result<MacroDims> {
    let mut height = process.bitcell_height * shape.depth as f64;
    let mut width = process.bitcell_width * shape.width as f64;

    match shape.banks {
        1 => {}
        2 | 4 | 8 => {
            height /= shape.banks as f64;
            width *= shape.banks as f64;
        }
        banks => return Err(MacroError::UnsupportedConfiguration { banks }),
    }

    let mux = process.column_mux_factor as f64;
    height /= mux;
    width *= mux;

    height *= shape.access_overhead;
    width *= shape.access_overhead * (shape.rw_ports as f64).sqrt();

    if shape.independent_port_clocks {
        height *= INDEPENDENT_CLOCK_MARGIN;
        width *= INDEPENDENT_CLOCK_MARGIN;
    }

    Ok(MacroDims { height, width })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::tests::{test_process, test_shape};

    fn reference_process() -> ProcessParams {
        ProcessParams::builder()
            .bitcell_height(0.25)
            .bitcell_width(0.1)
            .pin_width(0.024)
            .pin_pitch(0.048)
            .manufacturing_grid(0.001)
            .metal_prefix("M")
            .metal_layer("M4")
            .build()
            .unwrap()
    }

    #[test]
    fn test_single_bank_dimensions() -> Result<()> {
        let dims = compute_dimensions(&reference_process(), &test_shape("sram", 32, 256))?;
        assert_relative_eq!(dims.height, 76.8, epsilon = 1e-9);
        assert_relative_eq!(dims.width, 3.84, epsilon = 1e-9);
        assert_relative_eq!(dims.area(), 76.8 * 3.84, epsilon = 1e-9);
        Ok(())
    }

    macro_rules! bank_test {
        ($banks:literal) => {
            paste::paste! {
                #[test]
                fn [<test_ $banks _banks_fold_array>]() -> Result<()> {
                    let process = reference_process();
                    let single = compute_dimensions(&process, &test_shape("sram", 32, 256))?;
                    let mut shape = test_shape("sram", 32, 256);
                    shape.banks = $banks;
                    let folded = compute_dimensions(&process, &shape)?;
                    assert_relative_eq!(folded.height, single.height / $banks as f64, epsilon = 1e-9);
                    assert_relative_eq!(folded.width, single.width * $banks as f64, epsilon = 1e-9);
                    Ok(())
                }
            }
        };
    }

    bank_test!(2);
    bank_test!(4);
    bank_test!(8);

    #[test]
    fn test_unsupported_banks() {
        for banks in [0, 3, 5, 6, 16] {
            let mut shape = test_shape("sram", 32, 256);
            shape.banks = banks;
            let res = compute_dimensions(&reference_process(), &shape);
            assert!(
                matches!(res, Err(MacroError::UnsupportedConfiguration { banks: b }) if b == banks),
                "expected {banks} banks to be rejected"
            );
        }
    }

    #[test]
    fn test_column_mux() -> Result<()> {
        let mut process = test_process();
        let shape = test_shape("sram", 16, 512);
        let base = compute_dimensions(&process, &shape)?;
        process.column_mux_factor = 4;
        let muxed = compute_dimensions(&process, &shape)?;
        assert_relative_eq!(muxed.height, base.height / 4.0);
        assert_relative_eq!(muxed.width, base.width * 4.0);
        Ok(())
    }

    #[test]
    fn test_ports_scale_width_sublinearly() -> Result<()> {
        let process = test_process();
        let mut shape = test_shape("sram", 16, 512);
        let base = compute_dimensions(&process, &shape)?;
        shape.rw_ports = 4;
        let dual = compute_dimensions(&process, &shape)?;
        assert_relative_eq!(dual.height, base.height);
        assert_relative_eq!(dual.width, base.width * 2.0);
        Ok(())
    }

    #[test]
    fn test_overhead_and_clock_margin() -> Result<()> {
        let process = test_process();
        let mut shape = test_shape("sram", 16, 512);
        shape.access_overhead = 1.0;
        let bare = compute_dimensions(&process, &shape)?;
        assert_relative_eq!(bare.height, 0.25 * 512.0);
        assert_relative_eq!(bare.width, 0.125 * 16.0);

        shape.independent_port_clocks = true;
        let clocked = compute_dimensions(&process, &shape)?;
        assert_relative_eq!(clocked.height, bare.height * 1.1);
        assert_relative_eq!(clocked.width, bare.width * 1.1);
        Ok(())
    }
}
