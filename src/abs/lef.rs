//! LEF serialization of a [`MacroAbstract`].

use std::path::Path;

use serde::Serialize;
use tera::Context;

use crate::error::Result;
use crate::TEMPLATES;

use super::{MacroAbstract, Obstruction, Pin, Rect};

pub const GENERATOR: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

#[derive(Serialize)]
struct LefParams {
    generator: &'static str,
    name: String,
    bits: usize,
    depth: usize,
    banks: usize,
    width: String,
    height: String,
    pins: Vec<LefPinParams>,
    obs: Vec<LefObsParams>,
}

#[derive(Serialize)]
struct LefPinParams {
    name: String,
    direction: &'static str,
    #[serde(rename = "use")]
    use_: &'static str,
    shape: Option<&'static str>,
    layer: String,
    rects: Vec<String>,
}

#[derive(Serialize)]
struct LefObsParams {
    layer: String,
    rect: String,
}

#[inline]
fn export_decimal(x: f64) -> String {
    format!("{x:.3}")
}

fn export_rect(r: &Rect) -> String {
    format!(
        "{} {} {} {}",
        export_decimal(r.x0),
        export_decimal(r.y0),
        export_decimal(r.x1),
        export_decimal(r.y1)
    )
}

fn export_pin(pin: &Pin) -> LefPinParams {
    LefPinParams {
        name: pin.name.clone(),
        direction: pin.direction.as_str(),
        use_: pin.use_.as_str(),
        shape: pin.shape.map(|shape| shape.as_str()),
        layer: pin.layer.clone(),
        rects: pin.rects.iter().map(export_rect).collect(),
    }
}

fn export_obs(ob: &Obstruction) -> LefObsParams {
    // The origin is written in its shortest form.
    LefObsParams {
        layer: ob.layer.clone(),
        rect: format!(
            "{} {} {} {}",
            ob.rect.x0,
            ob.rect.y0,
            export_decimal(ob.rect.x1),
            export_decimal(ob.rect.y1)
        ),
    }
}

/// Renders the abstract as LEF text.
pub fn generate_lef(abs: &MacroAbstract) -> Result<String> {
    let params = LefParams {
        generator: GENERATOR,
        name: abs.name.to_string(),
        bits: abs.width,
        depth: abs.depth,
        banks: abs.banks,
        width: export_decimal(abs.dims.width),
        height: export_decimal(abs.dims.height),
        pins: abs.pins.iter().map(export_pin).collect(),
        obs: abs.obs.iter().map(export_obs).collect(),
    };

    Ok(TEMPLATES.render("sram.lef", &Context::from_serialize(params)?)?)
}

/// Writes the abstract to `path`.
///
/// The file is only created once the whole LEF has been rendered.
pub fn save_lef(path: impl AsRef<Path>, abs: &MacroAbstract) -> Result<()> {
    let lef = generate_lef(abs)?;

    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, lef)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abs::synthesize_layout;
    use crate::area::{compute_dimensions, MacroDims};
    use crate::tests::{test_process, test_shape, test_work_dir};

    fn small_abstract() -> MacroAbstract {
        let process = test_process();
        let shape = test_shape("sram_16x4", 4, 16);
        let dims = MacroDims {
            height: 61.0,
            width: 20.0,
        };
        synthesize_layout(&process, &shape, dims).unwrap()
    }

    #[test]
    fn test_header() -> Result<()> {
        let lef = generate_lef(&small_abstract())?;
        let expected = format!(
            "# Generated by {GENERATOR}
VERSION 5.7 ;
BUSBITCHARS \"[]\" ;
PROPERTYDEFINITIONS
  MACRO width INTEGER ;
  MACRO depth INTEGER ;
  MACRO banks INTEGER ;
END PROPERTYDEFINITIONS
MACRO sram_16x4
  PROPERTY width 4 ;
  PROPERTY depth 16 ;
  PROPERTY banks 1 ;
  FOREIGN sram_16x4 0 0 ;
  SYMMETRY X Y R90 ;
  SIZE 20.000 BY 61.000 ;
  CLASS BLOCK ;
  PIN w_mask_in[0]
"
        );
        assert!(lef.starts_with(&expected), "unexpected header:\n{lef}");
        Ok(())
    }

    #[test]
    fn test_signal_pin() -> Result<()> {
        let lef = generate_lef(&small_abstract())?;
        let expected = "  PIN rd_out[1]
    DIRECTION OUTPUT ;
    USE SIGNAL ;
    SHAPE ABUTMENT ;
    PORT
      LAYER metal4 ;
      RECT 0.000 16.000 0.125 16.125 ;
    END
  END rd_out[1]
";
        assert!(lef.contains(expected), "missing rd_out[1]:\n{lef}");
        Ok(())
    }

    #[test]
    fn test_supply_pins_and_obstructions() -> Result<()> {
        let lef = generate_lef(&small_abstract())?;
        let vss = "  PIN VSS
    DIRECTION INOUT ;
    USE GROUND ;
    PORT
      LAYER metal4 ;
      RECT 0.500 0.250 19.500 0.750 ;
      RECT 0.500 8.250 19.500 8.750 ;
";
        assert!(lef.contains(vss), "missing VSS:\n{lef}");
        assert!(lef.contains("  PIN VDD\n    DIRECTION INOUT ;\n    USE POWER ;\n    PORT\n"));
        assert_eq!(lef.matches("      RECT ").count(), 19 + 8 + 8);

        let tail = "  OBS
    LAYER metal1 ;
    RECT 0 0 20.000 61.000 ;
    LAYER metal2 ;
    RECT 0 0 20.000 61.000 ;
    LAYER metal3 ;
    RECT 0 0 20.000 61.000 ;
    LAYER metal4 ;
    RECT 0 0 20.000 61.000 ;
  END
END sram_16x4

END LIBRARY";
        assert!(lef.trim_end().ends_with(tail), "unexpected tail:\n{lef}");
        Ok(())
    }

    #[test]
    fn test_pin_declaration_order() -> Result<()> {
        let lef = generate_lef(&small_abstract())?;
        let order = ["PIN w_mask_in[3]", "PIN rd_out[0]", "PIN wd_in[0]", "PIN addr_in[3]"]
            .into_iter()
            .chain(["PIN we_in\n", "PIN ce_in", "PIN clk", "PIN VSS", "PIN VDD", "OBS"])
            .map(|needle| lef.find(needle).unwrap())
            .collect::<Vec<_>>();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
        Ok(())
    }

    #[test]
    fn test_save_lef() -> Result<()> {
        let process = test_process();
        let shape = test_shape("sram_64x8", 8, 64);
        let dims = compute_dimensions(&process, &shape)?;
        let abs = synthesize_layout(&process, &shape, dims)?;

        let path = test_work_dir("test_save_lef").join("sram_64x8.lef");
        save_lef(&path, &abs)?;
        let contents = std::fs::read_to_string(&path)?;
        assert_eq!(contents, generate_lef(&abs)?);
        assert!(contents.contains("SIZE 1.200 BY 19.200 ;"));
        Ok(())
    }
}
