use std::path::Path;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tera::Context;

use crate::abs::lef::GENERATOR;
use crate::abs::ports::PortTable;
use crate::config::MemoryShape;
use crate::{Result, TEMPLATES};

/// Buses declared once per read/write port, in port-list order.
pub const PORT_BUSES: [&str; 5] = ["rd_out", "addr_in", "we_in", "wd_in", "w_mask_in"];

#[derive(Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SramVerilogParams {
    pub generator: String,
    pub module_name: String,
    pub num_words: usize,
    pub data_width: usize,
    pub addr_width: usize,
    /// Name suffix of each port.
    pub ports: Vec<String>,
    /// Comma separated module port list.
    pub port_list: String,
}

impl SramVerilogParams {
    pub fn new(shape: &MemoryShape) -> Self {
        let ports = PortTable::new(shape.rw_ports).suffixes();
        let port_list = PORT_BUSES
            .iter()
            .flat_map(|bus| ports.iter().map(move |suffix| format!("{bus}{suffix}")))
            .chain(["clk".to_string(), "ce_in".to_string()])
            .join(",\n   ");

        Self {
            generator: GENERATOR.to_string(),
            module_name: shape.name.to_string(),
            num_words: shape.depth,
            data_width: shape.width,
            addr_width: shape.addr_width(),
            ports,
            port_list,
        }
    }
}

/// Behavioral simulation model of the memory.
pub fn generate_verilog(params: &SramVerilogParams) -> Result<String> {
    Ok(TEMPLATES.render("sram.v", &Context::from_serialize(params)?)?)
}

/// Module and port declarations only.
pub fn generate_blackbox_verilog(params: &SramVerilogParams) -> Result<String> {
    Ok(TEMPLATES.render("sram.bb.v", &Context::from_serialize(params)?)?)
}

pub fn save_verilog(path: impl AsRef<Path>, params: &SramVerilogParams) -> Result<()> {
    let verilog = generate_verilog(params)?;
    write_file(path.as_ref(), verilog)
}

pub fn save_blackbox_verilog(path: impl AsRef<Path>, params: &SramVerilogParams) -> Result<()> {
    let verilog = generate_blackbox_verilog(params)?;
    write_file(path.as_ref(), verilog)
}

fn write_file(path: &Path, contents: String) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;

    Ok(())
}
