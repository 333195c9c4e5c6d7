//! Pin, power strap, and obstruction geometry of a memory macro abstract.

use arcstr::ArcStr;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::area::MacroDims;
use crate::bus_bit;
use crate::config::{MemoryShape, ProcessParams};
use crate::error::Result;

use self::ports::{Edge, PortTable};
use self::tracks::TrackBudget;

pub mod lef;
pub mod ports;
pub mod tracks;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinDirection {
    Input,
    Output,
    Inout,
}

impl PinDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "INPUT",
            Self::Output => "OUTPUT",
            Self::Inout => "INOUT",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinUse {
    Signal,
    Power,
    Ground,
}

impl PinUse {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Signal => "SIGNAL",
            Self::Power => "POWER",
            Self::Ground => "GROUND",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinShape {
    Abutment,
}

impl PinShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Abutment => "ABUTMENT",
        }
    }
}

/// An axis-aligned rectangle, in microns.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    #[inline]
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    #[inline]
    pub fn center_y(&self) -> f64 {
        (self.y0 + self.y1) / 2.0
    }

    /// Whether the interiors of `self` and `other` intersect.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub name: String,
    pub direction: PinDirection,
    pub use_: PinUse,
    pub shape: Option<PinShape>,
    pub layer: String,
    /// One rectangle for signal pins; one per strap for supply pins.
    pub rects: Vec<Rect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstruction {
    pub layer: String,
    pub rect: Rect,
}

/// Abstract view of a memory macro.
///
/// Pins are stored in emission order: signal pins bottom to top, then `VSS`
/// and `VDD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroAbstract {
    pub name: ArcStr,
    /// Bits per word.
    pub width: usize,
    pub depth: usize,
    pub banks: usize,
    pub dims: MacroDims,
    pub budget: TrackBudget,
    pub pins: Vec<Pin>,
    pub obs: Vec<Obstruction>,
}

impl MacroAbstract {
    pub fn pin(&self, name: &str) -> Option<&Pin> {
        self.pins.iter().find(|pin| pin.name == name)
    }

    pub fn signal_pins(&self) -> impl Iterator<Item = &Pin> + Clone {
        self.pins.iter().filter(|pin| pin.use_ == PinUse::Signal)
    }
}

/// Places signal pins along the macro edges, bottom to top.
struct PinPlacer<'a> {
    process: &'a ProcessParams,
    dims: MacroDims,
    pitch: f64,
    y: f64,
    pins: Vec<Pin>,
}

impl<'a> PinPlacer<'a> {
    fn new(process: &'a ProcessParams, dims: MacroDims, pitch: f64) -> Self {
        let offset = process.edge_offset();
        let start = offset - (offset % process.manufacturing_grid) + process.pin_width / 2.0;
        Self {
            process,
            dims,
            pitch,
            y: start,
            pins: Vec::new(),
        }
    }

    fn add(&mut self, name: String, direction: PinDirection, edge: Edge) {
        let pw = self.process.pin_width;
        let hpw = pw / 2.0;
        let (x0, x1) = match edge {
            Edge::Left => (0.0, pw),
            Edge::Right => (self.dims.width - pw, self.dims.width),
        };
        self.pins.push(Pin {
            name,
            direction,
            use_: PinUse::Signal,
            shape: Some(PinShape::Abutment),
            layer: self.process.metal_layer.clone(),
            rects: vec![Rect::new(x0, self.y - hpw, x1, self.y + hpw)],
        });
    }

    /// Places every bit of `bus`, one track per bit shared by all ports.
    fn bus(&mut self, ports: &PortTable, bus: &str, bits: usize, direction: PinDirection) {
        for i in 0..bits {
            for port in ports.iter() {
                self.add(
                    bus_bit(&format!("{bus}{}", port.suffix), i),
                    direction,
                    port.edge,
                );
            }
            self.step();
        }
    }

    #[inline]
    fn step(&mut self) {
        self.y += self.pitch;
    }

    #[inline]
    fn skip(&mut self, space: f64) {
        self.y += space;
    }
}

/// Alternating ground and power straps spanning the macro width.
fn straps(process: &ProcessParams, dims: MacroDims, start: f64) -> Vec<Rect> {
    let offset = process.edge_offset();
    let half_width = process.strap_width() / 2.0;
    let mut rects = Vec::new();
    let mut y = start;
    while y <= dims.height - offset {
        rects.push(Rect::new(
            offset,
            y - half_width,
            dims.width - offset,
            y + half_width,
        ));
        y += 2.0 * process.strap_pitch();
    }
    rects
}

fn supply_pin(process: &ProcessParams, name: &str, use_: PinUse, rects: Vec<Rect>) -> Pin {
    Pin {
        name: name.to_string(),
        direction: PinDirection::Inout,
        use_,
        shape: None,
        layer: process.metal_layer.clone(),
        rects,
    }
}

/// Allocates routing tracks and places every pin, strap, and obstruction of
/// a macro with the given dimensions.
///
/// Fails if the macro is too short to fit one track per pin at minimum pitch.
pub fn synthesize_layout(
    process: &ProcessParams,
    shape: &MemoryShape,
    dims: MacroDims,
) -> Result<MacroAbstract> {
    let budget = TrackBudget::new(process, shape, dims.height)?;
    let pin_layer = process.pin_layer_number()?;
    let ports = PortTable::new(shape.rw_ports);
    let addr_width = shape.addr_width();

    debug!(
        "{}: {} address bits, {} pins on {} tracks (pitch multiplier {}, {} gap tracks per group)",
        shape.name,
        addr_width,
        budget.required,
        budget.available,
        budget.multiplier,
        budget.group_gap_tracks
    );
    if ports.len() > 2 {
        warn!(
            "{}: {} ports share two macro edges; pins of ports on the same edge will overlap",
            shape.name,
            ports.len()
        );
    }

    let group_pitch = budget.group_pitch(process);
    let mut placer = PinPlacer::new(process, dims, budget.pin_pitch(process));

    placer.bus(&ports, "w_mask_in", shape.width, PinDirection::Input);
    placer.skip(group_pitch);
    placer.bus(&ports, "rd_out", shape.width, PinDirection::Output);
    placer.skip(group_pitch);
    placer.bus(&ports, "wd_in", shape.width, PinDirection::Input);
    placer.skip(group_pitch);
    placer.bus(&ports, "addr_in", addr_width, PinDirection::Input);
    placer.skip(group_pitch);

    for port in ports.iter() {
        placer.add(
            format!("we_in{}", port.suffix),
            PinDirection::Input,
            port.edge,
        );
    }
    placer.step();
    placer.add("ce_in".to_string(), PinDirection::Input, Edge::Left);
    placer.step();
    placer.add("clk".to_string(), PinDirection::Input, Edge::Left);
    placer.step();

    let mut pins = placer.pins;

    let offset = process.edge_offset();
    pins.push(supply_pin(
        process,
        "VSS",
        PinUse::Ground,
        straps(process, dims, offset),
    ));
    pins.push(supply_pin(
        process,
        "VDD",
        PinUse::Power,
        straps(process, dims, offset + process.strap_pitch()),
    ));

    debug!("{}: pin layer number is {}", shape.name, pin_layer);
    let obs = (1..=pin_layer)
        .map(|i| Obstruction {
            layer: process.metal(i),
            rect: Rect::new(0.0, 0.0, dims.width, dims.height),
        })
        .collect();

    Ok(MacroAbstract {
        name: shape.name.clone(),
        width: shape.width,
        depth: shape.depth,
        banks: shape.banks,
        dims,
        budget,
        pins,
        obs,
    })
}
