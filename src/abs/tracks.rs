use serde::{Deserialize, Serialize};

use crate::config::{MemoryShape, ProcessParams};
use crate::error::{MacroError, Result};

/// Number of gaps separating the five pin groups.
pub const NUM_GROUP_GAPS: usize = 4;

/// Number of pin tracks a memory needs along one macro edge.
///
/// One track per write mask, read data, and write data bit, one per address
/// bit, plus write enable, chip enable and clock. Ports share tracks, so the
/// count does not depend on the number of ports.
pub fn required_tracks(shape: &MemoryShape) -> usize {
    3 * shape.width + shape.addr_width() + 3
}

/// Allocation of routing tracks to signal pins.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackBudget {
    /// Tracks needed at minimum pitch.
    pub required: usize,
    /// Tracks that fit between the edge offsets at minimum pitch.
    pub available: usize,
    /// `available - required`.
    pub spare: usize,
    /// Pins are placed every `multiplier` tracks.
    pub multiplier: usize,
    /// Tracks inserted between consecutive pin groups.
    pub group_gap_tracks: usize,
}

impl TrackBudget {
    pub fn new(process: &ProcessParams, shape: &MemoryShape, height: f64) -> Result<Self> {
        let required = required_tracks(shape);
        let available =
            ((height - 2.0 * process.edge_offset()) / process.pin_pitch).floor() as i64;

        if available < required as i64 {
            return Err(MacroError::InsufficientRoutingTracks {
                required,
                available,
            });
        }
        let available = available as usize;

        // Largest multiplier such that `required * multiplier <= available`.
        let multiplier = available / required;
        let leftover = available - required * multiplier;

        Ok(Self {
            required,
            available,
            spare: available - required,
            multiplier,
            group_gap_tracks: leftover / NUM_GROUP_GAPS,
        })
    }

    /// Center-to-center spacing of consecutive pins.
    #[inline]
    pub fn pin_pitch(&self, process: &ProcessParams) -> f64 {
        process.pin_pitch * self.multiplier as f64
    }

    /// Extra space inserted between pin groups.
    #[inline]
    pub fn group_pitch(&self, process: &ProcessParams) -> f64 {
        process.pin_pitch * self.group_gap_tracks as f64
    }
}
