// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of RGBA colors assigned to groups.

use serde::{Deserialize, Serialize};

/// RGBA color of a group of atoms.
/// Serialized as a sequence of four integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

/// Default colors of groups. Cycled through in the order in which the groups are created.
pub const PALETTE: [Rgba; 10] = [
    Rgba(230, 25, 75, 255),
    Rgba(60, 180, 75, 255),
    Rgba(255, 225, 25, 255),
    Rgba(0, 130, 200, 255),
    Rgba(245, 130, 48, 255),
    Rgba(145, 30, 180, 255),
    Rgba(70, 240, 240, 255),
    Rgba(240, 50, 230, 255),
    Rgba(210, 245, 60, 255),
    Rgba(250, 190, 190, 255),
];

/// Color of atoms that do not belong to any group.
pub const UNASSIGNED: Rgba = Rgba(160, 160, 160, 255);

impl Rgba {
    /// Get the `index`-th color of the default palette (wrapping around).
    pub fn from_palette(index: usize) -> Rgba {
        PALETTE[index % PALETTE.len()]
    }

    /// Darken the RGB channels by multiplying them with `factor`. Alpha is kept.
    /// `factor` is clamped to the interval [0, 1].
    pub fn dimmed(self, factor: f64) -> Rgba {
        let factor = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f64 * factor) as u8;
        Rgba(scale(self.0), scale(self.1), scale(self.2), self.3)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(arr: [u8; 4]) -> Self {
        Rgba(arr[0], arr[1], arr[2], arr[3])
    }
}
