// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of the SimBox structure and its methods.

use serde::{Deserialize, Serialize};

/// Orthogonal simulation box as defined by the header of a LAMMPS data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimBox {
    pub xlo: f64,
    pub xhi: f64,
    pub ylo: f64,
    pub yhi: f64,
    pub zlo: f64,
    pub zhi: f64,
}

impl From<[f64; 6]> for SimBox {
    /// Convert 6-member array `[xlo, xhi, ylo, yhi, zlo, zhi]` to SimBox structure.
    fn from(arr: [f64; 6]) -> Self {
        SimBox {
            xlo: arr[0],
            xhi: arr[1],
            ylo: arr[2],
            yhi: arr[3],
            zlo: arr[4],
            zhi: arr[5],
        }
    }
}

impl SimBox {
    /// Length of the box along the x-axis.
    #[inline]
    pub fn lx(&self) -> f64 {
        self.xhi - self.xlo
    }

    /// Length of the box along the y-axis.
    #[inline]
    pub fn ly(&self) -> f64 {
        self.yhi - self.ylo
    }

    /// Area of the box projected into the xy-plane.
    #[inline]
    pub fn area_xy(&self) -> f64 {
        self.lx() * self.ly()
    }

    /// Center of the box projected into the xy-plane.
    #[inline]
    pub fn center_xy(&self) -> [f64; 2] {
        [0.5 * (self.xlo + self.xhi), 0.5 * (self.ylo + self.yhi)]
    }
}
