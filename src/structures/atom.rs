// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of the Atom structure and its methods.

use serde::{Deserialize, Serialize};

use crate::structures::vector3d::Vector3D;

/// Identifier of an atom as used by LAMMPS.
pub type AtomId = u64;

/// Single atom read from the `Atoms` section of a LAMMPS data file.
/// Atoms are never modified after they are loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    id: AtomId,
    position: Vector3D,
}

impl Atom {
    /// Create new Atom structure with the specified id and position.
    ///
    /// ## Example
    /// ```
    /// use breather_rs::prelude::*;
    ///
    /// let atom = Atom::new(17, [1.5, 2.5, 0.0].into());
    /// assert_eq!(atom.get_id(), 17);
    /// assert_eq!(atom.get_position().y, 2.5);
    /// ```
    pub fn new(id: AtomId, position: Vector3D) -> Self {
        Atom { id, position }
    }

    /// Get the LAMMPS id of the atom.
    #[inline]
    pub fn get_id(&self) -> AtomId {
        self.id
    }

    /// Get the position of the atom.
    #[inline]
    pub fn get_position(&self) -> &Vector3D {
        &self.position
    }

    /// Get the x-coordinate of the atom.
    #[inline]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// Get the y-coordinate of the atom.
    #[inline]
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Distance of the atom from a point in the xy-plane.
    #[inline]
    pub fn distance_xy(&self, x: f64, y: f64) -> f64 {
        self.position.distance_xy(x, y)
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
