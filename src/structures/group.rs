// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of the Group structure and its methods.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::GroupError;
use crate::structures::atom::AtomId;
use crate::structures::color::Rgba;
use crate::structures::localizing::LocalizingParams;
use crate::structures::vector3d::Vector3D;

/******************************/
/*       GROUP STRUCTURE      */
/******************************/

/// Group of atoms displaced along a common direction.
/// The name of the group is owned by the `Project`.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    color: Rgba,
    /// Unit vector.
    direction: Vector3D,
    atoms: BTreeSet<AtomId>,
    localizing: Option<LocalizingParams>,
}

/// Direction of the displacement as provided by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Arbitrary vector. Normalized to unit length.
    Vector([f64; 3]),
    /// Angle in degrees measured from the x-axis in the xy-plane.
    Angle(f64),
}

/// How selected atoms are combined with the atoms of the target group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignMode {
    /// Selected atoms join the group (leaving their previous groups).
    Add,
    /// Selected atoms of the group leave it, other selected atoms join it.
    Toggle,
    /// Selected atoms leave the group.
    Remove,
}

impl Direction {
    /// Convert the direction into a unit vector.
    ///
    /// ## Returns
    /// `GroupError::InvalidDirection` if the vector is null or any value is not finite.
    ///
    /// ## Example
    /// ```
    /// # use breather_rs::prelude::*;
    /// let unit = Direction::Vector([0.0, 0.0, 5.0]).to_unit().unwrap();
    /// assert_eq!(unit, Vector3D::new(0.0, 0.0, 1.0));
    /// ```
    pub fn to_unit(&self) -> Result<Vector3D, GroupError> {
        match self {
            Direction::Vector(v) => Vector3D::from(*v)
                .to_unit()
                .ok_or(GroupError::InvalidDirection),
            Direction::Angle(deg) if deg.is_finite() => Ok(Vector3D::from_angle_xy(*deg)),
            Direction::Angle(_) => Err(GroupError::InvalidDirection),
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Vector([1.0, 0.0, 0.0])
    }
}

impl Group {
    /// Create a new empty group. `direction` is expected to be a unit vector.
    pub(crate) fn new(color: Rgba, direction: Vector3D) -> Self {
        Group {
            color,
            direction,
            atoms: BTreeSet::new(),
            localizing: None,
        }
    }

    /// Create a group with all of its properties. Used when reading project files.
    pub(crate) fn from_parts(
        color: Rgba,
        direction: Vector3D,
        atoms: BTreeSet<AtomId>,
        localizing: Option<LocalizingParams>,
    ) -> Self {
        Group {
            color,
            direction,
            atoms,
            localizing,
        }
    }

    /// Get the color of the group.
    pub fn get_color(&self) -> Rgba {
        self.color
    }

    /// Get the unit vector along which the atoms of the group are displaced.
    pub fn get_direction(&self) -> &Vector3D {
        &self.direction
    }

    /// Get ids of the atoms of the group in ascending order.
    pub fn get_atoms(&self) -> &BTreeSet<AtomId> {
        &self.atoms
    }

    /// Get the number of atoms in the group.
    pub fn get_n_atoms(&self) -> usize {
        self.atoms.len()
    }

    /// Returns `true` if the group contains no atoms.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Check whether the atom with the given id is part of the group.
    pub fn contains(&self, id: AtomId) -> bool {
        self.atoms.contains(&id)
    }

    /// Get the group-specific parameters of the localizing function, if set.
    pub fn get_localizing(&self) -> Option<&LocalizingParams> {
        self.localizing.as_ref()
    }

    pub(crate) fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    pub(crate) fn set_direction(&mut self, direction: Vector3D) {
        self.direction = direction;
    }

    pub(crate) fn set_localizing(&mut self, localizing: Option<LocalizingParams>) {
        self.localizing = localizing;
    }

    /// Returns `true` if the atom was not part of the group.
    pub(crate) fn insert(&mut self, id: AtomId) -> bool {
        self.atoms.insert(id)
    }

    /// Returns `true` if the atom was part of the group.
    pub(crate) fn remove(&mut self, id: AtomId) -> bool {
        self.atoms.remove(&id)
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
