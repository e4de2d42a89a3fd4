// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of the circle mask restricting selections and displacements.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::InvalidParameterError;
use crate::structures::atom::AtomId;
use crate::structures::shape::{check_finite, Shape};
use crate::structures::vector3d::Vector3D;

/// Default factor by which the colors of atoms outside the mask are darkened.
pub const DEFAULT_DIM_FACTOR: f64 = 0.4;

/// Circular region of interest.
///
/// Atoms outside of an enabled mask are dimmed, are not selected,
/// and are not displaced unless explicitly requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CircleMask {
    center: [f64; 2],
    radius: f64,
    #[serde(default = "default_dim_factor")]
    dim_factor: f64,
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn default_dim_factor() -> f64 {
    DEFAULT_DIM_FACTOR
}

fn default_enabled() -> bool {
    true
}

/// Atoms split by a circle mask.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskSplit {
    pub inside: BTreeSet<AtomId>,
    pub outside: BTreeSet<AtomId>,
}

impl CircleMask {
    /// Construct a new enabled mask with the default dim factor.
    ///
    /// ## Returns
    /// `InvalidParameterError` if the center or the radius is not finite or the radius is negative.
    pub fn new(center: [f64; 2], radius: f64) -> Result<Self, InvalidParameterError> {
        check_finite(center[0], "center x")?;
        check_finite(center[1], "center y")?;
        check_finite(radius, "radius")?;

        if radius < 0.0 {
            return Err(InvalidParameterError::NegativeRadius(radius));
        }

        Ok(CircleMask {
            center,
            radius,
            dim_factor: DEFAULT_DIM_FACTOR,
            enabled: true,
        })
    }

    /// Set the factor by which atoms outside the mask are dimmed.
    pub fn with_dim_factor(mut self, factor: f64) -> Result<Self, InvalidParameterError> {
        check_finite(factor, "dim factor")?;
        if !(0.0..=1.0).contains(&factor) {
            return Err(InvalidParameterError::InvalidFactor(factor));
        }

        self.dim_factor = factor;
        Ok(self)
    }

    pub fn get_center(&self) -> [f64; 2] {
        self.center
    }

    pub fn get_radius(&self) -> f64 {
        self.radius
    }

    pub fn get_dim_factor(&self) -> f64 {
        self.dim_factor
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns `true` if the mask constrains anything, i.e. it is enabled and has a positive radius.
    pub fn is_active(&self) -> bool {
        self.enabled && self.radius > 0.0
    }

    /// Returns `true` if the point lies inside the mask (inclusive).
    /// The enabled flag is not taken into account.
    pub fn contains(&self, point: &Vector3D) -> bool {
        let dx = point.x - self.center[0];
        let dy = point.y - self.center[1];
        dx * dx + dy * dy <= self.radius * self.radius
    }

    /// Check that the parameters of a deserialized mask are valid.
    pub(crate) fn validate(&self) -> Result<(), InvalidParameterError> {
        CircleMask::new(self.center, self.radius)?.with_dim_factor(self.dim_factor)?;
        Ok(())
    }
}

impl Shape for CircleMask {
    fn inside(&self, point: &Vector3D) -> bool {
        self.contains(point)
    }
}
