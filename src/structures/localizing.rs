// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of the localizing function `A / cosh(beta * R)`.

use serde::{Deserialize, Serialize};

use crate::errors::InvalidParameterError;
use crate::structures::shape::check_finite;
use crate::structures::vector3d::Vector3D;

/// Parameters of the localizing function concentrating the displacement
/// around a center point in the xy-plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalizingParams {
    /// Amplitude `A` of the displacement.
    amplitude: f64,
    /// Inverse width `beta` of the envelope.
    beta: f64,
    /// Center of the envelope `(x0, y0)`.
    center: [f64; 2],
}

/// Spatial profile of the displacement magnitude applied to the atoms of a group.
#[derive(Debug, Clone, PartialEq)]
pub enum Profile {
    /// Every atom is displaced by the same magnitude.
    Uniform(f64),
    /// Magnitude follows `A / cosh(beta * R)`.
    Localized(LocalizingParams),
}

impl LocalizingParams {
    /// Construct new parameters of the localizing function.
    ///
    /// ## Returns
    /// `InvalidParameterError::NotFinite` if any of the values is NaN or infinite.
    ///
    /// ## Example
    /// ```
    /// # use breather_rs::prelude::*;
    /// let params = LocalizingParams::new(2.0, 0.0, [0.0, 0.0]).unwrap();
    /// // beta = 0 yields the amplitude everywhere
    /// assert_eq!(params.magnitude_at(&[100.0, -3.0, 0.0].into()), 2.0);
    /// ```
    pub fn new(amplitude: f64, beta: f64, center: [f64; 2]) -> Result<Self, InvalidParameterError> {
        check_finite(amplitude, "amplitude")?;
        check_finite(beta, "beta")?;
        check_finite(center[0], "center x")?;
        check_finite(center[1], "center y")?;

        Ok(LocalizingParams::from_parts(amplitude, beta, center))
    }

    /// Construct parameters without checking them.
    pub(crate) fn from_parts(amplitude: f64, beta: f64, center: [f64; 2]) -> Self {
        LocalizingParams {
            amplitude,
            beta,
            center,
        }
    }

    pub fn get_amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn get_beta(&self) -> f64 {
        self.beta
    }

    pub fn get_center(&self) -> [f64; 2] {
        self.center
    }

    /// Magnitude of the displacement for an atom at `position`.
    ///
    /// ## Notes
    /// - `R` is measured in the xy-plane.
    /// - Overflow of `cosh` for very distant atoms yields zero magnitude.
    pub fn magnitude_at(&self, position: &Vector3D) -> f64 {
        let r = position.distance_xy(self.center[0], self.center[1]);
        self.amplitude / (self.beta * r).cosh()
    }

    /// Check that the parameters of a deserialized structure are valid.
    pub(crate) fn validate(&self) -> Result<(), InvalidParameterError> {
        LocalizingParams::new(self.amplitude, self.beta, self.center).map(|_| ())
    }
}

impl Profile {
    /// Magnitude of the displacement for an atom at `position`.
    pub fn magnitude_at(&self, position: &Vector3D) -> f64 {
        match self {
            Profile::Uniform(amplitude) => *amplitude,
            Profile::Localized(params) => params.magnitude_at(position),
        }
    }

    /// Displacement vector of an atom at `position` moved along the unit vector `direction`.
    pub fn displacement_at(&self, position: &Vector3D, direction: &Vector3D) -> Vector3D {
        *direction * self.magnitude_at(position)
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
