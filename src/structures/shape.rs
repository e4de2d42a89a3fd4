// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of two-dimensional shapes for geometry selections.
//! All shapes ignore the z-coordinate of the atoms.

use serde::{Deserialize, Serialize};

use crate::errors::InvalidParameterError;
use crate::structures::vector3d::Vector3D;

/// Any structure implementing this trait can be used for geometry selection.
pub trait Shape {
    /// Returns `true` if target point is inside the `Shape`. Else returns `false`.
    fn inside(&self, point: &Vector3D) -> bool;
}

/// Axis-aligned rectangle in the xy-plane. Bounds are inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
}

/// Orientation of a line selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineAxis {
    /// Line parallel to the x-axis (`y = coordinate`).
    #[serde(alias = "h")]
    Horizontal,
    /// Line parallel to the y-axis (`x = coordinate`).
    #[serde(alias = "v")]
    Vertical,
}

/// Band of finite width around a horizontal or vertical line.
#[derive(Debug, Clone, PartialEq)]
pub struct Strip {
    axis: LineAxis,
    coordinate: f64,
    tolerance: f64,
}

/// Returns an error if `value` is NaN or infinite.
pub(crate) fn check_finite(value: f64, name: &'static str) -> Result<f64, InvalidParameterError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InvalidParameterError::NotFinite(name))
    }
}

impl Rectangle {
    /// Construct a new Rectangle.
    ///
    /// ## Returns
    /// - `InvalidParameterError::NotFinite` if any of the bounds is NaN or infinite.
    /// - `InvalidParameterError::EmptyBounds` if a minimum is larger than the corresponding maximum.
    ///
    /// ## Example
    /// ```
    /// # use breather_rs::prelude::*;
    /// let rect = Rectangle::new(0.0, 1.0, -2.0, 2.0).unwrap();
    /// assert!(rect.inside(&[1.0, 2.0, 5.0].into()));
    /// assert!(!rect.inside(&[1.1, 0.0, 0.0].into()));
    /// ```
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Self, InvalidParameterError> {
        check_finite(xmin, "xmin")?;
        check_finite(xmax, "xmax")?;
        check_finite(ymin, "ymin")?;
        check_finite(ymax, "ymax")?;

        if xmin > xmax {
            return Err(InvalidParameterError::EmptyBounds(xmin, xmax));
        }

        if ymin > ymax {
            return Err(InvalidParameterError::EmptyBounds(ymin, ymax));
        }

        Ok(Rectangle {
            xmin,
            xmax,
            ymin,
            ymax,
        })
    }

    /// Construct a Rectangle from two arbitrary opposite corners.
    pub fn from_corners(a: [f64; 2], b: [f64; 2]) -> Result<Self, InvalidParameterError> {
        Rectangle::new(a[0].min(b[0]), a[0].max(b[0]), a[1].min(b[1]), a[1].max(b[1]))
    }

    /// Get the bounds of the rectangle as `[xmin, xmax, ymin, ymax]`.
    pub fn get_bounds(&self) -> [f64; 4] {
        [self.xmin, self.xmax, self.ymin, self.ymax]
    }
}

impl Shape for Rectangle {
    fn inside(&self, point: &Vector3D) -> bool {
        point.x >= self.xmin && point.x <= self.xmax && point.y >= self.ymin && point.y <= self.ymax
    }
}

impl Strip {
    /// Construct a new Strip of half-width `tolerance` around a line.
    pub fn new(
        axis: LineAxis,
        coordinate: f64,
        tolerance: f64,
    ) -> Result<Self, InvalidParameterError> {
        check_finite(coordinate, "coordinate")?;
        check_finite(tolerance, "tolerance")?;

        if tolerance < 0.0 {
            return Err(InvalidParameterError::NegativeTolerance(tolerance));
        }

        Ok(Strip {
            axis,
            coordinate,
            tolerance,
        })
    }

    /// Get the orientation of the line.
    pub fn get_axis(&self) -> LineAxis {
        self.axis
    }

    /// Get the coordinate at which the line is placed.
    pub fn get_coordinate(&self) -> f64 {
        self.coordinate
    }

    /// Get the half-width of the strip.
    pub fn get_tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Shape for Strip {
    fn inside(&self, point: &Vector3D) -> bool {
        let value = match self.axis {
            LineAxis::Horizontal => point.y,
            LineAxis::Vertical => point.x,
        };

        (value - self.coordinate).abs() <= self.tolerance
    }
}

impl LineAxis {
    /// Coordinate of `point` measured along a line of this orientation.
    #[inline]
    pub fn along(&self, point: &Vector3D) -> f64 {
        match self {
            LineAxis::Horizontal => point.x,
            LineAxis::Vertical => point.y,
        }
    }

    /// Coordinate of `point` measured across a line of this orientation.
    #[inline]
    pub fn across(&self, point: &Vector3D) -> f64 {
        match self {
            LineAxis::Horizontal => point.y,
            LineAxis::Vertical => point.x,
        }
    }

    /// The perpendicular orientation.
    #[inline]
    pub fn perpendicular(&self) -> LineAxis {
        match self {
            LineAxis::Horizontal => LineAxis::Vertical,
            LineAxis::Vertical => LineAxis::Horizontal,
        }
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests_rectangle {
    use super::*;
    use rand::Rng;

    #[test]
    fn new_fails() {
        assert_eq!(
            Rectangle::new(1.0, 0.0, 0.0, 1.0),
            Err(InvalidParameterError::EmptyBounds(1.0, 0.0))
        );
        assert_eq!(
            Rectangle::new(0.0, 1.0, 3.0, 2.0),
            Err(InvalidParameterError::EmptyBounds(3.0, 2.0))
        );
        assert_eq!(
            Rectangle::new(f64::NAN, 1.0, 0.0, 1.0),
            Err(InvalidParameterError::NotFinite("xmin"))
        );
    }

    #[test]
    fn degenerate_is_allowed() {
        let rect = Rectangle::new(1.0, 1.0, 0.0, 0.0).unwrap();
        assert!(rect.inside(&[1.0, 0.0, 0.0].into()));
        assert!(!rect.inside(&[1.0, 0.1, 0.0].into()));
    }

    #[test]
    fn from_corners() {
        let rect = Rectangle::from_corners([2.0, -1.0], [0.5, 3.0]).unwrap();
        assert_eq!(rect.get_bounds(), [0.5, 2.0, -1.0, 3.0]);
    }

    #[test]
    fn inside_rand() {
        let mut rng = rand::thread_rng();
        let rect = Rectangle::new(-2.5, 1.5, 0.0, 4.0).unwrap();

        for _ in 0..1000 {
            let point = Vector3D::new(
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
            );

            let expected = point.x >= -2.5 && point.x <= 1.5 && point.y >= 0.0 && point.y <= 4.0;
            assert_eq!(rect.inside(&point), expected);
        }
    }
}
