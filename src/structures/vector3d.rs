// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of methods for three-dimensional vector.

use std::ops::{Deref, DerefMut, Mul};

use nalgebra::base::Vector3;

/// Describes length and orientation of a vector in space or a position of a point in space.
/// Implemented using `nalgebra`'s Vector3.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Vector3D(pub(crate) Vector3<f64>);

impl From<[f64; 3]> for Vector3D {
    #[inline]
    fn from(arr: [f64; 3]) -> Self {
        Vector3D(Vector3::new(arr[0], arr[1], arr[2]))
    }
}

impl From<Vector3D> for [f64; 3] {
    #[inline]
    fn from(vec: Vector3D) -> Self {
        [vec.0.x, vec.0.y, vec.0.z]
    }
}

/// Allows accessing fields of `Vector3D` as `.x`, `.y`, and `.z`.
impl Deref for Vector3D {
    type Target = Vector3<f64>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Vector3D {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Mul<f64> for Vector3D {
    type Output = Vector3D;

    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        Vector3D(self.0 * rhs)
    }
}

impl Vector3D {
    /// Create a new `Vector3D` structure.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3D(Vector3::new(x, y, z))
    }

    /// Calculate length of the vector.
    #[inline]
    pub fn len(&self) -> f64 {
        self.0.norm()
    }

    /// Convert vector to unit vector.
    ///
    /// ## Returns
    /// `None` if the vector has zero length or any of its components is not finite.
    pub fn to_unit(self) -> Option<Vector3D> {
        if !self.is_finite() {
            return None;
        }

        let len = self.len();
        if len == 0.0 || !len.is_finite() {
            None
        } else {
            Some(Vector3D(self.0 / len))
        }
    }

    /// Unit vector lying in the xy-plane rotated by `degrees` from the x-axis.
    #[inline]
    pub fn from_angle_xy(degrees: f64) -> Vector3D {
        let radians = degrees.to_radians();
        Vector3D::new(radians.cos(), radians.sin(), 0.0)
    }

    /// Calculate distance between two points projected into the xy-plane.
    #[inline]
    pub fn distance_xy(&self, x: f64, y: f64) -> f64 {
        (self.0.x - x).hypot(self.0.y - y)
    }

    /// Returns `true` if all components of the vector are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.x.is_finite() && self.0.y.is_finite() && self.0.z.is_finite()
    }

    /// Returns `true` if all components of the vector are zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.x == 0.0 && self.0.y == 0.0 && self.0.z == 0.0
    }
}

impl Default for Vector3D {
    /// Create a null vector.
    fn default() -> Self {
        Vector3D::new(0.0, 0.0, 0.0)
    }
}

/******************************/
/*            SERDE           */
/******************************/

mod serde {
    use std::fmt;

    use super::*;
    use ::serde::{
        de::{self, SeqAccess, Visitor},
        ser::SerializeSeq,
        Deserialize, Deserializer, Serialize, Serializer,
    };

    impl Serialize for Vector3D {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut seq = serializer.serialize_seq(Some(3))?;
            seq.serialize_element(&self.0.x)?;
            seq.serialize_element(&self.0.y)?;
            seq.serialize_element(&self.0.z)?;
            seq.end()
        }
    }

    impl<'de> Deserialize<'de> for Vector3D {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct Vector3DVisitor;

            impl<'de> Visitor<'de> for Vector3DVisitor {
                type Value = Vector3D;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a sequence of three floats")
                }

                fn visit_seq<S>(self, mut seq: S) -> Result<Vector3D, S::Error>
                where
                    S: SeqAccess<'de>,
                {
                    let x = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                    let y = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                    let z = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(2, &self))?;

                    if seq.next_element::<f64>()?.is_some() {
                        return Err(de::Error::invalid_length(4, &self));
                    }

                    Ok(Vector3D(Vector3::new(x, y, z)))
                }
            }

            deserializer.deserialize_seq(Vector3DVisitor)
        }
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
