// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Parameters of line-based selections.

use crate::errors::InvalidParameterError;
use crate::structures::shape::{check_finite, LineAxis};

/// Selection of every N-th atom lying on a horizontal or vertical line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSelection {
    axis: LineAxis,
    coordinate: f64,
    tolerance: Option<f64>,
    keep_one_of_n: usize,
    offset: usize,
}

/// Selection propagating a line selection into the perpendicular direction.
///
/// Every N-th atom on the base line becomes an anchor. From every anchor, atoms lying on
/// the perpendicular line through the anchor are selected keeping every M-th of them.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSelection {
    line: LineSelection,
    across_keep_one_of_n: usize,
    across_offset: usize,
}

impl LineSelection {
    /// Construct a new line selection.
    ///
    /// ## Arguments
    /// - `axis` - Orientation of the line.
    /// - `coordinate` - `y` of a horizontal line or `x` of a vertical line.
    /// - `tolerance` - Maximal distance of an atom from the line. If `None`, the tolerance
    ///   is estimated from the density of the atoms when the selection is applied.
    /// - `keep_one_of_n` - Keep every N-th atom along the line.
    /// - `offset` - Index of the first kept atom. Offsets larger than N wrap around.
    ///
    /// ## Returns
    /// `InvalidParameterError` if `keep_one_of_n` is zero, the coordinate is not finite,
    /// or the tolerance is negative or not finite.
    pub fn new(
        axis: LineAxis,
        coordinate: f64,
        tolerance: Option<f64>,
        keep_one_of_n: usize,
        offset: usize,
    ) -> Result<Self, InvalidParameterError> {
        check_finite(coordinate, "coordinate")?;

        if let Some(tol) = tolerance {
            check_finite(tol, "tolerance")?;
            if tol < 0.0 {
                return Err(InvalidParameterError::NegativeTolerance(tol));
            }
        }

        if keep_one_of_n == 0 {
            return Err(InvalidParameterError::ZeroSpacing);
        }

        Ok(LineSelection {
            axis,
            coordinate,
            tolerance,
            keep_one_of_n,
            offset: offset % keep_one_of_n,
        })
    }

    /// Line selection keeping all atoms within `tolerance` of the line.
    pub fn all(
        axis: LineAxis,
        coordinate: f64,
        tolerance: Option<f64>,
    ) -> Result<Self, InvalidParameterError> {
        LineSelection::new(axis, coordinate, tolerance, 1, 0)
    }

    pub fn get_axis(&self) -> LineAxis {
        self.axis
    }

    pub fn get_coordinate(&self) -> f64 {
        self.coordinate
    }

    pub fn get_tolerance(&self) -> Option<f64> {
        self.tolerance
    }

    pub fn get_keep_one_of_n(&self) -> usize {
        self.keep_one_of_n
    }

    /// Offset reduced modulo `keep_one_of_n`.
    pub fn get_offset(&self) -> usize {
        self.offset
    }

    /// Returns `true` if the atom at `index` (counted along the line) is kept.
    #[inline]
    pub(crate) fn keeps(&self, index: usize) -> bool {
        index % self.keep_one_of_n == self.offset
    }
}

impl RuleSelection {
    /// Construct a new rule selection from a base line and the stride of the perpendicular lines.
    ///
    /// ## Returns
    /// `InvalidParameterError::ZeroSpacing` if `across_keep_one_of_n` is zero.
    pub fn new(
        line: LineSelection,
        across_keep_one_of_n: usize,
        across_offset: usize,
    ) -> Result<Self, InvalidParameterError> {
        if across_keep_one_of_n == 0 {
            return Err(InvalidParameterError::ZeroSpacing);
        }

        Ok(RuleSelection {
            line,
            across_keep_one_of_n,
            across_offset: across_offset % across_keep_one_of_n,
        })
    }

    pub fn get_line(&self) -> &LineSelection {
        &self.line
    }

    pub fn get_across_keep_one_of_n(&self) -> usize {
        self.across_keep_one_of_n
    }

    pub fn get_across_offset(&self) -> usize {
        self.across_offset
    }
}
