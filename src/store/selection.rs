// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of geometric selections of atoms.

use std::collections::BTreeSet;

use crate::errors::InvalidParameterError;
use crate::store::general::AtomStore;
use crate::structures::{
    atom::{Atom, AtomId},
    line::{LineSelection, RuleSelection},
    mask::{CircleMask, MaskSplit},
    shape::{LineAxis, Rectangle, Shape, Strip},
};

/// ## Methods for selecting atoms based on their positions.
///
/// All selections ignore the z-coordinate. If an active `CircleMask` is provided,
/// atoms outside of it are discarded before any counting along a line takes place.
impl AtomStore {
    /// Select all atoms located inside the given shape.
    pub fn select_geometry(
        &self,
        shape: &impl Shape,
        mask: Option<&CircleMask>,
    ) -> BTreeSet<AtomId> {
        self.candidates(mask)
            .filter(|atom| shape.inside(atom.get_position()))
            .map(|atom| atom.get_id())
            .collect()
    }

    /// Select all atoms inside a rectangle (bounds are inclusive).
    ///
    /// ## Example
    /// ```
    /// # use breather_rs::prelude::*;
    /// let atoms = (1..=3).map(|i| Atom::new(i, [(i - 1) as f64, 0.0, 0.0].into())).collect();
    /// let store = AtomStore::new(atoms, SimBox::from([0.0, 3.0, -1.0, 1.0, 0.0, 0.0])).unwrap();
    ///
    /// let rect = Rectangle::new(0.0, 1.0, -1.0, 1.0).unwrap();
    /// let selected = store.select_rectangle(&rect, None);
    /// assert_eq!(selected.into_iter().collect::<Vec<u64>>(), vec![1, 2]);
    /// ```
    pub fn select_rectangle(
        &self,
        rectangle: &Rectangle,
        mask: Option<&CircleMask>,
    ) -> BTreeSet<AtomId> {
        let selected = self.select_geometry(rectangle, mask);
        log::debug!(
            "Rectangle {:?} selected {} atoms.",
            rectangle.get_bounds(),
            selected.len()
        );
        selected
    }

    /// Select every N-th atom lying on a horizontal or vertical line.
    ///
    /// ## Returns
    /// Ids of the kept atoms. `InvalidParameterError` if the line coordinate is not finite.
    ///
    /// ## Notes
    /// - Atoms are ordered by x (horizontal line) or by y (vertical line), ties are broken by id.
    /// - Atom at position `i` of this ordering is kept if `i % N == offset`.
    /// - If the tolerance is not provided, it is estimated from the atom spacing.
    ///   For a box with no area in the xy-plane the tolerance is zero,
    ///   so only atoms lying exactly on the line are selected.
    pub fn select_line(
        &self,
        line: &LineSelection,
        mask: Option<&CircleMask>,
    ) -> Result<BTreeSet<AtomId>, InvalidParameterError> {
        let kept: BTreeSet<AtomId> = self
            .line_hits(line, mask)?
            .into_iter()
            .map(|atom| atom.get_id())
            .collect();

        log::debug!(
            "Line {:?} at {} kept {} atoms (N = {}, offset = {}).",
            line.get_axis(),
            line.get_coordinate(),
            kept.len(),
            line.get_keep_one_of_n(),
            line.get_offset()
        );

        Ok(kept)
    }

    /// Propagate a line selection into the perpendicular direction.
    ///
    /// Atoms kept by the line selection are used as anchors. For every anchor, atoms
    /// lying on the perpendicular line passing through it are collected and every M-th
    /// of them (counted from the lowest coordinate) is selected.
    ///
    /// ## Returns
    /// Union of the atoms selected from all anchors.
    pub fn select_rule(
        &self,
        rule: &RuleSelection,
        mask: Option<&CircleMask>,
    ) -> Result<BTreeSet<AtomId>, InvalidParameterError> {
        let line = rule.get_line();
        let tolerance = self.resolve_tolerance(line.get_tolerance());
        let across = line.get_axis().perpendicular();

        let mut selected = BTreeSet::new();
        for anchor in self.line_hits(line, mask)? {
            let strip = Strip::new(across, line.get_axis().along(anchor.get_position()), tolerance)?;

            let hits = self.sorted_along(&strip, mask);
            selected.extend(
                hits.into_iter()
                    .enumerate()
                    .filter(|(i, _)| {
                        i % rule.get_across_keep_one_of_n() == rule.get_across_offset()
                    })
                    .map(|(_, atom)| atom.get_id()),
            );
        }

        log::debug!("Rule selection selected {} atoms.", selected.len());
        Ok(selected)
    }

    /// Split atoms into those inside and outside of the circle.
    /// The `enabled` flag of the mask is not taken into account.
    pub fn circle_mask(&self, mask: &CircleMask) -> MaskSplit {
        let mut split = MaskSplit::default();

        for atom in self.all() {
            if mask.inside(atom.get_position()) {
                split.inside.insert(atom.get_id());
            } else {
                split.outside.insert(atom.get_id());
            }
        }

        split
    }

    /// Returns `true` if the atom is not excluded by the mask.
    #[inline]
    pub(crate) fn passes_mask(atom: &Atom, mask: Option<&CircleMask>) -> bool {
        match mask {
            Some(mask) if mask.is_active() => mask.inside(atom.get_position()),
            _ => true,
        }
    }

    /// Iterate over atoms not excluded by the mask.
    fn candidates<'a>(
        &'a self,
        mask: Option<&'a CircleMask>,
    ) -> impl Iterator<Item = &'a Atom> + 'a {
        self.all()
            .iter()
            .filter(move |atom| AtomStore::passes_mask(atom, mask))
    }

    /// Use the provided tolerance or estimate it from the atom spacing.
    fn resolve_tolerance(&self, tolerance: Option<f64>) -> f64 {
        tolerance.unwrap_or_else(|| self.default_tolerance())
    }

    /// Atoms lying inside the strip sorted along the strip.
    fn sorted_along<'a>(&'a self, strip: &Strip, mask: Option<&'a CircleMask>) -> Vec<&'a Atom> {
        let axis: LineAxis = strip.get_axis();
        let mut hits: Vec<&Atom> = self
            .candidates(mask)
            .filter(|atom| strip.inside(atom.get_position()))
            .collect();

        hits.sort_by(|a, b| {
            axis.along(a.get_position())
                .total_cmp(&axis.along(b.get_position()))
                .then(a.get_id().cmp(&b.get_id()))
        });

        hits
    }

    /// Atoms kept by a line selection, ordered along the line.
    fn line_hits<'a>(
        &'a self,
        line: &LineSelection,
        mask: Option<&'a CircleMask>,
    ) -> Result<Vec<&'a Atom>, InvalidParameterError> {
        let tolerance = self.resolve_tolerance(line.get_tolerance());
        let strip = Strip::new(line.get_axis(), line.get_coordinate(), tolerance)?;

        Ok(self
            .sorted_along(&strip, mask)
            .into_iter()
            .enumerate()
            .filter(|(i, _)| line.keeps(*i))
            .map(|(_, atom)| atom)
            .collect())
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/



#[cfg(test)]
mod tests_rule {
    use super::*;
    use crate::config::ColumnLayout;

    fn grid() -> AtomStore {
        AtomStore::from_file("test_files/grid.data", &ColumnLayout::Auto).unwrap()
    }

    #[test]
    fn every_second_column_every_second_row() {
        let line = LineSelection::new(LineAxis::Horizontal, 0.0, Some(0.1), 2, 0).unwrap();
        let rule = RuleSelection::new(line, 2, 0).unwrap();

        // anchors at x = 0, 2, 4; rows y = 0, 2, 4
        let selected = grid().select_rule(&rule, None).unwrap();
        assert_eq!(
            selected,
            BTreeSet::from([1, 3, 5, 11, 13, 15, 21, 23, 25])
        );
    }

    #[test]
    fn vertical_base_line() {
        let line = LineSelection::new(LineAxis::Vertical, 4.0, Some(0.1), 4, 0).unwrap();
        let rule = RuleSelection::new(line, 5, 1).unwrap();

        // anchors at y = 0 and y = 4, one atom at x = 1 of each row
        let selected = grid().select_rule(&rule, None).unwrap();
        assert_eq!(selected, BTreeSet::from([2, 22]));
    }
}
