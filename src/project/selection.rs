// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of Project methods for selecting atoms.

use std::collections::BTreeSet;

use crate::errors::{GroupError, InvalidParameterError};
use crate::project::general::Project;
use crate::structures::{
    atom::AtomId,
    group::AssignMode,
    line::{LineSelection, RuleSelection},
    shape::Rectangle,
};

/// ## Methods for selecting atoms.
///
/// Atoms outside of an enabled circle mask are never selected.
impl Project {
    /// Select atoms inside a rectangle.
    pub fn select_rectangle(&self, rectangle: &Rectangle) -> BTreeSet<AtomId> {
        self.get_atoms()
            .select_rectangle(rectangle, self.active_mask())
    }

    /// Select every N-th atom on a line.
    /// If the line has no tolerance, the default tolerance of the project is used.
    pub fn select_line(
        &self,
        line: &LineSelection,
    ) -> Result<BTreeSet<AtomId>, InvalidParameterError> {
        let line = self.with_default_tolerance(line)?;
        self.get_atoms().select_line(&line, self.active_mask())
    }

    /// Propagate a line selection into the perpendicular direction.
    /// If the line has no tolerance, the default tolerance of the project is used.
    pub fn select_rule(
        &self,
        rule: &RuleSelection,
    ) -> Result<BTreeSet<AtomId>, InvalidParameterError> {
        let line = self.with_default_tolerance(rule.get_line())?;
        let rule = RuleSelection::new(
            line,
            rule.get_across_keep_one_of_n(),
            rule.get_across_offset(),
        )?;

        self.get_atoms().select_rule(&rule, self.active_mask())
    }

    /// Find the atom closest to the point in the xy-plane that is not excluded by the mask.
    pub fn pick(&self, x: f64, y: f64, max_distance: f64) -> Option<AtomId> {
        let id = self.get_atoms().pick(x, y, max_distance)?;
        let atom = self.get_atoms().get(id)?;

        match self.active_mask() {
            Some(mask) if !mask.contains(atom.get_position()) => None,
            _ => Some(id),
        }
    }

    /// Apply a click on a single atom to the group.
    ///
    /// ## Notes
    /// - With `preserve_base_selection`, an unassigned atom joins the group and an assigned
    ///   atom is removed from its group.
    /// - Otherwise, the atom is toggled in the group.
    pub fn apply_pick(&mut self, name: &str, id: AtomId) -> Result<(), GroupError> {
        if !self.get_preserve_base_selection() {
            return self.apply_selection(name, [id], AssignMode::Toggle);
        }

        if !self.group_exists(name) {
            return Err(GroupError::NotFound(name.to_owned()));
        }

        match self.group_of(id).map(str::to_owned) {
            Some(owner) => self.group_remove_atoms(&owner, [id]),
            None => self.group_assign(name, [id]),
        }
    }

    /// Fill in the default tolerance of the project.
    fn with_default_tolerance(
        &self,
        line: &LineSelection,
    ) -> Result<LineSelection, InvalidParameterError> {
        match (line.get_tolerance(), self.get_tolerance()) {
            (None, Some(tolerance)) => LineSelection::new(
                line.get_axis(),
                line.get_coordinate(),
                Some(tolerance),
                line.get_keep_one_of_n(),
                line.get_offset(),
            ),
            _ => Ok(line.clone()),
        }
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
