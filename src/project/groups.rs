// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of Project methods for working with groups.

use std::collections::BTreeSet;

use hashbrown::HashMap;

use crate::auxiliary::name_is_valid;
use crate::errors::GroupError;
use crate::project::general::Project;
use crate::project::history::{Action, Membership};
use crate::structures::{
    atom::AtomId,
    color::{Rgba, UNASSIGNED},
    group::{AssignMode, Direction, Group},
    localizing::LocalizingParams,
};

/// ## Methods for working with groups of atoms.
///
/// Every atom belongs to at most one group. Assigning an atom to a group
/// removes it from the group it previously belonged to.
/// All edits are recorded in the undo log unless they change nothing.
impl Project {
    /// Create a new empty group.
    ///
    /// ## Returns
    /// - `Ok` if the group was successfully created.
    /// - `GroupError::InvalidName` if the name of the group is invalid.
    /// - `GroupError::AlreadyExists` if a group with the same name already exists.
    /// - `GroupError::InvalidDirection` if the direction is zero or not finite.
    ///
    /// ## Example
    /// ```
    /// # use breather_rs::prelude::*;
    /// let atoms = vec![Atom::new(1, [0.0, 0.0, 0.0].into())];
    /// let store = AtomStore::new(atoms, SimBox::from([0.0, 1.0, 0.0, 1.0, 0.0, 0.0])).unwrap();
    /// let mut project = Project::new(store);
    ///
    /// if let Err(e) = project.group_create("Left edge", None, Direction::Vector([0.0, 1.0, 0.0])) {
    ///     eprintln!("{}", e);
    ///     return;
    /// }
    /// ```
    ///
    /// ## Notes
    /// - The following characters are not allowed in group names: '"&|!@()<>=
    /// - If no color is provided, the next color of the default palette is used.
    pub fn group_create(
        &mut self,
        name: &str,
        color: Option<Rgba>,
        direction: Direction,
    ) -> Result<(), GroupError> {
        if !name_is_valid(name) {
            return Err(GroupError::InvalidName(name.to_owned()));
        }

        if self.group_exists(name) {
            return Err(GroupError::AlreadyExists(name.to_owned()));
        }

        let direction = direction.to_unit()?;
        let color = match color {
            Some(x) => x,
            None => Rgba::from_palette(self.next_palette_index()),
        };

        let index = self.get_n_groups();
        self.commit(Action::Create {
            name: name.to_owned(),
            index,
            group: Group::new(color, direction),
        });

        Ok(())
    }

    /// Delete a group. Atoms of the group become unassigned.
    pub fn group_delete(&mut self, name: &str) -> Result<(), GroupError> {
        let (index, _, group) = self
            .get_groups()
            .get_full(name)
            .ok_or_else(|| GroupError::NotFound(name.to_owned()))?;

        let action = Action::Delete {
            name: name.to_owned(),
            index,
            group: group.clone(),
        };

        self.commit(action);
        Ok(())
    }

    /// Assign atoms to a group. Atoms already in the group are kept.
    /// Atoms belonging to other groups are moved to this group.
    ///
    /// ## Returns
    /// - `GroupError::NotFound` if the group does not exist.
    /// - `GroupError::UnknownAtom` if any of the ids does not exist. No atom is assigned in such case.
    pub fn group_assign(
        &mut self,
        name: &str,
        ids: impl IntoIterator<Item = AtomId>,
    ) -> Result<(), GroupError> {
        self.reassign(name, ids, AssignMode::Add)
    }

    /// Remove atoms from a group. Atoms not belonging to the group are ignored.
    ///
    /// ## Returns
    /// - `GroupError::NotFound` if the group does not exist.
    /// - `GroupError::UnknownAtom` if any of the ids does not exist. No atom is removed in such case.
    pub fn group_remove_atoms(
        &mut self,
        name: &str,
        ids: impl IntoIterator<Item = AtomId>,
    ) -> Result<(), GroupError> {
        self.reassign(name, ids, AssignMode::Remove)
    }

    /// Atoms of the group are removed from it, all other atoms are assigned to it.
    pub fn group_toggle(
        &mut self,
        name: &str,
        ids: impl IntoIterator<Item = AtomId>,
    ) -> Result<(), GroupError> {
        self.reassign(name, ids, AssignMode::Toggle)
    }

    /// Combine selected atoms with a group using the given mode.
    pub fn apply_selection(
        &mut self,
        name: &str,
        ids: impl IntoIterator<Item = AtomId>,
        mode: AssignMode,
    ) -> Result<(), GroupError> {
        self.reassign(name, ids, mode)
    }

    /// Mode in which selections are combined with groups.
    /// `AssignMode::Add` if `preserve_base_selection` is set, otherwise `AssignMode::Toggle`.
    pub fn selection_mode(&self) -> AssignMode {
        if self.get_preserve_base_selection() {
            AssignMode::Add
        } else {
            AssignMode::Toggle
        }
    }

    /// Set the direction along which the atoms of the group are displaced.
    pub fn group_set_direction(
        &mut self,
        name: &str,
        direction: Direction,
    ) -> Result<(), GroupError> {
        let before = *self.get_group(name)?.get_direction();
        let after = direction.to_unit()?;

        if before != after {
            self.commit(Action::SetDirection {
                name: name.to_owned(),
                before,
                after,
            });
        }

        Ok(())
    }

    /// Set the color of the group.
    pub fn group_set_color(&mut self, name: &str, color: Rgba) -> Result<(), GroupError> {
        let before = self.get_group(name)?.get_color();

        if before != color {
            self.commit(Action::SetColor {
                name: name.to_owned(),
                before,
                after: color,
            });
        }

        Ok(())
    }

    /// Set parameters of the localizing function used specifically for this group.
    ///
    /// ## Returns
    /// `GroupError::InvalidParameter` if any of the parameters is not finite.
    pub fn group_set_localizing(
        &mut self,
        name: &str,
        params: LocalizingParams,
    ) -> Result<(), GroupError> {
        params.validate()?;
        self.change_localizing(name, Some(params))
    }

    /// Remove the group-specific parameters of the localizing function.
    /// The group then uses the project defaults.
    pub fn group_clear_localizing(&mut self, name: &str) -> Result<(), GroupError> {
        self.change_localizing(name, None)
    }

    /// Check whether a group with the given name exists.
    pub fn group_exists(&self, name: &str) -> bool {
        self.get_groups().contains_key(name)
    }

    /// Get the group with the given name.
    pub fn get_group(&self, name: &str) -> Result<&Group, GroupError> {
        self.get_groups()
            .get(name)
            .ok_or_else(|| GroupError::NotFound(name.to_owned()))
    }

    /// Get the name of the group the atom belongs to.
    pub fn group_of(&self, id: AtomId) -> Option<&str> {
        self.get_groups()
            .iter()
            .find(|(_, group)| group.contains(id))
            .map(|(name, _)| name.as_str())
    }

    /// Get ids of all atoms that do not belong to any group.
    pub fn unassigned(&self) -> BTreeSet<AtomId> {
        let owners = self.owners();
        self.get_atoms()
            .ids()
            .filter(|id| !owners.contains_key(id))
            .collect()
    }

    /// Get the colors of all atoms in the order of `AtomStore::all`.
    ///
    /// ## Notes
    /// - Atoms of a group have the color of the group, other atoms are gray.
    /// - Atoms outside of an active circle mask are dimmed.
    pub fn atom_colors(&self) -> Vec<Rgba> {
        let owners = self.owners();
        let mask = self.active_mask();

        self.get_atoms()
            .all()
            .iter()
            .map(|atom| {
                let color = owners
                    .get(&atom.get_id())
                    .and_then(|name| self.get_groups().get(*name))
                    .map(|group| group.get_color())
                    .unwrap_or(UNASSIGNED);

                match mask {
                    Some(mask) if !mask.contains(atom.get_position()) => {
                        color.dimmed(mask.get_dim_factor())
                    }
                    _ => color,
                }
            })
            .collect()
    }

    /// Map of atom ids to the names of the groups they belong to.
    fn owners(&self) -> HashMap<AtomId, &str> {
        let mut owners = HashMap::new();
        for (name, group) in self.get_groups() {
            for &id in group.get_atoms() {
                owners.insert(id, name.as_str());
            }
        }

        owners
    }

    /// Change memberships of atoms with respect to the target group.
    fn reassign(
        &mut self,
        name: &str,
        ids: impl IntoIterator<Item = AtomId>,
        mode: AssignMode,
    ) -> Result<(), GroupError> {
        if !self.group_exists(name) {
            return Err(GroupError::NotFound(name.to_owned()));
        }

        let ids: BTreeSet<AtomId> = ids.into_iter().collect();
        if let Some(&unknown) = ids.iter().find(|&&id| !self.get_atoms().contains(id)) {
            return Err(GroupError::UnknownAtom(unknown));
        }

        let owners = self.owners();
        let changes: Vec<Membership> = ids
            .into_iter()
            .filter_map(|id| {
                let before = owners.get(&id).copied();
                let in_group = before == Some(name);

                let after = match mode {
                    AssignMode::Add => Some(name),
                    AssignMode::Remove if in_group => None,
                    AssignMode::Remove => before,
                    AssignMode::Toggle if in_group => None,
                    AssignMode::Toggle => Some(name),
                };

                (before != after).then(|| Membership {
                    id,
                    before: before.map(str::to_owned),
                    after: after.map(str::to_owned),
                })
            })
            .collect();
        drop(owners);

        if changes.is_empty() {
            log::debug!("Selection does not change group '{}'.", name);
            return Ok(());
        }

        self.commit(Action::Reassign(changes));
        Ok(())
    }

    /// Set or clear the group-specific parameters of the localizing function.
    fn change_localizing(
        &mut self,
        name: &str,
        after: Option<LocalizingParams>,
    ) -> Result<(), GroupError> {
        let before = self.get_group(name)?.get_localizing().cloned();

        if before != after {
            self.commit(Action::SetLocalizing {
                name: name.to_owned(),
                before,
                after,
            });
        }

        Ok(())
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/


#[cfg(test)]
mod tests_membership {
    use super::*;
    use crate::config::ColumnLayout;
    use crate::store::general::AtomStore;

    fn project() -> Project {
        let mut project =
            Project::new(AtomStore::from_file("test_files/grid.data", &ColumnLayout::Auto).unwrap());
        project.group_create("A", None, Direction::default()).unwrap();
        project.group_create("B", None, Direction::Angle(90.0)).unwrap();
        project
    }

    fn atoms(project: &Project, name: &str) -> Vec<AtomId> {
        project
            .get_group(name)
            .unwrap()
            .get_atoms()
            .iter()
            .copied()
            .collect()
    }

    #[test]
    fn assign_is_idempotent() {
        let mut project = project();
        project.group_assign("A", [3, 1, 2]).unwrap();
        project.group_assign("A", [2, 3]).unwrap();
        assert_eq!(atoms(&project, "A"), vec![1, 2, 3]);
    }

    #[test]
    fn assign_last_write_wins() {
        let mut project = project();
        project.group_assign("A", [1, 2, 3]).unwrap();
        project.group_assign("B", [3, 4]).unwrap();

        assert_eq!(atoms(&project, "A"), vec![1, 2]);
        assert_eq!(atoms(&project, "B"), vec![3, 4]);
        assert_eq!(project.group_of(3), Some("B"));
        assert_eq!(project.group_of(5), None);
    }

    #[test]
    fn assign_unknown_atom() {
        let mut project = project();
        assert_eq!(
            project.group_assign("A", [1, 26]),
            Err(GroupError::UnknownAtom(26))
        );
        assert!(project.get_group("A").unwrap().is_empty());

        // the failed assignment is not recorded
        assert!(project.undo());
        assert!(!project.group_exists("B"));
    }

    #[test]
    fn assign_nonexistent_group() {
        let mut project = project();
        assert_eq!(
            project.group_assign("C", [1]),
            Err(GroupError::NotFound("C".to_owned()))
        );
    }

    #[test]
    fn remove_atoms() {
        let mut project = project();
        project.group_assign("A", [1, 2, 3]).unwrap();
        project.group_assign("B", [4]).unwrap();

        project.group_remove_atoms("A", [2, 4, 5]).unwrap();
        assert_eq!(atoms(&project, "A"), vec![1, 3]);
        assert_eq!(atoms(&project, "B"), vec![4]);
    }

    #[test]
    fn toggle() {
        let mut project = project();
        project.group_assign("A", [1, 2]).unwrap();
        project.group_assign("B", [3]).unwrap();

        project.group_toggle("A", [2, 3, 4]).unwrap();
        assert_eq!(atoms(&project, "A"), vec![1, 3, 4]);
        assert!(atoms(&project, "B").is_empty());
    }

    #[test]
    fn selection_mode() {
        let mut project = project();
        assert_eq!(project.selection_mode(), AssignMode::Add);
        project.set_preserve_base_selection(false);
        assert_eq!(project.selection_mode(), AssignMode::Toggle);

        project.apply_selection("A", [1, 2], AssignMode::Add).unwrap();
        project
            .apply_selection("A", [2, 3], project.selection_mode())
            .unwrap();
        assert_eq!(atoms(&project, "A"), vec![1, 3]);

        project.apply_selection("A", [3], AssignMode::Remove).unwrap();
        assert_eq!(atoms(&project, "A"), vec![1]);
    }

    #[test]
    fn unassigned() {
        let mut project = project();
        project.group_assign("A", 1..=10).unwrap();
        project.group_assign("B", 20..=25).unwrap();

        assert_eq!(
            project.unassigned().into_iter().collect::<Vec<_>>(),
            (11..20).collect::<Vec<_>>()
        );
    }

    #[test]
    fn no_op_not_recorded() {
        let mut project = project();
        project.clear_history();

        project.group_assign("A", [1]).unwrap();
        project.group_assign("A", [1]).unwrap();
        project.group_remove_atoms("B", [1]).unwrap();
        project.group_set_color("A", project.get_group("A").unwrap().get_color()).unwrap();
        project.group_set_direction("B", Direction::Angle(90.0)).unwrap();

        assert!(project.undo());
        assert!(!project.can_undo());
    }
}

#[cfg(test)]
mod tests_properties {
    use super::*;
    use crate::config::ColumnLayout;
    use crate::store::general::AtomStore;
    use crate::structures::mask::CircleMask;
    use crate::structures::vector3d::Vector3D;

    fn project() -> Project {
        let mut project =
            Project::new(AtomStore::from_file("test_files/chain.data", &ColumnLayout::Auto).unwrap());
        project
            .group_create("A", Some(Rgba(200, 100, 50, 255)), Direction::default())
            .unwrap();
        project
    }

    #[test]
    fn set_direction() {
        let mut project = project();
        project
            .group_set_direction("A", Direction::Vector([0.0, 0.0, -3.0]))
            .unwrap();
        assert_eq!(
            project.get_group("A").unwrap().get_direction(),
            &Vector3D::new(0.0, 0.0, -1.0)
        );

        assert_eq!(
            project.group_set_direction("A", Direction::Angle(f64::INFINITY)),
            Err(GroupError::InvalidDirection)
        );
        assert_eq!(
            project.group_set_direction("X", Direction::default()),
            Err(GroupError::NotFound("X".to_owned()))
        );
    }

    #[test]
    fn set_localizing() {
        let mut project = project();
        let params = LocalizingParams::new(2.0, 0.0, [1.0, 0.0]).unwrap();
        project.group_set_localizing("A", params.clone()).unwrap();
        assert_eq!(project.get_group("A").unwrap().get_localizing(), Some(&params));

        project.group_clear_localizing("A").unwrap();
        assert_eq!(project.get_group("A").unwrap().get_localizing(), None);
    }

    #[test]
    fn colors() {
        let mut project = project();
        project.group_assign("A", [2]).unwrap();

        assert_eq!(
            project.atom_colors(),
            vec![UNASSIGNED, Rgba(200, 100, 50, 255), UNASSIGNED]
        );

        project.set_circle_mask(Some(CircleMask::new([0.0, 0.0], 1.5).unwrap()));
        assert_eq!(
            project.atom_colors(),
            vec![UNASSIGNED, Rgba(200, 100, 50, 255), UNASSIGNED.dimmed(0.4)]
        );

        project.set_circle_mask(Some(CircleMask::new([0.0, 0.0], 0.5).unwrap()));
        assert_eq!(
            project.atom_colors(),
            vec![UNASSIGNED, Rgba(80, 40, 20, 255), UNASSIGNED.dimmed(0.4)]
        );
    }
}
