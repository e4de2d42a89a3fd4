// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of Project methods calculating displacements of atoms.

use crate::errors::GroupError;
use crate::project::general::Project;
use crate::store::general::AtomStore;
use crate::structures::{
    atom::AtomId, group::Group, localizing::Profile, vector3d::Vector3D,
};

/// ## Methods for calculating displacements of atoms.
impl Project {
    /// Get the profile of displacement magnitudes used for the atoms of a group.
    ///
    /// ## Notes
    /// The profile is chosen in this order:
    /// 1. Group-specific parameters of the localizing function.
    /// 2. Project defaults of the localizing function, if `apply_localizing` is set.
    /// 3. Uniform displacement with the amplitude of the project defaults.
    pub fn group_profile(&self, name: &str) -> Result<Profile, GroupError> {
        Ok(self.profile_for(self.get_group(name)?))
    }

    /// Calculate the displacement of every atom belonging to any group.
    ///
    /// ## Returns
    /// Ids of atoms and their displacements sorted by ascending id.
    ///
    /// ## Notes
    /// - Atoms outside of an enabled circle mask are skipped unless `include_masked` is set.
    ///
    /// ## Example
    /// ```
    /// # use breather_rs::prelude::*;
    /// let atoms = (1..=3).map(|i| Atom::new(i, [(i - 1) as f64, 0.0, 0.0].into())).collect();
    /// let store = AtomStore::new(atoms, SimBox::from([0.0, 3.0, -1.0, 1.0, 0.0, 0.0])).unwrap();
    /// let mut project = Project::new(store);
    ///
    /// project.group_create("Chain", None, Direction::Vector([1.0, 0.0, 0.0])).unwrap();
    /// project.group_assign("Chain", [1, 2, 3]).unwrap();
    /// project
    ///     .group_set_localizing("Chain", LocalizingParams::new(2.0, 0.0, [0.0, 0.0]).unwrap())
    ///     .unwrap();
    ///
    /// for (_, displacement) in project.displacements(false) {
    ///     assert_eq!(displacement, Vector3D::new(2.0, 0.0, 0.0));
    /// }
    /// ```
    pub fn displacements(&self, include_masked: bool) -> Vec<(AtomId, Vector3D)> {
        let mask = if include_masked {
            None
        } else {
            self.active_mask()
        };

        let mut skipped = 0usize;
        let mut displacements = Vec::new();

        for group in self.get_groups().values() {
            let profile = self.profile_for(group);

            for &id in group.get_atoms() {
                let Some(atom) = self.get_atoms().get(id) else {
                    continue;
                };

                if !AtomStore::passes_mask(atom, mask) {
                    skipped += 1;
                    continue;
                }

                displacements.push((
                    id,
                    profile.displacement_at(atom.get_position(), group.get_direction()),
                ));
            }
        }

        if skipped > 0 {
            log::warn!(
                "{} grouped atom(s) outside of the circle mask will not be displaced.",
                skipped
            );
        }

        displacements.sort_by_key(|(id, _)| *id);
        displacements
    }

    /// Select the profile of displacement magnitudes for a group.
    pub(crate) fn profile_for(&self, group: &Group) -> Profile {
        match group.get_localizing() {
            Some(params) => Profile::Localized(params.clone()),
            None if self.get_apply_localizing() => Profile::Localized(self.get_breather().clone()),
            None => Profile::Uniform(self.get_breather().get_amplitude()),
        }
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnLayout;
    use crate::structures::{
        group::Direction, localizing::LocalizingParams, mask::CircleMask,
    };
    use float_cmp::assert_approx_eq;

    fn chain() -> Project {
        let mut project =
            Project::new(AtomStore::from_file("test_files/chain.data", &ColumnLayout::Auto).unwrap());
        project
            .group_create("Chain", None, Direction::Vector([1.0, 0.0, 0.0]))
            .unwrap();
        project.group_assign("Chain", [1, 2, 3]).unwrap();
        project
    }

    #[test]
    fn group_params_uniform() {
        let mut project = chain();
        project
            .group_set_localizing("Chain", LocalizingParams::new(2.0, 0.0, [0.0, 0.0]).unwrap())
            .unwrap();

        let displacements = project.displacements(false);
        assert_eq!(displacements.len(), 3);
        for (i, (id, displacement)) in displacements.into_iter().enumerate() {
            assert_eq!(id, i as u64 + 1);
            assert_eq!(displacement, Vector3D::new(2.0, 0.0, 0.0));
        }
    }

    #[test]
    fn project_defaults_localized() {
        let mut project = chain();
        project.set_breather(LocalizingParams::new(1.0, 1.0, [1.0, 0.0]).unwrap());

        let displacements = project.displacements(false);
        assert_approx_eq!(f64, displacements[0].1.x, 1.0 / 1.0f64.cosh());
        assert_approx_eq!(f64, displacements[1].1.x, 1.0);
        assert_approx_eq!(f64, displacements[2].1.x, 1.0 / 1.0f64.cosh());
    }

    #[test]
    fn uniform_without_localizing() {
        let mut project = chain();
        project.set_apply_localizing(false);
        project.set_breather(LocalizingParams::new(0.3, 5.0, [1.0, 0.0]).unwrap());

        assert_eq!(
            project.group_profile("Chain").unwrap(),
            Profile::Uniform(0.3)
        );
        for (_, displacement) in project.displacements(false) {
            assert_approx_eq!(f64, displacement.x, 0.3);
        }
    }

    #[test]
    fn group_params_have_priority() {
        let mut project = chain();
        project.set_apply_localizing(false);
        let params = LocalizingParams::new(0.1, 0.5, [0.0, 0.0]).unwrap();
        project.group_set_localizing("Chain", params.clone()).unwrap();

        assert_eq!(
            project.group_profile("Chain").unwrap(),
            Profile::Localized(params)
        );
    }

    #[test]
    fn masked_atoms_skipped() {
        let mut project = chain();
        project.set_circle_mask(Some(CircleMask::new([0.0, 0.0], 1.0).unwrap()));

        let ids: Vec<AtomId> = project.displacements(false).into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![1, 2]);

        assert_eq!(project.displacements(true).len(), 3);
    }

    #[test]
    fn unassigned_not_displaced() {
        let mut project = chain();
        project.group_remove_atoms("Chain", [2]).unwrap();
        let ids: Vec<AtomId> = project.displacements(false).into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn profile_nonexistent() {
        assert_eq!(
            chain().group_profile("X"),
            Err(GroupError::NotFound("X".to_owned()))
        );
    }
}
