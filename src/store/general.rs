// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of the `AtomStore` structure and methods for constructing it and accessing its properties.

use std::path::Path;

use hashbrown::HashMap;

use crate::config::ColumnLayout;
use crate::errors::ParseDataError;
use crate::io::lammps_data;
use crate::structures::{
    atom::{Atom, AtomId},
    simbox::SimBox,
};

/// Immutable collection of atoms loaded from a LAMMPS data file.
/// Atoms are stored sorted by their ids.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomStore {
    /// Atoms sorted by ascending id.
    atoms: Vec<Atom>,
    /// Index of each atom in the `atoms` vector.
    lookup: HashMap<AtomId, usize>,
    /// Simulation box from the header of the data file.
    simulation_box: SimBox,
}

/// ## Methods for creating `AtomStore` structures and accessing their properties.
impl AtomStore {
    /// Create a new AtomStore from the provided atoms and simulation box.
    /// The atoms are sorted by their ids.
    ///
    /// ## Returns
    /// `ParseDataError::DuplicateAtomId` if any id is used multiple times.
    ///
    /// ## Example
    /// ```
    /// # use breather_rs::prelude::*;
    /// let atoms = vec![
    ///     Atom::new(2, [1.0, 0.0, 0.0].into()),
    ///     Atom::new(1, [0.0, 0.0, 0.0].into()),
    /// ];
    /// let store = AtomStore::new(atoms, SimBox::from([0.0, 2.0, 0.0, 1.0, 0.0, 0.0])).unwrap();
    ///
    /// assert_eq!(store.get_n_atoms(), 2);
    /// assert_eq!(store.all()[0].get_id(), 1);
    /// ```
    pub fn new(mut atoms: Vec<Atom>, simulation_box: SimBox) -> Result<Self, ParseDataError> {
        atoms.sort_by_key(|atom| atom.get_id());

        let mut lookup = HashMap::with_capacity(atoms.len());
        for (index, atom) in atoms.iter().enumerate() {
            if lookup.insert(atom.get_id(), index).is_some() {
                return Err(ParseDataError::DuplicateAtomId(atom.get_id()));
            }
        }

        Ok(AtomStore {
            atoms,
            lookup,
            simulation_box,
        })
    }

    /// Read atoms from a LAMMPS data file.
    ///
    /// ## Returns
    /// `AtomStore` if successful. `ParseDataError` if the file could not be read,
    /// does not define the box, does not contain a valid `Atoms` section, or contains no atoms.
    ///
    /// ## Example
    /// ```no_run
    /// # use breather_rs::prelude::*;
    /// let store = match AtomStore::from_file("graphene.data", &ColumnLayout::Auto) {
    ///     Ok(x) => x,
    ///     Err(e) => {
    ///         eprintln!("{}", e);
    ///         return;
    ///     }
    /// };
    /// ```
    pub fn from_file(
        filename: impl AsRef<Path>,
        layout: &ColumnLayout,
    ) -> Result<Self, ParseDataError> {
        lammps_data::read_lammps_data(filename, layout)
    }

    /// Get the atom with the given id.
    #[inline]
    pub fn get(&self, id: AtomId) -> Option<&Atom> {
        self.lookup.get(&id).map(|&index| &self.atoms[index])
    }

    /// Get all atoms sorted by ascending id.
    #[inline]
    pub fn all(&self) -> &[Atom] {
        &self.atoms
    }

    /// Iterate over the ids of all atoms in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = AtomId> + '_ {
        self.atoms.iter().map(|atom| atom.get_id())
    }

    /// Get the number of atoms.
    #[inline]
    pub fn get_n_atoms(&self) -> usize {
        self.atoms.len()
    }

    /// Check whether an atom with the given id exists.
    #[inline]
    pub fn contains(&self, id: AtomId) -> bool {
        self.lookup.contains_key(&id)
    }

    /// Get the simulation box.
    #[inline]
    pub fn get_box(&self) -> &SimBox {
        &self.simulation_box
    }

    /// Estimate the typical distance between neighboring atoms
    /// assuming the atoms are evenly distributed in the xy-plane of the box.
    ///
    /// ## Notes
    /// - Calculated as `0.55 * sqrt(area / n_atoms)`.
    /// - Returns zero if the box has no area or the store contains no atoms.
    pub fn estimate_spacing(&self) -> f64 {
        let area = self.simulation_box.area_xy();
        if self.atoms.is_empty() || !(area > 0.0) {
            return 0.0;
        }

        0.55 * (area / self.atoms.len() as f64).sqrt()
    }

    /// Default maximal distance of an atom from a selection line.
    /// Equal to half of the estimated atom spacing.
    #[inline]
    pub fn default_tolerance(&self) -> f64 {
        0.5 * self.estimate_spacing()
    }

    /// Calculate the mean xy-position of the atoms with the given ids.
    ///
    /// ## Returns
    /// `None` if no id is provided or any of the ids does not exist.
    pub fn centroid_xy(&self, ids: &[AtomId]) -> Option<[f64; 2]> {
        if ids.is_empty() {
            return None;
        }

        let mut sum = [0.0, 0.0];
        for &id in ids {
            let atom = self.get(id)?;
            sum[0] += atom.x();
            sum[1] += atom.y();
        }

        let n = ids.len() as f64;
        Some([sum[0] / n, sum[1] / n])
    }

    /// Find the atom closest to the point `(x, y)` in the xy-plane.
    ///
    /// ## Returns
    /// Id of the closest atom or `None` if no atom lies within `max_distance`.
    /// If several atoms lie at the same distance, the one with the lowest id is returned.
    pub fn pick(&self, x: f64, y: f64, max_distance: f64) -> Option<AtomId> {
        self.atoms
            .iter()
            .map(|atom| (atom.get_id(), atom.distance_xy(x, y)))
            .filter(|(_, distance)| *distance <= max_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
