// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of the `Project` structure and methods for constructing it and accessing its properties.

use std::error::Error;
use std::path::Path;

use indexmap::IndexMap;

use crate::config::{ColumnLayout, Settings};
use crate::files::FileType;
use crate::project::history::History;
use crate::store::general::AtomStore;
use crate::structures::{
    group::Group, localizing::LocalizingParams, mask::CircleMask, view::ViewState,
};

/// Default amplitude of the breather.
pub const DEFAULT_AMPLITUDE: f64 = 0.05;
/// Default inverse width of the breather.
pub const DEFAULT_BETA: f64 = 1.0;

/// Atoms together with the groups of atoms to displace and parameters of the breather.
#[derive(Debug, Clone)]
pub struct Project {
    /// Atoms loaded from the LAMMPS data file.
    atoms: AtomStore,
    /// Groups of atoms in the order of creation.
    groups: IndexMap<String, Group>,
    /// Default parameters of the localizing function.
    breather: LocalizingParams,
    /// Use the localizing function for groups without their own parameters.
    apply_localizing: bool,
    /// Selections add atoms to the target group instead of toggling them.
    preserve_base_selection: bool,
    circle_mask: Option<CircleMask>,
    view: ViewState,
    /// Default tolerance of line selections.
    tolerance: Option<f64>,
    /// Number of groups created so far. Used to assign palette colors.
    created_groups: usize,
    history: History,
}

/// ## Methods for creating `Project` structures and accessing their properties.
impl Project {
    /// Create a new Project without any groups.
    ///
    /// ## Notes
    /// - The localizing function is centered at the center of the simulation box
    ///   with amplitude 0.05 and beta 1.0.
    /// - Both `apply_localizing` and `preserve_base_selection` are enabled.
    pub fn new(atoms: AtomStore) -> Self {
        let breather = LocalizingParams::from_parts(
            DEFAULT_AMPLITUDE,
            DEFAULT_BETA,
            atoms.get_box().center_xy(),
        );

        Project {
            atoms,
            groups: IndexMap::new(),
            breather,
            apply_localizing: true,
            preserve_base_selection: true,
            circle_mask: None,
            view: ViewState::default(),
            tolerance: None,
            created_groups: 0,
            history: History::default(),
        }
    }

    /// Apply library settings relevant for the project (line tolerance and the size of the undo log).
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.tolerance = settings.selection.tolerance;
        self.history.set_max_entries(settings.history.max_entries);
        self
    }

    /// Create a new Project from a LAMMPS data file or a project file.
    /// The file type is recognized from the extension: `.bpj` and `.json` are project files.
    ///
    /// ## Example
    /// ```no_run
    /// # use breather_rs::prelude::*;
    /// let project = match Project::from_file("graphene.data", &ColumnLayout::Auto) {
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
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        match FileType::from_name(&filename) {
            FileType::Project => Project::read_bpj(filename).map_err(Box::from),
            FileType::LammpsData => AtomStore::from_file(filename, layout)
                .map(Project::new)
                .map_err(Box::from),
        }
    }

    /// Assemble a project from its parts. Used when reading project files.
    pub(crate) fn from_parts(
        atoms: AtomStore,
        groups: IndexMap<String, Group>,
        breather: LocalizingParams,
        apply_localizing: bool,
        preserve_base_selection: bool,
        circle_mask: Option<CircleMask>,
        view: ViewState,
    ) -> Self {
        let created_groups = groups.len();
        Project {
            atoms,
            groups,
            breather,
            apply_localizing,
            preserve_base_selection,
            circle_mask,
            view,
            tolerance: None,
            created_groups,
            history: History::default(),
        }
    }

    /// Get reference to the atoms of the project.
    pub fn get_atoms(&self) -> &AtomStore {
        &self.atoms
    }

    /// Get reference to the groups of the project in the order of their creation.
    pub fn get_groups(&self) -> &IndexMap<String, Group> {
        &self.groups
    }

    /// Get the number of groups.
    pub fn get_n_groups(&self) -> usize {
        self.groups.len()
    }

    /// Get the default parameters of the localizing function.
    pub fn get_breather(&self) -> &LocalizingParams {
        &self.breather
    }

    /// Set the default parameters of the localizing function.
    pub fn set_breather(&mut self, breather: LocalizingParams) {
        self.breather = breather;
    }

    pub fn get_apply_localizing(&self) -> bool {
        self.apply_localizing
    }

    pub fn set_apply_localizing(&mut self, apply: bool) {
        self.apply_localizing = apply;
    }

    pub fn get_preserve_base_selection(&self) -> bool {
        self.preserve_base_selection
    }

    pub fn set_preserve_base_selection(&mut self, preserve: bool) {
        self.preserve_base_selection = preserve;
    }

    /// Get the circle mask, if any.
    pub fn get_circle_mask(&self) -> Option<&CircleMask> {
        self.circle_mask.as_ref()
    }

    /// Set or remove the circle mask.
    pub fn set_circle_mask(&mut self, mask: Option<CircleMask>) {
        self.circle_mask = mask;
    }

    /// Get the circle mask only if it constrains selections and displacements.
    pub(crate) fn active_mask(&self) -> Option<&CircleMask> {
        self.circle_mask.as_ref().filter(|mask| mask.is_active())
    }

    pub fn get_view(&self) -> &ViewState {
        &self.view
    }

    pub fn get_view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    /// Get the default tolerance of line selections.
    /// `None` means the tolerance is estimated from the atom spacing.
    pub fn get_tolerance(&self) -> Option<f64> {
        self.tolerance
    }

    pub fn set_tolerance(&mut self, tolerance: Option<f64>) {
        self.tolerance = tolerance;
    }

    pub(crate) fn history(&self) -> &History {
        &self.history
    }

    /// Split borrow of the groups and the undo log.
    pub(crate) fn groups_and_history(&mut self) -> (&mut IndexMap<String, Group>, &mut History) {
        (&mut self.groups, &mut self.history)
    }

    /// Get the index of the next palette color and advance it.
    pub(crate) fn next_palette_index(&mut self) -> usize {
        let index = self.created_groups;
        self.created_groups += 1;
        index
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
