// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of functions for reading and writing breather project files.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use hashbrown::HashMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::auxiliary::name_is_valid;
use crate::errors::{GroupError, ProjectLoadError, ProjectSaveError};
use crate::files::AtomicWriter;
use crate::project::general::Project;
use crate::store::general::AtomStore;
use crate::structures::{
    atom::{Atom, AtomId},
    color::Rgba,
    group::{Direction, Group},
    localizing::LocalizingParams,
    mask::CircleMask,
    simbox::SimBox,
    vector3d::Vector3D,
    view::ViewState,
};

/// Version of the project file format written by this library.
pub const PROJECT_FORMAT_VERSION: u32 = 1;

/// Serialized form of a project.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProjectFile {
    format_version: u32,
    #[serde(rename = "box")]
    simulation_box: SimBox,
    atoms: Vec<Atom>,
    #[serde(default)]
    groups: Vec<GroupRecord>,
    breather: LocalizingParams,
    apply_localizing: bool,
    preserve_base_selection: bool,
    #[serde(default)]
    circle_mask: Option<CircleMask>,
    #[serde(default)]
    view: ViewState,
}

/// Serialized form of a group.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct GroupRecord {
    name: String,
    color: Rgba,
    direction: [f64; 3],
    atoms: Vec<AtomId>,
    #[serde(default)]
    localizing: Option<LocalizingParams>,
}

/// Only the version is read first so that files from newer versions are reported properly.
#[derive(Debug, Deserialize)]
struct VersionProbe {
    format_version: u32,
}

/// ## Methods for reading and writing project files.
impl Project {
    /// Read a project from a project file.
    ///
    /// ## Returns
    /// - `Project` if successful.
    /// - `ProjectLoadError::FileNotFound` if the file does not exist.
    /// - `ProjectLoadError::Corrupted` if the file is not a valid project file.
    /// - `ProjectLoadError::UnsupportedVersion` if the file was written by a newer format.
    /// - `ProjectLoadError::Invalid` if the content of the file is inconsistent.
    ///
    /// ## Example
    /// ```no_run
    /// # use breather_rs::prelude::*;
    /// let project = match Project::read_bpj("graphene.bpj") {
    ///     Ok(x) => x,
    ///     Err(e) => {
    ///         eprintln!("{}", e);
    ///         return;
    ///     }
    /// };
    /// ```
    ///
    /// ## Notes
    /// - The undo log is not stored in project files and starts empty.
    /// - Group directions are normalized to unit length.
    pub fn read_bpj(filename: impl AsRef<Path>) -> Result<Project, ProjectLoadError> {
        let path = filename.as_ref();
        let file = File::open(path).map_err(|_| ProjectLoadError::FileNotFound(Box::from(path)))?;

        let value: serde_json::Value = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| ProjectLoadError::Corrupted(Box::from(path), e.to_string()))?;

        let probe = VersionProbe::deserialize(&value)
            .map_err(|e| ProjectLoadError::Corrupted(Box::from(path), e.to_string()))?;
        if probe.format_version != PROJECT_FORMAT_VERSION {
            return Err(ProjectLoadError::UnsupportedVersion(probe.format_version));
        }

        let data: ProjectFile = serde_json::from_value(value)
            .map_err(|e| ProjectLoadError::Corrupted(Box::from(path), e.to_string()))?;

        let project = data.into_project()?;

        log::info!(
            "Read project '{}' with {} atom(s) and {} group(s).",
            path.display(),
            project.get_atoms().get_n_atoms(),
            project.get_n_groups()
        );

        Ok(project)
    }

    /// Write the project into a project file.
    ///
    /// ## Returns
    /// `Ok` if successful, `ProjectSaveError` otherwise.
    ///
    /// ## Notes
    /// - The target file is only replaced if the whole project has been written successfully.
    /// - The undo log is not saved.
    pub fn write_bpj(&self, filename: impl AsRef<Path>) -> Result<(), ProjectSaveError> {
        let path = filename.as_ref();
        let data = ProjectFile::from_project(self);

        let mut writer =
            AtomicWriter::create(path).map_err(|_| ProjectSaveError::CouldNotCreate(Box::from(path)))?;

        serde_json::to_writer_pretty(&mut writer, &data)
            .map_err(|e| ProjectSaveError::SerializationFailed(e.to_string()))?;

        writeln!(writer).map_err(|_| ProjectSaveError::CouldNotWrite(Box::from(path)))?;

        writer
            .commit()
            .map_err(|_| ProjectSaveError::CouldNotWrite(Box::from(path)))?;

        log::info!("Saved project into '{}'.", path.display());
        Ok(())
    }
}

impl ProjectFile {
    fn from_project(project: &Project) -> Self {
        let groups = project
            .get_groups()
            .iter()
            .map(|(name, group)| GroupRecord {
                name: name.clone(),
                color: group.get_color(),
                direction: (*group.get_direction()).into(),
                atoms: group.get_atoms().iter().copied().collect(),
                localizing: group.get_localizing().cloned(),
            })
            .collect();

        ProjectFile {
            format_version: PROJECT_FORMAT_VERSION,
            simulation_box: project.get_atoms().get_box().clone(),
            atoms: project.get_atoms().all().to_vec(),
            groups,
            breather: project.get_breather().clone(),
            apply_localizing: project.get_apply_localizing(),
            preserve_base_selection: project.get_preserve_base_selection(),
            circle_mask: project.get_circle_mask().cloned(),
            view: project.get_view().clone(),
        }
    }

    /// Validate the content of the file and convert it into a project.
    fn into_project(self) -> Result<Project, ProjectLoadError> {
        let invalid = |message: String| ProjectLoadError::Invalid(message);

        if self.atoms.iter().any(|atom| !atom.get_position().is_finite()) {
            return Err(invalid("atom coordinates must be finite".to_owned()));
        }

        let atoms = AtomStore::new(self.atoms, self.simulation_box)
            .map_err(|e| invalid(e.to_string()))?;

        self.breather
            .validate()
            .map_err(|e| invalid(format!("breather: {}", e)))?;

        if let Some(mask) = &self.circle_mask {
            mask.validate()
                .map_err(|e| invalid(format!("circle mask: {}", e)))?;
        }

        let mut groups = IndexMap::with_capacity(self.groups.len());
        let mut owners: HashMap<AtomId, String> = HashMap::new();

        for record in self.groups {
            if !name_is_valid(&record.name) {
                return Err(invalid(format!("`{}` is not a valid group name", record.name)));
            }

            if groups.contains_key(&record.name) {
                return Err(invalid(format!("group `{}` is defined multiple times", record.name)));
            }

            let direction = stored_direction(record.direction)
                .map_err(|e| invalid(format!("group `{}`: {}", record.name, e)))?;

            if let Some(params) = &record.localizing {
                params
                    .validate()
                    .map_err(|e| invalid(format!("group `{}`: {}", record.name, e)))?;
            }

            let mut members = BTreeSet::new();
            for id in record.atoms {
                if !atoms.contains(id) {
                    return Err(invalid(format!(
                        "group `{}` contains unknown atom `{}`",
                        record.name, id
                    )));
                }

                if let Some(owner) = owners.insert(id, record.name.clone()) {
                    return Err(invalid(format!(
                        "atom `{}` belongs to both `{}` and `{}`",
                        id, owner, record.name
                    )));
                }

                members.insert(id);
            }

            let group = Group::from_parts(record.color, direction, members, record.localizing);
            groups.insert(record.name, group);
        }

        if let Some(active) = &self.view.active_group {
            if !groups.contains_key(active) {
                return Err(invalid(format!("active group `{}` does not exist", active)));
            }
        }

        Ok(Project::from_parts(
            atoms,
            groups,
            self.breather,
            self.apply_localizing,
            self.preserve_base_selection,
            self.circle_mask,
            self.view,
        ))
    }
}

/// Largest deviation from unit length of a stored direction that is kept as is.
const UNIT_TOLERANCE: f64 = 1e-12;

/// Convert a stored direction into a unit vector.
/// Directions that are already of unit length are kept bit for bit, so that saving and loading
/// a project does not change them.
fn stored_direction(direction: [f64; 3]) -> Result<Vector3D, GroupError> {
    let vector = Vector3D::from(direction);
    if vector.is_finite() && (vector.len() - 1.0).abs() <= UNIT_TOLERANCE {
        Ok(vector)
    } else {
        Direction::Vector(direction).to_unit()
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnLayout;
    use float_cmp::assert_approx_eq;
    use std::fs;
    use tempfile::NamedTempFile;

    fn write_json(content: &str) -> NamedTempFile {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), content).unwrap();
        file
    }

    /// Replace a part of the valid project file.
    fn modified(from: &str, to: &str) -> NamedTempFile {
        let content = fs::read_to_string("test_files/chain.bpj").unwrap();
        assert!(content.contains(from));
        write_json(&content.replacen(from, to, 1))
    }

    #[test]
    fn read_chain() {
        let project = Project::read_bpj("test_files/chain.bpj").unwrap();

        assert_eq!(project.get_atoms().get_n_atoms(), 3);
        assert_eq!(project.get_atoms().get_box().xhi, 2.5);

        let names: Vec<&str> = project.get_groups().keys().map(|x| x.as_str()).collect();
        assert_eq!(names, vec!["Left", "Right"]);

        let left = project.get_group("Left").unwrap();
        assert_eq!(left.get_color(), Rgba(230, 25, 75, 255));
        assert_eq!(left.get_atoms(), &BTreeSet::from([1, 2]));
        assert!(left.get_localizing().is_none());

        let right = project.get_group("Right").unwrap();
        assert_eq!(right.get_direction().y, 1.0);
        assert_eq!(right.get_localizing().unwrap().get_amplitude(), -0.5);

        assert_eq!(project.get_breather().get_center(), [1.0, 0.0]);
        assert!(project.get_apply_localizing());
        assert!(!project.get_preserve_base_selection());
        assert_eq!(project.get_circle_mask().unwrap().get_radius(), 1.5);
        assert_eq!(project.get_view().active_group.as_deref(), Some("Left"));
        assert!(!project.can_undo());
    }

    #[test]
    fn write_read_preserves() {
        let original = Project::read_bpj("test_files/chain.bpj").unwrap();
        let output = NamedTempFile::new().unwrap();
        original.write_bpj(output.path()).unwrap();

        let loaded = Project::read_bpj(output.path()).unwrap();
        assert_eq!(loaded.get_atoms(), original.get_atoms());
        assert_eq!(loaded.get_groups(), original.get_groups());
        assert_eq!(loaded.get_breather(), original.get_breather());
        assert_eq!(loaded.get_circle_mask(), original.get_circle_mask());
        assert_eq!(loaded.get_view(), original.get_view());
    }

    #[test]
    fn write_after_editing() {
        let mut project =
            Project::new(AtomStore::from_file("test_files/full.data", &ColumnLayout::Auto).unwrap());
        project
            .group_create("Tilted", None, Direction::Vector([1.0, 1.0, 0.0]))
            .unwrap();
        project.group_assign("Tilted", [3, 4]).unwrap();

        let output = NamedTempFile::new().unwrap();
        project.write_bpj(output.path()).unwrap();
        let loaded = Project::read_bpj(output.path()).unwrap();

        let group = loaded.get_group("Tilted").unwrap();
        assert_approx_eq!(f64, group.get_direction().x, 0.5f64.sqrt(), epsilon = 1e-12);
        assert_approx_eq!(f64, group.get_direction().y, 0.5f64.sqrt(), epsilon = 1e-12);
        assert_eq!(group.get_n_atoms(), 2);
        assert_eq!(loaded.get_atoms().get(3).unwrap().get_position().x, 1.42);
    }

    #[test]
    fn write_read_angle_directions() {
        let mut project =
            Project::new(AtomStore::from_file("test_files/grid.data", &ColumnLayout::Auto).unwrap());
        for deg in 0..360 {
            project
                .group_create(&format!("A{}", deg), None, Direction::Angle(deg as f64))
                .unwrap();
        }

        let output = NamedTempFile::new().unwrap();
        project.write_bpj(output.path()).unwrap();
        let loaded = Project::read_bpj(output.path()).unwrap();

        for (name, group) in project.get_groups() {
            assert_eq!(
                loaded.get_group(name).unwrap().get_direction(),
                group.get_direction()
            );
        }
    }

    #[test]
    fn read_normalizes_directions() {
        let file = modified("\"direction\": [\n        1.0,", "\"direction\": [\n        4.0,");
        let project = Project::read_bpj(file.path()).unwrap();
        assert_eq!(
            project.get_group("Left").unwrap().get_direction(),
            &Vector3D::new(1.0, 0.0, 0.0)
        );

        let file = modified("\"direction\": [\n        1.0,", "\"direction\": [\n        0.0,");
        assert!(matches!(
            Project::read_bpj(file.path()),
            Err(ProjectLoadError::Invalid(_))
        ));
    }

    #[test]
    fn read_nonexistent() {
        match Project::read_bpj("test_files/nonexistent.bpj") {
            Err(ProjectLoadError::FileNotFound(e)) => {
                assert_eq!(e, Box::from(Path::new("test_files/nonexistent.bpj")))
            }
            Ok(_) => panic!("Parsing should have failed, but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    #[test]
    fn read_corrupted() {
        match Project::read_bpj("test_files/chain.data") {
            Err(ProjectLoadError::Corrupted(path, _)) => {
                assert_eq!(path, Box::from(Path::new("test_files/chain.data")))
            }
            Ok(_) => panic!("Parsing should have failed, but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }

        let file = modified("\"apply_localizing\"", "\"apply_localising\"");
        assert!(matches!(
            Project::read_bpj(file.path()),
            Err(ProjectLoadError::Corrupted(_, _))
        ));
    }

    #[test]
    fn read_unsupported_version() {
        let file = modified("\"format_version\": 1", "\"format_version\": 7");
        assert_eq!(
            Project::read_bpj(file.path()).unwrap_err(),
            ProjectLoadError::UnsupportedVersion(7)
        );
    }

    #[test]
    fn read_duplicate_atom() {
        let file = modified("\"id\": 3", "\"id\": 2");
        assert!(matches!(
            Project::read_bpj(file.path()),
            Err(ProjectLoadError::Invalid(_))
        ));
    }

    #[test]
    fn read_double_claimed() {
        let file = modified("\"atoms\": [\n        3\n      ]", "\"atoms\": [\n        2\n      ]");
        match Project::read_bpj(file.path()) {
            Err(ProjectLoadError::Invalid(message)) => assert!(message.contains("both")),
            other => panic!("Unexpected result `{:?}`.", other.map(|_| ())),
        }
    }

    #[test]
    fn read_unknown_atom() {
        let file = modified("\"atoms\": [\n        3\n      ]", "\"atoms\": [\n        9\n      ]");
        match Project::read_bpj(file.path()) {
            Err(ProjectLoadError::Invalid(message)) => assert!(message.contains("unknown atom")),
            other => panic!("Unexpected result `{:?}`.", other.map(|_| ())),
        }
    }

    #[test]
    fn read_zero_direction() {
        let file = modified(
            "\"direction\": [\n        0.0,\n        1.0,",
            "\"direction\": [\n        0.0,\n        0.0,",
        );
        assert!(matches!(
            Project::read_bpj(file.path()),
            Err(ProjectLoadError::Invalid(_))
        ));
    }

    #[test]
    fn read_invalid_mask() {
        let file = modified("\"radius\": 1.5", "\"radius\": -1.5");
        assert!(matches!(
            Project::read_bpj(file.path()),
            Err(ProjectLoadError::Invalid(_))
        ));
    }

    #[test]
    fn read_duplicate_group() {
        let file = modified("\"name\": \"Right\"", "\"name\": \"Left\"");
        assert!(matches!(
            Project::read_bpj(file.path()),
            Err(ProjectLoadError::Invalid(_))
        ));
    }

    #[test]
    fn write_fails() {
        let project = Project::read_bpj("test_files/chain.bpj").unwrap();
        match project.write_bpj("Xhfguiedhqueiowhd/project.bpj") {
            Err(ProjectSaveError::CouldNotCreate(e)) => {
                assert_eq!(e, Box::from(Path::new("Xhfguiedhqueiowhd/project.bpj")))
            }
            Ok(_) => panic!("Writing should have failed, but it did not."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }
}
