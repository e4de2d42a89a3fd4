// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Settings of the `breather_rs` library loaded from YAML files.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Default number of decimal places used when quantizing displacements.
pub const DEFAULT_PRECISION: u32 = 6;
/// Default name of the temporary LAMMPS group used by the exported block.
pub const DEFAULT_TMP_GROUP: &str = "dbi_tmp";
/// Default maximal number of actions stored in the undo log.
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// All settings of the library. Every field has a default value.
///
/// ## Example
/// ```
/// # use breather_rs::prelude::*;
/// let settings: Settings = serde_yaml::from_str("export:\n  precision: 4\n").unwrap();
/// assert_eq!(settings.export.precision, 4);
/// assert_eq!(settings.export.tmp_group, "dbi_tmp");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Columns of the `Atoms` section holding the id and the coordinates.
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub columns: ColumnLayout,
    pub selection: SelectionSettings,
    pub history: HistorySettings,
    pub export: ExportSettings,
}

/// How to locate the id and the coordinates in the records of the `Atoms` section.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnLayout {
    /// Use the style hint of the section, if present and known.
    /// Otherwise, id is the first column and coordinates are the last three columns.
    #[default]
    Auto,
    /// Fixed layout of a LAMMPS atom style.
    Style(AtomStyle),
    /// Explicit zero-based column indices.
    Columns(ColumnIndices),
}

/// Supported LAMMPS atom styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AtomStyle {
    Atomic,
    Charge,
    Molecular,
    Bond,
    Angle,
    Full,
}

/// Zero-based indices of columns in an atom record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnIndices {
    pub id: usize,
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

/// Settings of the selection engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionSettings {
    /// Tolerance of line selections. `None` means estimated from the atom spacing.
    pub tolerance: Option<f64>,
}

/// Settings of the undo log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistorySettings {
    pub max_entries: usize,
}

/// Units of the `displace_atoms` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Box,
    Lattice,
}

/// Settings of the LAMMPS exporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSettings {
    /// Number of decimal places of the quantized displacements.
    pub precision: u32,
    /// Name of the temporary LAMMPS group.
    pub tmp_group: String,
    pub units: Units,
    /// Write commands even for atoms with zero displacement.
    pub emit_zero: bool,
    /// Displace also atoms lying outside of an enabled circle mask.
    pub include_masked: bool,
    /// Maximal number of ids per line of the `group` command (0 = no wrapping).
    pub ids_per_line: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        HistorySettings {
            max_entries: DEFAULT_MAX_HISTORY,
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            precision: DEFAULT_PRECISION,
            tmp_group: DEFAULT_TMP_GROUP.to_owned(),
            units: Units::default(),
            emit_zero: false,
            include_masked: false,
            ids_per_line: 0,
        }
    }
}

impl Settings {
    /// Read settings from a YAML file.
    ///
    /// ## Returns
    /// - `ConfigError::FileNotFound` if the file does not exist or could not be read.
    /// - `ConfigError::ParseErr` if the file is not a valid settings file.
    pub fn from_file(filename: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(filename.as_ref())
            .map_err(|_| ConfigError::FileNotFound(Box::from(filename.as_ref())))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseErr(Box::from(filename.as_ref()), e.to_string()))?;

        log::debug!("Loaded settings from '{}'.", filename.as_ref().display());
        Ok(settings)
    }
}

impl AtomStyle {
    /// Identify the atom style from the comment following the `Atoms` keyword.
    pub fn from_hint(hint: &str) -> Option<AtomStyle> {
        match hint.trim().to_lowercase().as_str() {
            "atomic" => Some(AtomStyle::Atomic),
            "charge" => Some(AtomStyle::Charge),
            "molecular" => Some(AtomStyle::Molecular),
            "bond" => Some(AtomStyle::Bond),
            "angle" => Some(AtomStyle::Angle),
            "full" => Some(AtomStyle::Full),
            _ => None,
        }
    }

    /// Columns of the id and coordinates for this atom style.
    pub fn columns(&self) -> ColumnIndices {
        let first_coordinate = match self {
            AtomStyle::Atomic => 2,
            AtomStyle::Charge | AtomStyle::Molecular | AtomStyle::Bond | AtomStyle::Angle => 3,
            AtomStyle::Full => 4,
        };

        ColumnIndices {
            id: 0,
            x: first_coordinate,
            y: first_coordinate + 1,
            z: first_coordinate + 2,
        }
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
