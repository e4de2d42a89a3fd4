// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Error types returned by the `breather_rs` library.

use std::path::Path;
use thiserror::Error;

use crate::structures::atom::AtomId;

/// Errors that can occur when reading and parsing a LAMMPS data file.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseDataError {
    #[error("file `{}` was not found", .0.display())]
    FileNotFound(Box<Path>),
    #[error("file `{}` could not be read", .0.display())]
    LineNotFound(Box<Path>),
    #[error("file `{}` does not define x and y box bounds", .0.display())]
    MissingBox(Box<Path>),
    #[error("file `{}` does not contain an `Atoms` section", .0.display())]
    MissingAtomsSection(Box<Path>),
    #[error("could not parse line `{0}` as an atom record")]
    ParseAtomLineErr(String),
    #[error("atom id `{0}` is defined multiple times")]
    DuplicateAtomId(u64),
    #[error("the `Atoms` section of file `{}` contains no atoms", .0.display())]
    NoAtoms(Box<Path>),
    #[error("box bounds `{0}` `{1}` are invalid")]
    InvalidBox(String, String),
}

/// Errors that can occur when constructing selection or localizing parameters.
#[derive(Error, Debug, PartialEq)]
pub enum InvalidParameterError {
    #[error("bounds `{0}` to `{1}` are empty (minimum is larger than maximum)")]
    EmptyBounds(f64, f64),
    #[error("parameter `{0}` must be a finite number")]
    NotFinite(&'static str),
    #[error("spacing of a line selection must be at least 1")]
    ZeroSpacing,
    #[error("tolerance `{0}` must not be negative")]
    NegativeTolerance(f64),
    #[error("radius `{0}` must not be negative")]
    NegativeRadius(f64),
    #[error("factor `{0}` must lie between 0 and 1")]
    InvalidFactor(f64),
}

/// Errors that can occur when working with groups of atoms.
#[derive(Error, Debug, PartialEq)]
pub enum GroupError {
    #[error("group `{0}` does not exist")]
    NotFound(String),
    #[error("group `{0}` already exists")]
    AlreadyExists(String),
    #[error("`{0}` is not a valid group name")]
    InvalidName(String),
    #[error("direction must be a non-zero finite vector or a finite angle")]
    InvalidDirection,
    #[error("atom id `{0}` does not exist in the atom store")]
    UnknownAtom(u64),
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] InvalidParameterError),
}

/// Errors that can occur when exporting the LAMMPS displacement block.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExportError {
    #[error("no atoms are assigned to any group; there is nothing to export")]
    NothingToExport,
    #[error("all displacements are zero at the chosen precision; there is nothing to export")]
    AllZero,
    #[error("precision `{0}` is not supported (maximum is 12 decimal places)")]
    InvalidPrecision(u32),
    #[error("`{0}` is not a valid LAMMPS group id")]
    InvalidTmpGroup(String),
    #[error("displacement of atom `{0}` is too large to be written with the chosen precision")]
    DisplacementTooLarge(AtomId),
    #[error("file `{}` could not be created", .0.display())]
    CouldNotCreate(Box<Path>),
    #[error("could not write into file `{}`", .0.display())]
    CouldNotWrite(Box<Path>),
}

/// Errors that can occur when writing a list of atom ids.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum WriteIdsError {
    #[error("group `{0}` does not exist")]
    GroupNotFound(String),
    #[error("no atoms are selected; there is nothing to export")]
    Empty,
    #[error("file `{}` could not be created", .0.display())]
    CouldNotCreate(Box<Path>),
    #[error("could not write into file `{}`", .0.display())]
    CouldNotWrite(Box<Path>),
}

/// Errors that can occur when reading a project file.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProjectLoadError {
    #[error("file `{}` was not found", .0.display())]
    FileNotFound(Box<Path>),
    #[error("project file `{}` is corrupted: {}", .0.display(), .1)]
    Corrupted(Box<Path>, String),
    #[error("project format version `{0}` is not supported")]
    UnsupportedVersion(u32),
    #[error("project is inconsistent: {0}")]
    Invalid(String),
}

/// Errors that can occur when writing a project file.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProjectSaveError {
    #[error("file `{}` could not be created", .0.display())]
    CouldNotCreate(Box<Path>),
    #[error("could not write into file `{}`", .0.display())]
    CouldNotWrite(Box<Path>),
    #[error("project could not be serialized: {0}")]
    SerializationFailed(String),
}

/// Errors that can occur when reading a settings file.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("file `{}` was not found", .0.display())]
    FileNotFound(Box<Path>),
    #[error("could not parse settings file `{}`: {}", .0.display(), .1)]
    ParseErr(Box<Path>, String),
}

/******************************/
/*         UNIT TESTS         */
/******************************/
