// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! # breather_rs: Discrete Breather Initialization for LAMMPS
//!
//! Rust library for preparing initial conditions of discrete breathers
//! (spatially localized vibrations) in two-dimensional atomic lattices simulated with LAMMPS.
//!
//! ## Usage
//!
//! Run
//!
//! ```bash
//! $ cargo add breather_rs
//! ```
//!
//! Import the crate in your Rust code:
//! ```
//! use breather_rs::prelude::*;
//! ```
//!
//! ## Examples
//!
//! #### Displacing a line of atoms
//!
//! Read a LAMMPS data file, select every second atom of a row, and write the
//! `displace_atoms` commands displacing them along the y-axis.
//!
//! ```no_run
//! use breather_rs::prelude::*;
//! use std::error::Error;
//!
//! fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
//!     // read a LAMMPS data file
//!     let mut project = Project::from_file("graphene.data", &ColumnLayout::Auto)?;
//!
//!     // create a group of atoms displaced along the y-axis
//!     project.group_create("Row", None, Direction::Angle(90.0))?;
//!
//!     // select every second atom lying on the line y = 12.3
//!     let line = LineSelection::new(LineAxis::Horizontal, 12.3, None, 2, 0)?;
//!     let selected = project.select_line(&line)?;
//!     project.group_assign("Row", selected)?;
//!
//!     // displacements decay as A / cosh(beta * R) from the center of the breather
//!     project.set_breather(LocalizingParams::new(0.1, 0.5, [20.0, 12.3])?);
//!
//!     // write the LAMMPS commands
//!     project.export_lammps("displace.in", &ExportSettings::default())?;
//!
//!     Ok(())
//! }
//! ```
//!
//! #### Saving and restoring work
//!
//! Projects (atoms, groups, and all parameters) can be saved and loaded again later.
//! Every edit of the groups can be undone.
//!
//! ```no_run
//! use breather_rs::prelude::*;
//! use std::error::Error;
//!
//! fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
//!     let mut project = Project::from_file("graphene.data", &ColumnLayout::Auto)?;
//!
//!     project.group_create("Center", Some(Rgba(255, 0, 0, 255)), Direction::default())?;
//!     let rectangle = Rectangle::new(10.0, 14.0, 10.0, 14.0)?;
//!     let selected = project.select_rectangle(&rectangle);
//!     project.group_assign("Center", selected)?;
//!
//!     // oops
//!     project.group_delete("Center")?;
//!     project.undo();
//!     assert!(project.group_exists("Center"));
//!
//!     project.write_bpj("graphene.bpj")?;
//!     let restored = Project::read_bpj("graphene.bpj")?;
//!     assert_eq!(restored.get_n_groups(), 1);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Groups
//! Each atom belongs to at most one group. Assigning an atom to a group removes it
//! from the group it belonged to before. Groups are kept in the order of their creation.
//!
//! ## Error handling
//! Errors are not exported into the `prelude` module.
//! If you want to work with a specific error type, include it explicitly from the `errors` module:
//! ```
//! use breather_rs::errors::ExportError;
//! ```
//!
//! ## Limitations
//! Only orthogonal simulation boxes are supported. Selections and the localizing function
//! ignore the z-coordinate of the atoms.
//!
//! ## License
//! This library is released under the MIT License.

/// Current version of the `breather_rs` library.
pub const BREATHER_VERSION: &str = env!("CARGO_PKG_VERSION");

mod auxiliary;
pub mod config;
pub mod errors;
pub mod files;
pub mod io {
    pub mod ids_io;
    pub mod lammps_data;
    pub mod lammps_export;
    pub mod project_io;
}
pub mod project {
    mod displacement;
    pub mod general;
    mod groups;
    mod history;
    mod selection;
}
pub mod store {
    pub mod general;
    mod selection;
}
pub mod structures {
    pub mod atom;
    pub mod color;
    pub mod group;
    pub mod line;
    pub mod localizing;
    pub mod mask;
    pub mod shape;
    pub mod simbox;
    pub mod vector3d;
    pub mod view;
}

/// Reexported basic `breather_rs` structures and traits.
pub mod prelude {
    pub use crate::config::{AtomStyle, ColumnIndices, ColumnLayout, ExportSettings, Settings, Units};
    pub use crate::io::ids_io::IdScope;
    pub use crate::io::lammps_export::{DisplacementBucket, ExportSummary};
    pub use crate::project::general::Project;
    pub use crate::store::general::AtomStore;
    pub use crate::structures::atom::{Atom, AtomId};
    pub use crate::structures::color::Rgba;
    pub use crate::structures::group::{AssignMode, Direction, Group};
    pub use crate::structures::line::{LineSelection, RuleSelection};
    pub use crate::structures::localizing::{LocalizingParams, Profile};
    pub use crate::structures::mask::{CircleMask, MaskSplit};
    pub use crate::structures::shape::{LineAxis, Rectangle, Shape, Strip};
    pub use crate::structures::simbox::SimBox;
    pub use crate::structures::vector3d::Vector3D;
    pub use crate::structures::view::ViewState;
}
