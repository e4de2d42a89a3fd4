// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! State of a viewer displaying the project. Stored in project files but never used by the pipeline.

use serde::{Deserialize, Serialize};

/// Settings of a viewer of the atoms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewState {
    /// Visible range of x-coordinates. `None` shows the whole box.
    pub x_range: Option<[f64; 2]>,
    /// Visible range of y-coordinates. `None` shows the whole box.
    pub y_range: Option<[f64; 2]>,
    /// Radius of the rendered atoms. Zero means estimated from the atom spacing.
    pub atom_radius: f64,
    /// Scaling of the rendered atoms in percent.
    pub point_scale: u32,
    /// Render atoms as shaded spheres.
    pub shading: bool,
    /// Group receiving interactive selections.
    pub active_group: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            x_range: None,
            y_range: None,
            atom_radius: 0.0,
            point_scale: 100,
            shading: true,
            active_group: None,
        }
    }
}
