// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Selection recipes: sequences of edits applied to a project, read from YAML files.

use std::fs;
use std::path::Path;

use breather_rs::errors::{GroupError, InvalidParameterError};
use breather_rs::prelude::*;
use serde::Deserialize;
use thiserror::Error;

/// Sequence of edits applied to a project.
///
/// ```yaml
/// breather: {amplitude: 0.1, beta: 0.5}
/// steps:
///   - create: {name: Row, direction: {angle: 90}}
///   - line: {group: Row, axis: horizontal, at: 0.0, every: 2}
///   - undo
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recipe {
    /// Default parameters of the localizing function.
    #[serde(default)]
    pub breather: Option<BreatherStep>,
    #[serde(default)]
    pub apply_localizing: Option<bool>,
    #[serde(default)]
    pub preserve_base_selection: Option<bool>,
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<Step>,
}

/// Parameters of the localizing function.
/// Missing center means the center of the box (project defaults) or the centroid of the group.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BreatherStep {
    pub amplitude: f64,
    pub beta: f64,
    #[serde(default)]
    pub center: Option<[f64; 2]>,
}

/// Single edit of a recipe.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Create {
        name: String,
        #[serde(default)]
        color: Option<[u8; 4]>,
        #[serde(default)]
        direction: Direction,
    },
    Delete {
        name: String,
    },
    Rectangle {
        group: String,
        x: [f64; 2],
        y: [f64; 2],
        #[serde(default)]
        mode: Option<AssignMode>,
    },
    Line {
        group: String,
        axis: LineAxis,
        at: f64,
        #[serde(default)]
        tolerance: Option<f64>,
        #[serde(default = "one")]
        every: usize,
        #[serde(default)]
        offset: usize,
        #[serde(default)]
        mode: Option<AssignMode>,
    },
    Rule {
        group: String,
        axis: LineAxis,
        at: f64,
        #[serde(default)]
        tolerance: Option<f64>,
        #[serde(default = "one")]
        every: usize,
        #[serde(default)]
        offset: usize,
        #[serde(default = "one")]
        across_every: usize,
        #[serde(default)]
        across_offset: usize,
        #[serde(default)]
        mode: Option<AssignMode>,
    },
    Pick {
        group: String,
        x: f64,
        y: f64,
        /// Maximal distance of the picked atom. Defaults to the atom spacing.
        #[serde(default)]
        max_distance: Option<f64>,
    },
    Atoms {
        group: String,
        ids: Vec<AtomId>,
        #[serde(default)]
        mode: Option<AssignMode>,
    },
    Direction {
        group: String,
        direction: Direction,
    },
    Color {
        group: String,
        color: [u8; 4],
    },
    Localizing {
        group: String,
        amplitude: f64,
        beta: f64,
        /// Defaults to the centroid of the atoms of the group.
        #[serde(default)]
        center: Option<[f64; 2]>,
    },
    ClearLocalizing {
        group: String,
    },
    Mask {
        center: [f64; 2],
        radius: f64,
        #[serde(default)]
        dim_factor: Option<f64>,
        #[serde(default = "enabled")]
        enabled: bool,
    },
    ClearMask,
    Undo,
    Redo,
}

fn one() -> usize {
    1
}

fn enabled() -> bool {
    true
}

/// Errors that can occur when reading or applying a recipe.
#[derive(Error, Debug, PartialEq)]
pub enum RecipeError {
    #[error("file `{}` was not found", .0.display())]
    FileNotFound(Box<Path>),
    #[error("could not parse recipe `{}`: {}", .0.display(), .1)]
    ParseErr(Box<Path>, String),
    #[error("step {0}: {1}")]
    Group(usize, GroupError),
    #[error("step {0}: {1}")]
    Parameter(usize, InvalidParameterError),
    #[error("step {0}: no atom found near ({1}, {2})")]
    NothingPicked(usize, f64, f64),
    #[error("step {0}: group `{1}` contains no atoms to center the localizing function on")]
    EmptyGroup(usize, String),
}

impl Recipe {
    /// Read a recipe from a YAML file.
    pub fn from_file(filename: impl AsRef<Path>) -> Result<Self, RecipeError> {
        let path = filename.as_ref();
        let content =
            fs::read_to_string(path).map_err(|_| RecipeError::FileNotFound(Box::from(path)))?;

        serde_yaml::from_str(&content).map_err(|e| RecipeError::ParseErr(Box::from(path), e.to_string()))
    }

    /// Apply all steps of the recipe to the project in order.
    /// Steps are numbered from 1 in the reported errors.
    pub fn apply(&self, project: &mut Project) -> Result<(), RecipeError> {
        if let Some(breather) = &self.breather {
            let center = breather
                .center
                .unwrap_or_else(|| project.get_atoms().get_box().center_xy());
            let params = LocalizingParams::new(breather.amplitude, breather.beta, center)
                .map_err(|e| RecipeError::Parameter(0, e))?;
            project.set_breather(params);
        }

        if let Some(apply) = self.apply_localizing {
            project.set_apply_localizing(apply);
        }

        if let Some(preserve) = self.preserve_base_selection {
            project.set_preserve_base_selection(preserve);
        }

        for (index, step) in self.steps.iter().enumerate() {
            step.apply(project, index + 1)?;
        }

        log::info!("Applied {} recipe step(s).", self.steps.len());
        Ok(())
    }
}

impl Step {
    fn apply(&self, project: &mut Project, number: usize) -> Result<(), RecipeError> {
        let group_err = |e: GroupError| RecipeError::Group(number, e);
        let param_err = |e: InvalidParameterError| RecipeError::Parameter(number, e);

        match self {
            Step::Create {
                name,
                color,
                direction,
            } => project
                .group_create(name, color.map(Rgba::from), *direction)
                .map_err(group_err)?,

            Step::Delete { name } => project.group_delete(name).map_err(group_err)?,

            Step::Rectangle { group, x, y, mode } => {
                let rectangle = Rectangle::new(x[0], x[1], y[0], y[1]).map_err(param_err)?;
                let selected = project.select_rectangle(&rectangle);
                log::debug!("Rectangle selected {} atom(s).", selected.len());
                select(project, group, selected, *mode).map_err(group_err)?;
            }

            Step::Line {
                group,
                axis,
                at,
                tolerance,
                every,
                offset,
                mode,
            } => {
                let line =
                    LineSelection::new(*axis, *at, *tolerance, *every, *offset).map_err(param_err)?;
                let selected = project.select_line(&line).map_err(param_err)?;
                log::debug!("Line selected {} atom(s).", selected.len());
                select(project, group, selected, *mode).map_err(group_err)?;
            }

            Step::Rule {
                group,
                axis,
                at,
                tolerance,
                every,
                offset,
                across_every,
                across_offset,
                mode,
            } => {
                let line =
                    LineSelection::new(*axis, *at, *tolerance, *every, *offset).map_err(param_err)?;
                let rule = RuleSelection::new(line, *across_every, *across_offset).map_err(param_err)?;
                let selected = project.select_rule(&rule).map_err(param_err)?;
                log::debug!("Rule selected {} atom(s).", selected.len());
                select(project, group, selected, *mode).map_err(group_err)?;
            }

            Step::Pick {
                group,
                x,
                y,
                max_distance,
            } => {
                let max_distance = max_distance.unwrap_or_else(|| {
                    match project.get_atoms().estimate_spacing() {
                        spacing if spacing > 0.0 => spacing,
                        _ => f64::INFINITY,
                    }
                });

                let id = project
                    .pick(*x, *y, max_distance)
                    .ok_or(RecipeError::NothingPicked(number, *x, *y))?;
                project.apply_pick(group, id).map_err(group_err)?;
            }

            Step::Atoms { group, ids, mode } => {
                select(project, group, ids.iter().copied(), *mode).map_err(group_err)?
            }

            Step::Direction { group, direction } => project
                .group_set_direction(group, *direction)
                .map_err(group_err)?,

            Step::Color { group, color } => project
                .group_set_color(group, Rgba::from(*color))
                .map_err(group_err)?,

            Step::Localizing {
                group,
                amplitude,
                beta,
                center,
            } => {
                let center = match center {
                    Some(center) => *center,
                    None => {
                        let ids: Vec<AtomId> = project
                            .get_group(group)
                            .map_err(group_err)?
                            .get_atoms()
                            .iter()
                            .copied()
                            .collect();
                        project
                            .get_atoms()
                            .centroid_xy(&ids)
                            .ok_or_else(|| RecipeError::EmptyGroup(number, group.clone()))?
                    }
                };

                let params = LocalizingParams::new(*amplitude, *beta, center).map_err(param_err)?;
                project
                    .group_set_localizing(group, params)
                    .map_err(group_err)?;
            }

            Step::ClearLocalizing { group } => {
                project.group_clear_localizing(group).map_err(group_err)?
            }

            Step::Mask {
                center,
                radius,
                dim_factor,
                enabled,
            } => {
                let mut mask = CircleMask::new(*center, *radius).map_err(param_err)?;
                if let Some(factor) = dim_factor {
                    mask = mask.with_dim_factor(*factor).map_err(param_err)?;
                }
                mask.set_enabled(*enabled);
                project.set_circle_mask(Some(mask));
            }

            Step::ClearMask => project.set_circle_mask(None),

            Step::Undo => {
                if !project.undo() {
                    log::warn!("Step {}: there is nothing to undo.", number);
                }
            }

            Step::Redo => {
                if !project.redo() {
                    log::warn!("Step {}: there is nothing to redo.", number);
                }
            }
        }

        Ok(())
    }
}

/// Combine selected atoms with the group using the explicit mode or the mode of the project.
fn select(
    project: &mut Project,
    group: &str,
    ids: impl IntoIterator<Item = AtomId>,
    mode: Option<AssignMode>,
) -> Result<(), GroupError> {
    let mode = mode.unwrap_or_else(|| project.selection_mode());
    project.apply_selection(group, ids, mode)
}

/******************************/
/*         UNIT TESTS         */
/******************************/
