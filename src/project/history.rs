// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of the undo/redo log of group edits.

use indexmap::IndexMap;

use crate::config::DEFAULT_MAX_HISTORY;
use crate::project::general::Project;
use crate::structures::{
    atom::AtomId, color::Rgba, group::Group, localizing::LocalizingParams, vector3d::Vector3D,
};

/// Reversible edit of the groups of a project.
/// Every record stores everything needed to both apply and revert it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Action {
    Create {
        name: String,
        index: usize,
        group: Group,
    },
    Delete {
        name: String,
        index: usize,
        group: Group,
    },
    Reassign(Vec<Membership>),
    SetDirection {
        name: String,
        before: Vector3D,
        after: Vector3D,
    },
    SetColor {
        name: String,
        before: Rgba,
        after: Rgba,
    },
    SetLocalizing {
        name: String,
        before: Option<LocalizingParams>,
        after: Option<LocalizingParams>,
    },
}

/// Change of the group an atom belongs to. `None` means unassigned.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Membership {
    pub(crate) id: AtomId,
    pub(crate) before: Option<String>,
    pub(crate) after: Option<String>,
}

/// Append-only log of actions with a cursor.
/// Actions before the cursor can be undone, actions after the cursor can be redone.
#[derive(Debug, Clone)]
pub(crate) struct History {
    actions: Vec<Action>,
    cursor: usize,
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        History {
            actions: Vec::new(),
            cursor: 0,
            max_entries: DEFAULT_MAX_HISTORY,
        }
    }
}

impl Action {
    /// Perform the action on the groups.
    pub(crate) fn apply(&self, groups: &mut IndexMap<String, Group>) {
        match self {
            Action::Create { name, index, group } => insert_at(groups, *index, name, group),
            Action::Delete { name, .. } => {
                groups.shift_remove(name);
            }
            Action::Reassign(changes) => {
                for change in changes {
                    move_atom(groups, change.id, change.before.as_deref(), change.after.as_deref());
                }
            }
            Action::SetDirection { name, after, .. } => {
                if let Some(group) = groups.get_mut(name) {
                    group.set_direction(*after);
                }
            }
            Action::SetColor { name, after, .. } => {
                if let Some(group) = groups.get_mut(name) {
                    group.set_color(*after);
                }
            }
            Action::SetLocalizing { name, after, .. } => {
                if let Some(group) = groups.get_mut(name) {
                    group.set_localizing(after.clone());
                }
            }
        }
    }

    /// Revert the action previously applied to the groups.
    pub(crate) fn revert(&self, groups: &mut IndexMap<String, Group>) {
        match self {
            Action::Create { name, .. } => {
                groups.shift_remove(name);
            }
            Action::Delete { name, index, group } => insert_at(groups, *index, name, group),
            Action::Reassign(changes) => {
                for change in changes.iter().rev() {
                    move_atom(groups, change.id, change.after.as_deref(), change.before.as_deref());
                }
            }
            Action::SetDirection { name, before, .. } => {
                if let Some(group) = groups.get_mut(name) {
                    group.set_direction(*before);
                }
            }
            Action::SetColor { name, before, .. } => {
                if let Some(group) = groups.get_mut(name) {
                    group.set_color(*before);
                }
            }
            Action::SetLocalizing { name, before, .. } => {
                if let Some(group) = groups.get_mut(name) {
                    group.set_localizing(before.clone());
                }
            }
        }
    }

    /// Short human-readable description of the action.
    pub(crate) fn describe(&self) -> String {
        match self {
            Action::Create { name, .. } => format!("create group '{}'", name),
            Action::Delete { name, .. } => format!("delete group '{}'", name),
            Action::Reassign(changes) => format!("reassign {} atom(s)", changes.len()),
            Action::SetDirection { name, .. } => format!("set direction of group '{}'", name),
            Action::SetColor { name, .. } => format!("set color of group '{}'", name),
            Action::SetLocalizing { name, .. } => {
                format!("set localizing function of group '{}'", name)
            }
        }
    }
}

/// Insert group at the given position of the map.
fn insert_at(groups: &mut IndexMap<String, Group>, index: usize, name: &str, group: &Group) {
    let index = index.min(groups.len());
    groups.shift_insert(index, name.to_owned(), group.clone());
}

/// Move atom from one group to another.
fn move_atom(
    groups: &mut IndexMap<String, Group>,
    id: AtomId,
    from: Option<&str>,
    to: Option<&str>,
) {
    if let Some(group) = from.and_then(|name| groups.get_mut(name)) {
        group.remove(id);
    }

    if let Some(group) = to.and_then(|name| groups.get_mut(name)) {
        group.insert(id);
    }
}

impl History {
    /// Add a new action to the log. All actions that could be redone are dropped.
    /// If the log is full, the oldest actions are dropped.
    pub(crate) fn record(&mut self, action: Action) {
        self.actions.truncate(self.cursor);
        self.actions.push(action);
        self.trim();
        self.cursor = self.actions.len();
    }

    /// Move the cursor back and return the action to revert.
    pub(crate) fn step_back(&mut self) -> Option<&Action> {
        if self.cursor == 0 {
            return None;
        }

        self.cursor -= 1;
        self.actions.get(self.cursor)
    }

    /// Move the cursor forward and return the action to reapply.
    pub(crate) fn step_forward(&mut self) -> Option<&Action> {
        let action = self.actions.get(self.cursor)?;
        self.cursor += 1;
        Some(action)
    }

    pub(crate) fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub(crate) fn can_redo(&self) -> bool {
        self.cursor < self.actions.len()
    }

    pub(crate) fn clear(&mut self) {
        self.actions.clear();
        self.cursor = 0;
    }

    #[cfg(test)]
    pub(crate) fn get_max_entries(&self) -> usize {
        self.max_entries
    }

    pub(crate) fn set_max_entries(&mut self, max_entries: usize) {
        self.max_entries = max_entries;
        self.trim();
        self.cursor = self.cursor.min(self.actions.len());
    }

    /// Drop the oldest actions exceeding the capacity of the log.
    fn trim(&mut self) {
        if self.actions.len() > self.max_entries {
            let excess = self.actions.len() - self.max_entries;
            self.actions.drain(..excess);
            self.cursor = self.cursor.saturating_sub(excess);
        }
    }
}

/// ## Methods for undoing and redoing edits of groups.
impl Project {
    /// Apply an action to the groups and record it in the undo log.
    pub(crate) fn commit(&mut self, action: Action) {
        log::debug!("{}.", capitalize(&action.describe()));

        let (groups, history) = self.groups_and_history();
        action.apply(groups);
        history.record(action);
    }

    /// Revert the last edit of the groups.
    ///
    /// ## Returns
    /// `true` if an edit was reverted, `false` if there was nothing to undo.
    ///
    /// ## Example
    /// ```
    /// # use breather_rs::prelude::*;
    /// let atoms = vec![Atom::new(1, [0.0, 0.0, 0.0].into())];
    /// let store = AtomStore::new(atoms, SimBox::from([0.0, 1.0, 0.0, 1.0, 0.0, 0.0])).unwrap();
    /// let mut project = Project::new(store);
    ///
    /// project.group_create("Edge", None, Direction::Angle(90.0)).unwrap();
    /// assert!(project.group_exists("Edge"));
    ///
    /// assert!(project.undo());
    /// assert!(!project.group_exists("Edge"));
    ///
    /// assert!(project.redo());
    /// assert!(project.group_exists("Edge"));
    /// ```
    pub fn undo(&mut self) -> bool {
        let (groups, history) = self.groups_and_history();
        match history.step_back() {
            Some(action) => {
                action.revert(groups);
                log::debug!("Undo: {}.", action.describe());
                true
            }
            None => false,
        }
    }

    /// Reapply the last reverted edit of the groups.
    ///
    /// ## Returns
    /// `true` if an edit was reapplied, `false` if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let (groups, history) = self.groups_and_history();
        match history.step_forward() {
            Some(action) => {
                action.apply(groups);
                log::debug!("Redo: {}.", action.describe());
                true
            }
            None => false,
        }
    }

    /// Check whether there is an edit to undo.
    pub fn can_undo(&self) -> bool {
        self.history().can_undo()
    }

    /// Check whether there is an edit to redo.
    pub fn can_redo(&self) -> bool {
        self.history().can_redo()
    }

    /// Forget all recorded edits.
    pub fn clear_history(&mut self) {
        self.groups_and_history().1.clear();
    }

    /// Set the maximal number of edits that can be undone.
    pub fn set_max_history(&mut self, max_entries: usize) {
        self.groups_and_history().1.set_max_entries(max_entries);
    }
}

fn capitalize(string: &str) -> String {
    let mut chars = string.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
