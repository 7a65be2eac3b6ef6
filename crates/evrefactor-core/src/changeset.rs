//! Variable edits applied uniformly to several containers.
//!
//! When the variables of an object group are edited, the editor records what
//! changed as a [`VariablesChangeset`] and replays it on every member so the
//! members stay consistent with the group.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::project::VariablesContainer;

/// Names of variables added, removed, renamed or changed in value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariablesChangeset {
    #[serde(default)]
    pub added: BTreeSet<String>,
    #[serde(default)]
    pub removed: BTreeSet<String>,
    /// Renames, keyed by the old name.
    #[serde(default)]
    pub old_to_new: BTreeMap<String, String>,
    #[serde(default)]
    pub value_changed: BTreeSet<String>,
}

impl VariablesChangeset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_added(mut self, name: impl Into<String>) -> Self {
        self.added.insert(name.into());
        self
    }

    pub fn with_removed(mut self, name: impl Into<String>) -> Self {
        self.removed.insert(name.into());
        self
    }

    pub fn with_renamed(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.old_to_new.insert(old.into(), new.into());
        self
    }

    pub fn with_value_changed(mut self, name: impl Into<String>) -> Self {
        self.value_changed.insert(name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.old_to_new.is_empty()
            && self.value_changed.is_empty()
    }

    /// Replay the changeset on `target`.
    ///
    /// Removals run first, then renames, then added and value-changed
    /// variables are copied from `source` (the container the edit was made
    /// in). A name missing from `source` is skipped. Returns whether `target`
    /// changed.
    pub fn apply_to(&self, target: &mut VariablesContainer, source: &VariablesContainer) -> bool {
        let mut changed = false;

        for name in &self.removed {
            if target.remove(name).is_some() {
                trace!(variable = %name, "removed variable");
                changed = true;
            }
        }

        for (old, new) in &self.old_to_new {
            if target.rename(old, new) {
                trace!(from = %old, to = %new, "renamed variable");
                changed = true;
            }
        }

        for name in self.added.iter().chain(&self.value_changed) {
            if let Some(value) = source.get(name) {
                target.insert(name.clone(), value.clone());
                trace!(variable = %name, "copied variable");
                changed = true;
            }
        }

        changed
    }
}
