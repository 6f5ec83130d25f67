// SPDX-FileCopyrightText: 2026 Emporium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Consistency checks between the plugin list and the metadata overlay.

use std::collections::HashSet;

use thiserror::Error;

use crate::source::Dataset;

/// A consistency problem found in a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetIssue {
    /// The plugin list names the same plugin more than once.
    #[error("plugin `{name}` is listed more than once")]
    DuplicatePlugin { name: String },
    /// The overlay has an entry for a plugin that is not in the plugin list.
    #[error("overlay entry `{name}` matches no plugin")]
    OrphanOverlay { name: String },
    /// Category metadata exists for a category no plugin uses.
    #[error("category metadata `{name}` is not used by any plugin")]
    UnusedCategory { name: String },
    /// A plugin uses a category that has no metadata entry.
    #[error("category `{category}` has no metadata")]
    MissingCategoryMeta { category: String },
}

impl DatasetIssue {
    /// Whether this issue fails loading in strict mode.
    ///
    /// Missing category metadata has a documented fallback and never fails.
    pub fn is_strict_failure(&self) -> bool {
        !matches!(self, DatasetIssue::MissingCategoryMeta { .. })
    }
}

/// Collect every consistency issue in `dataset`.
///
/// Issues come out grouped by kind; within a kind, plugin-list issues follow
/// plugin-list order and overlay issues follow key order.
pub fn check_dataset(dataset: &Dataset) -> Vec<DatasetIssue> {
    let plugins = &dataset.marketplace.plugins;
    let meta = &dataset.meta;
    let mut issues = Vec::new();

    let mut names = HashSet::new();
    let mut reported = HashSet::new();
    for plugin in plugins {
        if !names.insert(plugin.name.as_str()) && reported.insert(plugin.name.as_str()) {
            issues.push(DatasetIssue::DuplicatePlugin {
                name: plugin.name.clone(),
            });
        }
    }

    for name in meta.plugins.keys() {
        if !names.contains(name.as_str()) {
            issues.push(DatasetIssue::OrphanOverlay { name: name.clone() });
        }
    }

    let used: HashSet<&str> = plugins.iter().map(|p| p.category.as_str()).collect();
    for name in meta.categories.keys() {
        if !used.contains(name.as_str()) {
            issues.push(DatasetIssue::UnusedCategory { name: name.clone() });
        }
    }

    let mut missing = HashSet::new();
    for plugin in plugins {
        if !meta.categories.contains_key(&plugin.category)
            && missing.insert(plugin.category.as_str())
        {
            issues.push(DatasetIssue::MissingCategoryMeta {
                category: plugin.category.clone(),
            });
        }
    }

    issues
}
