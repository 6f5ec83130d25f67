// SPDX-FileCopyrightText: 2026 Emporium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The catalog accessor.
//!
//! A `Catalog` is built once from a parsed [`Dataset`] and is immutable
//! afterwards. All queries borrow from it and never fail; misses are empty
//! or `None`.

use emporium_core::{Category, EmporiumError, Plugin};

use crate::check::{check_dataset, DatasetIssue};
use crate::enrich::{derive_categories, enrich_all};
use crate::source::Dataset;

/// Number of entries returned by [`Catalog::featured`].
pub const DEFAULT_FEATURED_LIMIT: usize = 4;

/// How strictly dataset consistency issues are treated at load time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Log each issue and keep loading.
    #[default]
    Lenient,
    /// Refuse to load when any issue other than missing category metadata is found.
    Strict,
}

/// Enriched plugin catalog with its derived category index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    plugins: Vec<Plugin>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog from a dataset without running consistency checks.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let plugins = enrich_all(&dataset.marketplace.plugins, &dataset.meta.plugins);
        let categories = derive_categories(&dataset.marketplace.plugins, &dataset.meta.categories);
        Self {
            plugins,
            categories,
        }
    }

    /// Check a dataset and build a catalog from it.
    ///
    /// In lenient mode every issue is logged as a warning. In strict mode the
    /// strict failures are returned as [`EmporiumError::Dataset`].
    pub fn load(dataset: &Dataset, strictness: Strictness) -> Result<Self, EmporiumError> {
        let issues = check_dataset(dataset);
        if strictness == Strictness::Strict {
            let failures: Vec<String> = issues
                .iter()
                .filter(|issue| issue.is_strict_failure())
                .map(DatasetIssue::to_string)
                .collect();
            if !failures.is_empty() {
                return Err(EmporiumError::Dataset { issues: failures });
            }
        }
        for issue in &issues {
            tracing::warn!(%issue, "dataset issue");
        }

        let catalog = Self::from_dataset(dataset);
        tracing::debug!(
            plugins = catalog.plugins.len(),
            categories = catalog.categories.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Load the catalog bundled into the crate.
    pub fn bundled() -> Result<Self, EmporiumError> {
        Self::load(&Dataset::bundled()?, Strictness::Lenient)
    }

    /// Every enriched plugin, in plugin-list order.
    pub fn list_plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    /// One entry per distinct category, in first-seen order.
    pub fn list_categories(&self) -> &[Category] {
        &self.categories
    }

    /// Plugins whose category equals `category`, in plugin-list order.
    pub fn plugins_in_category(&self, category: &str) -> Vec<&Plugin> {
        self.plugins
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// The plugin named exactly `name`. With duplicate names, the first one wins.
    pub fn find_plugin(&self, name: &str) -> Option<&Plugin> {
        self.plugins.iter().find(|p| p.name == name)
    }

    /// Up to `limit` verified, active plugins in plugin-list order.
    pub fn featured_plugins(&self, limit: usize) -> Vec<&Plugin> {
        self.plugins
            .iter()
            .filter(|p| p.is_featured())
            .take(limit)
            .collect()
    }

    /// [`Catalog::featured_plugins`] with [`DEFAULT_FEATURED_LIMIT`].
    pub fn featured(&self) -> Vec<&Plugin> {
        self.featured_plugins(DEFAULT_FEATURED_LIMIT)
    }

    /// Plugins whose name, description or any tag contains `query`
    /// (case-insensitive), in plugin-list order.
    ///
    /// An empty query returns every plugin.
    pub fn search(&self, query: &str) -> Vec<&Plugin> {
        if query.is_empty() {
            return self.plugins.iter().collect();
        }
        let query_lower = query.to_lowercase();
        self.plugins
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&query_lower)
                    || p.description.to_lowercase().contains(&query_lower)
                    || p.tags.iter().any(|t| t.to_lowercase().contains(&query_lower))
            })
            .collect()
    }

    /// Returns the number of plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Returns true if the catalog has no plugins.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emporium_core::PluginStatus;
    use tracing_test::traced_test;

    fn names(plugins: &[&Plugin]) -> Vec<String> {
        plugins.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn bundled_catalog_lists_every_plugin() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.list_plugins()[0].name, "commit-scribe");
        assert_eq!(catalog.list_plugins()[9].name, "branch-gardener");
    }

    #[test]
    fn bundled_categories_in_first_seen_order() {
        let catalog = Catalog::bundled().unwrap();
        let names: Vec<&str> = catalog
            .list_categories()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["git", "testing", "documentation", "security"]);
        assert_eq!(catalog.list_categories()[0].display_name, "Git & Code Review");
    }

    #[test]
    fn bundled_plugins_in_category() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(
            names(&catalog.plugins_in_category("git")),
            vec!["commit-scribe", "pr-reviewer", "branch-gardener"]
        );
        assert!(catalog.plugins_in_category("nonexistent").is_empty());
    }

    #[test]
    fn bundled_featured_defaults_to_four() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(
            names(&catalog.featured()),
            vec!["commit-scribe", "pr-reviewer", "flaky-hunter", "secret-sentry"]
        );
        // test-pilot is verified but beta, legacy-lint verified but deprecated.
        assert_eq!(catalog.featured_plugins(10).len(), 5);
        assert!(catalog.featured_plugins(0).is_empty());
    }

    #[test]
    fn bundled_find_plugin() {
        let catalog = Catalog::bundled().unwrap();
        let legacy = catalog.find_plugin("legacy-lint").unwrap();
        assert_eq!(legacy.status, PluginStatus::Deprecated);

        let bare = catalog.find_plugin("changelog-smith").unwrap();
        assert_eq!(bare.status, PluginStatus::Active);
        assert!(!bare.verified);

        assert!(catalog.find_plugin("missing-name").is_none());
        assert!(catalog.find_plugin("commit").is_none());
    }

    #[test]
    fn search_matches_name_description_and_tags() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(names(&catalog.search("SENTRY")), vec!["secret-sentry"]);
        assert_eq!(names(&catalog.search("release notes")), vec!["changelog-smith"]);
        assert_eq!(
            names(&catalog.search("secrets")),
            vec!["secret-sentry"],
            "tag match"
        );
        assert_eq!(catalog.search("").len(), 10);
        assert!(catalog.search("xyz_nonexistent").is_empty());
    }

    const ORPHAN_MARKETPLACE: &str = r#"{ "plugins": [ {
        "name": "a", "description": "", "category": "x",
        "source": { "source": "github", "url": "" }, "homepage": ""
    } ] }"#;
    const ORPHAN_META: &str = r#"{ "plugins": { "ghost": { "status": "active" } } }"#;

    #[test]
    #[traced_test]
    fn lenient_load_logs_issues() {
        let dataset = Dataset::from_strs(ORPHAN_MARKETPLACE, ORPHAN_META).unwrap();
        let catalog = Catalog::load(&dataset, Strictness::Lenient).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(logs_contain("overlay entry `ghost` matches no plugin"));
        assert!(logs_contain("category `x` has no metadata"));
    }

    #[test]
    fn strict_load_rejects_orphan_overlay() {
        let dataset = Dataset::from_strs(ORPHAN_MARKETPLACE, ORPHAN_META).unwrap();
        let err = Catalog::load(&dataset, Strictness::Strict).unwrap_err();
        match err {
            EmporiumError::Dataset { issues } => {
                assert_eq!(issues, vec!["overlay entry `ghost` matches no plugin"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn strict_load_tolerates_missing_category_meta() {
        let dataset = Dataset::from_strs(ORPHAN_MARKETPLACE, "{}").unwrap();
        let catalog = Catalog::load(&dataset, Strictness::Strict).unwrap();
        assert_eq!(catalog.list_categories()[0].display_name, "x");
    }

    #[test]
    fn strict_load_accepts_bundled_dataset() {
        let catalog = Catalog::load(&Dataset::bundled().unwrap(), Strictness::Strict).unwrap();
        assert_eq!(catalog.len(), 10);
    }

    #[test]
    fn empty_catalog() {
        let catalog = Catalog::from_dataset(&Dataset::default());
        assert!(catalog.is_empty());
        assert!(catalog.list_categories().is_empty());
        assert!(catalog.featured().is_empty());
    }
}
