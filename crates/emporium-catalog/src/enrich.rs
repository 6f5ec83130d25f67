// SPDX-FileCopyrightText: 2026 Emporium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Overlay enrichment and category derivation.

use std::collections::{BTreeMap, HashSet};

use emporium_core::{Category, CategoryMeta, Plugin, PluginOverlay, RawPlugin};

/// Merge a raw record with its overlay entry.
///
/// Plugins without an overlay entry get the defaults: active, no tags,
/// unverified, no version or license.
pub fn enrich_plugin(raw: &RawPlugin, overlays: &BTreeMap<String, PluginOverlay>) -> Plugin {
    let overlay = overlays.get(&raw.name).cloned().unwrap_or_default();
    Plugin {
        name: raw.name.clone(),
        description: raw.description.clone(),
        category: raw.category.clone(),
        source: raw.source.clone(),
        homepage: raw.homepage.clone(),
        version: overlay.version,
        license: overlay.license,
        status: overlay.status,
        tags: overlay.tags,
        verified: overlay.verified,
    }
}

/// Enrich every raw record, preserving order.
pub fn enrich_all(raw: &[RawPlugin], overlays: &BTreeMap<String, PluginOverlay>) -> Vec<Plugin> {
    raw.iter().map(|p| enrich_plugin(p, overlays)).collect()
}

/// One category per distinct value in `raw`, in first-seen order.
///
/// Categories with no metadata fall back to the raw value as display name and
/// an empty description.
pub fn derive_categories(
    raw: &[RawPlugin],
    metadata: &BTreeMap<String, CategoryMeta>,
) -> Vec<Category> {
    let mut seen = HashSet::new();
    let mut categories = Vec::new();
    for plugin in raw {
        if !seen.insert(plugin.category.as_str()) {
            continue;
        }
        let (display_name, description) = match metadata.get(&plugin.category) {
            Some(meta) => (meta.display_name.clone(), meta.description.clone()),
            None => (plugin.category.clone(), String::new()),
        };
        categories.push(Category {
            name: plugin.category.clone(),
            display_name,
            description,
        });
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use emporium_core::{PluginSource, PluginStatus};

    fn raw(name: &str, category: &str) -> RawPlugin {
        RawPlugin {
            name: name.to_string(),
            description: format!("Test plugin {name}"),
            category: category.to_string(),
            source: PluginSource {
                source: "github".to_string(),
                url: format!("https://github.com/test/{name}"),
            },
            homepage: format!("https://{name}.dev"),
        }
    }

    #[test]
    fn enrich_copies_overlay_fields() {
        let mut overlays = BTreeMap::new();
        overlays.insert(
            "a".to_string(),
            PluginOverlay {
                version: Some("2.0.0".to_string()),
                license: Some("MIT".to_string()),
                status: PluginStatus::Beta,
                tags: vec!["x".to_string(), "y".to_string()],
                verified: true,
            },
        );

        let plugin = enrich_plugin(&raw("a", "cat"), &overlays);
        assert_eq!(plugin.version.as_deref(), Some("2.0.0"));
        assert_eq!(plugin.license.as_deref(), Some("MIT"));
        assert_eq!(plugin.status, PluginStatus::Beta);
        assert_eq!(plugin.tags, vec!["x", "y"]);
        assert!(plugin.verified);
        assert_eq!(plugin.homepage, "https://a.dev");
    }

    #[test]
    fn enrich_applies_defaults_without_overlay() {
        let plugin = enrich_plugin(&raw("a", "cat"), &BTreeMap::new());
        assert_eq!(plugin.status, PluginStatus::Active);
        assert!(plugin.tags.is_empty());
        assert!(!plugin.verified);
        assert!(plugin.version.is_none());
        assert!(plugin.license.is_none());
    }

    #[test]
    fn enrich_all_leaves_raw_list_untouched() {
        let records = vec![raw("a", "x"), raw("b", "y")];
        let before = records.clone();
        let enriched = enrich_all(&records, &BTreeMap::new());
        assert_eq!(records, before);
        assert_eq!(enriched.len(), 2);
        assert_eq!(enriched[1].name, "b");
    }

    #[test]
    fn derive_categories_keeps_first_seen_order() {
        let records = vec![raw("a", "x"), raw("b", "y"), raw("c", "x"), raw("d", "z")];
        let names: Vec<String> = derive_categories(&records, &BTreeMap::new())
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["x", "y", "z"]);
    }

    #[test]
    fn derive_categories_resolves_metadata_and_fallback() {
        let mut metadata = BTreeMap::new();
        metadata.insert(
            "x".to_string(),
            CategoryMeta {
                display_name: "Ex".to_string(),
                description: "All the x".to_string(),
            },
        );

        let categories = derive_categories(&[raw("a", "x"), raw("b", "y")], &metadata);
        assert_eq!(categories[0].display_name, "Ex");
        assert_eq!(categories[0].description, "All the x");
        assert_eq!(categories[1].display_name, "y");
        assert_eq!(categories[1].description, "");
    }

    #[test]
    fn derive_categories_empty_input() {
        assert!(derive_categories(&[], &BTreeMap::new()).is_empty());
    }
}
