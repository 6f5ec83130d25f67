// SPDX-FileCopyrightText: 2026 Emporium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the catalog loader, the accessor and the CLI.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Where a plugin is published from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PluginSource {
    /// Origin kind (e.g., "github", "url").
    pub source: String,
    /// Location of the plugin within that origin.
    pub url: String,
}

/// A plugin record exactly as it appears in the plugin-list document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPlugin {
    /// Unique plugin name.
    pub name: String,
    /// One-line summary shown in listings.
    pub description: String,
    /// Category name; looked up in the category metadata overlay.
    pub category: String,
    /// Where the plugin is published.
    pub source: PluginSource,
    /// Project homepage URL.
    pub homepage: String,
}

/// Lifecycle status of a catalog entry.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PluginStatus {
    /// Maintained and recommended.
    #[default]
    Active,
    /// Usable but still changing.
    Beta,
    /// Kept for existing users; never featured.
    Deprecated,
}

/// Per-plugin metadata layered onto a raw record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginOverlay {
    /// Released version, if published.
    #[serde(default)]
    pub version: Option<String>,
    /// SPDX license expression, if known.
    #[serde(default)]
    pub license: Option<String>,
    /// Required: an overlay entry without a status is malformed.
    pub status: PluginStatus,
    /// Free-form search tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether the maintainers have reviewed the plugin.
    #[serde(default)]
    pub verified: bool,
}

/// Display metadata for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMeta {
    /// Human-readable category title.
    pub display_name: String,
    /// One-line summary of the category.
    pub description: String,
}

/// A raw plugin record merged with its overlay entry (or the overlay defaults).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugin {
    pub name: String,
    pub description: String,
    pub category: String,
    pub source: PluginSource,
    pub homepage: String,
    /// From the overlay; omitted from JSON when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// From the overlay; omitted from JSON when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// `active` when the plugin has no overlay entry.
    pub status: PluginStatus,
    /// Empty when the plugin has no overlay entry.
    pub tags: Vec<String>,
    /// `false` when the plugin has no overlay entry.
    pub verified: bool,
}

impl Plugin {
    /// Featured entries are verified and active.
    pub fn is_featured(&self) -> bool {
        self.verified && self.status == PluginStatus::Active
    }
}

/// A category derived from the plugin list, with its display metadata resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Raw category value as used by plugins.
    pub name: String,
    /// Title from the category metadata, or `name` when there is none.
    pub display_name: String,
    /// Summary from the category metadata, or empty when there is none.
    pub description: String,
}
