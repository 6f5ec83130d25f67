// SPDX-FileCopyrightText: 2026 Emporium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dataset documents and their parsers.
//!
//! A dataset is two JSON documents: the plugin list (`marketplace.json`) and
//! the metadata overlay (`plugin-meta.json`). Both are bundled into the crate
//! and can also be read from disk or from in-memory strings.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;

use emporium_core::{CategoryMeta, EmporiumError, OverlayKind, PluginOverlay, RawPlugin};
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Document name used in errors for the plugin list.
pub const MARKETPLACE_DOCUMENT: &str = "marketplace";

/// Document name used in errors for the metadata overlay.
pub const META_DOCUMENT: &str = "plugin-meta";

/// Plugin list compiled into the crate.
pub const BUNDLED_MARKETPLACE: &str = include_str!("../data/marketplace.json");

/// Metadata overlay compiled into the crate.
pub const BUNDLED_META: &str = include_str!("../data/plugin-meta.json");

/// The plugin-list document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceDocument {
    pub plugins: Vec<RawPlugin>,
}

/// The metadata overlay, keyed by plugin name and by category name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetaDocument {
    pub plugins: BTreeMap<String, PluginOverlay>,
    pub categories: BTreeMap<String, CategoryMeta>,
}

/// Both documents, parsed and ready for enrichment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub marketplace: MarketplaceDocument,
    pub meta: MetaDocument,
}

impl Dataset {
    /// Parse the documents bundled into the crate.
    pub fn bundled() -> Result<Self, EmporiumError> {
        Self::from_strs(BUNDLED_MARKETPLACE, BUNDLED_META)
    }

    /// Parse both documents from JSON strings.
    pub fn from_strs(marketplace_json: &str, meta_json: &str) -> Result<Self, EmporiumError> {
        Ok(Self {
            marketplace: parse_marketplace(marketplace_json)?,
            meta: parse_meta(meta_json)?,
        })
    }

    /// Read and parse both documents from disk.
    pub fn from_paths(marketplace_path: &Path, meta_path: &Path) -> Result<Self, EmporiumError> {
        let marketplace_json = read_document(marketplace_path)?;
        let meta_json = read_document(meta_path)?;
        tracing::debug!(
            marketplace = %marketplace_path.display(),
            meta = %meta_path.display(),
            "read dataset documents"
        );
        Self::from_strs(&marketplace_json, &meta_json)
    }
}

/// Parse the plugin-list document.
pub fn parse_marketplace(json: &str) -> Result<MarketplaceDocument, EmporiumError> {
    serde_json::from_str(json).map_err(|source| EmporiumError::Parse {
        document: MARKETPLACE_DOCUMENT.to_string(),
        source,
    })
}

/// Parse the metadata overlay.
///
/// Entries are decoded one at a time so that a malformed entry is reported
/// by name. Duplicate keys in either map are rejected.
pub fn parse_meta(json: &str) -> Result<MetaDocument, EmporiumError> {
    let file: MetaFile = serde_json::from_str(json).map_err(|source| EmporiumError::Parse {
        document: META_DOCUMENT.to_string(),
        source,
    })?;

    Ok(MetaDocument {
        plugins: decode_entries(file.plugins, OverlayKind::Plugin)?,
        categories: decode_entries(file.categories, OverlayKind::Category)?,
    })
}

fn read_document(path: &Path) -> Result<String, EmporiumError> {
    std::fs::read_to_string(path).map_err(|source| EmporiumError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn decode_entries<T: DeserializeOwned>(
    entries: UniqueMap,
    kind: OverlayKind,
) -> Result<BTreeMap<String, T>, EmporiumError> {
    entries
        .0
        .into_iter()
        .map(|(name, value)| match serde_json::from_value(value) {
            Ok(entry) => Ok((name, entry)),
            Err(source) => Err(EmporiumError::InvalidOverlay { kind, name, source }),
        })
        .collect()
}

/// Intermediate deserialization struct for `plugin-meta.json`.
#[derive(Debug, Deserialize)]
struct MetaFile {
    #[serde(default)]
    plugins: UniqueMap,
    #[serde(default)]
    categories: UniqueMap,
}

/// A JSON object whose keys must be unique, values left undecoded.
#[derive(Debug, Default)]
struct UniqueMap(Vec<(String, serde_json::Value)>);

impl<'de> Deserialize<'de> for UniqueMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UniqueMapVisitor;

        impl<'de> Visitor<'de> for UniqueMapVisitor {
            type Value = UniqueMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object keyed by name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<UniqueMap, A::Error> {
                let mut seen = HashSet::new();
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, serde_json::Value>()? {
                    if !seen.insert(key.clone()) {
                        return Err(serde::de::Error::custom(format!("duplicate key `{key}`")));
                    }
                    entries.push((key, value));
                }
                Ok(UniqueMap(entries))
            }
        }

        deserializer.deserialize_map(UniqueMapVisitor)
    }
}
