// SPDX-FileCopyrightText: 2026 Emporium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dataset fixture builder.

use std::path::{Path, PathBuf};

use emporium_catalog::{Catalog, Dataset};
use emporium_core::{CategoryMeta, PluginOverlay, PluginSource, PluginStatus, RawPlugin};
use tempfile::TempDir;

/// A raw plugin record with predictable description, source and homepage.
pub fn raw_plugin(name: &str, category: &str) -> RawPlugin {
    RawPlugin {
        name: name.to_string(),
        description: format!("Test plugin {name}"),
        category: category.to_string(),
        source: PluginSource {
            source: "github".to_string(),
            url: format!("https://github.com/test/{name}"),
        },
        homepage: format!("https://{name}.example.com"),
    }
}

/// An overlay entry with no version or license.
pub fn overlay(status: PluginStatus, verified: bool, tags: &[&str]) -> PluginOverlay {
    PluginOverlay {
        version: None,
        license: None,
        status,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        verified,
    }
}

/// Builder for test datasets.
#[derive(Debug, Clone, Default)]
pub struct CatalogFixture {
    dataset: Dataset,
}

/// Dataset documents written to a temporary directory.
///
/// The directory is removed when this value is dropped.
pub struct FixtureFiles {
    pub dir: TempDir,
    pub marketplace: PathBuf,
    pub meta: PathBuf,
}

impl CatalogFixture {
    /// Create an empty fixture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw plugin record.
    pub fn plugin(mut self, name: &str, category: &str) -> Self {
        self.dataset
            .marketplace
            .plugins
            .push(raw_plugin(name, category));
        self
    }

    /// Set the overlay entry for `name`.
    pub fn overlay(mut self, name: &str, entry: PluginOverlay) -> Self {
        self.dataset.meta.plugins.insert(name.to_string(), entry);
        self
    }

    /// Shorthand for an overlay entry that makes `name` featured.
    pub fn verified(self, name: &str) -> Self {
        self.overlay(name, overlay(PluginStatus::Active, true, &[]))
    }

    /// Set the metadata for category `name`.
    pub fn category(mut self, name: &str, display_name: &str, description: &str) -> Self {
        self.dataset.meta.categories.insert(
            name.to_string(),
            CategoryMeta {
                display_name: display_name.to_string(),
                description: description.to_string(),
            },
        );
        self
    }

    /// The raw plugin records added so far.
    pub fn raw_plugins(&self) -> &[RawPlugin] {
        &self.dataset.marketplace.plugins
    }

    /// The dataset as built.
    pub fn dataset(&self) -> Dataset {
        self.dataset.clone()
    }

    /// A catalog built from the dataset without consistency checks.
    pub fn catalog(&self) -> Catalog {
        Catalog::from_dataset(&self.dataset)
    }

    /// The plugin-list document as JSON.
    pub fn marketplace_json(&self) -> String {
        to_json(&self.dataset.marketplace)
    }

    /// The metadata overlay as JSON.
    pub fn meta_json(&self) -> String {
        to_json(&self.dataset.meta)
    }

    /// Write both documents into `dir` and return their paths.
    pub fn write_to(&self, dir: &Path) -> std::io::Result<(PathBuf, PathBuf)> {
        let marketplace = dir.join("marketplace.json");
        let meta = dir.join("plugin-meta.json");
        std::fs::write(&marketplace, self.marketplace_json())?;
        std::fs::write(&meta, self.meta_json())?;
        Ok((marketplace, meta))
    }

    /// Write both documents into a fresh temporary directory.
    pub fn write_temp(&self) -> std::io::Result<FixtureFiles> {
        let dir = tempfile::tempdir()?;
        let (marketplace, meta) = self.write_to(dir.path())?;
        Ok(FixtureFiles {
            dir,
            marketplace,
            meta,
        })
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).expect("fixture documents always serialize")
}
