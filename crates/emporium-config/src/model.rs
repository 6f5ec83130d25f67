// SPDX-FileCopyrightText: 2026 Emporium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so that typos are reported
//! at startup instead of being silently ignored.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level Emporium configuration.
///
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EmporiumConfig {
    /// Dataset location and loading behavior.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Dataset location and loading behavior.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Path to a plugin-list document. `None` uses the bundled dataset.
    #[serde(default)]
    pub marketplace_path: Option<String>,

    /// Path to a metadata-overlay document. Must be set together with `marketplace_path`.
    #[serde(default)]
    pub meta_path: Option<String>,

    /// Fail loading on dataset inconsistencies instead of logging them.
    #[serde(default)]
    pub strict: bool,

    /// Number of entries shown as featured.
    #[serde(default = "default_featured_limit")]
    pub featured_limit: usize,
}

impl CatalogConfig {
    /// Both document paths, when the dataset is read from disk.
    pub fn document_paths(&self) -> Option<(PathBuf, PathBuf)> {
        match (&self.marketplace_path, &self.meta_path) {
            (Some(marketplace), Some(meta)) => {
                Some((PathBuf::from(marketplace), PathBuf::from(meta)))
            }
            _ => None,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            marketplace_path: None,
            meta_path: None,
            strict: false,
            featured_limit: default_featured_limit(),
        }
    }
}

fn default_featured_limit() -> usize {
    4
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
