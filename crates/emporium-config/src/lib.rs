// SPDX-FileCopyrightText: 2026 Emporium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Emporium plugin catalog.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, and miette
//! diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use emporium_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("featured: {}", config.catalog.featured_limit);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{render_errors, ConfigError, ConfigSource};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{CatalogConfig, EmporiumConfig, LogConfig};

/// Load configuration from the XDG hierarchy and validate it.
pub fn load_and_validate() -> Result<EmporiumConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<EmporiumConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![ConfigSource::new(diagnostic::INLINE_SOURCE, toml_content)]
    })
}

/// Load configuration from an explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<EmporiumConfig, Vec<ConfigError>> {
    if !path.exists() {
        return Err(vec![ConfigError::Other(format!(
            "config file {} does not exist",
            path.display()
        ))]);
    }
    finish(loader::load_config_from_path(path), || {
        std::fs::read_to_string(path)
            .map(|content| vec![ConfigSource::new(path.display().to_string(), content)])
            .unwrap_or_default()
    })
}

fn finish(
    loaded: Result<EmporiumConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<ConfigSource>,
) -> Result<EmporiumConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources() -> Vec<ConfigSource> {
    let mut candidates = vec![std::env::current_dir()
        .map(|d| d.join(loader::LOCAL_CONFIG_PATH))
        .unwrap_or_else(|_| loader::LOCAL_CONFIG_PATH.into())];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("emporium/emporium.toml"));
    }
    candidates.push(loader::SYSTEM_CONFIG_PATH.into());

    candidates
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            tracing::debug!(path = %path.display(), "config file found");
            Some(ConfigSource::new(path.display().to_string(), content))
        })
        .collect()
}
