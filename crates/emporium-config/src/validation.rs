// SPDX-FileCopyrightText: 2026 Emporium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::EmporiumConfig;

/// Accepted values for `log.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns all collected validation errors (does not fail fast).
pub fn validate_config(config: &EmporiumConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let catalog = &config.catalog;

    if catalog.featured_limit == 0 {
        errors.push(ConfigError::Validation {
            message: "catalog.featured_limit must be at least 1".to_string(),
        });
    }

    match (&catalog.marketplace_path, &catalog.meta_path) {
        (Some(_), None) => errors.push(ConfigError::Validation {
            message: "catalog.marketplace_path is set but catalog.meta_path is not".to_string(),
        }),
        (None, Some(_)) => errors.push(ConfigError::Validation {
            message: "catalog.meta_path is set but catalog.marketplace_path is not".to_string(),
        }),
        _ => {}
    }

    for (key, value) in [
        ("marketplace_path", &catalog.marketplace_path),
        ("meta_path", &catalog.meta_path),
    ] {
        if let Some(path) = value
            && path.trim().is_empty()
        {
            errors.push(ConfigError::Validation {
                message: format!("catalog.{key} must not be empty"),
            });
        }
    }

    if !LOG_LEVELS.contains(&config.log.level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of: {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
