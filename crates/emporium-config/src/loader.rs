// SPDX-FileCopyrightText: 2026 Emporium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./emporium.toml` > `~/.config/emporium/emporium.toml` >
//! `/etc/emporium/emporium.toml` with environment variable overrides via `EMPORIUM_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::EmporiumConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/emporium/emporium.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "emporium.toml";

/// Top-level sections, used to map `EMPORIUM_<SECTION>_<KEY>` onto `<section>.<key>`.
const SECTIONS: &[&str] = &["catalog", "log"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/emporium/emporium.toml` (system-wide)
/// 3. `~/.config/emporium/emporium.toml` (user XDG config)
/// 4. `./emporium.toml` (local directory)
/// 5. `EMPORIUM_*` environment variables
pub fn load_config() -> Result<EmporiumConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<EmporiumConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EmporiumConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<EmporiumConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EmporiumConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for hierarchy loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(EmporiumConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("emporium/emporium.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Map `EMPORIUM_CATALOG_FEATURED_LIMIT` to `catalog.featured_limit`.
///
/// Only the first underscore after a known section name becomes a dot, so keys
/// that contain underscores survive intact.
fn env_provider() -> Env {
    Env::prefixed("EMPORIUM_").map(|key| {
        let key_str = key.as_str().to_ascii_lowercase();
        for section in SECTIONS {
            if let Some(rest) = key_str
                .strip_prefix(section)
                .and_then(|r| r.strip_prefix('_'))
            {
                return format!("{section}.{rest}").into();
            }
        }
        key_str.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_catalog_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("EMPORIUM_CATALOG_FEATURED_LIMIT", "7");
            jail.set_env("EMPORIUM_CATALOG_STRICT", "true");
            jail.set_env("EMPORIUM_LOG_LEVEL", "debug");

            let config = load_config()?;
            assert_eq!(config.catalog.featured_limit, 7);
            assert!(config.catalog.strict);
            assert_eq!(config.log.level, "debug");
            Ok(())
        });
    }

    #[test]
    fn local_file_is_merged() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                LOCAL_CONFIG_PATH,
                r#"
[catalog]
marketplace_path = "data/marketplace.json"
meta_path = "data/plugin-meta.json"
"#,
            )?;

            let config = load_config()?;
            assert_eq!(
                config.catalog.marketplace_path.as_deref(),
                Some("data/marketplace.json")
            );
            assert_eq!(config.catalog.featured_limit, 4);
            Ok(())
        });
    }

    #[test]
    fn env_beats_explicit_path() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[log]\nlevel = \"warn\"\n")?;
            jail.set_env("EMPORIUM_LOG_LEVEL", "trace");

            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(config.log.level, "trace");
            Ok(())
        });
    }
}
