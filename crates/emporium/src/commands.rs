// SPDX-FileCopyrightText: 2026 Emporium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog loading and query subcommands.
//!
//! Every command writes either a compact text listing or, with `--json`,
//! pretty-printed JSON to the given writer.

use std::io::Write;

use colored::Colorize;
use emporium_catalog::{Catalog, Dataset, Strictness};
use emporium_config::CatalogConfig;
use emporium_core::{Category, EmporiumError, Plugin, PluginStatus};
use serde::Serialize;

/// How results are written.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputMode {
    pub json: bool,
    pub color: bool,
}

/// A catalog query requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Plugins,
    Categories,
    Category(String),
    Show(String),
    Featured(usize),
    Search(String),
}

/// Whether a query found what it was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Found,
    NotFound,
}

/// Load the catalog described by `config`: bundled unless both paths are set.
pub fn load_catalog(config: &CatalogConfig) -> Result<Catalog, EmporiumError> {
    let dataset = match config.document_paths() {
        Some((marketplace, meta)) => {
            tracing::debug!(
                marketplace = %marketplace.display(),
                meta = %meta.display(),
                "reading catalog documents from disk"
            );
            Dataset::from_paths(&marketplace, &meta)?
        }
        None => {
            tracing::debug!("using bundled catalog documents");
            Dataset::bundled()?
        }
    };
    let strictness = if config.strict {
        Strictness::Strict
    } else {
        Strictness::Lenient
    };
    Catalog::load(&dataset, strictness)
}

/// Run `query` against `catalog` and write the result to `out`.
pub fn run_query(
    catalog: &Catalog,
    query: &Query,
    mode: OutputMode,
    out: &mut impl Write,
) -> Result<Outcome, EmporiumError> {
    match query {
        Query::Plugins => {
            let plugins: Vec<&Plugin> = catalog.list_plugins().iter().collect();
            write_plugins(out, &plugins, mode)?;
        }
        Query::Categories => write_categories(out, catalog.list_categories(), mode)?,
        Query::Category(name) => write_plugins(out, &catalog.plugins_in_category(name), mode)?,
        Query::Featured(limit) => write_plugins(out, &catalog.featured_plugins(*limit), mode)?,
        Query::Search(query) => write_plugins(out, &catalog.search(query), mode)?,
        Query::Show(name) => {
            let Some(plugin) = catalog.find_plugin(name) else {
                if mode.json {
                    write_json(out, &serde_json::Value::Null)?;
                }
                return Ok(Outcome::NotFound);
            };
            if mode.json {
                write_json(out, plugin)?;
            } else {
                write_plugin_detail(out, plugin, mode.color).map_err(write_error)?;
            }
        }
    }
    Ok(Outcome::Found)
}

/// Column width of the status in plugin listings.
const STATUS_WIDTH: usize = 10;

fn write_plugins(
    out: &mut impl Write,
    plugins: &[&Plugin],
    mode: OutputMode,
) -> Result<(), EmporiumError> {
    if mode.json {
        return write_json(out, plugins);
    }
    let width = plugins.iter().map(|p| p.name.len()).max().unwrap_or(0);
    for plugin in plugins {
        let marker = if plugin.verified { "✓" } else { " " };
        let name = format!("{:<width$}", plugin.name);
        let status = status_label(plugin.status, STATUS_WIDTH, mode.color);
        let written = if mode.color {
            writeln!(
                out,
                "{} {}  {}  {}",
                marker.green(),
                name.bold(),
                status,
                plugin.description
            )
        } else {
            writeln!(out, "{marker} {name}  {status}  {}", plugin.description)
        };
        written.map_err(write_error)?;
    }
    Ok(())
}

fn write_categories(
    out: &mut impl Write,
    categories: &[Category],
    mode: OutputMode,
) -> Result<(), EmporiumError> {
    if mode.json {
        return write_json(out, categories);
    }
    let width = categories.iter().map(|c| c.name.len()).max().unwrap_or(0);
    for category in categories {
        let name = format!("{:<width$}", category.name);
        let name = if mode.color {
            name.bold().to_string()
        } else {
            name
        };
        writeln!(
            out,
            "{name}  {}  {}",
            category.display_name, category.description
        )
        .map_err(write_error)?;
    }
    Ok(())
}

fn write_plugin_detail(out: &mut impl Write, plugin: &Plugin, color: bool) -> std::io::Result<()> {
    let title = if color {
        plugin.name.bold().to_string()
    } else {
        plugin.name.clone()
    };
    writeln!(out, "{title}")?;
    writeln!(out, "  {}", plugin.description)?;
    writeln!(out, "  category: {}", plugin.category)?;
    writeln!(out, "  status:   {}", status_label(plugin.status, 0, color))?;
    writeln!(out, "  verified: {}", if plugin.verified { "yes" } else { "no" })?;
    if let Some(version) = &plugin.version {
        writeln!(out, "  version:  {version}")?;
    }
    if let Some(license) = &plugin.license {
        writeln!(out, "  license:  {license}")?;
    }
    if !plugin.tags.is_empty() {
        writeln!(out, "  tags:     {}", plugin.tags.join(", "))?;
    }
    writeln!(
        out,
        "  source:   {} ({})",
        plugin.source.url, plugin.source.source
    )?;
    writeln!(out, "  homepage: {}", plugin.homepage)
}

/// Pad before coloring so escape codes do not count toward the width.
fn status_label(status: PluginStatus, width: usize, color: bool) -> String {
    let label = format!("{:<width$}", status.to_string());
    if !color {
        return label;
    }
    match status {
        PluginStatus::Active => label.green().to_string(),
        PluginStatus::Beta => label.yellow().to_string(),
        PluginStatus::Deprecated => label.red().to_string(),
    }
}

fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<(), EmporiumError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| EmporiumError::Internal(format!("failed to serialize output: {e}")))?;
    writeln!(out, "{json}").map_err(write_error)
}

fn write_error(e: std::io::Error) -> EmporiumError {
    EmporiumError::Internal(format!("failed to write output: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    const PLAIN: OutputMode = OutputMode {
        json: false,
        color: false,
    };
    const JSON: OutputMode = OutputMode {
        json: true,
        color: false,
    };

    fn run(query: Query, mode: OutputMode) -> (Outcome, String) {
        let catalog = Catalog::bundled().unwrap();
        let mut buf = Vec::new();
        let outcome = run_query(&catalog, &query, mode, &mut buf).unwrap();
        (outcome, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn plugins_lists_one_line_each() {
        let (outcome, text) = run(Query::Plugins, PLAIN);
        assert_eq!(outcome, Outcome::Found);
        assert_eq!(text.lines().count(), 10);
        assert!(text.lines().next().unwrap().contains("commit-scribe"));
    }

    #[test]
    fn categories_in_first_seen_order() {
        let (_, text) = run(Query::Categories, PLAIN);
        let first_words: Vec<&str> = text
            .lines()
            .map(|l| l.split_whitespace().next().unwrap())
            .collect();
        assert_eq!(first_words, vec!["git", "testing", "documentation", "security"]);
    }

    #[test]
    fn category_json_is_array_of_plugins() {
        let (_, text) = run(Query::Category("security".into()), JSON);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let names: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["secret-sentry", "dep-auditor"]);
    }

    #[test]
    fn unknown_category_prints_nothing() {
        let (outcome, text) = run(Query::Category("nonexistent".into()), PLAIN);
        assert_eq!(outcome, Outcome::Found);
        assert!(text.is_empty());
    }

    #[test]
    fn featured_respects_limit() {
        let (_, text) = run(Query::Featured(2), PLAIN);
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn show_prints_detail() {
        let (outcome, text) = run(Query::Show("dep-auditor".into()), PLAIN);
        assert_eq!(outcome, Outcome::Found);
        assert!(text.contains("license:  MIT OR Apache-2.0"));
        assert!(text.contains("tags:     security, dependencies"));
    }

    #[test]
    fn show_missing_is_not_found() {
        let (outcome, text) = run(Query::Show("missing-name".into()), PLAIN);
        assert_eq!(outcome, Outcome::NotFound);
        assert!(text.is_empty());

        let (outcome, text) = run(Query::Show("missing-name".into()), JSON);
        assert_eq!(outcome, Outcome::NotFound);
        assert_eq!(text.trim(), "null");
    }

    #[test]
    fn show_json_uses_camel_case_wire_names() {
        let (_, text) = run(Query::Show("changelog-smith".into()), JSON);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["status"], "active");
        assert_eq!(value["verified"], false);
        assert!(value.get("version").is_none());
    }

    #[test]
    fn search_lists_matches() {
        let (_, text) = run(Query::Search("security".into()), PLAIN);
        assert_eq!(text.lines().count(), 2);
    }

    fn strip_ansi(text: &str) -> String {
        let mut plain = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                chars.by_ref().find(|&c| c == 'm');
            } else {
                plain.push(c);
            }
        }
        plain
    }

    #[test]
    fn colored_listing_keeps_columns_aligned() {
        colored::control::set_override(true);
        let catalog = emporium_test_utils::CatalogFixture::new()
            .plugin("a", "x")
            .plugin("b", "x")
            .overlay("a", emporium_test_utils::overlay(PluginStatus::Active, true, &[]))
            .overlay("b", emporium_test_utils::overlay(PluginStatus::Deprecated, false, &[]))
            .catalog();
        let mode = OutputMode {
            json: false,
            color: true,
        };
        let mut buf = Vec::new();
        run_query(&catalog, &Query::Plugins, mode, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains('\u{1b}'), "expected colored output: {text:?}");
        let plain = strip_ansi(&text);
        let columns: Vec<usize> = plain
            .lines()
            .map(|line| {
                let byte = line.find("Test plugin").unwrap();
                line[..byte].chars().count()
            })
            .collect();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0], columns[1]);
        assert!(plain.contains("active      Test plugin a"));
    }

    #[test]
    #[traced_test]
    fn load_catalog_logs_dataset_source() {
        load_catalog(&CatalogConfig::default()).unwrap();
        assert!(logs_contain("using bundled catalog documents"));
    }

    #[test]
    fn load_catalog_defaults_to_bundled() {
        let catalog = load_catalog(&CatalogConfig::default()).unwrap();
        assert_eq!(catalog.len(), 10);
    }

    #[test]
    fn load_catalog_reads_configured_paths() {
        let fixture = emporium_test_utils::CatalogFixture::new()
            .plugin("a", "x")
            .verified("a");
        let files = fixture.write_temp().unwrap();
        let config = CatalogConfig {
            marketplace_path: Some(files.marketplace.display().to_string()),
            meta_path: Some(files.meta.display().to_string()),
            ..CatalogConfig::default()
        };
        let catalog = load_catalog(&config).unwrap();
        assert_eq!(catalog.featured().len(), 1);
    }

    #[test]
    fn load_catalog_strict_rejects_orphans() {
        let fixture = emporium_test_utils::CatalogFixture::new()
            .plugin("a", "x")
            .verified("ghost");
        let files = fixture.write_temp().unwrap();
        let config = CatalogConfig {
            marketplace_path: Some(files.marketplace.display().to_string()),
            meta_path: Some(files.meta.display().to_string()),
            strict: true,
            ..CatalogConfig::default()
        };
        assert!(matches!(
            load_catalog(&config),
            Err(EmporiumError::Dataset { .. })
        ));
    }
}
