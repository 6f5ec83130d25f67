// SPDX-FileCopyrightText: 2026 Emporium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration diagnostics for `emporium.toml`.
//!
//! Figment extraction errors are turned into miette diagnostics that point at
//! the offending line, explain what each `[catalog]` and `[log]` key accepts,
//! and suggest the closest key when one is misspelled or sits in the wrong
//! section.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use std::path::{Path, PathBuf};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::validation::LOG_LEVELS;

/// Minimum Jaro-Winkler similarity for a key to be offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Source name used for configuration passed in as a string.
pub const INLINE_SOURCE: &str = "<inline>";

/// Keys accepted in each section of `emporium.toml`, in declaration order.
pub const SECTION_KEYS: &[(&str, &[&str])] = &[
    (
        "catalog",
        &["marketplace_path", "meta_path", "strict", "featured_limit"],
    ),
    ("log", &["level"]),
];

/// A TOML document configuration was read from, kept for source spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    /// File path, or [`INLINE_SOURCE`] for string input.
    pub name: String,
    /// Full document text.
    pub content: String,
}

impl ConfigSource {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// A configuration error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key that the enclosing section does not accept.
    #[error("unknown key `{key}` in {}", section_label(.section.as_deref()))]
    #[diagnostic(
        code(emporium::config::unknown_key),
        help(
            "{}",
            unknown_key_help(key, section.as_deref(), suggestion.as_deref(), belongs_in.as_deref())
        )
    )]
    UnknownKey {
        /// The unrecognized key name.
        key: String,
        /// Section the key appeared in; `None` at the top level.
        section: Option<String>,
        /// Closest accepted key in the same section, if any is close enough.
        suggestion: Option<String>,
        /// Another section that does accept this key.
        belongs_in: Option<String>,
        /// Location of the key in its document.
        #[label("not accepted here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value whose type does not fit its key.
    #[error("`{key}` expects {expected}, found {found}")]
    #[diagnostic(code(emporium::config::invalid_type), help("{hint}"))]
    InvalidType {
        /// Dotted key path, e.g. `catalog.featured_limit`.
        key: String,
        /// What the value actually was.
        found: String,
        /// What the deserializer wanted.
        expected: String,
        /// What to write instead, specific to the key.
        hint: String,
        /// Location of the offending value.
        #[label("this value")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value that parsed but is not acceptable.
    #[error("validation error: {message}")]
    #[diagnostic(code(emporium::config::validation))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },

    /// Anything else figment or the loader reports.
    #[error("configuration error: {0}")]
    #[diagnostic(code(emporium::config::other))]
    Other(String),
}

fn section_label(section: Option<&str>) -> String {
    match section {
        Some(section) => format!("[{section}]"),
        None => "emporium.toml".to_string(),
    }
}

fn unknown_key_help(
    key: &str,
    section: Option<&str>,
    suggestion: Option<&str>,
    belongs_in: Option<&str>,
) -> String {
    if let Some(home) = belongs_in {
        return format!("`{key}` belongs in the [{home}] section");
    }
    let accepted = match section {
        None => "emporium.toml has only [catalog] and [log] sections".to_string(),
        Some(section) => format!(
            "[{section}] accepts: {}",
            keys_in(section).unwrap_or_default().join(", ")
        ),
    };
    match suggestion {
        Some(s) => format!("did you mean `{s}`? {accepted}"),
        None => accepted,
    }
}

/// What a well-formed value looks like for `key`.
fn value_hint(key: &str, expected: &str) -> String {
    match key {
        "catalog.featured_limit" => {
            "`featured_limit` takes a whole number of at least 1, e.g. `featured_limit = 4`"
                .to_string()
        }
        "catalog.strict" => "`strict` takes `true` or `false`".to_string(),
        "catalog.marketplace_path" | "catalog.meta_path" => {
            "document paths are quoted strings, e.g. `meta_path = \"data/plugin-meta.json\"`"
                .to_string()
        }
        "log.level" => format!("`level` takes one of: {}", LOG_LEVELS.join(", ")),
        "catalog" | "log" => format!("`{key}` must be a table written as `[{key}]`"),
        _ => format!("expected {expected}"),
    }
}

fn keys_in(section: &str) -> Option<&'static [&'static str]> {
    SECTION_KEYS
        .iter()
        .find(|(name, _)| *name == section)
        .map(|(_, keys)| *keys)
}

/// The section, other than `current`, whose keys include `key`.
fn home_section(key: &str, current: Option<&str>) -> Option<&'static str> {
    SECTION_KEYS
        .iter()
        .find(|(name, keys)| Some(*name) != current && keys.contains(&key))
        .map(|(name, _)| *name)
}

/// The candidate most similar to `unknown`, if any clears the threshold.
pub fn closest_key<'a>(unknown: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|&candidate| (candidate, strsim::jaro_winkler(unknown, candidate)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate)
}

/// Byte spans of one `key = value` line in a TOML document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntrySpan {
    pub key: SourceSpan,
    pub value: SourceSpan,
}

/// Find `key` under `[section]` (or before any header when `section` is `None`).
///
/// Only plain `key = value` lines are recognized, which is all `emporium.toml`
/// uses.
pub fn locate_entry(content: &str, section: Option<&str>, key: &str) -> Option<EntrySpan> {
    let mut current: Option<&str> = None;
    let mut line_start = 0;

    for raw in content.split_inclusive('\n') {
        let start = line_start;
        line_start += raw.len();

        let line = raw.trim_end();
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();

        if let Some(header) = trimmed.strip_prefix('[') {
            current = header.split(']').next().map(str::trim);
            continue;
        }
        if current != section {
            continue;
        }
        let Some((lhs, rhs)) = trimmed.split_once('=') else {
            continue;
        };
        if lhs.trim_end() != key {
            continue;
        }

        let key_start = start + indent;
        let value = rhs.trim();
        let value_start = key_start + lhs.len() + 1 + (rhs.len() - rhs.trim_start().len());
        return Some(EntrySpan {
            key: SourceSpan::new(key_start.into(), key.len()),
            value: SourceSpan::new(value_start.into(), value.len()),
        });
    }

    None
}

/// Convert a `figment::Error` into one `ConfigError` per underlying failure.
pub fn figment_to_config_errors(err: figment::Error, sources: &[ConfigSource]) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                let section = error.path.first().cloned();
                let belongs_in = home_section(field, section.as_deref()).map(str::to_string);
                let suggestion = closest_key(field, expected).map(str::to_string);
                let (span, src) = match source_for(&error, sources) {
                    Some(source) => match locate_entry(&source.content, section.as_deref(), field) {
                        Some(entry) => (Some(entry.key), Some(named(source))),
                        None => (None, None),
                    },
                    None => (None, None),
                };
                ConfigError::UnknownKey {
                    key: field.clone(),
                    section,
                    suggestion,
                    belongs_in,
                    span,
                    src,
                }
            }
            Kind::InvalidType(found, expected) => {
                let key = error.path.join(".");
                let (span, src) = match error.path.split_last() {
                    Some((field, parents)) => source_for(&error, sources)
                        .and_then(|source| {
                            let section = parents.first().map(String::as_str);
                            locate_entry(&source.content, section, field)
                                .map(|entry| (Some(entry.value), Some(named(source))))
                        })
                        .unwrap_or((None, None)),
                    None => (None, None),
                };
                ConfigError::InvalidType {
                    hint: value_hint(&key, expected),
                    key,
                    found: found.to_string(),
                    expected: expected.to_string(),
                    span,
                    src,
                }
            }
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

/// The document an error's value came from, if it was collected.
///
/// Environment overrides have no document and never match.
fn source_for<'a>(error: &figment::Error, sources: &'a [ConfigSource]) -> Option<&'a ConfigSource> {
    match error.metadata.as_ref()?.source.as_ref()? {
        figment::Source::File(path) => {
            let wanted = canonical(path);
            sources
                .iter()
                .find(|source| canonical(Path::new(&source.name)) == wanted)
        }
        _ => sources.iter().find(|source| source.name == INLINE_SOURCE),
    }
}

fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn named(source: &ConfigSource) -> NamedSource<String> {
    NamedSource::new(&source.name, source.content.clone())
}

/// Print every error to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut report = String::new();
        match handler.render_report(&mut report, error) {
            Ok(()) => eprint!("{report}"),
            Err(_) => eprintln!("emporium: {error}"),
        }
    }
    if errors.len() > 1 {
        eprintln!("emporium: {} problems in configuration", errors.len());
    }
}
