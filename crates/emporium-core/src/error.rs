// SPDX-FileCopyrightText: 2026 Emporium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Emporium plugin catalog.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type used by catalog loading and configuration glue.
///
/// Query operations on a loaded catalog never produce this type; lookups that
/// miss are represented as empty or absent results.
#[derive(Debug, Error)]
pub enum EmporiumError {
    /// Configuration errors (invalid TOML, bad values, missing paths).
    #[error("configuration error: {0}")]
    Config(String),

    /// A dataset document could not be read from disk.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A dataset document is not valid JSON or does not have the expected shape.
    #[error("malformed {document} document: {source}")]
    Parse {
        document: String,
        source: serde_json::Error,
    },

    /// A single overlay entry is malformed (missing `status`, wrong type, unknown status).
    #[error("malformed overlay entry for {kind} `{name}`: {source}")]
    InvalidOverlay {
        kind: OverlayKind,
        name: String,
        source: serde_json::Error,
    },

    /// Strict-mode consistency checks found problems in the dataset.
    #[error("inconsistent dataset: {}", issues.join("; "))]
    Dataset { issues: Vec<String> },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Which overlay map a malformed entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum OverlayKind {
    #[strum(serialize = "plugin")]
    Plugin,
    #[strum(serialize = "category")]
    Category,
}
