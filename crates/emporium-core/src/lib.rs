// SPDX-FileCopyrightText: 2026 Emporium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Emporium plugin catalog.
//!
//! This crate provides the domain types and the error type shared by the
//! catalog loader, the configuration system and the inspection CLI.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{EmporiumError, OverlayKind};
pub use types::{
    Category, CategoryMeta, Plugin, PluginOverlay, PluginSource, PluginStatus, RawPlugin,
};
