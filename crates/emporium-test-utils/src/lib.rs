// SPDX-FileCopyrightText: 2026 Emporium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Emporium integration tests.
//!
//! Provides [`CatalogFixture`], a builder for small datasets that can be
//! turned into a [`Dataset`], a [`Catalog`], JSON documents, or files on disk.

pub mod fixture;

pub use fixture::{overlay, raw_plugin, CatalogFixture, FixtureFiles};

pub use emporium_catalog::{Catalog, Dataset};
