// SPDX-FileCopyrightText: 2026 Emporium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin catalog loader, overlay enrichment and query accessor.
//!
//! The catalog joins two static documents, a plugin list and a metadata
//! overlay keyed by plugin and category name, into enriched plugin records
//! and a category index. Data is loaded once and never mutated.
//!
//! # Usage
//!
//! ```no_run
//! use emporium_catalog::Catalog;
//!
//! let catalog = Catalog::bundled().expect("bundled dataset is valid");
//! for plugin in catalog.featured() {
//!     println!("{} ({})", plugin.name, plugin.category);
//! }
//! ```

pub mod catalog;
pub mod check;
pub mod enrich;
pub mod source;

pub use catalog::{Catalog, Strictness, DEFAULT_FEATURED_LIMIT};
pub use check::{check_dataset, DatasetIssue};
pub use source::{parse_marketplace, parse_meta, Dataset, MarketplaceDocument, MetaDocument};
