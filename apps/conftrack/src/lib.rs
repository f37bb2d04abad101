//! Conftrack core library.
//!
//! This crate turns a line-oriented test262 results ledger into categorized
//! feature-support reports (Markdown, JSON, HTML).
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `ledger`: Ledger line grammar and parsing into result records.
//! - `categorize`: Path to category decision table.
//! - `catalog`: ES edition feature catalog and support lookup.
//! - `report`: Categorized model with per-category and global stats.
//! - `render`: Markdown/JSON/HTML renderers and output writing.
//! - `models`: Result records, statuses, aggregate stats.
//! - `output`: Human/JSON console printers.
//! - `version`: Engine version lookup.
//! - `utils`: Supporting helpers.
pub mod catalog;
pub mod categorize;
pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod output;
pub mod render;
pub mod report;
pub mod utils;
pub mod version;

pub use error::{Error, Result};
