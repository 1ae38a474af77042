//! Core analysis engine.
//!
//! ## Module Structure
//!
//! - `data`: Translation file model and source positions
//! - `parsers`: `.ts`, C++ and `.ui` parsers
//! - `placeholders`: Qt `%1`/`%n` marker extraction and comparison
//! - `file_scanner`: Source file discovery
//! - `key_usage`: Translatable strings found in source code
//! - `context`: `CheckContext`, the data every rule reads from
//! - `stats`: Translation progress per file

pub mod context;
pub mod data;
pub mod file_scanner;
pub mod key_usage;
pub mod parsers;
pub mod placeholders;
pub mod stats;

pub use context::CheckContext;
pub use data::*;
pub use key_usage::{AllKeyUsages, TrCall};
