//! qtl - Qt Linguist translation checker
//!
//! qtl is a CLI tool and library for checking the `.ts` translation files of
//! a Qt application (GaussianBeam) against each other and against the C++
//! and Qt Designer sources. It reports unfinished and untranslated messages,
//! placeholder mismatches, messages missing from a locale, messages no
//! longer used in code, and stale `<location>` references. The `optics`
//! module holds the Gaussian beam engine whose user interface those
//! translations cover.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands and actions)
//! - `config`: Configuration file loading and parsing
//! - `core`: Parsers, data model and the shared `CheckContext`
//! - `issues`: Issue type definitions and reporting
//! - `mcp`: Model Context Protocol server implementation
//! - `optics`: Gaussian beam propagation, waist fitting and cavities
//! - `rules`: One module per check
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod mcp;
pub mod optics;
pub mod rules;
pub mod utils;
