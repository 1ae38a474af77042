//! Rule implementations for qtl.
//!
//! Each rule is a pure function over the inputs it needs (translation
//! files, key usages, config flags) plus a thin `check_*_issues` wrapper
//! that pulls those inputs from a [`CheckContext`](crate::core::CheckContext).
//! Every rule returns its issues sorted by file, line, then message.
//!
//! ## Module Structure
//!
//! - `helpers`: Shared sorting and test fixtures
//! - `empty_source`: Messages with an empty source text
//! - `duplicate`: Same message defined twice in one file
//! - `placeholder`: `%1`/`%n` markers that differ from the source
//! - `unfinished`: Messages awaiting translation
//! - `untranslated`: Translations identical to the source
//! - `obsolete`: Messages retired by `lupdate`
//! - `missing`: Strings used in code but absent from translation files
//! - `unused`: Messages no source file uses
//! - `stale_location`: `<location>` hints pointing at missing files or lines

pub mod duplicate;
pub mod empty_source;
pub mod helpers;
pub mod missing;
pub mod obsolete;
pub mod placeholder;
pub mod stale_location;
pub mod unfinished;
pub mod untranslated;
pub mod unused;
