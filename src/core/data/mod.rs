//! Core data types used across all pipeline phases.
//!
//! ## Module Structure
//!
//! - `message`: Translation file model (TranslationFile, TranslationEntry, MessageKey)
//! - `source`: Source code location types (SourceContext, SourceLocation)

pub mod message;
pub mod source;

pub use message::{
    LocationHint, MessageContext, MessageKey, MessageLocation, TranslationContext,
    TranslationEntry, TranslationFile, TranslationState,
};
pub use source::{SourceContext, SourceLocation};
