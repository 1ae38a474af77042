//! Translatable strings found in source code.
//!
//! Produced by the C++ and Designer form extractors, consumed by the
//! `missing-message` and `unused-message` rules.

use std::collections::HashSet;

use crate::core::{MessageKey, SourceContext};

/// One `tr()`-style call site or Designer `<string>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrCall {
    pub key: MessageKey,
    pub context: SourceContext,
}

impl TrCall {
    pub fn new(key: MessageKey, context: SourceContext) -> Self {
        Self { key, context }
    }
}

/// All call sites across the scanned sources, sorted by file then line.
pub type AllKeyUsages = Vec<TrCall>;

/// Distinct keys used anywhere in the sources.
pub fn used_keys(usages: &[TrCall]) -> HashSet<MessageKey> {
    usages.iter().map(|u| u.key.clone()).collect()
}
