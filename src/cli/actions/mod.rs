//! Actions for processing translation issues.
//!
//! Actions convert Issues into Operations and execute them.
//! This module provides a type-safe way to handle different issue types.
//!
//! ## Architecture
//!
//! ```text
//! Issue (problem detected)
//!     ↓
//! Action (Issue → Operation conversion)
//!     ↓
//! Operation (byte-span removal in a .ts file)
//!     ↓
//! execute (file modification)
//! ```
//!
//! ## Actions
//!
//! - [`RemoveMessage`]: Remove retired messages and emptied contexts (clean)

mod operation;
mod remove_message;
mod traits;

pub use operation::Operation;
pub use remove_message::RemoveMessage;
pub use traits::{Action, ActionStats};
