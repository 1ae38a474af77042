//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes qtl's checks to AI assistants over stdio.
//!
//! ## Module Structure
//!
//! - `server`: Tool router and stdio entry point
//! - `types`: Tool parameters and JSON result types

mod server;
pub mod types;

pub use server::{QtlMcpServer, run_server};
