// ABOUTME: Library root for skoupa - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod error;
pub mod output;
pub mod prune;
pub mod runtime;
pub mod types;
