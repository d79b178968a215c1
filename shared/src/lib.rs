//! Shared types for the catalog image backfill system
//!
//! Contains the domain types, error types, and logging utilities shared
//! between the backfill services and the binary entry point.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
