//! Shared error types for the catalog backfill system

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Unknown run mode: {input} (expected \"incremental\" or \"full\")")]
    InvalidRunMode { input: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
