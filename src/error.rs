// ABOUTME: Application-wide error types for skoupa.
// ABOUTME: Uses thiserror for ergonomic error handling.

use crate::prune::PruneError;
use crate::runtime::RuntimeError;
use thiserror::Error;

/// Fatal errors. Per-resource deletion failures never surface here; they are
/// absorbed into the per-stage counts.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("container runtime unavailable: {0}")]
    RuntimeUnavailable(String),

    #[error(transparent)]
    Prune(#[from] PruneError),
}

pub type Result<T> = std::result::Result<T, Error>;
