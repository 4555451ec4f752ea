// ABOUTME: Volume operations trait for container runtimes.
// ABOUTME: List volumes and remove dangling ones.

use super::sealed::Sealed;
use super::shared_types::VolumeRecord;
use crate::types::VolumeId;
use async_trait::async_trait;

/// Volume operations needed by the cleanup pipeline.
#[async_trait]
pub trait VolumeOps: Sealed + Send + Sync {
    /// List volumes.
    async fn list_volumes(&self) -> Result<Vec<VolumeRecord>, VolumeError>;

    /// Remove a volume by name.
    async fn remove_volume(&self, id: &VolumeId, force: bool) -> Result<(), VolumeError>;
}

/// Errors from volume operations.
#[derive(Debug, thiserror::Error)]
pub enum VolumeError {
    #[error("volume not found: {0}")]
    NotFound(String),

    #[error("volume in use, cannot remove: {0}")]
    InUse(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}

impl VolumeError {
    /// Whether the failure is an expected race rather than a runtime fault.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InUse(_))
    }
}
