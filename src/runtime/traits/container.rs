// ABOUTME: Container operations trait for container runtimes.
// ABOUTME: List containers and remove stopped ones.

use super::sealed::Sealed;
use super::shared_types::ContainerRecord;
use crate::types::ContainerId;
use async_trait::async_trait;

/// Container operations needed by the cleanup pipeline.
#[async_trait]
pub trait ContainerOps: Sealed + Send + Sync {
    /// List containers. With `all`, stopped containers are included.
    async fn list_containers(&self, all: bool) -> Result<Vec<ContainerRecord>, ContainerError>;

    /// Remove a stopped container.
    async fn remove_container(&self, id: &ContainerId) -> Result<(), ContainerError>;
}

/// Errors from container operations.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("container not found: {0}")]
    NotFound(String),

    #[error("container busy: {0}")]
    Busy(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}

impl ContainerError {
    /// Whether the failure is an expected race (resource already gone, or
    /// grabbed by another process) rather than a runtime fault.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Busy(_))
    }
}
