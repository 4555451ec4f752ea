// ABOUTME: Network operations trait for container runtimes.
// ABOUTME: List networks and remove idle ones.

use super::sealed::Sealed;
use super::shared_types::NetworkRecord;
use crate::types::NetworkId;
use async_trait::async_trait;

/// Network operations needed by the cleanup pipeline.
#[async_trait]
pub trait NetworkOps: Sealed + Send + Sync {
    /// List networks.
    async fn list_networks(&self) -> Result<Vec<NetworkRecord>, NetworkError>;

    /// Remove a network.
    async fn remove_network(&self, id: &NetworkId) -> Result<(), NetworkError>;
}

/// Errors from network operations.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("network not found: {0}")]
    NotFound(String),

    #[error("network in use, cannot remove: {0}")]
    InUse(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}

impl NetworkError {
    /// Whether the failure is an expected race rather than a runtime fault.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InUse(_))
    }
}
