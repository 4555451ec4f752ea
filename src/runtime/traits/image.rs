// ABOUTME: Image operations trait for container runtimes.
// ABOUTME: List local images and remove unused ones.

use super::sealed::Sealed;
use super::shared_types::ImageRecord;
use crate::types::ImageId;
use async_trait::async_trait;

/// Image operations needed by the cleanup pipeline.
#[async_trait]
pub trait ImageOps: Sealed + Send + Sync {
    /// List all local images, including intermediate layers.
    async fn list_images(&self) -> Result<Vec<ImageRecord>, ImageError>;

    /// Remove an image. With `force`, tagged images are removed too.
    async fn remove_image(&self, id: &ImageId, force: bool) -> Result<(), ImageError>;
}

/// Errors from image operations.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("image not found: {0}")]
    NotFound(String),

    #[error("image in use, cannot remove: {0}")]
    InUse(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}

impl ImageError {
    /// Whether the failure is an expected race rather than a runtime fault.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InUse(_))
    }
}
