// ABOUTME: Composable capability traits for container runtimes.
// ABOUTME: One trait per resource kind, plus the PruneRuntime umbrella.

mod container;
mod image;
mod network;
mod runtime_info;
pub(crate) mod sealed;
mod shared_types;
mod volume;

pub use container::{ContainerError, ContainerOps};
pub use image::{ImageError, ImageOps};
pub use network::{NetworkError, NetworkOps};
pub use runtime_info::{RuntimeInfo, RuntimeInfoError};
pub use shared_types::*;
pub use volume::{VolumeError, VolumeOps};

/// Everything the cleanup pipeline needs from a runtime.
pub trait PruneRuntime: ContainerOps + ImageOps + NetworkOps + VolumeOps {}

impl<T: ContainerOps + ImageOps + NetworkOps + VolumeOps> PruneRuntime for T {}
