// ABOUTME: Container runtime access: detection, capability traits, bollard adapter.
// ABOUTME: The only boundary the cleanup pipeline talks to.

mod bollard;
mod detection;
mod error;
pub mod traits;
mod types;

pub use self::bollard::BollardRuntime;
pub use detection::{DetectionError, detect_local};
pub use error::{RuntimeError, RuntimeErrorKind};
pub use traits::{
    ContainerError, ContainerOps, ContainerRecord, ContainerState, ImageError, ImageOps,
    ImageRecord, NetworkError, NetworkOps, NetworkRecord, PruneRuntime,
    RuntimeInfo as RuntimeInfoTrait, RuntimeInfoError, RuntimeMetadata, VolumeError, VolumeOps,
    VolumeRecord,
};
pub use types::{ParseRuntimeTypeError, RuntimeConfig, RuntimeInfo, RuntimeType};
