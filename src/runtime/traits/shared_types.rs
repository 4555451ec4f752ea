// ABOUTME: Shared types used across runtime trait definitions.
// ABOUTME: Resource snapshots returned by the list operations.

use crate::types::{ContainerId, ImageId, NetworkId, VolumeId};
use chrono::{DateTime, Utc};

/// Snapshot of a container at list time.
#[derive(Debug, Clone)]
pub struct ContainerRecord {
    /// Container ID.
    pub id: ContainerId,
    /// Container name without the leading slash.
    pub name: String,
    /// Identifier of the image the container was created from.
    pub image: ImageId,
    /// Current state.
    pub state: ContainerState,
    /// When the container last exited. `None` for containers that never ran
    /// or whose exit time the runtime does not report.
    pub finished_at: Option<DateTime<Utc>>,
    /// Networks the container is attached to.
    pub networks: Vec<NetworkId>,
    /// Named volumes mounted into the container.
    pub volumes: Vec<VolumeId>,
}

/// Container state as reported by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    Exited,
    Dead,
}

impl ContainerState {
    /// States in which a container must never be deleted.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            Self::Running | Self::Paused | Self::Restarting | Self::Removing
        )
    }
}

/// Snapshot of an image at list time.
#[derive(Debug, Clone)]
pub struct ImageRecord {
    /// Image ID, digest prefix stripped.
    pub id: ImageId,
    /// Parent layer, when the runtime tracks one.
    pub parent: Option<ImageId>,
    /// Creation timestamp.
    pub created: Option<DateTime<Utc>>,
    /// Repo tags, with the `<none>:<none>` placeholder filtered out.
    pub tags: Vec<String>,
}

/// Snapshot of a network at list time.
#[derive(Debug, Clone)]
pub struct NetworkRecord {
    /// Network ID.
    pub id: NetworkId,
    /// Network name.
    pub name: String,
    /// Creation timestamp.
    pub created: Option<DateTime<Utc>>,
}

/// Snapshot of a volume at list time.
#[derive(Debug, Clone)]
pub struct VolumeRecord {
    /// Volumes are addressed by name.
    pub id: VolumeId,
    /// Creation timestamp.
    pub created: Option<DateTime<Utc>>,
}

impl VolumeRecord {
    /// Anonymous volumes get a generated 64-character hex name from the
    /// runtime; anything else was named by a user or a compose file.
    pub fn is_anonymous(&self) -> bool {
        let name = self.id.as_str();
        name.len() == 64 && name.chars().all(|c| c.is_ascii_hexdigit())
    }
}

/// Runtime metadata.
#[derive(Debug, Clone)]
pub struct RuntimeMetadata {
    /// Runtime name (e.g., "Docker", "Podman").
    pub name: String,
    /// Runtime version.
    pub version: String,
    /// API version.
    pub api_version: String,
    /// Operating system.
    pub os: String,
    /// Architecture.
    pub arch: String,
}
