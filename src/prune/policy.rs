// ABOUTME: Pure eligibility predicates for the four resource kinds.
// ABOUTME: Stateless; deletion decisions are made from snapshots alone.

use crate::runtime::{ContainerRecord, ImageRecord, NetworkRecord, VolumeRecord};
use crate::types::GracePeriod;
use chrono::{DateTime, Utc};

/// Built-in networks that must never be deleted, regardless of age, usage,
/// or aggressive mode. `podman` is the default network on Podman hosts.
pub const RESERVED_NETWORKS: &[&str] = &["bridge", "host", "none", "podman"];

/// A stopped container is eligible once it has been stopped for at least the
/// grace period. Containers in an active state are never eligible, regardless
/// of age.
pub fn container_eligible(
    container: &ContainerRecord,
    now: DateTime<Utc>,
    grace: GracePeriod,
) -> bool {
    if container.state.is_active() {
        return false;
    }
    older_than(container.finished_at, now, grace)
}

/// An image is eligible when no container references it (directly or as an
/// ancestor layer of a referenced image), it is older than the grace period,
/// and it carries no tags. Aggressive mode ignores tags.
pub fn image_eligible(
    image: &ImageRecord,
    now: DateTime<Utc>,
    grace: GracePeriod,
    aggressive: bool,
    referenced: bool,
) -> bool {
    !referenced && older_than(image.created, now, grace) && (aggressive || image.tags.is_empty())
}

/// A network is eligible when no container is attached and it is older than
/// the grace period. Reserved networks are excluded unconditionally.
pub fn network_eligible(
    network: &NetworkRecord,
    now: DateTime<Utc>,
    grace: GracePeriod,
    in_use: bool,
) -> bool {
    if RESERVED_NETWORKS.contains(&network.name.as_str()) {
        return false;
    }
    !in_use && older_than(network.created, now, grace)
}

/// A volume is eligible when no container mounts it, it is older than the
/// grace period, and its name is anonymous. Aggressive mode also deletes
/// named volumes.
pub fn volume_eligible(
    volume: &VolumeRecord,
    now: DateTime<Utc>,
    grace: GracePeriod,
    aggressive: bool,
    in_use: bool,
) -> bool {
    !in_use && older_than(volume.created, now, grace) && (aggressive || volume.is_anonymous())
}

/// Resources with an unknown timestamp are never old enough to delete.
fn older_than(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>, grace: GracePeriod) -> bool {
    match timestamp {
        Some(t) => now.signed_duration_since(t) >= grace.delta(),
        None => false,
    }
}
