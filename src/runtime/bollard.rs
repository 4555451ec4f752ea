// ABOUTME: Bollard-based container runtime implementation.
// ABOUTME: Supports both Docker and Podman via Docker-compatible API.

use crate::runtime::traits::sealed::Sealed;
use crate::runtime::traits::{
    ContainerError, ContainerOps, ContainerRecord, ContainerState, ImageError, ImageOps,
    ImageRecord, NetworkError, NetworkOps, NetworkRecord, RuntimeInfo, RuntimeInfoError,
    RuntimeMetadata, VolumeError, VolumeOps, VolumeRecord,
};
use crate::runtime::types::RuntimeType;
use crate::types::{ContainerId, ImageId, NetworkId, VolumeId};
use async_trait::async_trait;
use bollard::Docker;
use bollard::models::{ContainerSummary, ContainerSummaryStateEnum, ImageSummary, MountPointTypeEnum};
use bollard::query_parameters::{
    InspectContainerOptions, ListContainersOptions, ListImagesOptions, ListNetworksOptions,
    ListVolumesOptions, RemoveContainerOptions, RemoveImageOptions, RemoveVolumeOptions,
};
use chrono::{DateTime, Utc};

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn map_container_remove_error(e: bollard::errors::Error) -> ContainerError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => ContainerError::NotFound(message.clone()),
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 409 => ContainerError::Busy(message.clone()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_image_remove_error(e: bollard::errors::Error, image_name: &str) -> ImageError {
    match &e {
        bollard::errors::Error::DockerResponseServerError { status_code, .. }
            if *status_code == 404 =>
        {
            ImageError::NotFound(image_name.to_string())
        }
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 409 => ImageError::InUse(message.clone()),
        _ => ImageError::Runtime(format!("failed to remove {}: {}", image_name, e)),
    }
}

fn map_network_remove_error(e: bollard::errors::Error) -> NetworkError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => NetworkError::NotFound(message.clone()),
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 403 => NetworkError::InUse(message.clone()),
        _ => NetworkError::Runtime(e.to_string()),
    }
}

fn map_volume_remove_error(e: bollard::errors::Error) -> VolumeError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => VolumeError::NotFound(message.clone()),
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 409 => VolumeError::InUse(message.clone()),
        _ => VolumeError::Runtime(e.to_string()),
    }
}

// =============================================================================
// Snapshot Mapping Helpers
// =============================================================================

/// Image identifiers are compared with the digest algorithm prefix removed.
fn trim_digest(id: &str) -> &str {
    id.strip_prefix("sha256:").unwrap_or(id)
}

/// The runtime reports containers that never ran with a year-one exit time.
fn parse_finished_at(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() || raw.starts_with("0001-") {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

fn timestamp_from_unix(secs: i64) -> Option<DateTime<Utc>> {
    if secs <= 0 {
        return None;
    }
    DateTime::from_timestamp(secs, 0)
}

fn map_summary_state(state: ContainerSummaryStateEnum) -> ContainerState {
    match state {
        ContainerSummaryStateEnum::CREATED => ContainerState::Created,
        ContainerSummaryStateEnum::RUNNING => ContainerState::Running,
        ContainerSummaryStateEnum::PAUSED => ContainerState::Paused,
        ContainerSummaryStateEnum::RESTARTING => ContainerState::Restarting,
        ContainerSummaryStateEnum::REMOVING => ContainerState::Removing,
        ContainerSummaryStateEnum::EXITED => ContainerState::Exited,
        ContainerSummaryStateEnum::DEAD => ContainerState::Dead,
        // Anything unreported is treated as live so it is never deleted.
        _ => ContainerState::Running,
    }
}

fn image_record(summary: ImageSummary) -> ImageRecord {
    let parent = trim_digest(&summary.parent_id);
    let parent = if parent.is_empty() {
        None
    } else {
        Some(ImageId::new(parent.to_string()))
    };

    ImageRecord {
        id: ImageId::new(trim_digest(&summary.id).to_string()),
        parent,
        created: timestamp_from_unix(summary.created),
        tags: summary
            .repo_tags
            .into_iter()
            .filter(|t| t != "<none>:<none>")
            .collect(),
    }
}

// =============================================================================
// BollardRuntime
// =============================================================================

/// Container runtime implementation using bollard.
///
/// Supports both Docker and Podman via the Docker-compatible API.
pub struct BollardRuntime {
    client: Docker,
    runtime_type: RuntimeType,
}

impl BollardRuntime {
    /// Create a new BollardRuntime from a Docker client.
    pub fn new(client: Docker, runtime_type: RuntimeType) -> Self {
        Self {
            client,
            runtime_type,
        }
    }

    /// Connect to a container runtime using detected runtime info.
    ///
    /// Use with `detect_local()` to connect to a runtime.
    pub fn connect(info: &super::types::RuntimeInfo) -> Result<Self, RuntimeInfoError> {
        let client =
            Docker::connect_with_unix(&info.socket_path, 120, bollard::API_DEFAULT_VERSION)
                .map_err(|e| RuntimeInfoError::ConnectionFailed(e.to_string()))?;
        Ok(Self::new(client, info.runtime_type))
    }

    /// Get the runtime type (Docker or Podman).
    pub fn runtime_type(&self) -> RuntimeType {
        self.runtime_type
    }

    /// Exit time of a stopped container, via inspect.
    ///
    /// Containers that vanish or fail to inspect get `None`, which the
    /// eligibility policy treats as never old enough to delete.
    async fn finished_at(&self, id: &ContainerId) -> Option<DateTime<Utc>> {
        let details = match self
            .client
            .inspect_container(id.as_str(), None::<InspectContainerOptions>)
            .await
        {
            Ok(details) => details,
            Err(e) => {
                tracing::debug!(container = %id, error = %e, "inspect failed, exit time unknown");
                return None;
            }
        };

        details
            .state
            .and_then(|s| s.finished_at)
            .and_then(|raw| parse_finished_at(&raw))
    }

    async fn container_record(&self, summary: ContainerSummary) -> ContainerRecord {
        let id = ContainerId::new(summary.id.unwrap_or_default());

        let name = summary
            .names
            .unwrap_or_default()
            .first()
            .map(|n| n.trim_start_matches('/').to_string())
            .unwrap_or_default();

        let image_id = summary.image_id.unwrap_or_default();
        let image = ImageId::new(trim_digest(&image_id).to_string());

        let state = summary
            .state
            .map(map_summary_state)
            .unwrap_or(ContainerState::Running);

        // The list endpoint does not carry exit times; only stopped
        // containers are worth the extra inspect round-trip.
        let finished_at = if state.is_active() {
            None
        } else {
            self.finished_at(&id).await
        };

        let networks = summary
            .network_settings
            .and_then(|s| s.networks)
            .map(|nets| {
                nets.into_values()
                    .filter_map(|endpoint| endpoint.network_id)
                    .filter(|id| !id.is_empty())
                    .map(NetworkId::new)
                    .collect()
            })
            .unwrap_or_default();

        let volumes = summary
            .mounts
            .unwrap_or_default()
            .into_iter()
            .filter(|m| m.typ == Some(MountPointTypeEnum::VOLUME))
            .filter_map(|m| m.name)
            .map(VolumeId::new)
            .collect();

        ContainerRecord {
            id,
            name,
            image,
            state,
            finished_at,
            networks,
            volumes,
        }
    }
}

// Implement Sealed trait to allow runtime trait implementations
impl Sealed for BollardRuntime {}

#[async_trait]
impl RuntimeInfo for BollardRuntime {
    async fn info(&self) -> Result<RuntimeMetadata, RuntimeInfoError> {
        let info = self
            .client
            .info()
            .await
            .map_err(|e| RuntimeInfoError::ConnectionFailed(e.to_string()))?;

        let name = match self.runtime_type {
            RuntimeType::Docker => "Docker".to_string(),
            RuntimeType::Podman => "Podman".to_string(),
        };

        Ok(RuntimeMetadata {
            name,
            version: info.server_version.unwrap_or_default(),
            api_version: bollard::API_DEFAULT_VERSION.to_string(),
            os: info.operating_system.unwrap_or_default(),
            arch: info.architecture.unwrap_or_default(),
        })
    }

    async fn ping(&self) -> Result<(), RuntimeInfoError> {
        self.client
            .ping()
            .await
            .map_err(|e| RuntimeInfoError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ContainerOps for BollardRuntime {
    async fn list_containers(&self, all: bool) -> Result<Vec<ContainerRecord>, ContainerError> {
        let opts = ListContainersOptions {
            all,
            ..Default::default()
        };

        // Podman reports "stopping" as a container state during shutdown, but
        // bollard doesn't recognize it and fails deserialization. Retry after
        // a short delay since "stopping" is a transient state.
        let mut summaries = None;
        let mut last_error = None;
        for attempt in 0..3 {
            match self.client.list_containers(Some(opts.clone())).await {
                Ok(list) => {
                    summaries = Some(list);
                    break;
                }
                Err(e) => {
                    let err_str = e.to_string();
                    if (err_str.contains("unknown variant `stopping`")
                        || err_str.contains("unknown variant `stopped`"))
                        && attempt < 2
                    {
                        tokio::time::sleep(std::time::Duration::from_millis(500)).await;
                        last_error = Some(err_str);
                        continue;
                    }
                    return Err(ContainerError::Runtime(err_str));
                }
            }
        }

        let summaries = match summaries {
            Some(list) => list,
            None => {
                return Err(ContainerError::Runtime(
                    last_error.unwrap_or_else(|| "list_containers failed".to_string()),
                ));
            }
        };

        let mut records = Vec::with_capacity(summaries.len());
        for summary in summaries {
            records.push(self.container_record(summary).await);
        }
        Ok(records)
    }

    async fn remove_container(&self, id: &ContainerId) -> Result<(), ContainerError> {
        // No force: anything we delete is already stopped, and a container
        // that started up again mid-stage must survive.
        let opts = RemoveContainerOptions {
            force: false,
            ..Default::default()
        };

        self.client
            .remove_container(id.as_str(), Some(opts))
            .await
            .map_err(map_container_remove_error)
    }
}

#[async_trait]
impl ImageOps for BollardRuntime {
    async fn list_images(&self) -> Result<Vec<ImageRecord>, ImageError> {
        let opts = ListImagesOptions {
            all: true,
            ..Default::default()
        };

        let summaries = self
            .client
            .list_images(Some(opts))
            .await
            .map_err(|e| ImageError::Runtime(e.to_string()))?;

        Ok(summaries.into_iter().map(image_record).collect())
    }

    async fn remove_image(&self, id: &ImageId, force: bool) -> Result<(), ImageError> {
        let opts = RemoveImageOptions {
            force,
            ..Default::default()
        };

        self.client
            .remove_image(id.as_str(), Some(opts), None)
            .await
            .map_err(|e| map_image_remove_error(e, id.as_str()))?;

        Ok(())
    }
}

#[async_trait]
impl NetworkOps for BollardRuntime {
    async fn list_networks(&self) -> Result<Vec<NetworkRecord>, NetworkError> {
        let networks = self
            .client
            .list_networks(None::<ListNetworksOptions>)
            .await
            .map_err(|e| NetworkError::Runtime(e.to_string()))?;

        Ok(networks
            .into_iter()
            .filter_map(|n| {
                let id = n.id?;
                Some(NetworkRecord {
                    id: NetworkId::new(id),
                    name: n.name.unwrap_or_default(),
                    created: n.created,
                })
            })
            .collect())
    }

    async fn remove_network(&self, id: &NetworkId) -> Result<(), NetworkError> {
        self.client
            .remove_network(id.as_str())
            .await
            .map_err(map_network_remove_error)
    }
}

#[async_trait]
impl VolumeOps for BollardRuntime {
    async fn list_volumes(&self) -> Result<Vec<VolumeRecord>, VolumeError> {
        let response = self
            .client
            .list_volumes(None::<ListVolumesOptions>)
            .await
            .map_err(|e| VolumeError::Runtime(e.to_string()))?;

        Ok(response
            .volumes
            .unwrap_or_default()
            .into_iter()
            .map(|v| VolumeRecord {
                id: VolumeId::new(v.name),
                created: v.created_at,
            })
            .collect())
    }

    async fn remove_volume(&self, id: &VolumeId, force: bool) -> Result<(), VolumeError> {
        let opts = RemoveVolumeOptions {
            force,
            ..Default::default()
        };

        self.client
            .remove_volume(id.as_str(), Some(opts))
            .await
            .map_err(map_volume_remove_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_digest_prefix() {
        assert_eq!(trim_digest("sha256:abcdef"), "abcdef");
        assert_eq!(trim_digest("abcdef"), "abcdef");
        assert_eq!(trim_digest(""), "");
    }

    #[test]
    fn parses_real_exit_times() {
        let t = parse_finished_at("2026-02-01T10:30:00.123456789Z").unwrap();
        assert_eq!(t.timezone(), Utc);
    }

    #[test]
    fn zero_value_exit_time_is_unknown() {
        assert!(parse_finished_at("0001-01-01T00:00:00Z").is_none());
        assert!(parse_finished_at("").is_none());
        assert!(parse_finished_at("not a timestamp").is_none());
    }

    #[test]
    fn unix_timestamps_reject_zero_and_negative() {
        assert!(timestamp_from_unix(0).is_none());
        assert!(timestamp_from_unix(-5).is_none());
        assert!(timestamp_from_unix(1_700_000_000).is_some());
    }

    #[test]
    fn image_records_drop_placeholder_tags() {
        let summary = ImageSummary {
            id: "sha256:aaa".to_string(),
            parent_id: String::new(),
            repo_tags: vec!["<none>:<none>".to_string()],
            repo_digests: Vec::new(),
            created: 1_700_000_000,
            size: 0,
            shared_size: 0,
            labels: Default::default(),
            containers: 0,
            ..Default::default()
        };

        let record = image_record(summary);
        assert_eq!(record.id.as_str(), "aaa");
        assert!(record.parent.is_none());
        assert!(record.tags.is_empty());
        assert!(record.created.is_some());
    }

    #[test]
    fn remove_errors_classify_conflicts_as_transient() {
        let busy = map_container_remove_error(bollard::errors::Error::DockerResponseServerError {
            status_code: 409,
            message: "removal in progress".to_string(),
        });
        assert!(busy.is_transient());

        let gone = map_volume_remove_error(bollard::errors::Error::DockerResponseServerError {
            status_code: 404,
            message: "no such volume".to_string(),
        });
        assert!(gone.is_transient());

        let fault = map_network_remove_error(bollard::errors::Error::DockerResponseServerError {
            status_code: 500,
            message: "server error".to_string(),
        });
        assert!(!fault.is_transient());
    }
}
