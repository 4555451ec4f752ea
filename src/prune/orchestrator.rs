// ABOUTME: Runs the four cleanup stages in fixed order.
// ABOUTME: Containers go first; their removal frees images, networks, and volumes.

use super::policy;
use crate::output::Output;
use crate::runtime::{
    ContainerError, ContainerOps, ContainerRecord, ImageError, ImageOps, ImageRecord,
    NetworkError, NetworkOps, PruneRuntime, VolumeError, VolumeOps,
};
use crate::types::GracePeriod;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Number of cleanup stages.
pub const STAGE_COUNT: usize = 4;

/// Cleanup settings, resolved from flags and environment before any stage runs.
#[derive(Debug, Clone, Copy)]
pub struct PruneOptions {
    pub grace_period: GracePeriod,
    pub aggressive: bool,
}

/// Result of a single stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageOutcome {
    /// Resources confirmed deleted.
    pub pruned: usize,
    /// Eligible resources that could not be deleted.
    pub failed: usize,
}

/// Per-stage deletion counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneReport {
    pub containers: StageOutcome,
    pub images: StageOutcome,
    pub networks: StageOutcome,
    pub volumes: StageOutcome,
}

/// A stage could not list the resources it operates on. Individual deletion
/// failures are absorbed into the stage outcome instead.
#[derive(Debug, Error)]
pub enum PruneError {
    #[error("failed to list containers: {0}")]
    Containers(#[from] ContainerError),

    #[error("failed to list images: {0}")]
    Images(#[from] ImageError),

    #[error("failed to list networks: {0}")]
    Networks(#[from] NetworkError),

    #[error("failed to list volumes: {0}")]
    Volumes(#[from] VolumeError),
}

/// Run all four cleanup stages in order and report per-stage counts.
///
/// Stage order matters: deleting containers first changes which images,
/// networks, and volumes count as referenced, so each later stage re-derives
/// usage from a fresh container list.
pub async fn run<R: PruneRuntime>(
    runtime: &R,
    options: &PruneOptions,
    output: &Output,
) -> Result<PruneReport, PruneError> {
    Ok(PruneReport {
        containers: prune_containers(runtime, options, output).await?,
        images: prune_images(runtime, options, output).await?,
        networks: prune_networks(runtime, options, output).await?,
        volumes: prune_volumes(runtime, options, output).await?,
    })
}

async fn prune_containers<R: ContainerOps>(
    runtime: &R,
    options: &PruneOptions,
    output: &Output,
) -> Result<StageOutcome, PruneError> {
    output.stage_begin(1, STAGE_COUNT, "containers");
    let now = Utc::now();

    let containers = runtime.list_containers(true).await?;

    let mut outcome = StageOutcome::default();
    for container in &containers {
        if !policy::container_eligible(container, now, options.grace_period) {
            continue;
        }
        match runtime.remove_container(&container.id).await {
            Ok(()) => outcome.pruned += 1,
            Err(e) => record_failure(
                &mut outcome,
                "container",
                container.id.as_str(),
                e.is_transient(),
                &e,
            ),
        }
    }

    output.stage_done(1, STAGE_COUNT, "containers", outcome.pruned);
    Ok(outcome)
}

async fn prune_images<R: ContainerOps + ImageOps>(
    runtime: &R,
    options: &PruneOptions,
    output: &Output,
) -> Result<StageOutcome, PruneError> {
    output.stage_begin(2, STAGE_COUNT, "images");
    let now = Utc::now();

    let containers = runtime.list_containers(true).await?;
    let images = runtime.list_images().await?;
    let referenced = referenced_images(&containers, &images);

    let mut outcome = StageOutcome::default();
    for image in &images {
        let is_referenced = referenced.contains(image.id.as_str());
        if !policy::image_eligible(image, now, options.grace_period, options.aggressive, is_referenced)
        {
            continue;
        }
        match runtime.remove_image(&image.id, true).await {
            Ok(()) => outcome.pruned += 1,
            Err(e) => record_failure(
                &mut outcome,
                "image",
                image.id.as_str(),
                e.is_transient(),
                &e,
            ),
        }
    }

    output.stage_done(2, STAGE_COUNT, "images", outcome.pruned);
    Ok(outcome)
}

async fn prune_networks<R: ContainerOps + NetworkOps>(
    runtime: &R,
    options: &PruneOptions,
    output: &Output,
) -> Result<StageOutcome, PruneError> {
    output.stage_begin(3, STAGE_COUNT, "networks");
    let now = Utc::now();

    let containers = runtime.list_containers(true).await?;
    let attached: HashSet<&str> = containers
        .iter()
        .flat_map(|c| c.networks.iter().map(|n| n.as_str()))
        .collect();

    let networks = runtime.list_networks().await?;

    let mut outcome = StageOutcome::default();
    for network in &networks {
        let in_use = attached.contains(network.id.as_str());
        if !policy::network_eligible(network, now, options.grace_period, in_use) {
            continue;
        }
        match runtime.remove_network(&network.id).await {
            Ok(()) => outcome.pruned += 1,
            Err(e) => record_failure(
                &mut outcome,
                "network",
                network.id.as_str(),
                e.is_transient(),
                &e,
            ),
        }
    }

    output.stage_done(3, STAGE_COUNT, "networks", outcome.pruned);
    Ok(outcome)
}

async fn prune_volumes<R: ContainerOps + VolumeOps>(
    runtime: &R,
    options: &PruneOptions,
    output: &Output,
) -> Result<StageOutcome, PruneError> {
    output.stage_begin(4, STAGE_COUNT, "volumes");
    let now = Utc::now();

    let containers = runtime.list_containers(true).await?;
    let mounted: HashSet<&str> = containers
        .iter()
        .flat_map(|c| c.volumes.iter().map(|v| v.as_str()))
        .collect();

    let volumes = runtime.list_volumes().await?;

    let mut outcome = StageOutcome::default();
    for volume in &volumes {
        let in_use = mounted.contains(volume.id.as_str());
        if !policy::volume_eligible(volume, now, options.grace_period, options.aggressive, in_use) {
            continue;
        }
        match runtime.remove_volume(&volume.id, true).await {
            Ok(()) => outcome.pruned += 1,
            Err(e) => record_failure(
                &mut outcome,
                "volume",
                volume.id.as_str(),
                e.is_transient(),
                &e,
            ),
        }
    }

    output.stage_done(4, STAGE_COUNT, "volumes", outcome.pruned);
    Ok(outcome)
}

/// Image identifiers protected by a container reference, including every
/// ancestor layer of a referenced image.
fn referenced_images<'a>(
    containers: &'a [ContainerRecord],
    images: &'a [ImageRecord],
) -> HashSet<&'a str> {
    let parents: HashMap<&str, &str> = images
        .iter()
        .filter_map(|i| i.parent.as_ref().map(|p| (i.id.as_str(), p.as_str())))
        .collect();

    let mut referenced = HashSet::new();
    for container in containers {
        let mut cursor = Some(container.image.as_str());
        while let Some(id) = cursor {
            // The insert check also terminates on a malformed parent cycle.
            if id.is_empty() || !referenced.insert(id) {
                break;
            }
            cursor = parents.get(id).copied();
        }
    }
    referenced
}

/// Per-resource deletion failures never abort the stage. Races (resource
/// already gone, or grabbed by another process) are expected and logged at
/// debug; anything else is surfaced at warn.
fn record_failure(
    outcome: &mut StageOutcome,
    kind: &str,
    id: &str,
    transient: bool,
    error: &dyn std::fmt::Display,
) {
    outcome.failed += 1;
    if transient {
        tracing::debug!(kind, id, %error, "skipping resource that changed mid-stage");
    } else {
        tracing::warn!(kind, id, %error, "failed to delete resource");
    }
}
