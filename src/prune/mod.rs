// ABOUTME: The cleanup pipeline: eligibility policy and stage orchestration.
// ABOUTME: Four fixed-order stages: containers, images, networks, volumes.

mod orchestrator;
pub mod policy;

pub use orchestrator::{
    PruneError, PruneOptions, PruneReport, STAGE_COUNT, StageOutcome, run,
};
