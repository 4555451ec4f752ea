// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Flags mirror the GRACE_PERIOD and AGGRESSIVE environment variables.

use clap::Parser;
use skoupa::runtime::RuntimeType;
use skoupa::types::GracePeriod;

#[derive(Parser, Debug)]
#[command(name = "skoupa")]
#[command(about = "Carefully remove idle containers, images, networks, and volumes")]
#[command(version)]
pub struct Cli {
    /// Spare resources created or last stopped within this period.
    /// A number followed by 'm' (minutes) or 'h' (hours).
    #[arg(
        short = 'g',
        long = "grace_period",
        env = "GRACE_PERIOD",
        default_value = "720h",
        value_name = "DURATION"
    )]
    pub grace_period: GracePeriod,

    /// Delete unused images regardless of tags, and unused volumes
    /// regardless of names.
    #[arg(
        short,
        long,
        env = "AGGRESSIVE",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub aggressive: bool,

    /// Container runtime to target (docker or podman). Auto-detected when
    /// omitted.
    #[arg(long, value_name = "RUNTIME")]
    pub runtime: Option<RuntimeType>,

    /// Path to the runtime socket. Overrides auto-detection.
    #[arg(long, value_name = "PATH")]
    pub socket: Option<String>,

    /// Emit one JSON line per stage instead of human-readable output.
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}
