// ABOUTME: Entry point for the skoupa CLI application.
// ABOUTME: Connects to the local container runtime and runs the cleanup once.

mod cli;

use clap::Parser;
use cli::Cli;
use skoupa::error::{Error, Result};
use skoupa::output::{Output, OutputMode};
use skoupa::prune::{self, PruneOptions};
use skoupa::runtime::{
    BollardRuntime, RuntimeConfig, RuntimeError, RuntimeInfoTrait, detect_local,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Normal
    };
    let output = Output::new(mode);

    if let Err(e) = run(cli, &output).await {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    let runtime_config = RuntimeConfig {
        runtime: cli.runtime,
        socket: cli.socket,
    };

    let info = detect_local(Some(&runtime_config)).map_err(RuntimeError::from)?;
    tracing::debug!(
        runtime = %info.runtime_type,
        socket = %info.socket_path,
        "found container runtime"
    );

    let runtime = BollardRuntime::connect(&info).map_err(RuntimeError::from)?;

    // A dead daemon must abort before any stage runs.
    runtime
        .ping()
        .await
        .map_err(|e| Error::RuntimeUnavailable(e.to_string()))?;

    let options = PruneOptions {
        grace_period: cli.grace_period,
        aggressive: cli.aggressive,
    };

    prune::run(&runtime, &options, output).await?;
    Ok(())
}
