mod commands;
mod terminal;

use std::process::ExitCode;

use anyhow::Context;
use commands::CommandLine;
use pingsweep_common::{config::SweepConfig, network::range::AddressRange};
use pingsweep_core::{
    report::WriterReporter,
    sweep::{self, SweepSummary},
};
use tracing::{debug, error};

use crate::terminal::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let range = match CommandLine::parse_args().and_then(|commands| {
        logging::init_logging(commands.verbose);
        commands.to_range()
    }) {
        Ok(range) => range,
        Err(usage) => {
            println!("{usage}");
            return ExitCode::FAILURE;
        }
    };

    match run(range).await {
        Ok(summary) => {
            debug!(
                probed = summary.probed,
                alive = summary.alive,
                invalid = summary.invalid,
                "sweep finished in {:.2}s",
                summary.elapsed.as_secs_f64()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Runs the blocking sweep off the async runtime's worker threads.
async fn run(range: AddressRange) -> anyhow::Result<SweepSummary> {
    let cfg = SweepConfig::default();

    let summary = tokio::task::spawn_blocking(move || {
        let mut reporter = WriterReporter::stdio();
        sweep::perform_sweep(&range, cfg, &mut reporter)
    })
    .await
    .context("sweep task did not complete")??;

    Ok(summary)
}
