//! `run` command handler

use tracing::warn;

use crate::capture::RequestLog;
use crate::cli::args::RunArgs;
use crate::config;
use crate::error::Result;
use crate::runner::{Runner, RunnerOptions};
use crate::transport::HttpTransport;

/// Loads the plan and executes it.
///
/// # Errors
///
/// Returns an error on configuration problems, authentication or
/// transport failures, or the first hard assertion failure.
pub async fn run(args: &RunArgs) -> Result<()> {
    let loaded = config::load(&args.config)?;
    for warning in &loaded.warnings {
        warn!("{warning}");
    }

    let log = args.log.as_deref().map(RequestLog::create).transpose()?;
    let transport = HttpTransport::new(args.insecure)?;
    let options = RunnerOptions {
        random_min: args.random_min,
        random_max: args.random_max,
        strict_types: args.strict_types,
    };

    Runner::new(loaded.plan, transport, options, log).run().await
}
