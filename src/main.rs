use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use pivovar_update::config::{Cli, RunConfig};
use pivovar_update::constants::DEFAULT_LOG_FILTER;
use pivovar_update::{SystemRunner, output};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let config = RunConfig::from(Cli::parse());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match update(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            output::print_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn update(config: &RunConfig) -> anyhow::Result<()> {
    let outcome = pivovar_update::run(config, &SystemRunner, |step| output::print_step(&step))
        .with_context(|| format!("Update from {} failed", config.versions_url))?;
    output::print_outcome(&outcome);
    Ok(())
}
