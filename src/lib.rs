//! Machine software updater library.
//!
//! This crate updates a machine's installed software by:
//! - Resolving the machine id from `hostnamectl`
//! - Fetching the versions file and selecting this machine's record
//! - Skipping, or fetching the named refspec with git and checking it out
//! - Force-reinstalling the working copy into a virtualenv

pub mod config;
pub mod constants;
pub mod error;
pub mod git;
pub mod identity;
pub mod manifest;
pub mod output;
pub mod policy;
pub mod repo;
pub mod runner;
pub mod venv;

use tracing::info;

pub use config::RunConfig;
pub use error::{Result, UpdateError};
pub use policy::UpdateOutcome;
pub use repo::UpdateStep;
pub use runner::{CommandRunner, Invocation, SystemRunner};

/// Runs one update check for this machine.
///
/// Every failure aborts the run; nothing is retried.
pub fn run<F>(config: &RunConfig, runner: &dyn CommandRunner, on_step: F) -> Result<UpdateOutcome>
where
    F: Fn(UpdateStep),
{
    let machine_id = identity::resolve_machine_id(runner)?;
    info!("Checking updates for machine with id {}", machine_id);

    let manifest = manifest::fetch_manifest(&config.versions_url)?;
    let record = manifest.record(&machine_id)?;
    let action = policy::decide(&record);
    policy::apply(action, config, runner, on_step)
}
