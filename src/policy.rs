//! Update policy: what to do with a machine's record.

use std::path::Path;

use tracing::{info, warn};

use crate::config::RunConfig;
use crate::error::{Result, UpdateError};
use crate::manifest::{GitUpdateRecord, UpdateRecord};
use crate::repo::{self, UpdateStep};
use crate::runner::CommandRunner;

/// The decision taken for a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Skip,
    GitUpdate(GitUpdateRecord),
    /// Unrecognized packager; nothing is done.
    Ignore { packager: String },
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Skipped,
    Updated { repo: String, refspec: String },
    UnknownPackager { packager: String },
}

pub fn decide(record: &UpdateRecord) -> Action {
    match record {
        UpdateRecord::Skip => Action::Skip,
        UpdateRecord::Git(git) => Action::GitUpdate(git.clone()),
        UpdateRecord::UnknownPackager { packager } => Action::Ignore {
            packager: packager.clone(),
        },
    }
}

/// Carries out `action`. Only a git update runs external commands.
pub fn apply<F>(
    action: Action,
    config: &RunConfig,
    runner: &dyn CommandRunner,
    on_step: F,
) -> Result<UpdateOutcome>
where
    F: Fn(UpdateStep),
{
    match action {
        Action::Skip => {
            info!("Update skipped by the versions file");
            Ok(UpdateOutcome::Skipped)
        }
        Action::GitUpdate(record) => {
            let (local_repo, virtualenv) = git_paths(config)?;
            repo::git_update(&record, local_repo, virtualenv, runner, on_step)?;
            Ok(UpdateOutcome::Updated {
                repo: record.repo,
                refspec: record.refspec,
            })
        }
        Action::Ignore { packager } => {
            warn!("Unknown packager '{}', nothing to do", packager);
            Ok(UpdateOutcome::UnknownPackager { packager })
        }
    }
}

fn git_paths(config: &RunConfig) -> Result<(&Path, &Path)> {
    let local_repo = config
        .local_repo_path
        .as_deref()
        .ok_or(UpdateError::MissingOption {
            flag: "--local-repo-path",
        })?;
    let virtualenv = config
        .virtualenv_path
        .as_deref()
        .ok_or(UpdateError::MissingOption {
            flag: "--virtualenv-path",
        })?;
    Ok((local_repo, virtualenv))
}
