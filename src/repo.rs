// Git update of the local working copy and reinstall into the virtualenv

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::error::Result;
use crate::git;
use crate::manifest::GitUpdateRecord;
use crate::runner::CommandRunner;
use crate::venv;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStep {
    EnteringRepo { path: PathBuf },
    Fetching { repo: String, refspec: String },
    CheckingOut,
    RestoringDir,
    Reinstalling,
    Completed,
}

impl fmt::Display for UpdateStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateStep::EnteringRepo { path } => write!(f, "Entering {}", path.display()),
            UpdateStep::Fetching { repo, refspec } => write!(f, "Fetching {refspec} from {repo}"),
            UpdateStep::CheckingOut => write!(f, "Checking out FETCH_HEAD"),
            UpdateStep::RestoringDir => write!(f, "Restoring working directory"),
            UpdateStep::Reinstalling => write!(f, "Reinstalling package"),
            UpdateStep::Completed => write!(f, "Completed"),
        }
    }
}

/// Changes the process working directory and changes it back when dropped.
///
/// The working directory is process-global: only one guard should be live at
/// a time.
#[must_use = "the previous directory is restored when the guard is dropped"]
pub struct WorkingDirGuard {
    previous: PathBuf,
    restored: bool,
}

impl WorkingDirGuard {
    pub fn enter(dir: &Path) -> Result<Self> {
        let previous = env::current_dir()?;
        info!("Changing working dir to: {}.", dir.display());
        env::set_current_dir(dir)?;
        Ok(Self {
            previous,
            restored: false,
        })
    }

    pub fn previous(&self) -> &Path {
        &self.previous
    }

    /// Restores the previous directory, reporting failure to the caller.
    pub fn restore(mut self) -> Result<()> {
        self.restored = true;
        self.change_back()?;
        Ok(())
    }

    fn change_back(&self) -> std::io::Result<()> {
        info!("Changing working dir back to: {}.", self.previous.display());
        env::set_current_dir(&self.previous)
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        if let Err(e) = self.change_back() {
            error!(
                "Failed to restore working dir {}: {}",
                self.previous.display(),
                e
            );
        }
    }
}

/// Fetches `record.refspec` into `local_repo`, checks out `FETCH_HEAD`, and
/// force-reinstalls the repository into `virtualenv`.
///
/// Fetch and checkout run inside `local_repo`; the previous working directory
/// is restored before any error from them propagates. The reinstall runs
/// from the restored directory with `local_repo` passed as given.
pub fn git_update<F>(
    record: &GitUpdateRecord,
    local_repo: &Path,
    virtualenv: &Path,
    runner: &dyn CommandRunner,
    on_step: F,
) -> Result<()>
where
    F: Fn(UpdateStep),
{
    on_step(UpdateStep::EnteringRepo {
        path: local_repo.to_path_buf(),
    });
    let guard = WorkingDirGuard::enter(local_repo)?;

    on_step(UpdateStep::Fetching {
        repo: record.repo.clone(),
        refspec: record.refspec.clone(),
    });
    git::fetch(runner, &record.repo, &record.refspec)?;

    on_step(UpdateStep::CheckingOut);
    git::checkout_fetch_head(runner)?;

    on_step(UpdateStep::RestoringDir);
    guard.restore()?;

    on_step(UpdateStep::Reinstalling);
    venv::reinstall_editable(runner, virtualenv, local_repo)?;

    on_step(UpdateStep::Completed);
    Ok(())
}
