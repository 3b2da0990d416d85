//! Command-line arguments and the run configuration derived from them.

use std::path::PathBuf;

use clap::Parser;

use crate::constants::{
    DEFAULT_VERSIONS_URL, LOCAL_REPO_PATH_ENV, VERSIONS_URL_ENV, VIRTUALENV_PATH_ENV,
};

/// Pivovar software updater.
#[derive(Debug, Parser)]
#[command(name = "pivovar-update", version)]
pub struct Cli {
    /// URL of versions file.
    #[arg(long, env = VERSIONS_URL_ENV, default_value = DEFAULT_VERSIONS_URL)]
    pub versions_url: String,

    /// Path to local repo to update.
    #[arg(long, env = LOCAL_REPO_PATH_ENV)]
    pub local_repo_path: Option<PathBuf>,

    /// Path to virtualenv to update.
    #[arg(long, env = VIRTUALENV_PATH_ENV)]
    pub virtualenv_path: Option<PathBuf>,
}

/// Per-invocation settings. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub versions_url: String,
    /// Required only when a git update applies.
    pub local_repo_path: Option<PathBuf>,
    /// Required only when a git update applies.
    pub virtualenv_path: Option<PathBuf>,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        Self {
            versions_url: cli.versions_url,
            local_repo_path: cli.local_repo_path,
            virtualenv_path: cli.virtualenv_path,
        }
    }
}
