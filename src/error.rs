//! Error types for the update flow.
//!
//! Every failure aborts the run. Nothing here is retried; the next scheduled
//! invocation is the retry.

use thiserror::Error;

/// Shorthand result type for the library.
pub type Result<T> = std::result::Result<T, UpdateError>;

/// Errors that can occur while resolving, fetching, deciding or updating.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// The manifest server answered with a non-2xx status.
    #[error("problem loading the versions file {url}: HTTP {status}")]
    Fetch { url: String, status: u16 },

    /// The manifest could not be requested at all.
    #[error("failed to request the versions file: {0}")]
    Http(#[from] reqwest::Error),

    /// The manifest body is not a valid YAML mapping.
    #[error("failed to parse the versions file: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A required key was not present.
    #[error("'{key}' not found in {context}")]
    Lookup { key: String, context: String },

    /// The record for this machine is present but unusable.
    #[error("invalid update record for machine {machine_id}: {reason}")]
    InvalidRecord { machine_id: String, reason: String },

    /// A git update applies but a path it needs was not given.
    #[error("{flag} is required for a git update")]
    MissingOption { flag: &'static str },

    /// An external command exited unsuccessfully.
    #[error("command `{command}` failed with {}", exit_description(.code))]
    Command { command: String, code: Option<i32> },

    /// An external command could not be started.
    #[error("failed to execute `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
