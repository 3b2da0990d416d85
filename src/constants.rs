//! Application-wide constants.
//!
//! Centralized names and defaults so the flow carries no magic strings.

/// Manifest location used when `--versions-url` is not given.
pub const DEFAULT_VERSIONS_URL: &str =
    "https://raw.githubusercontent.com/jaryn/pivovar-versions/master/v2018-08-07";

/// Environment fallbacks for the CLI flags.
pub const VERSIONS_URL_ENV: &str = "PIVOVAR_VERSIONS_URL";
pub const LOCAL_REPO_PATH_ENV: &str = "PIVOVAR_LOCAL_REPO_PATH";
pub const VIRTUALENV_PATH_ENV: &str = "PIVOVAR_VIRTUALENV_PATH";

/// Command that reports the host's identity as `key: value` lines.
pub const IDENTITY_COMMAND: &str = "hostnamectl";

/// Key of the machine identifier in the identity command's output.
pub const MACHINE_ID_KEY: &str = "Machine ID";

/// The only packager with an update implementation.
pub const GIT_PACKAGER: &str = "git";

/// Ref written by `git fetch` and checked out afterwards.
pub const FETCH_HEAD: &str = "FETCH_HEAD";

/// Directory holding executables inside a virtualenv.
#[cfg(not(windows))]
pub const VENV_BIN_DIR: &str = "bin";
#[cfg(windows)]
pub const VENV_BIN_DIR: &str = "Scripts";

/// Package installer inside the virtualenv's executable directory.
#[cfg(not(windows))]
pub const PIP_EXECUTABLE: &str = "pip3";
#[cfg(windows)]
pub const PIP_EXECUTABLE: &str = "pip3.exe";

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "debug";
