//! Test infrastructure for pivovar-update integration tests.
#![allow(dead_code)]

use anyhow::Result;
use pivovar_update::{CommandRunner, Invocation, SystemRunner};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use tempfile::TempDir;

pub const MACHINE_ID: &str = "abc123";

/// Canned `hostnamectl` output for `machine_id`.
pub fn hostnamectl_output(machine_id: &str) -> String {
    format!(
        "   Static hostname: brewery\n        Machine ID: {machine_id}\n           Boot ID: 0f0e0d0c0b0a0908\n            Kernel: Linux 6.1.0\n"
    )
}

/// Runs git in `dir` and returns trimmed stdout.
pub fn run_git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = std::process::Command::new("git")
        .current_dir(dir)
        .args(args)
        .output()?;
    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// A temporary git repository for testing.
/// Automatically cleaned up when dropped.
pub struct TestRepo {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl TestRepo {
    /// Creates a new test repository with an initial commit on the master branch.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("repo");
        std::fs::create_dir(&path)?;

        run_git(&path, &["init", "-b", "master"])?;
        run_git(&path, &["config", "user.email", "test@example.com"])?;
        run_git(&path, &["config", "user.name", "Test User"])?;

        std::fs::write(path.join("README.md"), "# Test Repo\n")?;
        run_git(&path, &["add", "README.md"])?;
        run_git(&path, &["commit", "-m", "Initial commit"])?;

        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    /// Clones `upstream` into a fresh temporary directory.
    pub fn clone_of(upstream: &TestRepo) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("clone");
        run_git(
            temp_dir.path(),
            &["clone", upstream.url(), path.to_str().unwrap()],
        )?;
        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    /// Commits a new file on `branch` (created from HEAD if needed) and
    /// returns the commit id. Leaves `branch` checked out.
    pub fn publish(&self, branch: &str, file: &str) -> Result<String> {
        if run_git(&self.path, &["rev-parse", "--verify", branch]).is_err() {
            run_git(&self.path, &["checkout", "-b", branch])?;
        } else {
            run_git(&self.path, &["checkout", branch])?;
        }
        std::fs::write(self.path.join(file), format!("{file}\n"))?;
        run_git(&self.path, &["add", file])?;
        run_git(&self.path, &["commit", "-m", &format!("Add {file}")])?;
        self.head()
    }

    pub fn head(&self) -> Result<String> {
        run_git(&self.path, &["rev-parse", "HEAD"])
    }

    pub fn file_exists(&self, name: &str) -> bool {
        self.path.join(name).exists()
    }

    pub fn url(&self) -> &str {
        self.path.to_str().unwrap()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A virtualenv whose `bin/pip3` only logs its arguments.
pub struct StubVirtualenv {
    temp_dir: TempDir,
    log: PathBuf,
}

impl StubVirtualenv {
    #[cfg(unix)]
    pub fn new() -> Result<Self> {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new()?;
        let bin = temp_dir.path().join("bin");
        std::fs::create_dir(&bin)?;
        let log = temp_dir.path().join("pip.log");
        let pip = bin.join("pip3");
        std::fs::write(
            &pip,
            format!("#!/bin/sh\nprintf '%s\\n' \"$*\" >> '{}'\n", log.display()),
        )?;
        std::fs::set_permissions(&pip, std::fs::Permissions::from_mode(0o755))?;

        Ok(Self { temp_dir, log })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Argument lines of every pip invocation so far.
    pub fn invocations(&self) -> Result<Vec<String>> {
        if !self.log.exists() {
            return Ok(Vec::new());
        }
        Ok(std::fs::read_to_string(&self.log)?
            .lines()
            .map(String::from)
            .collect())
    }
}

/// One recorded `run` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub argv: Vec<String>,
    pub cwd: PathBuf,
}

/// Runner that answers the identity query with canned output and records
/// every other command together with the working directory it ran in.
///
/// With `execute` set, recorded commands are also run for real.
pub struct RecordingRunner {
    machine_id: String,
    execute: bool,
    calls: RefCell<Vec<Call>>,
}

impl RecordingRunner {
    pub fn new(machine_id: &str) -> Self {
        Self {
            machine_id: machine_id.to_string(),
            execute: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn executing(machine_id: &str) -> Self {
        Self {
            execute: true,
            ..Self::new(machine_id)
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn argvs(&self) -> Vec<Vec<String>> {
        self.calls.borrow().iter().map(|c| c.argv.clone()).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> pivovar_update::Result<ExitStatus> {
        self.calls.borrow_mut().push(Call {
            argv: invocation.argv().into_iter().map(String::from).collect(),
            cwd: std::env::current_dir()?,
        });
        if self.execute {
            SystemRunner.run(invocation)
        } else {
            Ok(success_status())
        }
    }

    fn output(&self, invocation: &Invocation) -> pivovar_update::Result<String> {
        assert_eq!(invocation.program, "hostnamectl");
        Ok(hostnamectl_output(&self.machine_id))
    }
}

#[cfg(unix)]
fn success_status() -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(0)
}

#[cfg(windows)]
fn success_status() -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(0)
}

/// Canonical form of `path` for comparisons across symlinked temp dirs.
pub fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap()
}
