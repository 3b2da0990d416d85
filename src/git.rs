//! Git command wrappers.
//!
//! Thin builders for the git invocations the updater issues. They run in the
//! process's current working directory, which the caller sets up.

use crate::constants::FETCH_HEAD;
use crate::error::Result;
use crate::runner::{CommandRunner, Invocation};

fn git<I, S>(args: I) -> Invocation
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Invocation::new("git", args)
}

/// Rejects refspecs that cannot be passed safely as a single argument.
pub fn validate_refspec(refspec: &str) -> std::result::Result<(), String> {
    if refspec.is_empty() || refspec.contains('\0') || refspec.contains('\n') {
        return Err(format!("invalid refspec: {refspec:?}"));
    }
    Ok(())
}

pub fn fetch_invocation(repo: &str, refspec: &str) -> Invocation {
    git(["fetch", repo, refspec])
}

pub fn checkout_fetch_head_invocation() -> Invocation {
    git(["checkout", FETCH_HEAD])
}

/// `git fetch <repo> <refspec>`
pub fn fetch(runner: &dyn CommandRunner, repo: &str, refspec: &str) -> Result<()> {
    runner.run(&fetch_invocation(repo, refspec))?;
    Ok(())
}

/// `git checkout FETCH_HEAD`
pub fn checkout_fetch_head(runner: &dyn CommandRunner) -> Result<()> {
    runner.run(&checkout_fetch_head_invocation())?;
    Ok(())
}
