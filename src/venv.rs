//! Package installation into a Python virtualenv.

use std::path::{Path, PathBuf};

use crate::constants::{PIP_EXECUTABLE, VENV_BIN_DIR};
use crate::error::Result;
use crate::runner::{CommandRunner, Invocation};

/// Path of the virtualenv's `pip3`.
pub fn pip_path(virtualenv: &Path) -> PathBuf {
    virtualenv.join(VENV_BIN_DIR).join(PIP_EXECUTABLE)
}

/// `<venv>/bin/pip3 install --force-reinstall -e <source>`
pub fn reinstall_editable_invocation(virtualenv: &Path, source: &Path) -> Invocation {
    Invocation::new(
        pip_path(virtualenv).to_string_lossy(),
        [
            "install".to_string(),
            "--force-reinstall".to_string(),
            "-e".to_string(),
            source.to_string_lossy().into_owned(),
        ],
    )
}

/// Force-reinstalls `source` into `virtualenv` as an editable install.
pub fn reinstall_editable(runner: &dyn CommandRunner, virtualenv: &Path, source: &Path) -> Result<()> {
    runner.run(&reinstall_editable_invocation(virtualenv, source))?;
    Ok(())
}
