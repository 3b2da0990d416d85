//! Machine identity resolution from `hostnamectl` output.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::constants::{IDENTITY_COMMAND, MACHINE_ID_KEY};
use crate::error::{Result, UpdateError};
use crate::runner::{CommandRunner, Invocation};

/// Opaque identifier of the host, used as the manifest key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MachineIdentity(String);

impl MachineIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MachineIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parses `key: value` lines leniently.
///
/// Each line is split on its first colon, so values may contain further
/// colons. Lines without a colon, or with an empty key or value, are skipped.
pub fn parse_key_values(text: &str) -> BTreeMap<String, String> {
    text.lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            let (key, value) = (key.trim(), value.trim());
            (!key.is_empty() && !value.is_empty()).then(|| (key.to_string(), value.to_string()))
        })
        .collect()
}

/// Extracts the machine id from identity-command output.
pub fn machine_id_from(text: &str) -> Result<MachineIdentity> {
    parse_key_values(text)
        .remove(MACHINE_ID_KEY)
        .map(MachineIdentity)
        .ok_or_else(|| UpdateError::Lookup {
            key: MACHINE_ID_KEY.to_string(),
            context: format!("{IDENTITY_COMMAND} output"),
        })
}

/// Queries the system for its machine id.
pub fn resolve_machine_id(runner: &dyn CommandRunner) -> Result<MachineIdentity> {
    let output = runner.output(&Invocation::new(IDENTITY_COMMAND, Vec::<String>::new()))?;
    let id = machine_id_from(&output)?;
    debug!(machine_id = %id, "resolved machine identity");
    Ok(id)
}
