//! Remote versions manifest: fetching, parsing and record validation.
//!
//! The manifest is a YAML mapping from machine id to an update record. It is
//! fetched fresh on every run and never cached. Only the record for the
//! current machine is validated; the rest of the document is left untouched.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_yaml::Value;
use tracing::{debug, info};

use crate::constants::GIT_PACKAGER;
use crate::error::{Result, UpdateError};
use crate::git;
use crate::identity::MachineIdentity;

/// Parameters of a git update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitUpdateRecord {
    /// Repository URL (or path) to fetch from.
    pub repo: String,
    /// Refspec naming what to fetch.
    pub refspec: String,
}

/// Validated per-machine update instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateRecord {
    /// Explicit opt-out: nothing to do.
    Skip,
    Git(GitUpdateRecord),
    /// A packager this tool does not implement.
    UnknownPackager { packager: String },
}

/// A record as written in the manifest, before validation.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "skip-update", default)]
    skip_update: Value,
    packager: Option<String>,
    repo: Option<String>,
    refspec: Option<String>,
}

impl RawRecord {
    fn validate(self, machine_id: &MachineIdentity) -> Result<UpdateRecord> {
        if is_truthy(&self.skip_update) {
            return Ok(UpdateRecord::Skip);
        }

        let invalid = |reason: &str| UpdateError::InvalidRecord {
            machine_id: machine_id.to_string(),
            reason: reason.to_string(),
        };

        match self.packager.as_deref() {
            None => Err(invalid("missing 'packager'")),
            Some(GIT_PACKAGER) => {
                let repo = self
                    .repo
                    .filter(|repo| !repo.is_empty())
                    .ok_or_else(|| invalid("git packager requires 'repo'"))?;
                let refspec = self
                    .refspec
                    .filter(|refspec| !refspec.is_empty())
                    .ok_or_else(|| invalid("git packager requires 'refspec'"))?;
                git::validate_refspec(&refspec).map_err(|reason| invalid(&reason))?;
                Ok(UpdateRecord::Git(GitUpdateRecord { repo, refspec }))
            }
            Some(other) => Ok(UpdateRecord::UnknownPackager {
                packager: other.to_string(),
            }),
        }
    }
}

/// YAML truthiness for the `skip-update` flag.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Sequence(items) => !items.is_empty(),
        Value::Mapping(entries) => !entries.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

/// Mapping from machine id to its raw update record.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    records: BTreeMap<String, Value>,
}

impl Manifest {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up and validates the record for `machine_id`.
    ///
    /// The key must match exactly. There is no default record.
    pub fn record(&self, machine_id: &MachineIdentity) -> Result<UpdateRecord> {
        let raw = self
            .records
            .get(machine_id.as_str())
            .ok_or_else(|| UpdateError::Lookup {
                key: machine_id.to_string(),
                context: "versions file".to_string(),
            })?;

        let raw: RawRecord =
            serde_yaml::from_value(raw.clone()).map_err(|e| UpdateError::InvalidRecord {
                machine_id: machine_id.to_string(),
                reason: e.to_string(),
            })?;

        let record = raw.validate(machine_id)?;
        debug!(?record, "selected update record");
        Ok(record)
    }
}

/// Parses a manifest document. An empty or `null` document is an empty manifest.
pub fn parse_manifest(text: &str) -> Result<Manifest> {
    if text.trim().is_empty() {
        return Ok(Manifest::default());
    }
    let records: Option<BTreeMap<String, Value>> = serde_yaml::from_str(text)?;
    Ok(Manifest {
        records: records.unwrap_or_default(),
    })
}

/// Downloads and parses the manifest at `url`.
pub fn fetch_manifest(url: &str) -> Result<Manifest> {
    info!("Loading versions file from {}", url);
    let response = reqwest::blocking::get(url)?;

    let status = response.status();
    if !status.is_success() {
        return Err(UpdateError::Fetch {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let manifest = parse_manifest(&response.text()?)?;
    debug!(records = manifest.len(), "parsed versions file");
    Ok(manifest)
}
