use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use sdw_core::errors::{ErrorInfo, PlanError};
use sdw_core::{BACKUP_SUFFIX, BASE_CONFIGURATION};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::json::to_pretty_json_bytes;

const CONFIGURATIONS_KEY: &str = "configurations";

/// Outcome of the best-effort backup taken before the plans file is rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupStatus {
    Created { path: PathBuf },
    Failed { path: PathBuf, reason: String },
}

/// In-memory nnU-Net v2 plans document.
///
/// Keys other than `configurations` are carried through untouched and in
/// their original order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlansDocument {
    path: PathBuf,
    root: Map<String, Value>,
    configurations: Map<String, Value>,
    base: Value,
}

impl PlansDocument {
    /// Reads and validates the plans document at `path`.
    pub fn load(path: &Path) -> Result<Self, PlanError> {
        let bytes = fs::read(path).map_err(|err| PlanError::io("plans-read", path, &err))?;
        let value: Value = serde_json::from_slice(&bytes).map_err(|err| {
            PlanError::Format(
                ErrorInfo::new("plans-json", format!("plans file is not valid JSON: {err}"))
                    .with_context("path", path.display().to_string()),
            )
        })?;
        let document = Self::from_value(path.to_path_buf(), value)?;
        info!(
            path = %path.display(),
            configurations = document.len(),
            "loaded plans document"
        );
        Ok(document)
    }

    /// Validates an already parsed document that will be persisted to `path`.
    pub fn from_value(path: PathBuf, value: Value) -> Result<Self, PlanError> {
        let Value::Object(mut root) = value else {
            return Err(format_error(
                "plans-root-shape",
                "Unexpected plans format: top level is not an object",
            ));
        };
        let configurations = match root.get_mut(CONFIGURATIONS_KEY).map(Value::take) {
            Some(Value::Object(configurations)) => configurations,
            _ => {
                return Err(format_error(
                    "configurations-missing",
                    "Unexpected plans format: missing configurations mapping",
                ))
            }
        };
        let Some(base) = configurations.get(BASE_CONFIGURATION) else {
            return Err(format_error(
                "base-missing",
                format!("{BASE_CONFIGURATION} configuration not found in plans"),
            ));
        };
        let has_arch_kwargs = base
            .get("architecture")
            .and_then(|architecture| architecture.get("arch_kwargs"))
            .map(Value::is_object)
            .unwrap_or(false);
        if !has_arch_kwargs {
            return Err(format_error(
                "arch-kwargs-missing",
                "Unexpected plans format: missing architecture.arch_kwargs",
            ));
        }
        let base = base.clone();
        Ok(Self {
            path,
            root,
            configurations,
            base,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base configuration every variant is copied from, as loaded from disk.
    pub fn base_entry(&self) -> &Value {
        &self.base
    }

    pub fn contains(&self, name: &str) -> bool {
        self.configurations.contains_key(name)
    }

    /// Configuration names in document order.
    pub fn configuration_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.configurations.keys().map(String::as_str)
    }

    /// Appends (or replaces) a named configuration.
    pub fn insert(&mut self, name: impl Into<String>, entry: Value) {
        self.configurations.insert(name.into(), entry);
    }

    /// Number of configurations currently present.
    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    /// Sibling path receiving the byte-for-byte copy of the original file.
    pub fn backup_path(&self) -> PathBuf {
        let mut raw = OsString::from(self.path.as_os_str());
        raw.push(BACKUP_SUFFIX);
        PathBuf::from(raw)
    }

    /// Copies the on-disk original to the backup path, then overwrites the
    /// plans file with the in-memory document.
    ///
    /// A failed backup is reported, not raised. A failed overwrite is fatal.
    pub fn persist(&self) -> Result<BackupStatus, PlanError> {
        let backup_path = self.backup_path();
        let backup = match fs::copy(&self.path, &backup_path) {
            Ok(_) => {
                info!(backup = %backup_path.display(), "backup created");
                BackupStatus::Created { path: backup_path }
            }
            Err(err) => {
                warn!(backup = %backup_path.display(), error = %err, "failed to create backup");
                BackupStatus::Failed {
                    path: backup_path,
                    reason: err.to_string(),
                }
            }
        };

        let bytes = to_pretty_json_bytes(self)?;
        fs::write(&self.path, bytes).map_err(|err| PlanError::io("plans-write", &self.path, &err))?;
        info!(
            path = %self.path.display(),
            configurations = self.len(),
            "plans document written"
        );
        Ok(backup)
    }
}

impl Serialize for PlansDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.root.len()))?;
        for (key, value) in &self.root {
            if key == CONFIGURATIONS_KEY {
                map.serialize_entry(key, &self.configurations)?;
            } else {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

fn format_error(code: &str, message: impl Into<String>) -> PlanError {
    PlanError::Format(ErrorInfo::new(code, message))
}
