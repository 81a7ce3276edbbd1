//! Structured error types shared across the plan variant crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Diagnostic carried by every [`PlanError`]: what went wrong with the plans
/// root, the dataset folder or the plans document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable kebab-case code such as `dataset-missing` or `base-missing`.
    pub code: String,
    /// One-line message shown after `Error:` by the CLI.
    pub message: String,
    /// Sorted key/value details, e.g. `path` or `prefix`.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Suggested fix, e.g. which variable to export or flag to pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a diagnostic with no context or hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records a path, dataset id or prefix relevant to the failure.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches a suggested fix.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for plan resolution, loading and generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum PlanError {
    /// A required precondition (such as the plans root) is unset.
    #[error("configuration error: {0}")]
    Configuration(ErrorInfo),
    /// The dataset folder or its plans file does not exist.
    #[error("not found: {0}")]
    NotFound(ErrorInfo),
    /// The plans document is not JSON or lacks required structure.
    #[error("format error: {0}")]
    Format(ErrorInfo),
    /// Filesystem read or write failures.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Encoding failures for reports and documents.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        let mut pairs = self.context.iter();
        if let Some((key, value)) = pairs.next() {
            write!(f, " | context: [{key}={value}")?;
            for (key, value) in pairs {
                write!(f, ", {key}={value}")?;
            }
            f.write_str("]")?;
        }
        match &self.hint {
            Some(hint) => write!(f, " | hint: {hint}"),
            None => Ok(()),
        }
    }
}

impl PlanError {
    /// Diagnostic shared by all variants.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            PlanError::Configuration(info)
            | PlanError::NotFound(info)
            | PlanError::Format(info)
            | PlanError::Io(info)
            | PlanError::Serde(info) => info,
        }
    }

    /// Wraps an I/O failure against `path` under the given error code.
    pub fn io(code: &str, path: &std::path::Path, err: &std::io::Error) -> Self {
        PlanError::Io(
            ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
        )
    }
}
