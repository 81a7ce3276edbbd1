use std::fs;
use std::path::{Path, PathBuf};

use sdw_core::errors::PlanError;
use tracing::info;

use crate::document::{BackupStatus, PlansDocument};
use crate::generate::{generate_variants, GenerationReport};
use crate::json::to_pretty_json_bytes;
use crate::resolve::resolve_dataset;

/// Inputs for a full resolve, generate and persist run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunOptions {
    /// nnU-Net preprocessed root; `None` when unset.
    pub plans_root: Option<PathBuf>,
    pub dataset_id: u32,
    /// Generate and report without touching the plans file.
    pub dry_run: bool,
}

/// Result of [`run_generation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub report: GenerationReport,
    /// Present only when the document was rewritten.
    pub backup: Option<BackupStatus>,
    pub written: bool,
}

/// Resolves the dataset, extends its plans with S/D/W variants and writes
/// the document back when at least one variant was added.
pub fn run_generation(options: &RunOptions) -> Result<RunSummary, PlanError> {
    let location = resolve_dataset(options.plans_root.as_deref(), options.dataset_id)?;
    let mut document = PlansDocument::load(&location.plans_path)?;
    let report = generate_variants(&mut document, &location.dataset_name)?;
    info!(
        dataset = %location.dataset_name,
        added = report.added,
        skipped = report.skipped,
        fingerprint = %report.base_fingerprint,
        "generation pass complete"
    );

    if report.added == 0 || options.dry_run {
        return Ok(RunSummary {
            report,
            backup: None,
            written: false,
        });
    }

    let backup = document.persist()?;
    Ok(RunSummary {
        report,
        backup: Some(backup),
        written: true,
    })
}

/// Writes a generation report as pretty JSON.
pub fn write_report(path: &Path, report: &GenerationReport) -> Result<(), PlanError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| PlanError::io("report-dir", parent, &err))?;
    }
    let bytes = to_pretty_json_bytes(report)?;
    fs::write(path, bytes).map_err(|err| PlanError::io("report-write", path, &err))
}
