use std::fs;
use std::path::{Path, PathBuf};

use sdw_core::errors::{ErrorInfo, PlanError};
use sdw_core::{PLANS_FILE_NAME, PLANS_ROOT_ENV};
use tracing::debug;

/// Location of a dataset folder and its plans document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLocation {
    /// Folder name, e.g. `Dataset005_Prostate`.
    pub dataset_name: String,
    pub dataset_dir: PathBuf,
    pub plans_path: PathBuf,
}

/// Folder name prefix for a dataset id, zero padded to three digits.
pub fn dataset_prefix(dataset_id: u32) -> String {
    format!("Dataset{dataset_id:03}")
}

/// Finds the dataset folder for `dataset_id` under `plans_root`.
///
/// The first directory whose name starts with [`dataset_prefix`] wins, in
/// directory listing order. The plans file must exist inside it.
pub fn resolve_dataset(
    plans_root: Option<&Path>,
    dataset_id: u32,
) -> Result<DatasetLocation, PlanError> {
    let root = match plans_root {
        Some(root) if !root.as_os_str().is_empty() => root,
        _ => {
            return Err(PlanError::Configuration(
                ErrorInfo::new(
                    "plans-root-unset",
                    format!("{PLANS_ROOT_ENV} environment variable not set"),
                )
                .with_hint(format!("export {PLANS_ROOT_ENV} or pass --plans-root")),
            ))
        }
    };

    let prefix = dataset_prefix(dataset_id);
    let entries = fs::read_dir(root).map_err(|err| {
        PlanError::NotFound(
            ErrorInfo::new(
                "plans-root-unreadable",
                format!("Dataset {dataset_id} not found in {}", root.display()),
            )
            .with_context("root", root.display().to_string())
            .with_hint(err.to_string()),
        )
    })?;

    let mut matched = None;
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with(&prefix) {
            continue;
        }
        // `is_dir` follows symlinks.
        let path = entry.path();
        if path.is_dir() {
            matched = Some((name, path));
            break;
        }
        debug!(entry = %name, "ignoring non-directory dataset match");
    }

    let Some((dataset_name, dataset_dir)) = matched else {
        return Err(PlanError::NotFound(
            ErrorInfo::new(
                "dataset-missing",
                format!("Dataset {dataset_id} not found in {}", root.display()),
            )
            .with_context("prefix", prefix),
        ));
    };

    let plans_path = dataset_dir.join(PLANS_FILE_NAME);
    if !plans_path.is_file() {
        return Err(PlanError::NotFound(ErrorInfo::new(
            "plans-missing",
            format!("Plans file not found: {}", plans_path.display()),
        )));
    }
    debug!(dataset = %dataset_name, plans = %plans_path.display(), "resolved dataset");

    Ok(DatasetLocation {
        dataset_name,
        dataset_dir,
        plans_path,
    })
}
