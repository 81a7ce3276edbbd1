use std::path::PathBuf;

use sdw_core::errors::{ErrorInfo, PlanError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::PlansDocument;
use crate::hash::stable_hash_string;
use crate::variants::{derive_variant, triplets, VariantTriplet};

/// Whether a triplet produced a new configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantStatus {
    Added,
    Skipped,
}

/// Per-triplet record of a generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOutcome {
    pub name: String,
    pub triplet: VariantTriplet,
    pub status: VariantStatus,
}

/// Summary of one generation pass over a plans document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub dataset: String,
    pub plans_path: PathBuf,
    /// SHA-256 of the canonical JSON of the base configuration.
    pub base_fingerprint: String,
    pub outcomes: Vec<VariantOutcome>,
    pub added: usize,
    pub skipped: usize,
    pub total_configurations: usize,
}

impl GenerationReport {
    pub fn added_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status == VariantStatus::Added)
            .map(|outcome| outcome.name.as_str())
    }
}

/// Inserts every missing S/D/W variant into `document`.
///
/// Only the in-memory document changes; nothing is written to disk.
pub fn generate_variants(
    document: &mut PlansDocument,
    dataset: &str,
) -> Result<GenerationReport, PlanError> {
    let base_fingerprint = stable_hash_string(document.base_entry())?;
    let mut outcomes = Vec::new();
    let mut added = 0;

    for triplet in triplets() {
        let name = triplet.config_name();
        if document.contains(&name) {
            debug!(%name, "variant already present");
            outcomes.push(VariantOutcome {
                name,
                triplet,
                status: VariantStatus::Skipped,
            });
            continue;
        }

        let entry = derive_variant(document.base_entry(), triplet).ok_or_else(|| {
            PlanError::Format(ErrorInfo::new(
                "arch-kwargs-missing",
                "Unexpected plans format: missing architecture.arch_kwargs",
            ))
        })?;
        document.insert(name.clone(), entry);
        added += 1;
        debug!(%name, "variant added");
        outcomes.push(VariantOutcome {
            name,
            triplet,
            status: VariantStatus::Added,
        });
    }

    Ok(GenerationReport {
        dataset: dataset.to_string(),
        plans_path: document.path().to_path_buf(),
        base_fingerprint,
        skipped: outcomes.len() - added,
        outcomes,
        added,
        total_configurations: document.len(),
    })
}
