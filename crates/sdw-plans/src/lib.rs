//! Dataset resolution, plans document handling and S/D/W variant generation
//! for nnU-Net v2 plans.

mod document;
mod generate;
mod hash;
mod json;
mod resolve;
mod run;
pub mod variants;

pub use document::{BackupStatus, PlansDocument};
pub use generate::{generate_variants, GenerationReport, VariantOutcome, VariantStatus};
pub use hash::stable_hash_string;
pub use json::{to_canonical_json_bytes, to_pretty_json_bytes};
pub use resolve::{dataset_prefix, resolve_dataset, DatasetLocation};
pub use run::{run_generation, write_report, RunOptions, RunSummary};
pub use variants::{derive_variant, features_per_stage, triplets, VariantTriplet};
