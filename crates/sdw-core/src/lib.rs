#![deny(missing_docs)]
#![doc = "Shared error types and fixed constants for generating S/D/W U-Net variants in nnU-Net v2 plans."]

pub mod errors;

pub use errors::{ErrorInfo, PlanError};

/// Environment variable naming the nnU-Net v2 preprocessed data root.
pub const PLANS_ROOT_ENV: &str = "nnUNet_preprocessed";

/// File name of the plans document inside each dataset folder.
pub const PLANS_FILE_NAME: &str = "nnUNetPlans.json";

/// Name of the configuration every variant is derived from.
pub const BASE_CONFIGURATION: &str = "3d_fullres";

/// Suffix appended to the plans path for the pre-write backup copy.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Candidate resolution stage counts (S).
pub const STAGE_COUNTS: [u32; 3] = [4, 5, 6];

/// Candidate convolutions per stage (D).
pub const CONV_DEPTHS: [u32; 2] = [2, 3];

/// Candidate initial channel widths (W).
pub const INITIAL_WIDTHS: [u32; 3] = [16, 32, 64];

/// Upper bound on the number of feature channels at any stage.
pub const MAX_FEATURES: u64 = 512;
