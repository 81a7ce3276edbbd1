//! S/D/W triplets and the copy-and-edit derivation of one variant entry.

use std::fmt;

use sdw_core::{BASE_CONFIGURATION, CONV_DEPTHS, INITIAL_WIDTHS, MAX_FEATURES, STAGE_COUNTS};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

const FALLBACK_KERNEL: [u64; 3] = [3, 3, 3];
const FALLBACK_STRIDE: [u64; 3] = [2, 2, 2];

/// One point of the variant grid: stages, convolutions per stage, initial width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VariantTriplet {
    pub stages: u32,
    pub depth: u32,
    pub width: u32,
}

impl VariantTriplet {
    pub const fn new(stages: u32, depth: u32, width: u32) -> Self {
        Self {
            stages,
            depth,
            width,
        }
    }

    /// Short label such as `S4D2W16`.
    pub fn short_name(&self) -> String {
        format!("S{}D{}W{}", self.stages, self.depth, self.width)
    }

    /// Configuration key such as `3d_fullres_S4D2W16`.
    pub fn config_name(&self) -> String {
        format!("{BASE_CONFIGURATION}_{}", self.short_name())
    }
}

impl fmt::Display for VariantTriplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

/// All 18 triplets, S outermost and W innermost.
pub fn triplets() -> Vec<VariantTriplet> {
    let capacity = STAGE_COUNTS.len() * CONV_DEPTHS.len() * INITIAL_WIDTHS.len();
    let mut grid = Vec::with_capacity(capacity);
    for stages in STAGE_COUNTS {
        for depth in CONV_DEPTHS {
            for width in INITIAL_WIDTHS {
                grid.push(VariantTriplet::new(stages, depth, width));
            }
        }
    }
    grid
}

/// Channel widths starting at `width` and doubling per stage, capped at 512.
pub fn features_per_stage(stages: u32, width: u32) -> Vec<u64> {
    let mut features = Vec::with_capacity(stages as usize);
    let mut current = u64::from(width).min(MAX_FEATURES);
    for _ in 0..stages {
        features.push(current);
        current = (current * 2).min(MAX_FEATURES);
    }
    features
}

/// Pads `schedule` with copies of its last element (or `fallback` when empty)
/// or truncates it from the end so that it holds exactly `len` entries.
pub fn resize_schedule(schedule: &[Value], len: usize, fallback: &Value) -> Vec<Value> {
    let mut resized: Vec<Value> = schedule.iter().take(len).cloned().collect();
    let filler = schedule.last().unwrap_or(fallback).clone();
    resized.resize(len, filler);
    resized
}

/// Brings `kernel_sizes` and `strides` to `stages` entries each.
///
/// Both fields are rewritten whenever either one has the wrong length.
pub fn reconcile_schedules(arch_kwargs: &mut Map<String, Value>, stages: usize) {
    let kernels = schedule_of(arch_kwargs, "kernel_sizes");
    let strides = schedule_of(arch_kwargs, "strides");
    if kernels.len() == stages && strides.len() == stages {
        return;
    }
    let kernels = resize_schedule(&kernels, stages, &json!(FALLBACK_KERNEL));
    let strides = resize_schedule(&strides, stages, &json!(FALLBACK_STRIDE));
    arch_kwargs.insert("kernel_sizes".into(), Value::Array(kernels));
    arch_kwargs.insert("strides".into(), Value::Array(strides));
}

fn schedule_of(arch_kwargs: &Map<String, Value>, key: &str) -> Vec<Value> {
    arch_kwargs
        .get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Derives the entry for `triplet` from a deep copy of `base`.
///
/// Returns `None` when `base` has no `architecture.arch_kwargs` mapping.
pub fn derive_variant(base: &Value, triplet: VariantTriplet) -> Option<Value> {
    let mut entry = base.clone();
    let arch_kwargs = entry
        .get_mut("architecture")?
        .get_mut("arch_kwargs")?
        .as_object_mut()?;

    let stages = triplet.stages as usize;
    let depth = u64::from(triplet.depth);
    arch_kwargs.insert("n_stages".into(), json!(triplet.stages));
    arch_kwargs.insert(
        "features_per_stage".into(),
        json!(features_per_stage(triplet.stages, triplet.width)),
    );
    arch_kwargs.insert("n_conv_per_stage".into(), json!(vec![depth; stages]));
    arch_kwargs.insert(
        "n_conv_per_stage_decoder".into(),
        json!(vec![depth; stages.saturating_sub(1)]),
    );
    reconcile_schedules(arch_kwargs, stages);
    Some(entry)
}
