#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

/// Base `3d_fullres` entry with five stages.
pub fn base_entry(stages: usize) -> Value {
    let mut kernels = vec![json!([1, 3, 3])];
    kernels.extend((1..stages).map(|_| json!([3, 3, 3])));
    let mut strides = vec![json!([1, 1, 1])];
    strides.extend((1..stages).map(|idx| json!([idx, 2, 2])));
    let features: Vec<u64> = (0..stages).map(|idx| (32u64 << idx).min(320)).collect();
    json!({
        "data_identifier": "nnUNetPlans_3d_fullres",
        "batch_size": 2,
        "patch_size": [80, 160, 160],
        "architecture": {
            "network_class_name": "dynamic_network_architectures.architectures.unet.PlainConvUNet",
            "arch_kwargs": {
                "n_stages": stages,
                "features_per_stage": features,
                "conv_op": "torch.nn.modules.conv.Conv3d",
                "kernel_sizes": kernels,
                "strides": strides,
                "n_conv_per_stage": vec![2; stages],
                "n_conv_per_stage_decoder": vec![2; stages.saturating_sub(1)],
                "conv_bias": true
            },
            "_kw_requires_import": ["conv_op"]
        }
    })
}

pub fn plans_with_base(base: Value) -> Value {
    json!({
        "dataset_name": "Dataset005_Prostate",
        "plans_name": "nnUNetPlans",
        "configurations": {
            "2d": {"data_identifier": "nnUNetPlans_2d", "batch_size": 12},
            "3d_fullres": base
        },
        "experiment_planner_used": "ExperimentPlanner"
    })
}

/// Creates `<root>/<folder>/nnUNetPlans.json` and returns the plans path.
pub fn write_dataset(root: &Path, folder: &str, plans: &Value) -> PathBuf {
    let dir = root.join(folder);
    fs::create_dir_all(&dir).expect("create dataset dir");
    let path = dir.join("nnUNetPlans.json");
    fs::write(&path, serde_json::to_vec_pretty(plans).expect("encode")).expect("write plans");
    path
}

pub fn read_json(path: &Path) -> Value {
    serde_json::from_slice(&fs::read(path).expect("read")).expect("decode")
}
