mod common;

use std::fs;

use sdw_core::PlanError;
use sdw_plans::resolve_dataset;
use tempfile::tempdir;

#[test]
fn unset_root_is_a_configuration_error() {
    let err = resolve_dataset(None, 5).unwrap_err();
    assert!(matches!(err, PlanError::Configuration(_)));
    assert_eq!(
        err.info().message,
        "nnUNet_preprocessed environment variable not set"
    );
}

#[test]
fn finds_dataset_by_padded_prefix() {
    let root = tempdir().expect("tempdir");
    let plans = common::plans_with_base(common::base_entry(5));
    common::write_dataset(root.path(), "Dataset004_Hippocampus", &plans);
    let expected = common::write_dataset(root.path(), "Dataset005_Prostate", &plans);

    let location = resolve_dataset(Some(root.path()), 5).expect("resolve");
    assert_eq!(location.dataset_name, "Dataset005_Prostate");
    assert_eq!(location.dataset_dir, root.path().join("Dataset005_Prostate"));
    assert_eq!(location.plans_path, expected);
}

#[test]
fn missing_dataset_is_not_found() {
    let root = tempdir().expect("tempdir");
    let plans = common::plans_with_base(common::base_entry(5));
    common::write_dataset(root.path(), "Dataset004_Hippocampus", &plans);

    let err = resolve_dataset(Some(root.path()), 7).unwrap_err();
    assert!(matches!(err, PlanError::NotFound(_)));
    assert_eq!(err.info().code, "dataset-missing");
    assert!(err.info().message.starts_with("Dataset 7 not found in"));
}

#[test]
fn dataset_without_plans_file_is_not_found() {
    let root = tempdir().expect("tempdir");
    fs::create_dir_all(root.path().join("Dataset005_Prostate")).expect("mkdir");

    let err = resolve_dataset(Some(root.path()), 5).unwrap_err();
    assert!(matches!(err, PlanError::NotFound(_)));
    assert_eq!(err.info().code, "plans-missing");
    assert!(err.info().message.contains("nnUNetPlans.json"));
}

#[test]
fn plain_files_with_matching_prefix_are_ignored() {
    let root = tempdir().expect("tempdir");
    fs::write(root.path().join("Dataset005_notes.txt"), b"not a dataset").expect("write");

    let err = resolve_dataset(Some(root.path()), 5).unwrap_err();
    assert_eq!(err.info().code, "dataset-missing");
}

#[test]
fn unreadable_root_is_not_found() {
    let root = tempdir().expect("tempdir");
    let missing = root.path().join("does-not-exist");

    let err = resolve_dataset(Some(&missing), 5).unwrap_err();
    assert!(matches!(err, PlanError::NotFound(_)));
    assert_eq!(err.info().code, "plans-root-unreadable");
}

#[cfg(unix)]
#[test]
fn symlinked_dataset_folder_is_resolved() {
    let root = tempdir().expect("tempdir");
    let volume = tempdir().expect("tempdir");
    let plans = common::plans_with_base(common::base_entry(5));
    let target_plans = common::write_dataset(volume.path(), "Dataset005_Prostate", &plans);
    std::os::unix::fs::symlink(
        volume.path().join("Dataset005_Prostate"),
        root.path().join("Dataset005_Prostate"),
    )
    .expect("symlink");

    let location = resolve_dataset(Some(root.path()), 5).expect("resolve");
    assert_eq!(location.dataset_name, "Dataset005_Prostate");
    assert_eq!(location.plans_path, root.path().join("Dataset005_Prostate/nnUNetPlans.json"));
    assert_eq!(
        fs::read(&location.plans_path).expect("read through link"),
        fs::read(&target_plans).expect("read target")
    );
}
