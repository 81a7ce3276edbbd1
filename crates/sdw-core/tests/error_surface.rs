use std::path::Path;

use sdw_core::errors::{ErrorInfo, PlanError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("dataset", "5")
        .with_context("root", "/data")
}

#[test]
fn configuration_error_surface() {
    let err = PlanError::Configuration(sample_info("plans-root-unset", "root not set"));
    assert_eq!(err.info().code, "plans-root-unset");
    assert!(err.to_string().starts_with("configuration error: root not set"));
    assert!(err.to_string().contains("dataset=5, root=/data"));
}

#[test]
fn not_found_error_surface() {
    let err = PlanError::NotFound(sample_info("dataset-missing", "no dataset"));
    assert_eq!(err.info().code, "dataset-missing");
    assert!(err.info().context.contains_key("root"));
}

#[test]
fn format_error_surface_with_hint() {
    let err = PlanError::Format(
        ErrorInfo::new("base-missing", "3d_fullres configuration not found in plans")
            .with_hint("run nnUNetv2_plan_and_preprocess first"),
    );
    assert_eq!(
        err.to_string(),
        "format error: 3d_fullres configuration not found in plans (code: base-missing) \
         | hint: run nnUNetv2_plan_and_preprocess first"
    );
}

#[test]
fn io_helper_records_path() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err = PlanError::io("plans-write", Path::new("/tmp/plans.json"), &io);
    assert!(matches!(err, PlanError::Io(_)));
    assert_eq!(err.info().context["path"], "/tmp/plans.json");
    assert_eq!(err.info().message, "denied");
}

#[test]
fn errors_round_trip_json() {
    let err = PlanError::Serde(sample_info("report-encode", "bad value"));
    let json = serde_json::to_string(&err).expect("serialize");
    assert!(json.contains("\"family\":\"Serde\""));
    let decoded: PlanError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}
