//! Unit tests for error.rs
//!
//! Tests all Error variants, their trait implementations, and the error macros.

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_invalid_region_display() {
    let err = Error::InvalidRegion("min > max on axis 0".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid region"));
    assert!(display.contains("min > max on axis 0"));
}

#[test]
fn test_unknown_model_display() {
    let err = Error::UnknownModel("sphere".to_string());
    assert_eq!(format!("{}", err), "Unknown model: sphere");
}

#[test]
fn test_unknown_instance_display() {
    let err = Error::UnknownInstance("00000003".to_string());
    assert_eq!(format!("{}", err), "Unknown instance: 00000003");
}

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("Engine not initialized".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Initialization failed"));
    assert!(display.contains("Engine not initialized"));
}

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("lock poisoned".to_string());
    assert_eq!(format!("{}", err), "Backend error: lock poisoned");
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::UnknownModel("box".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug() {
    let debug = format!("{:?}", Error::InvalidRegion("r".to_string()));
    assert!(debug.contains("InvalidRegion"));

    let debug = format!("{:?}", Error::UnknownInstance("i".to_string()));
    assert!(debug.contains("UnknownInstance"));
}

#[test]
fn test_error_clone() {
    let err1 = Error::UnknownModel("gun".to_string());
    let err2 = err1.clone();
    assert_eq!(format!("{}", err1), format!("{}", err2));
}

// ============================================================================
// RESULT ALIAS AND MACROS
// ============================================================================

fn failing_with_variant(id: &str) -> Result<u32> {
    crate::engine_bail!(Error::UnknownModel, "galaxy3d::tests", "{}", id);
}

fn failing_default() -> Result<u32> {
    crate::engine_bail!("galaxy3d::tests", "backend failure {}", 42);
}

#[test]
fn test_result_ok() {
    let value: Result<u32> = Ok(7);
    assert_eq!(value.unwrap(), 7);
}

#[test]
fn test_engine_bail_with_variant() {
    match failing_with_variant("lamp") {
        Err(Error::UnknownModel(id)) => assert_eq!(id, "lamp"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_engine_bail_defaults_to_backend_error() {
    match failing_default() {
        Err(Error::BackendError(msg)) => assert_eq!(msg, "backend failure 42"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_engine_err_evaluates_to_error() {
    let err = crate::engine_err!(Error::InvalidRegion, "galaxy3d::tests", "radius {}", -1.0);
    assert!(matches!(err, Error::InvalidRegion(ref msg) if msg == "radius -1"));
}

#[test]
fn test_instance_limit_display() {
    let err = Error::InstanceLimit("model 'lamp' allows 2 instance(s)".to_string());
    assert_eq!(format!("{}", err), "Instance limit reached: model 'lamp' allows 2 instance(s)");
}
