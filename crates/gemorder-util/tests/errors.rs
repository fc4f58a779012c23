use gemorder_util::errors::GemorderError;

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = GemorderError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
}

#[test]
fn test_invalid_name_display() {
    let err = GemorderError::InvalidName {
        name: "bad/name".to_string(),
    };
    assert_eq!(err.to_string(), "Invalid gem name 'bad/name'");
}

#[test]
fn test_unsatisfiable_display() {
    let err = GemorderError::Unsatisfiable {
        gem: "rails".to_string(),
        requirements: vec![">=9.0".to_string()],
    };
    let text = err.to_string();
    assert!(text.contains("rails"), "got: {text}");
    assert!(text.contains(">=9.0"), "got: {text}");
}

#[test]
fn test_unsupported_constraint_display() {
    let err = GemorderError::UnsupportedConstraint {
        gem: "rake".to_string(),
        requirements: vec![">=1.0".to_string(), "<2.0".to_string()],
    };
    let text = err.to_string();
    assert!(text.contains("more than one version requirement"), "got: {text}");
    assert!(text.contains("rake"), "got: {text}");
}

#[test]
fn test_cycle_display() {
    let err = GemorderError::Cycle {
        remainder: "a -> [b]; b -> [a]".to_string(),
    };
    assert!(err.to_string().contains("Unhandled dependencies"));
    assert!(err.to_string().contains("a -> [b]"));
}

#[test]
fn test_io_error_from_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: GemorderError = io_err.into();
    assert!(matches!(err, GemorderError::Io(_)));
}
