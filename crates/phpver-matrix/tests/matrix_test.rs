//! End-to-end resolution over a realistic release catalog

use phpver_matrix::{
    matrix, maximum, minimum, parse_catalog, MatrixError, MatrixOptions, ReleaseDescriptor,
    SupportPolicy,
};

const CATALOG: &str = r#"{
    "data": {
        "72": {"name": "7.2", "isFutureVersion": false, "isEOLVersion": true, "isSecureVersion": false},
        "73": {"name": "7.3", "isFutureVersion": false, "isEOLVersion": true, "isSecureVersion": false},
        "74": {"name": "7.4", "isFutureVersion": false, "isEOLVersion": true, "isSecureVersion": false},
        "80": {"name": "8.0", "isFutureVersion": false, "isEOLVersion": true, "isSecureVersion": false},
        "81": {"name": "8.1", "isFutureVersion": false, "isEOLVersion": false, "isSecureVersion": true},
        "82": {"name": "8.2", "isFutureVersion": false, "isEOLVersion": false, "isSecureVersion": true},
        "83": {"name": "8.3", "isFutureVersion": false, "isEOLVersion": false, "isSecureVersion": true},
        "84": {"name": "8.4", "isFutureVersion": false, "isEOLVersion": false, "isSecureVersion": true},
        "85": {"name": "8.5", "isFutureVersion": true, "isEOLVersion": false, "isSecureVersion": false}
    }
}"#;

fn releases() -> Vec<ReleaseDescriptor> {
    parse_catalog(CATALOG).unwrap()
}

fn resolve(constraint: &str) -> Result<Vec<String>, MatrixError> {
    matrix(constraint, &releases(), &MatrixOptions::default())
}

#[test]
fn test_composer_style_requirements() {
    let cases: &[(&str, &[&str])] = &[
        (">=7.3", &["7.3", "7.4", "8.0", "8.1", "8.2", "8.3", "8.4"]),
        ("^8.0", &["8.0", "8.1", "8.2", "8.3", "8.4"]),
        ("8.1", &["8.1"]),
        ("8.1.*", &["8.1"]),
        ("~7.4", &["7.4"]),
        ("^7.3 || ^8.0", &["7.3", "7.4", "8.0", "8.1", "8.2", "8.3", "8.4"]),
        (">=7.4 <8.2", &["7.4", "8.0", "8.1"]),
        (">=7.4, <8.2", &["7.4", "8.0", "8.1"]),
        (">8.1", &["8.2", "8.3", "8.4"]),
        ("<=8.0", &["7.2", "7.3", "7.4", "8.0"]),
        ("7.2 - 7.4", &["7.2", "7.3", "7.4"]),
        ("*", &["7.2", "7.3", "7.4", "8.0", "8.1", "8.2", "8.3", "8.4"]),
    ];

    for (constraint, expected) in cases {
        assert_eq!(&resolve(constraint).unwrap(), expected, "constraint {}", constraint);
    }
}

#[test]
fn test_minimal_and_latest_follow_matrix() {
    let versions = resolve("^7.3 || ^8.0").unwrap();
    assert_eq!(minimum(&versions).unwrap(), "7.3");
    assert_eq!(maximum(&versions).unwrap(), "8.4");
}

#[test]
fn test_future_release_opt_in() {
    let options = MatrixOptions::new().with_future(true);
    let versions = matrix(">=8.3", &releases(), &options).unwrap();
    assert_eq!(versions, vec!["8.3", "8.4", "8.5"]);
    assert_eq!(maximum(&versions).unwrap(), "8.5");
}

#[test]
fn test_supported_only() {
    let options = MatrixOptions::new()
        .with_unsupported(false)
        .with_support_policy(SupportPolicy::SecureOnly);
    assert_eq!(
        matrix(">=7.0", &releases(), &options).unwrap(),
        vec!["8.1", "8.2", "8.3", "8.4"]
    );
}

#[test]
fn test_unsatisfiable_requirement() {
    assert_eq!(resolve("^9.0"), Err(MatrixError::NoValidVersions));
    assert_eq!(resolve("<7.0"), Err(MatrixError::NoValidVersions));
}
