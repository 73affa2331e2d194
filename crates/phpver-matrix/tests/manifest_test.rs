//! Reading composer.json from disk

use phpver_matrix::{manifest_path, php_requirement, ManifestError};
use std::fs;
use tempfile::TempDir;

fn write_manifest(content: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(manifest_path(dir.path()), content).unwrap();
    dir
}

#[test]
fn test_reads_php_requirement() {
    let dir = write_manifest(r#"{"name": "acme/app", "require": {"php": ">=7.3"}}"#);
    let requirement = php_requirement(&manifest_path(dir.path())).unwrap();
    assert_eq!(requirement.as_deref(), Some(">=7.3"));
}

#[test]
fn test_requirement_formats_are_returned_verbatim() {
    for expected in ["8.1", "^8.0", "^7.3 || ^8.0", ">=7.4 <8.3"] {
        let content = serde_json::json!({"require": {"php": expected}}).to_string();
        let dir = write_manifest(&content);
        let requirement = php_requirement(&manifest_path(dir.path())).unwrap();
        assert_eq!(requirement.as_deref(), Some(expected));
    }
}

#[test]
fn test_missing_php_requirement() {
    let dir = write_manifest(r#"{"require": {"ext-mbstring": "*"}}"#);
    assert_eq!(php_requirement(&manifest_path(dir.path())).unwrap(), None);
}

#[test]
fn test_empty_require_dev_array() {
    let dir = write_manifest(r#"{"require": {"php": "^8.1"}, "require-dev": []}"#);
    let requirement = php_requirement(&manifest_path(dir.path())).unwrap();
    assert_eq!(requirement.as_deref(), Some("^8.1"));
}

#[test]
fn test_unrelated_non_string_values() {
    let dir = write_manifest(
        r#"{
            "name": {"vendor": "acme"},
            "require": {"php": "^8.1", "acme/plugin": {"version": "1"}},
            "require-dev": {"x/y": {"version": "1"}},
            "extra": [1, 2, 3]
        }"#,
    );
    let requirement = php_requirement(&manifest_path(dir.path())).unwrap();
    assert_eq!(requirement.as_deref(), Some("^8.1"));
}

#[test]
fn test_empty_require_array() {
    let dir = write_manifest(r#"{"require": [], "require-dev": []}"#);
    assert_eq!(php_requirement(&manifest_path(dir.path())).unwrap(), None);
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = manifest_path(dir.path());

    let err = php_requirement(&path).unwrap_err();
    assert!(matches!(err, ManifestError::Io { .. }));
    assert!(err.to_string().contains("composer.json"));
}

#[test]
fn test_truncated_json() {
    let dir = write_manifest(r#"{"require": {"php": "^8.0""#);
    let err = php_requirement(&manifest_path(dir.path())).unwrap_err();
    assert!(matches!(err, ManifestError::Json { .. }));
    assert!(err.to_string().starts_with("Failed to parse"));
}

#[test]
fn test_not_json() {
    let dir = write_manifest("require:\n  php: ^8.0\n");
    let err = php_requirement(&manifest_path(dir.path())).unwrap_err();
    assert!(matches!(err, ManifestError::Json { .. }));
}
