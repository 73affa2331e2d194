//! Reading the PHP requirement out of a project's composer.json

use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ManifestError;

/// Manifest file name inside a project directory
pub const MANIFEST_FILE: &str = "composer.json";

/// The parts of composer.json needed for resolution.
///
/// Only `require` is read, and it is kept as raw JSON: composer writes an
/// empty section as `[]`, and other keys may carry arbitrary values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ComposerJson {
    #[serde(default)]
    pub require: Value,
}

impl ComposerJson {
    /// The `require.php` constraint, if declared as a string
    pub fn php_requirement(&self) -> Option<&str> {
        self.require.get("php").and_then(Value::as_str)
    }
}

/// Path of the manifest inside `working_dir`
pub fn manifest_path(working_dir: impl AsRef<Path>) -> PathBuf {
    working_dir.as_ref().join(MANIFEST_FILE)
}

/// Load and parse a composer.json file
pub fn load_manifest(path: &Path) -> Result<ComposerJson, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ManifestError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// The PHP requirement declared by the manifest at `path`
pub fn php_requirement(path: &Path) -> Result<Option<String>, ManifestError> {
    let manifest = load_manifest(path)?;
    let requirement = manifest.php_requirement().map(str::to_string);

    match &requirement {
        Some(constraint) => log::debug!("PHP version defined in {} is {}", path.display(), constraint),
        None => log::debug!("{} declares no PHP requirement", path.display()),
    }

    Ok(requirement)
}
