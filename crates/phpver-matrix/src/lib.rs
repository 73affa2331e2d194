//! Release matrix resolution for PHP projects
//!
//! Given the PHP requirement from a `composer.json` and a catalog of known PHP
//! releases, [`matrix`] returns every release satisfying the requirement in
//! ascending order, and [`minimum`] / [`maximum`] pick the ends of any version list.

pub mod catalog;
pub mod error;
pub mod extremes;
pub mod manifest;
pub mod matrix;
pub mod release;

pub use catalog::{load_catalog_file, parse_catalog, CatalogClient, DEFAULT_CATALOG_URL};
pub use error::{CatalogError, ManifestError, MatrixError, Result};
pub use extremes::{maximum, minimum};
pub use manifest::{load_manifest, manifest_path, php_requirement, ComposerJson, MANIFEST_FILE};
pub use matrix::{matrix, MatrixOptions};
pub use release::{ReleaseDescriptor, SupportPolicy};
