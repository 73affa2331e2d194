//! Lowest and highest entry of a version list

use phpver_semver::{CanonicalVersion, Semver};

use crate::error::{MatrixError, Result};

/// The lowest version in `versions`, as originally written.
///
/// Entries without a numeric version are ignored. Among equal versions the
/// first one wins.
pub fn minimum<S: AsRef<str>>(versions: &[S]) -> Result<String> {
    sorted(versions)?
        .into_iter()
        .next()
        .map(CanonicalVersion::into_original)
        .ok_or(MatrixError::NoValidVersions)
}

/// The highest version in `versions`, as originally written.
///
/// Entries without a numeric version are ignored. Among equal versions the
/// last one wins.
pub fn maximum<S: AsRef<str>>(versions: &[S]) -> Result<String> {
    sorted(versions)?
        .pop()
        .map(CanonicalVersion::into_original)
        .ok_or(MatrixError::NoValidVersions)
}

fn sorted<S: AsRef<str>>(versions: &[S]) -> Result<Vec<CanonicalVersion>> {
    let canonical = Semver::canonicalize_all(versions);
    if canonical.is_empty() {
        log::debug!("None of {} versions could be canonicalized", versions.len());
        return Err(MatrixError::NoValidVersions);
    }
    Ok(Semver::sort_canonical(canonical))
}
