//! Matrix building: filter, canonicalize, match, sort

use phpver_semver::{CanonicalVersion, Semver};

use crate::error::{MatrixError, Result};
use crate::release::{ReleaseDescriptor, SupportPolicy};

/// Release filters applied before constraint matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixOptions {
    /// Keep releases that are not generally available yet
    pub include_future: bool,
    /// Keep releases the support policy deems unsupported
    pub include_unsupported: bool,
    pub support_policy: SupportPolicy,
}

impl Default for MatrixOptions {
    fn default() -> Self {
        MatrixOptions {
            include_future: false,
            include_unsupported: true,
            support_policy: SupportPolicy::default(),
        }
    }
}

impl MatrixOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_future(mut self, include_future: bool) -> Self {
        self.include_future = include_future;
        self
    }

    pub fn with_unsupported(mut self, include_unsupported: bool) -> Self {
        self.include_unsupported = include_unsupported;
        self
    }

    pub fn with_support_policy(mut self, support_policy: SupportPolicy) -> Self {
        self.support_policy = support_policy;
        self
    }

    /// Whether a release survives the lifecycle filters
    pub fn admits(&self, release: &ReleaseDescriptor) -> bool {
        if release.is_future && !self.include_future {
            return false;
        }
        self.include_unsupported || release.is_supported(self.support_policy)
    }
}

/// Every release name satisfying `constraint`, in ascending version order.
///
/// Names without a numeric version are skipped. Releases with equal versions
/// keep their catalog order. Fails with [`MatrixError::NoValidVersions`] when
/// nothing is left.
pub fn matrix(
    constraint: &str,
    releases: &[ReleaseDescriptor],
    options: &MatrixOptions,
) -> Result<Vec<String>> {
    let parsed = Semver::parse_constraints(constraint);

    let admitted: Vec<&str> = releases
        .iter()
        .filter(|release| options.admits(release))
        .map(|release| release.name.as_str())
        .collect();
    log::debug!(
        "{} of {} releases pass the lifecycle filters",
        admitted.len(),
        releases.len()
    );

    let matching: Vec<CanonicalVersion> = Semver::canonicalize_all(admitted)
        .into_iter()
        .filter(|version| {
            let matches = parsed.matches(version.comparable());
            log::trace!("{} against {}: {}", version, constraint, matches);
            matches
        })
        .collect();

    if matching.is_empty() {
        return Err(MatrixError::NoValidVersions);
    }

    Ok(Semver::sort_canonical(matching)
        .into_iter()
        .map(CanonicalVersion::into_original)
        .collect())
}
