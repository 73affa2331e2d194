//! Comparable version triples

use std::fmt;

/// A (major, minor, patch) triple.
///
/// The derived ordering is lexicographic over major, then minor, then patch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub const ZERO: Version = Version::new(0, 0, 0);

    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version { major, minor, patch }
    }

    /// Next major release, e.g. 8.1.3 -> 9.0.0
    pub fn next_major(&self) -> Self {
        Version::new(self.major.saturating_add(1), 0, 0)
    }

    /// Next minor release, e.g. 8.1.3 -> 8.2.0
    pub fn next_minor(&self) -> Self {
        Version::new(self.major, self.minor.saturating_add(1), 0)
    }

    /// Next patch release, e.g. 8.1.3 -> 8.1.4
    pub fn next_patch(&self) -> Self {
        Version::new(self.major, self.minor, self.patch.saturating_add(1))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A version string paired with the triple extracted from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalVersion {
    original: String,
    comparable: Version,
}

impl CanonicalVersion {
    pub fn new(original: impl Into<String>, comparable: Version) -> Self {
        CanonicalVersion {
            original: original.into(),
            comparable,
        }
    }

    /// Canonicalize `original`, returning `None` when it holds no numeric version.
    pub fn parse(original: &str) -> Option<Self> {
        crate::VersionParser::canonicalize(original).map(|v| Self::new(original, v))
    }

    /// The string this version was derived from
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn comparable(&self) -> &Version {
        &self.comparable
    }

    pub fn into_original(self) -> String {
        self.original
    }
}

impl fmt::Display for CanonicalVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.original, self.comparable)
    }
}
