//! Version canonicalization and constraint matching for PHP release matrices
//!
//! Versions are reduced to comparable (major, minor, patch) triples and matched
//! against Composer-style constraint strings (`^8.1`, `>=7.4 <8.3 || ^8.4`).

pub mod constraint;
mod comparator;
mod semver;
mod version;
mod version_parser;

pub use comparator::Comparator;
pub use constraint::{ConstraintInterface, MatchAllConstraint, MatchNoneConstraint, MultiConstraint, Operator};
pub use semver::Semver;
pub use version::{CanonicalVersion, Version};
pub use version_parser::{ConstraintParseError, ParsedConstraints, VersionParser};
