//! Pairwise comparison of loosely written version strings

use crate::constraint::Operator;
use crate::{Version, VersionParser};

/// String-level comparisons; both sides are canonicalized first.
///
/// Every comparison is false when either side holds no numeric version, so
/// `equal_to("master", "master")` does not hold.
pub struct Comparator;

impl Comparator {
    pub fn greater_than(version1: &str, version2: &str) -> bool {
        Self::compare_str(version1, Operator::GreaterThan, version2)
    }

    pub fn greater_than_or_equal_to(version1: &str, version2: &str) -> bool {
        Self::compare_str(version1, Operator::GreaterThanOrEqual, version2)
    }

    pub fn less_than(version1: &str, version2: &str) -> bool {
        Self::compare_str(version1, Operator::LessThan, version2)
    }

    pub fn less_than_or_equal_to(version1: &str, version2: &str) -> bool {
        Self::compare_str(version1, Operator::LessThanOrEqual, version2)
    }

    pub fn equal_to(version1: &str, version2: &str) -> bool {
        Self::compare_str(version1, Operator::Equal, version2)
    }

    pub fn not_equal_to(version1: &str, version2: &str) -> bool {
        Self::compare_str(version1, Operator::NotEqual, version2)
    }

    pub fn compare_str(version1: &str, operator: Operator, version2: &str) -> bool {
        match (
            VersionParser::canonicalize(version1),
            VersionParser::canonicalize(version2),
        ) {
            (Some(a), Some(b)) => Self::compare(&a, operator, &b),
            _ => false,
        }
    }

    /// `version1 <operator> version2` on canonical triples
    pub fn compare(version1: &Version, operator: Operator, version2: &Version) -> bool {
        operator.admits(version1.cmp(version2))
    }
}
