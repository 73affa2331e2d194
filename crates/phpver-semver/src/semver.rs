//! One-call helpers over the parser, for callers holding plain strings

use crate::{CanonicalVersion, ParsedConstraints, VersionParser};

/// Entry points used by the matrix builder and extremes selector
pub struct Semver;

impl Semver {
    /// Whether the canonical form of `version` satisfies `constraints`
    pub fn satisfies(version: &str, constraints: &str) -> bool {
        Self::parse_constraints(constraints).satisfies(version)
    }

    /// Return all versions that satisfy the given constraints, in input order
    pub fn satisfied_by(versions: &[&str], constraints: &str) -> Vec<String> {
        let parsed = Self::parse_constraints(constraints);

        versions
            .iter()
            .filter(|v| parsed.satisfies(v))
            .map(|v| v.to_string())
            .collect()
    }

    /// Parse once, match many times.
    pub fn parse_constraints(constraints: &str) -> ParsedConstraints {
        VersionParser::new().parse_constraints_cached(constraints)
    }

    pub fn satisfies_parsed(version: &str, constraints: &ParsedConstraints) -> bool {
        constraints.satisfies(version)
    }

    /// Canonicalize every entry, silently dropping those without a numeric version
    pub fn canonicalize_all<I, S>(versions: I) -> Vec<CanonicalVersion>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        versions
            .into_iter()
            .filter_map(|v| {
                let canonical = CanonicalVersion::parse(v.as_ref());
                if canonical.is_none() {
                    log::trace!("Skipping non-canonical version {:?}", v.as_ref());
                }
                canonical
            })
            .collect()
    }

    /// Stable ascending sort by comparable triple.
    ///
    /// Entries with equal triples keep their relative order.
    pub fn sort_canonical(mut versions: Vec<CanonicalVersion>) -> Vec<CanonicalVersion> {
        versions.sort_by(|a, b| a.comparable().cmp(b.comparable()));
        versions
    }

    /// Sort versions in ascending order, dropping non-canonical entries
    pub fn sort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, false)
    }

    /// Sort versions in descending order, dropping non-canonical entries.
    ///
    /// Equal versions keep their input order here too.
    pub fn rsort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, true)
    }

    fn usort(versions: &[&str], descending: bool) -> Vec<String> {
        let mut canonical = Self::canonicalize_all(versions);
        if descending {
            canonical.sort_by(|a, b| b.comparable().cmp(a.comparable()));
        } else {
            canonical = Self::sort_canonical(canonical);
        }
        canonical.into_iter().map(CanonicalVersion::into_original).collect()
    }
}
