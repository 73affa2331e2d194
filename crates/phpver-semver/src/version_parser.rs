//! Version canonicalization and constraint parsing

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::constraint::{
    Constraint, ConstraintInterface, MatchAllConstraint, MatchNoneConstraint, MultiConstraint,
    Operator,
};
use crate::Version;

/// Reasons a single constraint atom could not be understood.
///
/// These never abort a parse: the offending atom matches nothing and the
/// error is kept alongside the parsed constraint for reporting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintParseError {
    #[error("Could not parse version constraint {constraint}: empty version")]
    EmptyVersion { constraint: String },
    #[error("Could not parse version constraint {constraint}: Invalid version \"{version}\"")]
    InvalidVersion { constraint: String, version: String },
    #[error("Could not parse version constraint {constraint}: Invalid operator \"{operator}\"")]
    InvalidOperator { constraint: String, operator: String },
    #[error("Could not parse version constraint {constraint}: incomplete hyphen range")]
    IncompleteRange { constraint: String },
    #[error("Could not parse version constraint {constraint}: empty clause")]
    EmptyClause { constraint: String },
}

lazy_static! {
    // First numeric dotted run, each component at most 16 digits
    static ref COERCE_RE: Regex = Regex::new(
        r"(?:^|[^\d])(\d{1,16})(?:\.(\d{1,16}))?(?:\.(\d{1,16}))?(?:$|[^\d])"
    ).unwrap();

    // Partial version literal; x, X and * stand for a missing component
    static ref PARTIAL_VERSION_RE: Regex = Regex::new(
        r"^[vV]?(\d{1,16}|[xX*])(?:\.(\d{1,16}|[xX*]))?(?:\.(\d{1,16}|[xX*]))?(?:\.\d{1,16})?(?:-[0-9A-Za-z.-]+|[A-Za-z][0-9A-Za-z.-]*)?(?:\+[0-9A-Za-z.-]+)?$"
    ).unwrap();

    // OR constraint splitter, `||` or the legacy single `|`
    static ref OR_CONSTRAINT_RE: Regex = Regex::new(r"\s*\|\|?\s*").unwrap();

    // Operator prefix of an atom
    static ref OPERATOR_RE: Regex = Regex::new(r"^(<>|!=|>=?|<=?|==?|~>?|\^)?\s*(.*)$").unwrap();

    // A token made only of an operator, e.g. the `>=` of `>= 8.1`
    static ref OPERATOR_ONLY_RE: Regex = Regex::new(r"^(?:<>|!=|>=?|<=?|==?|~>?|\^)$").unwrap();

    // Composer stability flags are meaningless for release triples
    static ref STABILITY_FLAG_RE: Regex = Regex::new(r"(?i)@(?:stable|RC|beta|alpha|dev)$").unwrap();
}

/// A version literal whose trailing components may be missing.
///
/// A wildcard component truncates everything after it, so `8.x.3` reads as `8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PartialVersion {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
}

impl PartialVersion {
    fn parse(literal: &str) -> Option<Self> {
        let caps = PARTIAL_VERSION_RE.captures(literal)?;
        let component = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u64>().ok());

        let major = component(1);
        let minor = major.and(component(2));
        let patch = minor.and(component(3));

        Some(PartialVersion { major, minor, patch })
    }

    fn is_any(&self) -> bool {
        self.major.is_none()
    }

    /// All three components given, no wildcard
    fn exact(&self) -> Option<Version> {
        match (self.major, self.minor, self.patch) {
            (Some(major), Some(minor), Some(patch)) => Some(Version::new(major, minor, patch)),
            _ => None,
        }
    }

    /// Lowest version matching this literal
    fn floor(&self) -> Version {
        Version::new(
            self.major.unwrap_or(0),
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
        )
    }

    /// First version past this literal at its own precision, e.g. `8.2` -> 8.3.0
    fn ceiling(&self) -> Version {
        let floor = self.floor();
        if self.minor.is_none() {
            floor.next_major()
        } else if self.patch.is_none() {
            floor.next_minor()
        } else {
            floor.next_patch()
        }
    }
}

/// Version parser for canonicalizing versions and parsing constraint strings
pub struct VersionParser;

impl VersionParser {
    /// Create a new version parser
    pub fn new() -> Self {
        VersionParser
    }

    /// Extract a (major, minor, patch) triple from an arbitrary string.
    ///
    /// Leading noise is skipped and missing components default to zero, so
    /// `"8"` is 8.0.0 and `"php-8.2.1RC1"` is 8.2.1. Returns `None` when the
    /// string holds no numeric version.
    pub fn canonicalize(version: &str) -> Option<Version> {
        let caps = COERCE_RE.captures(version)?;
        let component = |i: usize| -> Option<u64> {
            match caps.get(i) {
                Some(m) => m.as_str().parse().ok(),
                None => Some(0),
            }
        };

        Some(Version::new(component(1)?, component(2)?, component(3)?))
    }

    /// Check if a version string can be canonicalized
    pub fn is_valid(&self, version: &str) -> bool {
        Self::canonicalize(version).is_some()
    }

    /// Parse a constraint string into a constraint tree.
    ///
    /// Never fails: atoms that cannot be understood match no version.
    pub fn parse_constraints(&self, constraints: &str) -> Box<dyn ConstraintInterface> {
        self.parse_constraints_cached(constraints).constraints
    }

    /// Parse constraints and return a reusable, pre-parsed representation.
    pub fn parse_constraints_cached(&self, constraints: &str) -> ParsedConstraints {
        let pretty_constraint = constraints.to_string();
        let trimmed = constraints.trim();
        let mut errors = Vec::new();

        if trimmed.is_empty() {
            let mut all: Box<dyn ConstraintInterface> = Box::new(MatchAllConstraint::new());
            all.set_pretty_string(Some(pretty_constraint));
            return ParsedConstraints { constraints: all, errors };
        }

        let or_groups: Vec<Box<dyn ConstraintInterface>> = OR_CONSTRAINT_RE
            .split(trimmed)
            .map(|clause| self.parse_clause(clause, trimmed, &mut errors))
            .collect();

        let mut parsed = MultiConstraint::create(or_groups, false);
        parsed.set_pretty_string(Some(pretty_constraint));

        for error in &errors {
            log::warn!("{}", error);
        }

        ParsedConstraints {
            constraints: parsed,
            errors,
        }
    }

    fn parse_clause(
        &self,
        clause: &str,
        full: &str,
        errors: &mut Vec<ConstraintParseError>,
    ) -> Box<dyn ConstraintInterface> {
        let tokens = self.split_and_constraints(clause);
        if tokens.is_empty() {
            errors.push(ConstraintParseError::EmptyClause {
                constraint: full.to_string(),
            });
            return Box::new(MatchNoneConstraint::new());
        }

        let mut atoms: Vec<Box<dyn ConstraintInterface>> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let pretty = token.to_string();
            let mut atom = match token {
                AndToken::Atom(atom) => self.parse_constraint(&atom),
                AndToken::Hyphen(from, to) => self.parse_hyphen_constraint(&pretty, from, to),
                AndToken::Incomplete(text) => Err(ConstraintParseError::IncompleteRange {
                    constraint: text,
                }),
            }
            .unwrap_or_else(|err| {
                errors.push(err);
                Box::new(MatchNoneConstraint::new())
            });
            atom.set_pretty_string(Some(pretty));
            atoms.push(atom);
        }

        MultiConstraint::create(atoms, true)
    }

    /// Split an OR clause into AND atoms on whitespace and commas.
    ///
    /// An operator standing alone is glued to the following literal, and
    /// `A - B` becomes a single hyphen range.
    fn split_and_constraints<'a>(&self, clause: &'a str) -> Vec<AndToken<'a>> {
        let raw: Vec<&str> = clause
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .collect();

        let mut tokens = Vec::with_capacity(raw.len());
        let mut pending_operator: Option<&str> = None;
        let mut i = 0;

        while i < raw.len() {
            let token = raw[i];

            if OPERATOR_ONLY_RE.is_match(token) {
                if let Some(op) = pending_operator.replace(token) {
                    tokens.push(AndToken::Atom(op.to_string()));
                }
                i += 1;
                continue;
            }

            if let Some(op) = pending_operator.take() {
                tokens.push(AndToken::Atom(format!("{}{}", op, token)));
                i += 1;
                continue;
            }

            if raw.get(i + 1) == Some(&"-") {
                match raw.get(i + 2) {
                    Some(to) => tokens.push(AndToken::Hyphen(token, to)),
                    None => tokens.push(AndToken::Incomplete(format!("{} -", token))),
                }
                i += 3;
                continue;
            }

            tokens.push(AndToken::Atom(token.to_string()));
            i += 1;
        }

        if let Some(op) = pending_operator {
            tokens.push(AndToken::Atom(op.to_string()));
        }

        tokens
    }

    fn parse_constraint(
        &self,
        constraint: &str,
    ) -> Result<Box<dyn ConstraintInterface>, ConstraintParseError> {
        let stripped = STABILITY_FLAG_RE.replace(constraint, "");
        let stripped = if stripped.is_empty() { "*" } else { stripped.as_ref() };

        let caps = OPERATOR_RE
            .captures(stripped)
            .ok_or_else(|| ConstraintParseError::InvalidVersion {
                constraint: constraint.to_string(),
                version: stripped.to_string(),
            })?;
        let operator = caps.get(1).map_or("", |m| m.as_str());
        let literal = caps.get(2).map_or("", |m| m.as_str()).trim();

        if operator == "~>" {
            return Err(ConstraintParseError::InvalidOperator {
                constraint: constraint.to_string(),
                operator: operator.to_string(),
            });
        }

        if literal.is_empty() {
            return Err(ConstraintParseError::EmptyVersion {
                constraint: constraint.to_string(),
            });
        }

        let version = PartialVersion::parse(literal).ok_or_else(|| {
            ConstraintParseError::InvalidVersion {
                constraint: constraint.to_string(),
                version: literal.to_string(),
            }
        })?;

        let parsed = match operator {
            "~" => self.parse_tilde_constraint(version),
            "^" => self.parse_caret_constraint(version),
            _ => {
                let op: Operator = operator.parse().map_err(|_| {
                    ConstraintParseError::InvalidOperator {
                        constraint: constraint.to_string(),
                        operator: operator.to_string(),
                    }
                })?;
                self.parse_comparison(op, version)
            }
        };

        Ok(parsed)
    }

    fn parse_comparison(&self, op: Operator, version: PartialVersion) -> Box<dyn ConstraintInterface> {
        if version.is_any() {
            return match op {
                Operator::Equal | Operator::GreaterThanOrEqual | Operator::LessThanOrEqual => {
                    Box::new(MatchAllConstraint::new())
                }
                _ => Box::new(MatchNoneConstraint::new()),
            };
        }

        if let Some(exact) = version.exact() {
            return Box::new(Constraint::new(op, exact));
        }

        match op {
            Operator::Equal => self.parse_x_range_constraint(version),
            Operator::NotEqual => MultiConstraint::create(
                vec![
                    Box::new(Constraint::new(Operator::LessThan, version.floor())),
                    Box::new(Constraint::new(Operator::GreaterThanOrEqual, version.ceiling())),
                ],
                false,
            ),
            Operator::GreaterThan => {
                Box::new(Constraint::new(Operator::GreaterThanOrEqual, version.ceiling()))
            }
            Operator::GreaterThanOrEqual => {
                Box::new(Constraint::new(Operator::GreaterThanOrEqual, version.floor()))
            }
            Operator::LessThan => Box::new(Constraint::new(Operator::LessThan, version.floor())),
            Operator::LessThanOrEqual => {
                Box::new(Constraint::new(Operator::LessThan, version.ceiling()))
            }
        }
    }

    fn parse_x_range_constraint(&self, version: PartialVersion) -> Box<dyn ConstraintInterface> {
        self.range(Some(version.floor()), Some((Operator::LessThan, version.ceiling())))
    }

    fn parse_tilde_constraint(&self, version: PartialVersion) -> Box<dyn ConstraintInterface> {
        if version.is_any() {
            return Box::new(MatchAllConstraint::new());
        }

        let low = version.floor();
        let high = if version.minor.is_some() {
            low.next_minor()
        } else {
            low.next_major()
        };

        self.range(Some(low), Some((Operator::LessThan, high)))
    }

    fn parse_caret_constraint(&self, version: PartialVersion) -> Box<dyn ConstraintInterface> {
        if version.is_any() {
            return Box::new(MatchAllConstraint::new());
        }

        let low = version.floor();
        let high = match (version.major, version.minor, version.patch) {
            (Some(major), _, _) if major > 0 => low.next_major(),
            (_, None, _) => low.next_major(),
            (_, Some(minor), _) if minor > 0 => low.next_minor(),
            (_, _, None) => low.next_minor(),
            _ => low.next_patch(),
        };

        self.range(Some(low), Some((Operator::LessThan, high)))
    }

    fn parse_hyphen_constraint(
        &self,
        constraint: &str,
        from: &str,
        to: &str,
    ) -> Result<Box<dyn ConstraintInterface>, ConstraintParseError> {
        let parse = |literal: &str| {
            PartialVersion::parse(literal).ok_or_else(|| ConstraintParseError::InvalidVersion {
                constraint: constraint.to_string(),
                version: literal.to_string(),
            })
        };
        let from = parse(from)?;
        let to = parse(to)?;

        let low = if from.is_any() { None } else { Some(from.floor()) };
        let high = if to.is_any() {
            None
        } else if let Some(exact) = to.exact() {
            Some((Operator::LessThanOrEqual, exact))
        } else {
            Some((Operator::LessThan, to.ceiling()))
        };

        Ok(self.range(low, high))
    }

    fn range(
        &self,
        low: Option<Version>,
        high: Option<(Operator, Version)>,
    ) -> Box<dyn ConstraintInterface> {
        let mut bounds: Vec<Box<dyn ConstraintInterface>> = Vec::with_capacity(2);
        if let Some(low) = low {
            bounds.push(Box::new(Constraint::new(Operator::GreaterThanOrEqual, low)));
        }
        if let Some((op, high)) = high {
            bounds.push(Box::new(Constraint::new(op, high)));
        }
        MultiConstraint::create(bounds, true)
    }
}

impl Default for VersionParser {
    fn default() -> Self {
        Self::new()
    }
}

/// One AND-joined piece of a clause
#[derive(Debug, Clone, PartialEq, Eq)]
enum AndToken<'a> {
    Atom(String),
    Hyphen(&'a str, &'a str),
    Incomplete(String),
}

impl std::fmt::Display for AndToken<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AndToken::Atom(atom) => write!(f, "{}", atom),
            AndToken::Hyphen(from, to) => write!(f, "{} - {}", from, to),
            AndToken::Incomplete(text) => write!(f, "{}", text),
        }
    }
}

/// Reusable, pre-parsed constraints for repeated checks.
#[derive(Debug, Clone)]
pub struct ParsedConstraints {
    constraints: Box<dyn ConstraintInterface>,
    errors: Vec<ConstraintParseError>,
}

impl ParsedConstraints {
    /// Check a canonical version against the parsed constraints.
    pub fn matches(&self, version: &Version) -> bool {
        self.constraints.matches(version)
    }

    /// Canonicalize the version and check it against the parsed constraints.
    pub fn satisfies(&self, version: &str) -> bool {
        match VersionParser::canonicalize(version) {
            Some(v) => self.matches(&v),
            None => false,
        }
    }

    pub fn constraint(&self) -> &dyn ConstraintInterface {
        self.constraints.as_ref()
    }

    /// Atoms that could not be understood and were treated as matching nothing
    pub fn errors(&self) -> &[ConstraintParseError] {
        &self.errors
    }
}

impl std::fmt::Display for ParsedConstraints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.constraints)
    }
}
