//! Single version constraint implementation

use std::fmt;

use super::{ConstraintInterface, Operator};
use crate::{Comparator, Version};

/// A single version constraint (e.g., ">= 8.1.0")
#[derive(Debug, Clone)]
pub struct Constraint {
    operator: Operator,
    version: Version,
    pretty_string: Option<String>,
}

impl Constraint {
    /// Create a new constraint
    pub fn new(operator: Operator, version: Version) -> Self {
        Constraint {
            operator,
            version,
            pretty_string: None,
        }
    }

    /// Get the version
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Get the operator
    pub fn operator(&self) -> Operator {
        self.operator
    }
}

impl ConstraintInterface for Constraint {
    fn matches(&self, version: &Version) -> bool {
        Comparator::compare(version, self.operator, &self.version)
    }

    fn pretty_string(&self) -> String {
        self.pretty_string
            .clone()
            .unwrap_or_else(|| self.to_string())
    }

    fn set_pretty_string(&mut self, pretty: Option<String>) {
        self.pretty_string = pretty;
    }

    fn clone_box(&self) -> Box<dyn ConstraintInterface> {
        Box::new(self.clone())
    }

    fn as_constraint(&self) -> Option<(Operator, &Version)> {
        Some((self.operator, &self.version))
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operator, self.version)
    }
}
