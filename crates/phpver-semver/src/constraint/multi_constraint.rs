//! AND / OR groups of constraints

use std::fmt;
use thiserror::Error;

use super::{ConstraintInterface, MatchAllConstraint, MatchNoneConstraint};
use crate::Version;

#[derive(Error, Debug)]
pub enum MultiConstraintError {
    #[error("A constraint group needs at least two members")]
    TooFewConstraints,
}

/// An AND group (conjunctive, all members must match) or an OR group
/// (disjunctive, any member may match)
#[derive(Debug, Clone)]
pub struct MultiConstraint {
    constraints: Vec<Box<dyn ConstraintInterface>>,
    conjunctive: bool,
    pretty_string: Option<String>,
}

impl MultiConstraint {
    /// Group `constraints` as given, without simplification
    pub fn new(
        constraints: Vec<Box<dyn ConstraintInterface>>,
        conjunctive: bool,
    ) -> Result<Self, MultiConstraintError> {
        if constraints.len() < 2 {
            return Err(MultiConstraintError::TooFewConstraints);
        }

        Ok(MultiConstraint {
            constraints,
            conjunctive,
            pretty_string: None,
        })
    }

    /// Create a constraint from the given members, collapsing trivial cases.
    ///
    /// An empty list matches everything. Match-all members are dropped from a
    /// conjunction and absorb a disjunction; match-none members do the opposite.
    pub fn create(
        constraints: Vec<Box<dyn ConstraintInterface>>,
        conjunctive: bool,
    ) -> Box<dyn ConstraintInterface> {
        if conjunctive {
            if constraints.iter().any(|c| c.is_match_none()) {
                return Box::new(MatchNoneConstraint::new());
            }
        } else if constraints.iter().any(|c| c.is_match_all()) {
            return Box::new(MatchAllConstraint::new());
        }

        let total = constraints.len();
        let mut kept: Vec<Box<dyn ConstraintInterface>> = constraints
            .into_iter()
            .filter(|c| {
                if conjunctive {
                    !c.is_match_all()
                } else {
                    !c.is_match_none()
                }
            })
            .collect();

        match kept.len() {
            0 if conjunctive || total == 0 => Box::new(MatchAllConstraint::new()),
            0 => Box::new(MatchNoneConstraint::new()),
            1 => kept.swap_remove(0),
            _ => Box::new(MultiConstraint {
                constraints: kept,
                conjunctive,
                pretty_string: None,
            }),
        }
    }

    pub fn constraints(&self) -> &[Box<dyn ConstraintInterface>] {
        &self.constraints
    }

    pub fn is_conjunctive(&self) -> bool {
        self.conjunctive
    }

    pub fn is_disjunctive(&self) -> bool {
        !self.conjunctive
    }
}

impl ConstraintInterface for MultiConstraint {
    fn matches(&self, version: &Version) -> bool {
        if self.conjunctive {
            self.constraints.iter().all(|c| c.matches(version))
        } else {
            self.constraints.iter().any(|c| c.matches(version))
        }
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

    fn as_multi_constraint(&self) -> Option<(&[Box<dyn ConstraintInterface>], bool)> {
        Some((&self.constraints, self.conjunctive))
    }
}

impl fmt::Display for MultiConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.conjunctive { " " } else { " || " };
        f.write_str("[")?;
        for (i, member) in self.constraints.iter().enumerate() {
            if i > 0 {
                f.write_str(separator)?;
            }
            write!(f, "{}", member)?;
        }
        f.write_str("]")
    }
}
