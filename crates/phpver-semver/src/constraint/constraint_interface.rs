//! The node type of a parsed requirement

use super::Operator;
use crate::Version;

/// A node of the constraint tree.
///
/// Leaves are single comparisons or the trivial match-all / match-none
/// constraints; inner nodes are AND / OR groups.
pub trait ConstraintInterface: std::fmt::Debug + std::fmt::Display + Send + Sync {
    fn matches(&self, version: &Version) -> bool;

    /// The requirement as the user wrote it, falling back to the normalized form
    fn pretty_string(&self) -> String;

    fn set_pretty_string(&mut self, pretty: Option<String>);

    fn clone_box(&self) -> Box<dyn ConstraintInterface>;

    /// Operator and bound, for a single comparison
    fn as_constraint(&self) -> Option<(Operator, &Version)> {
        None
    }

    fn is_match_all(&self) -> bool {
        false
    }

    fn is_match_none(&self) -> bool {
        false
    }

    /// Members and conjunctiveness, for an AND / OR group
    fn as_multi_constraint(&self) -> Option<(&[Box<dyn ConstraintInterface>], bool)> {
        None
    }
}

impl Clone for Box<dyn ConstraintInterface> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
