//! The constraint tree a requirement string parses into

mod constraint;
mod constraint_interface;
mod multi_constraint;
mod operator;
mod trivial;

pub use constraint::Constraint;
pub use constraint_interface::ConstraintInterface;
pub use multi_constraint::{MultiConstraint, MultiConstraintError};
pub use operator::{InvalidOperatorError, Operator};
pub use trivial::{MatchAllConstraint, MatchNoneConstraint};
