//! Constraints that ignore the version entirely

use std::fmt;

use super::ConstraintInterface;
use crate::Version;

macro_rules! trivial_constraint {
    ($(#[$meta:meta])* $name:ident, $result:expr, $symbol:literal, $flag:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            pretty_string: Option<String>,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }
        }

        impl ConstraintInterface for $name {
            fn matches(&self, _version: &Version) -> bool {
                $result
            }

            fn pretty_string(&self) -> String {
                self.pretty_string
                    .clone()
                    .unwrap_or_else(|| $symbol.to_string())
            }

            fn set_pretty_string(&mut self, pretty: Option<String>) {
                self.pretty_string = pretty;
            }

            fn clone_box(&self) -> Box<dyn ConstraintInterface> {
                Box::new(self.clone())
            }

            fn $flag(&self) -> bool {
                true
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str($symbol)
            }
        }
    };
}

trivial_constraint!(
    /// Satisfied by every version; an empty requirement parses to this
    MatchAllConstraint,
    true,
    "*",
    is_match_all
);

trivial_constraint!(
    /// Satisfied by no version.
    ///
    /// Malformed atoms parse to this, so they sink their own clause only.
    MatchNoneConstraint,
    false,
    "[]",
    is_match_none
);
