//! Options consumed by [`DecompositionSolver`](crate::DecompositionSolver).
//!
//! Every enumerated option parses from and prints as the upper-case token
//! used on the command line (`BCH`, `LBBD`, `TSP`, `ATSP`, `OP`, `CONT`,
//! `BIN`, `SKIP`, `CUT`).

use std::time::Duration;

use thiserror::Error;

use crate::CutFamily;

/// Error returned when an option token is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {option} '{value}', expected one of {expected}")]
pub struct ParseOptionError {
    /// Option being parsed.
    pub option: &'static str,
    /// Rejected token.
    pub value: String,
    /// Accepted tokens, space separated.
    pub expected: &'static str,
}

macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $option:literal {
            $($(#[$vmeta:meta])* $variant:ident => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Command-line token for this option.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $token),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::config::ParseOptionError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                $(
                    if value.eq_ignore_ascii_case($token) {
                        return Ok(Self::$variant);
                    }
                )+
                Err($crate::config::ParseOptionError {
                    option: $option,
                    value: value.to_owned(),
                    expected: concat!($($token, " "),+),
                })
            }
        }
    };
}

pub(crate) use token_enum;

token_enum! {
    /// How the master relaxation is driven.
    Strategy, "strategy" {
        /// One branch-and-cut search with lazy cuts and heuristic incumbents.
        BranchAndCut => "BCH",
        /// Resolve the master after every round of cuts.
        LogicBenders => "LBBD",
    }
}

token_enum! {
    /// Subproblem checking a master candidate.
    SubproblemKind, "subproblem" {
        /// Undirected tour through the selected nodes.
        Tsp => "TSP",
        /// Directed tour through the selected nodes.
        Atsp => "ATSP",
        /// Orienteering restricted to the selected nodes.
        Op => "OP",
    }
}

token_enum! {
    /// Domain of the master edge columns.
    YBounds, "edge bounds" {
        /// Continuous in `[0, 1]`.
        Continuous => "CONT",
        /// Binary.
        Binary => "BIN",
    }
}

token_enum! {
    /// Handling of closed subtours found in an integral master candidate.
    IntegerSecPolicy, "integer SEC policy" {
        /// Fall through to the subproblem.
        Skip => "SKIP",
        /// Add the subtour elimination cut and return.
        CutImmediately => "CUT",
    }
}

/// Configuration of one decomposition solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecompositionConfig {
    /// Control strategy.
    pub strategy: Strategy,
    /// Subproblem used to validate candidates.
    pub subproblem: SubproblemKind,
    /// Cut families added for an over-budget candidate, in order.
    pub cuts: Vec<CutFamily>,
    /// Domain of the edge columns.
    pub y_bounds: YBounds,
    /// Handling of integral subtours.
    pub integer_sec: IntegerSecPolicy,
    /// Wall-clock limit for the whole solve.
    pub time_limit: Option<Duration>,
}

impl Default for DecompositionConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::BranchAndCut,
            subproblem: SubproblemKind::Tsp,
            cuts: vec![CutFamily::Sec, CutFamily::BendersV0],
            y_bounds: YBounds::Continuous,
            integer_sec: IntegerSecPolicy::Skip,
            time_limit: None,
        }
    }
}

impl DecompositionConfig {
    /// Replace the strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replace the subproblem.
    #[must_use]
    pub const fn with_subproblem(mut self, subproblem: SubproblemKind) -> Self {
        self.subproblem = subproblem;
        self
    }

    /// Replace the cut families.
    #[must_use]
    pub fn with_cuts(mut self, cuts: Vec<CutFamily>) -> Self {
        self.cuts = cuts;
        self
    }

    /// Replace the edge column domain.
    #[must_use]
    pub const fn with_y_bounds(mut self, y_bounds: YBounds) -> Self {
        self.y_bounds = y_bounds;
        self
    }

    /// Replace the integral subtour policy.
    #[must_use]
    pub const fn with_integer_sec(mut self, integer_sec: IntegerSecPolicy) -> Self {
        self.integer_sec = integer_sec;
        self
    }

    /// Replace the time limit.
    #[must_use]
    pub const fn with_time_limit(mut self, time_limit: Option<Duration>) -> Self {
        self.time_limit = time_limit;
        self
    }
}
