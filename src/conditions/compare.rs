//! Comparison operators shared by every numeric condition.
//!
//! A numeric condition only chooses its two operands; the operator set and
//! its Lua spelling live here.

use crate::params::options::{COMPARE_ALIASES, COMPARE_OPERATORS};
use crate::params::{NormalizedParams, ParamSpec};

/// Comparison between two Lua numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterEquals,
    LessThan,
    LessEquals,
}

impl CompareOp {
    /// Parse a canonical operator token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "equals" => CompareOp::Equals,
            "not_equals" => CompareOp::NotEquals,
            "greater_than" => CompareOp::GreaterThan,
            "greater_equals" => CompareOp::GreaterEquals,
            "less_than" => CompareOp::LessThan,
            "less_equals" => CompareOp::LessEquals,
            _ => return None,
        })
    }

    /// Operator read from the shared `operator` parameter.
    ///
    /// Normalization guarantees a canonical token; anything else reads as
    /// `Equals`, the schema default.
    #[must_use]
    pub fn from_params(params: &NormalizedParams) -> Self {
        Self::from_token(params.text(OPERATOR_ID)).unwrap_or(CompareOp::Equals)
    }

    /// Lua spelling.
    #[must_use]
    pub const fn lua(self) -> &'static str {
        match self {
            CompareOp::Equals => "==",
            CompareOp::NotEquals => "~=",
            CompareOp::GreaterThan => ">",
            CompareOp::GreaterEquals => ">=",
            CompareOp::LessThan => "<",
            CompareOp::LessEquals => "<=",
        }
    }

    /// `lhs <op> rhs`.
    #[must_use]
    pub fn apply(self, lhs: &str, rhs: &str) -> String {
        format!("{lhs} {} {rhs}", self.lua())
    }
}

/// Id of the shared operator parameter.
pub const OPERATOR_ID: &str = "operator";

/// Schema entry of the shared operator parameter.
pub const OPERATOR: ParamSpec =
    ParamSpec::select_with(OPERATOR_ID, COMPARE_OPERATORS, COMPARE_ALIASES, "equals");
