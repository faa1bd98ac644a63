//! Arithmetic shared by effects that change a counter or scale a value.

use crate::params::options::{CHANGE_ALIASES, CHANGE_OPERATIONS, SCALE_ALIASES, SCALE_OPERATIONS};
use crate::params::{NormalizedParams, ParamSpec};

/// How an effect changes a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Set,
}

impl ChangeOp {
    /// Parse a canonical operation token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "add" => ChangeOp::Add,
            "subtract" => ChangeOp::Subtract,
            "multiply" => ChangeOp::Multiply,
            "divide" => ChangeOp::Divide,
            "set" => ChangeOp::Set,
            _ => return None,
        })
    }

    /// Operation read from the `operation` parameter.
    #[must_use]
    pub fn from_params(params: &NormalizedParams) -> Self {
        Self::from_token(params.text(OPERATION_ID)).unwrap_or(ChangeOp::Add)
    }

    /// New value of `current` after the operation.
    #[must_use]
    pub fn result(self, current: &str, value: &str) -> String {
        match self {
            ChangeOp::Add => format!("{current} + {value}"),
            ChangeOp::Subtract => format!("{current} - {value}"),
            ChangeOp::Multiply => format!("{current} * {value}"),
            ChangeOp::Divide => format!("{current} / {value}"),
            ChangeOp::Set => value.to_string(),
        }
    }

    /// Assignment statement applying the operation to `target`.
    #[must_use]
    pub fn assign(self, target: &str, value: &str) -> String {
        format!("{target} = {}", self.result(target, value))
    }

    /// Signed difference for host functions that take a delta
    /// (`ease_dollars`, `G.hand:change_size`).
    #[must_use]
    pub fn delta(self, current: &str, value: &str) -> String {
        match self {
            ChangeOp::Add => value.to_string(),
            // `--` would start a Lua comment.
            ChangeOp::Subtract if value.starts_with('-') => format!("-({value})"),
            ChangeOp::Subtract => format!("-{value}"),
            ChangeOp::Set => format!("{value} - {current}"),
            ChangeOp::Multiply => format!("{current} * {value} - {current}"),
            ChangeOp::Divide => format!("{current} / {value} - {current}"),
        }
    }
}

pub const OPERATION_ID: &str = "operation";

/// add / subtract / set.
pub const CHANGE: ParamSpec =
    ParamSpec::select_with(OPERATION_ID, CHANGE_OPERATIONS, CHANGE_ALIASES, "add");

/// add / subtract / multiply / divide / set.
pub const SCALE: ParamSpec =
    ParamSpec::select_with(OPERATION_ID, SCALE_OPERATIONS, SCALE_ALIASES, "add");
