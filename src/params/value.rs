//! Raw parameter values as the editor stores them.
//!
//! Values arrive loosely typed (a number may come in as text, a checkbox as
//! `"true"`); the normalizer turns them into the type their schema asks for.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Value of one effect or condition parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Numeric literal.
    Number(f64),
    /// Checkbox state.
    Flag(bool),
    /// Reference to a per-object variable (`{"var": "name"}`).
    Variable { var: String },
    /// Text, select tokens and keys.
    Text(String),
}

impl ParamValue {
    /// Create a variable reference.
    pub fn variable(name: impl Into<String>) -> Self {
        ParamValue::Variable { var: name.into() }
    }

    /// Get as number if this is a Number value.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as bool if this is a Flag value.
    #[must_use]
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ParamValue::Flag(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string reference if this is a Text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the variable name if this is a Variable value.
    #[must_use]
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            ParamValue::Variable { var } => Some(var),
            _ => None,
        }
    }

    /// Short description used in fallback diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            ParamValue::Number(v) => v.to_string(),
            ParamValue::Flag(v) => v.to_string(),
            ParamValue::Variable { var } => format!("var:{var}"),
            ParamValue::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Number(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Number(v as f64)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Number(f64::from(v))
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Flag(v)
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

/// Raw parameter map of one effect or condition instance.
pub type ParamMap = FxHashMap<String, ParamValue>;

/// Build a `ParamMap` from `(id, value)` pairs.
pub fn param_map<K, V, I>(pairs: I) -> ParamMap
where
    K: Into<String>,
    V: Into<ParamValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
