//! Parameter normalization.
//!
//! Turns a raw `ParamMap` into `NormalizedParams` that satisfy the schema:
//! missing fields get their default, aliases become canonical tokens,
//! numbers are clamped, and parameters hidden by their `showWhen` rule are
//! reset to the default so they never reach generated code.
//!
//! Unusable values never fail: they fall back to the default and produce a
//! `ParamFallback` record.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::lua::lua_number;

use super::schema::{ParamSpec, ParamType};
use super::value::{ParamMap, ParamValue};

/// Why a raw value was replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackReason {
    /// Select value matches no option or alias.
    UnknownOption,
    /// Value has the wrong shape for the parameter type.
    WrongType,
    /// Number outside the declared bounds (clamped).
    OutOfRange,
    /// Number is NaN or infinite.
    NotFinite,
}

/// A parameter value that was replaced during normalization.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamFallback {
    pub param: &'static str,
    pub raw: String,
    pub used: String,
    pub reason: FallbackReason,
}

/// A numeric parameter: a literal or a reference to a per-object variable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Numeric<'a> {
    Literal(f64),
    Variable(&'a str),
}

/// Parameter values that satisfy their schema.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedParams {
    values: FxHashMap<&'static str, ParamValue>,
}

impl NormalizedParams {
    /// Get a value by parameter id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ParamValue> {
        self.values.get(id)
    }

    /// Text or select token; empty when absent.
    #[must_use]
    pub fn text(&self, id: &str) -> &str {
        self.values
            .get(id)
            .and_then(ParamValue::as_text)
            .unwrap_or_default()
    }

    /// Check a select token.
    #[must_use]
    pub fn is(&self, id: &str, token: &str) -> bool {
        self.text(id) == token
    }

    /// Checkbox state; false when absent.
    #[must_use]
    pub fn flag(&self, id: &str) -> bool {
        self.values
            .get(id)
            .and_then(ParamValue::as_flag)
            .unwrap_or(false)
    }

    /// Numeric value; literal zero when absent.
    #[must_use]
    pub fn numeric(&self, id: &str) -> Numeric<'_> {
        match self.values.get(id) {
            Some(ParamValue::Number(v)) => Numeric::Literal(*v),
            Some(ParamValue::Variable { var }) => Numeric::Variable(var),
            _ => Numeric::Literal(0.0),
        }
    }

    /// Literal number, ignoring variable references (they read as zero).
    #[must_use]
    pub fn number(&self, id: &str) -> f64 {
        match self.numeric(id) {
            Numeric::Literal(v) => v,
            Numeric::Variable(_) => 0.0,
        }
    }
}

/// Normalize raw values against a schema.
///
/// Returns the normalized parameters and every fallback that happened.
pub fn normalize(
    schema: &'static [ParamSpec],
    raw: &ParamMap,
) -> (NormalizedParams, Vec<ParamFallback>) {
    let mut values: FxHashMap<&'static str, ParamValue> = FxHashMap::default();
    let mut fallbacks = Vec::new();

    for spec in schema {
        let value = match raw.get(spec.id) {
            None => spec.default.to_value(),
            Some(value) => match coerce(spec, value) {
                Coerced::Value(v) => v,
                Coerced::Fallback(v, reason) => {
                    let fallback = ParamFallback {
                        param: spec.id,
                        raw: value.describe(),
                        used: describe_value(&v),
                        reason,
                    };
                    tracing::warn!(
                        param = spec.id,
                        raw = %fallback.raw,
                        used = %fallback.used,
                        reason = ?reason,
                        "parameter value replaced"
                    );
                    fallbacks.push(fallback);
                    v
                }
            },
        };
        values.insert(spec.id, value);
    }

    // Visibility is resolved in schema order so a hidden controller hides
    // its dependents as well.
    let mut hidden: FxHashSet<&'static str> = FxHashSet::default();
    for spec in schema {
        let Some(rule) = spec.show_when else {
            continue;
        };
        let controller = values
            .get(rule.param)
            .map(describe_value)
            .unwrap_or_default();
        if hidden.contains(rule.param) || !rule.values.contains(&controller.as_str()) {
            hidden.insert(spec.id);
            values.insert(spec.id, spec.default.to_value());
        }
    }

    (NormalizedParams { values }, fallbacks)
}

enum Coerced {
    Value(ParamValue),
    Fallback(ParamValue, FallbackReason),
}

fn coerce(spec: &ParamSpec, value: &ParamValue) -> Coerced {
    let fallback = |reason| Coerced::Fallback(spec.default.to_value(), reason);

    match spec.ty {
        ParamType::Number { min, max } => {
            let number = match value {
                ParamValue::Number(v) => *v,
                ParamValue::Text(s) => match s.trim().parse::<f64>() {
                    Ok(v) => v,
                    Err(_) if s.trim().is_empty() => return Coerced::Value(spec.default.to_value()),
                    Err(_) => return fallback(FallbackReason::WrongType),
                },
                ParamValue::Variable { var } => {
                    return Coerced::Value(ParamValue::Variable { var: var.clone() })
                }
                ParamValue::Flag(_) => return fallback(FallbackReason::WrongType),
            };
            if !number.is_finite() {
                return fallback(FallbackReason::NotFinite);
            }
            let mut clamped = number;
            if let Some(min) = min {
                clamped = clamped.max(min);
            }
            if let Some(max) = max {
                clamped = clamped.min(max);
            }
            if clamped == number {
                Coerced::Value(ParamValue::Number(number))
            } else {
                Coerced::Fallback(ParamValue::Number(clamped), FallbackReason::OutOfRange)
            }
        }

        ParamType::Select {
            options,
            aliases,
            open,
        } => {
            let token = match value {
                ParamValue::Text(s) => s.trim().to_string(),
                ParamValue::Number(v) => lua_number(*v),
                ParamValue::Flag(b) => b.to_string(),
                ParamValue::Variable { .. } => return fallback(FallbackReason::WrongType),
            };
            if token.is_empty() {
                return Coerced::Value(spec.default.to_value());
            }
            match resolve_option(&token, options, aliases, open) {
                Some(canonical) => Coerced::Value(ParamValue::Text(canonical)),
                None => fallback(FallbackReason::UnknownOption),
            }
        }

        ParamType::Text => match value {
            ParamValue::Text(s) => Coerced::Value(ParamValue::Text(s.trim().to_string())),
            ParamValue::Number(v) => Coerced::Value(ParamValue::Text(lua_number(*v))),
            ParamValue::Flag(b) => Coerced::Value(ParamValue::Text(b.to_string())),
            ParamValue::Variable { .. } => fallback(FallbackReason::WrongType),
        },

        ParamType::Checkbox => match value {
            ParamValue::Flag(b) => Coerced::Value(ParamValue::Flag(*b)),
            ParamValue::Number(v) => Coerced::Value(ParamValue::Flag(*v != 0.0)),
            ParamValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Coerced::Value(ParamValue::Flag(true)),
                "false" | "no" | "off" | "0" | "" => Coerced::Value(ParamValue::Flag(false)),
                _ => fallback(FallbackReason::WrongType),
            },
            ParamValue::Variable { .. } => fallback(FallbackReason::WrongType),
        },
    }
}

/// Map a token onto a canonical option.
///
/// Exact option, then alias, then case-insensitive option; open selects
/// keep anything else as entered.
fn resolve_option(
    token: &str,
    options: &[&str],
    aliases: &[(&str, &str)],
    open: bool,
) -> Option<String> {
    if options.contains(&token) {
        return Some(token.to_string());
    }
    if let Some((_, canonical)) = aliases
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(token))
    {
        return Some((*canonical).to_string());
    }
    if let Some(option) = options.iter().find(|o| o.eq_ignore_ascii_case(token)) {
        return Some((*option).to_string());
    }
    open.then(|| token.to_string())
}

fn describe_value(value: &ParamValue) -> String {
    match value {
        ParamValue::Number(v) => lua_number(*v),
        other => other.describe(),
    }
}
