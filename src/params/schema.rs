//! Parameter schemas.
//!
//! Every effect and condition kind declares a static slice of `ParamSpec`s.
//! The editor builds its forms from the same data; the compiler only needs
//! the type, default, bounds, aliases and visibility rule of each field.

use crate::core::lua::lua_number;

use super::value::ParamValue;

/// Type of a parameter and its constraints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamType {
    /// Number, clamped to the optional bounds.
    Number { min: Option<f64>, max: Option<f64> },

    /// One of a list of tokens.
    ///
    /// `aliases` map accepted spellings to canonical tokens. An `open`
    /// select also accepts author-entered tokens outside the list (custom
    /// rarities, keys of authored objects); those are namespaced later by
    /// the key resolver.
    Select {
        options: &'static [&'static str],
        aliases: &'static [(&'static str, &'static str)],
        open: bool,
    },

    /// Free text.
    Text,

    /// Boolean.
    Checkbox,
}

/// Default used when a parameter is absent, hidden or unusable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DefaultValue {
    Number(f64),
    Text(&'static str),
    Flag(bool),
}

impl DefaultValue {
    /// Convert to an owned parameter value.
    #[must_use]
    pub fn to_value(self) -> ParamValue {
        match self {
            DefaultValue::Number(v) => ParamValue::Number(v),
            DefaultValue::Text(s) => ParamValue::Text(s.to_string()),
            DefaultValue::Flag(b) => ParamValue::Flag(b),
        }
    }

    /// Text form, as it appears in diagnostics.
    #[must_use]
    pub fn describe(self) -> String {
        match self {
            DefaultValue::Number(v) => lua_number(v),
            DefaultValue::Text(s) => s.to_string(),
            DefaultValue::Flag(b) => b.to_string(),
        }
    }
}

/// Visibility rule: the parameter only exists while `param` holds one of `values`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShowWhen {
    pub param: &'static str,
    pub values: &'static [&'static str],
}

/// Declaration of one parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamSpec {
    pub id: &'static str,
    pub ty: ParamType,
    pub default: DefaultValue,
    pub show_when: Option<ShowWhen>,
}

impl ParamSpec {
    /// Unbounded number.
    #[must_use]
    pub const fn number(id: &'static str, default: f64) -> Self {
        Self {
            id,
            ty: ParamType::Number { min: None, max: None },
            default: DefaultValue::Number(default),
            show_when: None,
        }
    }

    /// Number with a lower bound.
    #[must_use]
    pub const fn at_least(id: &'static str, default: f64, min: f64) -> Self {
        Self {
            id,
            ty: ParamType::Number {
                min: Some(min),
                max: None,
            },
            default: DefaultValue::Number(default),
            show_when: None,
        }
    }

    /// Number within `[min, max]`.
    #[must_use]
    pub const fn bounded(id: &'static str, default: f64, min: f64, max: f64) -> Self {
        Self {
            id,
            ty: ParamType::Number {
                min: Some(min),
                max: Some(max),
            },
            default: DefaultValue::Number(default),
            show_when: None,
        }
    }

    /// Closed select without aliases.
    #[must_use]
    pub const fn select(
        id: &'static str,
        options: &'static [&'static str],
        default: &'static str,
    ) -> Self {
        Self {
            id,
            ty: ParamType::Select {
                options,
                aliases: &[],
                open: false,
            },
            default: DefaultValue::Text(default),
            show_when: None,
        }
    }

    /// Closed select with aliases.
    #[must_use]
    pub const fn select_with(
        id: &'static str,
        options: &'static [&'static str],
        aliases: &'static [(&'static str, &'static str)],
        default: &'static str,
    ) -> Self {
        Self {
            id,
            ty: ParamType::Select {
                options,
                aliases,
                open: false,
            },
            default: DefaultValue::Text(default),
            show_when: None,
        }
    }

    /// Select that also accepts author-entered tokens.
    #[must_use]
    pub const fn open_select(
        id: &'static str,
        options: &'static [&'static str],
        aliases: &'static [(&'static str, &'static str)],
        default: &'static str,
    ) -> Self {
        Self {
            id,
            ty: ParamType::Select {
                options,
                aliases,
                open: true,
            },
            default: DefaultValue::Text(default),
            show_when: None,
        }
    }

    /// Free text.
    #[must_use]
    pub const fn text(id: &'static str, default: &'static str) -> Self {
        Self {
            id,
            ty: ParamType::Text,
            default: DefaultValue::Text(default),
            show_when: None,
        }
    }

    /// Checkbox.
    #[must_use]
    pub const fn checkbox(id: &'static str, default: bool) -> Self {
        Self {
            id,
            ty: ParamType::Checkbox,
            default: DefaultValue::Flag(default),
            show_when: None,
        }
    }

    /// Only show this parameter while `param` holds one of `values`.
    #[must_use]
    pub const fn when(self, param: &'static str, values: &'static [&'static str]) -> Self {
        Self {
            show_when: Some(ShowWhen { param, values }),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SCHEMA: &[ParamSpec] = &[
        ParamSpec::select("mode", &["add", "set"], "add"),
        ParamSpec::at_least("value", 1.0, 0.0),
        ParamSpec::text("key", "").when("mode", &["set"]),
    ];

    #[test]
    fn test_const_builders() {
        assert_eq!(SCHEMA.len(), 3);
        assert_eq!(SCHEMA[1].default, DefaultValue::Number(1.0));
        assert_eq!(
            SCHEMA[2].show_when,
            Some(ShowWhen {
                param: "mode",
                values: &["set"]
            })
        );
    }

    #[test]
    fn test_default_describe() {
        assert_eq!(DefaultValue::Number(2.0).describe(), "2");
        assert_eq!(DefaultValue::Text("none").describe(), "none");
        assert_eq!(DefaultValue::Flag(false).to_value(), ParamValue::Flag(false));
    }
}
