//! Generation context.
//!
//! Everything a generator may read besides its own parameters: the mod
//! prefix, the object being compiled, the trigger the rule runs under and
//! the object's declared variables. Generators never mutate it.

use crate::params::{NormalizedParams, Numeric, ParamFallback};
use crate::triggers::{CardFocus, TriggerKind};

use super::config::ForgeConfig;
use super::error::{CodegenErrorKind, CodegenFallback};
use super::lua::{lua_number, lua_string};
use super::object::{ObjectType, UserVariable};

/// Read-only input shared by effect and condition generators.
#[derive(Clone, Copy, Debug)]
pub struct GenContext<'a> {
    pub config: &'a ForgeConfig,
    pub object_type: ObjectType,
    /// Resolved key of the object being compiled.
    pub object_key: &'a str,
    pub trigger: TriggerKind,
    pub variables: &'a [UserVariable],
    /// Position of the current rule within the object.
    pub rule_index: usize,
    /// Position of the current effect within its rule.
    pub effect_index: usize,
}

impl<'a> GenContext<'a> {
    /// Create a context for the first effect of a rule.
    pub fn new(
        config: &'a ForgeConfig,
        object_type: ObjectType,
        object_key: &'a str,
        trigger: TriggerKind,
        variables: &'a [UserVariable],
    ) -> Self {
        Self {
            config,
            object_type,
            object_key,
            trigger,
            variables,
            rule_index: 0,
            effect_index: 0,
        }
    }

    /// Same context, positioned at another rule (builder pattern).
    #[must_use]
    pub fn at_rule(self, rule_index: usize) -> Self {
        Self {
            rule_index,
            effect_index: 0,
            ..self
        }
    }

    /// Same context, positioned at another effect (builder pattern).
    #[must_use]
    pub fn at_effect(self, effect_index: usize) -> Self {
        Self {
            effect_index,
            ..self
        }
    }

    /// Namespace prefix of the mod.
    #[must_use]
    pub fn mod_prefix(&self) -> &'a str {
        &self.config.mod_prefix
    }

    /// The card the trigger puts in focus.
    #[must_use]
    pub fn focus(&self) -> CardFocus {
        self.trigger.focus(self.object_type)
    }

    /// A Lua local name unique within the rule.
    ///
    /// The first effect gets `base`; later effects get `base_<n>` with
    /// `n` their one-based position, so two effects in one rule never
    /// shadow each other's locals.
    #[must_use]
    pub fn local_name(&self, base: &str) -> String {
        if self.effect_index == 0 {
            base.to_string()
        } else {
            format!("{base}_{}", self.effect_index + 1)
        }
    }

    /// Deterministic pseudorandom seed literal for this object.
    #[must_use]
    pub fn seed(&self, suffix: &str) -> String {
        lua_string(&format!("{}_{suffix}", self.object_key))
    }

    /// Lua path of a declared variable.
    pub fn variable(&self, kind: &str, name: &str) -> Result<String, CodegenErrorKind> {
        if self.variables.iter().any(|v| v.name == name) {
            Ok(format!("{}.{name}", self.object_type.variable_table()))
        } else {
            Err(CodegenErrorKind::UnknownVariable {
                kind: kind.to_string(),
                name: name.to_string(),
            })
        }
    }

    /// Render a numeric parameter as a literal or variable read.
    pub fn numeric(
        &self,
        params: &NormalizedParams,
        id: &str,
        kind: &str,
    ) -> Result<String, CodegenErrorKind> {
        match params.numeric(id) {
            Numeric::Literal(v) => Ok(lua_number(v)),
            Numeric::Variable(name) => self.variable(kind, name),
        }
    }

    /// Record parameter fallbacks of one kind at the current rule.
    pub fn record(
        &self,
        kind: &'static str,
        fallbacks: Vec<ParamFallback>,
        sink: &mut Vec<CodegenFallback>,
    ) {
        sink.extend(fallbacks.into_iter().map(|fallback| CodegenFallback {
            rule: self.rule_index,
            kind,
            fallback,
        }));
    }

    /// Error for a kind that needs a single focused card.
    #[must_use]
    pub fn no_focus(&self, kind: &str) -> CodegenErrorKind {
        CodegenErrorKind::NoCardInFocus {
            kind: kind.to_string(),
            trigger: self.trigger.id().to_string(),
        }
    }

    /// Error for a kind that cannot run under the current trigger.
    #[must_use]
    pub fn wrong_trigger(&self, kind: &str) -> CodegenErrorKind {
        CodegenErrorKind::WrongTrigger {
            kind: kind.to_string(),
            trigger: self.trigger.id().to_string(),
        }
    }
}
