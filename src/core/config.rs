//! Compiler configuration.
//!
//! The external metadata collaborator supplies the mod prefix; everything
//! else has a default. `ForgeConfig` follows the builder style used for
//! the rest of the crate's configuration types.

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::lua::is_lua_identifier;

/// How several rules on the same trigger combine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RulePolicy {
    /// Every rule whose conditions hold runs, in authored order.
    #[default]
    Accumulate,
    /// Only the first rule whose conditions hold runs (`if`/`elseif` chain).
    FirstMatch,
}

/// Configuration for one compilation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForgeConfig {
    /// Namespace prefix unique to the mod.
    pub mod_prefix: String,

    /// Rule combination policy, applied to every trigger of every object.
    #[serde(default)]
    pub rule_policy: RulePolicy,

    /// Emit a `-- rule <id>` comment above each rule block.
    #[serde(default)]
    pub annotate_rules: bool,

    /// Seconds waited after effects that schedule card creation.
    #[serde(default = "default_post_effect_delay")]
    pub post_effect_delay: f64,
}

fn default_post_effect_delay() -> f64 {
    0.6
}

impl ForgeConfig {
    /// Create a configuration for the given mod prefix.
    pub fn new(mod_prefix: impl Into<String>) -> Self {
        Self {
            mod_prefix: mod_prefix.into(),
            rule_policy: RulePolicy::default(),
            annotate_rules: false,
            post_effect_delay: default_post_effect_delay(),
        }
    }

    /// Set the rule policy (builder pattern).
    #[must_use]
    pub fn with_rule_policy(mut self, policy: RulePolicy) -> Self {
        self.rule_policy = policy;
        self
    }

    /// Emit rule comments (builder pattern).
    #[must_use]
    pub fn annotated(mut self) -> Self {
        self.annotate_rules = true;
        self
    }

    /// Set the delay after creation effects (builder pattern).
    #[must_use]
    pub fn with_post_effect_delay(mut self, seconds: f64) -> Self {
        self.post_effect_delay = seconds;
        self
    }

    /// Check the configuration before an export.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_lua_identifier(&self.mod_prefix) {
            return Err(ValidationError::InvalidModPrefix(self.mod_prefix.clone()));
        }
        Ok(())
    }
}
