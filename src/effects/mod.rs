//! Effect Code Generator.
//!
//! Every effect kind compiles to a [`CodeFragment`]: the statements that
//! must run before the rule returns, plus the fields it adds to the
//! returned effect table.
//!
//! ## Key Components
//!
//! - [`EffectKind`]: registry of every effect kind with its schema and
//!   generator
//! - [`EffectInstance`]: an authored effect (kind id, raw parameters,
//!   optional message)
//! - [`compile_effect`]: normalize, generate, check guard balance
//! - [`ChangeOp`]: add / subtract / multiply / divide / set, shared by
//!   every effect that changes a value
//!
//! Generators never fail on odd parameter values; those fall back to their
//! defaults during normalization. They fail only when the effect cannot
//! work under the rule's trigger or names an undeclared variable.

mod cards;
mod change;
mod creation;
mod economy;
mod event;
mod fragment;
mod jokers;
mod misc;
mod registry;
mod scoring;
mod target;

pub use change::{ChangeOp, CHANGE, OPERATION_ID, SCALE};
pub use event::{add_event, add_event_after};
pub use fragment::CodeFragment;
pub use registry::{EffectFn, EffectKind};

use serde::{Deserialize, Serialize};

use crate::core::lua::{is_balanced, lua_string};
use crate::core::{CodegenErrorKind, CodegenFallback, GenContext};
use crate::params::{normalize, ParamMap, ParamValue};

type Generated = Result<CodeFragment, CodegenErrorKind>;

/// One authored effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectInstance {
    /// Effect kind id.
    pub kind: String,
    #[serde(default)]
    pub params: ParamMap,
    /// Replaces the effect's own feedback message.
    #[serde(default)]
    pub custom_message: Option<String>,
}

impl EffectInstance {
    /// Create an effect without parameters.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: ParamMap::default(),
            custom_message: None,
        }
    }

    /// Set a parameter (builder pattern).
    #[must_use]
    pub fn with_param(mut self, id: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(id.into(), value.into());
        self
    }

    /// Set the custom message (builder pattern).
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.custom_message = Some(message.into());
        self
    }
}

/// Compile one effect.
///
/// Parameters are normalized against the kind's schema first; fallbacks
/// are appended to `fallbacks`. A prelude that opens more blocks than it
/// closes (or the reverse) is rejected.
pub fn compile_effect(
    effect: &EffectInstance,
    ctx: &GenContext<'_>,
    fallbacks: &mut Vec<CodegenFallback>,
) -> Result<CodeFragment, CodegenErrorKind> {
    let kind = EffectKind::from_id(&effect.kind)
        .ok_or_else(|| CodegenErrorKind::UnknownEffect(effect.kind.clone()))?;
    let (params, replaced) = normalize(kind.schema(), &effect.params);
    ctx.record(kind.id(), replaced, fallbacks);

    let mut fragment = (kind.generator())(&params, ctx)?;
    if !is_balanced(&fragment.prelude) {
        return Err(CodegenErrorKind::UnbalancedGuard(kind.id().to_string()));
    }
    if let Some(message) = effect.custom_message.as_deref().filter(|m| !m.is_empty()) {
        fragment.message = Some(lua_string(message));
    }
    Ok(fragment)
}
