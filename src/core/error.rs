//! Error taxonomy.
//!
//! - `ValidationError`: object metadata is missing or malformed; aborts a whole export.
//! - `CodegenError`: one rule cannot be compiled; aborts only its object.
//! - `OrderingViolation`: the load-order encoder produced a non-permutation.
//! - `ExportError`: what the top-level export call surfaces.
//!
//! Unrecognized parameter values are not errors: they fall back to
//! defaults and are reported as `CodegenFallback` diagnostics.

use thiserror::Error;

use crate::params::ParamFallback;

use super::object::ObjectType;

/// A parameter of one effect or condition fell back to its default.
///
/// Not an error: compilation continues with the default value.
#[derive(Clone, Debug, PartialEq)]
pub struct CodegenFallback {
    /// Index of the rule in the object's rule list.
    pub rule: usize,
    /// Effect or condition kind id.
    pub kind: &'static str,
    pub fallback: ParamFallback,
}

/// Object metadata rejected before compilation starts.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("mod prefix {0:?} is not a valid identifier")]
    InvalidModPrefix(String),

    #[error("{object_type} object {id:?} has an empty key")]
    EmptyObjectKey { object_type: ObjectType, id: String },

    /// The key would not survive as a Lua key and file name as written.
    #[error("{object_type} object {id:?} has key {key:?}; keys must be lowercase ASCII words joined by `_`")]
    InvalidObjectKey {
        object_type: ObjectType,
        id: String,
        key: String,
    },

    #[error("{object_type} key {key:?} is claimed by both {first:?} and {second:?}")]
    DuplicateObjectKey {
        object_type: ObjectType,
        key: String,
        first: String,
        second: String,
    },

    #[error("object {object:?} declares invalid variable name {name:?}")]
    InvalidVariableName { object: String, name: String },

    #[error("object {object:?} declares variable {name:?} twice")]
    DuplicateVariable { object: String, name: String },

    #[error("file name {0:?} appears more than once in one directory")]
    DuplicateFileName(String),

    #[error("{0} objects are listed in more than one object set")]
    DuplicateObjectSet(ObjectType),
}

/// Why a rule failed to compile.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodegenErrorKind {
    #[error("unknown effect kind {0:?}")]
    UnknownEffect(String),

    #[error("unknown condition kind {0:?}")]
    UnknownCondition(String),

    #[error("unknown trigger {0:?}")]
    UnknownTrigger(String),

    #[error("trigger {trigger:?} is not available on {object_type} objects")]
    UnsupportedTrigger {
        trigger: String,
        object_type: ObjectType,
    },

    #[error("{kind:?} needs a card in focus, but trigger {trigger:?} has none")]
    NoCardInFocus { kind: String, trigger: String },

    #[error("{kind:?} cannot be used under trigger {trigger:?}")]
    WrongTrigger { kind: String, trigger: String },

    #[error("{kind:?} refers to undeclared variable {name:?}")]
    UnknownVariable { kind: String, name: String },

    #[error("{0:?} emitted an unbalanced guard")]
    UnbalancedGuard(String),
}

/// A rule of one object failed to compile.
///
/// Carries the object key and the rule's position so the author can find it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{object:?}, rule {rule_id:?} (index {rule}): {kind}")]
pub struct CodegenError {
    /// Resolved key of the object.
    pub object: String,
    /// Index of the rule in the object's rule list.
    pub rule: usize,
    /// Authored rule id (may be empty).
    pub rule_id: String,
    /// What went wrong.
    pub kind: CodegenErrorKind,
}

impl CodegenError {
    /// Attach a rule location to an error kind.
    pub fn new(
        object: impl Into<String>,
        rule: usize,
        rule_id: impl Into<String>,
        kind: CodegenErrorKind,
    ) -> Self {
        Self {
            object: object.into(),
            rule,
            rule_id: rule_id.into(),
            kind,
        }
    }
}

/// The load-order index is not a bijection onto its expected range.
///
/// Always an internal defect; never recovered from.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OrderingViolation {
    #[error("load order value {value} is outside 1..={max}")]
    OutOfRange { value: usize, max: usize },

    #[error("load order value {0} appears more than once")]
    Duplicate(usize),

    #[error("load order value {0} points at the synthetic file")]
    PointsAtSynthetic(usize),
}

/// Failure of a whole export.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{} object(s) failed to compile", .0.len())]
    Codegen(Vec<CodegenError>),

    #[error(transparent)]
    Ordering(#[from] OrderingViolation),
}

impl From<CodegenError> for ExportError {
    fn from(err: CodegenError) -> Self {
        ExportError::Codegen(vec![err])
    }
}
