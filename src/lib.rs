//! # joker-forge
//!
//! A rule compiler for Balatro mods built on the Steamodded (SMODS) API.
//!
//! Authors describe game objects declaratively: a trigger, a tree of
//! conditions and an ordered list of effects per rule. The compiler turns
//! those rules into Lua source for the host and computes the load order
//! arrays the mod's loader needs.
//!
//! ## Design Principles
//!
//! 1. **Pure**: no I/O, no shared state. The same input always produces
//!    byte-identical output, so recompiling on every edit is safe.
//!
//! 2. **Closed Vocabularies**: triggers, conditions and effects are enums
//!    bound to their generators at compile time. An unknown id is an
//!    error, never a silent no-op.
//!
//! 3. **Lenient Parameters**: an unusable parameter value falls back to
//!    its documented default and is reported, so one bad field cannot
//!    break a whole file.
//!
//! 4. **Structural Splicing**: effects return a [`CodeFragment`]; the
//!    assembler places its parts, it never edits generated text.
//!
//! ## Modules
//!
//! - `core`: object types, configuration, errors, Lua text helpers
//! - `params`: parameter schemas and normalization
//! - `keys`: key namespacing, host tokens and object pools
//! - `triggers`: trigger catalogue and per-type hooks
//! - `conditions`: condition code generator
//! - `effects`: effect code generator
//! - `rules`: authored model, rule assembler, object compiler, export
//! - `ordering`: load-order encoder and loader snippet

pub mod conditions;
pub mod core;
pub mod effects;
pub mod keys;
pub mod ordering;
pub mod params;
pub mod rules;
pub mod triggers;

// Re-export commonly used types
pub use crate::core::{
    CodegenError, CodegenErrorKind, CodegenFallback, ExportError, ForgeConfig, GenContext,
    ObjectType, OrderingViolation, RulePolicy, UserVariable, ValidationError,
};

pub use crate::params::{normalize, FallbackReason, ParamFallback, ParamMap, ParamSpec, ParamValue};

pub use crate::keys::{resolve_key, resolve_object_key, slugify, PoolRegistry};

pub use crate::triggers::{CardFocus, HostFunction, TriggerHook, TriggerKind};

pub use crate::conditions::{
    compile_condition, compile_tree, ConditionGroup, ConditionInstance, ConditionKind,
    ConditionNode, LogicOp,
};

pub use crate::effects::{compile_effect, CodeFragment, EffectInstance, EffectKind};

pub use crate::rules::{
    assemble, compile_batch, compile_object, export, CompiledSet, ExportBundle, GameObjectData,
    ObjectSet, ObjectSource, Rule, TriggerFunction,
};

pub use crate::ordering::{loader_snippet, LoadOrderEncoder, LoadOrderEntry, LoadOrderIndex};
