//! Condition Code Generator.
//!
//! Compiles condition trees to one Lua boolean expression each.
//!
//! ## Key Components
//!
//! - [`ConditionKind`]: registry of every condition kind with its schema
//!   and generator
//! - [`ConditionGroup`] / [`ConditionNode`] / [`ConditionInstance`]: the
//!   authored tree
//! - [`CompareOp`]: the operator set shared by all numeric conditions
//! - [`CountStep`] / [`compare_step`]: the two steps of a quantified check
//!
//! Generators are pure: the same parameters and context always produce
//! the same expression.

pub mod card;
mod compare;
pub mod game;
mod quantifier;
mod registry;
mod tree;

pub use compare::{CompareOp, OPERATOR, OPERATOR_ID};
pub use quantifier::{
    compare_step, compared, quantified, CardScope, CountStep, Quantifier, COUNT, QUANTIFIER, SCOPE,
    SCOPED_CARD,
};
pub use registry::{ConditionFn, ConditionKind};
pub use tree::{
    compile_condition, compile_tree, ConditionGroup, ConditionInstance, ConditionNode, LogicOp,
};
