//! Rules and their compilation.
//!
//! ## Key Components
//!
//! - [`Rule`] / [`GameObjectData`] / [`ObjectSet`]: the authored model,
//!   read but never modified by the compiler
//! - [`assemble`]: one function body per (object, trigger)
//! - [`compile_object`] / [`ObjectSource`]: every used trigger of one
//!   object, rendered as constructor table fields
//! - [`export`]: validation, compilation and load ordering of a whole mod
//!
//! Compilation is pure: the same input always yields byte-identical text.

mod assembler;
mod compiler;
mod export;
mod model;

pub use assembler::{assemble, TriggerFunction};
pub use compiler::{compile_batch, compile_object, ObjectSource};
pub use export::{export, validate_sets, CompiledSet, ExportBundle};
pub use model::{EffectList, GameObjectData, ObjectSet, Rule};
