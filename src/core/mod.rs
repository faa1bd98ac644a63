//! Core types shared by every compiler stage: object types, configuration,
//! errors, the generation context and Lua text helpers.
//!
//! Nothing here knows about individual effect or condition kinds.

pub mod config;
pub mod context;
pub mod error;
pub mod lua;
pub mod object;

pub use config::{ForgeConfig, RulePolicy};
pub use context::GenContext;
pub use error::{
    CodegenError, CodegenErrorKind, CodegenFallback, ExportError, OrderingViolation,
    ValidationError,
};
pub use lua::{lua_number, lua_string, LuaWriter};
pub use object::{ObjectType, UserVariable};
