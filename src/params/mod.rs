//! Parameter Normalizer.
//!
//! - `ParamValue` / `ParamMap`: raw values as authored
//! - `ParamSpec`: static schema of one parameter
//! - `normalize`: resolve defaults, aliases, bounds and visibility
//!
//! Option lists that depend on sibling values are an editor concern; the
//! compiler only sees the concrete values the editor stored.

pub mod options;
mod normalize;
mod schema;
mod value;

pub use normalize::{normalize, FallbackReason, NormalizedParams, Numeric, ParamFallback};
pub use schema::{DefaultValue, ParamSpec, ParamType, ShowWhen};
pub use value::{param_map, ParamMap, ParamValue};
