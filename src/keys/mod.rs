//! Key/Pool Resolver.
//!
//! Namespaces author-typed identifiers under the mod prefix, maps built-in
//! host tokens to their literals, and builds named object pools.

mod pool;
mod resolve;
pub mod tokens;

pub use pool::{build_pool, builtin_members, PoolMember, PoolRegistry, BUILTIN_POOLS};
pub use resolve::{resolve_key, resolve_object_key, resolve_unclassed_key, slugify};
