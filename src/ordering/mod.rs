//! Load ordering.
//!
//! ## Key Components
//!
//! - [`LoadOrderEncoder`]: turns authored order values into a
//!   [`LoadOrderIndex`] over the alphabetical directory listing
//! - [`loader_snippet`]: the Lua that walks a directory with that index

mod encoder;
mod loader;

pub use encoder::{LoadOrderEncoder, LoadOrderEntry, LoadOrderIndex};
pub use loader::{loader_snippet, LoaderTemplate};
