//! Trigger catalogue.
//!
//! ## Key Components
//!
//! - [`TriggerKind`]: closed set of hook points rules can attach to
//! - [`TriggerHook`]: where the generated code runs for an object type
//!   (a guarded branch of `calculate`, or a dedicated host function)
//! - [`CardFocus`]: which card card-level effects and conditions act on
//!
//! Card collections a trigger exposes (`context.scoring_hand`,
//! `context.full_hand`) are checked by the condition generator through
//! [`TriggerKind::has_played_hand`].

mod hook;
mod kind;

pub use hook::{highlighted_cards, CardFocus, HostFunction, TriggerHook};
pub use kind::TriggerKind;
