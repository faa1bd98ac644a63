//! Event-manager scheduling.
//!
//! State changes that animate go through `G.E_MANAGER` so they run after
//! the scoring animation that precedes them.

use crate::core::lua::LuaWriter;

/// Schedule `body` as an immediate event.
///
/// ```text
/// G.E_MANAGER:add_event(Event({
///     func = function()
///         <body>
///         return true
///     end
/// }))
/// ```
pub fn add_event(w: &mut LuaWriter, body: impl FnOnce(&mut LuaWriter)) {
    schedule(w, None, body);
}

/// Schedule `body` to run `delay` seconds after the previous event.
pub fn add_event_after(w: &mut LuaWriter, delay: &str, body: impl FnOnce(&mut LuaWriter)) {
    schedule(w, Some(delay), body);
}

fn schedule(w: &mut LuaWriter, delay: Option<&str>, body: impl FnOnce(&mut LuaWriter)) {
    w.open("G.E_MANAGER:add_event(Event({");
    if let Some(delay) = delay {
        w.line("trigger = \"after\",");
        w.line(format!("delay = {delay},"));
    }
    w.open("func = function()");
    body(w);
    w.line("return true");
    w.close("end");
    w.close("}))");
}
