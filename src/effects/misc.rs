//! Variables, sounds and effects on the object itself.

use crate::core::lua::{lua_number, lua_string, LuaWriter};
use crate::core::GenContext;
use crate::params::{NormalizedParams, ParamSpec};

use super::change::{ChangeOp, SCALE};
use super::event::add_event;
use super::fragment::CodeFragment;
use super::Generated;

pub(super) static MODIFY_VARIABLE: &[ParamSpec] = &[
    ParamSpec::text("variable", ""),
    SCALE,
    ParamSpec::number("value", 1.0),
];
pub(super) static PLAY_SOUND: &[ParamSpec] = &[ParamSpec::text("sound", "generic1")];
pub(super) static NONE: &[ParamSpec] = &[];
pub(super) static JUICE: &[ParamSpec] = &[
    ParamSpec::bounded("scale", 0.5, 0.0, 2.0),
    ParamSpec::bounded("rotation", 0.5, 0.0, 2.0),
];

/// Change one of the object's declared variables.
pub fn modify_internal_variable(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let target = ctx.variable("modify_internal_variable", p.text("variable"))?;
    let value = ctx.numeric(p, "value", "modify_internal_variable")?;
    let op = ChangeOp::from_params(p);
    let fragment = CodeFragment::statements([op.assign(&target, &value)]);
    Ok(match op {
        ChangeOp::Add | ChangeOp::Multiply => fragment
            .with_message("localize(\"k_upgrade_ex\")")
            .with_colour("G.C.RED"),
        _ => fragment,
    })
}

pub fn play_sound(p: &NormalizedParams, _ctx: &GenContext<'_>) -> Generated {
    let sound = lua_string(p.text("sound"));
    let mut w = LuaWriter::new();
    add_event(&mut w, |w| {
        w.line(format!("play_sound({sound})"));
    });
    Ok(CodeFragment::statements(w.into_lines()))
}

/// Wiggle the object for emphasis.
pub fn juice_up(p: &NormalizedParams, _ctx: &GenContext<'_>) -> Generated {
    let scale = lua_number(p.number("scale"));
    let rotation = lua_number(p.number("rotation"));
    let mut w = LuaWriter::new();
    add_event(&mut w, |w| {
        w.line(format!("card:juice_up({scale}, {rotation})"));
    });
    Ok(CodeFragment::statements(w.into_lines()))
}

/// End the run as a loss.
pub fn force_game_over(_p: &NormalizedParams, _ctx: &GenContext<'_>) -> Generated {
    let mut w = LuaWriter::new();
    add_event(&mut w, |w| {
        w.open("if G.STAGE == G.STAGES.RUN then");
        w.line("G.STATE = G.STATES.GAME_OVER");
        w.line("G.STATE_COMPLETE = false");
        w.close("end");
    });
    Ok(CodeFragment::statements(w.into_lines()))
}

pub fn shuffle_jokers(_p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let mut w = LuaWriter::new();
    w.open("if #G.jokers.cards > 1 then");
    w.line(format!("G.jokers:shuffle({})", ctx.seed("shuffle")));
    w.line("play_sound(\"cardSlide1\", 0.85)");
    w.close("end");
    Ok(CodeFragment::statements(w.into_lines()))
}

/// Remove the object running this rule.
pub fn destroy_self(_p: &NormalizedParams, _ctx: &GenContext<'_>) -> Generated {
    let mut w = LuaWriter::new();
    w.line("card.getting_sliced = true");
    add_event(&mut w, |w| {
        w.line("play_sound(\"tarot1\")");
        w.line("card:start_dissolve()");
    });
    Ok(CodeFragment::statements(w.into_lines())
        .with_message("\"Destroyed!\"")
        .with_colour("G.C.RED"))
}
