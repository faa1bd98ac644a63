//! Effects that contribute to the hand being scored.
//!
//! Most only add a field to the return table; the host applies the value
//! and shows its own feedback.

use crate::core::lua::{lua_string, LuaWriter};
use crate::core::{CodegenErrorKind, GenContext};
use crate::keys::tokens::{colour, hand_key};
use crate::params::NormalizedParams;
use crate::triggers::TriggerKind;

use super::change::ChangeOp;
use super::fragment::CodeFragment;
use super::Generated;

fn field(name: &str, p: &NormalizedParams, ctx: &GenContext<'_>, kind: &str) -> Generated {
    let value = ctx.numeric(p, "value", kind)?;
    Ok(CodeFragment::value(format!("{name} = {value}")))
}

pub fn add_chips(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    field("chips", p, ctx, "add_chips")
}

pub fn add_mult(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    field("mult", p, ctx, "add_mult")
}

pub fn apply_x_mult(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    field("x_mult", p, ctx, "apply_x_mult")
}

pub fn apply_x_chips(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    field("x_chips", p, ctx, "apply_x_chips")
}

pub fn apply_exp_mult(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    field("e_mult", p, ctx, "apply_exp_mult")
}

pub fn apply_exp_chips(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    field("e_chips", p, ctx, "apply_exp_chips")
}

pub fn add_dollars(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    field("dollars", p, ctx, "add_dollars")
}

/// Average chips and mult (Plasma Deck).
pub fn balance(_p: &NormalizedParams, _ctx: &GenContext<'_>) -> Generated {
    Ok(CodeFragment::value("balance = true"))
}

pub fn swap_chips_mult(_p: &NormalizedParams, _ctx: &GenContext<'_>) -> Generated {
    Ok(CodeFragment::value("swap = true"))
}

/// Retrigger the card in focus.
pub fn retrigger_cards(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    if !ctx.trigger.is_repetition() {
        return Err(ctx.wrong_trigger("retrigger_cards"));
    }
    let times = ctx.numeric(p, "value", "retrigger_cards")?;
    Ok(CodeFragment::value(format!("repetitions = {times}"))
        .with_message("localize(\"k_again_ex\")")
        .with_colour("G.C.RED"))
}

/// Bind the poker hand named by `hand_type`: the played hand, a random
/// visible hand, or a named one. Returns the Lua expression for its name.
fn hand_target(
    w: &mut LuaWriter,
    p: &NormalizedParams,
    ctx: &GenContext<'_>,
    kind: &str,
    seed: &str,
) -> Result<String, CodegenErrorKind> {
    Ok(match p.text("hand_type") {
        "current" => {
            if !ctx.trigger.has_played_hand() {
                return Err(ctx.wrong_trigger(kind));
            }
            "context.scoring_name".to_string()
        }
        "random" => {
            let hands = ctx.local_name("level_hands");
            let target = ctx.local_name("target_hand");
            w.line(format!("local {hands} = {{}}"));
            w.open("for hand_name, hand in pairs(G.GAME.hands) do");
            w.open("if hand.visible then");
            w.line(format!("{hands}[#{hands} + 1] = hand_name"));
            w.close("end");
            w.close("end");
            w.line(format!(
                "local {target} = pseudorandom_element({hands}, pseudoseed({}))",
                ctx.seed(seed)
            ));
            target
        }
        hand => lua_string(&hand_key(hand, ctx.mod_prefix())),
    })
}

/// Level up the played hand, a named hand or a random visible hand.
pub fn level_up_hand(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let levels = ctx.numeric(p, "value", "level_up_hand")?;
    let mut w = LuaWriter::new();
    let target = hand_target(&mut w, p, ctx, "level_up_hand", "level_up")?;
    w.line(format!("level_up_hand(card, {target}, true, {levels})"));
    Ok(CodeFragment::statements(w.into_lines())
        .with_message("localize(\"k_level_up_ex\")")
        .with_colour("G.C.RED"))
}

/// Change a poker hand's chips or mult without touching its level.
pub fn modify_hand_stat(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let op = ChangeOp::from_params(p);
    let value = ctx.numeric(p, "value", "modify_hand_stat")?;
    let stat = if p.is("stat", "mult") { "mult" } else { "chips" };
    let mut w = LuaWriter::new();
    let target = hand_target(&mut w, p, ctx, "modify_hand_stat", "hand_stat")?;
    let field = format!("G.GAME.hands[{target}].{stat}");
    w.line(format!("{field} = math.max({}, 1)", op.result(&field, &value)));
    let colour = if stat == "mult" { "G.C.MULT" } else { "G.C.CHIPS" };
    Ok(CodeFragment::statements(w.into_lines())
        .with_message("localize(\"k_upgrade_ex\")")
        .with_colour(colour))
}

/// Show a message without any other effect.
pub fn show_message(p: &NormalizedParams, _ctx: &GenContext<'_>) -> Generated {
    Ok(CodeFragment::default()
        .with_message(lua_string(p.text("text")))
        .with_colour(colour(p.text("colour"))))
}

/// Survive a lost round (Mr. Bones).
pub fn prevent_game_over(_p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    if ctx.trigger != TriggerKind::GameOver {
        return Err(ctx.wrong_trigger("prevent_game_over"));
    }
    Ok(CodeFragment::value("saved = \"ph_mr_bones\"")
        .with_message("localize(\"k_saved_ex\")")
        .with_colour("G.C.RED"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ForgeConfig, ObjectType, UserVariable};
    use crate::params::{normalize, param_map, ParamSpec, ParamValue};

    static VALUE: &[ParamSpec] = &[ParamSpec::number("value", 1.0)];

    fn run(
        generate: fn(&NormalizedParams, &GenContext<'_>) -> Generated,
        trigger: TriggerKind,
        value: ParamValue,
    ) -> Generated {
        let config = ForgeConfig::new("mymod");
        let vars = [UserVariable::new("stacks", 2.0)];
        let ctx = GenContext::new(&config, ObjectType::Joker, "j_mymod_x", trigger, &vars);
        let (params, _) = normalize(VALUE, &param_map([("value", value)]));
        generate(&params, &ctx)
    }

    #[test]
    fn test_value_only_effects() {
        let fragment = run(add_mult, TriggerKind::HandPlayed, ParamValue::Number(4.0)).unwrap();
        assert_eq!(fragment, CodeFragment::value("mult = 4"));

        let fragment = run(apply_x_mult, TriggerKind::HandPlayed, ParamValue::Number(1.5)).unwrap();
        assert_eq!(fragment.expression, "x_mult = 1.5");
        assert!(fragment.prelude.is_empty());
    }

    #[test]
    fn test_variable_value() {
        let fragment = run(add_chips, TriggerKind::HandPlayed, ParamValue::variable("stacks")).unwrap();
        assert_eq!(fragment.expression, "chips = card.ability.extra.stacks");
    }

    #[test]
    fn test_retrigger_needs_repetition_trigger() {
        let fragment = run(retrigger_cards, TriggerKind::CardRepetition, ParamValue::Number(2.0)).unwrap();
        assert_eq!(fragment.expression, "repetitions = 2");
        assert!(matches!(
            run(retrigger_cards, TriggerKind::HandPlayed, ParamValue::Number(2.0)),
            Err(CodegenErrorKind::WrongTrigger { .. })
        ));
    }

    #[test]
    fn test_modify_named_hand_stat() {
        let config = ForgeConfig::new("mymod");
        let ctx = GenContext::new(&config, ObjectType::Joker, "j_mymod_x", TriggerKind::RoundEnd, &[]);
        let schema = crate::effects::EffectKind::ModifyHandStat.schema();
        let raw = param_map([
            ("hand_type", ParamValue::from("Flush")),
            ("stat", "mult".into()),
            ("value", 3.into()),
        ]);
        let (params, _) = normalize(schema, &raw);
        let fragment = modify_hand_stat(&params, &ctx).unwrap();
        assert_eq!(
            fragment.prelude,
            vec!["G.GAME.hands[\"Flush\"].mult = math.max(G.GAME.hands[\"Flush\"].mult + 3, 1)"]
        );
        assert_eq!(fragment.colour.as_deref(), Some("G.C.MULT"));

        let (params, _) = normalize(schema, &param_map([("hand_type", "current")]));
        assert!(matches!(
            modify_hand_stat(&params, &ctx),
            Err(CodegenErrorKind::WrongTrigger { .. })
        ));
    }
}
