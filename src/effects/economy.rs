//! Effects on run-wide counters: money, hands, slots, shop and blind.
//!
//! Counters the host changes through a delta function (`ease_dollars`,
//! `G.hand:change_size`) compute the delta first, so `set` works the same
//! way as `add` and `subtract`.

use crate::core::lua::{lua_string, LuaWriter};
use crate::core::GenContext;
use crate::keys::resolve_key;
use crate::keys::tokens::rate_field;
use crate::params::{NormalizedParams, ParamSpec};

use super::change::{ChangeOp, CHANGE, SCALE};
use super::event::add_event;
use super::fragment::CodeFragment;
use super::Generated;

const VALUE: ParamSpec = ParamSpec::number("value", 1.0);

pub(super) static COUNTER: &[ParamSpec] = &[CHANGE, VALUE];
pub(super) static SCALED: &[ParamSpec] = &[SCALE, VALUE];
pub(super) static ITEM_RATE: &[ParamSpec] = &[
    ParamSpec::select(
        "item",
        &["tarot", "planet", "spectral", "playing_card", "edition"],
        "tarot",
    ),
    SCALE,
    VALUE,
];
pub(super) static SELL_VALUE: &[ParamSpec] = &[
    ParamSpec::select("target", &["self", "all_jokers", "all_consumables"], "self"),
    CHANGE,
    VALUE,
];
pub(super) static ONE: &[ParamSpec] = &[VALUE];
pub(super) static SHOP_BOOSTER: &[ParamSpec] = &[ParamSpec::text("booster_key", "")];
pub(super) static SHOP_VOUCHER: &[ParamSpec] = &[ParamSpec::text("voucher_key", "")];

/// Feedback text for a change, e.g. `"+$5"`; `None` for `set`.
fn change_message(op: ChangeOp, value: &str, unit: &str) -> Option<String> {
    let sign = match op {
        ChangeOp::Add => "+",
        ChangeOp::Subtract => "-",
        _ => return None,
    };
    Some(if value.parse::<f64>().is_ok() {
        lua_string(&format!("{sign}{unit}{value}"))
    } else {
        format!("{} .. tostring({value})", lua_string(&format!("{sign}{unit}")))
    })
}

fn counter(
    p: &NormalizedParams,
    ctx: &GenContext<'_>,
    kind: &str,
    current: &str,
    apply: impl FnOnce(&str) -> Vec<String>,
    unit: &str,
) -> Generated {
    let op = ChangeOp::from_params(p);
    let value = ctx.numeric(p, "value", kind)?;
    let delta = ctx.local_name(&format!("{kind}_delta"));
    let mut lines = vec![format!("local {delta} = {}", op.delta(current, &value))];
    lines.extend(apply(&delta));
    let mut fragment = CodeFragment::statements(lines);
    if let Some(message) = change_message(op, &value, unit) {
        fragment = fragment.with_message(message).with_colour("G.C.GREEN");
    }
    Ok(fragment)
}

macro_rules! counters {
    ($(
        $(#[$doc:meta])*
        $name:ident => $current:literal, $unit:literal, |$d:ident| [$($line:expr),+ $(,)?];
    )*) => {
        $(
            $(#[$doc])*
            pub fn $name(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
                counter(p, ctx, stringify!($name), $current, |$d: &str| vec![$($line),+], $unit)
            }
        )*
    };
}

counters! {
    set_dollars => "G.GAME.dollars", "$", |d| [format!("ease_dollars({})", d)];
    /// Hands per round; the current round follows.
    edit_hands => "G.GAME.round_resets.hands", "", |d| [
        format!("G.GAME.round_resets.hands = G.GAME.round_resets.hands + {}", d),
        format!("ease_hands_played({})", d),
    ];
    edit_discards => "G.GAME.round_resets.discards", "", |d| [
        format!("G.GAME.round_resets.discards = G.GAME.round_resets.discards + {}", d),
        format!("ease_discard({})", d),
    ];
    edit_hand_size => "G.hand.config.card_limit", "", |d| [
        format!("G.hand:change_size({})", d),
    ];
    edit_joker_slots => "G.jokers.config.card_limit", "", |d| [
        format!("G.jokers.config.card_limit = G.jokers.config.card_limit + {}", d),
    ];
    edit_consumable_slots => "G.consumeables.config.card_limit", "", |d| [
        format!("G.consumeables.config.card_limit = G.consumeables.config.card_limit + {}", d),
    ];
    /// Most cards that can be played at once.
    edit_play_size => "G.GAME.starting_params.play_limit", "", |d| [
        format!("SMODS.change_play_limit({})", d),
    ];
    edit_discard_size => "G.GAME.starting_params.discard_limit", "", |d| [
        format!("SMODS.change_discard_limit({})", d),
    ];
    edit_interest_cap => "G.GAME.interest_cap", "$", |d| [
        format!("G.GAME.interest_cap = G.GAME.interest_cap + {}", d),
    ];
    edit_reroll_cost => "G.GAME.round_resets.reroll_cost", "$", |d| [
        format!("G.GAME.round_resets.reroll_cost = G.GAME.round_resets.reroll_cost + {}", d),
        format!(
            "G.GAME.current_round.reroll_cost = math.max(0, G.GAME.current_round.reroll_cost + {})",
            d
        ),
    ];
    edit_shop_slots => "G.GAME.shop.joker_max", "", |d| [format!("change_shop_size({})", d)];
    edit_booster_slots => "(G.GAME.modifiers.extra_boosters or 0)", "", |d| [
        format!("SMODS.change_booster_limit({})", d),
    ];
    edit_voucher_slots => "(G.GAME.modifiers.extra_vouchers or 0)", "", |d| [
        format!("SMODS.change_voucher_limit({})", d),
    ];
    edit_ante => "G.GAME.round_resets.ante", "", |d| [
        format!("ease_ante({})", d),
        format!("G.GAME.round_resets.blind_ante = G.GAME.round_resets.blind_ante + {}", d),
    ];
    /// Ante that wins the run.
    edit_win_ante => "G.GAME.win_ante", "", |d| [
        format!("G.GAME.win_ante = G.GAME.win_ante + {}", d),
    ];
    /// Hands left this round only; the per-round reset stays.
    edit_round_hands => "G.GAME.current_round.hands_left", "", |d| [
        format!("ease_hands_played({})", d),
    ];
    edit_round_discards => "G.GAME.current_round.discards_left", "", |d| [
        format!("ease_discard({})", d),
    ];
    /// Cash-out reward of the current blind.
    edit_blind_reward => "G.GAME.blind.dollars", "$", |d| [
        format!("G.GAME.blind.dollars = G.GAME.blind.dollars + {}", d),
    ];
    /// Payout per unused hand at cash out.
    edit_hand_money => "(G.GAME.modifiers.money_per_hand or 1)", "$", |d| [
        format!("G.GAME.modifiers.money_per_hand = (G.GAME.modifiers.money_per_hand or 1) + {}", d),
    ];
    edit_discard_money => "(G.GAME.modifiers.money_per_discard or 0)", "$", |d| [
        format!(
            "G.GAME.modifiers.money_per_discard = (G.GAME.modifiers.money_per_discard or 0) + {}",
            d
        ),
    ];
}

/// Scale every listed probability (Oops! All 6s).
pub fn edit_probability(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let op = ChangeOp::from_params(p);
    let value = ctx.numeric(p, "value", "edit_probability")?;
    let mut w = LuaWriter::new();
    w.open("for k, v in pairs(G.GAME.probabilities) do");
    w.line(format!("G.GAME.probabilities[k] = {}", op.result("v", &value)));
    w.close("end");
    Ok(CodeFragment::statements(w.into_lines()))
}

/// Change the chip target of the current blind.
pub fn modify_blind_requirement(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let op = ChangeOp::from_params(p);
    let value = ctx.numeric(p, "value", "modify_blind_requirement")?;
    let mut w = LuaWriter::new();
    w.open("if G.GAME.blind and G.GAME.blind.in_blind then");
    w.line(op.assign("G.GAME.blind.chips", &value));
    w.line("G.GAME.blind.chip_text = number_format(G.GAME.blind.chips)");
    w.line("G.HUD_blind:recalculate()");
    w.close("end");
    Ok(CodeFragment::statements(w.into_lines()))
}

pub fn disable_boss_blind(_p: &NormalizedParams, _ctx: &GenContext<'_>) -> Generated {
    let mut w = LuaWriter::new();
    w.open("if G.GAME.blind and G.GAME.blind.boss and not G.GAME.blind.disabled then");
    add_event(&mut w, |w| {
        w.line("G.GAME.blind:disable()");
        w.line("play_sound(\"timpani\")");
    });
    w.close("end");
    Ok(CodeFragment::statements(w.into_lines())
        .with_message("localize(\"ph_boss_disabled\")")
        .with_colour("G.C.GREEN"))
}

/// Swap the upcoming boss blind for another (Director's Cut).
pub fn reroll_boss(_p: &NormalizedParams, _ctx: &GenContext<'_>) -> Generated {
    let mut w = LuaWriter::new();
    w.open("if G.blind_select_opts then");
    add_event(&mut w, |w| {
        w.line("G.from_boss_tag = true");
        w.line("G.FUNCS.reroll_boss()");
    });
    w.close("end");
    Ok(CodeFragment::statements(w.into_lines())
        .with_message("localize(\"k_nope_ex\")")
        .with_colour("G.C.RED"))
}

/// End the current blind as won, whatever the score.
pub fn win_blind(_p: &NormalizedParams, _ctx: &GenContext<'_>) -> Generated {
    let mut w = LuaWriter::new();
    add_event(&mut w, |w| {
        w.open("if G.STATE == G.STATES.SELECTING_HAND and G.GAME.blind.in_blind then");
        w.line("G.GAME.chips = G.GAME.blind.chips");
        w.line("G.STATE = G.STATES.HAND_PLAYED");
        w.line("G.STATE_COMPLETE = true");
        w.line("end_round()");
        w.close("end");
    });
    Ok(CodeFragment::statements(w.into_lines())
        .with_message("\"Win!\"")
        .with_colour("G.C.GREEN"))
}

/// Add a booster pack to the shop; an empty key adds a random one.
pub fn add_booster_to_shop(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let call = match p.text("booster_key") {
        "" => "SMODS.add_booster_to_shop()".to_string(),
        key => format!(
            "SMODS.add_booster_to_shop({})",
            lua_string(&resolve_key(key, ctx.mod_prefix(), "p"))
        ),
    };
    let mut w = LuaWriter::new();
    w.open("if G.shop_booster then");
    w.line(call);
    w.close("end");
    Ok(CodeFragment::statements(w.into_lines()))
}

/// Add a voucher to the shop; an empty key adds the next one in the pool.
pub fn add_voucher_to_shop(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let call = match p.text("voucher_key") {
        "" => "SMODS.add_voucher_to_shop()".to_string(),
        key => format!(
            "SMODS.add_voucher_to_shop({})",
            lua_string(&resolve_key(key, ctx.mod_prefix(), "v"))
        ),
    };
    let mut w = LuaWriter::new();
    w.open("if G.shop_vouchers then");
    w.line(call);
    w.close("end");
    Ok(CodeFragment::statements(w.into_lines()))
}

/// Let money go below zero, down to `-value`.
pub fn allow_debt(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let value = ctx.numeric(p, "value", "allow_debt")?;
    let line = match ChangeOp::from_params(p) {
        ChangeOp::Subtract => format!("G.GAME.bankrupt_at = G.GAME.bankrupt_at + {value}"),
        ChangeOp::Set => format!("G.GAME.bankrupt_at = -({value})"),
        _ => format!("G.GAME.bankrupt_at = G.GAME.bankrupt_at - {value}"),
    };
    Ok(CodeFragment::statements([line]))
}

/// Change the shop discount (percent) and reprice every card.
pub fn discount_items(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let op = ChangeOp::from_params(p);
    let value = ctx.numeric(p, "value", "discount_items")?;
    let mut w = LuaWriter::new();
    w.line(op.assign("G.GAME.discount_percent", &value));
    add_event(&mut w, |w| {
        w.open("for _, v in pairs(G.I.CARD) do");
        w.open("if v.set_cost then");
        w.line("v:set_cost()");
        w.close("end");
        w.close("end");
    });
    Ok(CodeFragment::statements(w.into_lines()))
}

pub fn free_rerolls(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let value = ctx.numeric(p, "value", "free_rerolls")?;
    Ok(CodeFragment::statements([format!(
        "SMODS.change_free_rerolls({value})"
    )]))
}

/// Change how often an item kind shows up in the shop.
pub fn edit_item_rate(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let op = ChangeOp::from_params(p);
    let value = ctx.numeric(p, "value", "edit_item_rate")?;
    let field = format!("G.GAME.{}", rate_field(p.text("item")));
    Ok(CodeFragment::statements([op.assign(&field, &value)]))
}

pub fn edit_sell_value(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let op = ChangeOp::from_params(p);
    let value = ctx.numeric(p, "value", "edit_sell_value")?;
    let bump = |card: &str| {
        let current = format!("({card}.ability.extra_value or 0)");
        format!("{card}.ability.extra_value = {}", op.result(&current, &value))
    };
    let mut w = LuaWriter::new();
    match p.text("target") {
        area @ ("all_jokers" | "all_consumables") => {
            let area = if area == "all_jokers" { "G.jokers" } else { "G.consumeables" };
            w.open(format!("for _, other in ipairs({area}.cards) do"));
            w.line(bump("other"));
            w.line("other:set_cost()");
            w.close("end");
        }
        _ => {
            w.line(bump("card"));
            w.line("card:set_cost()");
        }
    }
    let message = change_message(op, &value, "$").unwrap_or_else(|| "localize(\"k_val_up\")".to_string());
    Ok(CodeFragment::statements(w.into_lines())
        .with_message(message)
        .with_colour("G.C.MONEY"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lua::is_balanced;
    use crate::core::{ForgeConfig, ObjectType};
    use crate::params::{normalize, param_map, ParamValue};
    use crate::triggers::TriggerKind;

    fn generate(
        generator: fn(&NormalizedParams, &GenContext<'_>) -> Generated,
        schema: &'static [ParamSpec],
        pairs: &[(&str, ParamValue)],
    ) -> CodeFragment {
        let config = ForgeConfig::new("mymod");
        let ctx = GenContext::new(&config, ObjectType::Joker, "j_mymod_x", TriggerKind::RoundEnd, &[]);
        let (params, _) = normalize(schema, &param_map(pairs.iter().cloned()));
        generator(&params, &ctx).unwrap()
    }

    #[test]
    fn test_set_dollars_add() {
        let fragment = generate(set_dollars, COUNTER, &[("value", 5.into())]);
        assert_eq!(
            fragment.prelude,
            vec!["local set_dollars_delta = 5", "ease_dollars(set_dollars_delta)"]
        );
        assert_eq!(fragment.message.as_deref(), Some("\"+$5\""));
    }

    #[test]
    fn test_set_dollars_set() {
        let fragment = generate(
            set_dollars,
            COUNTER,
            &[("operation", "set".into()), ("value", 0.into())],
        );
        assert_eq!(fragment.prelude[0], "local set_dollars_delta = 0 - G.GAME.dollars");
        assert_eq!(fragment.message, None);
    }

    #[test]
    fn test_hand_size_subtract() {
        let fragment = generate(
            edit_hand_size,
            COUNTER,
            &[("operation", "decrease".into()), ("value", 1.into())],
        );
        assert_eq!(
            fragment.prelude,
            vec![
                "local edit_hand_size_delta = -1",
                "G.hand:change_size(edit_hand_size_delta)"
            ]
        );
    }

    #[test]
    fn test_probability_and_rates() {
        let fragment = generate(
            edit_probability,
            SCALED,
            &[("operation", "multiply".into()), ("value", 2.into())],
        );
        assert!(is_balanced(&fragment.prelude));
        assert_eq!(fragment.prelude[1], "    G.GAME.probabilities[k] = v * 2");

        let fragment = generate(
            edit_item_rate,
            ITEM_RATE,
            &[("item", "spectral".into()), ("operation", "set".into()), ("value", 4.into())],
        );
        assert_eq!(fragment.prelude, vec!["G.GAME.spectral_rate = 4"]);
    }

    #[test]
    fn test_sell_value() {
        let fragment = generate(edit_sell_value, SELL_VALUE, &[("value", 3.into())]);
        assert_eq!(
            fragment.prelude[0],
            "card.ability.extra_value = (card.ability.extra_value or 0) + 3"
        );
    }

    #[test]
    fn test_guards_balanced() {
        for fragment in [
            generate(disable_boss_blind, &[], &[]),
            generate(modify_blind_requirement, SCALED, &[]),
            generate(discount_items, COUNTER, &[]),
            generate(reroll_boss, &[], &[]),
            generate(win_blind, &[], &[]),
        ] {
            assert!(is_balanced(&fragment.prelude));
        }
    }

    #[test]
    fn test_round_counters() {
        let fragment = generate(edit_round_hands, COUNTER, &[("value", 2.into())]);
        assert_eq!(
            fragment.prelude,
            vec!["local edit_round_hands_delta = 2", "ease_hands_played(edit_round_hands_delta)"]
        );

        let fragment = generate(
            edit_hand_money,
            COUNTER,
            &[("operation", "set".into()), ("value", 3.into())],
        );
        assert_eq!(
            fragment.prelude[0],
            "local edit_hand_money_delta = 3 - (G.GAME.modifiers.money_per_hand or 1)"
        );
    }

    #[test]
    fn test_shop_additions() {
        let fragment = generate(add_booster_to_shop, SHOP_BOOSTER, &[]);
        assert_eq!(fragment.prelude[1], "    SMODS.add_booster_to_shop()");

        let fragment = generate(
            add_voucher_to_shop,
            SHOP_VOUCHER,
            &[("voucher_key", "v_hone".into())],
        );
        assert_eq!(
            fragment.prelude,
            vec![
                "if G.shop_vouchers then",
                "    SMODS.add_voucher_to_shop(\"v_hone\")",
                "end"
            ]
        );
    }
}
