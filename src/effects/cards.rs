//! Effects on the card in focus.
//!
//! Every kind here runs once per targeted card: the trigger's focused card,
//! or each highlighted card when a consumable is used.

use crate::core::lua::{lua_string, LuaWriter};
use crate::core::{CodegenErrorKind, GenContext};
use crate::keys::tokens::{edition_key, enhancement_key, rank_key, seal_key};
use crate::params::options::{
    EDITION_ALIASES, EDITION_OPTIONS_RANDOM, ENHANCEMENT_ALIASES, ENHANCEMENT_OPTIONS,
    RANK_ALIASES, RANK_OPTIONS, SEAL_ALIASES, SEAL_OPTIONS, SUIT_ALIASES, SUIT_OPTIONS,
};
use crate::params::{NormalizedParams, ParamSpec};

use super::event::add_event;
use super::fragment::CodeFragment;
use super::target::for_each_target;
use super::Generated;

pub(super) static SET_SUIT: &[ParamSpec] =
    &[ParamSpec::select_with("suit", SUIT_OPTIONS, SUIT_ALIASES, "Spades")];
pub(super) static SET_RANK: &[ParamSpec] =
    &[ParamSpec::select_with("rank", RANK_OPTIONS, RANK_ALIASES, "A")];
pub(super) static SET_ENHANCEMENT: &[ParamSpec] = &[ParamSpec::open_select(
    "enhancement",
    ENHANCEMENT_OPTIONS,
    ENHANCEMENT_ALIASES,
    "m_bonus",
)];
pub(super) static SET_SEAL: &[ParamSpec] =
    &[ParamSpec::open_select("seal", SEAL_OPTIONS, SEAL_ALIASES, "Gold")];
pub(super) static SET_EDITION: &[ParamSpec] = &[ParamSpec::open_select(
    "edition",
    EDITION_OPTIONS_RANDOM,
    EDITION_ALIASES,
    "e_foil",
)];
pub(super) static AMOUNT: &[ParamSpec] = &[ParamSpec::number("value", 1.0)];
pub(super) static DEBUFF: &[ParamSpec] = &[ParamSpec::select("mode", &["debuff", "clear"], "debuff")];

const BASE_SUITS: &str = "{ \"Spades\", \"Hearts\", \"Clubs\", \"Diamonds\" }";
const BASE_RANKS: &str =
    "{ \"2\", \"3\", \"4\", \"5\", \"6\", \"7\", \"8\", \"9\", \"10\", \"Jack\", \"Queen\", \"King\", \"Ace\" }";

/// Apply `change(card)` to every target inside an event, with a juice.
fn modify_each(
    ctx: &GenContext<'_>,
    kind: &str,
    change: impl Fn(&str) -> String,
) -> Result<Vec<String>, CodegenErrorKind> {
    let mut w = LuaWriter::new();
    for_each_target(&mut w, ctx, kind, |w, target| {
        add_event(w, |w| {
            w.line(change(target));
            w.line(format!("{target}:juice_up()"));
        });
    })?;
    Ok(w.into_lines())
}

pub fn set_card_suit(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let suit = match p.text("suit") {
        "random" => format!(
            "pseudorandom_element({BASE_SUITS}, pseudoseed({}))",
            ctx.seed("set_card_suit")
        ),
        suit => lua_string(suit),
    };
    let lines = modify_each(ctx, "set_card_suit", |card| {
        format!("assert(SMODS.change_base({card}, {suit}))")
    })?;
    Ok(CodeFragment::statements(lines))
}

pub fn set_card_rank(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let rank = match rank_key(p.text("rank")) {
        Some(rank) => lua_string(rank),
        None => format!(
            "pseudorandom_element({BASE_RANKS}, pseudoseed({}))",
            ctx.seed("set_card_rank")
        ),
    };
    let lines = modify_each(ctx, "set_card_rank", |card| {
        format!("assert(SMODS.change_base({card}, nil, {rank}))")
    })?;
    Ok(CodeFragment::statements(lines))
}

/// Shift the rank by a (possibly negative) number of steps.
pub fn increment_rank(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let steps = ctx.numeric(p, "value", "increment_rank")?;
    let lines = modify_each(ctx, "increment_rank", |card| {
        format!("assert(SMODS.modify_rank({card}, {steps}))")
    })?;
    Ok(CodeFragment::statements(lines))
}

pub fn set_card_enhancement(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let center = match p.text("enhancement") {
        "none" => "G.P_CENTERS.c_base".to_string(),
        "random" => format!(
            "SMODS.poll_enhancement({{ guaranteed = true, key = {} }})",
            ctx.seed("set_card_enhancement")
        ),
        other => lua_string(&enhancement_key(other, ctx.mod_prefix())),
    };
    let lines = modify_each(ctx, "set_card_enhancement", |card| {
        format!("{card}:set_ability({center})")
    })?;
    Ok(CodeFragment::statements(lines))
}

pub fn set_card_seal(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let seal = match p.text("seal") {
        "none" => "nil".to_string(),
        "random" => format!(
            "SMODS.poll_seal({{ guaranteed = true, key = {} }})",
            ctx.seed("set_card_seal")
        ),
        other => lua_string(&seal_key(other, ctx.mod_prefix())),
    };
    let lines = modify_each(ctx, "set_card_seal", |card| {
        format!("{card}:set_seal({seal}, true)")
    })?;
    Ok(CodeFragment::statements(lines))
}

pub fn set_card_edition(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let edition = match p.text("edition") {
        "none" => "nil".to_string(),
        "random" => format!(
            "poll_edition({}, nil, true, true)",
            ctx.seed("set_card_edition")
        ),
        other => lua_string(&edition_key(other, ctx.mod_prefix())),
    };
    let lines = modify_each(ctx, "set_card_edition", |card| {
        format!("{card}:set_edition({edition}, true)")
    })?;
    Ok(CodeFragment::statements(lines))
}

/// Permanent bonus stored on the card's ability table.
fn perma_bonus(field: &str, p: &NormalizedParams, ctx: &GenContext<'_>, kind: &str) -> Generated {
    let value = ctx.numeric(p, "value", kind)?;
    let mut w = LuaWriter::new();
    for_each_target(&mut w, ctx, kind, |w, card| {
        w.line(format!(
            "{card}.ability.{field} = ({card}.ability.{field} or 0) + {value}"
        ));
    })?;
    Ok(CodeFragment::statements(w.into_lines())
        .with_message("localize(\"k_upgrade_ex\")")
        .with_colour("G.C.CHIPS"))
}

pub fn add_perma_chips(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    perma_bonus("perma_bonus", p, ctx, "add_perma_chips")
}

pub fn add_perma_mult(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    Ok(perma_bonus("perma_mult", p, ctx, "add_perma_mult")?.with_colour("G.C.MULT"))
}

pub fn add_perma_x_mult(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    Ok(perma_bonus("perma_x_mult", p, ctx, "add_perma_x_mult")?.with_colour("G.C.MULT"))
}

pub fn add_perma_dollars(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    Ok(perma_bonus("perma_p_dollars", p, ctx, "add_perma_dollars")?.with_colour("G.C.MONEY"))
}

pub fn add_perma_x_chips(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    perma_bonus("perma_x_chips", p, ctx, "add_perma_x_chips")
}

/// Permanent chips while the card stays held in hand.
pub fn add_perma_held_chips(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    perma_bonus("perma_h_chips", p, ctx, "add_perma_held_chips")
}

pub fn add_perma_held_mult(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    Ok(perma_bonus("perma_h_mult", p, ctx, "add_perma_held_mult")?.with_colour("G.C.MULT"))
}

pub fn add_perma_held_x_mult(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    Ok(perma_bonus("perma_h_x_mult", p, ctx, "add_perma_held_x_mult")?.with_colour("G.C.MULT"))
}

pub fn flip_cards(_p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let lines = modify_each(ctx, "flip_cards", |card| format!("{card}:flip()"))?;
    Ok(CodeFragment::statements(lines))
}

/// Debuff the targets, or clear a debuff this object put on them.
///
/// The object key is the debuff source, so clearing never lifts a debuff
/// another object (or the boss blind) applied.
pub fn debuff_card(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let debuffed = !p.is("mode", "clear");
    let source = lua_string(ctx.object_key);
    let lines = modify_each(ctx, "debuff_card", |card| {
        format!("SMODS.debuff_card({card}, {debuffed}, {source})")
    })?;
    let fragment = CodeFragment::statements(lines);
    Ok(if debuffed {
        fragment
            .with_message("localize(\"k_debuffed\")")
            .with_colour("G.C.RED")
    } else {
        fragment
    })
}

pub fn destroy_card(_p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let mut w = LuaWriter::new();
    for_each_target(&mut w, ctx, "destroy_card", |w, card| {
        w.line(format!("SMODS.destroy_cards({card})"));
    })?;
    Ok(CodeFragment::statements(w.into_lines())
        .with_message("\"Destroyed!\"")
        .with_colour("G.C.RED"))
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
        object_type: ObjectType,
        trigger: TriggerKind,
    ) -> Generated {
        let config = ForgeConfig::new("mymod");
        let ctx = GenContext::new(&config, object_type, "x", trigger, &[]);
        let raw = param_map(pairs.iter().cloned());
        let (params, _) = normalize(schema, &raw);
        generator(&params, &ctx)
    }

    #[test]
    fn test_set_seal_on_scored_card() {
        let fragment = generate(
            set_card_seal,
            SET_SEAL,
            &[("seal", "red".into())],
            ObjectType::Joker,
            TriggerKind::CardScored,
        )
        .unwrap();
        let text = fragment.prelude.join("\n");
        assert!(text.contains("local target_card = context.other_card"));
        assert!(text.contains("target_card:set_seal(\"Red\", true)"));
        assert!(is_balanced(&fragment.prelude));
        assert!(fragment.expression.is_empty());
    }

    #[test]
    fn test_consumable_targets_highlighted() {
        let fragment = generate(
            set_card_enhancement,
            SET_ENHANCEMENT,
            &[("enhancement", "glass".into())],
            ObjectType::Consumable,
            TriggerKind::ConsumableUsed,
        )
        .unwrap();
        let text = fragment.prelude.join("\n");
        assert!(text.starts_with("for _, target_card in ipairs(G.hand.highlighted) do"));
        assert!(text.contains("target_card:set_ability(\"m_glass\")"));
        assert!(is_balanced(&fragment.prelude));
    }

    #[test]
    fn test_perma_bonus() {
        let fragment = generate(
            add_perma_mult,
            AMOUNT,
            &[("value", 2.0.into())],
            ObjectType::Enhancement,
            TriggerKind::CardScored,
        )
        .unwrap();
        assert_eq!(
            fragment.prelude,
            vec![
                "local target_card = card",
                "target_card.ability.perma_mult = (target_card.ability.perma_mult or 0) + 2"
            ]
        );
        assert_eq!(fragment.colour.as_deref(), Some("G.C.MULT"));
    }

    #[test]
    fn test_no_card_in_focus() {
        let result = generate(
            destroy_card,
            &[],
            &[],
            ObjectType::Joker,
            TriggerKind::ShopEntered,
        );
        assert!(matches!(result, Err(CodegenErrorKind::NoCardInFocus { .. })));
    }

    #[test]
    fn test_held_perma_bonus_fields() {
        let fragment = generate(
            add_perma_held_x_mult,
            AMOUNT,
            &[("value", 0.5.into())],
            ObjectType::Joker,
            TriggerKind::CardScored,
        )
        .unwrap();
        assert_eq!(
            fragment.prelude[1],
            "target_card.ability.perma_h_x_mult = (target_card.ability.perma_h_x_mult or 0) + 0.5"
        );
    }

    #[test]
    fn test_flip_and_debuff_highlighted() {
        let fragment = generate(
            flip_cards,
            &[],
            &[],
            ObjectType::Consumable,
            TriggerKind::ConsumableUsed,
        )
        .unwrap();
        assert!(fragment.prelude.join("\n").contains("target_card:flip()"));
        assert!(is_balanced(&fragment.prelude));

        let fragment = generate(
            debuff_card,
            DEBUFF,
            &[("mode", "clear".into())],
            ObjectType::Joker,
            TriggerKind::CardHeldInHand,
        )
        .unwrap();
        assert!(fragment
            .prelude
            .join("\n")
            .contains("SMODS.debuff_card(target_card, false, \"x\")"));
        assert!(fragment.message.is_none());
    }
}
