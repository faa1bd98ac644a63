//! Conditions on game state: the hand being played, the run, the blind,
//! the shop and the object's own variables.

use crate::core::lua::lua_string;
use crate::core::{CodegenErrorKind, GenContext};
use crate::keys::tokens::{consumable_set, hand_key, rarity_index};
use crate::keys::{resolve_key, resolve_unclassed_key};
use crate::params::NormalizedParams;
use crate::triggers::TriggerKind;

use super::compare::CompareOp;

type Generated = Result<String, CodegenErrorKind>;

/// `lhs <operator> <value>` with `value` from the `value` parameter.
fn compare_value(lhs: &str, p: &NormalizedParams, ctx: &GenContext<'_>, kind: &str) -> Generated {
    let value = ctx.numeric(p, "value", kind)?;
    Ok(CompareOp::from_params(p).apply(lhs, &value))
}

fn needs_hand(ctx: &GenContext<'_>, kind: &str) -> Result<(), CodegenErrorKind> {
    if ctx.trigger.has_played_hand() {
        Ok(())
    } else {
        Err(ctx.wrong_trigger(kind))
    }
}

/// The played hand is, or contains, a poker hand.
pub fn hand_type(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    needs_hand(ctx, "hand_type")?;
    let hand = lua_string(&hand_key(p.text("hand_type"), ctx.mod_prefix()));
    if p.is("mode", "contains") {
        Ok(format!("next(context.poker_hands[{hand}])"))
    } else {
        Ok(format!("context.scoring_name == {hand}"))
    }
}

/// Level of a poker hand.
pub fn hand_level(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let lhs = match p.text("hand_type") {
        "current" => {
            needs_hand(ctx, "hand_level")?;
            "G.GAME.hands[context.scoring_name].level".to_string()
        }
        hand => format!(
            "G.GAME.hands[{}].level",
            lua_string(&hand_key(hand, ctx.mod_prefix()))
        ),
    };
    compare_value(&lhs, p, ctx, "hand_level")
}

/// Times a poker hand was played this round.
pub fn hand_played_this_round(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let hand = lua_string(&hand_key(p.text("hand_type"), ctx.mod_prefix()));
    compare_value(
        &format!("G.GAME.hands[{hand}].played_this_round"),
        p,
        ctx,
        "hand_played_this_round",
    )
}

pub fn first_hand(_p: &NormalizedParams, _ctx: &GenContext<'_>) -> Generated {
    Ok("G.GAME.current_round.hands_played == 0".to_string())
}

pub fn first_discard(_p: &NormalizedParams, _ctx: &GenContext<'_>) -> Generated {
    Ok("G.GAME.current_round.discards_used == 0".to_string())
}

macro_rules! state_comparisons {
    ($($(#[$doc:meta])* $name:ident => $lhs:literal;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
                compare_value($lhs, p, ctx, stringify!($name))
            }
        )*
    };
}

state_comparisons! {
    money => "G.GAME.dollars";
    hands_left => "G.GAME.current_round.hands_left";
    discards_left => "G.GAME.current_round.discards_left";
    ante => "G.GAME.round_resets.ante";
    round => "G.GAME.round";
    joker_count => "#G.jokers.cards";
    consumable_count => "#G.consumeables.cards";
    hand_size => "G.hand.config.card_limit";
    cards_in_hand => "#G.hand.cards";
    /// Size of the full deck.
    deck_size => "#G.playing_cards";
    /// Cards left to draw.
    deck_remaining => "#G.deck.cards";
    /// Chips accumulated by the hand being scored.
    scoring_chips => "hand_chips";
    scoring_mult => "mult";
    hands_played_run => "G.GAME.hands_played";
    hands_played_round => "G.GAME.current_round.hands_played";
    discards_used_round => "G.GAME.current_round.discards_used";
    /// Sell value of the object itself.
    sell_value => "card.sell_cost";
    joker_slots_free => "(G.jokers.config.card_limit - #G.jokers.cards)";
    consumable_slots_free => "(G.consumeables.config.card_limit - #G.consumeables.cards)";
    /// Chip target of the current blind.
    blind_requirement => "G.GAME.blind.chips";
    /// Percent of the blind's chip target scored so far.
    blind_progress => "(G.GAME.chips / math.max(G.GAME.blind.chips, 1) * 100)";
    reroll_cost => "G.GAME.current_round.reroll_cost";
    consumables_used_run =>
        "(G.GAME.consumeable_usage_total and G.GAME.consumeable_usage_total.all or 0)";
    stake_level => "G.GAME.stake";
}

/// The hand being played is the last one of the round.
pub fn final_hand(_p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    needs_hand(ctx, "final_hand")?;
    Ok("G.GAME.current_round.hands_left == 0".to_string())
}

/// Times a poker hand was played this run.
pub fn hand_played_this_run(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let hand = lua_string(&hand_key(p.text("hand_type"), ctx.mod_prefix()));
    compare_value(
        &format!("G.GAME.hands[{hand}].played"),
        p,
        ctx,
        "hand_played_this_run",
    )
}

/// No poker hand was played more often this run than the one being played.
pub fn most_played_hand(_p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    needs_hand(ctx, "most_played_hand")?;
    Ok("(function()\n    local played = G.GAME.hands[context.scoring_name].played\n    for _, hand in pairs(G.GAME.hands) do\n        if hand.played > played then\n            return false\n        end\n    end\n    return true\nend)()".to_string())
}

/// Deck (card back) the run was started with.
pub fn selected_deck(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let key = resolve_key(p.text("deck"), ctx.mod_prefix(), "b");
    Ok(format!(
        "G.GAME.selected_back.effect.center.key == {}",
        lua_string(&key)
    ))
}

/// A sticker on this joker.
pub fn self_sticker(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    if ctx.object_type != crate::core::ObjectType::Joker {
        return Err(ctx.wrong_trigger("self_sticker"));
    }
    Ok(match p.text("sticker") {
        sticker @ ("eternal" | "perishable" | "rental") => format!("card.ability.{sticker}"),
        other => format!(
            "card.ability[{}]",
            lua_string(&resolve_unclassed_key(other, ctx.mod_prefix()))
        ),
    })
}

/// Number of owned jokers of a rarity; `random` counts every joker.
pub fn joker_rarity_count(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let lhs = match p.text("rarity") {
        "random" => "#G.jokers.cards".to_string(),
        rarity => format!(
            "(function()\n    local count = 0\n    for _, joker in ipairs(G.jokers.cards) do\n        if joker.config.center.rarity == {} then\n            count = count + 1\n        end\n    end\n    return count\nend)()",
            rarity_literal(rarity, ctx)
        ),
    };
    compare_value(&lhs, p, ctx, "joker_rarity_count")
}

pub fn blind_type(p: &NormalizedParams, _ctx: &GenContext<'_>) -> Generated {
    let name = match p.text("blind") {
        "big" => "Big",
        "boss" => "Boss",
        _ => "Small",
    };
    Ok(format!("G.GAME.blind:get_type() == {}", lua_string(name)))
}

pub fn boss_blind_active(_p: &NormalizedParams, _ctx: &GenContext<'_>) -> Generated {
    Ok("(G.GAME.blind.boss and not G.GAME.blind.disabled)".to_string())
}

pub fn specific_blind(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let key = resolve_key(p.text("blind"), ctx.mod_prefix(), "bl");
    Ok(format!(
        "G.GAME.blind.config.blind.key == {}",
        lua_string(&key)
    ))
}

pub fn in_blind(_p: &NormalizedParams, _ctx: &GenContext<'_>) -> Generated {
    Ok("G.GAME.blind.in_blind".to_string())
}

/// Rarity as stored on a joker's center: an index for the base rarities,
/// a key for custom ones.
fn rarity_literal(rarity: &str, ctx: &GenContext<'_>) -> String {
    match rarity_index(rarity) {
        Some(n) => n.to_string(),
        None => lua_string(&resolve_unclassed_key(rarity, ctx.mod_prefix())),
    }
}

/// The player owns a specific joker, or any joker of a rarity.
///
/// Rarity `random` means any joker at all, the compiling card excluded.
pub fn owns_joker(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    if p.is("selection", "rarity") {
        let test = match p.text("rarity") {
            "random" => "joker ~= card".to_string(),
            rarity => format!("joker.config.center.rarity == {}", rarity_literal(rarity, ctx)),
        };
        return Ok(format!(
            "(function()\n    for _, joker in ipairs(G.jokers.cards) do\n        if {test} then\n            return true\n        end\n    end\n    return false\nend)()"
        ));
    }
    let key = resolve_key(p.text("joker_key"), ctx.mod_prefix(), "j");
    Ok(format!("next(SMODS.find_card({})) ~= nil", lua_string(&key)))
}

pub fn voucher_redeemed(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let key = resolve_key(p.text("voucher_key"), ctx.mod_prefix(), "v");
    Ok(format!("G.GAME.used_vouchers[{}]", lua_string(&key)))
}

/// Seeded chance roll; deterministic per object key.
pub fn random_chance(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let numerator = ctx.numeric(p, "numerator", "random_chance")?;
    let denominator = ctx.numeric(p, "denominator", "random_chance")?;
    Ok(format!(
        "SMODS.pseudorandom_probability(card, {}, {numerator}, {denominator}, {})",
        ctx.seed("chance"),
        lua_string(ctx.object_key)
    ))
}

/// A declared object variable compared against a number.
pub fn internal_variable(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let lhs = ctx.variable("internal_variable", p.text("variable"))?;
    compare_value(&lhs, p, ctx, "internal_variable")
}

/// Two numbers (literals or variables) compared.
pub fn generic_compare(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let left = ctx.numeric(p, "left", "generic_compare")?;
    let right = ctx.numeric(p, "right", "generic_compare")?;
    Ok(CompareOp::from_params(p).apply(&left, &right))
}

/// Set of the consumable being used.
pub fn consumable_used_type(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    if ctx.trigger != TriggerKind::ConsumableUsed {
        return Err(ctx.wrong_trigger("consumable_used_type"));
    }
    let subject = if ctx.object_type == crate::core::ObjectType::Consumable {
        "card"
    } else {
        "context.consumeable"
    };
    match p.text("set") {
        "any" => Ok("true".to_string()),
        set => Ok(format!(
            "{subject}.ability.set == {}",
            lua_string(&consumable_set(set, ctx.mod_prefix()))
        )),
    }
}

/// Kind of the booster pack being opened.
pub fn booster_type(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    if ctx.trigger != TriggerKind::BoosterOpened {
        return Err(ctx.wrong_trigger("booster_type"));
    }
    match p.text("booster") {
        "any" => Ok("true".to_string()),
        kind => Ok(format!(
            "context.card.config.center.kind == {}",
            lua_string(kind)
        )),
    }
}

/// Position of this joker in the joker area.
pub fn joker_position(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    if ctx.object_type != crate::core::ObjectType::Joker {
        return Err(ctx.wrong_trigger("joker_position"));
    }
    let slot = match p.text("position") {
        "last" => "#G.jokers.cards".to_string(),
        "specific" => ctx.numeric(p, "index", "joker_position")?,
        _ => "1".to_string(),
    };
    Ok(format!("G.jokers.cards[{slot}] == card"))
}
