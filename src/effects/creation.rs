//! Effects that create or remove jokers, consumables, cards and tags.
//!
//! Creation is animated: the card is added inside an event, and a fixed
//! `delay(...)` follows so the next scoring step waits for it. Slot-limited
//! creations reserve a buffer slot before the event runs and release it
//! inside the event, so several creations in one hand cannot overfill an
//! area.

use crate::core::lua::{lua_number, lua_string, LuaWriter};
use crate::core::GenContext;
use crate::keys::tokens::{
    consumable_set, edition_key, enhancement_key, rank_key, rarity_token, seal_key, sticker_key,
};
use crate::keys::{resolve_key, resolve_unclassed_key};
use crate::params::options::{
    CONSUMABLE_ALIASES, CONSUMABLE_SETS, EDITION_ALIASES, EDITION_OPTIONS_RANDOM,
    ENHANCEMENT_ALIASES, ENHANCEMENT_OPTIONS, JOKER_SELECTION, RANK_ALIASES, RANK_OPTIONS,
    RARITY_ALIASES, RARITY_OPTIONS, SEAL_ALIASES, SEAL_OPTIONS, SLOT_POLICY, SLOT_POLICY_ALIASES,
    STICKER_OPTIONS, SUIT_ALIASES, SUIT_OPTIONS,
};
use crate::params::{NormalizedParams, ParamSpec};

use super::event::add_event;
use super::fragment::CodeFragment;
use super::target::{for_each_target, select_joker};
use super::Generated;

const JOKER_SLOT_FREE: &str =
    "#G.jokers.cards + G.GAME.joker_buffer < G.jokers.config.card_limit";
const CONSUMABLE_SLOT_FREE: &str =
    "#G.consumeables.cards + G.GAME.consumeable_buffer < G.consumeables.config.card_limit";

const EDITION: ParamSpec =
    ParamSpec::open_select("edition", EDITION_OPTIONS_RANDOM, EDITION_ALIASES, "none");
const IGNORE_SLOTS: ParamSpec =
    ParamSpec::select_with("ignore_slots", SLOT_POLICY, SLOT_POLICY_ALIASES, "respect");

pub(super) static CREATE_JOKER: &[ParamSpec] = &[
    ParamSpec::select("joker_type", &["random", "specific"], "random"),
    ParamSpec::open_select("rarity", RARITY_OPTIONS, RARITY_ALIASES, "random")
        .when("joker_type", &["random"]),
    ParamSpec::text("joker_key", "").when("joker_type", &["specific"]),
    ParamSpec::text("pool", "").when("joker_type", &["random"]),
    EDITION,
    ParamSpec::open_select("sticker", STICKER_OPTIONS, &[], "none"),
    IGNORE_SLOTS,
];

pub(super) static CREATE_CONSUMABLE: &[ParamSpec] = &[
    ParamSpec::open_select("set", CONSUMABLE_SETS, CONSUMABLE_ALIASES, "random"),
    ParamSpec::text("consumable_key", ""),
    IGNORE_SLOTS,
];

pub(super) static CREATE_TAG: &[ParamSpec] = &[ParamSpec::text("tag", "tag_double")];

pub(super) static CREATE_PLAYING_CARD: &[ParamSpec] = &[
    ParamSpec::select_with("rank", RANK_OPTIONS, RANK_ALIASES, "random"),
    ParamSpec::select_with("suit", SUIT_OPTIONS, SUIT_ALIASES, "random"),
    ParamSpec::open_select("enhancement", ENHANCEMENT_OPTIONS, ENHANCEMENT_ALIASES, "none"),
    ParamSpec::open_select("seal", SEAL_OPTIONS, SEAL_ALIASES, "none"),
    EDITION,
    ParamSpec::select("destination", &["hand", "deck"], "deck"),
];

pub(super) static COPY_CARD: &[ParamSpec] =
    &[ParamSpec::select("destination", &["hand", "deck"], "deck")];

pub(super) static COPY_JOKER: &[ParamSpec] = &[
    ParamSpec::select("selection", JOKER_SELECTION, "random"),
    ParamSpec::text("joker_key", "").when("selection", &["specific"]),
    EDITION,
    IGNORE_SLOTS,
];

pub(super) static DESTROY_JOKER: &[ParamSpec] = &[
    ParamSpec::select("selection", JOKER_SELECTION, "random"),
    ParamSpec::text("joker_key", "").when("selection", &["specific"]),
];

pub(super) static DESTROY_CONSUMABLE: &[ParamSpec] = &[ParamSpec::open_select(
    "set",
    CONSUMABLE_SETS,
    CONSUMABLE_ALIASES,
    "random",
)];

pub(super) static DRAW_CARDS: &[ParamSpec] = &[ParamSpec::at_least("value", 1.0, 0.0)];

pub(super) static DESTROY_IN_HAND: &[ParamSpec] = &[
    ParamSpec::select("selection", &["random", "all"], "random"),
    ParamSpec::at_least("value", 1.0, 0.0).when("selection", &["random"]),
];

pub(super) static COPY_CONSUMABLE: &[ParamSpec] = &[
    ParamSpec::open_select("set", CONSUMABLE_SETS, CONSUMABLE_ALIASES, "random"),
    ParamSpec::select("edition", &["none", "e_negative"], "none"),
];

pub(super) static LAST_CONSUMABLE: &[ParamSpec] = &[IGNORE_SLOTS];

pub(super) static REDEEM_VOUCHER: &[ParamSpec] =
    &[ParamSpec::text("voucher_key", "v_overstock_norm")];

fn post_delay(w: &mut LuaWriter, ctx: &GenContext<'_>) {
    w.line(format!("delay({})", lua_number(ctx.config.post_effect_delay)));
}

/// Setter call applying an edition token to `card`, `None` for "none".
pub(super) fn edition_setter(card: &str, edition: &str, ctx: &GenContext<'_>, seed: &str) -> Option<String> {
    match edition {
        "none" | "" => None,
        "random" => Some(format!(
            "{card}:set_edition(poll_edition({}, nil, true, true), true)",
            ctx.seed(seed)
        )),
        other => Some(format!(
            "{card}:set_edition({}, true)",
            lua_string(&edition_key(other, ctx.mod_prefix()))
        )),
    }
}

/// `SMODS.add_card` fields choosing what joker to create.
///
/// A specific key wins; otherwise a pool, otherwise the base joker set
/// narrowed by rarity.
fn joker_fields(p: &NormalizedParams, ctx: &GenContext<'_>) -> String {
    let prefix = ctx.mod_prefix();
    let key = p.text("joker_key");
    if p.is("joker_type", "specific") && !key.is_empty() {
        return format!("key = {}", lua_string(&resolve_key(key, prefix, "j")));
    }
    let pool = p.text("pool");
    if !pool.is_empty() {
        return format!("set = {}", lua_string(&resolve_unclassed_key(pool, prefix)));
    }
    match rarity_token(p.text("rarity"), prefix) {
        Some(rarity) => format!("set = \"Joker\", rarity = {}", lua_string(&rarity)),
        None => "set = \"Joker\"".to_string(),
    }
}

/// Create a joker.
///
/// The slot-limit guard is left out entirely for negative jokers, which
/// take no slot, and when the author ignores slots.
pub fn create_joker(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let created = ctx.local_name("created_joker");
    let joker = ctx.local_name("joker_card");
    let edition = p.text("edition");
    let guarded = edition != "e_negative" && !p.is("ignore_slots", "ignore");

    let mut setters = Vec::new();
    setters.extend(edition_setter(&joker, edition, ctx, "create_joker_edition"));
    match p.text("sticker") {
        "none" | "" => {}
        sticker => setters.push(format!(
            "{joker}:add_sticker({}, true)",
            lua_string(&sticker_key(sticker, ctx.mod_prefix()))
        )),
    }

    let mut w = LuaWriter::new();
    if guarded {
        w.line(format!("local {created} = false"));
        w.open(format!("if {JOKER_SLOT_FREE} then"));
        w.line(format!("{created} = true"));
        w.line("G.GAME.joker_buffer = G.GAME.joker_buffer + 1");
    } else {
        w.line(format!("local {created} = true"));
    }
    add_event(&mut w, |w| {
        w.line(format!("local {joker} = SMODS.add_card({{ {} }})", joker_fields(p, ctx)));
        if !setters.is_empty() {
            w.open(format!("if {joker} then"));
            w.lines(&setters);
            w.close("end");
        }
        if guarded {
            w.line("G.GAME.joker_buffer = 0");
        }
        w.line("card:juice_up(0.3, 0.5)");
    });
    if guarded {
        w.close("end");
    }
    post_delay(&mut w, ctx);

    let message = if guarded {
        format!("{created} and localize(\"k_plus_joker\") or nil")
    } else {
        "localize(\"k_plus_joker\")".to_string()
    };
    Ok(CodeFragment::statements(w.into_lines())
        .with_message(message)
        .with_colour("G.C.BLUE"))
}

/// Create a consumable of a set, a specific key, or a random base set.
pub fn create_consumable(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let created = ctx.local_name("created_consumable");
    let guarded = !p.is("ignore_slots", "ignore");
    let set = p.text("set");
    let key = p.text("consumable_key");
    let fields = if !key.is_empty() {
        format!("key = {}", lua_string(&resolve_key(key, ctx.mod_prefix(), "c")))
    } else if set == "random" {
        format!(
            "set = pseudorandom_element({{ \"Tarot\", \"Planet\", \"Spectral\" }}, pseudoseed({}))",
            ctx.seed("create_consumable")
        )
    } else {
        format!("set = {}", lua_string(&consumable_set(set, ctx.mod_prefix())))
    };

    let mut w = LuaWriter::new();
    if guarded {
        w.line(format!("local {created} = false"));
        w.open(format!("if {CONSUMABLE_SLOT_FREE} then"));
        w.line(format!("{created} = true"));
        w.line("G.GAME.consumeable_buffer = G.GAME.consumeable_buffer + 1");
    } else {
        w.line(format!("local {created} = true"));
    }
    add_event(&mut w, |w| {
        w.line(format!("SMODS.add_card({{ {fields} }})"));
        if guarded {
            w.line("G.GAME.consumeable_buffer = 0");
        }
        w.line("card:juice_up(0.3, 0.5)");
    });
    if guarded {
        w.close("end");
    }
    post_delay(&mut w, ctx);

    let text = match set {
        "Tarot" if key.is_empty() => "localize(\"k_plus_tarot\")",
        "Planet" if key.is_empty() => "localize(\"k_plus_planet\")",
        "Spectral" if key.is_empty() => "localize(\"k_plus_spectral\")",
        _ => "\"+1 Consumable\"",
    };
    let message = if guarded {
        format!("{created} and {text} or nil")
    } else {
        text.to_string()
    };
    Ok(CodeFragment::statements(w.into_lines())
        .with_message(message)
        .with_colour("G.C.PURPLE"))
}

pub fn create_tag(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let tag = resolve_key(p.text("tag"), ctx.mod_prefix(), "tag");
    let mut w = LuaWriter::new();
    add_event(&mut w, |w| {
        w.line(format!("add_tag(Tag({}))", lua_string(&tag)));
        w.line("play_sound(\"generic1\", 0.9 + math.random() * 0.1, 0.8)");
        w.line("play_sound(\"holo1\", 1.2 + math.random() * 0.1, 0.4)");
    });
    Ok(CodeFragment::statements(w.into_lines())
        .with_message("\"+1 Tag\"")
        .with_colour("G.C.GREEN"))
}

/// Add a new playing card to the hand or the deck.
pub fn create_playing_card(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let prefix = ctx.mod_prefix();
    let mut fields = vec!["set = \"Base\"".to_string()];
    if let Some(rank) = rank_key(p.text("rank")) {
        fields.push(format!("rank = {}", lua_string(rank)));
    }
    match p.text("suit") {
        "random" | "" => {}
        suit => fields.push(format!("suit = {}", lua_string(suit))),
    }
    match p.text("enhancement") {
        "none" | "" => {}
        "random" => fields.push(format!(
            "enhancement = SMODS.poll_enhancement({{ guaranteed = true, key = {} }})",
            ctx.seed("create_card_enhancement")
        )),
        other => fields.push(format!(
            "enhancement = {}",
            lua_string(&enhancement_key(other, prefix))
        )),
    }
    match p.text("seal") {
        "none" | "" => {}
        "random" => fields.push(format!(
            "seal = SMODS.poll_seal({{ guaranteed = true, key = {} }})",
            ctx.seed("create_card_seal")
        )),
        other => fields.push(format!("seal = {}", lua_string(&seal_key(other, prefix)))),
    }
    match p.text("edition") {
        "none" | "" => {}
        "random" => fields.push(format!(
            "edition = poll_edition({}, nil, true, true)",
            ctx.seed("create_card_edition")
        )),
        other => fields.push(format!("edition = {}", lua_string(&edition_key(other, prefix)))),
    }
    let area = if p.is("destination", "hand") { "G.hand" } else { "G.deck" };
    fields.push(format!("area = {area}"));

    let new_card = ctx.local_name("new_card");
    let mut w = LuaWriter::new();
    add_event(&mut w, |w| {
        w.line(format!("local {new_card} = SMODS.add_card({{ {} }})", fields.join(", ")));
        w.line(format!(
            "SMODS.calculate_context({{ playing_card_added = true, cards = {{ {new_card} }} }})"
        ));
    });
    post_delay(&mut w, ctx);
    Ok(CodeFragment::statements(w.into_lines())
        .with_message("localize(\"k_plus_card\")")
        .with_colour("G.C.GREEN"))
}

/// Copy the card in focus into the hand or the deck.
pub fn copy_focused_card(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let to_hand = p.is("destination", "hand");
    let copied = ctx.local_name("copied_card");
    let mut w = LuaWriter::new();
    for_each_target(&mut w, ctx, "copy_focused_card", |w, target| {
        w.line("G.playing_card = (G.playing_card and G.playing_card + 1) or 1");
        w.line(format!("local {copied} = copy_card({target}, nil, nil, G.playing_card)"));
        w.line(format!("{copied}:add_to_deck()"));
        w.line("G.deck.config.card_limit = G.deck.config.card_limit + 1");
        w.line(format!("table.insert(G.playing_cards, {copied})"));
        if to_hand {
            w.line(format!("G.hand:emplace({copied})"));
        } else {
            w.line(format!("G.deck:emplace({copied})"));
        }
        w.line(format!("{copied}.states.visible = nil"));
        add_event(w, |w| {
            w.line(format!("{copied}:start_materialize()"));
        });
        w.line(format!(
            "SMODS.calculate_context({{ playing_card_added = true, cards = {{ {copied} }} }})"
        ));
    })?;
    Ok(CodeFragment::statements(w.into_lines())
        .with_message("localize(\"k_copied_ex\")")
        .with_colour("G.C.CHIPS"))
}

/// Duplicate a joker.
pub fn copy_joker(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let source = ctx.local_name("copy_source");
    let copied = ctx.local_name("copied_joker");
    let edition = p.text("edition");
    let guard = if edition == "e_negative" || p.is("ignore_slots", "ignore") {
        source.clone()
    } else {
        format!("{source} and {JOKER_SLOT_FREE}")
    };
    let setter = edition_setter(&copied, edition, ctx, "copy_joker_edition");

    let mut w = LuaWriter::new();
    select_joker(&mut w, p, ctx, "copy_joker", &source)?;
    w.open(format!("if {guard} then"));
    w.line("G.GAME.joker_buffer = G.GAME.joker_buffer + 1");
    add_event(&mut w, |w| {
        w.line(format!(
            "local {copied} = copy_card({source}, nil, nil, nil, {source}.edition and {source}.edition.negative)"
        ));
        w.lines(setter);
        w.line(format!("{copied}:add_to_deck()"));
        w.line(format!("G.jokers:emplace({copied})"));
        w.line("G.GAME.joker_buffer = 0");
        w.line("card:juice_up(0.3, 0.5)");
    });
    w.close("end");
    post_delay(&mut w, ctx);
    Ok(CodeFragment::statements(w.into_lines())
        .with_message("localize(\"k_duplicated_ex\")")
        .with_colour("G.C.GREEN"))
}

/// Destroy a joker other than an eternal one.
pub fn destroy_joker(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let victim = ctx.local_name("doomed_joker");
    let mut w = LuaWriter::new();
    select_joker(&mut w, p, ctx, "destroy_joker", &victim)?;
    w.open(format!(
        "if {victim} and not SMODS.is_eternal({victim}, card) and not {victim}.getting_sliced then"
    ));
    w.line(format!("{victim}.getting_sliced = true"));
    add_event(&mut w, |w| {
        w.line(format!("{victim}:start_dissolve({{ G.C.RED }}, nil, 1.6)"));
    });
    w.close("end");
    Ok(CodeFragment::statements(w.into_lines())
        .with_message("\"Destroyed!\"")
        .with_colour("G.C.RED"))
}

/// Bind `name` to a random owned consumable, optionally of one set, or
/// `nil` when there is none.
fn choose_consumable(
    w: &mut LuaWriter,
    p: &NormalizedParams,
    ctx: &GenContext<'_>,
    kind: &str,
    name: &str,
) {
    let choices = ctx.local_name("consumable_choices");
    w.line(format!("local {choices} = {{}}"));
    w.open("for _, consumable in ipairs(G.consumeables.cards) do");
    match p.text("set") {
        "random" | "" => w.line(format!("{choices}[#{choices} + 1] = consumable")),
        set => {
            let set = lua_string(&consumable_set(set, ctx.mod_prefix()));
            w.open(format!("if consumable.ability.set == {set} then"));
            w.line(format!("{choices}[#{choices} + 1] = consumable"));
            w.close("end")
        }
    };
    w.close("end");
    w.line(format!(
        "local {name} = #{choices} > 0 and pseudorandom_element({choices}, pseudoseed({})) or nil",
        ctx.seed(kind)
    ));
}

/// Destroy a random consumable, optionally of one set.
pub fn destroy_consumable(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let victim = ctx.local_name("doomed_consumable");
    let mut w = LuaWriter::new();
    choose_consumable(&mut w, p, ctx, "destroy_consumable", &victim);
    w.open(format!("if {victim} then"));
    add_event(&mut w, |w| {
        w.line(format!("{victim}:start_dissolve()"));
    });
    w.close("end");
    Ok(CodeFragment::statements(w.into_lines())
        .with_message("\"Destroyed!\"")
        .with_colour("G.C.RED"))
}

/// Copy a random owned consumable (Perkeo); a negative copy takes no slot.
pub fn copy_consumable(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let source = ctx.local_name("consumable_source");
    let copied = ctx.local_name("copied_consumable");
    let negative = p.is("edition", "e_negative");
    let mut w = LuaWriter::new();
    choose_consumable(&mut w, p, ctx, "copy_consumable", &source);
    if negative {
        w.open(format!("if {source} then"));
    } else {
        w.open(format!("if {source} and {CONSUMABLE_SLOT_FREE} then"));
        w.line("G.GAME.consumeable_buffer = G.GAME.consumeable_buffer + 1");
    }
    add_event(&mut w, |w| {
        w.line(format!("local {copied} = copy_card({source}, nil)"));
        if negative {
            w.line(format!("{copied}:set_edition(\"e_negative\", true)"));
        }
        w.line(format!("{copied}:add_to_deck()"));
        w.line(format!("G.consumeables:emplace({copied})"));
        if !negative {
            w.line("G.GAME.consumeable_buffer = 0");
        }
    });
    w.close("end");
    post_delay(&mut w, ctx);
    Ok(CodeFragment::statements(w.into_lines())
        .with_message("localize(\"k_duplicated_ex\")")
        .with_colour("G.C.SECONDARY_SET.Spectral"))
}

/// Create the last Tarot or Planet card used this run (The Fool).
pub fn create_last_consumable(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let created = ctx.local_name("created_last");
    let guard = if p.is("ignore_slots", "ignore") {
        "G.GAME.last_tarot_planet".to_string()
    } else {
        format!("G.GAME.last_tarot_planet and {CONSUMABLE_SLOT_FREE}")
    };
    let mut w = LuaWriter::new();
    w.line(format!("local {created} = false"));
    w.open(format!("if {guard} then"));
    w.line(format!("{created} = true"));
    w.line("G.GAME.consumeable_buffer = G.GAME.consumeable_buffer + 1");
    add_event(&mut w, |w| {
        w.line("SMODS.add_card({ key = G.GAME.last_tarot_planet })");
        w.line("G.GAME.consumeable_buffer = 0");
        w.line("card:juice_up(0.3, 0.5)");
    });
    w.close("end");
    post_delay(&mut w, ctx);
    Ok(CodeFragment::statements(w.into_lines())
        .with_message(format!("{created} and \"+1 Consumable\" or nil"))
        .with_colour("G.C.PURPLE"))
}

/// Destroy cards held in hand: a random few, or all of them.
pub fn destroy_cards_in_hand(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let doomed = ctx.local_name("doomed_cards");
    let mut w = LuaWriter::new();
    w.line(format!("local {doomed} = {{}}"));
    w.open("for _, held in ipairs(G.hand.cards) do");
    w.open("if not held.destroyed and not held.shattered then");
    w.line(format!("{doomed}[#{doomed} + 1] = held"));
    w.close("end");
    w.close("end");
    if !p.is("selection", "all") {
        let count = ctx.numeric(p, "value", "destroy_cards_in_hand")?;
        w.line(format!("pseudoshuffle({doomed}, pseudoseed({}))", ctx.seed("destroy_in_hand")));
        w.open(format!("for i = #{doomed}, {count} + 1, -1 do"));
        w.line(format!("{doomed}[i] = nil"));
        w.close("end");
    }
    w.open(format!("if #{doomed} > 0 then"));
    w.line(format!("SMODS.destroy_cards({doomed})"));
    w.close("end");
    Ok(CodeFragment::statements(w.into_lines())
        .with_message("\"Destroyed!\"")
        .with_colour("G.C.RED"))
}

pub fn draw_cards(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let count = ctx.numeric(p, "value", "draw_cards")?;
    let mut w = LuaWriter::new();
    w.open("if G.GAME.blind and G.GAME.blind.in_blind then");
    w.line(format!("SMODS.draw_cards({count})"));
    w.close("end");
    Ok(CodeFragment::statements(w.into_lines())
        .with_message(format!("\"+\" .. tostring({count}) .. \" Cards\""))
        .with_colour("G.C.BLUE"))
}

/// Redeem a voucher for free.
pub fn redeem_voucher(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let voucher = resolve_key(p.text("voucher_key"), ctx.mod_prefix(), "v");
    let card_name = ctx.local_name("voucher_card");
    let mut w = LuaWriter::new();
    add_event(&mut w, |w| {
        w.line(format!(
            "local {card_name} = SMODS.create_card({{ area = G.play, key = {} }})",
            lua_string(&voucher)
        ));
        w.line(format!("{card_name}:start_materialize()"));
        w.line(format!("{card_name}.cost = 0"));
        w.line(format!("G.play:emplace({card_name})"));
        w.line("delay(0.8)");
        w.line(format!("{card_name}:redeem()"));
        super::event::add_event_after(w, "0.5", |w| {
            w.line(format!("{card_name}:start_dissolve()"));
        });
    });
    post_delay(&mut w, ctx);
    Ok(CodeFragment::statements(w.into_lines())
        .with_message("localize(\"k_redeemed_ex\")")
        .with_colour("G.C.SECONDARY_SET.Voucher"))
}
