//! Built-in host tokens.
//!
//! Maps canonical parameter tokens to the literals the host runtime uses.
//! Built-in values map through fixed tables; anything else is treated as
//! an author-defined value and namespaced with the mod prefix.

use super::resolve::{resolve_key, resolve_unclassed_key};

/// Rarity names the host registers itself.
const BUILTIN_RARITIES: &[(&str, &str)] = &[
    ("common", "Common"),
    ("uncommon", "Uncommon"),
    ("rare", "Rare"),
    ("legendary", "Legendary"),
];

/// Rarity token for card creation, `None` for a random rarity.
#[must_use]
pub fn rarity_token(rarity: &str, mod_prefix: &str) -> Option<String> {
    if rarity.is_empty() || rarity == "random" {
        return None;
    }
    let builtin = BUILTIN_RARITIES
        .iter()
        .find(|(token, _)| *token == rarity)
        .map(|(_, literal)| (*literal).to_string());
    Some(builtin.unwrap_or_else(|| resolve_unclassed_key(rarity, mod_prefix)))
}

/// Numeric rarity the host stores on joker centers (`config.center.rarity`).
#[must_use]
pub fn rarity_index(rarity: &str) -> Option<u8> {
    match rarity {
        "common" => Some(1),
        "uncommon" => Some(2),
        "rare" => Some(3),
        "legendary" => Some(4),
        _ => None,
    }
}

const BUILTIN_EDITIONS: &[&str] = &["e_foil", "e_holo", "e_polychrome", "e_negative", "e_base"];

/// Edition key; custom editions resolve under the `e` class.
#[must_use]
pub fn edition_key(edition: &str, mod_prefix: &str) -> String {
    if BUILTIN_EDITIONS.contains(&edition) {
        edition.to_string()
    } else {
        resolve_key(edition, mod_prefix, "e")
    }
}

const BUILTIN_SEALS: &[&str] = &["Gold", "Red", "Blue", "Purple"];

/// Seal key; custom seals are namespaced without a class prefix.
#[must_use]
pub fn seal_key(seal: &str, mod_prefix: &str) -> String {
    if BUILTIN_SEALS.contains(&seal) {
        seal.to_string()
    } else {
        resolve_unclassed_key(seal, mod_prefix)
    }
}

const BUILTIN_ENHANCEMENTS: &[&str] = &[
    "m_bonus", "m_mult", "m_wild", "m_glass", "m_steel", "m_stone", "m_gold", "m_lucky",
];

/// Enhancement key; custom enhancements resolve under the `m` class.
#[must_use]
pub fn enhancement_key(enhancement: &str, mod_prefix: &str) -> String {
    if BUILTIN_ENHANCEMENTS.contains(&enhancement) {
        enhancement.to_string()
    } else {
        resolve_key(enhancement, mod_prefix, "m")
    }
}

const BUILTIN_STICKERS: &[&str] = &["eternal", "perishable", "rental"];

/// Sticker key; custom stickers are namespaced without a class prefix.
#[must_use]
pub fn sticker_key(sticker: &str, mod_prefix: &str) -> String {
    if BUILTIN_STICKERS.contains(&sticker) {
        sticker.to_string()
    } else {
        resolve_unclassed_key(sticker, mod_prefix)
    }
}

const BUILTIN_CONSUMABLE_SETS: &[&str] = &["Tarot", "Planet", "Spectral"];

/// Consumable set name; custom sets are namespaced.
#[must_use]
pub fn consumable_set(set: &str, mod_prefix: &str) -> String {
    if BUILTIN_CONSUMABLE_SETS.contains(&set) {
        set.to_string()
    } else {
        resolve_unclassed_key(set, mod_prefix)
    }
}

/// Poker hand name; custom hands are namespaced.
#[must_use]
pub fn hand_key(hand: &str, mod_prefix: &str) -> String {
    if crate::params::options::HAND_TYPES.contains(&hand) {
        hand.to_string()
    } else {
        resolve_unclassed_key(hand, mod_prefix)
    }
}

/// Rank id as returned by `Card:get_id()`.
#[must_use]
pub fn rank_id(rank: &str) -> Option<u8> {
    match rank {
        "A" => Some(14),
        "K" => Some(13),
        "Q" => Some(12),
        "J" => Some(11),
        other => other.parse::<u8>().ok().filter(|n| (2..=10).contains(n)),
    }
}

/// Rank key as used by `SMODS.change_base`.
#[must_use]
pub fn rank_key(rank: &str) -> Option<&'static str> {
    Some(match rank {
        "A" => "Ace",
        "K" => "King",
        "Q" => "Queen",
        "J" => "Jack",
        "10" => "10",
        "9" => "9",
        "8" => "8",
        "7" => "7",
        "6" => "6",
        "5" => "5",
        "4" => "4",
        "3" => "3",
        "2" => "2",
        _ => return None,
    })
}

/// `G.C` colour for a message colour token.
#[must_use]
pub fn colour(token: &str) -> &'static str {
    match token {
        "red" => "G.C.RED",
        "blue" => "G.C.BLUE",
        "green" => "G.C.GREEN",
        "gold" => "G.C.GOLD",
        "purple" => "G.C.PURPLE",
        "orange" => "G.C.ORANGE",
        "chips" => "G.C.CHIPS",
        "mult" => "G.C.MULT",
        "money" => "G.C.MONEY",
        _ => "G.C.WHITE",
    }
}

/// Consumable-rate field on `G.GAME` for an item kind.
#[must_use]
pub fn rate_field(item: &str) -> &'static str {
    match item {
        "planet" => "planet_rate",
        "spectral" => "spectral_rate",
        "playing_card" => "playing_card_rate",
        "edition" => "edition_rate",
        _ => "tarot_rate",
    }
}
