//! Option lists and aliases shared by many schemas.
//!
//! Tokens here are the canonical forms generators match on. Aliases cover
//! older saves and the spellings the editor used to store.

/// Comparison operators shared by every numeric condition.
pub const COMPARE_OPERATORS: &[&str] = &[
    "equals",
    "not_equals",
    "greater_than",
    "greater_equals",
    "less_than",
    "less_equals",
];

pub const COMPARE_ALIASES: &[(&str, &str)] = &[
    ("==", "equals"),
    ("eq", "equals"),
    ("~=", "not_equals"),
    ("!=", "not_equals"),
    ("ne", "not_equals"),
    (">", "greater_than"),
    ("gt", "greater_than"),
    (">=", "greater_equals"),
    ("gte", "greater_equals"),
    ("<", "less_than"),
    ("lt", "less_than"),
    ("<=", "less_equals"),
    ("lte", "less_equals"),
];

/// Quantifiers over a card collection.
pub const QUANTIFIERS: &[&str] = &["all", "none", "exactly", "at_least", "at_most"];

pub const QUANTIFIER_ALIASES: &[(&str, &str)] = &[
    ("every", "all"),
    ("no", "none"),
    ("equals", "exactly"),
    ("min", "at_least"),
    ("max", "at_most"),
];

/// Card collections a quantified condition can inspect.
pub const CARD_SCOPES: &[&str] = &["scoring", "played", "unscored", "held", "selected", "deck"];

pub const CARD_SCOPE_ALIASES: &[(&str, &str)] = &[
    ("scoring_hand", "scoring"),
    ("all_played", "played"),
    ("full_hand", "played"),
    ("held_in_hand", "held"),
    ("hand", "held"),
    ("highlighted", "selected"),
    ("full_deck", "deck"),
];

pub const RARITY_OPTIONS: &[&str] = &["random", "common", "uncommon", "rare", "legendary"];

pub const RARITY_ALIASES: &[(&str, &str)] = &[
    ("1", "common"),
    ("2", "uncommon"),
    ("3", "rare"),
    ("4", "legendary"),
];

pub const EDITION_OPTIONS: &[&str] = &["none", "e_foil", "e_holo", "e_polychrome", "e_negative"];

pub const EDITION_ALIASES: &[(&str, &str)] = &[
    ("foil", "e_foil"),
    ("holo", "e_holo"),
    ("holographic", "e_holo"),
    ("polychrome", "e_polychrome"),
    ("negative", "e_negative"),
];

/// Editions including the "random" choice for effects that poll one.
pub const EDITION_OPTIONS_RANDOM: &[&str] = &[
    "none",
    "random",
    "e_foil",
    "e_holo",
    "e_polychrome",
    "e_negative",
];

/// Editions as a card property (conditions).
pub const EDITION_FILTERS: &[&str] = &[
    "any",
    "none",
    "e_foil",
    "e_holo",
    "e_polychrome",
    "e_negative",
];

pub const STICKER_OPTIONS: &[&str] = &["none", "eternal", "perishable", "rental"];

pub const SEAL_OPTIONS: &[&str] = &["none", "random", "Gold", "Red", "Blue", "Purple"];

pub const SEAL_FILTERS: &[&str] = &["any", "none", "Gold", "Red", "Blue", "Purple"];

pub const SEAL_ALIASES: &[(&str, &str)] = &[
    ("gold_seal", "Gold"),
    ("red_seal", "Red"),
    ("blue_seal", "Blue"),
    ("purple_seal", "Purple"),
];

pub const ENHANCEMENT_OPTIONS: &[&str] = &[
    "none", "random", "m_bonus", "m_mult", "m_wild", "m_glass", "m_steel", "m_stone", "m_gold",
    "m_lucky",
];

pub const ENHANCEMENT_FILTERS: &[&str] = &[
    "any", "none", "m_bonus", "m_mult", "m_wild", "m_glass", "m_steel", "m_stone", "m_gold",
    "m_lucky",
];

pub const ENHANCEMENT_ALIASES: &[(&str, &str)] = &[
    ("bonus", "m_bonus"),
    ("mult", "m_mult"),
    ("wild", "m_wild"),
    ("glass", "m_glass"),
    ("steel", "m_steel"),
    ("stone", "m_stone"),
    ("gold", "m_gold"),
    ("lucky", "m_lucky"),
];

pub const SUIT_OPTIONS: &[&str] = &["random", "Spades", "Hearts", "Clubs", "Diamonds"];

pub const SUIT_FILTERS: &[&str] = &["any", "red", "black", "Spades", "Hearts", "Clubs", "Diamonds"];

pub const SUIT_ALIASES: &[(&str, &str)] = &[
    ("S", "Spades"),
    ("H", "Hearts"),
    ("C", "Clubs"),
    ("D", "Diamonds"),
    ("spade", "Spades"),
    ("heart", "Hearts"),
    ("club", "Clubs"),
    ("diamond", "Diamonds"),
];

pub const RANK_OPTIONS: &[&str] = &[
    "random", "A", "K", "Q", "J", "10", "9", "8", "7", "6", "5", "4", "3", "2",
];

pub const RANK_FILTERS: &[&str] = &[
    "any", "face", "numbered", "even", "odd", "A", "K", "Q", "J", "10", "9", "8", "7", "6", "5",
    "4", "3", "2",
];

pub const RANK_ALIASES: &[(&str, &str)] = &[
    ("ace", "A"),
    ("14", "A"),
    ("1", "A"),
    ("king", "K"),
    ("13", "K"),
    ("queen", "Q"),
    ("12", "Q"),
    ("jack", "J"),
    ("11", "J"),
    ("T", "10"),
    ("ten", "10"),
];

pub const HAND_TYPES: &[&str] = &[
    "High Card",
    "Pair",
    "Two Pair",
    "Three of a Kind",
    "Straight",
    "Flush",
    "Full House",
    "Four of a Kind",
    "Straight Flush",
    "Five of a Kind",
    "Flush House",
    "Flush Five",
];

pub const HAND_TYPE_ALIASES: &[(&str, &str)] = &[
    ("high_card", "High Card"),
    ("pair", "Pair"),
    ("two_pair", "Two Pair"),
    ("three_of_a_kind", "Three of a Kind"),
    ("straight", "Straight"),
    ("flush", "Flush"),
    ("full_house", "Full House"),
    ("four_of_a_kind", "Four of a Kind"),
    ("straight_flush", "Straight Flush"),
    ("royal_flush", "Straight Flush"),
    ("five_of_a_kind", "Five of a Kind"),
    ("flush_house", "Flush House"),
    ("flush_five", "Flush Five"),
];

pub const CONSUMABLE_SETS: &[&str] = &["random", "Tarot", "Planet", "Spectral"];

pub const CONSUMABLE_FILTERS: &[&str] = &["any", "Tarot", "Planet", "Spectral"];

pub const CONSUMABLE_ALIASES: &[(&str, &str)] = &[
    ("tarot", "Tarot"),
    ("planet", "Planet"),
    ("spectral", "Spectral"),
];

pub const MESSAGE_COLOURS: &[&str] = &[
    "white", "red", "blue", "green", "gold", "purple", "orange", "chips", "mult", "money",
];

/// Operations for effects that change a counter.
pub const CHANGE_OPERATIONS: &[&str] = &["add", "subtract", "set"];

pub const CHANGE_ALIASES: &[(&str, &str)] = &[
    ("increase", "add"),
    ("increment", "add"),
    ("+", "add"),
    ("decrease", "subtract"),
    ("decrement", "subtract"),
    ("-", "subtract"),
    ("=", "set"),
];

/// Operations for effects that scale a value.
pub const SCALE_OPERATIONS: &[&str] = &["add", "subtract", "multiply", "divide", "set"];

pub const SCALE_ALIASES: &[(&str, &str)] = &[
    ("increment", "add"),
    ("increase", "add"),
    ("decrement", "subtract"),
    ("decrease", "subtract"),
    ("*", "multiply"),
    ("x", "multiply"),
    ("/", "divide"),
    ("=", "set"),
];

pub const SLOT_POLICY: &[&str] = &["respect", "ignore"];

pub const SLOT_POLICY_ALIASES: &[(&str, &str)] = &[
    ("true", "ignore"),
    ("false", "respect"),
    ("ignore_slots", "ignore"),
    ("respect_slots", "respect"),
];

/// Which joker an effect picks from the joker area.
pub const JOKER_SELECTION: &[&str] = &["random", "leftmost", "rightmost", "left", "right", "specific"];

pub const BLIND_TYPES: &[&str] = &["small", "big", "boss"];

pub const BOOSTER_KINDS: &[&str] = &["any", "Arcana", "Celestial", "Spectral", "Standard", "Buffoon"];

pub const BOOSTER_ALIASES: &[(&str, &str)] = &[
    ("arcana", "Arcana"),
    ("celestial", "Celestial"),
    ("spectral", "Spectral"),
    ("standard", "Standard"),
    ("buffoon", "Buffoon"),
];
