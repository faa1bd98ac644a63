//! Condition kind registry.
//!
//! One variant per condition kind, each bound to its parameter schema and
//! its generator. Authored rules name kinds by string id; lookup happens
//! once, and from then on dispatch is an exhaustive `match`.

use crate::core::{CodegenErrorKind, GenContext};
use crate::params::options::{
    BLIND_TYPES, BOOSTER_ALIASES, BOOSTER_KINDS, CONSUMABLE_ALIASES, CONSUMABLE_FILTERS,
    HAND_TYPES, HAND_TYPE_ALIASES, RARITY_ALIASES, RARITY_OPTIONS,
};
use crate::params::{NormalizedParams, ParamSpec};

use super::card::{self, EDITION, ENHANCEMENT, PROPERTY, RANK, SEAL, SUIT};
use super::compare::OPERATOR;
use super::game;
use super::quantifier::{COUNT, QUANTIFIER, SCOPE};

/// Generator of one condition kind.
pub type ConditionFn = fn(&NormalizedParams, &GenContext<'_>) -> Result<String, CodegenErrorKind>;

macro_rules! condition_kinds {
    ($($variant:ident => $id:literal, $schema:expr, $generate:path;)*) => {
        /// Every condition kind the compiler knows.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum ConditionKind {
            $($variant,)*
        }

        impl ConditionKind {
            pub const ALL: &'static [ConditionKind] = &[$(ConditionKind::$variant,)*];

            /// Id as stored in authored rules.
            #[must_use]
            pub const fn id(self) -> &'static str {
                match self {
                    $(ConditionKind::$variant => $id,)*
                }
            }

            /// Look up a kind by id.
            #[must_use]
            pub fn from_id(id: &str) -> Option<Self> {
                match id {
                    $($id => Some(ConditionKind::$variant),)*
                    _ => None,
                }
            }

            /// Parameter schema.
            #[must_use]
            pub fn schema(self) -> &'static [ParamSpec] {
                match self {
                    $(ConditionKind::$variant => $schema,)*
                }
            }

            /// Generator function.
            #[must_use]
            pub fn generator(self) -> ConditionFn {
                match self {
                    $(ConditionKind::$variant => $generate,)*
                }
            }
        }
    };
}

static NONE: &[ParamSpec] = &[];
const VALUE: ParamSpec = ParamSpec::number("value", 0.0);

static CARD_RANK: &[ParamSpec] = &[RANK];
static CARD_SUIT: &[ParamSpec] = &[SUIT];
static CARD_ENHANCEMENT: &[ParamSpec] = &[ENHANCEMENT];
static CARD_SEAL: &[ParamSpec] = &[SEAL];
static CARD_EDITION: &[ParamSpec] = &[EDITION];
static POSITION: &[ParamSpec] = &[
    ParamSpec::select("position", &["first", "last", "specific"], "first"),
    ParamSpec::at_least("index", 1.0, 1.0).when("position", &["specific"]),
];

static RANK_COUNT: &[ParamSpec] = &[SCOPE, QUANTIFIER, COUNT, RANK];
static SUIT_COUNT: &[ParamSpec] = &[SCOPE, QUANTIFIER, COUNT, SUIT];
static ENHANCEMENT_COUNT: &[ParamSpec] = &[SCOPE, QUANTIFIER, COUNT, ENHANCEMENT];
static SEAL_COUNT: &[ParamSpec] = &[SCOPE, QUANTIFIER, COUNT, SEAL];
static EDITION_COUNT: &[ParamSpec] = &[SCOPE, QUANTIFIER, COUNT, EDITION];
static CARD_COUNT: &[ParamSpec] = &[SCOPE, OPERATOR, VALUE];

static COMPARE: &[ParamSpec] = &[OPERATOR, VALUE];

static HAND_TYPE: &[ParamSpec] = &[
    ParamSpec::open_select("hand_type", HAND_TYPES, HAND_TYPE_ALIASES, "Pair"),
    ParamSpec::select("mode", &["is", "contains"], "is"),
];

const HAND_LEVEL_OPTIONS: &[&str] = &[
    "current",
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

static HAND_LEVEL: &[ParamSpec] = &[
    ParamSpec::open_select("hand_type", HAND_LEVEL_OPTIONS, HAND_TYPE_ALIASES, "current"),
    OPERATOR,
    ParamSpec::number("value", 1.0),
];
static HAND_PLAYED_THIS_ROUND: &[ParamSpec] = &[
    ParamSpec::open_select("hand_type", HAND_TYPES, HAND_TYPE_ALIASES, "Pair"),
    OPERATOR,
    VALUE,
];

static DECK_COMPOSITION: &[ParamSpec] = &[
    PROPERTY,
    RANK.when("property", &["rank"]),
    SUIT.when("property", &["suit"]),
    ENHANCEMENT.when("property", &["enhancement"]),
    SEAL.when("property", &["seal"]),
    EDITION.when("property", &["edition"]),
    OPERATOR,
    VALUE,
];
static JOKER_RARITY_COUNT: &[ParamSpec] = &[
    ParamSpec::open_select("rarity", RARITY_OPTIONS, RARITY_ALIASES, "common"),
    OPERATOR,
    VALUE,
];
static SELF_STICKER: &[ParamSpec] = &[ParamSpec::open_select(
    "sticker",
    &["eternal", "perishable", "rental"],
    &[],
    "eternal",
)];
static SELECTED_DECK: &[ParamSpec] = &[ParamSpec::text("deck", "b_red")];

static BLIND_TYPE: &[ParamSpec] = &[ParamSpec::select("blind", BLIND_TYPES, "small")];
static SPECIFIC_BLIND: &[ParamSpec] = &[ParamSpec::text("blind", "bl_hook")];
static OWNS_JOKER: &[ParamSpec] = &[
    ParamSpec::select("selection", &["specific", "rarity"], "specific"),
    ParamSpec::text("joker_key", "j_joker").when("selection", &["specific"]),
    ParamSpec::open_select("rarity", RARITY_OPTIONS, RARITY_ALIASES, "common")
        .when("selection", &["rarity"]),
];
static VOUCHER_REDEEMED: &[ParamSpec] = &[ParamSpec::text("voucher_key", "v_overstock_norm")];
static RANDOM_CHANCE: &[ParamSpec] = &[
    ParamSpec::at_least("numerator", 1.0, 0.0),
    ParamSpec::at_least("denominator", 4.0, 1.0),
];
static INTERNAL_VARIABLE: &[ParamSpec] = &[ParamSpec::text("variable", ""), OPERATOR, VALUE];
static GENERIC_COMPARE: &[ParamSpec] = &[
    ParamSpec::number("left", 0.0),
    OPERATOR,
    ParamSpec::number("right", 0.0),
];
static CONSUMABLE_USED_TYPE: &[ParamSpec] = &[ParamSpec::open_select(
    "set",
    CONSUMABLE_FILTERS,
    CONSUMABLE_ALIASES,
    "any",
)];
static BOOSTER_TYPE: &[ParamSpec] = &[ParamSpec::select_with(
    "booster",
    BOOSTER_KINDS,
    BOOSTER_ALIASES,
    "any",
)];

condition_kinds! {
    CardRank => "card_rank", CARD_RANK, card::card_rank;
    CardSuit => "card_suit", CARD_SUIT, card::card_suit;
    CardEnhancement => "card_enhancement", CARD_ENHANCEMENT, card::card_enhancement;
    CardSeal => "card_seal", CARD_SEAL, card::card_seal;
    CardEdition => "card_edition", CARD_EDITION, card::card_edition;
    CardIndex => "card_index", POSITION, card::card_index;
    CardDebuffed => "card_debuffed", NONE, card::card_debuffed;
    LuckyTriggered => "lucky_triggered", NONE, card::lucky_triggered;
    RankCount => "rank_count", RANK_COUNT, card::rank_count;
    SuitCount => "suit_count", SUIT_COUNT, card::suit_count;
    EnhancementCount => "enhancement_count", ENHANCEMENT_COUNT, card::enhancement_count;
    SealCount => "seal_count", SEAL_COUNT, card::seal_count;
    EditionCount => "edition_count", EDITION_COUNT, card::edition_count;
    CardCount => "card_count", CARD_COUNT, card::card_count;
    DeckComposition => "deck_composition", DECK_COMPOSITION, card::deck_composition;
    CardIsScoring => "card_is_scoring", NONE, card::card_is_scoring;
    SelfEdition => "self_edition", CARD_EDITION, card::self_edition;
    HandType => "hand_type", HAND_TYPE, game::hand_type;
    HandLevel => "hand_level", HAND_LEVEL, game::hand_level;
    HandPlayedThisRound => "hand_played_this_round", HAND_PLAYED_THIS_ROUND, game::hand_played_this_round;
    HandPlayedThisRun => "hand_played_this_run", HAND_PLAYED_THIS_ROUND, game::hand_played_this_run;
    MostPlayedHand => "most_played_hand", NONE, game::most_played_hand;
    FirstHand => "first_hand", NONE, game::first_hand;
    FirstDiscard => "first_discard", NONE, game::first_discard;
    FinalHand => "final_hand", NONE, game::final_hand;
    Money => "money", COMPARE, game::money;
    HandsLeft => "hands_left", COMPARE, game::hands_left;
    DiscardsLeft => "discards_left", COMPARE, game::discards_left;
    Ante => "ante", COMPARE, game::ante;
    Round => "round", COMPARE, game::round;
    JokerCount => "joker_count", COMPARE, game::joker_count;
    ConsumableCount => "consumable_count", COMPARE, game::consumable_count;
    HandSize => "hand_size", COMPARE, game::hand_size;
    CardsInHand => "cards_in_hand", COMPARE, game::cards_in_hand;
    DeckSize => "deck_size", COMPARE, game::deck_size;
    DeckRemaining => "deck_remaining", COMPARE, game::deck_remaining;
    ScoringChips => "scoring_chips", COMPARE, game::scoring_chips;
    ScoringMult => "scoring_mult", COMPARE, game::scoring_mult;
    HandsPlayedRun => "hands_played_run", COMPARE, game::hands_played_run;
    HandsPlayedRound => "hands_played_round", COMPARE, game::hands_played_round;
    DiscardsUsedRound => "discards_used_round", COMPARE, game::discards_used_round;
    SellValue => "sell_value", COMPARE, game::sell_value;
    JokerSlotsFree => "joker_slots_free", COMPARE, game::joker_slots_free;
    ConsumableSlotsFree => "consumable_slots_free", COMPARE, game::consumable_slots_free;
    BlindRequirement => "blind_requirement", COMPARE, game::blind_requirement;
    BlindProgress => "blind_progress", COMPARE, game::blind_progress;
    RerollCost => "reroll_cost", COMPARE, game::reroll_cost;
    ConsumablesUsedRun => "consumables_used_run", COMPARE, game::consumables_used_run;
    StakeLevel => "stake_level", COMPARE, game::stake_level;
    BlindType => "blind_type", BLIND_TYPE, game::blind_type;
    BossBlindActive => "boss_blind_active", NONE, game::boss_blind_active;
    SpecificBlind => "specific_blind", SPECIFIC_BLIND, game::specific_blind;
    InBlind => "in_blind", NONE, game::in_blind;
    OwnsJoker => "owns_joker", OWNS_JOKER, game::owns_joker;
    JokerRarityCount => "joker_rarity_count", JOKER_RARITY_COUNT, game::joker_rarity_count;
    VoucherRedeemed => "voucher_redeemed", VOUCHER_REDEEMED, game::voucher_redeemed;
    RandomChance => "random_chance", RANDOM_CHANCE, game::random_chance;
    InternalVariable => "internal_variable", INTERNAL_VARIABLE, game::internal_variable;
    GenericCompare => "generic_compare", GENERIC_COMPARE, game::generic_compare;
    ConsumableUsedType => "consumable_used_type", CONSUMABLE_USED_TYPE, game::consumable_used_type;
    BoosterType => "booster_type", BOOSTER_TYPE, game::booster_type;
    JokerPosition => "joker_position", POSITION, game::joker_position;
    SelfSticker => "self_sticker", SELF_STICKER, game::self_sticker;
    SelectedDeck => "selected_deck", SELECTED_DECK, game::selected_deck;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_ids_unique_and_round_trip() {
        let mut seen = FxHashSet::default();
        for kind in ConditionKind::ALL {
            assert!(seen.insert(kind.id()), "duplicate id {}", kind.id());
            assert_eq!(ConditionKind::from_id(kind.id()), Some(*kind));
        }
        assert_eq!(ConditionKind::from_id("moon_phase"), None);
    }

    #[test]
    fn test_schema_defaults_are_valid_options() {
        use crate::params::{DefaultValue, ParamType};
        for kind in ConditionKind::ALL {
            for spec in kind.schema() {
                if let (ParamType::Select { options, open: false, .. }, DefaultValue::Text(d)) =
                    (spec.ty, spec.default)
                {
                    assert!(options.contains(&d), "{}: {}", kind.id(), spec.id);
                }
            }
        }
    }

    #[test]
    fn test_every_kind_compiles_with_defaults_or_reports() {
        use crate::conditions::{compile_condition, ConditionInstance};
        use crate::core::lua::is_balanced;
        use crate::core::{ForgeConfig, ObjectType};
        use crate::triggers::TriggerKind;

        let config = ForgeConfig::new("mymod");
        let ctx = GenContext::new(&config, ObjectType::Joker, "j_mymod_x", TriggerKind::CardScored, &[]);
        for kind in ConditionKind::ALL {
            let mut fallbacks = Vec::new();
            match compile_condition(&ConditionInstance::new(kind.id()), &ctx, &mut fallbacks) {
                Ok(expr) => {
                    let lines: Vec<&str> = expr.lines().collect();
                    assert!(is_balanced(&lines), "{}", kind.id());
                }
                Err(err) => assert!(
                    matches!(
                        err,
                        CodegenErrorKind::WrongTrigger { .. } | CodegenErrorKind::UnknownVariable { .. }
                    ),
                    "{}: {err}",
                    kind.id()
                ),
            }
            assert!(fallbacks.is_empty(), "{}", kind.id());
        }
    }
}
