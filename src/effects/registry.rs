//! Effect kind registry.
//!
//! Same shape as the condition registry: one variant per kind, bound to a
//! schema and a generator at compile time.

use crate::core::{CodegenErrorKind, GenContext};
use crate::params::options::{HAND_TYPE_ALIASES, MESSAGE_COLOURS};
use crate::params::{NormalizedParams, ParamSpec};

use super::change::CHANGE;
use super::creation::{
    self, COPY_CARD, COPY_CONSUMABLE, COPY_JOKER, CREATE_CONSUMABLE, CREATE_JOKER,
    CREATE_PLAYING_CARD, CREATE_TAG, DESTROY_CONSUMABLE, DESTROY_IN_HAND, DESTROY_JOKER,
    DRAW_CARDS, LAST_CONSUMABLE, REDEEM_VOUCHER,
};
use super::cards::{
    self, AMOUNT, DEBUFF, SET_EDITION, SET_ENHANCEMENT, SET_RANK, SET_SEAL, SET_SUIT,
};
use super::economy::{
    self, COUNTER, ITEM_RATE, ONE, SCALED, SELL_VALUE, SHOP_BOOSTER, SHOP_VOUCHER,
};
use super::fragment::CodeFragment;
use super::jokers::{self, COPY_ABILITY, JOKER_EDITION, JOKER_STICKER};
use super::misc::{self, JUICE, MODIFY_VARIABLE, NONE, PLAY_SOUND};
use super::scoring;

/// Generator of one effect kind.
pub type EffectFn = fn(&NormalizedParams, &GenContext<'_>) -> Result<CodeFragment, CodegenErrorKind>;

macro_rules! effect_kinds {
    ($($variant:ident => $id:literal, $schema:expr, $generate:path;)*) => {
        /// Every effect kind the compiler knows.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum EffectKind {
            $($variant,)*
        }

        impl EffectKind {
            pub const ALL: &'static [EffectKind] = &[$(EffectKind::$variant,)*];

            #[must_use]
            pub const fn id(self) -> &'static str {
                match self {
                    $(EffectKind::$variant => $id,)*
                }
            }

            #[must_use]
            pub fn from_id(id: &str) -> Option<Self> {
                match id {
                    $($id => Some(EffectKind::$variant),)*
                    _ => None,
                }
            }

            #[must_use]
            pub fn schema(self) -> &'static [ParamSpec] {
                match self {
                    $(EffectKind::$variant => $schema,)*
                }
            }

            #[must_use]
            pub fn generator(self) -> EffectFn {
                match self {
                    $(EffectKind::$variant => $generate,)*
                }
            }
        }
    };
}

static VALUE: &[ParamSpec] = &[ParamSpec::number("value", 1.0)];
static REPETITIONS: &[ParamSpec] = &[ParamSpec::at_least("value", 1.0, 0.0)];

const LEVEL_UP_HANDS: &[&str] = &[
    "current",
    "random",
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

static LEVEL_UP: &[ParamSpec] = &[
    ParamSpec::open_select("hand_type", LEVEL_UP_HANDS, HAND_TYPE_ALIASES, "current"),
    ParamSpec::at_least("value", 1.0, 0.0),
];
static HAND_STAT: &[ParamSpec] = &[
    ParamSpec::open_select("hand_type", LEVEL_UP_HANDS, HAND_TYPE_ALIASES, "current"),
    ParamSpec::select("stat", &["chips", "mult"], "chips"),
    CHANGE,
    ParamSpec::number("value", 1.0),
];
static SHOW_MESSAGE: &[ParamSpec] = &[
    ParamSpec::text("text", "Hello!"),
    ParamSpec::select("colour", MESSAGE_COLOURS, "white"),
];

effect_kinds! {
    AddChips => "add_chips", VALUE, scoring::add_chips;
    AddMult => "add_mult", VALUE, scoring::add_mult;
    ApplyXMult => "apply_x_mult", VALUE, scoring::apply_x_mult;
    ApplyXChips => "apply_x_chips", VALUE, scoring::apply_x_chips;
    ApplyExpMult => "apply_exp_mult", VALUE, scoring::apply_exp_mult;
    ApplyExpChips => "apply_exp_chips", VALUE, scoring::apply_exp_chips;
    AddDollars => "add_dollars", VALUE, scoring::add_dollars;
    Balance => "balance", NONE, scoring::balance;
    SwapChipsMult => "swap_chips_mult", NONE, scoring::swap_chips_mult;
    RetriggerCards => "retrigger_cards", REPETITIONS, scoring::retrigger_cards;
    LevelUpHand => "level_up_hand", LEVEL_UP, scoring::level_up_hand;
    ShowMessage => "show_message", SHOW_MESSAGE, scoring::show_message;
    PreventGameOver => "prevent_game_over", NONE, scoring::prevent_game_over;
    ModifyHandStat => "modify_hand_stat", HAND_STAT, scoring::modify_hand_stat;

    CreateJoker => "create_joker", CREATE_JOKER, creation::create_joker;
    CreateConsumable => "create_consumable", CREATE_CONSUMABLE, creation::create_consumable;
    CreateTag => "create_tag", CREATE_TAG, creation::create_tag;
    CreatePlayingCard => "create_playing_card", CREATE_PLAYING_CARD, creation::create_playing_card;
    CopyFocusedCard => "copy_focused_card", COPY_CARD, creation::copy_focused_card;
    CopyJoker => "copy_joker", COPY_JOKER, creation::copy_joker;
    DestroyJoker => "destroy_joker", DESTROY_JOKER, creation::destroy_joker;
    DestroyConsumable => "destroy_consumable", DESTROY_CONSUMABLE, creation::destroy_consumable;
    DrawCards => "draw_cards", DRAW_CARDS, creation::draw_cards;
    RedeemVoucher => "redeem_voucher", REDEEM_VOUCHER, creation::redeem_voucher;
    CopyConsumable => "copy_consumable", COPY_CONSUMABLE, creation::copy_consumable;
    CreateLastConsumable => "create_last_consumable", LAST_CONSUMABLE, creation::create_last_consumable;
    DestroyCardsInHand => "destroy_cards_in_hand", DESTROY_IN_HAND, creation::destroy_cards_in_hand;

    CopyJokerAbility => "copy_joker_ability", COPY_ABILITY, jokers::copy_joker_ability;
    AddJokerSticker => "add_joker_sticker", JOKER_STICKER, jokers::add_joker_sticker;
    SetJokerEdition => "set_joker_edition", JOKER_EDITION, jokers::set_joker_edition;

    SetCardSuit => "set_card_suit", SET_SUIT, cards::set_card_suit;
    SetCardRank => "set_card_rank", SET_RANK, cards::set_card_rank;
    IncrementRank => "increment_rank", AMOUNT, cards::increment_rank;
    SetCardEnhancement => "set_card_enhancement", SET_ENHANCEMENT, cards::set_card_enhancement;
    SetCardSeal => "set_card_seal", SET_SEAL, cards::set_card_seal;
    SetCardEdition => "set_card_edition", SET_EDITION, cards::set_card_edition;
    AddPermaChips => "add_perma_chips", AMOUNT, cards::add_perma_chips;
    AddPermaMult => "add_perma_mult", AMOUNT, cards::add_perma_mult;
    AddPermaXMult => "add_perma_x_mult", AMOUNT, cards::add_perma_x_mult;
    AddPermaDollars => "add_perma_dollars", AMOUNT, cards::add_perma_dollars;
    DestroyCard => "destroy_card", NONE, cards::destroy_card;
    AddPermaXChips => "add_perma_x_chips", AMOUNT, cards::add_perma_x_chips;
    AddPermaHeldChips => "add_perma_held_chips", AMOUNT, cards::add_perma_held_chips;
    AddPermaHeldMult => "add_perma_held_mult", AMOUNT, cards::add_perma_held_mult;
    AddPermaHeldXMult => "add_perma_held_x_mult", AMOUNT, cards::add_perma_held_x_mult;
    FlipCards => "flip_cards", NONE, cards::flip_cards;
    DebuffCard => "debuff_card", DEBUFF, cards::debuff_card;

    SetDollars => "set_dollars", COUNTER, economy::set_dollars;
    EditHands => "edit_hands", COUNTER, economy::edit_hands;
    EditDiscards => "edit_discards", COUNTER, economy::edit_discards;
    EditHandSize => "edit_hand_size", COUNTER, economy::edit_hand_size;
    EditJokerSlots => "edit_joker_slots", COUNTER, economy::edit_joker_slots;
    EditConsumableSlots => "edit_consumable_slots", COUNTER, economy::edit_consumable_slots;
    EditPlaySize => "edit_play_size", COUNTER, economy::edit_play_size;
    EditDiscardSize => "edit_discard_size", COUNTER, economy::edit_discard_size;
    EditInterestCap => "edit_interest_cap", COUNTER, economy::edit_interest_cap;
    EditRerollCost => "edit_reroll_cost", COUNTER, economy::edit_reroll_cost;
    EditShopSlots => "edit_shop_slots", COUNTER, economy::edit_shop_slots;
    EditBoosterSlots => "edit_booster_slots", COUNTER, economy::edit_booster_slots;
    EditVoucherSlots => "edit_voucher_slots", COUNTER, economy::edit_voucher_slots;
    EditAnte => "edit_ante", COUNTER, economy::edit_ante;
    EditWinAnte => "edit_win_ante", COUNTER, economy::edit_win_ante;
    EditProbability => "edit_probability", SCALED, economy::edit_probability;
    ModifyBlindRequirement => "modify_blind_requirement", SCALED, economy::modify_blind_requirement;
    DisableBossBlind => "disable_boss_blind", NONE, economy::disable_boss_blind;
    AllowDebt => "allow_debt", COUNTER, economy::allow_debt;
    DiscountItems => "discount_items", COUNTER, economy::discount_items;
    FreeRerolls => "free_rerolls", ONE, economy::free_rerolls;
    EditItemRate => "edit_item_rate", ITEM_RATE, economy::edit_item_rate;
    EditSellValue => "edit_sell_value", SELL_VALUE, economy::edit_sell_value;
    EditRoundHands => "edit_round_hands", COUNTER, economy::edit_round_hands;
    EditRoundDiscards => "edit_round_discards", COUNTER, economy::edit_round_discards;
    EditBlindReward => "edit_blind_reward", COUNTER, economy::edit_blind_reward;
    EditHandMoney => "edit_hand_money", COUNTER, economy::edit_hand_money;
    EditDiscardMoney => "edit_discard_money", COUNTER, economy::edit_discard_money;
    RerollBoss => "reroll_boss", NONE, economy::reroll_boss;
    WinBlind => "win_blind", NONE, economy::win_blind;
    AddBoosterToShop => "add_booster_to_shop", SHOP_BOOSTER, economy::add_booster_to_shop;
    AddVoucherToShop => "add_voucher_to_shop", SHOP_VOUCHER, economy::add_voucher_to_shop;

    ModifyInternalVariable => "modify_internal_variable", MODIFY_VARIABLE, misc::modify_internal_variable;
    PlaySound => "play_sound", PLAY_SOUND, misc::play_sound;
    ForceGameOver => "force_game_over", NONE, misc::force_game_over;
    ShuffleJokers => "shuffle_jokers", NONE, misc::shuffle_jokers;
    DestroySelf => "destroy_self", NONE, misc::destroy_self;
    JuiceUp => "juice_up", JUICE, misc::juice_up;
}

impl EffectKind {
    /// True for kinds that act on the focused or highlighted cards.
    #[must_use]
    pub const fn targets_cards(self) -> bool {
        matches!(
            self,
            EffectKind::SetCardSuit
                | EffectKind::SetCardRank
                | EffectKind::IncrementRank
                | EffectKind::SetCardEnhancement
                | EffectKind::SetCardSeal
                | EffectKind::SetCardEdition
                | EffectKind::AddPermaChips
                | EffectKind::AddPermaMult
                | EffectKind::AddPermaXMult
                | EffectKind::AddPermaDollars
                | EffectKind::AddPermaXChips
                | EffectKind::AddPermaHeldChips
                | EffectKind::AddPermaHeldMult
                | EffectKind::AddPermaHeldXMult
                | EffectKind::FlipCards
                | EffectKind::DebuffCard
                | EffectKind::DestroyCard
                | EffectKind::CopyFocusedCard
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{DefaultValue, ParamType};
    use rustc_hash::FxHashSet;

    #[test]
    fn test_ids_unique_and_round_trip() {
        let mut seen = FxHashSet::default();
        for kind in EffectKind::ALL {
            assert!(seen.insert(kind.id()), "duplicate id {}", kind.id());
            assert_eq!(EffectKind::from_id(kind.id()), Some(*kind));
        }
        assert_eq!(EffectKind::from_id("explode"), None);
    }

    #[test]
    fn test_closed_select_defaults_are_options() {
        for kind in EffectKind::ALL {
            for spec in kind.schema() {
                if let (ParamType::Select { options, open: false, .. }, DefaultValue::Text(default)) =
                    (spec.ty, spec.default)
                {
                    assert!(
                        options.contains(&default),
                        "{}.{} default {default:?}",
                        kind.id(),
                        spec.id
                    );
                }
            }
        }
    }

    #[test]
    fn test_card_targeting_kinds() {
        assert!(EffectKind::FlipCards.targets_cards());
        assert!(EffectKind::AddPermaHeldMult.targets_cards());
        assert!(!EffectKind::DestroyCardsInHand.targets_cards());
        assert!(!EffectKind::CopyJokerAbility.targets_cards());
    }
}
