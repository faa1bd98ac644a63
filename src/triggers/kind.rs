//! Trigger identifiers.
//!
//! Rules name their trigger by string id; the compiler maps it onto a
//! closed `TriggerKind` so every trigger is handled explicitly.

use serde::{Deserialize, Serialize};

macro_rules! trigger_kinds {
    ($($(#[$doc:meta])* $variant:ident => $id:literal,)*) => {
        /// Named hook point in the host's event model.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum TriggerKind {
            $($(#[$doc])* $variant,)*
        }

        impl TriggerKind {
            /// Every trigger, in declaration order.
            pub const ALL: &'static [TriggerKind] = &[$(TriggerKind::$variant,)*];

            /// Id as stored in authored rules.
            #[must_use]
            pub const fn id(self) -> &'static str {
                match self {
                    $(TriggerKind::$variant => $id,)*
                }
            }

            /// Look up a trigger by id.
            #[must_use]
            pub fn from_id(id: &str) -> Option<Self> {
                match id {
                    $($id => Some(TriggerKind::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

trigger_kinds! {
    /// Main scoring step of the jokers.
    HandPlayed => "hand_played",
    /// Before any card scores.
    BeforeHandPlayed => "before_hand_played",
    /// After the hand finished scoring.
    AfterHandPlayed => "after_hand_played",
    /// Once per scoring card.
    CardScored => "card_scored",
    /// Retrigger step of played cards.
    CardRepetition => "card_repetition",
    /// Retrigger step of cards held in hand.
    HeldRepetition => "held_repetition",
    /// Once per card held in hand while scoring.
    CardHeldInHand => "card_held_in_hand",
    /// Once per card held in hand at end of round.
    CardHeldEndOfRound => "card_held_end_of_round",
    /// Once per discarded card.
    CardDiscarded => "card_discarded",
    /// Once per discard action.
    HandDiscarded => "hand_discarded",
    RoundEnd => "round_end",
    BossDefeated => "boss_defeated",
    BlindSelected => "blind_selected",
    BlindSkipped => "blind_skipped",
    FirstHandDrawn => "first_hand_drawn",
    HandDrawn => "hand_drawn",
    ShopEntered => "shop_entered",
    ShopExited => "shop_exited",
    ShopReroll => "shop_reroll",
    CardBought => "card_bought",
    CardSold => "card_sold",
    /// The object itself is sold.
    SellingSelf => "selling_self",
    BoosterOpened => "booster_opened",
    BoosterSkipped => "booster_skipped",
    /// A consumable is used (for consumables: their own `use`).
    ConsumableUsed => "consumable_used",
    PlayingCardAdded => "playing_card_added",
    CardDestroyed => "card_destroyed",
    /// The run is about to be lost.
    GameOver => "game_over",
    /// The object enters the player's possession.
    AddedToDeck => "added_to_deck",
    /// The object leaves the player's possession.
    RemovedFromDeck => "removed_from_deck",
    /// A voucher is redeemed (its own `redeem`).
    VoucherRedeemed => "voucher_redeemed",
}

impl TriggerKind {
    /// Triggers that run in the retrigger step and may return `repetitions`.
    #[must_use]
    pub const fn is_repetition(self) -> bool {
        matches!(self, TriggerKind::CardRepetition | TriggerKind::HeldRepetition)
    }

    /// Triggers where `context.full_hand` / `context.scoring_hand` exist.
    #[must_use]
    pub const fn has_played_hand(self) -> bool {
        matches!(
            self,
            TriggerKind::HandPlayed
                | TriggerKind::BeforeHandPlayed
                | TriggerKind::AfterHandPlayed
                | TriggerKind::CardScored
                | TriggerKind::CardRepetition
                | TriggerKind::HeldRepetition
                | TriggerKind::CardHeldInHand
                | TriggerKind::HandDiscarded
        )
    }
}

impl std::fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
