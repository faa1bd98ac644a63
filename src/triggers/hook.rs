//! Where generated code for a trigger runs.
//!
//! Most triggers run inside the object's `calculate(self, card, context)`
//! behind a guard on `context`; a few have a dedicated host function.
//! The guard depends on the object type: a joker sees every card scored,
//! a seal only sees the card it is attached to.

use crate::core::ObjectType;

use super::kind::TriggerKind;

/// Host function other than `calculate`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HostFunction {
    /// Consumable `use(self, card, area, copier)`.
    Use,
    /// Voucher `redeem(self, card)`.
    Redeem,
    /// `add_to_deck(self, card, from_debuff)`.
    AddToDeck,
    /// `remove_from_deck(self, card, from_debuff)`.
    RemoveFromDeck,
}

impl HostFunction {
    /// Field name of the function in the object table.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            HostFunction::Use => "use",
            HostFunction::Redeem => "redeem",
            HostFunction::AddToDeck => "add_to_deck",
            HostFunction::RemoveFromDeck => "remove_from_deck",
        }
    }

    /// Parameter list, including `self`.
    #[must_use]
    pub const fn params(self) -> &'static str {
        match self {
            HostFunction::Use => "self, card, area, copier",
            HostFunction::Redeem => "self, card",
            HostFunction::AddToDeck | HostFunction::RemoveFromDeck => "self, card, from_debuff",
        }
    }
}

/// How a trigger is hooked for one object type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerHook {
    /// Inside `calculate`, behind a guard on `context`.
    Calculate { guard: &'static str },
    /// A dedicated host function; its effects are applied in place
    /// instead of being returned.
    Host(HostFunction),
}

impl TriggerHook {
    /// Whether the hook's function returns effect tables to the host.
    #[must_use]
    pub const fn returns_effects(self) -> bool {
        matches!(self, TriggerHook::Calculate { .. })
    }
}

/// The card an effect or condition acts on under a trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFocus {
    /// A single card reachable through a Lua expression.
    Single(&'static str),
    /// Every highlighted card in hand (consumable use).
    Highlighted,
    /// No card in focus.
    None,
}

impl CardFocus {
    /// Expression for the focused card, if there is exactly one.
    #[must_use]
    pub const fn single(self) -> Option<&'static str> {
        match self {
            CardFocus::Single(expr) => Some(expr),
            _ => None,
        }
    }
}

const OTHER_CARD: &str = "context.other_card";
const HIGHLIGHTED: &str = "G.hand.highlighted";

impl TriggerKind {
    /// How this trigger is hooked on an object type, `None` if unsupported.
    #[must_use]
    pub fn hook(self, object_type: ObjectType) -> Option<TriggerHook> {
        match object_type {
            ObjectType::Joker => joker_hook(self),
            ObjectType::Enhancement | ObjectType::Seal => card_hook(self, false),
            ObjectType::Edition => card_hook(self, true),
            ObjectType::Consumable => match self {
                TriggerKind::ConsumableUsed => Some(TriggerHook::Host(HostFunction::Use)),
                TriggerKind::AddedToDeck => Some(TriggerHook::Host(HostFunction::AddToDeck)),
                TriggerKind::RemovedFromDeck => {
                    Some(TriggerHook::Host(HostFunction::RemoveFromDeck))
                }
                _ => None,
            },
            ObjectType::Voucher => match self {
                TriggerKind::VoucherRedeemed => Some(TriggerHook::Host(HostFunction::Redeem)),
                _ => None,
            },
        }
    }

    /// Triggers an object type supports, in declaration order.
    pub fn supported(object_type: ObjectType) -> impl Iterator<Item = TriggerKind> {
        TriggerKind::ALL
            .iter()
            .copied()
            .filter(move |trigger| trigger.hook(object_type).is_some())
    }

    /// The card in focus under this trigger.
    #[must_use]
    pub fn focus(self, object_type: ObjectType) -> CardFocus {
        if object_type.is_card_modifier() {
            return CardFocus::Single("card");
        }
        match (object_type, self) {
            (ObjectType::Consumable, TriggerKind::ConsumableUsed) => CardFocus::Highlighted,
            (
                ObjectType::Joker,
                TriggerKind::CardScored
                | TriggerKind::CardRepetition
                | TriggerKind::HeldRepetition
                | TriggerKind::CardHeldInHand
                | TriggerKind::CardHeldEndOfRound
                | TriggerKind::CardDiscarded,
            ) => CardFocus::Single(OTHER_CARD),
            _ => CardFocus::None,
        }
    }
}

/// Expression for the highlighted-cards collection.
#[must_use]
pub const fn highlighted_cards() -> &'static str {
    HIGHLIGHTED
}

fn joker_hook(trigger: TriggerKind) -> Option<TriggerHook> {
    let guard = match trigger {
        TriggerKind::HandPlayed => "context.cardarea == G.jokers and context.joker_main",
        TriggerKind::BeforeHandPlayed => "context.before and context.cardarea == G.jokers",
        TriggerKind::AfterHandPlayed => "context.after and context.cardarea == G.jokers",
        TriggerKind::CardScored => "context.individual and context.cardarea == G.play",
        TriggerKind::CardRepetition => "context.repetition and context.cardarea == G.play",
        TriggerKind::HeldRepetition => "context.repetition and context.cardarea == G.hand",
        TriggerKind::CardHeldInHand => {
            "context.individual and context.cardarea == G.hand and not context.end_of_round"
        }
        TriggerKind::CardHeldEndOfRound => {
            "context.individual and context.cardarea == G.hand and context.end_of_round"
        }
        TriggerKind::CardDiscarded => "context.discard",
        TriggerKind::HandDiscarded => "context.pre_discard",
        TriggerKind::RoundEnd => {
            "context.end_of_round and context.game_over == false and context.main_eval"
        }
        TriggerKind::BossDefeated => {
            "context.end_of_round and context.game_over == false and context.main_eval and G.GAME.blind.boss"
        }
        TriggerKind::BlindSelected => "context.setting_blind",
        TriggerKind::BlindSkipped => "context.skip_blind",
        TriggerKind::FirstHandDrawn => "context.first_hand_drawn",
        TriggerKind::HandDrawn => "context.hand_drawn",
        TriggerKind::ShopEntered => "context.starting_shop",
        TriggerKind::ShopExited => "context.ending_shop",
        TriggerKind::ShopReroll => "context.reroll_shop",
        TriggerKind::CardBought => "context.buying_card",
        TriggerKind::CardSold => "context.selling_card",
        TriggerKind::SellingSelf => "context.selling_self",
        TriggerKind::BoosterOpened => "context.open_booster",
        TriggerKind::BoosterSkipped => "context.skipping_booster",
        TriggerKind::ConsumableUsed => "context.using_consumeable",
        TriggerKind::PlayingCardAdded => "context.playing_card_added",
        TriggerKind::CardDestroyed => "context.remove_playing_cards",
        TriggerKind::GameOver => "context.end_of_round and context.game_over and context.main_eval",
        TriggerKind::AddedToDeck => return Some(TriggerHook::Host(HostFunction::AddToDeck)),
        TriggerKind::RemovedFromDeck => {
            return Some(TriggerHook::Host(HostFunction::RemoveFromDeck))
        }
        TriggerKind::VoucherRedeemed => return None,
    };
    Some(TriggerHook::Calculate { guard })
}

fn card_hook(trigger: TriggerKind, edition: bool) -> Option<TriggerHook> {
    let guard = match trigger {
        TriggerKind::CardScored if edition => {
            "context.pre_joker or (context.main_scoring and context.cardarea == G.play)"
        }
        TriggerKind::CardScored => "context.main_scoring and context.cardarea == G.play",
        TriggerKind::CardHeldInHand => "context.main_scoring and context.cardarea == G.hand",
        TriggerKind::CardHeldEndOfRound => {
            "context.playing_card_end_of_round and context.cardarea == G.hand"
        }
        TriggerKind::CardRepetition => "context.repetition and context.cardarea == G.play",
        TriggerKind::HeldRepetition => "context.repetition and context.cardarea == G.hand",
        TriggerKind::CardDiscarded => "context.discard and context.other_card == card",
        _ => return None,
    };
    Some(TriggerHook::Calculate { guard })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joker_hooks() {
        assert_eq!(
            TriggerKind::HandPlayed.hook(ObjectType::Joker),
            Some(TriggerHook::Calculate {
                guard: "context.cardarea == G.jokers and context.joker_main"
            })
        );
        assert_eq!(
            TriggerKind::AddedToDeck.hook(ObjectType::Joker),
            Some(TriggerHook::Host(HostFunction::AddToDeck))
        );
        assert_eq!(TriggerKind::VoucherRedeemed.hook(ObjectType::Joker), None);
    }

    #[test]
    fn test_boss_defeated_skips_lost_runs() {
        let Some(TriggerHook::Calculate { guard }) = TriggerKind::BossDefeated.hook(ObjectType::Joker)
        else {
            panic!("boss_defeated should hook calculate");
        };
        assert!(guard.contains("context.game_over == false"));
        assert!(guard.ends_with("G.GAME.blind.boss"));
    }

    #[test]
    fn test_card_modifier_hooks() {
        assert!(TriggerKind::CardScored.hook(ObjectType::Seal).is_some());
        assert!(TriggerKind::ShopEntered.hook(ObjectType::Seal).is_none());
        let Some(TriggerHook::Calculate { guard }) = TriggerKind::CardScored.hook(ObjectType::Edition)
        else {
            panic!("edition scoring should hook calculate");
        };
        assert!(guard.contains("context.pre_joker"));
    }

    #[test]
    fn test_host_only_types() {
        let consumable: Vec<_> = TriggerKind::supported(ObjectType::Consumable).collect();
        assert_eq!(
            consumable,
            vec![
                TriggerKind::ConsumableUsed,
                TriggerKind::AddedToDeck,
                TriggerKind::RemovedFromDeck
            ]
        );
        let voucher: Vec<_> = TriggerKind::supported(ObjectType::Voucher).collect();
        assert_eq!(voucher, vec![TriggerKind::VoucherRedeemed]);
        assert!(!TriggerHook::Host(HostFunction::Redeem).returns_effects());
    }

    #[test]
    fn test_focus() {
        assert_eq!(
            TriggerKind::CardScored.focus(ObjectType::Joker),
            CardFocus::Single("context.other_card")
        );
        assert_eq!(TriggerKind::HandPlayed.focus(ObjectType::Joker), CardFocus::None);
        assert_eq!(
            TriggerKind::CardScored.focus(ObjectType::Enhancement),
            CardFocus::Single("card")
        );
        assert_eq!(
            TriggerKind::ConsumableUsed.focus(ObjectType::Consumable),
            CardFocus::Highlighted
        );
    }

    #[test]
    fn test_every_type_supports_something() {
        for object_type in ObjectType::ALL {
            assert!(TriggerKind::supported(object_type).next().is_some());
        }
    }
}
