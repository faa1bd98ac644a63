//! Card property checks.
//!
//! A property check is a boolean expression over one card expression. The
//! same predicate backs both the single-card conditions (`card_rank` on
//! the card in focus) and the quantified ones (`rank_count` over a scope).

use crate::core::lua::lua_string;
use crate::core::{CodegenErrorKind, GenContext};
use crate::keys::tokens::{edition_key, enhancement_key, rank_id, seal_key};
use crate::params::options::{
    EDITION_ALIASES, EDITION_FILTERS, ENHANCEMENT_ALIASES, ENHANCEMENT_FILTERS, RANK_ALIASES,
    RANK_FILTERS, SEAL_ALIASES, SEAL_FILTERS, SUIT_ALIASES, SUIT_FILTERS,
};
use crate::params::{NormalizedParams, ParamSpec};
use crate::triggers::TriggerKind;

use super::compare::CompareOp;
use super::quantifier::{
    compared, quantified, quantifier_from_params, CardScope, CountStep, COUNT_ID, SCOPED_CARD,
};

/// Property of a playing card a condition can test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardProperty {
    Rank,
    Suit,
    Enhancement,
    Seal,
    Edition,
}

impl CardProperty {
    /// Id of the parameter holding the wanted value.
    #[must_use]
    pub const fn param(self) -> &'static str {
        match self {
            CardProperty::Rank => "rank",
            CardProperty::Suit => "suit",
            CardProperty::Enhancement => "enhancement",
            CardProperty::Seal => "seal",
            CardProperty::Edition => "edition",
        }
    }

    /// Parse a property name.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "rank" => CardProperty::Rank,
            "suit" => CardProperty::Suit,
            "enhancement" => CardProperty::Enhancement,
            "seal" => CardProperty::Seal,
            "edition" => CardProperty::Edition,
            _ => return None,
        })
    }

    /// Boolean expression testing `card` for `token`.
    ///
    /// `any` always holds; custom keys are namespaced with the mod prefix.
    #[must_use]
    pub fn predicate(self, card: &str, token: &str, mod_prefix: &str) -> String {
        if token == "any" {
            return "true".to_string();
        }
        match self {
            CardProperty::Rank => rank_predicate(card, token),
            CardProperty::Suit => match token {
                "red" => format!("({card}:is_suit(\"Hearts\") or {card}:is_suit(\"Diamonds\"))"),
                "black" => format!("({card}:is_suit(\"Spades\") or {card}:is_suit(\"Clubs\"))"),
                suit => format!("{card}:is_suit({})", lua_string(suit)),
            },
            CardProperty::Enhancement => match token {
                "none" => format!("next(SMODS.get_enhancements({card})) == nil"),
                key => format!(
                    "SMODS.has_enhancement({card}, {})",
                    lua_string(&enhancement_key(key, mod_prefix))
                ),
            },
            CardProperty::Seal => match token {
                "none" => format!("{card}.seal == nil"),
                key => format!("{card}.seal == {}", lua_string(&seal_key(key, mod_prefix))),
            },
            CardProperty::Edition => match token {
                "none" => format!("{card}.edition == nil"),
                key => format!(
                    "({card}.edition and {card}.edition.key == {})",
                    lua_string(&edition_key(key, mod_prefix))
                ),
            },
        }
    }
}

fn rank_predicate(card: &str, token: &str) -> String {
    let id = format!("{card}:get_id()");
    match token {
        "face" => format!("{card}:is_face()"),
        "numbered" => format!("({id} >= 2 and {id} <= 10)"),
        "even" => format!("({id} <= 10 and {id} % 2 == 0)"),
        "odd" => format!("({id} == 14 or ({id} <= 9 and {id} % 2 == 1))"),
        rank => match rank_id(rank) {
            Some(n) => format!("{id} == {n}"),
            None => "true".to_string(),
        },
    }
}

pub const RANK: ParamSpec = ParamSpec::select_with("rank", RANK_FILTERS, RANK_ALIASES, "any");
pub const SUIT: ParamSpec = ParamSpec::select_with("suit", SUIT_FILTERS, SUIT_ALIASES, "any");
pub const ENHANCEMENT: ParamSpec =
    ParamSpec::open_select("enhancement", ENHANCEMENT_FILTERS, ENHANCEMENT_ALIASES, "any");
pub const SEAL: ParamSpec = ParamSpec::open_select("seal", SEAL_FILTERS, SEAL_ALIASES, "any");
pub const EDITION: ParamSpec =
    ParamSpec::open_select("edition", EDITION_FILTERS, EDITION_ALIASES, "any");

pub const PROPERTY: ParamSpec = ParamSpec::select(
    "property",
    &["rank", "suit", "enhancement", "seal", "edition"],
    "enhancement",
);

/// Expression of the single card in focus, or the error for its absence.
fn focused(ctx: &GenContext<'_>, kind: &str) -> Result<&'static str, CodegenErrorKind> {
    ctx.focus().single().ok_or_else(|| ctx.no_focus(kind))
}

/// Property check on the card in focus.
pub fn single_property(
    property: CardProperty,
    params: &NormalizedParams,
    ctx: &GenContext<'_>,
    kind: &str,
) -> Result<String, CodegenErrorKind> {
    let card = focused(ctx, kind)?;
    Ok(property.predicate(card, params.text(property.param()), ctx.mod_prefix()))
}

/// Quantified property check over a card scope.
pub fn counted_property(
    property: CardProperty,
    params: &NormalizedParams,
    ctx: &GenContext<'_>,
    kind: &str,
) -> Result<String, CodegenErrorKind> {
    let scope = CardScope::from_params(params);
    scope.check(ctx, kind)?;
    let predicate = property.predicate(SCOPED_CARD, params.text(property.param()), ctx.mod_prefix());
    let target = ctx.numeric(params, COUNT_ID, kind)?;
    Ok(quantified(
        &CountStep::new(scope, predicate),
        quantifier_from_params(params),
        &target,
    ))
}

pub fn card_rank(p: &NormalizedParams, ctx: &GenContext<'_>) -> Result<String, CodegenErrorKind> {
    single_property(CardProperty::Rank, p, ctx, "card_rank")
}

pub fn card_suit(p: &NormalizedParams, ctx: &GenContext<'_>) -> Result<String, CodegenErrorKind> {
    single_property(CardProperty::Suit, p, ctx, "card_suit")
}

pub fn card_enhancement(
    p: &NormalizedParams,
    ctx: &GenContext<'_>,
) -> Result<String, CodegenErrorKind> {
    single_property(CardProperty::Enhancement, p, ctx, "card_enhancement")
}

pub fn card_seal(p: &NormalizedParams, ctx: &GenContext<'_>) -> Result<String, CodegenErrorKind> {
    single_property(CardProperty::Seal, p, ctx, "card_seal")
}

pub fn card_edition(p: &NormalizedParams, ctx: &GenContext<'_>) -> Result<String, CodegenErrorKind> {
    single_property(CardProperty::Edition, p, ctx, "card_edition")
}

pub fn rank_count(p: &NormalizedParams, ctx: &GenContext<'_>) -> Result<String, CodegenErrorKind> {
    counted_property(CardProperty::Rank, p, ctx, "rank_count")
}

pub fn suit_count(p: &NormalizedParams, ctx: &GenContext<'_>) -> Result<String, CodegenErrorKind> {
    counted_property(CardProperty::Suit, p, ctx, "suit_count")
}

pub fn enhancement_count(
    p: &NormalizedParams,
    ctx: &GenContext<'_>,
) -> Result<String, CodegenErrorKind> {
    counted_property(CardProperty::Enhancement, p, ctx, "enhancement_count")
}

pub fn seal_count(p: &NormalizedParams, ctx: &GenContext<'_>) -> Result<String, CodegenErrorKind> {
    counted_property(CardProperty::Seal, p, ctx, "seal_count")
}

pub fn edition_count(p: &NormalizedParams, ctx: &GenContext<'_>) -> Result<String, CodegenErrorKind> {
    counted_property(CardProperty::Edition, p, ctx, "edition_count")
}

/// Size of a card scope compared against a number.
pub fn card_count(p: &NormalizedParams, ctx: &GenContext<'_>) -> Result<String, CodegenErrorKind> {
    let scope = CardScope::from_params(p);
    scope.check(ctx, "card_count")?;
    let size = match scope {
        CardScope::Unscored => "(#context.full_hand - #context.scoring_hand)".to_string(),
        other => format!("#{}", other.collection()),
    };
    let value = ctx.numeric(p, "value", "card_count")?;
    Ok(CompareOp::from_params(p).apply(&size, &value))
}

/// How many cards of the full deck have a property, compared against a
/// number. Available under every trigger.
pub fn deck_composition(
    p: &NormalizedParams,
    ctx: &GenContext<'_>,
) -> Result<String, CodegenErrorKind> {
    let property = CardProperty::from_token(p.text("property")).unwrap_or(CardProperty::Enhancement);
    let predicate = property.predicate(SCOPED_CARD, p.text(property.param()), ctx.mod_prefix());
    let value = ctx.numeric(p, "value", "deck_composition")?;
    Ok(compared(
        &CountStep::new(CardScope::Deck, predicate),
        &CompareOp::from_params(p).apply("count", &value),
    ))
}

/// The card in focus is one of the scoring cards.
pub fn card_is_scoring(
    _p: &NormalizedParams,
    ctx: &GenContext<'_>,
) -> Result<String, CodegenErrorKind> {
    let card = focused(ctx, "card_is_scoring")?;
    if !ctx.trigger.has_played_hand() {
        return Err(ctx.wrong_trigger("card_is_scoring"));
    }
    Ok(format!("SMODS.in_scoring({card}, context.scoring_hand)"))
}

/// Edition of the object itself.
pub fn self_edition(p: &NormalizedParams, ctx: &GenContext<'_>) -> Result<String, CodegenErrorKind> {
    Ok(CardProperty::Edition.predicate("card", p.text("edition"), ctx.mod_prefix()))
}

/// Position of the card in focus within the scoring hand.
pub fn card_index(p: &NormalizedParams, ctx: &GenContext<'_>) -> Result<String, CodegenErrorKind> {
    let card = focused(ctx, "card_index")?;
    if !ctx.trigger.has_played_hand() {
        return Err(ctx.wrong_trigger("card_index"));
    }
    let slot = match p.text("position") {
        "last" => "#context.scoring_hand".to_string(),
        "specific" => ctx.numeric(p, "index", "card_index")?,
        _ => "1".to_string(),
    };
    Ok(format!("{card} == context.scoring_hand[{slot}]"))
}

pub fn card_debuffed(
    _p: &NormalizedParams,
    ctx: &GenContext<'_>,
) -> Result<String, CodegenErrorKind> {
    let card = focused(ctx, "card_debuffed")?;
    Ok(format!("{card}.debuff"))
}

/// A Lucky card in focus paid out this scoring step.
pub fn lucky_triggered(
    _p: &NormalizedParams,
    ctx: &GenContext<'_>,
) -> Result<String, CodegenErrorKind> {
    let card = focused(ctx, "lucky_triggered")?;
    if ctx.trigger != TriggerKind::CardScored {
        return Err(ctx.wrong_trigger("lucky_triggered"));
    }
    Ok(format!("{card}.lucky_trigger"))
}
