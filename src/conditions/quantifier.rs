//! Quantified checks over a card collection.
//!
//! Compiled in two steps: a counting loop that tallies matching cards and
//! the cards examined, then a comparison of that tally against the
//! quantifier. Both steps are plain functions so each can be checked on
//! its own; [`quantified`] splices them into one self-contained expression.

use crate::core::lua::LuaWriter;
use crate::core::{CodegenErrorKind, GenContext};
use crate::params::options::{CARD_SCOPES, CARD_SCOPE_ALIASES, QUANTIFIERS, QUANTIFIER_ALIASES};
use crate::params::{NormalizedParams, ParamSpec};

/// Loop variable bound to each examined card.
pub const SCOPED_CARD: &str = "scoped_card";

/// How many cards of a collection must match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quantifier {
    All,
    None,
    Exactly,
    AtLeast,
    AtMost,
}

impl Quantifier {
    /// Parse a canonical quantifier token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "all" => Quantifier::All,
            "none" => Quantifier::None,
            "exactly" => Quantifier::Exactly,
            "at_least" => Quantifier::AtLeast,
            "at_most" => Quantifier::AtMost,
            _ => return None,
        })
    }

    /// Whether the comparison needs a target count.
    #[must_use]
    pub const fn takes_count(self) -> bool {
        matches!(
            self,
            Quantifier::Exactly | Quantifier::AtLeast | Quantifier::AtMost
        )
    }
}

/// Card collection examined by a quantified condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardScope {
    /// Cards that contribute to the score.
    Scoring,
    /// The whole played hand.
    Played,
    /// Played cards that do not score.
    Unscored,
    Held,
    Selected,
    Deck,
}

impl CardScope {
    /// Parse a canonical scope token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "scoring" => CardScope::Scoring,
            "played" => CardScope::Played,
            "unscored" => CardScope::Unscored,
            "held" => CardScope::Held,
            "selected" => CardScope::Selected,
            "deck" => CardScope::Deck,
            _ => return None,
        })
    }

    /// Scope read from the shared `scope` parameter.
    #[must_use]
    pub fn from_params(params: &NormalizedParams) -> Self {
        Self::from_token(params.text(SCOPE_ID)).unwrap_or(CardScope::Scoring)
    }

    /// Lua expression of the collection.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            CardScope::Scoring => "context.scoring_hand",
            CardScope::Played | CardScope::Unscored => "context.full_hand",
            CardScope::Held => "G.hand.cards",
            CardScope::Selected => "G.hand.highlighted",
            CardScope::Deck => "G.playing_cards",
        }
    }

    /// Extra filter a card must pass to belong to the scope.
    #[must_use]
    pub fn filter(self, card: &str) -> Option<String> {
        match self {
            CardScope::Unscored => Some(format!(
                "not SMODS.in_scoring({card}, context.scoring_hand)"
            )),
            _ => None,
        }
    }

    /// Whether the scope only exists while a hand is being played.
    #[must_use]
    pub const fn needs_played_hand(self) -> bool {
        matches!(
            self,
            CardScope::Scoring | CardScope::Played | CardScope::Unscored
        )
    }

    /// Check that the scope is available under the context's trigger.
    pub fn check(self, ctx: &GenContext<'_>, kind: &str) -> Result<(), CodegenErrorKind> {
        if self.needs_played_hand() && !ctx.trigger.has_played_hand() {
            return Err(ctx.wrong_trigger(kind));
        }
        Ok(())
    }
}

pub const SCOPE_ID: &str = "scope";
pub const QUANTIFIER_ID: &str = "quantifier";
pub const COUNT_ID: &str = "count";

pub const SCOPE: ParamSpec =
    ParamSpec::select_with(SCOPE_ID, CARD_SCOPES, CARD_SCOPE_ALIASES, "scoring");
pub const QUANTIFIER: ParamSpec =
    ParamSpec::select_with(QUANTIFIER_ID, QUANTIFIERS, QUANTIFIER_ALIASES, "at_least");
pub const COUNT: ParamSpec =
    ParamSpec::at_least(COUNT_ID, 1.0, 0.0).when(QUANTIFIER_ID, &["exactly", "at_least", "at_most"]);

/// Counting step: tally `count` (matches) and `total` (examined cards).
#[derive(Clone, Debug, PartialEq)]
pub struct CountStep {
    pub scope: CardScope,
    /// Boolean expression over [`SCOPED_CARD`].
    pub predicate: String,
}

impl CountStep {
    pub fn new(scope: CardScope, predicate: impl Into<String>) -> Self {
        Self {
            scope,
            predicate: predicate.into(),
        }
    }

    /// Lines that declare `count` and `total` and fill them in.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut w = LuaWriter::new();
        w.line("local count, total = 0, 0");
        w.open(format!(
            "for _, {SCOPED_CARD} in ipairs({} or {{}}) do",
            self.scope.collection()
        ));
        let filter = self.scope.filter(SCOPED_CARD);
        if let Some(filter) = &filter {
            w.open(format!("if {filter} then"));
        }
        w.line("total = total + 1");
        w.open(format!("if {} then", self.predicate));
        w.line("count = count + 1");
        w.close("end");
        if filter.is_some() {
            w.close("end");
        }
        w.close("end");
        w.into_lines()
    }
}

/// Comparison step over the tallies of a [`CountStep`].
///
/// `all` holds when every examined card matched, so it is vacuously true
/// for an empty collection.
#[must_use]
pub fn compare_step(quantifier: Quantifier, target: &str) -> String {
    match quantifier {
        Quantifier::All => "count == total".to_string(),
        Quantifier::None => "count == 0".to_string(),
        Quantifier::Exactly => format!("count == {target}"),
        Quantifier::AtLeast => format!("count >= {target}"),
        Quantifier::AtMost => format!("count <= {target}"),
    }
}

/// Both steps as one immediately-invoked function expression.
#[must_use]
pub fn quantified(step: &CountStep, quantifier: Quantifier, target: &str) -> String {
    compared(step, &compare_step(quantifier, target))
}

/// A counting step followed by any comparison over `count` and `total`.
#[must_use]
pub fn compared(step: &CountStep, comparison: &str) -> String {
    let mut w = LuaWriter::new();
    w.open("(function()");
    w.lines(step.lines());
    w.line(format!("return {comparison}"));
    w.close("end)()");
    w.finish()
}

/// Quantifier read from the shared `quantifier` parameter.
#[must_use]
pub fn quantifier_from_params(params: &NormalizedParams) -> Quantifier {
    Quantifier::from_token(params.text(QUANTIFIER_ID)).unwrap_or(Quantifier::AtLeast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lua::is_balanced;

    #[test]
    fn test_compare_step() {
        assert_eq!(compare_step(Quantifier::All, "3"), "count == total");
        assert_eq!(compare_step(Quantifier::None, "3"), "count == 0");
        assert_eq!(compare_step(Quantifier::Exactly, "3"), "count == 3");
        assert_eq!(compare_step(Quantifier::AtLeast, "2"), "count >= 2");
        assert_eq!(compare_step(Quantifier::AtMost, "1"), "count <= 1");
    }

    #[test]
    fn test_count_step_lines() {
        let step = CountStep::new(CardScope::Scoring, "scoped_card:is_face()");
        let lines = step.lines();
        assert_eq!(lines[0], "local count, total = 0, 0");
        assert_eq!(
            lines[1],
            "for _, scoped_card in ipairs(context.scoring_hand or {}) do"
        );
        assert!(lines.iter().any(|l| l.trim() == "if scoped_card:is_face() then"));
        assert!(is_balanced(&lines));
    }

    #[test]
    fn test_unscored_filter() {
        let step = CountStep::new(CardScope::Unscored, "true");
        let lines = step.lines();
        assert!(lines
            .iter()
            .any(|l| l.contains("not SMODS.in_scoring(scoped_card, context.scoring_hand)")));
        assert!(is_balanced(&lines));
    }

    #[test]
    fn test_quantified_is_self_contained() {
        let step = CountStep::new(CardScope::Held, "scoped_card:is_suit(\"Hearts\")");
        let expr = quantified(&step, Quantifier::All, "0");
        assert!(expr.starts_with("(function()"));
        assert!(expr.ends_with("end)()"));
        assert!(expr.contains("return count == total"));
        let lines: Vec<&str> = expr.lines().collect();
        assert!(is_balanced(&lines));
    }

    #[test]
    fn test_scope_tokens() {
        for token in CARD_SCOPES {
            assert!(CardScope::from_token(token).is_some(), "{token}");
        }
        for token in QUANTIFIERS {
            assert!(Quantifier::from_token(token).is_some(), "{token}");
        }
    }
}
