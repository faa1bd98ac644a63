//! Effect and condition generator integration tests.
//!
//! These tests drive generators through the public `compile_effect` /
//! `compile_tree` entry points, with parameters as the editor stores them.

use joker_forge::conditions::{compile_tree, ConditionGroup, ConditionInstance};
use joker_forge::core::lua::{block_delta, is_balanced};
use joker_forge::core::{CodegenErrorKind, CodegenFallback, ForgeConfig, GenContext, ObjectType};
use joker_forge::effects::{compile_effect, CodeFragment, EffectInstance, EffectKind};
use joker_forge::params::{FallbackReason, ParamValue};
use joker_forge::triggers::TriggerKind;
use proptest::prelude::*;

const SLOT_GUARD: &str =
    "if #G.jokers.cards + G.GAME.joker_buffer < G.jokers.config.card_limit then";

type Compiled = (Result<CodeFragment, CodegenErrorKind>, Vec<CodegenFallback>);

fn compile(effect: &EffectInstance, trigger: TriggerKind) -> Compiled {
    let config = ForgeConfig::new("mymod");
    let ctx = GenContext::new(&config, ObjectType::Joker, "j_mymod_maker", trigger, &[]);
    let mut fallbacks = Vec::new();
    let result = compile_effect(effect, &ctx, &mut fallbacks);
    (result, fallbacks)
}

fn create_joker(edition: &str) -> EffectInstance {
    EffectInstance::new("create_joker")
        .with_param("joker_type", "random")
        .with_param("rarity", "common")
        .with_param("pool", "")
        .with_param("edition", edition)
        .with_param("sticker", "none")
        .with_param("ignore_slots", "respect")
}

// =============================================================================
// Object creation
// =============================================================================

#[test]
fn test_create_joker_respects_slots() {
    let (result, fallbacks) = compile(&create_joker("none"), TriggerKind::HandPlayed);
    let fragment = result.unwrap();
    let text = fragment.prelude.join("\n");

    assert!(text.contains(SLOT_GUARD), "missing slot guard:\n{text}");
    assert!(text.contains("SMODS.add_card({ set = \"Joker\", rarity = \"Common\" })"));
    assert!(!text.contains("set_edition"));
    assert!(!text.contains("add_sticker"));
    assert!(text.contains("card:juice_up(0.3, 0.5)"));
    assert!(text.ends_with("delay(0.6)"));
    assert!(is_balanced(&fragment.prelude));
    assert!(fallbacks.is_empty());
}

#[test]
fn test_create_negative_joker_skips_slot_guard() {
    let (result, _) = compile(&create_joker("e_negative"), TriggerKind::HandPlayed);
    let fragment = result.unwrap();
    let text = fragment.prelude.join("\n");

    assert!(!text.contains("card_limit"));
    assert!(!text.contains("joker_buffer"));
    assert!(text.contains("joker_card:set_edition(\"e_negative\", true)"));
    assert!(text.ends_with("delay(0.6)"));
    assert!(is_balanced(&fragment.prelude));
}

#[test]
fn test_ignored_slots_skip_guard() {
    let effect = create_joker("none").with_param("ignore_slots", "ignore");
    let (result, _) = compile(&effect, TriggerKind::HandPlayed);
    let text = result.unwrap().prelude.join("\n");
    assert!(!text.contains("card_limit"));
}

#[test]
fn test_custom_rarity_is_namespaced() {
    let effect = create_joker("none").with_param("rarity", "mythic");
    let (result, fallbacks) = compile(&effect, TriggerKind::HandPlayed);
    let text = result.unwrap().prelude.join("\n");
    assert!(text.contains("rarity = \"mymod_mythic\""));
    assert!(fallbacks.is_empty());
}

#[test]
fn test_two_creations_use_distinct_locals() {
    let config = ForgeConfig::new("mymod");
    let base = GenContext::new(&config, ObjectType::Joker, "j_mymod_x", TriggerKind::HandPlayed, &[]);
    let mut fallbacks = Vec::new();
    let first = compile_effect(&create_joker("none"), &base.at_effect(0), &mut fallbacks).unwrap();
    let second = compile_effect(&create_joker("none"), &base.at_effect(1), &mut fallbacks).unwrap();
    assert!(first.prelude[0].contains("local created_joker = false"));
    assert!(second.prelude[0].contains("local created_joker_2 = false"));
}

// =============================================================================
// Parameter fallbacks
// =============================================================================

#[test]
fn test_unknown_select_value_falls_back() {
    let effect = EffectInstance::new("set_card_suit").with_param("suit", "Stars");
    let (result, fallbacks) = compile(&effect, TriggerKind::CardScored);
    let text = result.unwrap().prelude.join("\n");
    assert!(text.contains("\"Spades\""));
    assert_eq!(fallbacks.len(), 1);
    assert_eq!(fallbacks[0].kind, "set_card_suit");
    assert_eq!(fallbacks[0].fallback.reason, FallbackReason::UnknownOption);
}

#[test]
fn test_card_effect_without_focus_is_error() {
    let effect = EffectInstance::new("set_card_suit").with_param("suit", "Hearts");
    let (result, _) = compile(&effect, TriggerKind::ShopEntered);
    assert_eq!(
        result,
        Err(CodegenErrorKind::NoCardInFocus {
            kind: "set_card_suit".to_string(),
            trigger: "shop_entered".to_string(),
        })
    );
}

#[test]
fn test_value_effects_have_no_prelude() {
    for (kind, field) in [
        ("add_chips", "chips = 7"),
        ("add_mult", "mult = 7"),
        ("apply_x_mult", "x_mult = 7"),
        ("add_dollars", "dollars = 7"),
    ] {
        let effect = EffectInstance::new(kind).with_param("value", ParamValue::Number(7.0));
        let (result, _) = compile(&effect, TriggerKind::HandPlayed);
        let fragment = result.unwrap();
        assert!(fragment.prelude.is_empty(), "{kind}");
        assert_eq!(fragment.expression, field);
    }
}

// =============================================================================
// Conditions
// =============================================================================

#[test]
fn test_nested_condition_tree() {
    let config = ForgeConfig::new("mymod");
    let ctx = GenContext::new(&config, ObjectType::Joker, "j_mymod_x", TriggerKind::HandPlayed, &[]);
    let tree = ConditionGroup::all([
        ConditionGroup::any([
            ConditionInstance::new("first_hand"),
            ConditionInstance::new("first_discard"),
        ]),
        ConditionGroup::all([ConditionInstance::new("first_hand").negated()]),
    ]);
    let mut fallbacks = Vec::new();
    let expr = compile_tree(&tree, &ctx, &mut fallbacks).unwrap();
    assert!(expr.contains(" or "));
    assert!(expr.contains(" and "));
    assert!(expr.contains("not (G.GAME.current_round.hands_played == 0)"));
}

#[test]
fn test_unknown_condition() {
    let config = ForgeConfig::new("mymod");
    let ctx = GenContext::new(&config, ObjectType::Joker, "j_mymod_x", TriggerKind::HandPlayed, &[]);
    let tree = ConditionGroup::all([ConditionInstance::new("full_moon")]);
    let mut fallbacks = Vec::new();
    assert_eq!(
        compile_tree(&tree, &ctx, &mut fallbacks),
        Err(CodegenErrorKind::UnknownCondition("full_moon".to_string()))
    );
}

// =============================================================================
// Bracket balance
// =============================================================================

fn text_value() -> impl Strategy<Value = ParamValue> {
    prop_oneof![
        Just(ParamValue::from("none")),
        Just(ParamValue::from("random")),
        Just(ParamValue::from("e_negative")),
        Just(ParamValue::from("ignore")),
        Just(ParamValue::from("specific")),
        "[a-z_]{0,12}".prop_map(ParamValue::from),
        (-5.0f64..20.0).prop_map(ParamValue::Number),
    ]
}

proptest! {
    #[test]
    fn create_joker_guard_is_whole_or_absent(
        joker_type in prop::sample::select(vec!["random", "specific", "bogus"]),
        rarity in prop::sample::select(vec!["random", "common", "legendary", "mythic"]),
        edition in prop::sample::select(vec!["none", "random", "e_foil", "e_negative", "negative", "x"]),
        sticker in prop::sample::select(vec!["none", "eternal", "rental"]),
        ignore_slots in prop::sample::select(vec!["respect", "ignore", "maybe"]),
    ) {
        let effect = EffectInstance::new("create_joker")
            .with_param("joker_type", joker_type)
            .with_param("rarity", rarity)
            .with_param("joker_key", "hammer")
            .with_param("edition", edition)
            .with_param("sticker", sticker)
            .with_param("ignore_slots", ignore_slots);
        let (result, _) = compile(&effect, TriggerKind::HandPlayed);
        let fragment = result.unwrap();

        prop_assert!(is_balanced(&fragment.prelude));
        let opened = fragment.prelude.iter().any(|line| line.trim() == SLOT_GUARD);
        let negative = edition == "e_negative" || edition == "negative";
        prop_assert_eq!(opened, !negative && ignore_slots != "ignore");
    }

    #[test]
    fn every_effect_prelude_is_balanced(
        kind in prop::sample::select(EffectKind::ALL),
        trigger in prop::sample::select(TriggerKind::ALL),
        values in prop::collection::vec(text_value(), 8),
    ) {
        let mut effect = EffectInstance::new(kind.id());
        for (spec, value) in kind.schema().iter().zip(values) {
            effect = effect.with_param(spec.id, value);
        }
        let (result, _) = compile(&effect, trigger);
        if let Ok(fragment) = result {
            prop_assert!(is_balanced(&fragment.prelude), "{}: {:?}", kind.id(), fragment.prelude);
            let depth: i32 = fragment.prelude.iter().map(|line| block_delta(line)).sum();
            prop_assert_eq!(depth, 0);
        }
    }
}
