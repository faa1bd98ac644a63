//! Rule assembler and object compiler integration tests.
//!
//! These tests verify rule ordering, the two rule policies, output
//! determinism and how errors are scoped to the failing object.

use joker_forge::conditions::{ConditionGroup, ConditionInstance};
use joker_forge::core::lua::is_balanced;
use joker_forge::core::{
    CodegenErrorKind, ExportError, ForgeConfig, ObjectType, RulePolicy, ValidationError,
};
use joker_forge::effects::EffectInstance;
use joker_forge::params::ParamValue;
use joker_forge::rules::{compile_object, export, GameObjectData, ObjectSet, Rule};
use joker_forge::triggers::TriggerKind;

fn config() -> ForgeConfig {
    ForgeConfig::new("mymod")
}

fn money_at_least(amount: i32) -> ConditionGroup {
    ConditionGroup::all([ConditionInstance::new("money")
        .with_param("operator", "greater_equals")
        .with_param("value", amount)])
}

fn chips(value: i32) -> EffectInstance {
    EffectInstance::new("add_chips").with_param("value", value)
}

/// Joker with two conditional rules and one unconditional rule on the same trigger.
fn layered_joker() -> GameObjectData {
    GameObjectData::new("layered", 0)
        .with_rule(
            Rule::new("hand_played")
                .with_id("rich")
                .with_conditions(money_at_least(20))
                .with_effect(chips(50))
                .with_effect(EffectInstance::new("create_joker")),
        )
        .with_rule(
            Rule::new("hand_played")
                .with_id("comfortable")
                .with_conditions(money_at_least(10))
                .with_effect(chips(20)),
        )
        .with_rule(Rule::new("hand_played").with_id("always").with_effect(chips(1)))
}

// =============================================================================
// Ordering and policies
// =============================================================================

#[test]
fn test_accumulate_runs_rules_in_order() {
    let source = compile_object(&config(), ObjectType::Joker, &layered_joker()).unwrap();
    let function = source.function(TriggerKind::HandPlayed).unwrap();
    let text = function.text();

    let rich = text.find("chips = 50").unwrap();
    let comfortable = text.find("chips = 20").unwrap();
    let always = text.find("chips = 1 }").unwrap();
    assert!(rich < comfortable && comfortable < always);

    // Each rule is its own block.
    assert_eq!(text.matches("\nif ").count(), 3);
    assert!(!text.contains("elseif"));
    assert!(text.contains("\ndo\n"));
    assert!(is_balanced(&function.body));
}

#[test]
fn test_preludes_run_before_contributions() {
    let source = compile_object(&config(), ObjectType::Joker, &layered_joker()).unwrap();
    let text = source.function(TriggerKind::HandPlayed).unwrap().text();

    let prelude = text.find("SMODS.add_card").unwrap();
    let chips = text.find("effects[#effects + 1] = { chips = 50 }").unwrap();
    let created = text
        .find("effects[#effects + 1] = { message = created_joker_2 and localize(\"k_plus_joker\") or nil, colour = G.C.BLUE }")
        .unwrap();
    // Second effect of its rule, so its locals carry the `_2` suffix.
    assert!(text.contains("local created_joker_2 = false"));
    assert!(prelude < chips);
    assert!(chips < created);
}

#[test]
fn test_first_match_builds_one_chain() {
    let config = config().with_rule_policy(RulePolicy::FirstMatch);
    let source = compile_object(&config, ObjectType::Joker, &layered_joker()).unwrap();
    let function = source.function(TriggerKind::HandPlayed).unwrap();
    let text = function.text();

    assert_eq!(text.matches("elseif ").count(), 2);
    assert!(text.contains("elseif true then"));
    assert!(!text.contains("\ndo\n"));
    assert!(is_balanced(&function.body));
}

#[test]
fn test_rules_split_by_trigger() {
    let object = GameObjectData::new("split", 0)
        .with_rule(Rule::new("round_end").with_effect(EffectInstance::new("add_dollars")))
        .with_rule(Rule::new("hand_played").with_effect(chips(3)))
        .with_rule(Rule::new("round_end").with_effect(chips(4)));
    let source = compile_object(&config(), ObjectType::Joker, &object).unwrap();

    assert_eq!(source.functions.len(), 2);
    let round_end = source.function(TriggerKind::RoundEnd).unwrap().text();
    assert!(round_end.contains("dollars = 1"));
    assert!(round_end.contains("chips = 4"));
    assert!(!round_end.contains("chips = 3"));

    let rendered = source.render();
    assert!(rendered.contains("results[#results + 1] = self:calc_round_end(card, context)"));
    assert!(rendered.contains("results[#results + 1] = self:calc_hand_played(card, context)"));
    assert!(rendered.contains("return SMODS.merge_effects(results)"));
}

#[test]
fn test_rule_without_effects_is_skipped() {
    let object = GameObjectData::new("quiet", 0)
        .with_rule(Rule::new("hand_played").with_conditions(money_at_least(5)));
    let source = compile_object(&config(), ObjectType::Joker, &object).unwrap();
    let text = source.function(TriggerKind::HandPlayed).unwrap().text();
    assert_eq!(
        text,
        "local effects = {}\nif #effects > 0 then\n    return SMODS.merge_effects(effects)\nend"
    );
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_compilation_is_idempotent() {
    let object = layered_joker().with_variable("stacks", 3.0).with_rule(
        Rule::new("card_scored").with_effect(
            EffectInstance::new("add_mult").with_param("value", ParamValue::variable("stacks")),
        ),
    );
    let first = compile_object(&config(), ObjectType::Joker, &object).unwrap();
    let second = compile_object(&config(), ObjectType::Joker, &object).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.render(), second.render());
}

#[test]
fn test_random_effects_seed_by_object_key() {
    let object = GameObjectData::new("gambler", 0).with_rule(
        Rule::new("hand_played").with_effect(
            EffectInstance::new("level_up_hand").with_param("hand_type", "random"),
        ),
    );
    let text = compile_object(&config(), ObjectType::Joker, &object)
        .unwrap()
        .render();
    assert!(text.contains("\"j_mymod_gambler_level_up\""));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_error_names_rule() {
    let object = GameObjectData::new("broken", 0)
        .with_rule(Rule::new("hand_played").with_id("ok").with_effect(chips(1)))
        .with_rule(
            Rule::new("hand_played")
                .with_id("bad")
                .with_conditions(ConditionGroup::all([ConditionInstance::new("full_moon")])),
        );
    let err = compile_object(&config(), ObjectType::Joker, &object).unwrap_err();
    assert_eq!(err.object, "j_mymod_broken");
    assert_eq!(err.rule, 1);
    assert_eq!(err.rule_id, "bad");
    assert_eq!(err.kind, CodegenErrorKind::UnknownCondition("full_moon".to_string()));
}

#[test]
fn test_undeclared_variable_is_error() {
    let object = GameObjectData::new("forgetful", 0).with_rule(
        Rule::new("hand_played").with_effect(
            EffectInstance::new("add_mult").with_param("value", ParamValue::variable("ghost")),
        ),
    );
    let err = compile_object(&config(), ObjectType::Joker, &object).unwrap_err();
    assert!(matches!(err.kind, CodegenErrorKind::UnknownVariable { .. }));
}

#[test]
fn test_export_collects_every_failing_object() {
    let sets = [ObjectSet::new(
        ObjectType::Joker,
        vec![
            GameObjectData::new("one", 0)
                .with_rule(Rule::new("hand_played").with_effect(EffectInstance::new("nope"))),
            layered_joker(),
            GameObjectData::new("two", 1).with_rule(Rule::new("sometime")),
        ],
    )];
    let Err(ExportError::Codegen(errors)) = export(&config(), &sets) else {
        panic!("expected codegen errors");
    };
    let objects: Vec<&str> = errors.iter().map(|e| e.object.as_str()).collect();
    assert_eq!(objects, vec!["j_mymod_one", "j_mymod_two"]);
}

#[test]
fn test_export_rejects_path_like_key() {
    let sets = [ObjectSet::new(
        ObjectType::Joker,
        vec![GameObjectData::new("../Lucky Cat", 0)
            .with_rule(Rule::new("hand_played").with_effect(chips(1)))],
    )];
    let Err(ExportError::Validation(ValidationError::InvalidObjectKey { key, .. })) =
        export(&config(), &sets)
    else {
        panic!("expected an invalid key");
    };
    assert_eq!(key, "../Lucky Cat");
}

#[test]
fn test_export_reports_fallbacks() {
    let sets = [ObjectSet::new(
        ObjectType::Joker,
        vec![GameObjectData::new("odd", 0).with_rule(
            Rule::new("hand_played")
                .with_effect(EffectInstance::new("create_joker").with_param("ignore_slots", "sometimes")),
        )],
    )];
    let bundle = export(&config(), &sets).unwrap();
    let fallbacks: Vec<_> = bundle.fallbacks().collect();
    assert_eq!(fallbacks.len(), 1);
    assert_eq!(fallbacks[0].0, "j_mymod_odd");
    assert_eq!(fallbacks[0].1.fallback.param, "ignore_slots");
}

// =============================================================================
// Authored JSON
// =============================================================================

#[test]
fn test_export_from_json() {
    let json = r#"{
        "object_type": "seal",
        "objects": [{
            "id": "s1",
            "object_key": "wax",
            "rules": [{
                "trigger": "card_scored",
                "conditions": {"children": [{"kind": "card_suit", "params": {"suit": "Hearts"}}]},
                "effects": [{"kind": "add_dollars", "params": {"value": 2}}]
            }]
        }]
    }"#;
    let set: ObjectSet = serde_json::from_str(json).unwrap();
    let bundle = export(&config(), &[set]).unwrap();
    let seals = bundle.set(ObjectType::Seal).unwrap();
    let source = seals.source("mymod_wax").unwrap();
    let text = source.render();
    assert!(text.contains("calc_card_scored = function(self, card, context)"));
    assert!(text.contains("dollars = 2"));
    assert!(seals.loader.contains("\"seals\""));
}
