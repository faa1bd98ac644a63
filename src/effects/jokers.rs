//! Effects on jokers the player already owns.
//!
//! All of them pick their joker through the shared `selection` parameter
//! and guard on the pick, which may be `nil`.

use crate::core::lua::{lua_string, LuaWriter};
use crate::core::{GenContext, ObjectType};
use crate::keys::tokens::sticker_key;
use crate::params::options::{
    EDITION_ALIASES, EDITION_OPTIONS_RANDOM, JOKER_SELECTION, STICKER_OPTIONS,
};
use crate::params::{NormalizedParams, ParamSpec};
use crate::triggers::TriggerHook;

use super::creation::edition_setter;
use super::fragment::CodeFragment;
use super::target::select_joker;
use super::Generated;

const SELECTION: ParamSpec = ParamSpec::select("selection", JOKER_SELECTION, "random");
const JOKER_KEY: ParamSpec = ParamSpec::text("joker_key", "").when("selection", &["specific"]);

pub(super) static COPY_ABILITY: &[ParamSpec] = &[
    ParamSpec::select("selection", JOKER_SELECTION, "right"),
    JOKER_KEY,
];

pub(super) static JOKER_STICKER: &[ParamSpec] = &[
    SELECTION,
    JOKER_KEY,
    ParamSpec::open_select("sticker", STICKER_OPTIONS, &[], "eternal"),
    ParamSpec::select("mode", &["add", "remove"], "add"),
];

pub(super) static JOKER_EDITION: &[ParamSpec] = &[
    SELECTION,
    JOKER_KEY,
    ParamSpec::open_select("edition", EDITION_OPTIONS_RANDOM, EDITION_ALIASES, "e_foil"),
];

/// Run another joker's ability as if it were this one (Blueprint).
///
/// Only jokers have an ability to lend their context to, and only the
/// `calculate` path returns what the copied joker produced.
pub fn copy_joker_ability(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let calculated = matches!(
        ctx.trigger.hook(ctx.object_type),
        Some(TriggerHook::Calculate { .. })
    );
    if ctx.object_type != ObjectType::Joker || !calculated {
        return Err(ctx.wrong_trigger("copy_joker_ability"));
    }
    let source = ctx.local_name("ability_source");
    let copied = ctx.local_name("copied_ability");
    let mut w = LuaWriter::new();
    select_joker(&mut w, p, ctx, "copy_joker_ability", &source)?;
    w.line(format!(
        "local {copied} = {source} and {source} ~= card and SMODS.blueprint_effect(card, {source}, context) or nil"
    ));
    Ok(CodeFragment::statements(w.into_lines()).with_expression(format!("extra = {copied}")))
}

pub fn add_joker_sticker(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let joker = ctx.local_name("sticker_joker");
    let sticker = match p.text("sticker") {
        "none" | "" => return Ok(CodeFragment::default()),
        other => lua_string(&sticker_key(other, ctx.mod_prefix())),
    };
    let mut w = LuaWriter::new();
    select_joker(&mut w, p, ctx, "add_joker_sticker", &joker)?;
    w.open(format!("if {joker} then"));
    if p.is("mode", "remove") {
        w.line(format!("{joker}:remove_sticker({sticker})"));
    } else {
        w.line(format!("{joker}:add_sticker({sticker}, true)"));
    }
    w.line(format!("{joker}:juice_up()"));
    w.close("end");
    Ok(CodeFragment::statements(w.into_lines()))
}

/// Give a joker an edition; `none` strips the current one.
pub fn set_joker_edition(p: &NormalizedParams, ctx: &GenContext<'_>) -> Generated {
    let joker = ctx.local_name("edition_joker");
    let setter = edition_setter(&joker, p.text("edition"), ctx, "set_joker_edition")
        .unwrap_or_else(|| format!("{joker}:set_edition(nil, true)"));
    let mut w = LuaWriter::new();
    select_joker(&mut w, p, ctx, "set_joker_edition", &joker)?;
    w.open(format!("if {joker} then"));
    w.line(setter);
    w.close("end");
    Ok(CodeFragment::statements(w.into_lines()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lua::is_balanced;
    use crate::core::{CodegenErrorKind, ForgeConfig};
    use crate::params::{normalize, param_map, ParamValue};
    use crate::triggers::TriggerKind;

    fn generate(
        generator: fn(&NormalizedParams, &GenContext<'_>) -> Generated,
        schema: &'static [ParamSpec],
        pairs: &[(&str, &str)],
        object_type: ObjectType,
        trigger: TriggerKind,
    ) -> Generated {
        let config = ForgeConfig::new("mymod");
        let ctx = GenContext::new(&config, object_type, "j_mymod_x", trigger, &[]);
        let raw = param_map(pairs.iter().map(|(k, v)| (*k, ParamValue::from(*v))));
        let (params, _) = normalize(schema, &raw);
        generator(&params, &ctx)
    }

    #[test]
    fn test_copy_ability_of_right_neighbour() {
        let fragment = generate(
            copy_joker_ability,
            COPY_ABILITY,
            &[],
            ObjectType::Joker,
            TriggerKind::HandPlayed,
        )
        .unwrap();
        let text = fragment.prelude.join("\n");
        assert!(text.contains("local ability_source = own_position and G.jokers.cards[own_position + 1]"));
        assert!(text.ends_with(
            "local copied_ability = ability_source and ability_source ~= card and SMODS.blueprint_effect(card, ability_source, context) or nil"
        ));
        assert_eq!(fragment.expression, "extra = copied_ability");
        assert!(is_balanced(&fragment.prelude));
    }

    #[test]
    fn test_copy_ability_needs_calculate() {
        for (object_type, trigger) in [
            (ObjectType::Joker, TriggerKind::AddedToDeck),
            (ObjectType::Consumable, TriggerKind::ConsumableUsed),
        ] {
            let result = generate(copy_joker_ability, COPY_ABILITY, &[], object_type, trigger);
            assert!(matches!(result, Err(CodegenErrorKind::WrongTrigger { .. })));
        }
    }

    #[test]
    fn test_joker_sticker_modes() {
        let fragment = generate(
            add_joker_sticker,
            JOKER_STICKER,
            &[("selection", "leftmost"), ("sticker", "rental")],
            ObjectType::Joker,
            TriggerKind::RoundEnd,
        )
        .unwrap();
        assert_eq!(
            fragment.prelude,
            vec![
                "local sticker_joker = G.jokers.cards[1]",
                "if sticker_joker then",
                "    sticker_joker:add_sticker(\"rental\", true)",
                "    sticker_joker:juice_up()",
                "end",
            ]
        );

        let fragment = generate(
            add_joker_sticker,
            JOKER_STICKER,
            &[("selection", "leftmost"), ("mode", "remove")],
            ObjectType::Joker,
            TriggerKind::RoundEnd,
        )
        .unwrap();
        assert!(fragment.prelude.join("\n").contains("sticker_joker:remove_sticker(\"eternal\")"));
    }

    #[test]
    fn test_joker_edition() {
        let fragment = generate(
            set_joker_edition,
            JOKER_EDITION,
            &[("selection", "rightmost"), ("edition", "polychrome")],
            ObjectType::Joker,
            TriggerKind::RoundEnd,
        )
        .unwrap();
        assert!(fragment
            .prelude
            .contains(&"    edition_joker:set_edition(\"e_polychrome\", true)".to_string()));

        let fragment = generate(
            set_joker_edition,
            JOKER_EDITION,
            &[("selection", "rightmost"), ("edition", "none")],
            ObjectType::Joker,
            TriggerKind::RoundEnd,
        )
        .unwrap();
        assert!(fragment
            .prelude
            .contains(&"    edition_joker:set_edition(nil, true)".to_string()));
    }
}
