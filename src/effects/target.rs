//! Which card or joker an effect acts on.

use crate::core::lua::{lua_string, LuaWriter};
use crate::core::{CodegenErrorKind, GenContext, ObjectType};
use crate::keys::resolve_key;
use crate::params::NormalizedParams;
use crate::triggers::{highlighted_cards, CardFocus};

/// Run `body` once per card the trigger puts in focus.
///
/// `body` receives the Lua name bound to the card. A single focused card
/// is bound to a local; consumables loop over the highlighted cards.
pub fn for_each_target(
    w: &mut LuaWriter,
    ctx: &GenContext<'_>,
    kind: &str,
    body: impl FnOnce(&mut LuaWriter, &str),
) -> Result<(), CodegenErrorKind> {
    let name = ctx.local_name("target_card");
    match ctx.focus() {
        CardFocus::Single(expr) => {
            w.line(format!("local {name} = {expr}"));
            body(w, &name);
        }
        CardFocus::Highlighted => {
            w.open(format!("for _, {name} in ipairs({}) do", highlighted_cards()));
            body(w, &name);
            w.close("end");
        }
        CardFocus::None => return Err(ctx.no_focus(kind)),
    }
    Ok(())
}

/// Bind `name` to the joker chosen by the `selection` parameter.
///
/// The local may be `nil` (empty joker area, no neighbour, key not owned);
/// callers guard on it.
pub fn select_joker(
    w: &mut LuaWriter,
    p: &NormalizedParams,
    ctx: &GenContext<'_>,
    kind: &str,
    name: &str,
) -> Result<(), CodegenErrorKind> {
    match p.text("selection") {
        "leftmost" => w.line(format!("local {name} = G.jokers.cards[1]")),
        "rightmost" => w.line(format!("local {name} = G.jokers.cards[#G.jokers.cards]")),
        side @ ("left" | "right") => {
            if ctx.object_type != ObjectType::Joker {
                return Err(ctx.wrong_trigger(kind));
            }
            let offset = if side == "left" { "- 1" } else { "+ 1" };
            let own = ctx.local_name("own_position");
            w.line(format!("local {own} = nil"));
            w.open("for i = 1, #G.jokers.cards do");
            w.open("if G.jokers.cards[i] == card then");
            w.line(format!("{own} = i"));
            w.close("end");
            w.close("end");
            w.line(format!("local {name} = {own} and G.jokers.cards[{own} {offset}]"))
        }
        "specific" => {
            let key = resolve_key(p.text("joker_key"), ctx.mod_prefix(), "j");
            w.line(format!("local {name} = SMODS.find_card({})[1]", lua_string(&key)))
        }
        _ => {
            let pool = ctx.local_name("joker_choices");
            w.line(format!("local {pool} = {{}}"));
            w.open("for _, joker in ipairs(G.jokers.cards) do");
            w.open("if joker ~= card then");
            w.line(format!("{pool}[#{pool} + 1] = joker"));
            w.close("end");
            w.close("end");
            w.line(format!(
                "local {name} = #{pool} > 0 and pseudorandom_element({pool}, pseudoseed({})) or nil",
                ctx.seed(kind)
            ))
        }
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lua::is_balanced;
    use crate::core::ForgeConfig;
    use crate::params::{normalize, param_map, ParamSpec};
    use crate::triggers::TriggerKind;

    static SELECTION: &[ParamSpec] = &[
        ParamSpec::select(
            "selection",
            crate::params::options::JOKER_SELECTION,
            "random",
        ),
        ParamSpec::text("joker_key", ""),
    ];

    #[test]
    fn test_single_target() {
        let config = ForgeConfig::new("mymod");
        let ctx = GenContext::new(&config, ObjectType::Joker, "j_mymod_x", TriggerKind::CardScored, &[]);
        let mut w = LuaWriter::new();
        for_each_target(&mut w, &ctx, "set_card_seal", |w, card| {
            w.line(format!("{card}:set_seal(\"Red\", true)"));
        })
        .unwrap();
        assert_eq!(
            w.into_lines(),
            vec![
                "local target_card = context.other_card",
                "target_card:set_seal(\"Red\", true)"
            ]
        );
    }

    #[test]
    fn test_highlighted_targets() {
        let config = ForgeConfig::new("mymod");
        let ctx = GenContext::new(
            &config,
            ObjectType::Consumable,
            "c_mymod_x",
            TriggerKind::ConsumableUsed,
            &[],
        );
        let mut w = LuaWriter::new();
        for_each_target(&mut w, &ctx, "destroy_card", |w, card| {
            w.line(format!("{card}:start_dissolve()"));
        })
        .unwrap();
        let lines = w.into_lines();
        assert_eq!(lines[0], "for _, target_card in ipairs(G.hand.highlighted) do");
        assert!(is_balanced(&lines));
    }

    #[test]
    fn test_no_focus() {
        let config = ForgeConfig::new("mymod");
        let ctx = GenContext::new(&config, ObjectType::Joker, "j_mymod_x", TriggerKind::RoundEnd, &[]);
        let mut w = LuaWriter::new();
        let result = for_each_target(&mut w, &ctx, "destroy_card", |_, _| {});
        assert!(matches!(result, Err(CodegenErrorKind::NoCardInFocus { .. })));
    }

    #[test]
    fn test_select_joker() {
        let config = ForgeConfig::new("mymod");
        let ctx = GenContext::new(&config, ObjectType::Joker, "j_mymod_x", TriggerKind::RoundEnd, &[]);

        let (p, _) = normalize(SELECTION, &param_map([("selection", "random")]));
        let mut w = LuaWriter::new();
        select_joker(&mut w, &p, &ctx, "copy_joker", "copy_source").unwrap();
        let lines = w.into_lines();
        assert!(is_balanced(&lines));
        assert!(lines.last().unwrap().contains("pseudoseed(\"j_mymod_x_copy_joker\")"));

        let (p, _) = normalize(
            SELECTION,
            &param_map([("selection", "specific"), ("joker_key", "blueprint")]),
        );
        let mut w = LuaWriter::new();
        select_joker(&mut w, &p, &ctx, "copy_joker", "copy_source").unwrap();
        assert_eq!(
            w.into_lines(),
            vec!["local copy_source = SMODS.find_card(\"j_mymod_blueprint\")[1]"]
        );
    }
}
