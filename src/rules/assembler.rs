//! Rule Assembler.
//!
//! Builds the body of one generated function from every rule of an object
//! that uses the same trigger. Rules run in authored order. Under
//! [`RulePolicy::Accumulate`] each rule sits in its own `if` block and every
//! rule whose conditions hold contributes; under [`RulePolicy::FirstMatch`]
//! the rules form one `if`/`elseif` chain.
//!
//! Inside a rule block all effect preludes run first, in authored order,
//! then each contributing effect appends its table to `effects`. The
//! function finishes with `SMODS.merge_effects(effects)`. Host functions
//! (`use`, `redeem`...) return nothing, so contributions are applied in
//! place with `SMODS.calculate_effect`.

use crate::conditions::compile_tree;
use crate::core::lua::LuaWriter;
use crate::core::{CodegenError, CodegenErrorKind, CodegenFallback, GenContext, RulePolicy};
use crate::effects::{compile_effect, CodeFragment};
use crate::triggers::{TriggerHook, TriggerKind};

use super::model::Rule;

/// Generated body of one trigger function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriggerFunction {
    pub trigger: TriggerKind,
    pub hook: TriggerHook,
    /// Body lines at depth zero, without the `function ... end` wrapper.
    pub body: Vec<String>,
}

impl TriggerFunction {
    /// Field name of the function in the object table.
    #[must_use]
    pub fn name(&self) -> String {
        match self.hook {
            TriggerHook::Calculate { .. } => format!("calc_{}", self.trigger.id()),
            TriggerHook::Host(host) => host.name().to_string(),
        }
    }

    /// The body as text.
    #[must_use]
    pub fn text(&self) -> String {
        self.body.join("\n")
    }
}

/// One rule, compiled but not yet placed.
struct CompiledRule<'r> {
    rule: &'r Rule,
    /// `None` when the rule has no conditions.
    condition: Option<String>,
    fragments: Vec<CodeFragment>,
}

/// Assemble every rule of one object that uses `trigger`.
///
/// `base` must describe the object; its trigger field is replaced. Rule
/// positions in errors and fallbacks are indices into the full `rules`
/// slice. Returns `Ok(None)` when no rule uses the trigger.
pub fn assemble(
    rules: &[Rule],
    trigger: TriggerKind,
    base: GenContext<'_>,
    fallbacks: &mut Vec<CodegenFallback>,
) -> Result<Option<TriggerFunction>, CodegenError> {
    let ctx = GenContext { trigger, ..base };
    let matching: Vec<(usize, &Rule)> = rules
        .iter()
        .enumerate()
        .filter(|(_, rule)| rule.trigger == trigger.id())
        .collect();
    let Some(&(first_index, first_rule)) = matching.first() else {
        return Ok(None);
    };

    let hook = trigger.hook(ctx.object_type).ok_or_else(|| {
        locate(
            &ctx,
            first_index,
            first_rule,
            CodegenErrorKind::UnsupportedTrigger {
                trigger: trigger.id().to_string(),
                object_type: ctx.object_type,
            },
        )
    })?;

    let mut compiled = Vec::with_capacity(matching.len());
    for (index, rule) in matching {
        let rule_ctx = ctx.at_rule(index);
        let rule = compile_rule(rule, &rule_ctx, fallbacks)
            .map_err(|kind| locate(&rule_ctx, index, rule, kind))?;
        compiled.push(rule);
    }

    let body = write_body(&compiled, hook, ctx.config.rule_policy, ctx.config.annotate_rules);
    tracing::debug!(
        object = ctx.object_key,
        trigger = trigger.id(),
        rules = compiled.len(),
        lines = body.len(),
        "assembled trigger function"
    );
    Ok(Some(TriggerFunction {
        trigger,
        hook,
        body,
    }))
}

fn locate(ctx: &GenContext<'_>, index: usize, rule: &Rule, kind: CodegenErrorKind) -> CodegenError {
    CodegenError::new(ctx.object_key, index, rule.id.as_str(), kind)
}

fn compile_rule<'r>(
    rule: &'r Rule,
    ctx: &GenContext<'_>,
    fallbacks: &mut Vec<CodegenFallback>,
) -> Result<CompiledRule<'r>, CodegenErrorKind> {
    let condition = if rule.conditions.is_empty() {
        None
    } else {
        Some(compile_tree(&rule.conditions, ctx, fallbacks)?)
    };
    let fragments = rule
        .effects
        .iter()
        .enumerate()
        .map(|(i, effect)| compile_effect(effect, &ctx.at_effect(i), fallbacks))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CompiledRule {
        rule,
        condition,
        fragments,
    })
}

fn write_body(
    rules: &[CompiledRule<'_>],
    hook: TriggerHook,
    policy: RulePolicy,
    annotate: bool,
) -> Vec<String> {
    let returns = hook.returns_effects();
    let mut w = LuaWriter::new();
    if returns {
        w.line("local effects = {}");
    }

    match policy {
        RulePolicy::Accumulate => {
            for compiled in rules {
                if compiled.fragments.is_empty() {
                    continue;
                }
                if annotate {
                    annotate_rule(&mut w, compiled.rule);
                }
                match &compiled.condition {
                    Some(condition) => w.open_expr("if ", condition, " then"),
                    None => w.open("do"),
                };
                write_rule(&mut w, &compiled.fragments, returns);
                w.close("end");
            }
        }
        RulePolicy::FirstMatch => {
            for (i, compiled) in rules.iter().enumerate() {
                if annotate {
                    annotate_rule(&mut w, compiled.rule);
                }
                let condition = compiled.condition.as_deref().unwrap_or("true");
                if i == 0 {
                    w.open_expr("if ", condition, " then");
                } else {
                    w.reopen_expr("elseif ", condition, " then");
                }
                write_rule(&mut w, &compiled.fragments, returns);
            }
            if !rules.is_empty() {
                w.close("end");
            }
        }
    }

    if returns {
        w.open("if #effects > 0 then");
        w.line("return SMODS.merge_effects(effects)");
        w.close("end");
    }
    w.into_lines()
}

fn annotate_rule(w: &mut LuaWriter, rule: &Rule) {
    if !rule.id.is_empty() {
        let id: String = rule.id.chars().map(|c| if c.is_control() { ' ' } else { c }).collect();
        w.line(format!("-- rule {id}"));
    }
}

fn write_rule(w: &mut LuaWriter, fragments: &[CodeFragment], returns: bool) {
    for fragment in fragments {
        w.lines(&fragment.prelude);
    }
    for fragment in fragments.iter().filter(|f| f.contributes()) {
        let fields = fragment.return_fields().join(", ");
        if returns {
            w.line(format!("effects[#effects + 1] = {{ {fields} }}"));
        } else {
            w.line(format!("SMODS.calculate_effect({{ {fields} }}, card)"));
        }
    }
}
