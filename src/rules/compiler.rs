//! Object compiler.
//!
//! Runs the assembler once per trigger an object uses and renders the
//! results as table fields for the object's host constructor.

use std::collections::BTreeSet;

use crate::core::lua::{lua_number, LuaWriter};
use crate::core::{
    CodegenError, CodegenErrorKind, CodegenFallback, ForgeConfig, GenContext, ObjectType,
    UserVariable,
};
use crate::effects::EffectKind;
use crate::keys::resolve_object_key;
use crate::triggers::{highlighted_cards, TriggerHook, TriggerKind};

use super::assembler::{assemble, TriggerFunction};
use super::model::{GameObjectData, ObjectSet};

/// Compiled source of one object.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectSource {
    pub object_type: ObjectType,
    /// Resolved key (`j_mymod_lucky_cat`).
    pub key: String,
    /// File the external packager writes the object to.
    pub file_name: String,
    /// One function per used trigger, in trigger declaration order.
    pub functions: Vec<TriggerFunction>,
    pub variables: Vec<UserVariable>,
    /// Parameters that fell back to their defaults.
    pub fallbacks: Vec<CodegenFallback>,
    /// A consumable whose `use` acts on highlighted cards needs a selection.
    pub needs_selection: bool,
}

impl ObjectSource {
    /// The compiled function of a trigger, if the object uses it.
    #[must_use]
    pub fn function(&self, trigger: TriggerKind) -> Option<&TriggerFunction> {
        self.functions.iter().find(|f| f.trigger == trigger)
    }

    /// `config = { extra = { ... } }` initializer for declared variables.
    ///
    /// Empty when the object declares none.
    #[must_use]
    pub fn config_table(&self) -> Vec<String> {
        if self.variables.is_empty() {
            return Vec::new();
        }
        let mut w = LuaWriter::new();
        w.open("config = {");
        w.open("extra = {");
        for variable in &self.variables {
            w.line(format!("{} = {},", variable.name, lua_number(variable.initial)));
        }
        w.close("},");
        w.close("},");
        w.into_lines()
    }

    /// Render every generated table field.
    ///
    /// The output is a list of `name = value,` fields; the caller wraps it
    /// in `SMODS.Joker { ... }` with the object's metadata.
    #[must_use]
    pub fn render(&self) -> String {
        let mut w = LuaWriter::new();
        w.lines(self.config_table());
        self.write_loc_vars(&mut w);

        for function in &self.functions {
            let params = match function.hook {
                TriggerHook::Calculate { .. } => "self, card, context",
                TriggerHook::Host(host) => host.params(),
            };
            w.open(format!("{} = function({params})", function.name()));
            w.lines(&function.body);
            w.close("end,");
        }
        self.write_dispatcher(&mut w);

        if self.object_type == ObjectType::Consumable {
            w.open("can_use = function(self, card)");
            if self.needs_selection {
                w.line(format!("return #{} > 0", highlighted_cards()));
            } else {
                w.line("return true");
            }
            w.close("end,");
        }
        w.finish()
    }

    fn write_loc_vars(&self, w: &mut LuaWriter) {
        if self.variables.is_empty() {
            return;
        }
        let table = self.object_type.variable_table();
        let vars: Vec<String> = self
            .variables
            .iter()
            .map(|v| format!("{table}.{}", v.name))
            .collect();
        w.open("loc_vars = function(self, info_queue, card)");
        w.line(format!("return {{ vars = {{ {} }} }}", vars.join(", ")));
        w.close("end,");
    }

    fn write_dispatcher(&self, w: &mut LuaWriter) {
        let calculated: Vec<(&TriggerFunction, &str)> = self
            .functions
            .iter()
            .filter_map(|f| match f.hook {
                TriggerHook::Calculate { guard } => Some((f, guard)),
                TriggerHook::Host(_) => None,
            })
            .collect();
        if calculated.is_empty() {
            return;
        }
        // Guards of different triggers can hold in the same context
        // (`round_end` and `boss_defeated`), so every match runs.
        w.open("calculate = function(self, card, context)");
        w.line("local results = {}");
        for (function, guard) in calculated {
            w.open(format!("if {guard} then"));
            w.line(format!(
                "results[#results + 1] = self:{}(card, context)",
                function.name()
            ));
            w.close("end");
        }
        w.open("if #results > 0 then");
        w.line("return SMODS.merge_effects(results)");
        w.close("end");
        w.close("end,");
    }
}

/// Compile one object.
///
/// The first rule that cannot be compiled aborts the object.
pub fn compile_object(
    config: &ForgeConfig,
    object_type: ObjectType,
    object: &GameObjectData,
) -> Result<ObjectSource, CodegenError> {
    let key = resolve_object_key(&object.object_key, &config.mod_prefix, object_type);

    let mut triggers = BTreeSet::new();
    for (index, rule) in object.rules.iter().enumerate() {
        let trigger = TriggerKind::from_id(&rule.trigger).ok_or_else(|| {
            CodegenError::new(
                key.as_str(),
                index,
                rule.id.as_str(),
                CodegenErrorKind::UnknownTrigger(rule.trigger.clone()),
            )
        })?;
        triggers.insert(trigger);
    }

    let mut fallbacks = Vec::new();
    let mut functions = Vec::with_capacity(triggers.len());
    for trigger in triggers {
        let ctx = GenContext::new(config, object_type, &key, trigger, &object.variables);
        if let Some(function) = assemble(&object.rules, trigger, ctx, &mut fallbacks)? {
            functions.push(function);
        }
    }

    let needs_selection = object_type == ObjectType::Consumable
        && object
            .rules
            .iter()
            .filter(|rule| rule.trigger == TriggerKind::ConsumableUsed.id())
            .flat_map(|rule| rule.effects.iter())
            .filter_map(|effect| EffectKind::from_id(&effect.kind))
            .any(EffectKind::targets_cards);

    tracing::debug!(
        object = %key,
        functions = functions.len(),
        fallbacks = fallbacks.len(),
        "compiled object"
    );
    Ok(ObjectSource {
        object_type,
        key,
        file_name: object.file_name(),
        functions,
        variables: object.variables.clone(),
        fallbacks,
        needs_selection,
    })
}

/// Compile every object of a set.
///
/// A failing object does not stop its siblings; all errors are returned
/// alongside the objects that compiled.
pub fn compile_batch(
    config: &ForgeConfig,
    set: &ObjectSet,
) -> (Vec<ObjectSource>, Vec<CodegenError>) {
    let mut sources = Vec::with_capacity(set.objects.len());
    let mut errors = Vec::new();
    for object in &set.objects {
        match compile_object(config, set.object_type, object) {
            Ok(source) => sources.push(source),
            Err(err) => errors.push(err),
        }
    }
    (sources, errors)
}
