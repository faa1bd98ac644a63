//! Whole-export entry point.
//!
//! Validation failures abort before anything is compiled. Codegen errors
//! are collected across every object of every set, so the author sees all
//! of them at once; any error fails the export. Load order is encoded last.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::lua::is_lua_identifier;
use crate::core::{CodegenFallback, ExportError, ForgeConfig, ObjectType, ValidationError};
use crate::keys::{resolve_object_key, slugify, PoolRegistry};
use crate::ordering::{loader_snippet, LoadOrderEncoder, LoadOrderEntry, LoadOrderIndex};

use super::compiler::{compile_batch, ObjectSource};
use super::model::{GameObjectData, ObjectSet};

/// Everything generated for one object type.
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledSet {
    pub object_type: ObjectType,
    /// Compiled objects, in the order they were given.
    pub sources: Vec<ObjectSource>,
    pub pools: PoolRegistry,
    pub load_order: LoadOrderIndex,
    /// Loader for the type's directory.
    pub loader: String,
}

impl CompiledSet {
    /// Directory the set's files go to.
    #[must_use]
    pub fn directory(&self) -> &'static str {
        self.object_type.directory()
    }

    /// Find a compiled object by resolved key.
    #[must_use]
    pub fn source(&self, key: &str) -> Option<&ObjectSource> {
        self.sources.iter().find(|source| source.key == key)
    }
}

/// Result of a successful export.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExportBundle {
    pub sets: Vec<CompiledSet>,
}

impl ExportBundle {
    /// The compiled set of one object type.
    #[must_use]
    pub fn set(&self, object_type: ObjectType) -> Option<&CompiledSet> {
        self.sets.iter().find(|set| set.object_type == object_type)
    }

    /// Every parameter fallback, with the key of its object.
    pub fn fallbacks(&self) -> impl Iterator<Item = (&str, &CodegenFallback)> {
        self.sets
            .iter()
            .flat_map(|set| set.sources.iter())
            .flat_map(|source| source.fallbacks.iter().map(move |f| (source.key.as_str(), f)))
    }
}

/// Validate, compile and order every object set.
pub fn export(config: &ForgeConfig, sets: &[ObjectSet]) -> Result<ExportBundle, ExportError> {
    config.validate()?;
    validate_sets(config, sets)?;

    let mut errors = Vec::new();
    let mut compiled = Vec::with_capacity(sets.len());
    for set in sets {
        let (sources, set_errors) = compile_batch(config, set);
        errors.extend(set_errors);
        compiled.push((set, sources));
    }
    if !errors.is_empty() {
        return Err(ExportError::Codegen(errors));
    }

    let mut bundle = ExportBundle::default();
    for (set, sources) in compiled {
        let mut encoder = LoadOrderEncoder::new();
        if let Some(shared) = &set.shared_file {
            encoder = encoder.with_synthetic_file(shared.as_str());
        }
        let entries: Vec<LoadOrderEntry> = set.objects.iter().map(LoadOrderEntry::from).collect();
        let load_order = encoder.encode(&entries)?;
        let directory = set.object_type.directory();

        bundle.sets.push(CompiledSet {
            object_type: set.object_type,
            pools: PoolRegistry::collect(set.object_type, &set.objects, &config.mod_prefix),
            loader: loader_snippet(directory, &load_order),
            load_order,
            sources,
        });
    }

    tracing::debug!(
        sets = bundle.sets.len(),
        objects = bundle.sets.iter().map(|set| set.sources.len()).sum::<usize>(),
        "export finished"
    );
    Ok(bundle)
}

/// Check object metadata before anything is compiled.
pub fn validate_sets(config: &ForgeConfig, sets: &[ObjectSet]) -> Result<(), ValidationError> {
    let mut seen_types = FxHashSet::default();
    for set in sets {
        if !seen_types.insert(set.object_type) {
            return Err(ValidationError::DuplicateObjectSet(set.object_type));
        }

        let mut keys: FxHashMap<String, &str> = FxHashMap::default();
        for object in &set.objects {
            if object.object_key.trim().is_empty() {
                return Err(ValidationError::EmptyObjectKey {
                    object_type: set.object_type,
                    id: object.id.clone(),
                });
            }
            if slugify(&object.object_key) != object.object_key {
                return Err(ValidationError::InvalidObjectKey {
                    object_type: set.object_type,
                    id: object.id.clone(),
                    key: object.object_key.clone(),
                });
            }
            let key = resolve_object_key(&object.object_key, &config.mod_prefix, set.object_type);
            if let Some(first) = keys.insert(key.clone(), &object.id) {
                return Err(ValidationError::DuplicateObjectKey {
                    object_type: set.object_type,
                    key,
                    first: first.to_string(),
                    second: object.id.clone(),
                });
            }
            validate_variables(object)?;
        }
    }
    Ok(())
}

fn validate_variables(object: &GameObjectData) -> Result<(), ValidationError> {
    let mut names = FxHashSet::default();
    for variable in &object.variables {
        if !is_lua_identifier(&variable.name) {
            return Err(ValidationError::InvalidVariableName {
                object: object.object_key.clone(),
                name: variable.name.clone(),
            });
        }
        if !names.insert(variable.name.as_str()) {
            return Err(ValidationError::DuplicateVariable {
                object: object.object_key.clone(),
                name: variable.name.clone(),
            });
        }
    }
    Ok(())
}
