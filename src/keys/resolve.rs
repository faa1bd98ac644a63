//! Key resolution.
//!
//! Authors type bare identifiers ("joker", "my rarity"); the host needs
//! fully namespaced keys (`j_mymod_joker`). Resolution is idempotent, so
//! keys that are already namespaced (including the host's own `j_...`
//! keys) pass through unchanged.

use crate::core::ObjectType;

/// Resolve a key under a class prefix: `kind_prefix + "_" + mod_prefix + "_" + raw`.
///
/// Keys that already start with `kind_prefix` followed by `_` and a
/// non-empty segment are returned unchanged.
///
/// ```
/// use joker_forge::keys::resolve_key;
///
/// assert_eq!(resolve_key("joker", "mymod", "j"), "j_mymod_joker");
/// assert_eq!(resolve_key("j_mymod_joker", "mymod", "j"), "j_mymod_joker");
/// ```
#[must_use]
pub fn resolve_key(raw: &str, mod_prefix: &str, kind_prefix: &str) -> String {
    if is_namespaced(raw, kind_prefix) {
        return raw.to_string();
    }
    format!("{kind_prefix}_{mod_prefix}_{raw}")
}

/// Resolve a key that has no class prefix (seals, custom rarities, pools).
///
/// Keys already starting with `mod_prefix_` pass through unchanged.
#[must_use]
pub fn resolve_unclassed_key(raw: &str, mod_prefix: &str) -> String {
    if is_namespaced(raw, mod_prefix) {
        return raw.to_string();
    }
    format!("{mod_prefix}_{raw}")
}

/// Resolve the key of an authored object of the given type.
#[must_use]
pub fn resolve_object_key(raw: &str, mod_prefix: &str, object_type: ObjectType) -> String {
    match object_type.key_prefix() {
        Some(kind_prefix) => resolve_key(raw, mod_prefix, kind_prefix),
        None => resolve_unclassed_key(raw, mod_prefix),
    }
}

fn is_namespaced(raw: &str, prefix: &str) -> bool {
    raw.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('_'))
        .is_some_and(|rest| !rest.is_empty())
}

/// Turn a display name into a code identifier.
///
/// Lowercases ASCII letters, maps every other run of characters to a
/// single `_`, and trims underscores from both ends.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_key() {
        assert_eq!(resolve_key("joker", "mymod", "j"), "j_mymod_joker");
        assert_eq!(resolve_key("j_mymod_joker", "mymod", "j"), "j_mymod_joker");
        // Host keys are already namespaced.
        assert_eq!(resolve_key("j_blueprint", "mymod", "j"), "j_blueprint");
        // A bare prefix is not a namespaced key.
        assert_eq!(resolve_key("j_", "mymod", "j"), "j_mymod_j_");
        assert_eq!(resolve_key("jimbo", "mymod", "j"), "j_mymod_jimbo");
    }

    #[test]
    fn test_resolve_unclassed() {
        assert_eq!(resolve_unclassed_key("crimson", "mymod"), "mymod_crimson");
        assert_eq!(resolve_unclassed_key("mymod_crimson", "mymod"), "mymod_crimson");
    }

    #[test]
    fn test_resolve_object_key() {
        assert_eq!(
            resolve_object_key("lucky", "mymod", ObjectType::Enhancement),
            "m_mymod_lucky"
        );
        assert_eq!(resolve_object_key("wax", "mymod", ObjectType::Seal), "mymod_wax");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Lucky Cat"), "lucky_cat");
        assert_eq!(slugify("  The -- Big   One!! "), "the_big_one");
        assert_eq!(slugify("Jimbo2"), "jimbo2");
        assert_eq!(slugify("***"), "");
    }
}
