//! Named object pools.
//!
//! A pool is a set of object keys random-selection effects draw from
//! (`SMODS.add_card({ set = "mymod_food" })`). Members come from a fixed
//! built-in list for known pool names plus every authored object that
//! declares membership.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::lua::{lua_string, LuaWriter};
use crate::core::ObjectType;

use super::resolve::{resolve_object_key, resolve_unclassed_key};

/// Built-in members of the pools the editor pre-seeds, by the object
/// type whose pools they join.
pub const BUILTIN_POOLS: &[(&str, ObjectType, &[&str])] = &[(
    "food",
    ObjectType::Joker,
    &[
        "j_gros_michel",
        "j_egg",
        "j_ice_cream",
        "j_cavendish",
        "j_turtle_bean",
        "j_diet_cola",
        "j_popcorn",
        "j_ramen",
        "j_selzer",
    ],
)];

/// Built-in members of a pool, empty for unknown names and for object
/// types the pool does not hold.
#[must_use]
pub fn builtin_members(pool_name: &str, object_type: ObjectType) -> &'static [&'static str] {
    BUILTIN_POOLS
        .iter()
        .find(|(name, kind, _)| *name == pool_name && *kind == object_type)
        .map(|(_, _, members)| *members)
        .unwrap_or(&[])
}

/// Anything that can declare pool membership.
pub trait PoolMember {
    /// Key as authored (resolved by the pool builder).
    fn member_key(&self) -> &str;

    /// Pool names this object belongs to.
    fn pool_names(&self) -> &[String];
}

/// Build the member set of one pool.
///
/// Built-in members are vanilla keys and go in verbatim; authored keys
/// pass through key resolution.
pub fn build_pool<M: PoolMember>(
    pool_name: &str,
    builtin: &[&str],
    authored: &[M],
    mod_prefix: &str,
    object_type: ObjectType,
) -> BTreeSet<String> {
    let mut members: BTreeSet<String> = builtin.iter().map(|key| (*key).to_string()).collect();
    members.extend(
        authored
            .iter()
            .filter(|object| object.pool_names().iter().any(|p| p == pool_name))
            .map(|object| resolve_object_key(object.member_key(), mod_prefix, object_type)),
    );
    members
}

/// All pools of one object type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoolRegistry {
    pools: BTreeMap<String, BTreeSet<String>>,
}

impl PoolRegistry {
    /// Collect every pool named by an authored object.
    ///
    /// Built-in pools only appear when an authored object joins them.
    pub fn collect<M: PoolMember>(
        object_type: ObjectType,
        authored: &[M],
        mod_prefix: &str,
    ) -> Self {
        let names: BTreeSet<&str> = authored
            .iter()
            .flat_map(|object| object.pool_names().iter().map(String::as_str))
            .filter(|name| !name.is_empty())
            .collect();

        let pools = names
            .into_iter()
            .map(|name| {
                let members =
                    build_pool(
                    name,
                    builtin_members(name, object_type),
                    authored,
                    mod_prefix,
                    object_type,
                );
                (name.to_string(), members)
            })
            .collect();

        Self { pools }
    }

    /// Members of a pool.
    #[must_use]
    pub fn get(&self, pool_name: &str) -> Option<&BTreeSet<String>> {
        self.pools.get(pool_name)
    }

    /// Number of pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Check if there are no pools.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Iterate pools in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.pools.iter()
    }

    /// Render one `SMODS.ObjectType` registration per pool.
    #[must_use]
    pub fn render(&self, mod_prefix: &str) -> String {
        let mut w = LuaWriter::new();
        for (i, (name, members)) in self.pools.iter().enumerate() {
            if i > 0 {
                w.line("");
            }
            w.open("SMODS.ObjectType({");
            w.line(format!(
                "key = {},",
                lua_string(&resolve_unclassed_key(name, mod_prefix))
            ));
            if let Some(first) = members.iter().next() {
                w.line(format!("default = {},", lua_string(first)));
            }
            w.open("cards = {");
            for member in members {
                w.line(format!("[{}] = true,", lua_string(member)));
            }
            w.close("},");
            w.close("})");
        }
        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Member {
        key: &'static str,
        pools: Vec<String>,
    }

    impl PoolMember for Member {
        fn member_key(&self) -> &str {
            self.key
        }

        fn pool_names(&self) -> &[String] {
            &self.pools
        }
    }

    fn member(key: &'static str, pools: &[&str]) -> Member {
        Member {
            key,
            pools: pools.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_build_food_pool() {
        let authored = vec![
            member("sandwich", &["food"]),
            member("hammer", &["tools"]),
            member("j_mymod_soup", &["food", "tools"]),
        ];
        let pool = build_pool(
            "food",
            builtin_members("food", ObjectType::Joker),
            &authored,
            "mymod",
            ObjectType::Joker,
        );
        assert!(pool.contains("j_gros_michel"));
        assert!(pool.contains("j_mymod_sandwich"));
        assert!(pool.contains("j_mymod_soup"));
        assert!(!pool.contains("j_mymod_hammer"));
        assert_eq!(pool.len(), builtin_members("food", ObjectType::Joker).len() + 2);
    }

    #[test]
    fn test_registry_collects_declared_pools() {
        let authored = vec![member("hammer", &["tools"]), member("saw", &["tools"])];
        let registry = PoolRegistry::collect(ObjectType::Joker, &authored, "mymod");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("tools").map(BTreeSet::len), Some(2));
        assert!(registry.get("food").is_none());
    }

    #[test]
    fn test_builtin_members_stay_with_their_type() {
        let authored = vec![member("soup_card", &["food"])];
        let registry = PoolRegistry::collect(ObjectType::Consumable, &authored, "mymod");
        let food = registry.get("food").unwrap();
        assert_eq!(food.len(), 1);
        assert!(food.contains("c_mymod_soup_card"));
        assert!(!food.iter().any(|key| key.contains("gros_michel")));

        let registry = PoolRegistry::collect(ObjectType::Joker, &authored, "mymod");
        let food = registry.get("food").unwrap();
        assert!(food.contains("j_gros_michel"));
        assert!(food.contains("j_mymod_soup_card"));
    }

    #[test]
    fn test_render_pool() {
        let authored = vec![member("hammer", &["tools"])];
        let registry = PoolRegistry::collect(ObjectType::Joker, &authored, "mymod");
        let lua = registry.render("mymod");
        assert!(lua.contains("key = \"mymod_tools\","));
        assert!(lua.contains("[\"j_mymod_hammer\"] = true,"));
        assert!(lua.starts_with("SMODS.ObjectType({"));
        assert!(lua.ends_with("})"));
    }
}
