//! Authored rule data.
//!
//! The editor owns and mutates these; the compiler only reads them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::conditions::ConditionGroup;
use crate::core::{ObjectType, UserVariable};
use crate::effects::EffectInstance;
use crate::keys::PoolMember;

/// Effects of one rule, in authored order. Most rules have one or two.
pub type EffectList = SmallVec<[EffectInstance; 4]>;

/// Trigger + condition tree + ordered effects.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Editor id, used only to point at the rule in errors and comments.
    #[serde(default)]
    pub id: String,
    /// Trigger id.
    pub trigger: String,
    #[serde(default)]
    pub conditions: ConditionGroup,
    #[serde(default)]
    pub effects: EffectList,
}

impl Rule {
    /// Create a rule on a trigger, with no conditions and no effects.
    pub fn new(trigger: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            ..Self::default()
        }
    }

    /// Set the editor id (builder pattern).
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the condition tree (builder pattern).
    #[must_use]
    pub fn with_conditions(mut self, conditions: ConditionGroup) -> Self {
        self.conditions = conditions;
        self
    }

    /// Append an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: EffectInstance) -> Self {
        self.effects.push(effect);
        self
    }
}

/// One authored object: a joker, a consumable, a seal...
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameObjectData {
    /// Stable editor id.
    pub id: String,
    /// Code identifier, unique within its object type once resolved.
    pub object_key: String,
    /// Author-controlled position among objects of the same type.
    #[serde(default)]
    pub order_value: i64,
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub variables: Vec<UserVariable>,
    /// Names of the pools this object joins.
    #[serde(default)]
    pub pools: Vec<String>,
}

impl GameObjectData {
    /// Create an object with a key and an order value.
    pub fn new(object_key: impl Into<String>, order_value: i64) -> Self {
        let object_key = object_key.into();
        Self {
            id: object_key.clone(),
            object_key,
            order_value,
            ..Self::default()
        }
    }

    /// Add a rule (builder pattern).
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Declare a variable (builder pattern).
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, initial: f64) -> Self {
        self.variables.push(UserVariable::new(name, initial));
        self
    }

    /// Join a pool (builder pattern).
    #[must_use]
    pub fn in_pool(mut self, pool: impl Into<String>) -> Self {
        self.pools.push(pool.into());
        self
    }

    /// Name of the file the object's source is written to.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.lua", self.object_key)
    }
}

impl PoolMember for GameObjectData {
    fn member_key(&self) -> &str {
        &self.object_key
    }

    fn pool_names(&self) -> &[String] {
        &self.pools
    }
}

/// Every object of one type, as handed over by the editor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectSet {
    pub object_type: ObjectType,
    #[serde(default)]
    pub objects: Vec<GameObjectData>,
    /// File name of a shared definitions file written into the same
    /// directory (rarities, pools), if any.
    #[serde(default)]
    pub shared_file: Option<String>,
}

impl ObjectSet {
    /// Create a set without a shared file.
    pub fn new(object_type: ObjectType, objects: Vec<GameObjectData>) -> Self {
        Self {
            object_type,
            objects,
            shared_file: None,
        }
    }

    /// Declare the shared definitions file (builder pattern).
    #[must_use]
    pub fn with_shared_file(mut self, file_name: impl Into<String>) -> Self {
        self.shared_file = Some(file_name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::LogicOp;

    #[test]
    fn test_deserialize_object() {
        let json = r#"{
            "id": "obj-1",
            "object_key": "lucky_cat",
            "order_value": 3,
            "variables": [{"name": "stacks", "initial": 1}],
            "rules": [{
                "id": "r1",
                "trigger": "hand_played",
                "conditions": {"operator": "or", "children": [{"kind": "first_hand"}]},
                "effects": [
                    {"kind": "add_mult", "params": {"value": {"var": "stacks"}}},
                    {"kind": "add_chips", "params": {"value": 10}, "custom_message": "Nya"}
                ]
            }]
        }"#;
        let object: GameObjectData = serde_json::from_str(json).unwrap();
        assert_eq!(object.order_value, 3);
        assert_eq!(object.file_name(), "lucky_cat.lua");
        assert_eq!(object.variables[0], UserVariable::new("stacks", 1.0));

        let rule = &object.rules[0];
        assert_eq!(rule.conditions.operator, LogicOp::Or);
        assert_eq!(rule.effects.len(), 2);
        assert_eq!(rule.effects[1].custom_message.as_deref(), Some("Nya"));
        assert!(object.pools.is_empty());
    }

    #[test]
    fn test_pool_member() {
        let object = GameObjectData::new("hammer", 0).in_pool("tools");
        assert_eq!(object.member_key(), "hammer");
        assert_eq!(object.pool_names(), ["tools".to_string()]);
    }
}
