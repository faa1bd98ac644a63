//! Object types and per-object declarations.
//!
//! Every authored object belongs to one `ObjectType`. The type decides the
//! key class prefix the host expects, the directory its file is written to
//! and (through the trigger catalogue) which hooks it can use.

use serde::{Deserialize, Serialize};

/// Kind of authored game object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    Joker,
    Consumable,
    Enhancement,
    Seal,
    Edition,
    Voucher,
}

impl ObjectType {
    /// All object types, in export order.
    pub const ALL: [ObjectType; 6] = [
        ObjectType::Joker,
        ObjectType::Consumable,
        ObjectType::Enhancement,
        ObjectType::Seal,
        ObjectType::Edition,
        ObjectType::Voucher,
    ];

    /// Class prefix of resolved keys (`j_mymod_key`).
    ///
    /// Seals are registered without a class prefix (`mymod_key`).
    #[must_use]
    pub const fn key_prefix(self) -> Option<&'static str> {
        match self {
            ObjectType::Joker => Some("j"),
            ObjectType::Consumable => Some("c"),
            ObjectType::Enhancement => Some("m"),
            ObjectType::Seal => None,
            ObjectType::Edition => Some("e"),
            ObjectType::Voucher => Some("v"),
        }
    }

    /// Directory the object files of this type are written to.
    #[must_use]
    pub const fn directory(self) -> &'static str {
        match self {
            ObjectType::Joker => "jokers",
            ObjectType::Consumable => "consumables",
            ObjectType::Enhancement => "enhancements",
            ObjectType::Seal => "seals",
            ObjectType::Edition => "editions",
            ObjectType::Voucher => "vouchers",
        }
    }

    /// Host constructor the external assembler wraps object sources in.
    #[must_use]
    pub const fn constructor(self) -> &'static str {
        match self {
            ObjectType::Joker => "SMODS.Joker",
            ObjectType::Consumable => "SMODS.Consumable",
            ObjectType::Enhancement => "SMODS.Enhancement",
            ObjectType::Seal => "SMODS.Seal",
            ObjectType::Edition => "SMODS.Edition",
            ObjectType::Voucher => "SMODS.Voucher",
        }
    }

    /// Lua path of the table holding per-object variables.
    ///
    /// For card modifiers `card` is the playing card, so their own config
    /// lives one level down.
    #[must_use]
    pub const fn variable_table(self) -> &'static str {
        match self {
            ObjectType::Seal => "card.ability.seal.extra",
            ObjectType::Edition => "card.edition.extra",
            _ => "card.ability.extra",
        }
    }

    /// True for types applied to playing cards (the object's `card` is the playing card).
    #[must_use]
    pub const fn is_card_modifier(self) -> bool {
        matches!(
            self,
            ObjectType::Enhancement | ObjectType::Seal | ObjectType::Edition
        )
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ObjectType::Joker => "joker",
            ObjectType::Consumable => "consumable",
            ObjectType::Enhancement => "enhancement",
            ObjectType::Seal => "seal",
            ObjectType::Edition => "edition",
            ObjectType::Voucher => "voucher",
        };
        f.write_str(name)
    }
}

/// A per-object variable stored in `card.ability.extra`.
///
/// Numeric parameters can reference these instead of a literal, and the
/// `modify_internal_variable` effect changes them at runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserVariable {
    /// Field name inside `card.ability.extra`.
    pub name: String,
    /// Value the field is initialized with.
    #[serde(default)]
    pub initial: f64,
}

impl UserVariable {
    /// Create a variable with an initial value.
    pub fn new(name: impl Into<String>, initial: f64) -> Self {
        Self {
            name: name.into(),
            initial,
        }
    }
}
