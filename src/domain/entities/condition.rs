//! Condition entry - one row of a condition map
//!
//! Serialized shapes use camelCase field names so maps exported by other
//! tools (and older versions of this module) import without conversion.

use serde::{Deserialize, Serialize};

/// A named status effect a token can carry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConditionEntry {
    /// Stable identifier, unique within a map (slug of the original name)
    pub id: String,
    /// Display name shown to users; not required to be unique
    pub name: String,
    /// Icon path or URI rendered on the token
    pub icon: String,
    /// Structured modifiers applied to a token while the condition is active
    pub active_effects: Vec<EffectData>,
    pub options: ConditionOptions,
    /// Host document id assigned lazily when the host instantiates the effect
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_effect_id: Option<String>,
}

impl ConditionEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            ..Self::default()
        }
    }

    pub fn with_effect(mut self, effect: EffectData) -> Self {
        self.active_effects.push(effect);
        self
    }

    pub fn with_options(mut self, options: ConditionOptions) -> Self {
        self.options = options;
        self
    }
}

/// One block of effect data attached to a condition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EffectData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub changes: Vec<EffectChange>,
}

impl EffectData {
    pub fn with_change(mut self, change: EffectChange) -> Self {
        self.changes.push(change);
        self
    }
}

/// A single attribute mutation within an effect-data block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EffectChange {
    /// Host attribute path the change targets (e.g. "system.attributes.movement.walk")
    pub key: String,
    /// Host application mode (0=custom, 1=multiply, 2=add, 3=downgrade, 4=upgrade, 5=override)
    pub mode: u8,
    pub value: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

impl EffectChange {
    pub fn new(key: impl Into<String>, mode: u8, value: impl Into<serde_json::Value>) -> Self {
        Self {
            key: key.into(),
            mode,
            value: value.into(),
            priority: None,
        }
    }
}

/// Per-condition automation flags and document linkage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConditionOptions {
    /// Output a chat card when the condition is applied or removed
    pub output_chat: bool,
    /// Re-apply automation on each combat turn
    pub output_combat: bool,
    /// Render the icon as a full-token overlay instead of a corner icon
    pub overlay: bool,
    /// This condition fills the host's "blinded" special status slot
    pub blind_token: bool,
    /// This condition fills the host's "invisible" special status slot
    pub mark_invisible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<ConditionReference>,
}

/// Link from a condition to a reference document describing it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionReference {
    pub reference_type: ReferenceType,
    pub reference_id: String,
}

/// Kinds of documents a condition can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceType {
    #[serde(rename = "journalEntry")]
    JournalEntry,
    #[serde(rename = "compendium.journalEntry")]
    CompendiumJournalEntry,
    #[serde(rename = "item")]
    Item,
    #[serde(rename = "compendium.item")]
    CompendiumItem,
}
