//! Status registry port - the host's live status-effect list
//!
//! The registry is the ordered list the host renders as selectable token
//! icons. This engine is its sole writer during synchronization, but the
//! host owns the final structure and may reject an update outright.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{ConditionEntry, EffectData};
use crate::domain::value_objects::SpecialStatusMapping;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("host rejected status effect update: {0}")]
    Rejected(String),
    #[error("host status registry unavailable: {0}")]
    Unavailable(String),
}

/// Host-facing shape of a single status effect
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusEffectDescriptor {
    pub id: String,
    pub label: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub active_effects: Vec<EffectData>,
    pub overlay: bool,
}

impl StatusEffectDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: icon.into(),
            ..Self::default()
        }
    }

    /// Convert a condition entry into the host's effect-descriptor shape
    pub fn from_condition(entry: &ConditionEntry) -> Self {
        Self {
            id: entry.id.clone(),
            label: entry.name.clone(),
            icon: entry.icon.clone(),
            active_effects: entry.active_effects.clone(),
            overlay: entry.options.overlay,
        }
    }
}

/// Host status-effect registry and special-status configuration
#[async_trait]
pub trait StatusRegistryPort: Send + Sync {
    /// The host's own built-in default effects, as captured at startup
    async fn default_effects(&self) -> Result<Vec<StatusEffectDescriptor>, RegistryError>;

    /// Replace the live status-effect list wholesale, preserving order
    async fn replace_effects(
        &self,
        effects: Vec<StatusEffectDescriptor>,
    ) -> Result<(), RegistryError>;

    /// Write the special-status slot bindings into the host configuration
    async fn set_special_status_mapping(
        &self,
        mapping: SpecialStatusMapping,
    ) -> Result<(), RegistryError>;
}
