//! Settings store port - the host's world-scoped key-value settings
//!
//! The store is shared by every participant in a session; the host
//! confirms persistence before the returned future resolves, so a save
//! completes before the next change notification for the same key.

use async_trait::async_trait;
use serde_json::Value;

/// Keys under which the module persists world-scoped state
pub mod keys {
    pub const ENABLE: &str = "enableEnhancedConditions";
    pub const CORE_EFFECTS: &str = "coreStatusEffects";
    pub const SYSTEM: &str = "activeSystem";
    pub const MAP: &str = "activeConditionMap";
    pub const MAP_TYPE: &str = "conditionMapType";
    pub const REMOVE_DEFAULT_EFFECTS: &str = "removeDefaultEffects";
    pub const OUTPUT_CHAT: &str = "conditionsOutputToChat";
    pub const OUTPUT_COMBAT: &str = "conditionsOutputDuringCombat";
    pub const SPECIAL_STATUS_MAPPING: &str = "specialStatusEffectMapping";

    /// The active condition map is persisted per system
    pub fn active_map(system_id: &str) -> String {
        format!("{MAP}.{system_id}")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings backend error: {0}")]
    Backend(String),
    #[error("settings serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Serialization(err.to_string())
    }
}

/// Host key-value settings store, world scope
#[async_trait]
pub trait SettingsStorePort: Send + Sync {
    /// Read a raw setting value; `None` when the key has never been written
    async fn get(&self, key: &str) -> Result<Option<Value>, SettingsError>;

    /// Persist a setting; resolves only after the host confirms the write
    async fn set(&self, key: &str, value: Value) -> Result<(), SettingsError>;

    /// Delete a setting so reads fall back to defaults
    async fn remove(&self, key: &str) -> Result<(), SettingsError>;
}
