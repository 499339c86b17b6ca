//! Module configuration value object
//!
//! These are the module's fixed defaults and host environment facts, supplied
//! once at initialization. Everything a user can change at runtime flows
//! through the host settings store instead.

/// Configuration supplied by the embedding host at initialization
#[derive(Debug, Clone)]
pub struct ModuleConfig {
    /// The host's active rule system id (e.g. "dnd5e")
    pub host_system_id: String,
    /// Base path prefixed to icons for entries imported without one
    pub icon_path: String,
    /// Fallback when the remove-default-effects setting has never been written
    pub remove_default_effects: bool,
    /// Fallback chat-output flag for newly created conditions
    pub output_chat: bool,
    /// Fallback combat-turn-output flag for newly created conditions
    pub output_combat: bool,
}

impl ModuleConfig {
    pub fn new(host_system_id: impl Into<String>) -> Self {
        Self {
            host_system_id: host_system_id.into(),
            ..Self::default()
        }
    }
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            host_system_id: "other".to_string(),
            icon_path: "modules/conditions-engine/icons/".to_string(),
            remove_default_effects: true,
            output_chat: false,
            output_combat: false,
        }
    }
}
