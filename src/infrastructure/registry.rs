//! In-memory status registry
//!
//! Stands in for the host's live status-effect list. Holds the built-in
//! defaults captured at construction, the current effect list, and the
//! special-status configuration, with snapshot accessors for assertions.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::outbound::{
    RegistryError, StatusEffectDescriptor, StatusRegistryPort,
};
use crate::domain::value_objects::SpecialStatusMapping;

#[derive(Default)]
struct RegistryState {
    defaults: Vec<StatusEffectDescriptor>,
    effects: Vec<StatusEffectDescriptor>,
    special: SpecialStatusMapping,
}

/// Host status registry backed by plain vectors
pub struct MemoryStatusRegistry {
    state: RwLock<RegistryState>,
}

impl MemoryStatusRegistry {
    /// A registry whose live list starts out as the host defaults
    pub fn new(defaults: Vec<StatusEffectDescriptor>) -> Self {
        Self {
            state: RwLock::new(RegistryState {
                effects: defaults.clone(),
                defaults,
                special: SpecialStatusMapping::default(),
            }),
        }
    }

    /// Snapshot of the live effect list
    pub async fn effects(&self) -> Vec<StatusEffectDescriptor> {
        self.state.read().await.effects.clone()
    }

    /// Snapshot of the special-status configuration
    pub async fn special_status_mapping(&self) -> SpecialStatusMapping {
        self.state.read().await.special.clone()
    }
}

#[async_trait]
impl StatusRegistryPort for MemoryStatusRegistry {
    async fn default_effects(&self) -> Result<Vec<StatusEffectDescriptor>, RegistryError> {
        Ok(self.state.read().await.defaults.clone())
    }

    async fn replace_effects(
        &self,
        effects: Vec<StatusEffectDescriptor>,
    ) -> Result<(), RegistryError> {
        self.state.write().await.effects = effects;
        Ok(())
    }

    async fn set_special_status_mapping(
        &self,
        mapping: SpecialStatusMapping,
    ) -> Result<(), RegistryError> {
        self.state.write().await.special = mapping;
        Ok(())
    }
}
