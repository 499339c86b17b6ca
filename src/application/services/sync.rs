//! Synchronization Engine - pushes the resolved map into the host registry
//!
//! Map order controls on-screen icon ordering, so conversion preserves it:
//! host defaults first (unless removed), then the custom conditions in map
//! order. A custom entry sharing an id with a host default replaces it.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::application::ports::outbound::{
    keys, RegistryError, SettingsError, SettingsStorePort, StatusEffectDescriptor,
    StatusRegistryPort,
};
use crate::domain::entities::ConditionMap;
use crate::domain::value_objects::{ModuleConfig, SpecialStatusMapping};

use super::map_store::ActiveMapObserver;

/// Applies condition maps to the host's live status-effect registry
pub struct SynchronizationService {
    settings: Arc<dyn SettingsStorePort>,
    registry: Arc<dyn StatusRegistryPort>,
    config: ModuleConfig,
}

impl SynchronizationService {
    pub fn new(
        settings: Arc<dyn SettingsStorePort>,
        registry: Arc<dyn StatusRegistryPort>,
        config: ModuleConfig,
    ) -> Self {
        Self {
            settings,
            registry,
            config,
        }
    }

    /// Current remove-default-effects flag, falling back to the module default
    pub async fn remove_default_effects_flag(&self) -> Result<bool, SettingsError> {
        let value = self.settings.get(keys::REMOVE_DEFAULT_EFFECTS).await?;
        Ok(value
            .and_then(|v| v.as_bool())
            .unwrap_or(self.config.remove_default_effects))
    }

    /// Rebuild the host status-effect list and special-status bindings.
    ///
    /// Re-entrant safe: repeated calls with the same inputs produce an
    /// identical registry snapshot.
    #[instrument(skip(self, map, special), fields(system = %map.system_id, conditions = map.len()))]
    pub async fn apply_to_host_registry(
        &self,
        map: &ConditionMap,
        special: &SpecialStatusMapping,
        remove_default_effects: bool,
    ) -> Result<(), RegistryError> {
        let custom: Vec<StatusEffectDescriptor> = map
            .conditions
            .iter()
            .map(StatusEffectDescriptor::from_condition)
            .collect();

        let mut effects: Vec<StatusEffectDescriptor> = if remove_default_effects {
            Vec::new()
        } else {
            // Custom entry overrides a default sharing its id
            self.registry
                .default_effects()
                .await?
                .into_iter()
                .filter(|default| custom.iter().all(|c| c.id != default.id))
                .collect()
        };
        effects.extend(custom);

        debug!(effects = effects.len(), "replacing host status effects");
        self.registry.replace_effects(effects).await?;
        self.registry
            .set_special_status_mapping(special.clone())
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ActiveMapObserver for SynchronizationService {
    async fn on_active_map_changed(&self, map: &ConditionMap) -> Result<()> {
        let remove_default_effects = self.remove_default_effects_flag().await?;
        let special = SpecialStatusMapping::derive(map);
        self.apply_to_host_registry(map, &special, remove_default_effects)
            .await
            .context("applying condition map to host registry")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ConditionEntry, ConditionOptions, MapType};
    use crate::domain::value_objects::SpecialStatusSlot;
    use crate::infrastructure::{MemorySettingsStore, MemoryStatusRegistry};

    fn host_defaults() -> Vec<StatusEffectDescriptor> {
        vec![
            StatusEffectDescriptor::new("dead", "Dead", "icons/svg/skull.svg"),
            StatusEffectDescriptor::new("prone", "Prone (core)", "icons/svg/core-falling.svg"),
            StatusEffectDescriptor::new("sleep", "Asleep", "icons/svg/sleep.svg"),
        ]
    }

    fn custom_map() -> ConditionMap {
        ConditionMap::new(
            "dnd5e",
            MapType::SystemCustom,
            vec![
                ConditionEntry::new("blinded", "Blinded", "icons/svg/blind.svg").with_options(
                    ConditionOptions {
                        blind_token: true,
                        ..ConditionOptions::default()
                    },
                ),
                ConditionEntry::new("prone", "Prone", "icons/svg/falling.svg"),
            ],
        )
    }

    fn service(registry: Arc<MemoryStatusRegistry>) -> SynchronizationService {
        SynchronizationService::new(
            Arc::new(MemorySettingsStore::new()),
            registry,
            ModuleConfig::new("dnd5e"),
        )
    }

    #[tokio::test]
    async fn test_remove_defaults_yields_exactly_custom_entries() {
        let registry = Arc::new(MemoryStatusRegistry::new(host_defaults()));
        let map = custom_map();
        let special = SpecialStatusMapping::derive(&map);

        service(registry.clone())
            .apply_to_host_registry(&map, &special, true)
            .await
            .unwrap();

        let ids: Vec<String> = registry.effects().await.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec!["blinded", "prone"]);
    }

    #[tokio::test]
    async fn test_keep_defaults_prepends_and_custom_overrides_by_id() {
        let registry = Arc::new(MemoryStatusRegistry::new(host_defaults()));
        let map = custom_map();
        let special = SpecialStatusMapping::derive(&map);

        service(registry.clone())
            .apply_to_host_registry(&map, &special, false)
            .await
            .unwrap();

        let effects = registry.effects().await;
        let ids: Vec<&str> = effects.iter().map(|e| e.id.as_str()).collect();
        // Defaults first minus the overridden "prone", then custom in map order
        assert_eq!(ids, vec!["dead", "sleep", "blinded", "prone"]);

        let prone = effects.iter().find(|e| e.id == "prone").unwrap();
        assert_eq!(prone.label, "Prone");
    }

    #[tokio::test]
    async fn test_sync_is_idempotent() {
        let registry = Arc::new(MemoryStatusRegistry::new(host_defaults()));
        let map = custom_map();
        let special = SpecialStatusMapping::derive(&map);
        let service = service(registry.clone());

        service
            .apply_to_host_registry(&map, &special, false)
            .await
            .unwrap();
        let first = registry.effects().await;

        service
            .apply_to_host_registry(&map, &special, false)
            .await
            .unwrap();
        assert_eq!(registry.effects().await, first);
    }

    #[tokio::test]
    async fn test_special_status_bindings_written_to_host() {
        let registry = Arc::new(MemoryStatusRegistry::new(host_defaults()));
        let map = custom_map();
        let special = SpecialStatusMapping::derive(&map);

        service(registry.clone())
            .apply_to_host_registry(&map, &special, true)
            .await
            .unwrap();

        let mapping = registry.special_status_mapping().await;
        assert_eq!(mapping.get(SpecialStatusSlot::Blinded), Some("blinded"));
        assert_eq!(mapping.get(SpecialStatusSlot::Invisible), None);
    }

    #[tokio::test]
    async fn test_registry_rejection_propagates() {
        struct RejectingRegistry;

        #[async_trait]
        impl StatusRegistryPort for RejectingRegistry {
            async fn default_effects(
                &self,
            ) -> Result<Vec<StatusEffectDescriptor>, RegistryError> {
                Ok(Vec::new())
            }

            async fn replace_effects(
                &self,
                _effects: Vec<StatusEffectDescriptor>,
            ) -> Result<(), RegistryError> {
                Err(RegistryError::Rejected("invalid effect data".to_string()))
            }

            async fn set_special_status_mapping(
                &self,
                _mapping: SpecialStatusMapping,
            ) -> Result<(), RegistryError> {
                Ok(())
            }
        }

        let service = SynchronizationService::new(
            Arc::new(MemorySettingsStore::new()),
            Arc::new(RejectingRegistry),
            ModuleConfig::new("dnd5e"),
        );

        let map = custom_map();
        let special = SpecialStatusMapping::derive(&map);
        let err = service
            .apply_to_host_registry(&map, &special, true)
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_flag_falls_back_to_module_default() {
        let registry = Arc::new(MemoryStatusRegistry::new(Vec::new()));
        let service = service(registry);
        // ModuleConfig::default() removes host defaults
        assert!(service.remove_default_effects_flag().await.unwrap());
    }
}
