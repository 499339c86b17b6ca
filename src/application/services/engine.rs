//! Conditions Engine facade - lifecycle wiring for the host runtime
//!
//! The host creates one engine at initialization and drives it from its
//! lifecycle hooks: `on_ready` once the world is loaded, the setting
//! mutators when a user changes configuration, `on_setting_changed` when
//! another client's write is broadcast. All collaborators are injected;
//! the engine handle itself is the module's public surface.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::application::ports::outbound::{
    keys, DefaultMapSourcePort, SettingsError, SettingsStorePort, StatusRegistryPort,
    TokenEffectsPort,
};
use crate::domain::entities::{ConditionMap, MapType};
use crate::domain::value_objects::{is_known_system, resolve_system, ModuleConfig, SpecialStatusMapping};

use super::condition_api::ConditionApi;
use super::map_store::{ConditionMapStore, ImportError};
use super::resolution::MapResolutionService;
use super::sync::SynchronizationService;

/// Coarse lifecycle state of the module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    Uninitialized,
    Resolving,
    Synced,
    /// Feature is off, either by user choice or because the active system
    /// is unsupported with nothing imported
    Disabled,
}

/// The module's public handle, wiring store, resolution and synchronization
pub struct ConditionsEngine {
    config: ModuleConfig,
    settings: Arc<dyn SettingsStorePort>,
    registry: Arc<dyn StatusRegistryPort>,
    store: Arc<ConditionMapStore>,
    resolution: MapResolutionService,
    sync: Arc<SynchronizationService>,
    api: ConditionApi,
    status: RwLock<EngineStatus>,
    warned_unsupported: AtomicBool,
}

impl ConditionsEngine {
    /// Wire the engine against the host's collaborators
    pub async fn initialize(
        config: ModuleConfig,
        settings: Arc<dyn SettingsStorePort>,
        registry: Arc<dyn StatusRegistryPort>,
        token_effects: Arc<dyn TokenEffectsPort>,
        default_maps: Arc<dyn DefaultMapSourcePort>,
    ) -> Arc<Self> {
        let store = Arc::new(ConditionMapStore::new(
            settings.clone(),
            default_maps,
            config.clone(),
        ));
        let sync = Arc::new(SynchronizationService::new(
            settings.clone(),
            registry.clone(),
            config.clone(),
        ));
        store.set_observer(sync.clone()).await;

        Arc::new(Self {
            resolution: MapResolutionService::new(store.clone()),
            api: ConditionApi::new(store.clone(), token_effects),
            config,
            settings,
            registry,
            store,
            sync,
            status: RwLock::new(EngineStatus::Uninitialized),
            warned_unsupported: AtomicBool::new(false),
        })
    }

    /// The token-condition API exposed to host UI and macros
    pub fn conditions(&self) -> &ConditionApi {
        &self.api
    }

    pub async fn status(&self) -> EngineStatus {
        *self.status.read().await
    }

    /// The system id conditions are currently keyed by
    pub async fn active_system(&self) -> Result<String, SettingsError> {
        let stored = self
            .settings
            .get(keys::SYSTEM)
            .await?
            .and_then(|v| v.as_str().map(str::to_string));
        Ok(stored.unwrap_or_else(|| resolve_system(&self.config.host_system_id).id.to_string()))
    }

    /// Host ready hook: capture host defaults, then resolve and synchronize
    #[instrument(skip(self))]
    pub async fn on_ready(&self) -> Result<()> {
        if !self.enabled().await? {
            *self.status.write().await = EngineStatus::Disabled;
            return Ok(());
        }

        // Snapshot the host's built-in effects once, before we overwrite them
        if self.settings.get(keys::CORE_EFFECTS).await?.is_none() {
            let defaults = self.registry.default_effects().await?;
            self.settings
                .set(keys::CORE_EFFECTS, serde_json::to_value(&defaults).map_err(SettingsError::from)?)
                .await?;
        }

        self.refresh().await
    }

    /// Change the system conditions are keyed by and re-synchronize
    pub async fn set_system(&self, system_id: &str) -> Result<()> {
        self.settings.set(keys::SYSTEM, json!(system_id)).await?;
        self.refresh().await
    }

    /// Change the requested map type and re-synchronize
    pub async fn set_map_type(&self, map_type: MapType) -> Result<()> {
        self.settings
            .set(keys::MAP_TYPE, serde_json::to_value(map_type).map_err(SettingsError::from)?)
            .await?;
        self.refresh().await
    }

    /// Toggle whether the host's built-in effects survive synchronization
    pub async fn set_remove_default_effects(&self, remove: bool) -> Result<()> {
        self.settings
            .set(keys::REMOVE_DEFAULT_EFFECTS, Value::Bool(remove))
            .await?;
        self.resync_active_map().await
    }

    /// Enable or disable the whole feature
    pub async fn set_enabled(&self, enabled: bool) -> Result<()> {
        self.settings.set(keys::ENABLE, Value::Bool(enabled)).await?;
        if enabled {
            self.refresh().await
        } else {
            *self.status.write().await = EngineStatus::Disabled;
            Ok(())
        }
    }

    /// Throw away the stored map and return to the bundled default
    #[instrument(skip(self))]
    pub async fn restore_defaults(&self) -> Result<()> {
        let system_id = self.active_system().await?;
        self.store.clear_active_map(&system_id).await?;
        self.settings
            .set(
                keys::MAP_TYPE,
                serde_json::to_value(MapType::SystemDefault).map_err(SettingsError::from)?,
            )
            .await?;
        self.refresh().await
    }

    /// Import an externally supplied map file for the active system
    pub async fn import_map(&self, json: &str) -> Result<ConditionMap, ImportError> {
        let system_id = self
            .active_system()
            .await
            .map_err(|e| ImportError::Save(e.into()))?;
        let map = self.store.import_map(&system_id, json).await?;
        self.settings
            .set(
                keys::MAP_TYPE,
                serde_json::to_value(MapType::OtherImported)
                    .map_err(|e| ImportError::Save(anyhow::Error::new(e)))?,
            )
            .await
            .map_err(|e| ImportError::Save(e.into()))?;
        Ok(map)
    }

    /// Pretty JSON of the active map, for download by the host UI
    pub async fn export_map(&self) -> Option<String> {
        self.store.export_map().await
    }

    /// React to a settings write broadcast from another client
    pub async fn on_setting_changed(&self, key: &str) -> Result<()> {
        if key == keys::ENABLE
            || key == keys::SYSTEM
            || key == keys::MAP_TYPE
            || key.starts_with(keys::MAP)
        {
            if self.enabled().await? {
                self.refresh().await
            } else {
                *self.status.write().await = EngineStatus::Disabled;
                Ok(())
            }
        } else if key == keys::REMOVE_DEFAULT_EFFECTS {
            self.resync_active_map().await
        } else {
            Ok(())
        }
    }

    async fn enabled(&self) -> Result<bool, SettingsError> {
        Ok(self
            .settings
            .get(keys::ENABLE)
            .await?
            .and_then(|v| v.as_bool())
            .unwrap_or(true))
    }

    async fn requested_map_type(&self) -> Result<MapType, SettingsError> {
        let Some(value) = self.settings.get(keys::MAP_TYPE).await? else {
            return Ok(MapType::SystemDefault);
        };
        Ok(serde_json::from_value(value).unwrap_or(MapType::SystemDefault))
    }

    /// Resolve the active map and push it to the host registry
    #[instrument(skip(self))]
    async fn refresh(&self) -> Result<()> {
        *self.status.write().await = EngineStatus::Resolving;

        let system_id = self.active_system().await?;
        let map_type = self.requested_map_type().await?;
        let resolved = self.resolution.resolve(&system_id, map_type).await?;

        if !is_known_system(&system_id) && resolved.map.is_empty() {
            if !self.warned_unsupported.swap(true, Ordering::Relaxed) {
                warn!(
                    system = %system_id,
                    "game system is unsupported and no condition map has been imported; disabling"
                );
            }
            self.settings.set(keys::ENABLE, Value::Bool(false)).await?;
            *self.status.write().await = EngineStatus::Disabled;
            return Ok(());
        }

        // Saving re-persists the resolved map; the write is idempotent and
        // guarantees the observer pushes it to the host registry
        self.store.save_active_map(&resolved.map).await?;
        self.settings
            .set(
                keys::SPECIAL_STATUS_MAPPING,
                serde_json::to_value(&resolved.special_statuses).map_err(SettingsError::from)?,
            )
            .await?;

        *self.status.write().await = EngineStatus::Synced;
        info!(
            system = %system_id,
            conditions = resolved.map.len(),
            "condition map synchronized"
        );
        Ok(())
    }

    /// Re-push the current map without re-resolving, e.g. after a flag flip
    async fn resync_active_map(&self) -> Result<()> {
        let Some(map) = self.store.active_map().await else {
            return Ok(());
        };
        let remove = self.sync.remove_default_effects_flag().await?;
        let special = SpecialStatusMapping::derive(&map);
        self.sync
            .apply_to_host_registry(&map, &special, remove)
            .await?;
        Ok(())
    }
}
