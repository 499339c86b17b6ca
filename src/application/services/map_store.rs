//! Condition Map Store - persistence and in-memory mirror of the active map
//!
//! The store is the single write path for the active condition map. A save
//! persists through the host settings port, updates the mirror, then
//! notifies the registered observer synchronously, so synchronization is
//! guaranteed to have run before the save call returns.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use crate::application::ports::outbound::{
    keys, DefaultMapSourcePort, SettingsError, SettingsStorePort,
};
use crate::domain::entities::{ConditionEntry, ConditionMap, MapType};
use crate::domain::services::slug::{generate_unique_slug_id, name_from_file_path};
use crate::domain::value_objects::ModuleConfig;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("invalid condition map file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("imported map contained no entries")]
    Empty,
    #[error(transparent)]
    Save(#[from] anyhow::Error),
}

/// Observer notified synchronously after every successful active-map write
#[async_trait]
pub trait ActiveMapObserver: Send + Sync {
    async fn on_active_map_changed(&self, map: &ConditionMap) -> Result<()>;
}

/// Accepted interchange shapes: the tagged map, or the bare entry array
/// older exports used
#[derive(Deserialize)]
#[serde(untagged)]
enum MapFile {
    Tagged(ConditionMap),
    Entries(Vec<ConditionEntry>),
}

/// Owner of the active condition map for the current world
pub struct ConditionMapStore {
    settings: Arc<dyn SettingsStorePort>,
    default_maps: Arc<dyn DefaultMapSourcePort>,
    config: ModuleConfig,
    /// Convenience mirror of the last saved map for fast read access
    mirror: RwLock<Option<ConditionMap>>,
    observer: RwLock<Option<Arc<dyn ActiveMapObserver>>>,
}

impl ConditionMapStore {
    pub fn new(
        settings: Arc<dyn SettingsStorePort>,
        default_maps: Arc<dyn DefaultMapSourcePort>,
        config: ModuleConfig,
    ) -> Self {
        Self {
            settings,
            default_maps,
            config,
            mirror: RwLock::new(None),
            observer: RwLock::new(None),
        }
    }

    /// Register the observer called after each successful save
    pub async fn set_observer(&self, observer: Arc<dyn ActiveMapObserver>) {
        *self.observer.write().await = Some(observer);
    }

    /// Read the persisted map for a system.
    ///
    /// An absent key yields an empty map. A malformed value also yields an
    /// empty map with a logged warning; only backend failures propagate.
    #[instrument(skip(self))]
    pub async fn load_active_map(&self, system_id: &str) -> Result<ConditionMap, SettingsError> {
        let key = keys::active_map(system_id);
        let Some(raw) = self.settings.get(&key).await? else {
            return Ok(ConditionMap::empty(system_id, MapType::OtherImported));
        };

        match serde_json::from_value::<MapFile>(raw) {
            Ok(MapFile::Tagged(map)) => Ok(map),
            Ok(MapFile::Entries(entries)) => {
                Ok(ConditionMap::new(system_id, MapType::SystemCustom, entries))
            }
            Err(err) => {
                warn!(system = system_id, error = %err, "persisted condition map is malformed, treating as empty");
                Ok(ConditionMap::empty(system_id, MapType::OtherImported))
            }
        }
    }

    /// Persist the full map, update the mirror, then notify the observer.
    ///
    /// Entry ids must be unique within a map; a later entry reusing an
    /// earlier id gets a fresh suffixed id derived from its name before
    /// anything is persisted or synchronized.
    ///
    /// The mirror keeps the new map even when the observer fails: the save
    /// itself succeeded, and the caller is told why the host registry is
    /// out of step.
    #[instrument(skip(self, map), fields(system = %map.system_id, conditions = map.len()))]
    pub async fn save_active_map(&self, map: &ConditionMap) -> Result<()> {
        let map = &Self::dedup_entry_ids(map);
        let value = serde_json::to_value(map).map_err(SettingsError::from)?;
        self.settings
            .set(&keys::active_map(&map.system_id), value)
            .await
            .context("persisting active condition map")?;

        *self.mirror.write().await = Some(map.clone());
        debug!(system = %map.system_id, "active condition map saved");

        let observer = self.observer.read().await.clone();
        if let Some(observer) = observer {
            observer
                .on_active_map_changed(map)
                .await
                .context("synchronizing saved condition map")?;
        }
        Ok(())
    }

    fn dedup_entry_ids(map: &ConditionMap) -> ConditionMap {
        let mut seen: Vec<String> = Vec::with_capacity(map.len());
        let mut conditions = Vec::with_capacity(map.len());
        for entry in &map.conditions {
            let mut entry = entry.clone();
            if entry.id.is_empty() || seen.contains(&entry.id) {
                entry.id = generate_unique_slug_id(&entry.name, &seen);
            }
            seen.push(entry.id.clone());
            conditions.push(entry);
        }
        ConditionMap::new(map.system_id.clone(), map.map_type, conditions)
    }

    /// Delete the persisted map for a system and drop the mirror
    #[instrument(skip(self))]
    pub async fn clear_active_map(&self, system_id: &str) -> Result<(), SettingsError> {
        self.settings.remove(&keys::active_map(system_id)).await?;
        *self.mirror.write().await = None;
        Ok(())
    }

    /// Cheap clone of the last saved map
    pub async fn active_map(&self) -> Option<ConditionMap> {
        self.mirror.read().await.clone()
    }

    /// Bundled default maps, keyed by system id
    pub async fn load_default_maps(&self) -> Result<std::collections::HashMap<String, ConditionMap>> {
        self.default_maps.load_default_maps().await
    }

    /// Parse an externally supplied map file and make it the active map.
    ///
    /// A parse failure leaves the store untouched. Imported entries are
    /// normalized: missing names come from the icon filename, missing or
    /// colliding ids are regenerated from the name, missing icons get a
    /// placeholder under the module icon path.
    #[instrument(skip(self, json))]
    pub async fn import_map(&self, system_id: &str, json: &str) -> Result<ConditionMap, ImportError> {
        let file: MapFile = serde_json::from_str(json)?;
        let entries = match file {
            MapFile::Tagged(map) => map.conditions,
            MapFile::Entries(entries) => entries,
        };
        if entries.is_empty() {
            return Err(ImportError::Empty);
        }

        let mut map = ConditionMap::empty(system_id, MapType::OtherImported);
        for mut entry in entries {
            if entry.name.is_empty() {
                entry.name = name_from_file_path(&entry.icon)
                    .unwrap_or_else(|| "Unknown Condition".to_string());
            }
            let taken = map.ids();
            if entry.id.is_empty() || taken.contains(&entry.id) {
                entry.id = generate_unique_slug_id(&entry.name, &taken);
            }
            if entry.icon.is_empty() {
                entry.icon = format!("{}{}.svg", self.config.icon_path, entry.id);
            }
            // Host effect instances never survive an import
            entry.active_effect_id = None;
            map.conditions.push(entry);
        }

        self.save_active_map(&map).await?;
        Ok(map)
    }

    /// Pretty JSON of the active map, for download by the host UI
    pub async fn export_map(&self) -> Option<String> {
        let map = self.mirror.read().await.clone()?;
        serde_json::to_string_pretty(&map).ok()
    }
}
