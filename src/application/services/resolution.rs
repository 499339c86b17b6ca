//! Map Resolution Engine - decides which condition map is active
//!
//! Precedence: a stored map for the system wins; otherwise a bundled
//! default is cloned when one was requested and exists; otherwise the
//! result is an empty imported-type map the host UI populates via import.
//! Resolution never mutates stored state, so it is idempotent.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, instrument};

use crate::domain::entities::{ConditionMap, MapType};
use crate::domain::value_objects::SpecialStatusMapping;

use super::map_store::ConditionMapStore;

/// A resolved map together with its derived special-status bindings
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMap {
    pub map: ConditionMap,
    pub special_statuses: SpecialStatusMapping,
}

/// Resolves the active condition map for a system
pub struct MapResolutionService {
    store: Arc<ConditionMapStore>,
}

impl MapResolutionService {
    pub fn new(store: Arc<ConditionMapStore>) -> Self {
        Self { store }
    }

    /// Resolve the map to activate for `system_id`.
    ///
    /// `requested` only matters when no map is stored yet; an explicit
    /// reset clears the stored map before calling this.
    #[instrument(skip(self))]
    pub async fn resolve(&self, system_id: &str, requested: MapType) -> Result<ResolvedMap> {
        let stored = self.store.load_active_map(system_id).await?;

        let map = if !stored.is_empty() {
            debug!(system = system_id, "using stored condition map");
            stored
        } else if requested == MapType::SystemDefault {
            match self.store.load_default_maps().await?.remove(system_id) {
                Some(template) => {
                    debug!(system = system_id, "cloning bundled default condition map");
                    // The bundle is a template; the active map is an independent copy
                    ConditionMap::new(system_id, MapType::SystemDefault, template.conditions)
                }
                None => {
                    debug!(system = system_id, "no bundled default, starting empty");
                    ConditionMap::empty(system_id, MapType::OtherImported)
                }
            }
        } else {
            ConditionMap::empty(system_id, MapType::OtherImported)
        };

        let special_statuses = SpecialStatusMapping::derive(&map);
        Ok(ResolvedMap {
            map,
            special_statuses,
        })
    }
}
