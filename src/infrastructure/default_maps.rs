//! Bundled default condition maps
//!
//! The JSON assets under `assets/condition-maps/` are compiled into the
//! binary and re-parsed on every load, so each caller gets an independent
//! copy of the template and can never mutate the bundle.

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::application::ports::outbound::DefaultMapSourcePort;
use crate::domain::entities::{ConditionEntry, ConditionMap, MapType};

const DND5E: &str = include_str!("../../assets/condition-maps/dnd5e.json");
const PF1: &str = include_str!("../../assets/condition-maps/pf1.json");
const PF2E: &str = include_str!("../../assets/condition-maps/pf2e.json");

const BUNDLES: &[(&str, &str)] = &[("dnd5e", DND5E), ("pf1", PF1), ("pf2e", PF2E)];

/// Default-map source serving the compiled-in bundles
pub struct BundledDefaultMaps;

#[async_trait]
impl DefaultMapSourcePort for BundledDefaultMaps {
    async fn load_default_maps(&self) -> Result<HashMap<String, ConditionMap>> {
        let mut maps = HashMap::new();
        for (system_id, raw) in BUNDLES {
            let entries: Vec<ConditionEntry> = serde_json::from_str(raw)
                .with_context(|| format!("parsing bundled condition map for {system_id}"))?;
            maps.insert(
                system_id.to_string(),
                ConditionMap::new(*system_id, MapType::SystemDefault, entries),
            );
        }
        Ok(maps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{SpecialStatusMapping, SpecialStatusSlot};

    #[tokio::test]
    async fn test_bundles_parse_and_have_unique_ids() {
        let maps = BundledDefaultMaps.load_default_maps().await.unwrap();
        assert_eq!(maps.len(), 3);

        for (system_id, map) in &maps {
            assert!(!map.is_empty(), "bundle for {system_id} is empty");
            assert_eq!(map.map_type, MapType::SystemDefault);

            let mut ids = map.ids();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), map.len(), "duplicate ids in {system_id} bundle");
        }
    }

    #[tokio::test]
    async fn test_bundles_declare_special_status_slots() {
        let maps = BundledDefaultMaps.load_default_maps().await.unwrap();
        for system_id in ["dnd5e", "pf2e"] {
            let mapping = SpecialStatusMapping::derive(&maps[system_id]);
            assert_eq!(
                mapping.get(SpecialStatusSlot::Blinded),
                Some("blinded"),
                "{system_id} bundle should bind the blinded slot"
            );
            assert_eq!(mapping.get(SpecialStatusSlot::Invisible), Some("invisible"));
        }
    }
}
