//! Condition map - the ordered condition set active for a game system

use serde::{Deserialize, Serialize};

use super::condition::ConditionEntry;

/// How the active map was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapType {
    /// Bundled default map for the active system
    #[serde(rename = "default")]
    SystemDefault,
    /// User-edited variant of a system map
    #[serde(rename = "custom")]
    SystemCustom,
    /// Imported or built from scratch for an unsupported system
    #[serde(rename = "other")]
    OtherImported,
}

impl MapType {
    /// Display label matching the original module's map-type choices
    pub fn label(&self) -> &'static str {
        match self {
            MapType::SystemDefault => "System - Default",
            MapType::SystemCustom => "System - Custom",
            MapType::OtherImported => "Other/Imported",
        }
    }
}

/// Ordered sequence of condition entries for one system.
///
/// Order is significant: it controls on-screen icon ordering after
/// synchronization. Maps are replaced wholesale, never partially mutated
/// through shared references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionMap {
    pub system_id: String,
    pub map_type: MapType,
    pub conditions: Vec<ConditionEntry>,
}

impl ConditionMap {
    pub fn new(
        system_id: impl Into<String>,
        map_type: MapType,
        conditions: Vec<ConditionEntry>,
    ) -> Self {
        Self {
            system_id: system_id.into(),
            map_type,
            conditions,
        }
    }

    /// An empty map awaiting population via import or editing
    pub fn empty(system_id: impl Into<String>, map_type: MapType) -> Self {
        Self::new(system_id, map_type, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Look up an entry by its stable id
    pub fn get(&self, id: &str) -> Option<&ConditionEntry> {
        self.conditions.iter().find(|c| c.id == id)
    }

    /// Look up an entry by display name, case-insensitively
    pub fn get_by_name(&self, name: &str) -> Option<&ConditionEntry> {
        self.conditions
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Look up by id first, then by name
    pub fn find(&self, name_or_id: &str) -> Option<&ConditionEntry> {
        self.get(name_or_id).or_else(|| self.get_by_name(name_or_id))
    }

    /// Ids of every entry, in map order
    pub fn ids(&self) -> Vec<String> {
        self.conditions.iter().map(|c| c.id.clone()).collect()
    }
}
