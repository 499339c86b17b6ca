//! Special status slots - semantic roles host rules query by id
//!
//! The host cares which condition counts as "blinded" or "invisible"
//! regardless of what the condition is named. The mapping is derived from
//! the active map on every resolution, so renames and deletions can never
//! leave a slot pointing at an id that no longer exists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{ConditionMap, ConditionOptions};

/// Well-known semantic slots recognized by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpecialStatusSlot {
    Blinded,
    Invisible,
}

impl SpecialStatusSlot {
    pub const ALL: [SpecialStatusSlot; 2] = [SpecialStatusSlot::Blinded, SpecialStatusSlot::Invisible];

    /// Whether a condition's options declare it as filling this slot
    pub fn declared_by(&self, options: &ConditionOptions) -> bool {
        match self {
            SpecialStatusSlot::Blinded => options.blind_token,
            SpecialStatusSlot::Invisible => options.mark_invisible,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialStatusSlot::Blinded => "blinded",
            SpecialStatusSlot::Invisible => "invisible",
        }
    }
}

/// Slot-to-condition-id bindings for the active map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecialStatusMapping(BTreeMap<SpecialStatusSlot, String>);

impl SpecialStatusMapping {
    /// Compute the bindings for a map: the first entry declaring each slot
    /// wins, undeclared slots are absent.
    pub fn derive(map: &ConditionMap) -> Self {
        let mut bindings = BTreeMap::new();
        for slot in SpecialStatusSlot::ALL {
            if let Some(entry) = map.conditions.iter().find(|c| slot.declared_by(&c.options)) {
                bindings.insert(slot, entry.id.clone());
            }
        }
        Self(bindings)
    }

    pub fn get(&self, slot: SpecialStatusSlot) -> Option<&str> {
        self.0.get(&slot).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpecialStatusSlot, &str)> {
        self.0.iter().map(|(slot, id)| (*slot, id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ConditionEntry, MapType};

    fn entry_with(id: &str, options: ConditionOptions) -> ConditionEntry {
        ConditionEntry::new(id, id, format!("icons/{id}.svg")).with_options(options)
    }

    #[test]
    fn test_derive_binds_first_declaring_entry() {
        let map = ConditionMap::new(
            "dnd5e",
            MapType::SystemCustom,
            vec![
                entry_with("prone", ConditionOptions::default()),
                entry_with(
                    "blinded",
                    ConditionOptions {
                        blind_token: true,
                        ..ConditionOptions::default()
                    },
                ),
                entry_with(
                    "eyeless",
                    ConditionOptions {
                        blind_token: true,
                        ..ConditionOptions::default()
                    },
                ),
            ],
        );

        let mapping = SpecialStatusMapping::derive(&map);
        assert_eq!(mapping.get(SpecialStatusSlot::Blinded), Some("blinded"));
        assert_eq!(mapping.get(SpecialStatusSlot::Invisible), None);
    }

    #[test]
    fn test_derive_clears_undeclared_slots() {
        let map = ConditionMap::empty("pf2e", MapType::OtherImported);
        let mapping = SpecialStatusMapping::derive(&map);
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_serializes_as_string_keyed_object() {
        let map = ConditionMap::new(
            "dnd5e",
            MapType::SystemCustom,
            vec![entry_with(
                "invisible",
                ConditionOptions {
                    mark_invisible: true,
                    ..ConditionOptions::default()
                },
            )],
        );

        let json = serde_json::to_value(SpecialStatusMapping::derive(&map)).unwrap();
        assert_eq!(json["invisible"], "invisible");
    }
}
