//! Known game system descriptors
//!
//! Static reference data about the rule systems the module ships condition
//! maps or attribute paths for. Any system id not in the table resolves to
//! the generic "other" descriptor, so lookups are total.

/// Descriptor for a tabletop rule system the module knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSystemDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    /// Attribute path used for concentration checks, where the system has one
    pub concentration_attribute: Option<&'static str>,
    /// Attribute path to the health/hit point pool
    pub health_attribute: Option<&'static str>,
    /// Attribute path used for initiative rolls
    pub initiative_attribute: Option<&'static str>,
}

/// Fallback descriptor for unrecognized systems
pub const OTHER_SYSTEM: GameSystemDescriptor = GameSystemDescriptor {
    id: "other",
    name: "Custom/Other",
    concentration_attribute: None,
    health_attribute: None,
    initiative_attribute: None,
};

/// All systems with first-class support, excluding the "other" fallback
pub const KNOWN_GAME_SYSTEMS: &[GameSystemDescriptor] = &[
    GameSystemDescriptor {
        id: "dnd5e",
        name: "Dungeons & Dragons 5th Edition",
        concentration_attribute: Some("con"),
        health_attribute: Some("attributes.hp"),
        initiative_attribute: Some("attributes.initiative"),
    },
    GameSystemDescriptor {
        id: "pf1",
        name: "Pathfinder",
        concentration_attribute: None,
        health_attribute: Some("attributes.hp"),
        initiative_attribute: Some("attributes.init.total"),
    },
    GameSystemDescriptor {
        id: "pf2e",
        name: "Pathfinder 2nd Edition",
        concentration_attribute: None,
        health_attribute: Some("attributes.hp"),
        initiative_attribute: Some("attributes.perception"),
    },
    GameSystemDescriptor {
        id: "wfrp4e",
        name: "Warhammer Fantasy Roleplaying Game 4th Edition",
        concentration_attribute: None,
        health_attribute: Some("status.wounds"),
        initiative_attribute: Some("characteristics.i"),
    },
    GameSystemDescriptor {
        id: "archmage",
        name: "13th Age",
        concentration_attribute: None,
        health_attribute: Some("attributes.hp"),
        initiative_attribute: Some("attributes.init.mod"),
    },
    GameSystemDescriptor {
        id: "ironclaw2e",
        name: "Ironclaw Second Edition",
        concentration_attribute: None,
        health_attribute: None,
        initiative_attribute: None,
    },
    GameSystemDescriptor {
        id: "cyberpunk-red-core",
        name: "Cyberpunk Red Core",
        concentration_attribute: None,
        health_attribute: None,
        initiative_attribute: None,
    },
];

/// Resolve a system id to its descriptor, falling back to [`OTHER_SYSTEM`]
pub fn resolve_system(system_id: &str) -> &'static GameSystemDescriptor {
    KNOWN_GAME_SYSTEMS
        .iter()
        .find(|s| s.id == system_id)
        .unwrap_or(&OTHER_SYSTEM)
}

/// Whether the given id names a system with first-class support
pub fn is_known_system(system_id: &str) -> bool {
    KNOWN_GAME_SYSTEMS.iter().any(|s| s.id == system_id)
}

/// (id, display name) pairs for host settings UIs, fallback included last
pub fn system_choices() -> Vec<(&'static str, &'static str)> {
    KNOWN_GAME_SYSTEMS
        .iter()
        .map(|s| (s.id, s.name))
        .chain(std::iter::once((OTHER_SYSTEM.id, OTHER_SYSTEM.name)))
        .collect()
}
