//! Conditions Engine - condition maps for tabletop token status effects
//!
//! The engine decides which condition-name-to-effect mapping is active for
//! the host's game system, keeps it persisted in the host's world settings,
//! and pushes the resolved set into the host's live status-effect registry:
//! - Resolves the active map per system, with bundled defaults and imports
//! - Synchronizes the host registry and special-status slot bindings
//! - Exposes the token condition API (apply, remove, query)
//!
//! The host runtime provides the settings store, status registry and token
//! effect documents through the outbound ports and drives the engine from
//! its lifecycle hooks.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::ports::outbound::{
    keys, AppliedEffect, DefaultMapSourcePort, RegistryError, SettingsError, SettingsStorePort,
    StatusEffectDescriptor, StatusRegistryPort, TokenEffectsError, TokenEffectsPort, TokenRef,
};
pub use application::services::{
    AddConditionOptions, ConditionApi, ConditionError, ConditionsEngine, EngineStatus, ImportError,
};
pub use domain::entities::{
    ConditionEntry, ConditionMap, ConditionOptions, ConditionReference, EffectChange, EffectData,
    MapType, ReferenceType,
};
pub use domain::value_objects::{
    resolve_system, system_choices, GameSystemDescriptor, ModuleConfig, SpecialStatusMapping,
    SpecialStatusSlot, KNOWN_GAME_SYSTEMS,
};
pub use infrastructure::{
    BundledDefaultMaps, MemorySettingsStore, MemoryStatusRegistry, MemoryTokenEffects,
};
