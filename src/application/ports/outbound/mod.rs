//! Outbound ports - Interfaces the engine requires from the host runtime

mod default_maps_port;
mod registry_port;
mod settings_port;
mod token_effects_port;

pub use default_maps_port::DefaultMapSourcePort;
pub use registry_port::{RegistryError, StatusEffectDescriptor, StatusRegistryPort};
pub use settings_port::{keys, SettingsError, SettingsStorePort};
pub use token_effects_port::{AppliedEffect, TokenEffectsError, TokenEffectsPort, TokenRef};
