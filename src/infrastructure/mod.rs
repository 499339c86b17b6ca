//! Infrastructure layer - Reference adapters and bundled data
//!
//! Hosts embedding the engine implement the outbound ports against their
//! own runtime; the in-memory adapters here back tests and standalone use.

mod default_maps;
mod registry;
mod settings;
mod token_effects;

pub use default_maps::BundledDefaultMaps;
pub use registry::MemoryStatusRegistry;
pub use settings::MemorySettingsStore;
pub use token_effects::MemoryTokenEffects;
