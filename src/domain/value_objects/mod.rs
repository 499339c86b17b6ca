//! Value objects - Immutable objects defined by their attributes

mod game_system;
mod module_config;
mod special_status;

pub use game_system::{
    is_known_system, resolve_system, system_choices, GameSystemDescriptor, KNOWN_GAME_SYSTEMS,
    OTHER_SYSTEM,
};
pub use module_config::ModuleConfig;
pub use special_status::{SpecialStatusMapping, SpecialStatusSlot};
