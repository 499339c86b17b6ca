//! Application services - Use case implementations
//!
//! Each service follows hexagonal architecture principles, accepting its
//! host-side collaborators as injected port dependencies.

pub mod condition_api;
pub mod engine;
pub mod map_store;
pub mod resolution;
pub mod sync;

pub use condition_api::{AddConditionOptions, ConditionApi, ConditionError};
pub use engine::{ConditionsEngine, EngineStatus};
pub use map_store::{ActiveMapObserver, ConditionMapStore, ImportError};
pub use resolution::{MapResolutionService, ResolvedMap};
pub use sync::SynchronizationService;
