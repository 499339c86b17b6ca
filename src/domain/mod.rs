//! Domain layer - Core condition-map model with no external collaborators
//!
//! This layer contains:
//! - Entities: ConditionEntry, ConditionMap
//! - Value Objects: game system descriptors, special status slots, module config
//! - Domain Services: slug and id generation

pub mod entities;
pub mod services;
pub mod value_objects;
