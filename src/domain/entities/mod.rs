//! Condition entities

mod condition;
mod condition_map;

pub use condition::{
    ConditionEntry, ConditionOptions, ConditionReference, EffectChange, EffectData, ReferenceType,
};
pub use condition_map::{ConditionMap, MapType};
