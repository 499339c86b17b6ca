//! Token effects port - per-token active-effect documents
//!
//! Applying a condition means asking the host to create an active-effect
//! document on a token, flagged with the originating condition id so the
//! effect can be recognized after renames and re-syncs.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::registry_port::StatusEffectDescriptor;

/// Opaque reference to a host token document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenRef(String);

impl TokenRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TokenRef {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// An active-effect document instantiated on a token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedEffect {
    /// Host document id of the effect instance
    pub effect_id: String,
    /// Condition id flag linking the instance back to its map entry
    pub condition_id: String,
    pub overlay: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenEffectsError {
    #[error("token not found: {0}")]
    TokenNotFound(String),
    #[error("host rejected effect update: {0}")]
    Rejected(String),
}

/// Host API for reading and mutating a token's active effects
#[async_trait]
pub trait TokenEffectsPort: Send + Sync {
    /// Effects currently applied to the token, in application order
    async fn applied_effects(&self, token: &TokenRef)
        -> Result<Vec<AppliedEffect>, TokenEffectsError>;

    /// Instantiate an effect on the token, returning the created document
    async fn apply_effect(
        &self,
        token: &TokenRef,
        effect: &StatusEffectDescriptor,
    ) -> Result<AppliedEffect, TokenEffectsError>;

    /// Delete the given effect documents from the token
    async fn remove_effects(
        &self,
        token: &TokenRef,
        effect_ids: &[String],
    ) -> Result<(), TokenEffectsError>;
}
