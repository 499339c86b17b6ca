//! In-memory token effects
//!
//! Simulates the host's per-token active-effect documents. Effect ids are
//! minted in the host's 16-character alphanumeric style.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::outbound::{
    AppliedEffect, StatusEffectDescriptor, TokenEffectsError, TokenEffectsPort, TokenRef,
};
use crate::domain::services::slug::create_id;

const EFFECT_ID_LENGTH: usize = 16;
const ID_ITERATIONS: usize = 10_000;

/// Host token documents backed by a hash map
#[derive(Default)]
pub struct MemoryTokenEffects {
    tokens: RwLock<HashMap<TokenRef, Vec<AppliedEffect>>>,
}

impl MemoryTokenEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token the host knows about
    pub async fn add_token(&self, token: TokenRef) {
        self.tokens.write().await.entry(token).or_default();
    }
}

#[async_trait]
impl TokenEffectsPort for MemoryTokenEffects {
    async fn applied_effects(
        &self,
        token: &TokenRef,
    ) -> Result<Vec<AppliedEffect>, TokenEffectsError> {
        self.tokens
            .read()
            .await
            .get(token)
            .cloned()
            .ok_or_else(|| TokenEffectsError::TokenNotFound(token.to_string()))
    }

    async fn apply_effect(
        &self,
        token: &TokenRef,
        effect: &StatusEffectDescriptor,
    ) -> Result<AppliedEffect, TokenEffectsError> {
        let mut tokens = self.tokens.write().await;
        let effects = tokens
            .get_mut(token)
            .ok_or_else(|| TokenEffectsError::TokenNotFound(token.to_string()))?;

        let existing_ids: Vec<&str> = effects.iter().map(|e| e.effect_id.as_str()).collect();
        let effect_id = create_id(&existing_ids, EFFECT_ID_LENGTH, ID_ITERATIONS)
            .map_err(|e| TokenEffectsError::Rejected(e.to_string()))?;

        let applied = AppliedEffect {
            effect_id,
            condition_id: effect.id.clone(),
            overlay: effect.overlay,
        };
        effects.push(applied.clone());
        Ok(applied)
    }

    async fn remove_effects(
        &self,
        token: &TokenRef,
        effect_ids: &[String],
    ) -> Result<(), TokenEffectsError> {
        let mut tokens = self.tokens.write().await;
        let effects = tokens
            .get_mut(token)
            .ok_or_else(|| TokenEffectsError::TokenNotFound(token.to_string()))?;
        effects.retain(|e| !effect_ids.contains(&e.effect_id));
        Ok(())
    }
}
