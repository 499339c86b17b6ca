//! Token condition API - the surface host UI and macros call
//!
//! Every operation works against the currently resolved condition map and
//! the host's per-token effect documents. Applied effects are matched back
//! to map entries through the condition-id flag, never by display name.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::ports::outbound::{
    AppliedEffect, StatusEffectDescriptor, TokenEffectsError, TokenEffectsPort, TokenRef,
};
use crate::domain::entities::ConditionEntry;

use super::map_store::ConditionMapStore;

#[derive(Debug, thiserror::Error)]
pub enum ConditionError {
    #[error("no active condition map; the engine has not synchronized yet")]
    NoActiveMap,
    #[error("condition not found in the active map: {0}")]
    NotFound(String),
    #[error(transparent)]
    TokenEffects(#[from] TokenEffectsError),
}

/// Behavior when the token already carries the condition
#[derive(Debug, Clone, Copy, Default)]
pub struct AddConditionOptions {
    /// Apply a second instance instead of skipping
    pub allow_duplicates: bool,
    /// Remove existing instances before applying
    pub replace_existing: bool,
}

/// Public condition operations over the resolved map and host token effects
pub struct ConditionApi {
    store: Arc<ConditionMapStore>,
    token_effects: Arc<dyn TokenEffectsPort>,
}

impl ConditionApi {
    pub fn new(store: Arc<ConditionMapStore>, token_effects: Arc<dyn TokenEffectsPort>) -> Self {
        Self {
            store,
            token_effects,
        }
    }

    /// Look up a condition in the active map by id or display name
    pub async fn get_condition(&self, name_or_id: &str) -> Option<ConditionEntry> {
        let map = self.store.active_map().await?;
        map.find(name_or_id).cloned()
    }

    /// Conditions currently applied to the token, in map order
    pub async fn get_conditions(
        &self,
        token: &TokenRef,
    ) -> Result<Vec<ConditionEntry>, ConditionError> {
        let map = self.store.active_map().await.ok_or(ConditionError::NoActiveMap)?;
        let applied = self.token_effects.applied_effects(token).await?;

        Ok(map
            .conditions
            .iter()
            .filter(|entry| applied.iter().any(|e| e.condition_id == entry.id))
            .cloned()
            .collect())
    }

    /// Raw applied-effect documents on the token
    pub async fn get_condition_effects(
        &self,
        token: &TokenRef,
    ) -> Result<Vec<AppliedEffect>, ConditionError> {
        Ok(self.token_effects.applied_effects(token).await?)
    }

    /// Whether the token currently carries the named condition
    pub async fn has_condition(
        &self,
        token: &TokenRef,
        name_or_id: &str,
    ) -> Result<bool, ConditionError> {
        let Some(entry) = self.get_condition(name_or_id).await else {
            return Ok(false);
        };
        let applied = self.token_effects.applied_effects(token).await?;
        Ok(applied.iter().any(|e| e.condition_id == entry.id))
    }

    /// Apply the named condition to the token
    #[instrument(skip(self))]
    pub async fn add_condition(
        &self,
        token: &TokenRef,
        name_or_id: &str,
        options: AddConditionOptions,
    ) -> Result<(), ConditionError> {
        let map = self.store.active_map().await.ok_or(ConditionError::NoActiveMap)?;
        let entry = map
            .find(name_or_id)
            .ok_or_else(|| ConditionError::NotFound(name_or_id.to_string()))?;

        let applied = self.token_effects.applied_effects(token).await?;
        let existing: Vec<String> = applied
            .iter()
            .filter(|e| e.condition_id == entry.id)
            .map(|e| e.effect_id.clone())
            .collect();

        if !existing.is_empty() {
            if options.replace_existing {
                self.token_effects.remove_effects(token, &existing).await?;
            } else if !options.allow_duplicates {
                debug!(token = %token, condition = %entry.id, "condition already present, skipping");
                return Ok(());
            }
        }

        let descriptor = StatusEffectDescriptor::from_condition(entry);
        self.token_effects.apply_effect(token, &descriptor).await?;
        Ok(())
    }

    /// Apply one condition to several tokens
    pub async fn apply_condition(
        &self,
        tokens: &[TokenRef],
        name_or_id: &str,
    ) -> Result<(), ConditionError> {
        for token in tokens {
            self.add_condition(token, name_or_id, AddConditionOptions::default())
                .await?;
        }
        Ok(())
    }

    /// Remove every instance of the named condition from the token
    #[instrument(skip(self))]
    pub async fn remove_condition(
        &self,
        token: &TokenRef,
        name_or_id: &str,
    ) -> Result<(), ConditionError> {
        let map = self.store.active_map().await.ok_or(ConditionError::NoActiveMap)?;
        let entry = map
            .find(name_or_id)
            .ok_or_else(|| ConditionError::NotFound(name_or_id.to_string()))?;

        let applied = self.token_effects.applied_effects(token).await?;
        let matching: Vec<String> = applied
            .iter()
            .filter(|e| e.condition_id == entry.id)
            .map(|e| e.effect_id.clone())
            .collect();

        if matching.is_empty() {
            debug!(token = %token, condition = %entry.id, "condition not present, nothing removed");
            return Ok(());
        }
        self.token_effects.remove_effects(token, &matching).await?;
        Ok(())
    }

    /// Remove every effect on the token that maps back to an active condition
    #[instrument(skip(self))]
    pub async fn remove_all_conditions(&self, token: &TokenRef) -> Result<(), ConditionError> {
        let map = self.store.active_map().await.ok_or(ConditionError::NoActiveMap)?;
        let applied = self.token_effects.applied_effects(token).await?;

        let matching: Vec<String> = applied
            .iter()
            .filter(|e| map.get(&e.condition_id).is_some())
            .map(|e| e.effect_id.clone())
            .collect();

        if !matching.is_empty() {
            self.token_effects.remove_effects(token, &matching).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ConditionMap, MapType};
    use crate::domain::value_objects::ModuleConfig;
    use crate::infrastructure::{BundledDefaultMaps, MemorySettingsStore, MemoryTokenEffects};

    async fn api_with_map() -> (ConditionApi, Arc<MemoryTokenEffects>, TokenRef) {
        let store = Arc::new(ConditionMapStore::new(
            Arc::new(MemorySettingsStore::new()),
            Arc::new(BundledDefaultMaps),
            ModuleConfig::new("dnd5e"),
        ));
        let map = ConditionMap::new(
            "dnd5e",
            MapType::SystemCustom,
            vec![
                ConditionEntry::new("prone", "Prone", "icons/svg/falling.svg"),
                ConditionEntry::new("blinded", "Blinded", "icons/svg/blind.svg"),
            ],
        );
        store.save_active_map(&map).await.unwrap();

        let token_effects = Arc::new(MemoryTokenEffects::new());
        let token = TokenRef::new("token-1");
        token_effects.add_token(token.clone()).await;

        (
            ConditionApi::new(store, token_effects.clone()),
            token_effects,
            token,
        )
    }

    #[tokio::test]
    async fn test_add_and_has_condition() {
        let (api, _, token) = api_with_map().await;

        assert!(!api.has_condition(&token, "Prone").await.unwrap());
        api.add_condition(&token, "Prone", AddConditionOptions::default())
            .await
            .unwrap();
        assert!(api.has_condition(&token, "prone").await.unwrap());
    }

    #[tokio::test]
    async fn test_add_unknown_condition_fails() {
        let (api, _, token) = api_with_map().await;
        let err = api
            .add_condition(&token, "Petrified", AddConditionOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ConditionError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_duplicate_add_is_a_noop_by_default() {
        let (api, effects, token) = api_with_map().await;

        api.add_condition(&token, "Prone", AddConditionOptions::default())
            .await
            .unwrap();
        api.add_condition(&token, "Prone", AddConditionOptions::default())
            .await
            .unwrap();
        assert_eq!(effects.applied_effects(&token).await.unwrap().len(), 1);

        api.add_condition(
            &token,
            "Prone",
            AddConditionOptions {
                allow_duplicates: true,
                ..AddConditionOptions::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(effects.applied_effects(&token).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_replace_existing_swaps_the_instance() {
        let (api, effects, token) = api_with_map().await;

        api.add_condition(&token, "Prone", AddConditionOptions::default())
            .await
            .unwrap();
        let before = effects.applied_effects(&token).await.unwrap();

        api.add_condition(
            &token,
            "Prone",
            AddConditionOptions {
                replace_existing: true,
                ..AddConditionOptions::default()
            },
        )
        .await
        .unwrap();

        let after = effects.applied_effects(&token).await.unwrap();
        assert_eq!(after.len(), 1);
        assert_ne!(after[0].effect_id, before[0].effect_id);
    }

    #[tokio::test]
    async fn test_get_conditions_returns_map_entries_in_order() {
        let (api, _, token) = api_with_map().await;

        api.add_condition(&token, "Blinded", AddConditionOptions::default())
            .await
            .unwrap();
        api.add_condition(&token, "Prone", AddConditionOptions::default())
            .await
            .unwrap();

        let conditions = api.get_conditions(&token).await.unwrap();
        let ids: Vec<&str> = conditions.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["prone", "blinded"]);
    }

    #[tokio::test]
    async fn test_apply_condition_fans_out_over_tokens() {
        let (api, effects, token) = api_with_map().await;
        let second = TokenRef::new("token-2");
        effects.add_token(second.clone()).await;

        api.apply_condition(&[token.clone(), second.clone()], "Blinded")
            .await
            .unwrap();

        assert!(api.has_condition(&token, "Blinded").await.unwrap());
        assert!(api.has_condition(&second, "Blinded").await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_condition_and_remove_all() {
        let (api, effects, token) = api_with_map().await;

        api.add_condition(&token, "Prone", AddConditionOptions::default())
            .await
            .unwrap();
        api.add_condition(&token, "Blinded", AddConditionOptions::default())
            .await
            .unwrap();

        api.remove_condition(&token, "Prone").await.unwrap();
        assert!(!api.has_condition(&token, "Prone").await.unwrap());
        assert!(api.has_condition(&token, "Blinded").await.unwrap());

        // Removing again is a quiet no-op
        api.remove_condition(&token, "Prone").await.unwrap();

        api.remove_all_conditions(&token).await.unwrap();
        assert!(effects.applied_effects(&token).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_token_surfaces_host_error() {
        let (api, _, _) = api_with_map().await;
        let ghost = TokenRef::new("ghost");
        let err = api.get_conditions(&ghost).await.unwrap_err();
        assert!(matches!(
            err,
            ConditionError::TokenEffects(TokenEffectsError::TokenNotFound(_))
        ));
    }
}
