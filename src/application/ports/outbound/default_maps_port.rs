//! Default map source port - bundled per-system reference maps

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::ConditionMap;

/// Read-only source of the default condition maps shipped per known system.
///
/// Returned maps are templates: callers clone before mutating, and the
/// source must hand out independent copies on every load.
#[async_trait]
pub trait DefaultMapSourcePort: Send + Sync {
    async fn load_default_maps(&self) -> Result<HashMap<String, ConditionMap>>;
}
