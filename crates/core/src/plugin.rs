use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::adapters::DatabaseAdapter;
use crate::config::PortalConfig;
use crate::entity::PortalPartner;
use crate::error::{PortalError, PortalResult};
use crate::types::{HttpMethod, PortalRequest, PortalResponse};

/// Plugin trait that all portal feature plugins implement.
///
/// Generic over `DB` so that handlers receive the adapter's concrete entity
/// types (e.g., `DB::Partner`).
#[async_trait]
pub trait PortalPlugin<DB: DatabaseAdapter>: Send + Sync {
    /// Plugin name - should be unique
    fn name(&self) -> &'static str;

    /// Routes that this plugin handles
    fn routes(&self) -> Vec<PortalRoute>;

    /// Called when the plugin is initialized
    async fn on_init(&self, ctx: &mut PortalContext<DB>) -> PortalResult<()> {
        let _ = ctx;
        Ok(())
    }

    /// Called for each request - return Some(response) to handle, None to pass through
    async fn on_request(
        &self,
        req: &PortalRequest,
        ctx: &PortalContext<DB>,
    ) -> PortalResult<Option<PortalResponse>>;
}

/// Route definition for plugins
#[derive(Debug, Clone)]
pub struct PortalRoute {
    pub path: String,
    pub method: HttpMethod,
}

impl PortalRoute {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }
}

/// Context passed to plugin methods
pub struct PortalContext<DB: DatabaseAdapter> {
    pub config: Arc<PortalConfig>,
    pub database: Arc<DB>,
    pub metadata: HashMap<String, serde_json::Value>,
}

impl<DB: DatabaseAdapter> PortalContext<DB> {
    pub fn new(config: Arc<PortalConfig>, database: Arc<DB>) -> Self {
        Self {
            config,
            database,
            metadata: HashMap::new(),
        }
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.metadata.insert(key.into(), value);
    }

    pub fn get_metadata(&self, key: &str) -> Option<&serde_json::Value> {
        self.metadata.get(key)
    }

    /// Resolve the partner identified by the request's Bearer token.
    ///
    /// Authentication proper is an external collaborator; partners present a
    /// static per-account API token on every call.
    pub async fn require_partner(&self, req: &PortalRequest) -> PortalResult<DB::Partner> {
        let token = req
            .headers
            .get("authorization")
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(PortalError::Unauthenticated)?;

        self.database
            .get_partner_by_token(token)
            .await?
            .ok_or(PortalError::Unauthenticated)
    }

    /// Like [`require_partner`](Self::require_partner), but the partner must
    /// carry the `admin` role.
    pub async fn require_admin(&self, req: &PortalRequest) -> PortalResult<DB::Partner> {
        let partner = self.require_partner(req).await?;
        if !partner.is_admin() {
            return Err(PortalError::forbidden("Admin access required"));
        }
        Ok(partner)
    }
}

impl<DB: DatabaseAdapter> Clone for PortalContext<DB> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            database: self.database.clone(),
            metadata: self.metadata.clone(),
        }
    }
}
