//! Tier upgrade workflow plugin.
//!
//! Partners submit requests to move to a higher tier; admins approve or
//! reject them. Approval writes the new tier onto the partner record, which
//! immediately changes what the access resolver grants.

use async_trait::async_trait;

use partner_portal_core::adapters::DatabaseAdapter;
use partner_portal_core::types::{HttpMethod, PortalRequest, PortalResponse};
use partner_portal_core::{PortalContext, PortalPlugin, PortalResult, PortalRoute};

pub(super) mod handlers;
pub(super) mod types;


use handlers::*;
use types::*;

use super::helpers::{localized_message, opt_query};

/// Configuration for the [`UpgradePlugin`].
#[derive(Debug, Clone)]
pub struct UpgradeConfig {
    /// Whether the `/admin/tier-upgrades` endpoints are served. Disable when
    /// decisions are made through a separate back office. Default: `true`.
    pub admin_endpoints: bool,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            admin_endpoints: true,
        }
    }
}

/// Tier upgrade request workflow plugin.
pub struct UpgradePlugin {
    config: UpgradeConfig,
}

impl UpgradePlugin {
    pub fn new() -> Self {
        Self {
            config: UpgradeConfig::default(),
        }
    }

    pub fn with_config(config: UpgradeConfig) -> Self {
        Self { config }
    }

    pub fn admin_endpoints(mut self, enabled: bool) -> Self {
        self.config.admin_endpoints = enabled;
        self
    }
}

impl Default for UpgradePlugin {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Route handlers (delegate to core functions)
// ---------------------------------------------------------------------------

impl UpgradePlugin {
    /// `POST /tier-upgrade`
    async fn handle_submit<DB: DatabaseAdapter>(
        &self,
        req: &PortalRequest,
        ctx: &PortalContext<DB>,
    ) -> PortalResult<PortalResponse> {
        let partner = ctx.require_partner(req).await?;
        let body: SubmitUpgradeRequest = match partner_portal_core::validate_request_body(req) {
            Ok(v) => v,
            Err(resp) => return Ok(resp),
        };
        let request = submit_upgrade_core(&body, &partner, ctx).await?;
        let message = localized_message(req, ctx, "upgrade.submitted");
        Ok(PortalResponse::json(
            201,
            &SubmitUpgradeResponse { request, message },
        )?)
    }

    /// `GET /tier-upgrade/targets`
    async fn handle_targets<DB: DatabaseAdapter>(
        &self,
        req: &PortalRequest,
        ctx: &PortalContext<DB>,
    ) -> PortalResult<PortalResponse> {
        let partner = ctx.require_partner(req).await?;
        let response = upgrade_targets_core(&partner, ctx).await?;
        Ok(PortalResponse::json(200, &response)?)
    }

    /// `GET /tier-upgrade/list`
    async fn handle_list_own<DB: DatabaseAdapter>(
        &self,
        req: &PortalRequest,
        ctx: &PortalContext<DB>,
    ) -> PortalResult<PortalResponse> {
        let partner = ctx.require_partner(req).await?;
        let requests = list_own_core(&partner, ctx).await?;
        Ok(PortalResponse::json(200, &UpgradeListResponse { requests })?)
    }

    /// `GET /admin/tier-upgrades?status=`
    async fn handle_admin_list<DB: DatabaseAdapter>(
        &self,
        req: &PortalRequest,
        ctx: &PortalContext<DB>,
    ) -> PortalResult<PortalResponse> {
        ctx.require_admin(req).await?;
        let requests = admin_list_core(opt_query(req, "status"), ctx).await?;
        Ok(PortalResponse::json(200, &UpgradeListResponse { requests })?)
    }

    /// `POST /admin/tier-upgrades/respond`
    async fn handle_respond<DB: DatabaseAdapter>(
        &self,
        req: &PortalRequest,
        ctx: &PortalContext<DB>,
    ) -> PortalResult<PortalResponse> {
        let admin = ctx.require_admin(req).await?;
        let body: RespondUpgradeRequest = match partner_portal_core::validate_request_body(req) {
            Ok(v) => v,
            Err(resp) => return Ok(resp),
        };
        let request = respond_core(&body, &admin, ctx).await?;
        Ok(PortalResponse::json(
            200,
            &RespondUpgradeResponse {
                request,
                status: true,
            },
        )?)
    }
}

// ---------------------------------------------------------------------------
// PortalPlugin implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl<DB: DatabaseAdapter> PortalPlugin<DB> for UpgradePlugin {
    fn name(&self) -> &'static str {
        "tier-upgrade"
    }

    fn routes(&self) -> Vec<PortalRoute> {
        let mut routes = vec![
            PortalRoute::post("/tier-upgrade"),
            PortalRoute::get("/tier-upgrade/targets"),
            PortalRoute::get("/tier-upgrade/list"),
        ];
        if self.config.admin_endpoints {
            routes.push(PortalRoute::get("/admin/tier-upgrades"));
            routes.push(PortalRoute::post("/admin/tier-upgrades/respond"));
        }
        routes
    }

    async fn on_request(
        &self,
        req: &PortalRequest,
        ctx: &PortalContext<DB>,
    ) -> PortalResult<Option<PortalResponse>> {
        match (req.method(), req.path()) {
            (HttpMethod::Post, "/tier-upgrade") => Ok(Some(self.handle_submit(req, ctx).await?)),
            (HttpMethod::Get, "/tier-upgrade/targets") => {
                Ok(Some(self.handle_targets(req, ctx).await?))
            }
            (HttpMethod::Get, "/tier-upgrade/list") => {
                Ok(Some(self.handle_list_own(req, ctx).await?))
            }
            (HttpMethod::Get, "/admin/tier-upgrades") if self.config.admin_endpoints => {
                Ok(Some(self.handle_admin_list(req, ctx).await?))
            }
            (HttpMethod::Post, "/admin/tier-upgrades/respond") if self.config.admin_endpoints => {
                Ok(Some(self.handle_respond(req, ctx).await?))
            }
            _ => Ok(None),
        }
    }
}
