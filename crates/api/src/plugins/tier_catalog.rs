//! Tier catalog plugin.
//!
//! Serves the subscription tier catalog and the per-partner access
//! resolution derived from it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use partner_portal_core::adapters::DatabaseAdapter;
use partner_portal_core::entity::PortalPartner;
use partner_portal_core::tier::{PartnerAccess, PricingTier};
use partner_portal_core::types::{HttpMethod, PortalRequest, PortalResponse};
use partner_portal_core::{PortalContext, PortalPlugin, PortalResult, PortalRoute};

#[derive(Debug, Serialize, Deserialize)]
pub struct TierListResponse {
    pub tiers: Vec<PricingTier>,
}

/// Serves `GET /tiers` and `GET /tiers/access`.
#[derive(Debug, Clone, Default)]
pub struct TierCatalogPlugin;

impl TierCatalogPlugin {
    pub fn new() -> Self {
        Self
    }

    /// `GET /tiers`
    ///
    /// Active tiers only, ascending by rank. The catalog is public; no
    /// authentication required.
    async fn handle_list_tiers<DB: DatabaseAdapter>(
        &self,
        ctx: &PortalContext<DB>,
    ) -> PortalResult<PortalResponse> {
        let mut tiers: Vec<PricingTier> = ctx
            .database
            .list_tiers()
            .await?
            .into_iter()
            .filter(|t| t.active)
            .collect();
        tiers.sort_by_key(|t| t.rank());

        Ok(PortalResponse::json(200, &TierListResponse { tiers })?)
    }

    /// `GET /tiers/access`
    async fn handle_access<DB: DatabaseAdapter>(
        &self,
        req: &PortalRequest,
        ctx: &PortalContext<DB>,
    ) -> PortalResult<PortalResponse> {
        let partner = ctx.require_partner(req).await?;
        let access = PartnerAccess::resolve(partner.pricing_tier());
        Ok(PortalResponse::json(200, &access)?)
    }
}

#[async_trait]
impl<DB: DatabaseAdapter> PortalPlugin<DB> for TierCatalogPlugin {
    fn name(&self) -> &'static str {
        "tier-catalog"
    }

    fn routes(&self) -> Vec<PortalRoute> {
        vec![PortalRoute::get("/tiers"), PortalRoute::get("/tiers/access")]
    }

    async fn on_request(
        &self,
        req: &PortalRequest,
        ctx: &PortalContext<DB>,
    ) -> PortalResult<Option<PortalResponse>> {
        match (req.method(), req.path()) {
            (HttpMethod::Get, "/tiers") => Ok(Some(self.handle_list_tiers(ctx).await?)),
            (HttpMethod::Get, "/tiers/access") => Ok(Some(self.handle_access(req, ctx).await?)),
            _ => Ok(None),
        }
    }
}
