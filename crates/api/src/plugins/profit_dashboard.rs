//! Profit dashboard plugin.
//!
//! Serves cost/profit breakdowns computed from the partner's raw period
//! figures. The endpoint is tier-gated: only partners whose tier grants the
//! profit dashboard may call it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use partner_portal_core::adapters::DatabaseAdapter;
use partner_portal_core::entity::PortalPartner;
use partner_portal_core::profit::{ProfitBreakdown, ProfitCalculator};
use partner_portal_core::tier::{PartnerAccess, min_tier_for_feature};
use partner_portal_core::types::{HttpMethod, PortalRequest, PortalResponse};
use partner_portal_core::{PortalContext, PortalError, PortalPlugin, PortalResult, PortalRoute};

use super::helpers::opt_query;

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfitBreakdownResponse {
    pub breakdowns: Vec<ProfitBreakdown>,
    pub currency: String,
}

/// Serves `GET /profit/breakdown`.
#[derive(Debug, Clone, Default)]
pub struct ProfitDashboardPlugin;

impl ProfitDashboardPlugin {
    pub fn new() -> Self {
        Self
    }

    /// `GET /profit/breakdown?period=&marketplace=`
    async fn handle_breakdown<DB: DatabaseAdapter>(
        &self,
        req: &PortalRequest,
        ctx: &PortalContext<DB>,
    ) -> PortalResult<PortalResponse> {
        let partner = ctx.require_partner(req).await?;

        let access = PartnerAccess::resolve(partner.pricing_tier());
        if !access.profit_dashboard {
            let required = min_tier_for_feature("profit");
            return Err(PortalError::forbidden(format!(
                "Profit dashboard requires the {} tier or higher",
                required
            )));
        }

        let period = opt_query(req, "period");
        let marketplace = opt_query(req, "marketplace");
        let figures = ctx
            .database
            .list_period_figures(partner.id(), period, marketplace)
            .await?;

        let calculator = ProfitCalculator::new(ctx.config.cost_model.clone());
        let breakdowns = calculator.breakdowns(&figures);

        ctx.config.logger.debug(&format!(
            "profit breakdown for partner {}: {} record(s)",
            partner.id(),
            breakdowns.len()
        ));

        Ok(PortalResponse::json(
            200,
            &ProfitBreakdownResponse {
                breakdowns,
                currency: ctx.config.currency.clone(),
            },
        )?)
    }
}

#[async_trait]
impl<DB: DatabaseAdapter> PortalPlugin<DB> for ProfitDashboardPlugin {
    fn name(&self) -> &'static str {
        "profit-dashboard"
    }

    fn routes(&self) -> Vec<PortalRoute> {
        vec![PortalRoute::get("/profit/breakdown")]
    }

    async fn on_request(
        &self,
        req: &PortalRequest,
        ctx: &PortalContext<DB>,
    ) -> PortalResult<Option<PortalResponse>> {
        match (req.method(), req.path()) {
            (HttpMethod::Get, "/profit/breakdown") => {
                Ok(Some(self.handle_breakdown(req, ctx).await?))
            }
            _ => Ok(None),
        }
    }
}
