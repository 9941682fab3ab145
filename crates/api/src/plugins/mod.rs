pub mod helpers;
pub mod profit_dashboard;
pub mod registration;
pub mod tier_catalog;
pub mod upgrade;

pub use profit_dashboard::ProfitDashboardPlugin;
pub use registration::RegistrationPlugin;
pub use tier_catalog::TierCatalogPlugin;
pub use upgrade::{UpgradeConfig, UpgradePlugin};

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;
    use std::sync::Arc;

    use partner_portal_core::adapters::{MemoryDatabaseAdapter, PartnerOps};
    use partner_portal_core::entity::PortalPartner;
    use partner_portal_core::types::{CreatePartner, HttpMethod, Partner, PortalRequest};
    use partner_portal_core::{PortalConfig, PortalContext};

    pub fn create_test_context() -> PortalContext<MemoryDatabaseAdapter> {
        let config = PortalConfig::new("http://localhost:3000");
        let database = MemoryDatabaseAdapter::new();
        PortalContext::new(Arc::new(config), Arc::new(database))
    }

    /// Create a context plus a partner on the given tier. Returns the partner
    /// so tests can use its API token.
    pub async fn context_with_partner(
        tier: &str,
    ) -> (PortalContext<MemoryDatabaseAdapter>, Partner) {
        let ctx = create_test_context();
        let partner = ctx
            .database
            .create_partner(
                CreatePartner::new("Test Partner", "partner@example.com")
                    .with_pricing_tier(tier),
            )
            .await
            .unwrap();
        (ctx, partner)
    }

    pub async fn create_admin(ctx: &PortalContext<MemoryDatabaseAdapter>) -> Partner {
        ctx.database
            .create_partner(
                CreatePartner::new("Admin", "admin@example.com").with_role("admin"),
            )
            .await
            .unwrap()
    }

    pub fn authed_request(method: HttpMethod, path: &str, partner: &Partner) -> PortalRequest {
        let mut req = PortalRequest::new(method, path);
        req.headers.insert(
            "authorization".to_string(),
            format!("Bearer {}", partner.api_token()),
        );
        req
    }

    pub fn json_body(req: &mut PortalRequest, body: serde_json::Value) {
        req.body = Some(body.to_string().into_bytes());
    }

    pub fn query(req: &mut PortalRequest, pairs: &[(&str, &str)]) {
        let mut map = HashMap::new();
        for (k, v) in pairs {
            map.insert(k.to_string(), v.to_string());
        }
        req.query = map;
    }

    pub fn body_json(response: &partner_portal_core::PortalResponse) -> serde_json::Value {
        serde_json::from_slice(&response.body).unwrap()
    }
}
