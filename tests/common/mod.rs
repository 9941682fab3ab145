//! Shared test harness for `partner-portal`.
//!
//! Provides request builders, response parsing, and partner lifecycle
//! helpers used across the integration test files.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use partner_portal::adapters::{MemoryDatabaseAdapter, PartnerOps, ProfitOps};
use partner_portal::plugins::{
    ProfitDashboardPlugin, RegistrationPlugin, TierCatalogPlugin, UpgradePlugin,
};
use partner_portal::{
    CreatePartner, HttpMethod, PartnerPortal, PeriodFigures, PortalBuilder, PortalConfig,
    PortalRequest, PortalResponse,
};
use serde_json::Value;

static EMAIL_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a unique email address for testing, avoiding hard-coded collisions.
#[allow(dead_code)]
pub fn unique_email(prefix: &str) -> String {
    let n = EMAIL_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}_{n}@test.com")
}

/// Create a portal with all four plugins and an in-memory adapter.
pub async fn create_test_portal() -> Arc<PartnerPortal<MemoryDatabaseAdapter>> {
    let config = PortalConfig::new("http://localhost:3000");

    Arc::new(
        PortalBuilder::new(config)
            .database(MemoryDatabaseAdapter::new())
            .plugin(TierCatalogPlugin::new())
            .plugin(ProfitDashboardPlugin::new())
            .plugin(UpgradePlugin::new())
            .plugin(RegistrationPlugin::new())
            .build()
            .await
            .expect("Failed to create test portal instance"),
    )
}

/// Create a partner directly through the adapter and return its API token.
#[allow(dead_code)]
pub async fn seed_partner(
    portal: &PartnerPortal<MemoryDatabaseAdapter>,
    tier: &str,
) -> (String, String) {
    let partner = portal
        .database()
        .create_partner(CreatePartner::new("Seeded Partner", unique_email("seed")).with_pricing_tier(tier))
        .await
        .unwrap();
    (partner.id, partner.api_token)
}

/// Create an admin partner and return its API token.
#[allow(dead_code)]
pub async fn seed_admin(portal: &PartnerPortal<MemoryDatabaseAdapter>) -> String {
    let admin = portal
        .database()
        .create_partner(CreatePartner::new("Admin", unique_email("admin")).with_role("admin"))
        .await
        .unwrap();
    admin.api_token
}

/// Seed raw period figures for a partner.
#[allow(dead_code)]
pub async fn seed_figures(
    portal: &PartnerPortal<MemoryDatabaseAdapter>,
    partner_id: &str,
    figures: Vec<PeriodFigures>,
) {
    portal
        .database()
        .insert_period_figures(partner_id, figures)
        .await
        .unwrap();
}

/// Build a POST request with a JSON body and `content-type` header.
#[allow(dead_code)]
pub fn post_json(path: &str, body: Value) -> PortalRequest {
    let mut req = PortalRequest::new(HttpMethod::Post, path);
    req.body = Some(body.to_string().into_bytes());
    req.headers
        .insert("content-type".to_string(), "application/json".to_string());
    req
}

/// Build a bare GET request (no auth, no origin).
#[allow(dead_code)]
pub fn get_request(path: &str) -> PortalRequest {
    PortalRequest::new(HttpMethod::Get, path)
}

/// Build an authenticated GET request.
#[allow(dead_code)]
pub fn get_with_auth(path: &str, token: &str) -> PortalRequest {
    let mut req = get_request(path);
    req.headers
        .insert("authorization".to_string(), format!("Bearer {}", token));
    req
}

/// Build an authenticated POST request with a JSON body.
#[allow(dead_code)]
pub fn post_json_with_auth(path: &str, body: Value, token: &str) -> PortalRequest {
    let mut req = post_json(path, body);
    req.headers
        .insert("authorization".to_string(), format!("Bearer {}", token));
    req
}

/// Parse a JSON response body.
#[allow(dead_code)]
pub fn parse_body(response: &PortalResponse) -> Value {
    serde_json::from_slice(&response.body).expect("response body is not valid JSON")
}
