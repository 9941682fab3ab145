#![cfg(feature = "axum")]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use partner_portal::adapters::MemoryDatabaseAdapter;
use partner_portal::handlers::axum::AxumIntegration;
use partner_portal::plugins::{
    ProfitDashboardPlugin, RegistrationPlugin, TierCatalogPlugin, UpgradePlugin,
};
use partner_portal::{PartnerPortal, PortalBuilder, PortalConfig};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt; // for oneshot

async fn create_test_portal() -> Arc<PartnerPortal<MemoryDatabaseAdapter>> {
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

fn create_test_router(portal: Arc<PartnerPortal<MemoryDatabaseAdapter>>) -> axum::Router {
    axum::Router::new()
        .nest("/api/portal", portal.clone().axum_router())
        .with_state(portal)
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_tiers_over_http() {
    let portal = create_test_portal().await;
    let router = create_test_router(portal);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/portal/tiers")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["tiers"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_register_then_access_over_http() {
    let portal = create_test_portal().await;
    let router = create_test_router(portal);

    let payload = json!({
        "name": "Nargiza",
        "email": "nargiza@example.com",
        "phone": "+998909998877",
        "pricingTier": "professional_plus"
    });

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/portal/partners/register")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    let token = body["partner"]["apiToken"].as_str().unwrap().to_string();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/portal/tiers/access")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["trendHunter"], true);
}

#[tokio::test]
async fn test_query_parameters_reach_handlers() {
    let portal = create_test_portal().await;
    let router = create_test_router(portal.clone());

    // Seed an admin through the adapter.
    use partner_portal::adapters::PartnerOps;
    use partner_portal::CreatePartner;
    let admin = portal
        .database()
        .create_partner(CreatePartner::new("Admin", "admin@example.com").with_role("admin"))
        .await
        .unwrap();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/portal/admin/tier-upgrades?status=pending")
        .header("authorization", format!("Bearer {}", admin.api_token))
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert!(body["requests"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_body_and_headers_cross_the_boundary() {
    let portal = create_test_portal().await;
    let router = create_test_router(portal);

    let payload = json!({
        "name": "Bekzod",
        "phone": "+998901112233",
        "message": "Qachon yangi tarif chiqadi?"
    });

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/portal/contact")
        .header("content-type", "application/json")
        .header("accept-language", "uz")
        .body(Body::from(payload.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    let body = read_json(response).await;
    assert_eq!(body["status"], true);
    assert!(body["message"].as_str().unwrap().contains("rahmat"));
}

#[tokio::test]
async fn test_error_shape_over_http() {
    let portal = create_test_portal().await;
    let router = create_test_router(portal);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/portal/me")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = read_json(response).await;
    assert_eq!(body["message"], "Authentication required");
}
