//! Run the portal behind an Axum HTTP server:
//!
//! ```sh
//! cargo run --example axum_server
//! ```

use std::sync::Arc;

use axum::Router;
use partner_portal::adapters::MemoryDatabaseAdapter;
use partner_portal::handlers::axum::AxumIntegration;
use partner_portal::plugins::{
    ProfitDashboardPlugin, RegistrationPlugin, TierCatalogPlugin, UpgradePlugin,
};
use partner_portal::{PortalBuilder, PortalConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = PortalConfig::new("http://localhost:8080")
        .trusted_origin("http://localhost:5173");

    let portal = Arc::new(
        PortalBuilder::new(config)
            .database(MemoryDatabaseAdapter::new())
            .plugin(TierCatalogPlugin::new())
            .plugin(ProfitDashboardPlugin::new())
            .plugin(UpgradePlugin::new())
            .plugin(RegistrationPlugin::new())
            .build()
            .await?,
    );

    println!("Registered plugins: {:?}", portal.plugin_names());

    let base_path = portal.config().base_path.clone();
    let app = Router::new()
        .nest(&base_path, portal.clone().axum_router())
        .with_state(portal);

    println!("Listening on http://localhost:8080{base_path}");
    println!("  GET  {base_path}/tiers                        - Tier catalog");
    println!("  GET  {base_path}/tiers/access                 - Access flags (auth)");
    println!("  GET  {base_path}/profit/breakdown             - Profit dashboard (auth)");
    println!("  POST {base_path}/tier-upgrade                 - Submit upgrade request (auth)");
    println!("  GET  {base_path}/tier-upgrade/targets         - Upgrade targets (auth)");
    println!("  GET  {base_path}/tier-upgrade/list            - Own requests (auth)");
    println!("  GET  {base_path}/admin/tier-upgrades          - Review queue (admin)");
    println!("  POST {base_path}/admin/tier-upgrades/respond  - Decide a request (admin)");
    println!("  POST {base_path}/partners/register            - Register a partner");
    println!("  POST {base_path}/contact                      - Contact form");

    let listener = TcpListener::bind("0.0.0.0:8080").await?;
    axum::serve(listener, app).await?;

    Ok(())
}
