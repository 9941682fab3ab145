//! # Partner Portal
//!
//! Backend for a marketplace-fulfillment partner portal: a tiered
//! subscription catalog, tier-gated profit dashboards, and an upgrade
//! request workflow, all behind a transport-agnostic plugin framework.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use partner_portal::{PortalBuilder, PortalConfig};
//! use partner_portal::adapters::MemoryDatabaseAdapter;
//! use partner_portal::plugins::{TierCatalogPlugin, ProfitDashboardPlugin};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PortalConfig::new("http://localhost:3000");
//!
//!     let portal = PortalBuilder::new(config)
//!         .database(MemoryDatabaseAdapter::new())
//!         .plugin(TierCatalogPlugin::new())
//!         .plugin(ProfitDashboardPlugin::new())
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

// The PartnerPortal struct lives in the root crate because it orchestrates
// plugins (from partner-portal-api) + core (from partner-portal-core).
pub mod core;
pub mod handlers;

// Re-export core abstractions
pub use partner_portal_core::{
    ContactFormRequest, ContactMessage, ContactOps, CorsConfig, CorsMiddleware, CostModel,
    CreateContactMessage, CreatePartner, CreateUpgradeRequest, DatabaseAdapter, DatabaseError,
    HealthCheckResponse, HttpMethod, Localizer, Logger, Middleware, OkResponse, Partner,
    PartnerAccess, PartnerOps, PeriodFigures, PortalConfig, PortalContext, PortalError,
    PortalPlugin, PortalRequest, PortalResponse, PortalResult, PortalRoute, PricingTier,
    ProfitBreakdown, ProfitCalculator, ProfitOps, RegisterPartnerRequest, StaticCatalog,
    StatusMessageResponse, StatusResponse, TierCatalogOps, TierFeatures, TierId,
    TierUpgradeRequest, TracingLogger, UpdatePartner, UpgradeRequestOps, UpgradeRequestStatus,
};

// Re-export entity traits
pub use partner_portal_core::entity::{PortalContactMessage, PortalPartner, PortalUpgradeRequest};

// Re-export adapters
pub mod adapters {
    pub use partner_portal_core::{
        ContactOps, DatabaseAdapter, MemoryContactMessage, MemoryDatabaseAdapter, MemoryPartner,
        MemoryUpgradeRequest, PartnerOps, ProfitOps, TierCatalogOps, UpgradeRequestOps,
    };
}

// Re-export plugins
pub mod plugins {
    pub use partner_portal_api::plugins::*;
    pub use partner_portal_api::*;
}

// Re-export the main PartnerPortal struct
pub use self::core::{PartnerPortal, PortalBuilder, TypedPortalBuilder};

#[cfg(feature = "axum")]
pub use handlers::axum::AxumIntegration;
