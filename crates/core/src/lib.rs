//! # Partner Portal Core
//!
//! Core abstractions for the marketplace fulfillment partner portal.
//! Contains traits, types, configuration, and error handling.

pub mod adapters;
pub mod config;
pub mod entity;
pub mod error;
pub mod localization;
pub mod logger;
pub mod middleware;
pub mod plugin;
pub mod profit;
pub mod tier;
pub mod types;

// Re-export commonly used items
pub use adapters::{
    ContactOps, DatabaseAdapter, MemoryContactMessage, MemoryDatabaseAdapter, MemoryPartner,
    MemoryUpgradeRequest, PartnerOps, ProfitOps, TierCatalogOps, UpgradeRequestOps,
};
pub use config::PortalConfig;
pub use entity::{PortalContactMessage, PortalPartner, PortalUpgradeRequest};
pub use error::{
    DatabaseError, PortalError, PortalResult, validate_request_body, validation_error_response,
};
pub use localization::{Localizer, StaticCatalog, resolve_locale};
pub use logger::{Logger, TracingLogger};
pub use middleware::{CorsConfig, CorsMiddleware, Middleware};
pub use plugin::{PortalContext, PortalPlugin, PortalRoute};
pub use profit::{CostModel, PeriodFigures, ProfitBreakdown, ProfitCalculator};
pub use tier::{
    PartnerAccess, PricingTier, TierFeatures, TierId, available_upgrade_targets,
    min_tier_for_feature, tier_rank,
};
pub use types::{
    ContactFormRequest, ContactMessage, CreateContactMessage, CreatePartner, CreateUpgradeRequest,
    HealthCheckResponse, HttpMethod, OkResponse, Partner, PortalRequest, PortalResponse,
    RegisterPartnerRequest, StatusMessageResponse, StatusResponse, TierUpgradeRequest,
    UpdatePartner, UpgradeRequestStatus,
};
