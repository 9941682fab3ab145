//! # Partner Portal API
//!
//! Plugin implementations for the marketplace fulfillment partner portal.

pub mod plugins;

pub use plugins::profit_dashboard::ProfitDashboardPlugin;
pub use plugins::registration::RegistrationPlugin;
pub use plugins::tier_catalog::TierCatalogPlugin;
pub use plugins::upgrade::{UpgradeConfig, UpgradePlugin};
