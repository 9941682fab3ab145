pub mod memory;
pub mod traits;

pub use memory::{
    MemoryContactMessage, MemoryDatabaseAdapter, MemoryPartner, MemoryUpgradeRequest,
};
pub use traits::{
    ContactOps, DatabaseAdapter, PartnerOps, ProfitOps, TierCatalogOps, UpgradeRequestOps,
};
