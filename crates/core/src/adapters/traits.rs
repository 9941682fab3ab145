use async_trait::async_trait;

use crate::entity::{PortalContactMessage, PortalPartner, PortalUpgradeRequest};
use crate::error::PortalResult;
use crate::profit::PeriodFigures;
use crate::tier::PricingTier;
use crate::types::{
    CreateContactMessage, CreatePartner, CreateUpgradeRequest, UpdatePartner, UpgradeRequestStatus,
};

/// Partner persistence operations.
#[async_trait]
pub trait PartnerOps: Send + Sync + 'static {
    type Partner: PortalPartner;

    async fn create_partner(&self, partner: CreatePartner) -> PortalResult<Self::Partner>;
    async fn get_partner_by_id(&self, id: &str) -> PortalResult<Option<Self::Partner>>;
    async fn get_partner_by_email(&self, email: &str) -> PortalResult<Option<Self::Partner>>;
    async fn get_partner_by_token(&self, token: &str) -> PortalResult<Option<Self::Partner>>;
    async fn update_partner(&self, id: &str, update: UpdatePartner)
    -> PortalResult<Self::Partner>;
    async fn list_partners(&self) -> PortalResult<Vec<Self::Partner>>;
}

/// Tier catalog operations.
///
/// The catalog is served data, immutable once fetched; there is no update
/// surface here.
#[async_trait]
pub trait TierCatalogOps: Send + Sync + 'static {
    async fn list_tiers(&self) -> PortalResult<Vec<PricingTier>>;
    async fn get_tier(&self, id: &str) -> PortalResult<Option<PricingTier>>;
}

/// Tier upgrade request persistence operations.
#[async_trait]
pub trait UpgradeRequestOps: Send + Sync + 'static {
    type UpgradeRequest: PortalUpgradeRequest;

    async fn create_upgrade_request(
        &self,
        request: CreateUpgradeRequest,
    ) -> PortalResult<Self::UpgradeRequest>;
    async fn get_upgrade_request(&self, id: &str) -> PortalResult<Option<Self::UpgradeRequest>>;
    async fn list_partner_upgrade_requests(
        &self,
        partner_id: &str,
    ) -> PortalResult<Vec<Self::UpgradeRequest>>;
    async fn list_upgrade_requests(
        &self,
        status: Option<UpgradeRequestStatus>,
    ) -> PortalResult<Vec<Self::UpgradeRequest>>;
    async fn set_upgrade_request_status(
        &self,
        id: &str,
        status: UpgradeRequestStatus,
        decided_by: Option<&str>,
    ) -> PortalResult<Self::UpgradeRequest>;
}

/// Profit figure feed operations.
#[async_trait]
pub trait ProfitOps: Send + Sync + 'static {
    /// Raw period figures for a partner, optionally filtered by period and
    /// marketplace. An empty result is normal for new partners.
    async fn list_period_figures(
        &self,
        partner_id: &str,
        period: Option<&str>,
        marketplace: Option<&str>,
    ) -> PortalResult<Vec<PeriodFigures>>;

    /// Ingest figures for a partner (feed import, test seeding).
    async fn insert_period_figures(
        &self,
        partner_id: &str,
        figures: Vec<PeriodFigures>,
    ) -> PortalResult<()>;
}

/// Contact message persistence operations.
#[async_trait]
pub trait ContactOps: Send + Sync + 'static {
    type ContactMessage: PortalContactMessage;

    async fn create_contact_message(
        &self,
        message: CreateContactMessage,
    ) -> PortalResult<Self::ContactMessage>;
    async fn list_contact_messages(&self) -> PortalResult<Vec<Self::ContactMessage>>;
}

/// Combined database adapter: everything the portal persists or serves.
pub trait DatabaseAdapter:
    PartnerOps + TierCatalogOps + UpgradeRequestOps + ProfitOps + ContactOps
{
}

impl<T> DatabaseAdapter for T where
    T: PartnerOps + TierCatalogOps + UpgradeRequestOps + ProfitOps + ContactOps
{
}
