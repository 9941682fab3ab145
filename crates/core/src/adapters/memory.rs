use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::entity::{PortalContactMessage, PortalPartner, PortalUpgradeRequest};
use crate::error::{PortalError, PortalResult};
use crate::profit::PeriodFigures;
use crate::tier::PricingTier;
use crate::types::{
    ContactMessage, CreateContactMessage, CreatePartner, CreateUpgradeRequest, Partner,
    TierUpgradeRequest, UpdatePartner, UpgradeRequestStatus,
};

use super::{ContactOps, PartnerOps, ProfitOps, TierCatalogOps, UpgradeRequestOps};

// ─── Memory entity traits ──────────────────────────────────────────────
//
// These traits extend the read-only `Portal*` entity traits with the
// construction and mutation methods `MemoryDatabaseAdapter` needs.
// Implement them on custom entity types to use those with the in-memory
// adapter.

/// Construction and mutation for partner entities stored in memory.
pub trait MemoryPartner: PortalPartner {
    /// Construct a new partner from creation data.
    fn from_create(id: String, token: String, create: &CreatePartner, now: DateTime<Utc>) -> Self;
    /// Apply an update in place.
    fn apply_update(&mut self, update: &UpdatePartner, now: DateTime<Utc>);
}

/// Construction and mutation for upgrade request entities stored in memory.
pub trait MemoryUpgradeRequest: PortalUpgradeRequest {
    fn from_create(id: String, create: &CreateUpgradeRequest, now: DateTime<Utc>) -> Self;
    fn set_status(
        &mut self,
        status: UpgradeRequestStatus,
        decided_by: Option<String>,
        now: DateTime<Utc>,
    );
}

/// Construction for contact message entities stored in memory.
pub trait MemoryContactMessage: PortalContactMessage {
    fn from_create(id: String, create: &CreateContactMessage, now: DateTime<Utc>) -> Self;
}

// ─── Default implementations for built-in types ────────────────────────

impl MemoryPartner for Partner {
    fn from_create(id: String, token: String, create: &CreatePartner, now: DateTime<Utc>) -> Self {
        Partner {
            id,
            name: create.name.clone(),
            email: create.email.clone(),
            phone: create.phone.clone(),
            company: create.company.clone(),
            pricing_tier: create.pricing_tier.clone(),
            role: create.role.clone().unwrap_or_else(|| "partner".to_string()),
            api_token: token,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, update: &UpdatePartner, now: DateTime<Utc>) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(phone) = &update.phone {
            self.phone = Some(phone.clone());
        }
        if let Some(company) = &update.company {
            self.company = Some(company.clone());
        }
        if let Some(tier) = &update.pricing_tier {
            self.pricing_tier = Some(tier.clone());
        }
        self.updated_at = now;
    }
}

impl MemoryUpgradeRequest for TierUpgradeRequest {
    fn from_create(id: String, create: &CreateUpgradeRequest, now: DateTime<Utc>) -> Self {
        TierUpgradeRequest {
            id,
            partner_id: create.partner_id.clone(),
            current_tier: create.current_tier,
            requested_tier: create.requested_tier,
            reason: create.reason.clone(),
            status: UpgradeRequestStatus::Pending,
            decided_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn set_status(
        &mut self,
        status: UpgradeRequestStatus,
        decided_by: Option<String>,
        now: DateTime<Utc>,
    ) {
        self.status = status;
        self.decided_by = decided_by;
        self.updated_at = now;
    }
}

impl MemoryContactMessage for ContactMessage {
    fn from_create(id: String, create: &CreateContactMessage, now: DateTime<Utc>) -> Self {
        ContactMessage {
            id,
            name: create.name.clone(),
            phone: create.phone.clone(),
            message: create.message.clone(),
            created_at: now,
        }
    }
}

// ─── Adapter ───────────────────────────────────────────────────────────

/// Partner rows plus their lookup indexes, guarded by a single mutex so
/// concurrent creates and lookups can never deadlock on lock order.
struct PartnerTable<P> {
    rows: HashMap<String, P>,
    by_email: HashMap<String, String>,
    by_token: HashMap<String, String>,
}

impl<P> Default for PartnerTable<P> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            by_email: HashMap::new(),
            by_token: HashMap::new(),
        }
    }
}

/// In-memory database adapter, for tests, demos, and single-process setups.
///
/// Generic over entity types; use the defaults unless you have custom rows.
pub struct MemoryDatabaseAdapter<P = Partner, R = TierUpgradeRequest, C = ContactMessage> {
    partners: Arc<Mutex<PartnerTable<P>>>,
    upgrade_requests: Arc<Mutex<HashMap<String, R>>>,
    contact_messages: Arc<Mutex<Vec<C>>>,
    tiers: Arc<Mutex<Vec<PricingTier>>>,
    figures: Arc<Mutex<HashMap<String, Vec<PeriodFigures>>>>,
}

/// Constructor for the default (built-in) entity types.
/// Use `Default::default()` for custom type parameterizations.
impl MemoryDatabaseAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P, R, C> Default for MemoryDatabaseAdapter<P, R, C> {
    fn default() -> Self {
        Self {
            partners: Arc::new(Mutex::new(PartnerTable::default())),
            upgrade_requests: Arc::new(Mutex::new(HashMap::new())),
            contact_messages: Arc::new(Mutex::new(Vec::new())),
            tiers: Arc::new(Mutex::new(PricingTier::default_catalog())),
            figures: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<P, R, C> Clone for MemoryDatabaseAdapter<P, R, C> {
    fn clone(&self) -> Self {
        Self {
            partners: self.partners.clone(),
            upgrade_requests: self.upgrade_requests.clone(),
            contact_messages: self.contact_messages.clone(),
            tiers: self.tiers.clone(),
            figures: self.figures.clone(),
        }
    }
}

impl<P, R, C> MemoryDatabaseAdapter<P, R, C> {
    /// Replace the seeded tier catalog.
    pub fn with_tiers(self, tiers: Vec<PricingTier>) -> Self {
        *self.tiers.lock().unwrap() = tiers;
        self
    }
}

#[async_trait]
impl<P, R, C> PartnerOps for MemoryDatabaseAdapter<P, R, C>
where
    P: MemoryPartner,
    R: MemoryUpgradeRequest,
    C: MemoryContactMessage,
{
    type Partner = P;

    async fn create_partner(&self, create: CreatePartner) -> PortalResult<P> {
        let mut table = self.partners.lock().unwrap();

        if table.by_email.contains_key(&create.email) {
            return Err(PortalError::conflict(
                "A partner with this email already exists",
            ));
        }

        let id = Uuid::new_v4().to_string();
        let token = format!("pp_{}", Uuid::new_v4().simple());
        let now = Utc::now();
        let partner = P::from_create(id.clone(), token.clone(), &create, now);

        table.by_email.insert(create.email.clone(), id.clone());
        table.by_token.insert(token, id.clone());
        table.rows.insert(id, partner.clone());

        Ok(partner)
    }

    async fn get_partner_by_id(&self, id: &str) -> PortalResult<Option<P>> {
        let table = self.partners.lock().unwrap();
        Ok(table.rows.get(id).cloned())
    }

    async fn get_partner_by_email(&self, email: &str) -> PortalResult<Option<P>> {
        let table = self.partners.lock().unwrap();
        Ok(table
            .by_email
            .get(email)
            .and_then(|id| table.rows.get(id))
            .cloned())
    }

    async fn get_partner_by_token(&self, token: &str) -> PortalResult<Option<P>> {
        let table = self.partners.lock().unwrap();
        Ok(table
            .by_token
            .get(token)
            .and_then(|id| table.rows.get(id))
            .cloned())
    }

    async fn update_partner(&self, id: &str, update: UpdatePartner) -> PortalResult<P> {
        let mut table = self.partners.lock().unwrap();
        let partner = table.rows.get_mut(id).ok_or(PortalError::PartnerNotFound)?;
        partner.apply_update(&update, Utc::now());
        Ok(partner.clone())
    }

    async fn list_partners(&self) -> PortalResult<Vec<P>> {
        let table = self.partners.lock().unwrap();
        let mut all: Vec<P> = table.rows.values().cloned().collect();
        all.sort_by(|a, b| a.created_at().cmp(&b.created_at()));
        Ok(all)
    }
}

#[async_trait]
impl<P, R, C> TierCatalogOps for MemoryDatabaseAdapter<P, R, C>
where
    P: MemoryPartner,
    R: MemoryUpgradeRequest,
    C: MemoryContactMessage,
{
    async fn list_tiers(&self) -> PortalResult<Vec<PricingTier>> {
        let tiers = self.tiers.lock().unwrap();
        Ok(tiers.clone())
    }

    async fn get_tier(&self, id: &str) -> PortalResult<Option<PricingTier>> {
        let tiers = self.tiers.lock().unwrap();
        Ok(tiers.iter().find(|t| t.id == id).cloned())
    }
}

#[async_trait]
impl<P, R, C> UpgradeRequestOps for MemoryDatabaseAdapter<P, R, C>
where
    P: MemoryPartner,
    R: MemoryUpgradeRequest,
    C: MemoryContactMessage,
{
    type UpgradeRequest = R;

    async fn create_upgrade_request(&self, create: CreateUpgradeRequest) -> PortalResult<R> {
        let mut requests = self.upgrade_requests.lock().unwrap();
        let id = Uuid::new_v4().to_string();
        let request = R::from_create(id.clone(), &create, Utc::now());
        requests.insert(id, request.clone());
        Ok(request)
    }

    async fn get_upgrade_request(&self, id: &str) -> PortalResult<Option<R>> {
        let requests = self.upgrade_requests.lock().unwrap();
        Ok(requests.get(id).cloned())
    }

    async fn list_partner_upgrade_requests(&self, partner_id: &str) -> PortalResult<Vec<R>> {
        let requests = self.upgrade_requests.lock().unwrap();
        let mut matching: Vec<R> = requests
            .values()
            .filter(|r| r.partner_id() == partner_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at().cmp(&b.created_at()));
        Ok(matching)
    }

    async fn list_upgrade_requests(
        &self,
        status: Option<UpgradeRequestStatus>,
    ) -> PortalResult<Vec<R>> {
        let requests = self.upgrade_requests.lock().unwrap();
        let mut matching: Vec<R> = requests
            .values()
            .filter(|r| status.is_none_or(|s| r.status() == s))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at().cmp(&b.created_at()));
        Ok(matching)
    }

    async fn set_upgrade_request_status(
        &self,
        id: &str,
        status: UpgradeRequestStatus,
        decided_by: Option<&str>,
    ) -> PortalResult<R> {
        let mut requests = self.upgrade_requests.lock().unwrap();
        let request = requests
            .get_mut(id)
            .ok_or_else(|| PortalError::not_found("Upgrade request not found"))?;
        request.set_status(status, decided_by.map(|s| s.to_string()), Utc::now());
        Ok(request.clone())
    }
}

#[async_trait]
impl<P, R, C> ProfitOps for MemoryDatabaseAdapter<P, R, C>
where
    P: MemoryPartner,
    R: MemoryUpgradeRequest,
    C: MemoryContactMessage,
{
    async fn list_period_figures(
        &self,
        partner_id: &str,
        period: Option<&str>,
        marketplace: Option<&str>,
    ) -> PortalResult<Vec<PeriodFigures>> {
        let figures = self.figures.lock().unwrap();
        let all = figures.get(partner_id).cloned().unwrap_or_default();
        Ok(all
            .into_iter()
            .filter(|f| period.is_none_or(|p| f.period == p))
            .filter(|f| marketplace.is_none_or(|m| f.marketplace == m))
            .collect())
    }

    async fn insert_period_figures(
        &self,
        partner_id: &str,
        mut new_figures: Vec<PeriodFigures>,
    ) -> PortalResult<()> {
        let mut figures = self.figures.lock().unwrap();
        figures
            .entry(partner_id.to_string())
            .or_default()
            .append(&mut new_figures);
        Ok(())
    }
}

#[async_trait]
impl<P, R, C> ContactOps for MemoryDatabaseAdapter<P, R, C>
where
    P: MemoryPartner,
    R: MemoryUpgradeRequest,
    C: MemoryContactMessage,
{
    type ContactMessage = C;

    async fn create_contact_message(&self, create: CreateContactMessage) -> PortalResult<C> {
        let mut messages = self.contact_messages.lock().unwrap();
        let message = C::from_create(Uuid::new_v4().to_string(), &create, Utc::now());
        messages.push(message.clone());
        Ok(message)
    }

    async fn list_contact_messages(&self) -> PortalResult<Vec<C>> {
        let messages = self.contact_messages.lock().unwrap();
        Ok(messages.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::TierId;

    #[tokio::test]
    async fn create_and_fetch_partner() {
        let db = MemoryDatabaseAdapter::new();
        let partner = db
            .create_partner(CreatePartner::new("Aziz", "aziz@example.com").with_phone("+998901234567"))
            .await
            .unwrap();

        let by_id = db.get_partner_by_id(&partner.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "aziz@example.com");

        let by_email = db
            .get_partner_by_email("aziz@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, partner.id);

        let by_token = db
            .get_partner_by_token(&partner.api_token)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_token.id, partner.id);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_and_lookups() {
        let db = MemoryDatabaseAdapter::new();
        let seeded = db
            .create_partner(CreatePartner::new("Seed", "seed@example.com"))
            .await
            .unwrap();

        let mut handles = Vec::new();
        for i in 0..16 {
            let db = db.clone();
            let token = seeded.api_token.clone();
            handles.push(tokio::spawn(async move {
                let created = db
                    .create_partner(CreatePartner::new("P", format!("p{i}@example.com")))
                    .await
                    .unwrap();
                let by_token = db.get_partner_by_token(&token).await.unwrap().unwrap();
                assert_eq!(by_token.email, "seed@example.com");
                let by_email = db
                    .get_partner_by_email(&created.email)
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(by_email.id, created.id);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(db.list_partners().await.unwrap().len(), 17);
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let db = MemoryDatabaseAdapter::new();
        db.create_partner(CreatePartner::new("A", "dup@example.com"))
            .await
            .unwrap();
        let err = db
            .create_partner(CreatePartner::new("B", "dup@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
    }

    #[tokio::test]
    async fn update_partner_tier() {
        let db = MemoryDatabaseAdapter::new();
        let partner = db
            .create_partner(CreatePartner::new("A", "a@example.com"))
            .await
            .unwrap();

        let updated = db
            .update_partner(
                &partner.id,
                UpdatePartner {
                    pricing_tier: Some("professional_plus".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.pricing_tier.as_deref(), Some("professional_plus"));
    }

    #[tokio::test]
    async fn catalog_is_seeded() {
        let db = MemoryDatabaseAdapter::new();
        let tiers = db.list_tiers().await.unwrap();
        assert_eq!(tiers.len(), 4);
        assert!(
            db.get_tier("enterprise_elite")
                .await
                .unwrap()
                .is_some()
        );
        assert!(db.get_tier("nonexistent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn upgrade_request_lifecycle() {
        let db = MemoryDatabaseAdapter::new();
        let request = db
            .create_upgrade_request(CreateUpgradeRequest {
                partner_id: "p1".to_string(),
                current_tier: TierId::StarterPro,
                requested_tier: TierId::BusinessStandard,
                reason: "Revenue has grown".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(request.status, UpgradeRequestStatus::Pending);

        let pending = db
            .list_upgrade_requests(Some(UpgradeRequestStatus::Pending))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);

        let approved = db
            .set_upgrade_request_status(&request.id, UpgradeRequestStatus::Approved, Some("adm"))
            .await
            .unwrap();
        assert_eq!(approved.status, UpgradeRequestStatus::Approved);
        assert_eq!(approved.decided_by.as_deref(), Some("adm"));

        let pending = db
            .list_upgrade_requests(Some(UpgradeRequestStatus::Pending))
            .await
            .unwrap();
        assert!(pending.is_empty());
    }

    #[tokio::test]
    async fn figures_filtering() {
        let db = MemoryDatabaseAdapter::new();
        let make = |period: &str, marketplace: &str| PeriodFigures {
            period: period.to_string(),
            marketplace: marketplace.to_string(),
            revenue: 1_000_000.0,
            fulfillment_cost: 0.0,
            commission: 0.0,
            product_cost: 0.0,
            logistics: None,
            spt: None,
            order_count: 10,
        };
        db.insert_period_figures(
            "p1",
            vec![
                make("2024-05", "uzum"),
                make("2024-06", "uzum"),
                make("2024-06", "wildberries"),
            ],
        )
        .await
        .unwrap();

        let all = db.list_period_figures("p1", None, None).await.unwrap();
        assert_eq!(all.len(), 3);

        let june = db
            .list_period_figures("p1", Some("2024-06"), None)
            .await
            .unwrap();
        assert_eq!(june.len(), 2);

        let june_uzum = db
            .list_period_figures("p1", Some("2024-06"), Some("uzum"))
            .await
            .unwrap();
        assert_eq!(june_uzum.len(), 1);

        let nobody = db.list_period_figures("p2", None, None).await.unwrap();
        assert!(nobody.is_empty());
    }
}
