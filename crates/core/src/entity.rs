//! Entity traits for the partner portal.
//!
//! The framework accesses entity fields through these trait methods, so
//! adapters can use their own row types with custom field names and extra
//! columns. The built-in types in [`crate::types`] implement them.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::tier::TierId;
use crate::types::UpgradeRequestStatus;

/// Trait representing a partner entity.
pub trait PortalPartner: Clone + Send + Sync + Serialize + std::fmt::Debug + 'static {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn email(&self) -> &str;
    fn phone(&self) -> Option<&str>;
    fn company(&self) -> Option<&str>;
    fn pricing_tier(&self) -> Option<&str>;
    fn role(&self) -> &str;
    fn api_token(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;

    fn is_admin(&self) -> bool {
        self.role() == "admin"
    }
}

/// Trait representing a tier upgrade request entity.
pub trait PortalUpgradeRequest: Clone + Send + Sync + Serialize + std::fmt::Debug + 'static {
    fn id(&self) -> &str;
    fn partner_id(&self) -> &str;
    fn current_tier(&self) -> TierId;
    fn requested_tier(&self) -> TierId;
    fn reason(&self) -> &str;
    fn status(&self) -> UpgradeRequestStatus;
    fn decided_by(&self) -> Option<&str>;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;

    fn is_pending(&self) -> bool {
        self.status() == UpgradeRequestStatus::Pending
    }
}

/// Trait representing a contact message entity.
pub trait PortalContactMessage: Clone + Send + Sync + Serialize + std::fmt::Debug + 'static {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn phone(&self) -> &str;
    fn message(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
}

// ─── Built-in implementations ──────────────────────────────────────────

impl PortalPartner for crate::types::Partner {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn email(&self) -> &str {
        &self.email
    }
    fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
    fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }
    fn pricing_tier(&self) -> Option<&str> {
        self.pricing_tier.as_deref()
    }
    fn role(&self) -> &str {
        &self.role
    }
    fn api_token(&self) -> &str {
        &self.api_token
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl PortalUpgradeRequest for crate::types::TierUpgradeRequest {
    fn id(&self) -> &str {
        &self.id
    }
    fn partner_id(&self) -> &str {
        &self.partner_id
    }
    fn current_tier(&self) -> TierId {
        self.current_tier
    }
    fn requested_tier(&self) -> TierId {
        self.requested_tier
    }
    fn reason(&self) -> &str {
        &self.reason
    }
    fn status(&self) -> UpgradeRequestStatus {
        self.status
    }
    fn decided_by(&self) -> Option<&str> {
        self.decided_by.as_deref()
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl PortalContactMessage for crate::types::ContactMessage {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn phone(&self) -> &str {
        &self.phone
    }
    fn message(&self) -> &str {
        &self.message
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
