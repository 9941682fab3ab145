use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use crate::tier::TierId;

/// HTTP method for portal routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

/// Portal request wrapper, transport-agnostic.
#[derive(Debug, Clone)]
pub struct PortalRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
    pub query: HashMap<String, String>,
}

/// Portal response wrapper.
#[derive(Debug, Clone)]
pub struct PortalResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl PortalRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HashMap::new(),
            body: None,
            query: HashMap::new(),
        }
    }

    /// Construct a request from all public parts.
    ///
    /// Prefer [`PortalRequest::new`] when you only need method + path.
    pub fn from_parts(
        method: HttpMethod,
        path: String,
        headers: HashMap<String, String>,
        body: Option<Vec<u8>>,
        query: HashMap<String, String>,
    ) -> Self {
        Self {
            method,
            path,
            headers,
            body,
            query,
        }
    }

    pub fn method(&self) -> &HttpMethod {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn header(&self, name: &str) -> Option<&String> {
        self.headers.get(name)
    }

    pub fn body_as_json<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        if let Some(body) = &self.body {
            serde_json::from_slice(body)
        } else {
            serde_json::from_str("{}")
        }
    }
}

impl PortalResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn json<T: Serialize>(status: u16, data: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_vec(data)?;
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        Ok(Self {
            status,
            headers,
            body,
        })
    }

    pub fn text(status: u16, text: impl Into<String>) -> Self {
        let body = text.into().into_bytes();
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "text/plain".to_string());

        Self {
            status,
            headers,
            body,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

// ─── Entities ──────────────────────────────────────────────────────────

/// A fulfillment partner account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    /// Raw tier string; resolution to a [`TierId`] always degrades unknown
    /// values to the lowest tier.
    #[serde(rename = "pricingTier")]
    pub pricing_tier: Option<String>,
    /// `"partner"` or `"admin"`.
    pub role: String,
    /// Static bearer token identifying the partner on API calls.
    #[serde(rename = "apiToken")]
    pub api_token: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Status of a tier upgrade request.
///
/// Created as `Pending`; `Approved`/`Rejected` are terminal and set only by
/// the admin workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl UpgradeRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// A partner's request to move to a higher tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierUpgradeRequest {
    pub id: String,
    #[serde(rename = "partnerId")]
    pub partner_id: String,
    #[serde(rename = "currentTier")]
    pub current_tier: TierId,
    #[serde(rename = "requestedTier")]
    pub requested_tier: TierId,
    pub reason: String,
    pub status: UpgradeRequestStatus,
    /// Admin partner id that decided the request, once decided.
    #[serde(rename = "decidedBy")]
    pub decided_by: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// A contact-form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub message: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

// ─── Creation / update data ────────────────────────────────────────────

/// Partner creation data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePartner {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub pricing_tier: Option<String>,
    pub role: Option<String>,
}

impl CreatePartner {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
            company: None,
            pricing_tier: None,
            role: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_pricing_tier(mut self, tier: impl Into<String>) -> Self {
        self.pricing_tier = Some(tier.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Partner update data. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePartner {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub pricing_tier: Option<String>,
}

/// Upgrade request creation data.
#[derive(Debug, Clone)]
pub struct CreateUpgradeRequest {
    pub partner_id: String,
    pub current_tier: TierId,
    pub requested_tier: TierId,
    pub reason: String,
}

/// Contact message creation data.
#[derive(Debug, Clone)]
pub struct CreateContactMessage {
    pub name: String,
    pub phone: String,
    pub message: String,
}

// ─── Request DTOs ──────────────────────────────────────────────────────

/// `POST /partners/register` body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterPartnerRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    pub company: Option<String>,
    #[serde(rename = "pricingTier")]
    pub pricing_tier: Option<String>,
}

/// `POST /contact` body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactFormRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

// ─── Response envelopes ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessageResponse {
    pub status: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub service: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_as_json_defaults_to_empty_object() {
        #[derive(Deserialize)]
        struct Empty {}
        let req = PortalRequest::new(HttpMethod::Get, "/tiers");
        let parsed: Result<Empty, _> = req.body_as_json();
        assert!(parsed.is_ok());
    }

    #[test]
    fn upgrade_status_round_trips() {
        for status in [
            UpgradeRequestStatus::Pending,
            UpgradeRequestStatus::Approved,
            UpgradeRequestStatus::Rejected,
        ] {
            assert_eq!(UpgradeRequestStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(UpgradeRequestStatus::parse("cancelled"), None);
    }

    #[test]
    fn partner_serializes_camel_case() {
        let partner = Partner {
            id: "p1".to_string(),
            name: "Aziz".to_string(),
            email: "aziz@example.com".to_string(),
            phone: None,
            company: None,
            pricing_tier: Some("business_standard".to_string()),
            role: "partner".to_string(),
            api_token: "tok".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&partner).unwrap();
        assert_eq!(value["pricingTier"], "business_standard");
        assert!(value.get("pricing_tier").is_none());
    }
}
