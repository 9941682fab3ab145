use serde::{Deserialize, Serialize};
use validator::Validate;

use partner_portal_core::tier::{PricingTier, TierId};

/// `POST /tier-upgrade` body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitUpgradeRequest {
    #[serde(rename = "requestedTier")]
    #[validate(length(min = 1, message = "Requested tier is required"))]
    pub requested_tier: String,
    #[validate(length(min = 1, message = "Reason is required"))]
    pub reason: String,
}

/// `POST /admin/tier-upgrades/respond` body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RespondUpgradeRequest {
    #[serde(rename = "requestId")]
    #[validate(length(min = 1, message = "Request id is required"))]
    pub request_id: String,
    pub approve: bool,
}

#[derive(Debug, Serialize)]
pub struct SubmitUpgradeResponse<R: Serialize> {
    pub request: R,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct UpgradeTargetsResponse {
    #[serde(rename = "currentTier")]
    pub current_tier: TierId,
    pub targets: Vec<PricingTier>,
}

#[derive(Debug, Serialize)]
pub struct UpgradeListResponse<R: Serialize> {
    pub requests: Vec<R>,
}

#[derive(Debug, Serialize)]
pub struct RespondUpgradeResponse<R: Serialize> {
    pub request: R,
    pub status: bool,
}
