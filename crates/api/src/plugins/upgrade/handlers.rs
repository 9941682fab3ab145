//! Core logic for the tier upgrade workflow, independent of the route layer.

use partner_portal_core::adapters::DatabaseAdapter;
use partner_portal_core::entity::{PortalPartner, PortalUpgradeRequest};
use partner_portal_core::tier::{PricingTier, TierId, available_upgrade_targets};
use partner_portal_core::types::{CreateUpgradeRequest, UpdatePartner, UpgradeRequestStatus};
use partner_portal_core::{PortalContext, PortalError, PortalResult};

use super::types::*;
use crate::plugins::helpers::partner_tier;

/// Submit a new upgrade request for `partner`.
///
/// The requested tier must be a known tier strictly above the partner's
/// current one, and at most one request may be pending per partner.
pub(super) async fn submit_upgrade_core<DB: DatabaseAdapter>(
    body: &SubmitUpgradeRequest,
    partner: &DB::Partner,
    ctx: &PortalContext<DB>,
) -> PortalResult<DB::UpgradeRequest> {
    let requested = TierId::parse(body.requested_tier.trim()).ok_or_else(|| {
        PortalError::bad_request(format!("Unknown tier: {}", body.requested_tier))
    })?;

    let reason = body.reason.trim();
    if reason.is_empty() {
        return Err(PortalError::bad_request("Reason is required"));
    }

    let current = partner_tier(partner);
    if requested.rank() <= current.rank() {
        return Err(PortalError::bad_request(
            "Requested tier must be higher than your current tier",
        ));
    }

    let existing = ctx
        .database
        .list_partner_upgrade_requests(partner.id())
        .await?;
    if existing.iter().any(|r| r.is_pending()) {
        return Err(PortalError::conflict(
            "An upgrade request is already pending for this account",
        ));
    }

    let request = ctx
        .database
        .create_upgrade_request(CreateUpgradeRequest {
            partner_id: partner.id().to_string(),
            current_tier: current,
            requested_tier: requested,
            reason: reason.to_string(),
        })
        .await?;

    ctx.config.logger.info(&format!(
        "partner {} requested upgrade {} -> {}",
        partner.id(),
        current,
        requested
    ));

    Ok(request)
}

/// Tiers the partner can move up to: active catalog entries strictly above
/// the current tier, ascending.
pub(super) async fn upgrade_targets_core<DB: DatabaseAdapter>(
    partner: &DB::Partner,
    ctx: &PortalContext<DB>,
) -> PortalResult<UpgradeTargetsResponse> {
    let current = partner_tier(partner);
    let tiers: Vec<PricingTier> = ctx
        .database
        .list_tiers()
        .await?
        .into_iter()
        .filter(|t| t.active)
        .collect();

    Ok(UpgradeTargetsResponse {
        current_tier: current,
        targets: available_upgrade_targets(current, &tiers),
    })
}

/// All upgrade requests submitted by `partner`, newest first per the adapter
/// contract.
pub(super) async fn list_own_core<DB: DatabaseAdapter>(
    partner: &DB::Partner,
    ctx: &PortalContext<DB>,
) -> PortalResult<Vec<DB::UpgradeRequest>> {
    ctx.database
        .list_partner_upgrade_requests(partner.id())
        .await
}

/// Admin view of upgrade requests, optionally filtered by status.
pub(super) async fn admin_list_core<DB: DatabaseAdapter>(
    status: Option<&str>,
    ctx: &PortalContext<DB>,
) -> PortalResult<Vec<DB::UpgradeRequest>> {
    let status = match status {
        Some(raw) => Some(
            UpgradeRequestStatus::parse(raw)
                .ok_or_else(|| PortalError::bad_request(format!("Unknown status: {}", raw)))?,
        ),
        None => None,
    };
    ctx.database.list_upgrade_requests(status).await
}

/// Decide a pending upgrade request.
///
/// Approval writes the requested tier onto the partner record; both outcomes
/// are terminal.
pub(super) async fn respond_core<DB: DatabaseAdapter>(
    body: &RespondUpgradeRequest,
    admin: &DB::Partner,
    ctx: &PortalContext<DB>,
) -> PortalResult<DB::UpgradeRequest> {
    let request = ctx
        .database
        .get_upgrade_request(&body.request_id)
        .await?
        .ok_or_else(|| PortalError::not_found("Upgrade request not found"))?;

    if !request.is_pending() {
        return Err(PortalError::conflict(
            "Upgrade request has already been decided",
        ));
    }

    let status = if body.approve {
        UpgradeRequestStatus::Approved
    } else {
        UpgradeRequestStatus::Rejected
    };

    let updated = ctx
        .database
        .set_upgrade_request_status(request.id(), status, Some(admin.id()))
        .await?;

    if body.approve {
        ctx.database
            .update_partner(
                request.partner_id(),
                UpdatePartner {
                    pricing_tier: Some(request.requested_tier().as_str().to_string()),
                    ..Default::default()
                },
            )
            .await?;
    }

    ctx.config.logger.info(&format!(
        "upgrade request {} {} by {}",
        request.id(),
        status.as_str(),
        admin.id()
    ));

    Ok(updated)
}
