//! Shared helpers for plugin implementations.
//!
//! Extracted to avoid duplicating common patterns across plugins (DRY).

use partner_portal_core::adapters::DatabaseAdapter;
use partner_portal_core::entity::PortalPartner;
use partner_portal_core::localization::resolve_locale;
use partner_portal_core::tier::TierId;
use partner_portal_core::{PortalContext, PortalRequest};

/// The partner's resolved tier. Absent or unrecognized tier strings degrade
/// to the lowest tier.
pub fn partner_tier(partner: &impl PortalPartner) -> TierId {
    TierId::from_partner(partner.pricing_tier())
}

/// Resolve a user-facing message for the request's locale.
///
/// Locale comes from the `Accept-Language` header when present, otherwise
/// from the configured default.
pub fn localized_message<DB: DatabaseAdapter>(
    req: &PortalRequest,
    ctx: &PortalContext<DB>,
    key: &str,
) -> String {
    let locale = resolve_locale(
        req.header("accept-language").map(String::as_str),
        &ctx.config.default_locale,
    );
    ctx.config.localizer.text_or_key(&locale, key)
}

/// A query parameter, treating empty or whitespace-only values as absent.
pub fn opt_query<'a>(req: &'a PortalRequest, name: &str) -> Option<&'a str> {
    req.query
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}
