//! Subscription tiers and tier-gated feature access.
//!
//! The four tiers form a total order (`starter_pro` < `business_standard` <
//! `professional_plus` < `enterprise_elite`). All feature gating goes through
//! [`PartnerAccess::for_tier`] so the membership tables live in exactly one
//! place instead of being scattered across handlers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four subscription tiers, ordered lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierId {
    StarterPro,
    BusinessStandard,
    ProfessionalPlus,
    EnterpriseElite,
}

impl TierId {
    /// All tiers in ascending rank order.
    pub const ALL: [TierId; 4] = [
        TierId::StarterPro,
        TierId::BusinessStandard,
        TierId::ProfessionalPlus,
        TierId::EnterpriseElite,
    ];

    /// Wire identifier for this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StarterPro => "starter_pro",
            Self::BusinessStandard => "business_standard",
            Self::ProfessionalPlus => "professional_plus",
            Self::EnterpriseElite => "enterprise_elite",
        }
    }

    /// Strictly increasing rank, 1 through 4.
    ///
    /// The rank of an *unknown* tier string is 0; see [`tier_rank`].
    pub fn rank(&self) -> u8 {
        match self {
            Self::StarterPro => 1,
            Self::BusinessStandard => 2,
            Self::ProfessionalPlus => 3,
            Self::EnterpriseElite => 4,
        }
    }

    /// Parse a tier identifier. Returns `None` for anything outside the
    /// four known values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "starter_pro" => Some(Self::StarterPro),
            "business_standard" => Some(Self::BusinessStandard),
            "professional_plus" => Some(Self::ProfessionalPlus),
            "enterprise_elite" => Some(Self::EnterpriseElite),
            _ => None,
        }
    }

    /// Resolve a partner's tier field. Absent or unrecognized values degrade
    /// to the lowest-privilege tier rather than failing.
    pub fn from_partner(tier: Option<&str>) -> Self {
        tier.and_then(Self::parse).unwrap_or(Self::StarterPro)
    }

    pub fn is_at_least(&self, other: TierId) -> bool {
        self.rank() >= other.rank()
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TierId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown tier: {}", s))
    }
}

/// Rank of an arbitrary tier string: 1..4 for the known tiers, 0 otherwise.
///
/// Every tier comparison and upgrade-target computation depends on this
/// total order, so unknown strings fail closed at rank 0.
pub fn tier_rank(tier: &str) -> u8 {
    TierId::parse(tier).map(|t| t.rank()).unwrap_or(0)
}

/// Minimum tier required to unlock a named feature.
///
/// `"profit"` → business_standard, `"trends"` → professional_plus; anything
/// else maps to the lowest tier as a safe default.
pub fn min_tier_for_feature(feature: &str) -> TierId {
    match feature {
        "profit" => TierId::BusinessStandard,
        "trends" => TierId::ProfessionalPlus,
        _ => TierId::StarterPro,
    }
}

/// Capability set derived from a partner's current tier.
///
/// Recomputed on every read; never persisted. The flags are pure membership
/// tests against fixed tier sets; there is no partial or percentage access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerAccess {
    pub tier: TierId,
    #[serde(rename = "profitDashboard")]
    pub profit_dashboard: bool,
    #[serde(rename = "trendHunter")]
    pub trend_hunter: bool,
    #[serde(rename = "fullAnalytics")]
    pub full_analytics: bool,
    #[serde(rename = "premiumFeatures")]
    pub premium_features: bool,
}

impl PartnerAccess {
    /// Derive the capability set for a known tier.
    pub fn for_tier(tier: TierId) -> Self {
        Self {
            tier,
            profit_dashboard: tier.is_at_least(TierId::BusinessStandard),
            trend_hunter: tier.is_at_least(TierId::ProfessionalPlus),
            full_analytics: tier.is_at_least(TierId::BusinessStandard),
            premium_features: tier == TierId::EnterpriseElite,
        }
    }

    /// Derive the capability set from a partner's raw tier field.
    ///
    /// Unknown tier strings resolve identically to `starter_pro`.
    pub fn resolve(tier: Option<&str>) -> Self {
        Self::for_tier(TierId::from_partner(tier))
    }
}

/// Feature flag set attached to a pricing tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierFeatures {
    /// Product listing limit; `None` means unlimited.
    #[serde(rename = "maxProducts")]
    pub max_products: Option<u32>,
    pub analytics: bool,
    #[serde(rename = "prioritySupport")]
    pub priority_support: bool,
    #[serde(rename = "marketplaceIntegrations")]
    pub marketplace_integrations: Vec<String>,
    #[serde(rename = "fulfillmentTypes")]
    pub fulfillment_types: Vec<String>,
    #[serde(rename = "specialFeatures")]
    pub special_features: Vec<String>,
}

/// A subscription tier as served by the catalog. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    /// Fixed monthly cost in the portal currency.
    #[serde(rename = "monthlyCost")]
    pub monthly_cost: f64,
    #[serde(rename = "commissionMin")]
    pub commission_min: f64,
    #[serde(rename = "commissionMax")]
    pub commission_max: f64,
    #[serde(rename = "minRevenue")]
    pub min_revenue: f64,
    #[serde(rename = "maxRevenue")]
    pub max_revenue: Option<f64>,
    pub features: TierFeatures,
    pub active: bool,
}

impl PricingTier {
    /// Rank of this tier within the total order (0 for unknown ids).
    pub fn rank(&self) -> u8 {
        tier_rank(&self.id)
    }

    /// The seeded four-tier catalog.
    pub fn default_catalog() -> Vec<PricingTier> {
        vec![
            PricingTier {
                id: TierId::StarterPro.as_str().to_string(),
                display_name: "Starter Pro".to_string(),
                monthly_cost: 990_000.0,
                commission_min: 20.0,
                commission_max: 25.0,
                min_revenue: 0.0,
                max_revenue: Some(10_000_000.0),
                features: TierFeatures {
                    max_products: Some(50),
                    analytics: false,
                    priority_support: false,
                    marketplace_integrations: vec!["uzum".to_string()],
                    fulfillment_types: vec!["fbs".to_string()],
                    special_features: vec![],
                },
                active: true,
            },
            PricingTier {
                id: TierId::BusinessStandard.as_str().to_string(),
                display_name: "Business Standard".to_string(),
                monthly_cost: 1_990_000.0,
                commission_min: 15.0,
                commission_max: 20.0,
                min_revenue: 10_000_000.0,
                max_revenue: Some(50_000_000.0),
                features: TierFeatures {
                    max_products: Some(200),
                    analytics: true,
                    priority_support: false,
                    marketplace_integrations: vec!["uzum".to_string(), "wildberries".to_string()],
                    fulfillment_types: vec!["fbs".to_string(), "fbo".to_string()],
                    special_features: vec!["profit_dashboard".to_string()],
                },
                active: true,
            },
            PricingTier {
                id: TierId::ProfessionalPlus.as_str().to_string(),
                display_name: "Professional Plus".to_string(),
                monthly_cost: 3_490_000.0,
                commission_min: 10.0,
                commission_max: 15.0,
                min_revenue: 50_000_000.0,
                max_revenue: Some(200_000_000.0),
                features: TierFeatures {
                    max_products: Some(1000),
                    analytics: true,
                    priority_support: true,
                    marketplace_integrations: vec![
                        "uzum".to_string(),
                        "wildberries".to_string(),
                        "ozon".to_string(),
                    ],
                    fulfillment_types: vec!["fbs".to_string(), "fbo".to_string()],
                    special_features: vec![
                        "profit_dashboard".to_string(),
                        "trend_hunter".to_string(),
                    ],
                },
                active: true,
            },
            PricingTier {
                id: TierId::EnterpriseElite.as_str().to_string(),
                display_name: "Enterprise Elite".to_string(),
                monthly_cost: 5_990_000.0,
                commission_min: 5.0,
                commission_max: 10.0,
                min_revenue: 200_000_000.0,
                max_revenue: None,
                features: TierFeatures {
                    max_products: None,
                    analytics: true,
                    priority_support: true,
                    marketplace_integrations: vec![
                        "uzum".to_string(),
                        "wildberries".to_string(),
                        "ozon".to_string(),
                        "yandex_market".to_string(),
                    ],
                    fulfillment_types: vec!["fbs".to_string(), "fbo".to_string(), "dbs".to_string()],
                    special_features: vec![
                        "profit_dashboard".to_string(),
                        "trend_hunter".to_string(),
                        "dedicated_manager".to_string(),
                    ],
                },
                active: true,
            },
        ]
    }
}

/// Tiers a partner can upgrade to: those whose rank strictly exceeds the
/// current tier's rank, ascending by rank.
pub fn available_upgrade_targets(current: TierId, tiers: &[PricingTier]) -> Vec<PricingTier> {
    let mut targets: Vec<PricingTier> = tiers
        .iter()
        .filter(|t| t.rank() > current.rank())
        .cloned()
        .collect();
    targets.sort_by_key(|t| t.rank());
    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_is_strictly_increasing() {
        assert_eq!(tier_rank("starter_pro"), 1);
        assert_eq!(tier_rank("business_standard"), 2);
        assert_eq!(tier_rank("professional_plus"), 3);
        assert_eq!(tier_rank("enterprise_elite"), 4);
    }

    #[test]
    fn unknown_tier_ranks_zero() {
        assert_eq!(tier_rank("platinum"), 0);
        assert_eq!(tier_rank(""), 0);
        assert_eq!(tier_rank("STARTER_PRO"), 0);
    }

    #[test]
    fn access_flags_match_membership_table() {
        // (tier, profit, trends, analytics, premium)
        let table = [
            (TierId::StarterPro, false, false, false, false),
            (TierId::BusinessStandard, true, false, true, false),
            (TierId::ProfessionalPlus, true, true, true, false),
            (TierId::EnterpriseElite, true, true, true, true),
        ];
        for (tier, profit, trends, analytics, premium) in table {
            let access = PartnerAccess::for_tier(tier);
            assert_eq!(access.profit_dashboard, profit, "{tier} profit");
            assert_eq!(access.trend_hunter, trends, "{tier} trends");
            assert_eq!(access.full_analytics, analytics, "{tier} analytics");
            assert_eq!(access.premium_features, premium, "{tier} premium");
        }
    }

    #[test]
    fn unrecognized_tier_resolves_as_starter_pro() {
        let unknown = PartnerAccess::resolve(Some("golden_unicorn"));
        let missing = PartnerAccess::resolve(None);
        let lowest = PartnerAccess::for_tier(TierId::StarterPro);
        assert_eq!(unknown, lowest);
        assert_eq!(missing, lowest);
    }

    #[test]
    fn min_tier_per_feature() {
        assert_eq!(min_tier_for_feature("profit"), TierId::BusinessStandard);
        assert_eq!(min_tier_for_feature("trends"), TierId::ProfessionalPlus);
        assert_eq!(min_tier_for_feature("anything"), TierId::StarterPro);
    }

    #[test]
    fn upgrade_targets_above_current_in_order() {
        let catalog = PricingTier::default_catalog();
        let targets = available_upgrade_targets(TierId::BusinessStandard, &catalog);
        let ids: Vec<&str> = targets.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["professional_plus", "enterprise_elite"]);

        let targets = available_upgrade_targets(TierId::EnterpriseElite, &catalog);
        assert!(targets.is_empty());
    }

    #[test]
    fn upgrade_targets_sorted_even_when_catalog_is_not() {
        let mut catalog = PricingTier::default_catalog();
        catalog.reverse();
        let targets = available_upgrade_targets(TierId::StarterPro, &catalog);
        let ids: Vec<&str> = targets.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["business_standard", "professional_plus", "enterprise_elite"]
        );
    }

    #[test]
    fn tier_serde_uses_wire_names() {
        let json = serde_json::to_string(&TierId::ProfessionalPlus).unwrap();
        assert_eq!(json, "\"professional_plus\"");
        let parsed: TierId = serde_json::from_str("\"enterprise_elite\"").unwrap();
        assert_eq!(parsed, TierId::EnterpriseElite);
    }
}
