//! Profit breakdown calculation.
//!
//! Pure derivation from raw period figures: no persistence, no hidden state,
//! identical inputs produce identical breakdowns. The cost defaults (tax,
//! logistics, per-order SPT fee) are named configuration constants rather
//! than inlined literals so deployments can override them.

use serde::{Deserialize, Deserializer, Serialize};

/// Tax charged on revenue, as a fraction.
pub const DEFAULT_TAX_RATE: f64 = 0.03;

/// Logistics estimate applied when no explicit logistics cost is supplied.
pub const DEFAULT_LOGISTICS_RATE: f64 = 0.06;

/// Per-order service fee (SPT) applied when no explicit SPT cost is supplied.
pub const DEFAULT_PER_ORDER_FEE: f64 = 3_500.0;

/// Revenue of the synthetic sample shown when no figures exist.
pub const SAMPLE_REVENUE: f64 = 5_440_000.0;
/// Order count of the synthetic sample.
pub const SAMPLE_ORDER_COUNT: u32 = 96;
pub const SAMPLE_FULFILLMENT_COST: f64 = 752_000.0;
pub const SAMPLE_COMMISSION: f64 = 544_000.0;
pub const SAMPLE_PRODUCT_COST: f64 = 2_176_000.0;

/// Cost model constants used by the [`ProfitCalculator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostModel {
    /// Tax as a fraction of revenue.
    #[serde(rename = "taxRate")]
    pub tax_rate: f64,
    /// Logistics default as a fraction of revenue.
    #[serde(rename = "logisticsRate")]
    pub logistics_rate: f64,
    /// SPT default, per order.
    #[serde(rename = "perOrderFee")]
    pub per_order_fee: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
            logistics_rate: DEFAULT_LOGISTICS_RATE,
            per_order_fee: DEFAULT_PER_ORDER_FEE,
        }
    }
}

// ─── Lenient numeric parsing ───────────────────────────────────────────
//
// Profit figures arrive from marketplace exports where numeric columns are
// frequently strings, empty, or garbage. The ambient convention is: treat
// unparsable as 0, never error.

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value))
}

fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        other => Ok(Some(coerce_f64(&other))),
    }
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value).max(0.0) as u32)
}

fn coerce_f64(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Raw per-period, per-marketplace figures as supplied by the backend feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodFigures {
    pub period: String,
    pub marketplace: String,
    #[serde(deserialize_with = "lenient_f64", default)]
    pub revenue: f64,
    #[serde(rename = "fulfillmentCost", deserialize_with = "lenient_f64", default)]
    pub fulfillment_cost: f64,
    #[serde(deserialize_with = "lenient_f64", default)]
    pub commission: f64,
    #[serde(rename = "productCost", deserialize_with = "lenient_f64", default)]
    pub product_cost: f64,
    /// Explicit logistics cost. Absent or zero means "use the default rate".
    #[serde(deserialize_with = "lenient_opt_f64", default)]
    pub logistics: Option<f64>,
    /// Explicit SPT cost. Absent or zero means "use the per-order default".
    #[serde(deserialize_with = "lenient_opt_f64", default)]
    pub spt: Option<f64>,
    #[serde(rename = "orderCount", deserialize_with = "lenient_u32", default)]
    pub order_count: u32,
}

/// Per-period cost/profit breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitBreakdown {
    pub period: String,
    pub marketplace: String,
    pub revenue: f64,
    #[serde(rename = "fulfillmentCost")]
    pub fulfillment_cost: f64,
    pub commission: f64,
    #[serde(rename = "productCost")]
    pub product_cost: f64,
    pub tax: f64,
    pub logistics: f64,
    pub spt: f64,
    #[serde(rename = "totalCost")]
    pub total_cost: f64,
    #[serde(rename = "netProfit")]
    pub net_profit: f64,
    /// Percentage, rounded to two decimal places. Zero when revenue is zero.
    #[serde(rename = "profitMargin")]
    pub profit_margin: f64,
    /// True when this record is the placeholder sample, not live data.
    pub synthetic: bool,
}

/// Derives [`ProfitBreakdown`] records from raw figures.
#[derive(Debug, Clone, Default)]
pub struct ProfitCalculator {
    model: CostModel,
}

impl ProfitCalculator {
    pub fn new(model: CostModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &CostModel {
        &self.model
    }

    /// Break down a single period record.
    pub fn breakdown(&self, figures: &PeriodFigures) -> ProfitBreakdown {
        self.breakdown_inner(figures, false)
    }

    /// Break down a set of period records.
    ///
    /// An empty input substitutes one deterministic synthetic sample so the
    /// dashboard is never empty; the record carries `synthetic: true` so
    /// callers can always tell it apart from live data.
    pub fn breakdowns(&self, figures: &[PeriodFigures]) -> Vec<ProfitBreakdown> {
        if figures.is_empty() {
            return vec![self.synthetic_sample()];
        }
        figures.iter().map(|f| self.breakdown(f)).collect()
    }

    /// The deterministic placeholder record used when no figures exist.
    pub fn synthetic_sample(&self) -> ProfitBreakdown {
        let figures = PeriodFigures {
            period: "sample".to_string(),
            marketplace: "all".to_string(),
            revenue: SAMPLE_REVENUE,
            fulfillment_cost: SAMPLE_FULFILLMENT_COST,
            commission: SAMPLE_COMMISSION,
            product_cost: SAMPLE_PRODUCT_COST,
            logistics: None,
            spt: None,
            order_count: SAMPLE_ORDER_COUNT,
        };
        self.breakdown_inner(&figures, true)
    }

    fn breakdown_inner(&self, figures: &PeriodFigures, synthetic: bool) -> ProfitBreakdown {
        let revenue = figures.revenue;
        let tax = revenue * self.model.tax_rate;
        // A supplied zero counts as "not supplied": the feed emits 0 for
        // columns it has no data for.
        let logistics = match figures.logistics {
            Some(v) if v > 0.0 => v,
            _ => revenue * self.model.logistics_rate,
        };
        let spt = match figures.spt {
            Some(v) if v > 0.0 => v,
            _ => f64::from(figures.order_count) * self.model.per_order_fee,
        };

        let total_cost = figures.fulfillment_cost
            + figures.commission
            + figures.product_cost
            + tax
            + logistics
            + spt;
        let net_profit = revenue - total_cost;
        let profit_margin = if revenue > 0.0 {
            round2(net_profit / revenue * 100.0)
        } else {
            0.0
        };

        ProfitBreakdown {
            period: figures.period.clone(),
            marketplace: figures.marketplace.clone(),
            revenue,
            fulfillment_cost: figures.fulfillment_cost,
            commission: figures.commission,
            product_cost: figures.product_cost,
            tax,
            logistics,
            spt,
            total_cost,
            net_profit,
            profit_margin,
            synthetic,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_figures() -> PeriodFigures {
        PeriodFigures {
            period: "2024-06".to_string(),
            marketplace: "uzum".to_string(),
            revenue: 5_440_000.0,
            fulfillment_cost: 752_000.0,
            commission: 544_000.0,
            product_cost: 2_176_000.0,
            logistics: None,
            spt: None,
            order_count: 96,
        }
    }

    #[test]
    fn reference_breakdown() {
        let calc = ProfitCalculator::default();
        let b = calc.breakdown(&reference_figures());

        assert_eq!(b.tax, 163_200.0);
        assert_eq!(b.logistics, 326_400.0);
        assert_eq!(b.spt, 336_000.0);
        assert_eq!(b.total_cost, 4_297_600.0);
        assert_eq!(b.net_profit, 1_142_400.0);
        assert_eq!(b.profit_margin, 21.0);
        assert!(!b.synthetic);
    }

    #[test]
    fn explicit_logistics_and_spt_override_defaults() {
        let calc = ProfitCalculator::default();
        let mut figures = reference_figures();
        figures.logistics = Some(100_000.0);
        figures.spt = Some(50_000.0);

        let b = calc.breakdown(&figures);
        assert_eq!(b.logistics, 100_000.0);
        assert_eq!(b.spt, 50_000.0);
    }

    #[test]
    fn supplied_zero_falls_back_to_defaults() {
        let calc = ProfitCalculator::default();
        let mut figures = reference_figures();
        figures.logistics = Some(0.0);
        figures.spt = Some(0.0);

        let b = calc.breakdown(&figures);
        assert_eq!(b.logistics, 326_400.0);
        assert_eq!(b.spt, 336_000.0);
    }

    #[test]
    fn zero_revenue_has_zero_margin() {
        let calc = ProfitCalculator::default();
        let mut figures = reference_figures();
        figures.revenue = 0.0;

        let b = calc.breakdown(&figures);
        assert_eq!(b.profit_margin, 0.0);
        assert!(b.net_profit < 0.0);
    }

    #[test]
    fn empty_input_substitutes_flagged_sample() {
        let calc = ProfitCalculator::default();
        let breakdowns = calc.breakdowns(&[]);

        assert_eq!(breakdowns.len(), 1);
        let sample = &breakdowns[0];
        assert!(sample.synthetic);
        assert_eq!(sample.revenue, SAMPLE_REVENUE);
        // The sample goes through the same general formula.
        assert_eq!(sample.total_cost, 4_297_600.0);
        assert_eq!(sample.profit_margin, 21.0);
    }

    #[test]
    fn calculation_is_idempotent() {
        let calc = ProfitCalculator::default();
        let figures = vec![reference_figures()];
        let first = calc.breakdowns(&figures);
        let second = calc.breakdowns(&figures);
        assert_eq!(first, second);
    }

    #[test]
    fn malformed_numeric_strings_parse_to_zero() {
        let raw = serde_json::json!({
            "period": "2024-06",
            "marketplace": "uzum",
            "revenue": "1000000",
            "fulfillmentCost": "n/a",
            "commission": null,
            "productCost": 250000,
            "orderCount": "12"
        });
        let figures: PeriodFigures = serde_json::from_value(raw).unwrap();
        assert_eq!(figures.revenue, 1_000_000.0);
        assert_eq!(figures.fulfillment_cost, 0.0);
        assert_eq!(figures.commission, 0.0);
        assert_eq!(figures.product_cost, 250_000.0);
        assert_eq!(figures.order_count, 12);
    }

    #[test]
    fn custom_cost_model_is_honored() {
        let calc = ProfitCalculator::new(CostModel {
            tax_rate: 0.10,
            logistics_rate: 0.0,
            per_order_fee: 0.0,
        });
        let b = calc.breakdown(&reference_figures());
        assert_eq!(b.tax, 544_000.0);
        assert_eq!(b.logistics, 0.0);
        assert_eq!(b.spt, 0.0);
    }
}
