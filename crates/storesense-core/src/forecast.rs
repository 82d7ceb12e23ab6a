//! # Forecast Engine
//!
//! Turns an item's stock, price and sales velocity into restocking signals.
//!
//! ## Signals
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Item: stock=10, price=10.00, avg_daily_sales=2, lead time 7 days      │
//! │                                                                         │
//! │  days_to_sell_out = round(10 / 2, 1)              = 5.0                 │
//! │  reorder_amount   = max(0, ceil(2 × 7 − 10))      = 4                   │
//! │  low_stock        = 10 < max(5, 2 × 3) OR 4 > 0   = true                │
//! │  line_value       = 10.00 × 10                    = 100.00              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An item with `avg_daily_sales == 0` never sells out: `days_to_sell_out`
//! is `None` and no arithmetic error is possible.
//!
//! Inputs are assumed validated (see [`crate::validation`]); nothing here
//! fails or has side effects.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Item;
use crate::{DEFAULT_COVER_DAYS, DEFAULT_LEAD_TIME_DAYS, DEFAULT_LOW_STOCK_THRESHOLD};

// =============================================================================
// Policy
// =============================================================================

/// Store-wide forecasting parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ForecastPolicy {
    /// Threshold used when an item has no override.
    pub low_stock_threshold: i64,
    /// Days of demand a reorder must cover.
    pub lead_time_days: u32,
    /// Days of demand below which stock is low even above the threshold.
    pub cover_days: f64,
}

impl Default for ForecastPolicy {
    fn default() -> Self {
        ForecastPolicy {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            lead_time_days: DEFAULT_LEAD_TIME_DAYS,
            cover_days: DEFAULT_COVER_DAYS,
        }
    }
}

impl ForecastPolicy {
    pub fn with_low_stock_threshold(mut self, threshold: i64) -> Self {
        self.low_stock_threshold = threshold;
        self
    }

    pub fn with_lead_time_days(mut self, days: u32) -> Self {
        self.lead_time_days = days;
        self
    }
}

// =============================================================================
// Input / Output
// =============================================================================

/// The item-like record the engine works on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastInput {
    pub stock: i64,
    pub price: Money,
    pub avg_daily_sales: f64,
    /// Falls back to [`ForecastPolicy::low_stock_threshold`].
    pub threshold: Option<i64>,
    /// Falls back to [`ForecastPolicy::lead_time_days`].
    pub lead_time_days: Option<u32>,
}

impl ForecastInput {
    pub fn new(stock: i64, price: Money, avg_daily_sales: f64) -> Self {
        ForecastInput {
            stock,
            price,
            avg_daily_sales,
            threshold: None,
            lead_time_days: None,
        }
    }

    pub fn with_threshold(mut self, threshold: i64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn with_lead_time_days(mut self, days: u32) -> Self {
        self.lead_time_days = Some(days);
        self
    }
}

impl From<&Item> for ForecastInput {
    fn from(item: &Item) -> Self {
        ForecastInput {
            stock: item.stock,
            price: item.price(),
            avg_daily_sales: item.avg_daily_sales,
            threshold: item.low_stock_threshold,
            lead_time_days: None,
        }
    }
}

/// Computed restocking signals for one item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemMetrics {
    /// `None` when the item does not sell (no depletion forecast).
    pub days_to_sell_out: Option<f64>,
    /// Units to order to cover the lead time; never negative.
    pub reorder_amount: i64,
    pub low_stock: bool,
    pub line_value: Money,
}

// =============================================================================
// Engine
// =============================================================================

/// Computes all signals for one item.
///
/// ## Example
/// ```rust
/// use storesense_core::forecast::{compute_item_metrics, ForecastInput, ForecastPolicy};
/// use storesense_core::Money;
///
/// // Not selling: no forecast, nothing to reorder, above threshold
/// let input = ForecastInput::new(50, Money::from_cents(300), 0.0);
/// let metrics = compute_item_metrics(&input, &ForecastPolicy::default());
///
/// assert_eq!(metrics.days_to_sell_out, None);
/// assert_eq!(metrics.reorder_amount, 0);
/// assert!(!metrics.low_stock);
/// assert_eq!(metrics.line_value.cents(), 15_000);
/// ```
pub fn compute_item_metrics(input: &ForecastInput, policy: &ForecastPolicy) -> ItemMetrics {
    let threshold = input.threshold.unwrap_or(policy.low_stock_threshold);
    let lead_time_days = input.lead_time_days.unwrap_or(policy.lead_time_days);

    let reorder = reorder_amount(input.stock, input.avg_daily_sales, lead_time_days);

    ItemMetrics {
        days_to_sell_out: days_to_sell_out(input.stock, input.avg_daily_sales),
        reorder_amount: reorder,
        low_stock: is_low_stock(
            input.stock,
            input.avg_daily_sales,
            threshold,
            policy.cover_days,
            reorder,
        ),
        line_value: line_value(input.price, input.stock),
    }
}

/// `round(stock / avg_daily_sales, 1)`, or `None` if the item does not sell.
pub fn days_to_sell_out(stock: i64, avg_daily_sales: f64) -> Option<f64> {
    if avg_daily_sales > 0.0 {
        Some(round_one_decimal(stock as f64 / avg_daily_sales))
    } else {
        None
    }
}

/// `max(0, ceil(avg_daily_sales × lead_time_days − stock))`.
pub fn reorder_amount(stock: i64, avg_daily_sales: f64, lead_time_days: u32) -> i64 {
    let shortfall = avg_daily_sales * f64::from(lead_time_days) - stock as f64;
    // NaN.max(0.0) is 0.0
    shortfall.ceil().max(0.0) as i64
}

/// Low when stock is under `max(threshold, avg_daily_sales × cover_days)` or
/// anything needs reordering.
pub fn is_low_stock(
    stock: i64,
    avg_daily_sales: f64,
    threshold: i64,
    cover_days: f64,
    reorder_amount: i64,
) -> bool {
    let floor = (threshold as f64).max(avg_daily_sales * cover_days);
    (stock as f64) < floor || reorder_amount > 0
}

/// `price × stock`.
#[inline]
pub fn line_value(price: Money, stock: i64) -> Money {
    price.multiply_quantity(stock)
}

/// Sum of line values; zero for no items.
///
/// ## Example
/// ```rust
/// use storesense_core::forecast::aggregate_value;
/// use storesense_core::Item;
///
/// let items: Vec<Item> = Vec::new();
/// assert!(aggregate_value(&items).is_zero());
/// ```
pub fn aggregate_value<'a, I>(items: I) -> Money
where
    I: IntoIterator<Item = &'a Item>,
{
    items
        .into_iter()
        .map(|item| line_value(item.price(), item.stock))
        .sum()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// =============================================================================
// Batch annotation
// =============================================================================

/// An item together with its computed signals, as a dashboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemForecast {
    pub item: Item,
    pub metrics: ItemMetrics,
}

/// Store-level totals over a set of rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventorySummary {
    pub item_count: usize,
    pub low_stock_count: usize,
    pub total_units: i64,
    pub total_value: Money,
}

/// Annotates every item, keeping the input order.
pub fn forecast_items(items: Vec<Item>, policy: &ForecastPolicy) -> Vec<ItemForecast> {
    items
        .into_iter()
        .map(|item| {
            let metrics = compute_item_metrics(&ForecastInput::from(&item), policy);
            ItemForecast { item, metrics }
        })
        .collect()
}

pub fn summarize(rows: &[ItemForecast]) -> InventorySummary {
    InventorySummary {
        item_count: rows.len(),
        low_stock_count: rows.iter().filter(|row| row.metrics.low_stock).count(),
        total_units: rows.iter().map(|row| row.item.stock).sum(),
        total_value: rows.iter().map(|row| row.metrics.line_value).sum(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(stock: i64, price_cents: i64, avg_daily_sales: f64) -> Item {
        let now = Utc::now();
        Item {
            id: format!("item-{stock}-{price_cents}"),
            store_id: "store".to_string(),
            name: "Test".to_string(),
            stock,
            price_cents,
            avg_daily_sales,
            low_stock_threshold: None,
            created_at: now,
            updated_at: now,
        }
    }

    const STOCKS: [i64; 7] = [0, 1, 3, 10, 14, 50, 999];
    const SALES: [f64; 7] = [0.0, 0.3, 1.0, 2.0, 2.5, 7.0, 40.0];

    #[test]
    fn test_reference_scenario_selling_item() {
        let input = ForecastInput::new(10, Money::from_cents(1000), 2.0);
        let metrics = compute_item_metrics(&input, &ForecastPolicy::default());

        assert_eq!(metrics.days_to_sell_out, Some(5.0));
        assert_eq!(metrics.reorder_amount, 4);
        assert!(metrics.low_stock);
        assert_eq!(metrics.line_value.cents(), 10_000);
    }

    #[test]
    fn test_reference_scenario_idle_item() {
        let input = ForecastInput::new(50, Money::from_cents(0), 0.0).with_threshold(5);
        let metrics = compute_item_metrics(&input, &ForecastPolicy::default());

        assert_eq!(metrics.days_to_sell_out, None);
        assert_eq!(metrics.reorder_amount, 0);
        assert!(!metrics.low_stock);
    }

    #[test]
    fn test_days_to_sell_out_rounds_to_one_decimal() {
        assert_eq!(days_to_sell_out(10, 3.0), Some(3.3));
        assert_eq!(days_to_sell_out(20, 3.0), Some(6.7));
        assert_eq!(days_to_sell_out(0, 4.0), Some(0.0));

        for &stock in &STOCKS {
            for &sales in SALES.iter().filter(|s| **s > 0.0) {
                let expected = (stock as f64 / sales * 10.0).round() / 10.0;
                assert_eq!(days_to_sell_out(stock, sales), Some(expected));
            }
        }
    }

    #[test]
    fn test_zero_sales_is_open_ended() {
        for &stock in &STOCKS {
            assert_eq!(days_to_sell_out(stock, 0.0), None);
            assert_eq!(reorder_amount(stock, 0.0, 7), 0);
        }
    }

    #[test]
    fn test_reorder_never_negative_and_zero_when_covered() {
        for &stock in &STOCKS {
            for &sales in &SALES {
                for lead in [0u32, 1, 7, 30] {
                    let amount = reorder_amount(stock, sales, lead);
                    assert!(amount >= 0);
                    if stock as f64 >= sales * f64::from(lead) {
                        assert_eq!(amount, 0, "stock={stock} sales={sales} lead={lead}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_reorder_rounds_up() {
        // 2.5 × 7 = 17.5 demand, 10 on hand → 7.5 → 8
        assert_eq!(reorder_amount(10, 2.5, 7), 8);
        assert_eq!(reorder_amount(0, 0.3, 7), 3);
    }

    #[test]
    fn test_low_stock_whenever_reorder_needed() {
        let policy = ForecastPolicy::default();
        for &stock in &STOCKS {
            for &sales in &SALES {
                for threshold in [0, 5, 100] {
                    let input = ForecastInput::new(stock, Money::zero(), sales)
                        .with_threshold(threshold);
                    let metrics = compute_item_metrics(&input, &policy);
                    if metrics.reorder_amount > 0 {
                        assert!(metrics.low_stock);
                    }
                }
            }
        }
    }

    #[test]
    fn test_low_stock_threshold_breach() {
        // No sales, so only the threshold can trigger
        assert!(is_low_stock(4, 0.0, 5, 3.0, 0));
        assert!(!is_low_stock(5, 0.0, 5, 3.0, 0));
        // Demand cover dominates a small threshold: 3 × 3 = 9
        assert!(is_low_stock(8, 3.0, 2, 3.0, 0));
        assert!(!is_low_stock(9, 3.0, 2, 3.0, 0));
    }

    #[test]
    fn test_item_threshold_overrides_policy() {
        let mut low = item(8, 100, 0.0);
        low.low_stock_threshold = Some(10);
        let policy = ForecastPolicy::default();

        assert!(compute_item_metrics(&ForecastInput::from(&low), &policy).low_stock);
        assert!(!compute_item_metrics(&ForecastInput::from(&item(8, 100, 0.0)), &policy).low_stock);
    }

    #[test]
    fn test_lead_time_override() {
        let input = ForecastInput::new(10, Money::zero(), 2.0).with_lead_time_days(3);
        let metrics = compute_item_metrics(&input, &ForecastPolicy::default());
        assert_eq!(metrics.reorder_amount, 0);

        let policy = ForecastPolicy::default().with_lead_time_days(14);
        let metrics = compute_item_metrics(&ForecastInput::new(10, Money::zero(), 2.0), &policy);
        assert_eq!(metrics.reorder_amount, 18);
    }

    #[test]
    fn test_aggregate_value_is_additive() {
        let a = vec![item(10, 1000, 2.0), item(3, 250, 0.0)];
        let b = vec![item(7, 99, 1.0), item(0, 5000, 4.0)];
        let all: Vec<Item> = a.iter().chain(b.iter()).cloned().collect();

        assert!(aggregate_value(&Vec::<Item>::new()).is_zero());
        assert_eq!(aggregate_value(&a).cents(), 10_750);
        assert_eq!(
            aggregate_value(&all),
            aggregate_value(&a) + aggregate_value(&b)
        );
    }

    #[test]
    fn test_forecast_items_keeps_order_and_summarizes() {
        let items = vec![item(10, 1000, 2.0), item(50, 300, 0.0), item(2, 150, 0.0)];
        let rows = forecast_items(items, &ForecastPolicy::default());

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].item.stock, 10);
        assert_eq!(rows[2].item.stock, 2);

        let summary = summarize(&rows);
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.low_stock_count, 2);
        assert_eq!(summary.total_units, 62);
        assert_eq!(summary.total_value.cents(), 10_000 + 15_000 + 300);
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), InventorySummary::default());
    }
}
