//! Metrics Service
//!
//! Aggregates raw product and bill records into the derived analytics
//! snapshot backing the dashboard and both AI surfaces. Aggregation is a
//! pure function of `(products, bills)`: no state survives between calls
//! and the snapshot is never persisted or incrementally updated.

use crate::state::SessionState;
use crate::store::types::{Bill, Product};
use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, warn};

/// Stock bucket boundaries: critical < 5, low < 10, medium < 30, healthy >= 30
const CRITICAL_BELOW: i64 = 5;
const MEDIUM_BELOW: i64 = 30;
/// Doubles as the dashboard low-stock alert threshold
pub(crate) const LOW_BELOW: i64 = 10;

const TOP_SELLERS: usize = 5;
const TOP_BRANDS: usize = 6;
const TOP_MARGINS: usize = 10;
const TREND_DAYS: usize = 30;

/// Revenue for one calendar day of the trailing window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// ISO calendar date (YYYY-MM-DD)
    pub date: String,
    pub revenue: f64,
    pub bill_count: usize,
}

/// Counts per stock-health range; mutually exclusive and exhaustive
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StockBuckets {
    pub critical: usize,
    pub low: usize,
    pub medium: usize,
    pub healthy: usize,
}

/// Sales accumulated for one product across all bills
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSales {
    pub product_id: String,
    /// Last-seen line-item name; may diverge from the current product name
    pub name: String,
    pub quantity: i64,
    pub revenue: f64,
}

/// Current stock on hand for one brand
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandShare {
    pub brand: String,
    pub quantity: i64,
}

/// Profit margin over cost for one product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductMargin {
    pub product_id: String,
    pub name: String,
    /// Percent margin, rounded to one decimal
    pub margin_pct: f64,
}

/// Immutable analytics snapshot derived from `(products, bills)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub revenue_trend: Vec<TrendPoint>,
    pub stock_buckets: StockBuckets,
    pub top_selling_by_quantity: Vec<ProductSales>,
    pub lowest_selling_by_quantity: Vec<ProductSales>,
    pub top_selling_by_revenue: Vec<ProductSales>,
    pub brand_distribution: Vec<BrandShare>,
    pub profit_margins: Vec<ProductMargin>,
    pub total_products: usize,
    pub total_stock_units: i64,
    pub low_stock_count: usize,
    pub total_revenue: f64,
    pub total_bills: usize,
    pub avg_bill_value: f64,
    pub total_inventory_value: f64,
    pub potential_revenue: f64,
    pub potential_profit: f64,
}

/// Metrics service for record retrieval and snapshot computation
pub struct MetricsService;

impl MetricsService {
    /// Fetch products and bills concurrently and store them on the session.
    ///
    /// The two requests run independently; either one failing degrades that
    /// collection to empty so the dashboard stays functional.
    pub async fn fetch_records(state: &SessionState) {
        info!("MetricsService::fetch_records");

        let (products, bills) = tokio::join!(
            state.store.list_products(&state.auth_token),
            state.store.list_bills(&state.auth_token),
        );

        let products = products.unwrap_or_else(|e| {
            warn!("Product fetch failed, continuing with empty list: {}", e);
            Vec::new()
        });
        let bills = bills.unwrap_or_else(|e| {
            warn!("Bill fetch failed, continuing with empty list: {}", e);
            Vec::new()
        });

        state.set_records(products, bills);
    }

    /// Compute a snapshot from the session's current records
    pub fn snapshot(state: &SessionState) -> MetricsSnapshot {
        Self::compute(&state.get_products(), &state.get_bills())
    }

    /// Compute a snapshot with the trend window ending on the current UTC date
    pub fn compute(products: &[Product], bills: &[Bill]) -> MetricsSnapshot {
        Self::compute_at(products, bills, Utc::now().date_naive())
    }

    /// Pure aggregation core; `today` is the last day of the 30-day window
    pub fn compute_at(products: &[Product], bills: &[Bill], today: NaiveDate) -> MetricsSnapshot {
        let sales = Self::product_sales(bills);

        let mut top_selling_by_quantity = sales.clone();
        top_selling_by_quantity.sort_by(|a, b| b.quantity.cmp(&a.quantity));
        top_selling_by_quantity.truncate(TOP_SELLERS);

        let mut lowest_selling_by_quantity = sales.clone();
        lowest_selling_by_quantity.sort_by(|a, b| a.quantity.cmp(&b.quantity));
        lowest_selling_by_quantity.truncate(TOP_SELLERS);

        let mut top_selling_by_revenue = sales;
        top_selling_by_revenue.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
        top_selling_by_revenue.truncate(TOP_SELLERS);

        let total_revenue: f64 = bills.iter().map(|b| b.total_amount).sum();
        let total_bills = bills.len();
        let avg_bill_value = if total_bills > 0 {
            total_revenue / total_bills as f64
        } else {
            0.0
        };

        let total_inventory_value: f64 = products
            .iter()
            .map(|p| p.cost_price * p.quantity as f64)
            .sum();
        let potential_revenue: f64 = products
            .iter()
            .map(|p| p.selling_price * p.quantity as f64)
            .sum();

        MetricsSnapshot {
            revenue_trend: Self::revenue_trend(bills, today),
            stock_buckets: Self::stock_buckets(products),
            top_selling_by_quantity,
            lowest_selling_by_quantity,
            top_selling_by_revenue,
            brand_distribution: Self::brand_distribution(products),
            profit_margins: Self::profit_margins(products),
            total_products: products.len(),
            total_stock_units: products.iter().map(|p| p.quantity).sum(),
            low_stock_count: products.iter().filter(|p| p.quantity < LOW_BELOW).count(),
            total_revenue,
            total_bills,
            avg_bill_value,
            total_inventory_value,
            potential_revenue,
            potential_profit: potential_revenue - total_inventory_value,
        }
    }

    // ========================================================================
    // Private Helper Methods
    // ========================================================================

    /// Accumulate quantity and revenue per product across all bill lines.
    ///
    /// First-sale order is preserved so the stable sorts above break ties by
    /// it. The last-seen line-item name wins for renamed products.
    fn product_sales(bills: &[Bill]) -> Vec<ProductSales> {
        let mut sales: Vec<ProductSales> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for bill in bills {
            for item in &bill.items {
                let idx = *index.entry(item.product_id.clone()).or_insert_with(|| {
                    sales.push(ProductSales {
                        product_id: item.product_id.clone(),
                        name: item.name.clone(),
                        quantity: 0,
                        revenue: 0.0,
                    });
                    sales.len() - 1
                });

                let entry = &mut sales[idx];
                entry.name = item.name.clone();
                entry.quantity += item.quantity;
                entry.revenue += item.quantity as f64 * item.price;
            }
        }

        sales
    }

    /// Classify every product into exactly one stock-health bucket
    fn stock_buckets(products: &[Product]) -> StockBuckets {
        let mut buckets = StockBuckets::default();

        for product in products {
            if product.quantity < CRITICAL_BELOW {
                buckets.critical += 1;
            } else if product.quantity < LOW_BELOW {
                buckets.low += 1;
            } else if product.quantity < MEDIUM_BELOW {
                buckets.medium += 1;
            } else {
                buckets.healthy += 1;
            }
        }

        buckets
    }

    /// Top brands by summed current stock quantity
    fn brand_distribution(products: &[Product]) -> Vec<BrandShare> {
        let mut shares: Vec<BrandShare> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for product in products {
            let idx = *index.entry(product.brand.clone()).or_insert_with(|| {
                shares.push(BrandShare {
                    brand: product.brand.clone(),
                    quantity: 0,
                });
                shares.len() - 1
            });
            shares[idx].quantity += product.quantity;
        }

        shares.sort_by(|a, b| b.quantity.cmp(&a.quantity));
        shares.truncate(TOP_BRANDS);
        shares
    }

    /// 30 consecutive calendar days ending on `today` inclusive.
    ///
    /// A bill belongs to a day iff its `created_at` string starts with the
    /// ISO date. No timezone normalization beyond that.
    fn revenue_trend(bills: &[Bill], today: NaiveDate) -> Vec<TrendPoint> {
        (0..TREND_DAYS)
            .map(|i| {
                let date = today - Duration::days((TREND_DAYS - 1 - i) as i64);
                let label = date.format("%Y-%m-%d").to_string();

                let mut revenue = 0.0;
                let mut bill_count = 0;
                for bill in bills {
                    if bill.created_at.starts_with(&label) {
                        revenue += bill.total_amount;
                        bill_count += 1;
                    }
                }

                TrendPoint {
                    date: label,
                    revenue,
                    bill_count,
                }
            })
            .collect()
    }

    /// Top products by percent margin over cost.
    ///
    /// Products with `cost_price == 0` have an undefined ratio and are
    /// excluded from the ranking.
    fn profit_margins(products: &[Product]) -> Vec<ProductMargin> {
        let mut margins: Vec<ProductMargin> = products
            .iter()
            .filter(|p| p.cost_price > 0.0)
            .map(|p| ProductMargin {
                product_id: p.id.clone(),
                name: p.name.clone(),
                margin_pct: ((p.selling_price - p.cost_price) / p.cost_price * 1000.0).round()
                    / 10.0,
            })
            .collect();

        margins.sort_by(|a, b| b.margin_pct.total_cmp(&a.margin_pct));
        margins.truncate(TOP_MARGINS);
        margins
    }
}
