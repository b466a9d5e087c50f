//! Summary Service
//!
//! Renders a metrics snapshot into the compact fixed-shape text block both
//! AI surfaces embed as grounding context. The block is deterministic and
//! bounded regardless of input size: lists truncate, the block never does.

use crate::services::metrics_service::{MetricsSnapshot, LOW_BELOW};
use crate::store::types::Product;

/// Low-stock names listed before the enumeration is elided
const MAX_LOW_STOCK_NAMES: usize = 8;
/// Sellers quoted in the summary block
const MAX_TOP_SELLERS: usize = 3;

/// Summary service for prompt grounding
pub struct SummaryService;

impl SummaryService {
    /// Render the grounding block from a snapshot and the raw product list
    /// (the low-stock names come from the products, not the snapshot).
    pub fn render(snapshot: &MetricsSnapshot, products: &[Product]) -> String {
        let low_stock: Vec<&str> = products
            .iter()
            .filter(|p| p.quantity < LOW_BELOW)
            .map(|p| p.name.as_str())
            .collect();

        let mut low_stock_names = low_stock
            .iter()
            .take(MAX_LOW_STOCK_NAMES)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        if low_stock.len() > MAX_LOW_STOCK_NAMES {
            low_stock_names.push_str(&format!(
                " and {} more",
                low_stock.len() - MAX_LOW_STOCK_NAMES
            ));
        }

        let top_sellers = snapshot
            .top_selling_by_quantity
            .iter()
            .take(MAX_TOP_SELLERS)
            .map(|s| format!("{} ({} sold)", s.name, s.quantity))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "INVENTORY: {} products, Total Value: ₹{:.0}\n\
             LOW STOCK: {} items ({})\n\
             REVENUE: ₹{:.0} from {} bills\n\
             TOP SELLERS: {}",
            snapshot.total_products,
            snapshot.total_inventory_value,
            snapshot.low_stock_count,
            low_stock_names,
            snapshot.total_revenue,
            snapshot.total_bills,
            top_sellers,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::metrics_service::MetricsService;
    use crate::store::types::Bill;
    use chrono::NaiveDate;

    fn product(name: &str, qty: i64) -> Product {
        Product {
            id: name.to_string(),
            name: name.to_string(),
            brand: "B".to_string(),
            selling_price: 20.0,
            cost_price: 10.0,
            quantity: qty,
            size: None,
            description: None,
        }
    }

    fn render(products: &[Product], bills: &[Bill]) -> String {
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let snapshot = MetricsService::compute_at(products, bills, today);
        SummaryService::render(&snapshot, products)
    }

    #[test]
    fn test_block_shape() {
        let products = vec![product("Chair", 3), product("Table", 50)];
        let summary = render(&products, &[]);

        assert_eq!(
            summary,
            "INVENTORY: 2 products, Total Value: ₹530\n\
             LOW STOCK: 1 items (Chair)\n\
             REVENUE: ₹0 from 0 bills\n\
             TOP SELLERS: "
        );
    }

    #[test]
    fn test_low_stock_list_is_truncated() {
        let products: Vec<Product> = (0..12).map(|i| product(&format!("P{}", i), 1)).collect();
        let summary = render(&products, &[]);

        assert!(summary.contains("LOW STOCK: 12 items"));
        assert!(summary.contains("P7"));
        assert!(!summary.contains("P8,"));
        assert!(summary.contains("and 4 more"));
    }

    #[test]
    fn test_top_sellers_capped_at_three() {
        let bills: Vec<Bill> = (0..5)
            .map(|i| Bill {
                id: format!("b{}", i),
                items: vec![crate::store::types::BillItem {
                    product_id: format!("p{}", i),
                    name: format!("Item{}", i),
                    quantity: 10 - i as i64,
                    price: 5.0,
                }],
                total_amount: 50.0,
                created_at: "2026-08-05T10:00:00Z".to_string(),
            })
            .collect();

        let summary = render(&[], &bills);
        let sellers_line = summary.lines().last().unwrap();

        assert!(sellers_line.contains("Item0 (10 sold)"));
        assert!(sellers_line.contains("Item2 (8 sold)"));
        assert!(!sellers_line.contains("Item3"));
    }
}
