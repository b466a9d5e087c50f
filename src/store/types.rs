//! Record store document types
//!
//! The remote store serves Mongo-style documents: camelCase fields and an
//! `_id` primary key. Unknown fields are ignored on decode.

use serde::{Deserialize, Serialize};

/// Physical dimensions of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub depth: Option<f64>,
}

/// Product document. Read-only input for the engine; stock levels are
/// mutated only by the external store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub brand: String,
    pub selling_price: f64,
    pub cost_price: f64,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Dimensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One line of a bill. `name` and `price` are snapshots taken at sale time
/// and may diverge from the current product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillItem {
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

/// Bill document, immutable once created.
///
/// `created_at` keeps the store's ISO-8601 string form because revenue
/// trend bucketing matches bills to calendar days by date prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(rename = "_id")]
    pub id: String,
    pub items: Vec<BillItem>,
    pub total_amount: f64,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_product_document() {
        let raw = r#"{
            "_id": "665f1c2e9b1e8a0012d4c001",
            "name": "Oak Bookshelf",
            "brand": "WoodWorks",
            "sellingPrice": 4999.0,
            "costPrice": 3200.0,
            "quantity": 12,
            "size": { "height": 180.0, "width": 80.0, "depth": 30.0 },
            "__v": 0
        }"#;

        let product: Product = serde_json::from_str(raw).unwrap();

        assert_eq!(product.id, "665f1c2e9b1e8a0012d4c001");
        assert_eq!(product.brand, "WoodWorks");
        assert_eq!(product.selling_price, 4999.0);
        assert_eq!(product.quantity, 12);
        assert_eq!(product.size.unwrap().height, Some(180.0));
        assert!(product.description.is_none());
    }

    #[test]
    fn test_decode_bill_document() {
        let raw = r#"{
            "_id": "665f1d009b1e8a0012d4c099",
            "items": [
                { "productId": "665f1c2e9b1e8a0012d4c001", "name": "Oak Bookshelf", "quantity": 2, "price": 4999.0 }
            ],
            "totalAmount": 9998.0,
            "createdAt": "2026-08-06T09:14:22.511Z"
        }"#;

        let bill: Bill = serde_json::from_str(raw).unwrap();

        assert_eq!(bill.items.len(), 1);
        assert_eq!(bill.items[0].product_id, "665f1c2e9b1e8a0012d4c001");
        assert_eq!(bill.total_amount, 9998.0);
        assert!(bill.created_at.starts_with("2026-08-06"));
    }
}
