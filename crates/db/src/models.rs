use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub user_id: String,
    pub active: bool,
    pub created_date: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub role: String,
    pub sign_up_source: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ReceiptRow {
    pub receipt_id: String,
    pub user_id: String,
    pub bonus_points_earned: i32,
    pub bonus_points_earned_reason: Option<String>,
    pub create_date: DateTime<Utc>,
    pub scanned_date: DateTime<Utc>,
    pub finished_date: Option<DateTime<Utc>>,
    pub modify_date: Option<DateTime<Utc>>,
    pub points_awarded_date: Option<DateTime<Utc>>,
    pub points_earned: f64,
    pub purchase_date: Option<DateTime<Utc>>,
    pub purchased_item_count: i32,
    pub rewards_receipt_status: String,
    pub total_spent: f64,
}

/// Item line as inserted; the surrogate `receipt_item_id` is assigned by the
/// database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewReceiptItem {
    pub receipt_id: String,
    pub barcode: Option<String>,
    pub description: Option<String>,
    pub final_price: Option<f64>,
    pub discounted_item_price: Option<f64>,
    pub item_price: Option<f64>,
    pub needs_fetch_review: Option<bool>,
    pub partner_item_id: Option<String>,
    pub prevent_target_gap_points: Option<bool>,
    pub quantity_purchased: Option<i32>,
    pub user_flagged_barcode: Option<String>,
    pub user_flagged_new_item: Option<bool>,
    pub user_flagged_price: Option<f64>,
    pub user_flagged_quantity: Option<i32>,
    pub rewards_group: Option<String>,
    pub rewards_product_partner_id: Option<String>,
    pub points_not_awarded_reason: Option<String>,
    pub points_payer_id: Option<String>,
    pub needs_fetch_review_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ReceiptItemRow {
    pub receipt_item_id: i32,
    pub receipt_id: String,
    pub barcode: Option<String>,
    pub description: Option<String>,
    pub final_price: Option<f64>,
    pub item_price: Option<f64>,
    pub quantity_purchased: Option<i32>,
    pub needs_fetch_review: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BrandRow {
    pub barcode: String,
    pub brand_id: String,
    pub category: Option<String>,
    pub category_code: Option<String>,
    pub cpg_id: String,
    pub name: Option<String>,
    pub top_brand: bool,
    pub brand_code: Option<String>,
}
