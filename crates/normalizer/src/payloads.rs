//! Record shapes as they appear in the exported JSON arrays.
//!
//! Identifiers and timestamps use the extended-JSON wrappers of the export
//! (`{"$oid": ..}`, `{"$date": ..}`). Numeric fields are sometimes written as
//! strings (`"pointsEarned": "500.0"`), so every numeric field accepts either.

use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObjectId {
    #[serde(rename = "$oid")]
    pub oid: String,
}

/// Milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DateRef {
    #[serde(rename = "$date")]
    pub millis: i64,
}

/// Just enough of a user record to decide whether it is a duplicate.
#[derive(Debug, Clone, Deserialize)]
pub struct UserKey {
    #[serde(rename = "_id")]
    pub id: ObjectId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrandKey {
    pub barcode: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub active: bool,
    pub created_date: DateRef,
    pub last_login: Option<DateRef>,
    pub role: String,
    pub sign_up_source: Option<String>,
    pub state: Option<String>,
}

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptPayload {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: String,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub bonus_points_earned: Option<i32>,
    pub bonus_points_earned_reason: Option<String>,
    pub create_date: DateRef,
    pub date_scanned: DateRef,
    pub finished_date: Option<DateRef>,
    pub modify_date: Option<DateRef>,
    pub points_awarded_date: Option<DateRef>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub points_earned: Option<f64>,
    pub purchase_date: Option<DateRef>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub purchased_item_count: Option<i32>,
    pub rewards_receipt_status: String,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub total_spent: Option<f64>,
    pub rewards_receipt_item_list: Option<Vec<ReceiptItemPayload>>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptItemPayload {
    pub barcode: Option<String>,
    pub description: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub final_price: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub discounted_item_price: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub item_price: Option<f64>,
    pub needs_fetch_review: Option<bool>,
    pub partner_item_id: Option<String>,
    pub prevent_target_gap_points: Option<bool>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub quantity_purchased: Option<i32>,
    pub user_flagged_barcode: Option<String>,
    pub user_flagged_new_item: Option<bool>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub user_flagged_price: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub user_flagged_quantity: Option<i32>,
    pub rewards_group: Option<String>,
    pub rewards_product_partner_id: Option<String>,
    pub points_not_awarded_reason: Option<String>,
    pub points_payer_id: Option<String>,
    pub needs_fetch_review_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandPayload {
    pub barcode: String,
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub category: Option<String>,
    pub category_code: Option<String>,
    pub cpg: CpgRef,
    pub name: Option<String>,
    pub top_brand: Option<bool>,
    pub brand_code: Option<String>,
}

/// DBRef to the consumer-goods provider that owns a brand.
#[derive(Debug, Clone, Deserialize)]
pub struct CpgRef {
    #[serde(rename = "$id")]
    pub id: ObjectId,
    #[serde(rename = "$ref")]
    pub collection: Option<String>,
}
