use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::{NormalizeError, Result};
use crate::models::{NormalizedBrand, NormalizedReceipt, NormalizedReceiptItem, NormalizedUser};
use crate::payloads::{BrandPayload, DateRef, ReceiptItemPayload, ReceiptPayload, UserPayload};

const DEFAULT_BONUS_POINTS: i32 = 0;
const DEFAULT_POINTS_EARNED: f64 = 0.0;
const DEFAULT_PURCHASED_ITEM_COUNT: i32 = 0;
const DEFAULT_TOTAL_SPENT: f64 = 0.0;
const DEFAULT_TOP_BRAND: bool = false;

/// Decodes one element of an export array into its payload shape. A missing
/// required field surfaces here, naming the field.
pub fn decode<T: DeserializeOwned>(raw: &Value) -> Result<T> {
    T::deserialize(raw).map_err(NormalizeError::from)
}

pub fn epoch_millis_to_datetime(field: &'static str, millis: i64) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or(NormalizeError::TimestampOutOfRange { field, millis })
}

fn required_date(field: &'static str, date: DateRef) -> Result<DateTime<Utc>> {
    epoch_millis_to_datetime(field, date.millis)
}

fn optional_date(field: &'static str, date: Option<DateRef>) -> Result<Option<DateTime<Utc>>> {
    date.map(|date| required_date(field, date)).transpose()
}

pub fn normalize_user(payload: &UserPayload) -> Result<NormalizedUser> {
    Ok(NormalizedUser {
        id: payload.id.oid.clone(),
        active: payload.active,
        created_date: required_date("createdDate", payload.created_date)?,
        last_login: optional_date("lastLogin", payload.last_login)?,
        role: payload.role.clone(),
        sign_up_source: payload.sign_up_source.clone(),
        state: payload.state.clone(),
    })
}

pub fn normalize_receipt(payload: &ReceiptPayload) -> Result<NormalizedReceipt> {
    let receipt_id = payload.id.oid.clone();
    let items = payload
        .rewards_receipt_item_list
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|item| normalize_receipt_item(&receipt_id, item))
        .collect();

    Ok(NormalizedReceipt {
        id: receipt_id,
        user_id: payload.user_id.clone(),
        bonus_points_earned: payload.bonus_points_earned.unwrap_or(DEFAULT_BONUS_POINTS),
        bonus_points_earned_reason: payload.bonus_points_earned_reason.clone(),
        create_date: required_date("createDate", payload.create_date)?,
        scanned_date: required_date("dateScanned", payload.date_scanned)?,
        finished_date: optional_date("finishedDate", payload.finished_date)?,
        modify_date: optional_date("modifyDate", payload.modify_date)?,
        points_awarded_date: optional_date("pointsAwardedDate", payload.points_awarded_date)?,
        points_earned: payload.points_earned.unwrap_or(DEFAULT_POINTS_EARNED),
        purchase_date: optional_date("purchaseDate", payload.purchase_date)?,
        purchased_item_count: payload
            .purchased_item_count
            .unwrap_or(DEFAULT_PURCHASED_ITEM_COUNT),
        rewards_receipt_status: payload.rewards_receipt_status.clone(),
        total_spent: payload.total_spent.unwrap_or(DEFAULT_TOTAL_SPENT),
        items,
    })
}

fn normalize_receipt_item(receipt_id: &str, item: &ReceiptItemPayload) -> NormalizedReceiptItem {
    NormalizedReceiptItem {
        receipt_id: receipt_id.to_string(),
        barcode: item.barcode.clone(),
        description: item.description.clone(),
        final_price: item.final_price,
        discounted_item_price: item.discounted_item_price,
        item_price: item.item_price,
        needs_fetch_review: item.needs_fetch_review,
        partner_item_id: item.partner_item_id.clone(),
        prevent_target_gap_points: item.prevent_target_gap_points,
        quantity_purchased: item.quantity_purchased,
        user_flagged_barcode: item.user_flagged_barcode.clone(),
        user_flagged_new_item: item.user_flagged_new_item,
        user_flagged_price: item.user_flagged_price,
        user_flagged_quantity: item.user_flagged_quantity,
        rewards_group: item.rewards_group.clone(),
        rewards_product_partner_id: item.rewards_product_partner_id.clone(),
        points_not_awarded_reason: item.points_not_awarded_reason.clone(),
        points_payer_id: item.points_payer_id.clone(),
        needs_fetch_review_reason: item.needs_fetch_review_reason.clone(),
    }
}

pub fn normalize_brand(payload: &BrandPayload) -> NormalizedBrand {
    NormalizedBrand {
        barcode: payload.barcode.clone(),
        brand_id: payload.id.oid.clone(),
        category: payload.category.clone(),
        category_code: payload.category_code.clone(),
        cpg_id: payload.cpg.id.oid.clone(),
        name: payload.name.clone(),
        top_brand: payload.top_brand.unwrap_or(DEFAULT_TOP_BRAND),
        brand_code: payload.brand_code.clone(),
    }
}
