use std::path::Path;

use common::config::DatabaseConfig;
use db::models::{BrandRow, NewReceiptItem, ReceiptRow, UserRow};
use db::pg::PgDatabase;
use db::SnapshotSink;
use normalizer::models::{NormalizedBrand, NormalizedReceipt, NormalizedReceiptItem, NormalizedUser};
use normalizer::{
    decode, normalize_brand, normalize_receipt, normalize_user, BrandKey, BrandPayload,
    FirstSeen, ReceiptPayload, UserKey, UserPayload,
};
use tracing::{debug, info, instrument, warn};

use crate::errors::{Entity, LoadError, Result};
use crate::inputs::{read_array, SnapshotInputs};

/// Row counts of one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub users_inserted: usize,
    pub users_skipped: usize,
    pub receipts_inserted: usize,
    pub receipt_items_inserted: usize,
    pub brands_inserted: usize,
    pub brands_skipped: usize,
}

pub struct SchemaLoader {
    inputs: SnapshotInputs,
}

impl SchemaLoader {
    pub fn new(inputs: SnapshotInputs) -> Self {
        Self { inputs }
    }

    pub fn inputs(&self) -> &SnapshotInputs {
        &self.inputs
    }

    /// Checks the inputs, loads them in one transaction and commits. The
    /// connection is closed whether or not the load succeeds; on failure
    /// nothing is committed.
    pub async fn run(&self, database: &DatabaseConfig) -> Result<LoadSummary> {
        self.inputs.verify()?;

        let database = PgDatabase::connect(database).await?;
        let outcome = self.load_and_commit(&database).await;
        database.close().await;
        outcome
    }

    async fn load_and_commit(&self, database: &PgDatabase) -> Result<LoadSummary> {
        let mut sink = database.begin().await?;
        match self.load_into(&mut sink).await {
            Ok(summary) => {
                sink.commit().await?;
                info!("snapshot committed");
                Ok(summary)
            }
            Err(err) => {
                warn!(error = %err, "load aborted; rolling back");
                if let Err(rollback) = sink.rollback().await {
                    warn!(error = %rollback, "rollback failed");
                }
                Err(err)
            }
        }
    }

    /// Recreates the schema through `sink`, then writes users, receipts with
    /// their items, and brands, in that order. Stops at the first error.
    pub async fn load_into<S: SnapshotSink + ?Sized>(&self, sink: &mut S) -> Result<LoadSummary> {
        sink.reset_schema().await?;
        info!("destination tables recreated");

        let mut summary = LoadSummary::default();
        load_users(sink, &self.inputs.users, &mut summary).await?;
        load_receipts(sink, &self.inputs.receipts, &mut summary).await?;
        load_brands(sink, &self.inputs.brands, &mut summary).await?;
        Ok(summary)
    }
}

#[instrument(skip_all, fields(path = %path.display()))]
async fn load_users<S: SnapshotSink + ?Sized>(
    sink: &mut S,
    path: &Path,
    summary: &mut LoadSummary,
) -> Result<()> {
    let records = read_array(path)?;
    let mut seen = FirstSeen::new();

    for (index, raw) in records.iter().enumerate() {
        let key: UserKey = decode(raw).map_err(LoadError::record(Entity::User, index))?;
        if !seen.admit(key.id.oid.clone()) {
            debug!(user_id = %key.id.oid, index, "duplicate user skipped");
            summary.users_skipped += 1;
            continue;
        }

        let user = decode::<UserPayload>(raw)
            .and_then(|payload| normalize_user(&payload))
            .map_err(LoadError::record(Entity::User, index))?;
        sink.insert_user(to_user_row(user)).await?;
        summary.users_inserted += 1;
    }

    info!(
        inserted = summary.users_inserted,
        skipped = summary.users_skipped,
        "users loaded"
    );
    Ok(())
}

#[instrument(skip_all, fields(path = %path.display()))]
async fn load_receipts<S: SnapshotSink + ?Sized>(
    sink: &mut S,
    path: &Path,
    summary: &mut LoadSummary,
) -> Result<()> {
    let records = read_array(path)?;

    for (index, raw) in records.iter().enumerate() {
        let receipt = decode::<ReceiptPayload>(raw)
            .and_then(|payload| normalize_receipt(&payload))
            .map_err(LoadError::record(Entity::Receipt, index))?;
        let (row, items) = split_receipt(receipt);

        sink.insert_receipt(row).await?;
        summary.receipts_inserted += 1;
        for item in items {
            sink.insert_receipt_item(to_receipt_item_row(item)).await?;
            summary.receipt_items_inserted += 1;
        }
    }

    info!(
        receipts = summary.receipts_inserted,
        items = summary.receipt_items_inserted,
        "receipts loaded"
    );
    Ok(())
}

#[instrument(skip_all, fields(path = %path.display()))]
async fn load_brands<S: SnapshotSink + ?Sized>(
    sink: &mut S,
    path: &Path,
    summary: &mut LoadSummary,
) -> Result<()> {
    let records = read_array(path)?;
    let mut seen = FirstSeen::new();

    for (index, raw) in records.iter().enumerate() {
        let key: BrandKey = decode(raw).map_err(LoadError::record(Entity::Brand, index))?;
        if !seen.admit(key.barcode.clone()) {
            debug!(barcode = %key.barcode, index, "duplicate brand skipped");
            summary.brands_skipped += 1;
            continue;
        }

        let brand = decode::<BrandPayload>(raw)
            .map(|payload| normalize_brand(&payload))
            .map_err(LoadError::record(Entity::Brand, index))?;
        sink.insert_brand(to_brand_row(brand)).await?;
        summary.brands_inserted += 1;
    }

    info!(
        inserted = summary.brands_inserted,
        skipped = summary.brands_skipped,
        "brands loaded"
    );
    Ok(())
}

fn to_user_row(user: NormalizedUser) -> UserRow {
    UserRow {
        user_id: user.id,
        active: user.active,
        created_date: user.created_date,
        last_login: user.last_login,
        role: user.role,
        sign_up_source: user.sign_up_source,
        state: user.state,
    }
}

fn split_receipt(receipt: NormalizedReceipt) -> (ReceiptRow, Vec<NormalizedReceiptItem>) {
    let row = ReceiptRow {
        receipt_id: receipt.id,
        user_id: receipt.user_id,
        bonus_points_earned: receipt.bonus_points_earned,
        bonus_points_earned_reason: receipt.bonus_points_earned_reason,
        create_date: receipt.create_date,
        scanned_date: receipt.scanned_date,
        finished_date: receipt.finished_date,
        modify_date: receipt.modify_date,
        points_awarded_date: receipt.points_awarded_date,
        points_earned: receipt.points_earned,
        purchase_date: receipt.purchase_date,
        purchased_item_count: receipt.purchased_item_count,
        rewards_receipt_status: receipt.rewards_receipt_status,
        total_spent: receipt.total_spent,
    };
    (row, receipt.items)
}

fn to_receipt_item_row(item: NormalizedReceiptItem) -> NewReceiptItem {
    NewReceiptItem {
        receipt_id: item.receipt_id,
        barcode: item.barcode,
        description: item.description,
        final_price: item.final_price,
        discounted_item_price: item.discounted_item_price,
        item_price: item.item_price,
        needs_fetch_review: item.needs_fetch_review,
        partner_item_id: item.partner_item_id,
        prevent_target_gap_points: item.prevent_target_gap_points,
        quantity_purchased: item.quantity_purchased,
        user_flagged_barcode: item.user_flagged_barcode,
        user_flagged_new_item: item.user_flagged_new_item,
        user_flagged_price: item.user_flagged_price,
        user_flagged_quantity: item.user_flagged_quantity,
        rewards_group: item.rewards_group,
        rewards_product_partner_id: item.rewards_product_partner_id,
        points_not_awarded_reason: item.points_not_awarded_reason,
        points_payer_id: item.points_payer_id,
        needs_fetch_review_reason: item.needs_fetch_review_reason,
    }
}

fn to_brand_row(brand: NormalizedBrand) -> BrandRow {
    BrandRow {
        barcode: brand.barcode,
        brand_id: brand.brand_id,
        category: brand.category,
        category_code: brand.category_code,
        cpg_id: brand.cpg_id,
        name: brand.name,
        top_brand: brand.top_brand,
        brand_code: brand.brand_code,
    }
}
