use async_trait::async_trait;
use common::config::DatabaseConfig;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, info, instrument};

use crate::errors::{DbError, Result};
use crate::models::{BrandRow, NewReceiptItem, ReceiptRow, UserRow};
use crate::repositories::SnapshotSink;
use crate::schema;

pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions> {
    if let Some(url) = &config.url {
        return url
            .parse::<PgConnectOptions>()
            .map_err(|err| DbError::Config(err.into()));
    }

    Ok(PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.name)
        .username(&config.user)
        .password(&config.password))
}

/// Handle on the destination database. A load uses exactly one connection.
pub struct PgDatabase {
    pool: PgPool,
}

impl PgDatabase {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = connect_options(config)?;
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(DbError::Connect)?;
        info!("connected to destination database");
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Opens the transaction every write of a load goes through.
    pub async fn begin(&self) -> Result<PgSnapshotSink> {
        let tx = self.pool.begin().await.map_err(DbError::Query)?;
        Ok(PgSnapshotSink { tx })
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}

/// Dropping the sink without calling [`PgSnapshotSink::commit`] rolls back
/// every statement issued through it.
pub struct PgSnapshotSink {
    tx: Transaction<'static, Postgres>,
}

impl PgSnapshotSink {
    pub async fn commit(self) -> Result<()> {
        self.tx.commit().await.map_err(DbError::Query)
    }

    pub async fn rollback(self) -> Result<()> {
        self.tx.rollback().await.map_err(DbError::Query)
    }
}

#[async_trait]
impl SnapshotSink for PgSnapshotSink {
    #[instrument(skip(self))]
    async fn reset_schema(&mut self) -> Result<()> {
        for statement in schema::reset_statements() {
            debug!(%statement, "applying schema statement");
            sqlx::query(&statement)
                .execute(&mut *self.tx)
                .await
                .map_err(DbError::Query)?;
        }
        Ok(())
    }

    async fn insert_user(&mut self, user: UserRow) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO v_users (user_id, active, created_date, last_login, role, sign_up_source, state)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.user_id)
        .bind(user.active)
        .bind(user.created_date)
        .bind(user.last_login)
        .bind(user.role)
        .bind(user.sign_up_source)
        .bind(user.state)
        .execute(&mut *self.tx)
        .await
        .map(|_| ())
        .map_err(DbError::Query)
    }

    async fn insert_receipt(&mut self, receipt: ReceiptRow) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO v_receipts (
                receipt_id, user_id, bonus_points_earned, bonus_points_earned_reason,
                create_date, scanned_date, finished_date, modify_date, points_awarded_date,
                points_earned, purchase_date, purchased_item_count, rewards_receipt_status,
                total_spent
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(receipt.receipt_id)
        .bind(receipt.user_id)
        .bind(receipt.bonus_points_earned)
        .bind(receipt.bonus_points_earned_reason)
        .bind(receipt.create_date)
        .bind(receipt.scanned_date)
        .bind(receipt.finished_date)
        .bind(receipt.modify_date)
        .bind(receipt.points_awarded_date)
        .bind(receipt.points_earned)
        .bind(receipt.purchase_date)
        .bind(receipt.purchased_item_count)
        .bind(receipt.rewards_receipt_status)
        .bind(receipt.total_spent)
        .execute(&mut *self.tx)
        .await
        .map(|_| ())
        .map_err(DbError::Query)
    }

    async fn insert_receipt_item(&mut self, item: NewReceiptItem) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO v_receipt_items (
                receipt_id, barcode, description, final_price, discounted_item_price,
                item_price, needs_fetch_review, partner_item_id, prevent_target_gap_points,
                quantity_purchased, user_flagged_barcode, user_flagged_new_item,
                user_flagged_price, user_flagged_quantity, rewards_group,
                rewards_product_partner_id, points_not_awarded_reason, points_payer_id,
                needs_fetch_review_reason
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            "#,
        )
        .bind(item.receipt_id)
        .bind(item.barcode)
        .bind(item.description)
        .bind(item.final_price)
        .bind(item.discounted_item_price)
        .bind(item.item_price)
        .bind(item.needs_fetch_review)
        .bind(item.partner_item_id)
        .bind(item.prevent_target_gap_points)
        .bind(item.quantity_purchased)
        .bind(item.user_flagged_barcode)
        .bind(item.user_flagged_new_item)
        .bind(item.user_flagged_price)
        .bind(item.user_flagged_quantity)
        .bind(item.rewards_group)
        .bind(item.rewards_product_partner_id)
        .bind(item.points_not_awarded_reason)
        .bind(item.points_payer_id)
        .bind(item.needs_fetch_review_reason)
        .execute(&mut *self.tx)
        .await
        .map(|_| ())
        .map_err(DbError::Query)
    }

    async fn insert_brand(&mut self, brand: BrandRow) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO v_brands (barcode, brand_id, category, category_code, cpg_id, name, top_brand, brand_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(brand.barcode)
        .bind(brand.brand_id)
        .bind(brand.category)
        .bind(brand.category_code)
        .bind(brand.cpg_id)
        .bind(brand.name)
        .bind(brand.top_brand)
        .bind(brand.brand_code)
        .execute(&mut *self.tx)
        .await
        .map(|_| ())
        .map_err(DbError::Query)
    }
}
