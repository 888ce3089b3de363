use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{BrandRow, NewReceiptItem, ReceiptRow, UserRow};

/// Destination of one snapshot load. Writes are applied in call order and
/// only become durable when the implementation commits.
#[async_trait]
pub trait SnapshotSink: Send {
    async fn reset_schema(&mut self) -> Result<()>;
    async fn insert_user(&mut self, user: UserRow) -> Result<()>;
    async fn insert_receipt(&mut self, receipt: ReceiptRow) -> Result<()>;
    async fn insert_receipt_item(&mut self, item: NewReceiptItem) -> Result<()>;
    async fn insert_brand(&mut self, brand: BrandRow) -> Result<()>;
}
