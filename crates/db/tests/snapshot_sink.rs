use chrono::{TimeZone, Utc};
use db::pg::PgDatabase;
use db::{BrandRow, NewReceiptItem, ReceiptItemRow, SnapshotSink, UserRow};
use db_test_fixture::DbFixture;
use sqlx::query_scalar;

fn sample_user(id: &str) -> UserRow {
    UserRow {
        user_id: id.into(),
        active: true,
        created_date: Utc.timestamp_millis_opt(1_609_687_444_800).unwrap(),
        last_login: None,
        role: "consumer".into(),
        sign_up_source: Some("Email".into()),
        state: Some("WI".into()),
    }
}

async fn destination_tables(db: &PgDatabase) -> anyhow::Result<i64> {
    let count = query_scalar(
        "SELECT COUNT(*) FROM information_schema.tables WHERE table_name IN ('v_users', 'v_receipts', 'v_receipt_items', 'v_brands')",
    )
    .fetch_one(db.pool())
    .await?;
    Ok(count)
}

#[tokio::test]
async fn committed_snapshot_is_visible() -> anyhow::Result<()> {
    let fixture = match DbFixture::from_env() {
        Ok(f) => f,
        Err(err) => {
            eprintln!("skipping committed_snapshot_is_visible: {err}");
            return Ok(());
        }
    };
    let handle = fixture.create("sink_commit").await?;
    let db = handle.database();

    let mut sink = db.begin().await?;
    sink.reset_schema().await?;
    sink.insert_user(sample_user("u1")).await?;
    sink.insert_receipt_item(NewReceiptItem {
        receipt_id: "r1".into(),
        barcode: Some("4011".into()),
        final_price: Some(26.0),
        quantity_purchased: Some(5),
        ..NewReceiptItem::default()
    })
    .await?;
    sink.insert_brand(BrandRow {
        barcode: "511111019862".into(),
        brand_id: "b1".into(),
        category: Some("Baking".into()),
        category_code: None,
        cpg_id: "c1".into(),
        name: Some("test brand".into()),
        top_brand: false,
        brand_code: None,
    })
    .await?;
    sink.commit().await?;

    assert_eq!(destination_tables(&db).await?, 4);

    let user: UserRow = sqlx::query_as("SELECT * FROM v_users WHERE user_id = $1")
        .bind("u1")
        .fetch_one(db.pool())
        .await?;
    assert_eq!(user, sample_user("u1"));

    let item: ReceiptItemRow = sqlx::query_as(
        "SELECT receipt_item_id, receipt_id, barcode, description, final_price, item_price, quantity_purchased, needs_fetch_review FROM v_receipt_items",
    )
    .fetch_one(db.pool())
    .await?;
    assert_eq!(item.receipt_item_id, 1);
    assert_eq!(item.receipt_id, "r1");
    assert_eq!(item.final_price, Some(26.0));
    assert!(item.description.is_none());

    handle.cleanup().await?;
    Ok(())
}

#[tokio::test]
async fn rolled_back_snapshot_leaves_nothing_behind() -> anyhow::Result<()> {
    let fixture = match DbFixture::from_env() {
        Ok(f) => f,
        Err(err) => {
            eprintln!("skipping rolled_back_snapshot_leaves_nothing_behind: {err}");
            return Ok(());
        }
    };
    let handle = fixture.create("sink_rollback").await?;
    let db = handle.database();

    let mut sink = db.begin().await?;
    sink.reset_schema().await?;
    sink.insert_user(sample_user("u1")).await?;
    sink.rollback().await?;

    assert_eq!(destination_tables(&db).await?, 0);

    handle.cleanup().await?;
    Ok(())
}

#[tokio::test]
async fn reset_replaces_previous_snapshot() -> anyhow::Result<()> {
    let fixture = match DbFixture::from_env() {
        Ok(f) => f,
        Err(err) => {
            eprintln!("skipping reset_replaces_previous_snapshot: {err}");
            return Ok(());
        }
    };
    let handle = fixture.create("sink_reset").await?;
    let db = handle.database();

    let mut first = db.begin().await?;
    first.reset_schema().await?;
    first.insert_user(sample_user("u1")).await?;
    first.commit().await?;

    let mut second = db.begin().await?;
    second.reset_schema().await?;
    second.insert_user(sample_user("u2")).await?;
    second.commit().await?;

    let ids: Vec<String> = query_scalar("SELECT user_id FROM v_users ORDER BY user_id")
        .fetch_all(db.pool())
        .await?;
    assert_eq!(ids, vec!["u2".to_string()]);

    let duplicate = {
        let mut third = db.begin().await?;
        third.reset_schema().await?;
        third.insert_user(sample_user("u3")).await?;
        third.insert_user(sample_user("u3")).await
    };
    assert!(duplicate.is_err(), "primary key rejects a second u3 row");

    handle.cleanup().await?;
    Ok(())
}
