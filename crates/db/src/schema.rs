//! Fixed destination schema. Tables are dropped and recreated on every load,
//! so there is no migration history to track.

pub const USERS: &str = "v_users";
pub const RECEIPTS: &str = "v_receipts";
pub const RECEIPT_ITEMS: &str = "v_receipt_items";
pub const BRANDS: &str = "v_brands";

/// Creation order of the destination tables.
pub const TABLES: [&str; 4] = [USERS, RECEIPTS, RECEIPT_ITEMS, BRANDS];

const CREATE_USERS: &str = r#"
CREATE TABLE v_users (
    user_id TEXT PRIMARY KEY,
    active BOOLEAN,
    created_date TIMESTAMPTZ,
    last_login TIMESTAMPTZ,
    role TEXT,
    sign_up_source TEXT,
    state TEXT
)
"#;

const CREATE_RECEIPTS: &str = r#"
CREATE TABLE v_receipts (
    receipt_id TEXT PRIMARY KEY,
    user_id TEXT,
    bonus_points_earned INTEGER,
    bonus_points_earned_reason TEXT,
    create_date TIMESTAMPTZ,
    scanned_date TIMESTAMPTZ,
    finished_date TIMESTAMPTZ,
    modify_date TIMESTAMPTZ,
    points_awarded_date TIMESTAMPTZ,
    points_earned DOUBLE PRECISION,
    purchase_date TIMESTAMPTZ,
    purchased_item_count INTEGER,
    rewards_receipt_status TEXT,
    total_spent DOUBLE PRECISION
)
"#;

const CREATE_RECEIPT_ITEMS: &str = r#"
CREATE TABLE v_receipt_items (
    receipt_item_id SERIAL PRIMARY KEY,
    receipt_id TEXT,
    barcode TEXT,
    description TEXT,
    final_price DOUBLE PRECISION,
    discounted_item_price DOUBLE PRECISION,
    item_price DOUBLE PRECISION,
    needs_fetch_review BOOLEAN,
    partner_item_id TEXT,
    prevent_target_gap_points BOOLEAN,
    quantity_purchased INTEGER,
    user_flagged_barcode TEXT,
    user_flagged_new_item BOOLEAN,
    user_flagged_price DOUBLE PRECISION,
    user_flagged_quantity INTEGER,
    rewards_group TEXT,
    rewards_product_partner_id TEXT,
    points_not_awarded_reason TEXT,
    points_payer_id TEXT,
    needs_fetch_review_reason TEXT
)
"#;

const CREATE_BRANDS: &str = r#"
CREATE TABLE v_brands (
    barcode TEXT PRIMARY KEY,
    brand_id TEXT,
    category TEXT,
    category_code TEXT,
    cpg_id TEXT,
    name TEXT,
    top_brand BOOLEAN,
    brand_code TEXT
)
"#;

/// Every statement needed to bring the schema back to an empty state: all
/// drops first, then the creates, both in [`TABLES`] order.
pub fn reset_statements() -> Vec<String> {
    let drops = TABLES
        .iter()
        .map(|table| format!("DROP TABLE IF EXISTS {table}"));
    let creates = [
        CREATE_USERS,
        CREATE_RECEIPTS,
        CREATE_RECEIPT_ITEMS,
        CREATE_BRANDS,
    ]
    .into_iter()
    .map(str::to_owned);
    drops.chain(creates).collect()
}
