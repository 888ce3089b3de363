pub mod dedup;
pub mod errors;
pub mod models;
pub mod payloads;
pub mod transform;

pub use dedup::FirstSeen;
pub use errors::NormalizeError;
pub use models::{NormalizedBrand, NormalizedReceipt, NormalizedReceiptItem, NormalizedUser};
pub use payloads::{
    BrandKey, BrandPayload, ReceiptItemPayload, ReceiptPayload, UserKey, UserPayload,
};
pub use transform::{
    decode, epoch_millis_to_datetime, normalize_brand, normalize_receipt, normalize_user,
};
