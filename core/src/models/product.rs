// aidla_cart/src/models/product.rs

use serde::{Deserialize, Serialize};

use crate::models::line_item::ProductType;

/// What the shop listing hands to `CartStore::add` and what a stock re-sync
/// returns. A snapshot, not a live subscription; the backend re-checks stock
/// at approval time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSnapshot {
  pub product_id: String,
  pub name: String,
  pub price_coins: u64,
  pub product_type: ProductType,
  pub quantity_available: Option<u32>,
  #[serde(default = "default_active")]
  pub is_active: bool,
}

fn default_active() -> bool {
  true
}
