// aidla_cart/src/models/line_item.rs

use serde::{Deserialize, Serialize};

/// Display-only product category. Physical goods carry a stock ceiling;
/// digital goods are typically unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
  Physical,
  Digital,
}

impl ProductType {
  pub fn parse(tag: &str) -> Option<Self> {
    match tag {
      "physical" => Some(ProductType::Physical),
      "digital" => Some(ProductType::Digital),
      _ => None,
    }
  }
}

/// One product entry within the cart.
///
/// Invariants (enforced by `CartStore` on every mutation):
/// - exactly one line per distinct `product_id`;
/// - `quantity >= 1`;
/// - when `quantity_available` is known, `quantity <= max(quantity_available, 1)`
///   (a zero-stock line stays at quantity 1 and is reported as a violation
///   instead of being deleted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
  pub product_id: String,
  pub name: String,
  /// Unit price at the time the item was added; not re-validated against the
  /// live price until the backend approves the purchase.
  pub price_coins: u64,
  pub quantity: u32,
  pub product_type: ProductType,
  /// Last-known stock snapshot. `None` means unconstrained.
  pub quantity_available: Option<u32>,
}

impl CartLineItem {
  pub fn line_total(&self) -> u64 {
    self.price_coins * u64::from(self.quantity)
  }

  /// Upper bound for `quantity` when stock is known. Never below 1: a
  /// zero-stock line keeps quantity 1 so the violation stays visible.
  pub fn stock_ceiling(&self) -> Option<u32> {
    self.quantity_available.map(|n| n.max(1))
  }

  /// Stock is known and either exhausted or below the current quantity.
  pub fn is_stock_violation(&self) -> bool {
    matches!(self.quantity_available, Some(n) if n == 0 || n < self.quantity)
  }

  pub(crate) fn clamp_quantity(&mut self, requested: u32) {
    self.quantity = clamp_to_ceiling(requested, self.quantity_available);
  }
}

/// Clamp a requested quantity into `[1, max(ceiling, 1)]`; unbounded above
/// when no ceiling is known.
pub(crate) fn clamp_to_ceiling(requested: u32, ceiling: Option<u32>) -> u32 {
  let q = requested.max(1);
  match ceiling {
    Some(c) => q.min(c.max(1)),
    None => q,
  }
}
