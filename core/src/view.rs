// aidla_cart/src/view.rs

//! Pure projections of cart state for rendering. No mutation happens here;
//! every edit goes back through the store, whose clamps are deterministic,
//! so there is no optimistic-then-rollback dance at this layer.

use serde::Serialize;

use crate::models::CartLineItem;
use crate::store::CartStore;

/// One rendered cart line with its stepper control states.
#[derive(Debug, Clone, Serialize)]
pub struct LineItemView {
  #[serde(flatten)]
  pub item: CartLineItem,
  pub line_total: u64,
  /// Decrement is disabled at the quantity floor; removal is a separate action.
  pub decrement_enabled: bool,
  /// Increment is disabled once the known stock ceiling is reached.
  pub increment_enabled: bool,
  /// Drives the "Too many" warning badge on the line.
  pub over_stock: bool,
}

impl LineItemView {
  fn project(item: &CartLineItem) -> Self {
    let increment_enabled = match item.quantity_available {
      Some(available) => item.quantity < available,
      None => true,
    };
    LineItemView {
      line_total: item.line_total(),
      decrement_enabled: item.quantity > 1,
      increment_enabled,
      over_stock: item.is_stock_violation(),
      item: item.clone(),
    }
  }
}

/// The whole cart view: lines, running total and the checkout gate.
#[derive(Debug, Clone, Serialize)]
pub struct CartViewModel {
  pub lines: Vec<LineItemView>,
  pub total_coins: u64,
  /// Non-zero shows the blocking stock banner.
  pub violation_count: usize,
  /// The "proceed to checkout" action is enabled only for a non-empty cart
  /// with no stock violations.
  pub checkout_enabled: bool,
}

impl CartViewModel {
  pub fn project(store: &CartStore) -> Self {
    let lines: Vec<LineItemView> = store.items().iter().map(LineItemView::project).collect();
    let violation_count = store.stock_violations().len();
    CartViewModel {
      total_coins: store.total(),
      violation_count,
      checkout_enabled: !store.is_empty() && violation_count == 0,
      lines,
    }
  }
}
