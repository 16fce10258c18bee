// aidla_cart/src/store/mod.rs

//! The cart store: the one owner of client-held cart state.
//!
//! Every mutation re-establishes the cart invariants (one line per product,
//! quantity floor of 1, stock ceiling when known) and writes through to the
//! persisted entry before returning. Persistence is a best-effort cache;
//! read failures degrade to an empty cart and write failures are logged and
//! swallowed.

pub mod storage;

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::line_item::{clamp_to_ceiling, CartLineItem, ProductType};
use crate::models::product::ProductSnapshot;
use self::storage::CartStorage;

/// Lenient on-disk shape of one persisted line. Numeric fields tolerate
/// floats and negative values from older or hand-edited payloads; the store
/// coerces them during normalization.
#[derive(Debug, Deserialize)]
struct StoredLineItem {
  product_id: String,
  #[serde(default)]
  name: String,
  #[serde(default)]
  price_coins: f64,
  #[serde(default = "default_quantity")]
  quantity: f64,
  product_type: String,
  #[serde(default)]
  quantity_available: Option<f64>,
}

fn default_quantity() -> f64 {
  1.0
}

impl StoredLineItem {
  /// Coerce one stored record into a typed line item, or drop it when the
  /// product type tag is unrecognized (the record cannot be displayed or
  /// re-priced, and the backend remains authoritative).
  fn into_line_item(self) -> Option<CartLineItem> {
    let product_type = match ProductType::parse(&self.product_type) {
      Some(t) => t,
      None => {
        warn!(
          product_id = %self.product_id,
          tag = %self.product_type,
          "Dropping persisted cart line with unrecognized product type"
        );
        return None;
      }
    };
    Some(CartLineItem {
      product_id: self.product_id,
      name: self.name,
      price_coins: coerce_price(self.price_coins),
      quantity: coerce_quantity(self.quantity),
      product_type,
      quantity_available: self.quantity_available.and_then(coerce_stock),
    })
  }
}

fn coerce_price(raw: f64) -> u64 {
  if raw.is_finite() && raw > 0.0 {
    raw.floor() as u64
  } else {
    0
  }
}

fn coerce_quantity(raw: f64) -> u32 {
  if raw.is_finite() {
    raw.floor().clamp(1.0, u32::MAX as f64) as u32
  } else {
    1
  }
}

/// A stock snapshot only counts when it is a well-formed non-negative number;
/// anything else means "unconstrained".
fn coerce_stock(raw: f64) -> Option<u32> {
  if raw.is_finite() && raw >= 0.0 {
    Some(raw.floor().min(u32::MAX as f64) as u32)
  } else {
    None
  }
}

/// The authoritative in-memory representation of the cart.
pub struct CartStore {
  items: Vec<CartLineItem>,
  storage: Box<dyn CartStorage>,
}

impl CartStore {
  /// Loads the persisted cart and normalizes it before use. Never fails:
  /// unreadable or malformed payloads reset the cart to empty.
  pub fn load(storage: impl CartStorage + 'static) -> Self {
    let raw = match storage.read() {
      Ok(raw) => raw,
      Err(e) => {
        warn!(error = %e, "Cart storage read failed; starting with an empty cart");
        None
      }
    };
    let items = raw.map(|payload| decode_payload(&payload)).unwrap_or_default();
    let mut store = CartStore {
      items,
      storage: Box::new(storage),
    };
    store.normalize();
    store
  }

  /// Re-establishes the quantity invariants on every line and persists the
  /// result. A zero-stock line is kept at quantity 1 so it surfaces as a
  /// visible violation rather than disappearing.
  pub fn normalize(&mut self) {
    for line in &mut self.items {
      let clamped = clamp_to_ceiling(line.quantity, line.quantity_available);
      if clamped != line.quantity {
        debug!(
          product_id = %line.product_id,
          from = line.quantity,
          to = clamped,
          "Normalized cart line quantity"
        );
        line.quantity = clamped;
      }
    }
    self.persist();
  }

  /// Adds a product from the shop listing. Re-adding an existing product
  /// increases its quantity (then clamps) and refreshes its stock snapshot
  /// instead of duplicating the line; the original unit price is kept.
  pub fn add(&mut self, product: &ProductSnapshot, quantity: u32) {
    match self.items.iter_mut().find(|l| l.product_id == product.product_id) {
      Some(line) => {
        line.quantity_available = product.quantity_available;
        let requested = line.quantity.saturating_add(quantity.max(1));
        line.clamp_quantity(requested);
        debug!(product_id = %line.product_id, quantity = line.quantity, "Updated existing cart line");
      }
      None => {
        let mut line = CartLineItem {
          product_id: product.product_id.clone(),
          name: product.name.clone(),
          price_coins: product.price_coins,
          quantity: 1,
          product_type: product.product_type,
          quantity_available: product.quantity_available,
        };
        line.clamp_quantity(quantity);
        debug!(product_id = %line.product_id, quantity = line.quantity, "Added new cart line");
        self.items.push(line);
      }
    }
    self.persist();
  }

  /// Sets a line's quantity, clamped into `[1, stock ceiling]`. Returns
  /// `false` when no line with this product id exists.
  pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> bool {
    let Some(line) = self.items.iter_mut().find(|l| l.product_id == product_id) else {
      return false;
    };
    line.clamp_quantity(quantity);
    self.persist();
    true
  }

  /// Removes a line. Idempotent: absent ids are not an error.
  pub fn remove(&mut self, product_id: &str) {
    let before = self.items.len();
    self.items.retain(|l| l.product_id != product_id);
    if self.items.len() != before {
      debug!(product_id, "Removed cart line");
    }
    self.persist();
  }

  /// Refreshes stock snapshots from a re-fetched shop listing, clamping
  /// quantities down when stock shrank. Lines are never removed here: a
  /// product that became inactive is treated as zero stock and stays visible
  /// as a violation. Products missing from the listing keep their last-known
  /// snapshot.
  pub fn sync_stock(&mut self, products: &[ProductSnapshot]) {
    for line in &mut self.items {
      let Some(snapshot) = products.iter().find(|p| p.product_id == line.product_id) else {
        continue;
      };
      line.name = snapshot.name.clone();
      line.quantity_available = if snapshot.is_active {
        snapshot.quantity_available
      } else {
        Some(0)
      };
      let clamped = clamp_to_ceiling(line.quantity, line.quantity_available);
      if clamped != line.quantity {
        debug!(
          product_id = %line.product_id,
          from = line.quantity,
          to = clamped,
          "Stock re-sync clamped cart line quantity"
        );
        line.quantity = clamped;
      }
    }
    self.persist();
  }

  /// Sum of `price_coins * quantity` across all lines. Always recomputed;
  /// there is no cached total to drift.
  pub fn total(&self) -> u64 {
    self.items.iter().map(CartLineItem::line_total).sum()
  }

  /// Lines whose stock is known and either exhausted or below the current
  /// quantity. Display/blocking only; does not mutate.
  pub fn stock_violations(&self) -> Vec<&CartLineItem> {
    self.items.iter().filter(|l| l.is_stock_violation()).collect()
  }

  /// Empties the cart and persists the empty state. Called exactly once per
  /// cart lifecycle, after a fully successful checkout.
  pub fn clear(&mut self) {
    self.items.clear();
    if let Err(e) = self.storage.clear() {
      warn!(error = %e, "Cart storage clear failed");
    }
  }

  pub fn items(&self) -> &[CartLineItem] {
    &self.items
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  fn persist(&self) {
    let payload = match serde_json::to_string(&self.items) {
      Ok(payload) => payload,
      Err(e) => {
        warn!(error = %e, "Cart serialization failed; skipping persist");
        return;
      }
    };
    if let Err(e) = self.storage.write(&payload) {
      warn!(error = %e, "Cart storage write failed; in-memory state kept");
    }
  }
}

/// Decode the persisted payload leniently. A payload that fails to parse as
/// a whole is malformed cart data and resets to empty; individual records
/// are coerced or dropped, and duplicate product ids are merged into the
/// first occurrence.
fn decode_payload(payload: &str) -> Vec<CartLineItem> {
  let stored: Vec<StoredLineItem> = match serde_json::from_str(payload) {
    Ok(stored) => stored,
    Err(e) => {
      warn!(error = %e, "Malformed persisted cart; resetting to empty");
      return Vec::new();
    }
  };

  let mut items: Vec<CartLineItem> = Vec::with_capacity(stored.len());
  for record in stored {
    let Some(line) = record.into_line_item() else {
      continue;
    };
    match items.iter_mut().find(|l| l.product_id == line.product_id) {
      Some(existing) => {
        warn!(product_id = %line.product_id, "Merging duplicate persisted cart line");
        existing.quantity = existing.quantity.saturating_add(line.quantity);
      }
      None => items.push(line),
    }
  }
  items
}

/// A cloneable handle to the cart, shared between views and the checkout
/// flow via `Arc<parking_lot::RwLock<..>>`.
///
/// IMPORTANT: guards returned by `read`/`write` are blocking and MUST NOT be
/// held across `.await` suspension points.
#[derive(Clone)]
pub struct SharedCart(Arc<RwLock<CartStore>>);

impl SharedCart {
  pub fn new(store: CartStore) -> Self {
    SharedCart(Arc::new(RwLock::new(store)))
  }

  /// Loads the persisted cart behind a shared handle. See [`CartStore::load`].
  pub fn load(storage: impl CartStorage + 'static) -> Self {
    Self::new(CartStore::load(storage))
  }

  /// Acquires a read lock. The returned guard MUST be dropped before any
  /// `.await` point.
  pub fn read(&self) -> RwLockReadGuard<'_, CartStore> {
    self.0.read()
  }

  /// Acquires a write lock. The returned guard MUST be dropped before any
  /// `.await` point.
  pub fn write(&self) -> RwLockWriteGuard<'_, CartStore> {
    self.0.write()
  }
}
