// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use std::sync::atomic::{AtomicUsize, Ordering};

use aidla_cart::{
  BackendError, CartLineItem, MemoryStorage, NewPurchaseRequest, ProductSnapshot, ProductType, PurchaseReceipt,
  PurchaseRecord, PurchaseStatus, SharedCart, ShopBackend,
};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tracing::Level;

// --- Common Model Builders ---

pub fn line(product_id: &str, price_coins: u64, quantity: u32, quantity_available: Option<u32>) -> CartLineItem {
  CartLineItem {
    product_id: product_id.to_string(),
    name: format!("Product {}", product_id),
    price_coins,
    quantity,
    product_type: ProductType::Physical,
    quantity_available,
  }
}

pub fn snapshot(product_id: &str, price_coins: u64, quantity_available: Option<u32>) -> ProductSnapshot {
  ProductSnapshot {
    product_id: product_id.to_string(),
    name: format!("Product {}", product_id),
    price_coins,
    product_type: ProductType::Physical,
    quantity_available,
    is_active: true,
  }
}

/// A shared cart loaded from a pre-seeded in-memory payload, plus a cloned
/// storage handle for observing what the store persists.
pub fn cart_with(lines: &[CartLineItem]) -> (SharedCart, MemoryStorage) {
  let payload = serde_json::to_string(lines).expect("test lines serialize");
  let storage = MemoryStorage::with_payload(payload);
  let cart = SharedCart::load(storage.clone());
  (cart, storage)
}

pub fn empty_cart() -> (SharedCart, MemoryStorage) {
  let storage = MemoryStorage::new();
  let cart = SharedCart::load(storage.clone());
  (cart, storage)
}

// --- Scripted Mock Backend ---

/// Mock of the managed backend. Records every attempted create call and can
/// be scripted to reject a specific product or the history fetch.
#[derive(Default)]
pub struct MockBackend {
  pub products: Vec<ProductSnapshot>,
  /// Product id whose create call fails with `fail_message`.
  pub fail_on_product: Option<String>,
  pub fail_message: String,
  pub history_fails: bool,
  pub seeded_history: Vec<PurchaseRecord>,
  /// Every create attempt, successful or not, in call order.
  pub attempts: Mutex<Vec<NewPurchaseRequest>>,
  /// Receipts actually created, in call order.
  pub created: Mutex<Vec<PurchaseReceipt>>,
  tx_counter: AtomicUsize,
}

impl MockBackend {
  pub fn new() -> Self {
    MockBackend {
      fail_message: "Insufficient stock".to_string(),
      ..Default::default()
    }
  }

  pub fn with_products(products: Vec<ProductSnapshot>) -> Self {
    MockBackend {
      products,
      ..Self::new()
    }
  }

  pub fn failing_on(product_id: &str, message: &str) -> Self {
    MockBackend {
      fail_on_product: Some(product_id.to_string()),
      fail_message: message.to_string(),
      ..Default::default()
    }
  }

  pub fn attempted_ids(&self) -> Vec<String> {
    self.attempts.lock().iter().map(|r| r.product_id.clone()).collect()
  }

  pub fn created_count(&self) -> usize {
    self.created.lock().len()
  }
}

#[async_trait]
impl ShopBackend for MockBackend {
  async fn create_purchase_request(&self, req: &NewPurchaseRequest) -> Result<PurchaseReceipt, BackendError> {
    self.attempts.lock().push(req.clone());
    if self.fail_on_product.as_deref() == Some(req.product_id.as_str()) {
      return Err(BackendError::msg(self.fail_message.clone()));
    }
    let n = self.tx_counter.fetch_add(1, Ordering::SeqCst) + 1;
    let receipt = PurchaseReceipt {
      tx_no: format!("tx-{:04}", n),
      extra: Default::default(),
    };
    self.created.lock().push(receipt.clone());
    Ok(receipt)
  }

  async fn list_purchase_history(&self, limit: u32, offset: u32) -> Result<Vec<PurchaseRecord>, BackendError> {
    if self.history_fails {
      return Err(BackendError::msg("History is temporarily unavailable"));
    }
    Ok(
      self
        .seeded_history
        .iter()
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .collect(),
    )
  }

  async fn list_products(&self) -> Result<Vec<ProductSnapshot>, BackendError> {
    Ok(self.products.clone())
  }
}

pub fn history_record(tx_no: &str, status: PurchaseStatus) -> PurchaseRecord {
  PurchaseRecord {
    tx_no: tx_no.to_string(),
    product_name: "Product p1".to_string(),
    product_type: ProductType::Physical,
    quantity: 1,
    total_price_coins: 100,
    status,
    is_locked: false,
    admin_note: None,
    created_at: Utc::now(),
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
