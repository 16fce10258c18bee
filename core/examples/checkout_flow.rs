// aidla_cart/examples/checkout_flow.rs

use aidla_cart::{
  fetch_history, submit_checkout, BackendError, CartError, CartViewModel, CheckoutForm, MemoryStorage,
  NewPurchaseRequest, ProductSnapshot, ProductType, PurchaseReceipt, PurchaseRecord, PurchaseStatus, SharedCart,
  ShopBackend,
};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tracing::info;

// 1. A tiny in-process backend. A real deployment talks to the managed
//    backend's RPC layer instead; the contract is the same.
#[derive(Default)]
struct DemoBackend {
  history: Mutex<Vec<PurchaseRecord>>,
  tx_counter: Mutex<u32>,
}

#[async_trait]
impl ShopBackend for DemoBackend {
  async fn create_purchase_request(&self, req: &NewPurchaseRequest) -> Result<PurchaseReceipt, BackendError> {
    let mut counter = self.tx_counter.lock();
    *counter += 1;
    let tx_no = format!("demo-tx-{:03}", *counter);
    self.history.lock().insert(
      0,
      PurchaseRecord {
        tx_no: tx_no.clone(),
        product_name: req.product_id.clone(),
        product_type: ProductType::Physical,
        quantity: req.quantity,
        total_price_coins: 0,
        status: PurchaseStatus::Pending,
        is_locked: false,
        admin_note: None,
        created_at: Utc::now(),
      },
    );
    Ok(PurchaseReceipt {
      tx_no,
      extra: Default::default(),
    })
  }

  async fn list_purchase_history(&self, limit: u32, offset: u32) -> Result<Vec<PurchaseRecord>, BackendError> {
    Ok(
      self
        .history
        .lock()
        .iter()
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .collect(),
    )
  }

  async fn list_products(&self) -> Result<Vec<ProductSnapshot>, BackendError> {
    Ok(Vec::new())
  }
}

#[tokio::main]
async fn main() -> Result<(), CartError> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Cart & Checkout Flow Example ---");

  // 2. Load a cart (in-memory here; the app uses file-backed storage)
  let cart = SharedCart::load(MemoryStorage::new());

  // 3. Add products from the shop listing
  let mug = ProductSnapshot {
    product_id: "mug-01".to_string(),
    name: "AIDLA Mug".to_string(),
    price_coins: 120,
    product_type: ProductType::Physical,
    quantity_available: Some(3),
    is_active: true,
  };
  let wallpaper = ProductSnapshot {
    product_id: "wp-07".to_string(),
    name: "Desktop Wallpaper Pack".to_string(),
    price_coins: 40,
    product_type: ProductType::Digital,
    quantity_available: None,
    is_active: true,
  };

  {
    let mut guard = cart.write();
    guard.add(&mug, 5); // clamped to the stock of 3
    guard.add(&wallpaper, 2);
  }

  // 4. Project the cart view
  let vm = CartViewModel::project(&cart.read());
  for line in &vm.lines {
    info!(
      "{} x{} = {} coins (increment enabled: {})",
      line.item.name, line.item.quantity, line.line_total, line.increment_enabled
    );
  }
  info!("Cart total: {} coins", vm.total_coins);

  // 5. Submit the checkout batch
  let backend = DemoBackend::default();
  let form = CheckoutForm {
    full_name: "Ada Lovelace".to_string(),
    phone: "010-1234-5678".to_string(),
    address: "12 Analytical St".to_string(),
    notes: "Leave at the door".to_string(),
  };
  let summary = submit_checkout(&cart, &backend, &form).await?;
  info!(
    "Checkout complete: {} request(s), {} coins",
    summary.receipts.len(),
    summary.total_coins
  );
  assert!(cart.read().is_empty());

  // 6. Read the purchase history back
  let page = fetch_history(&backend, 10, 0).await?;
  for record in &page.records {
    info!("{} [{}] x{}", record.tx_no, record.status.badge(), record.quantity);
  }
  assert_eq!(page.records.len(), 2);

  Ok(())
}
