// demos/shop_app/src/services/backend_mock.rs
use std::collections::HashMap;

use aidla_cart::{
  BackendError, NewPurchaseRequest, ProductSnapshot, ProductType, PurchaseReceipt, PurchaseRecord, PurchaseStatus,
  ShopBackend,
};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tracing::{info, instrument};
use uuid::Uuid;

/// In-process stand-in for the managed backend, used when
/// `AIDLA_MOCK_BACKEND=true`. Holds a small seeded catalog, decrements stock
/// on each created request, and keeps history newest-first, so the dashboard
/// can be exercised end-to-end without network access.
pub struct MockShopBackend {
  catalog: Mutex<Vec<ProductSnapshot>>,
  prices: HashMap<String, u64>,
  history: Mutex<Vec<PurchaseRecord>>,
}

impl MockShopBackend {
  pub fn seeded() -> Self {
    let catalog = vec![
      product("mug-01", "AIDLA Mug", 120, ProductType::Physical, Some(8), true),
      product("tee-02", "AIDLA T-Shirt", 300, ProductType::Physical, Some(2), true),
      product("wp-07", "Desktop Wallpaper Pack", 40, ProductType::Digital, None, true),
      product("cap-03", "AIDLA Cap (retired)", 180, ProductType::Physical, Some(5), false),
    ];
    let prices = catalog.iter().map(|p| (p.product_id.clone(), p.price_coins)).collect();
    MockShopBackend {
      catalog: Mutex::new(catalog),
      prices,
      history: Mutex::new(Vec::new()),
    }
  }
}

fn product(
  product_id: &str,
  name: &str,
  price_coins: u64,
  product_type: ProductType,
  quantity_available: Option<u32>,
  is_active: bool,
) -> ProductSnapshot {
  ProductSnapshot {
    product_id: product_id.to_string(),
    name: name.to_string(),
    price_coins,
    product_type,
    quantity_available,
    is_active,
  }
}

#[async_trait]
impl ShopBackend for MockShopBackend {
  #[instrument(skip(self, req), fields(product_id = %req.product_id, quantity = req.quantity))]
  async fn create_purchase_request(&self, req: &NewPurchaseRequest) -> Result<PurchaseReceipt, BackendError> {
    tokio::time::sleep(std::time::Duration::from_millis(50)).await; // Simulate network latency

    let (name, product_type) = {
      let mut catalog = self.catalog.lock();
      let Some(entry) = catalog.iter_mut().find(|p| p.product_id == req.product_id) else {
        return Err(BackendError::msg("Product not found"));
      };
      if !entry.is_active {
        return Err(BackendError::msg("Product is no longer available"));
      }
      if let Some(available) = entry.quantity_available {
        if available < req.quantity {
          return Err(BackendError::msg("Insufficient stock for this product"));
        }
        entry.quantity_available = Some(available - req.quantity);
      }
      (entry.name.clone(), entry.product_type)
    };

    let unit_price = self.prices.get(&req.product_id).copied().unwrap_or(0);
    let tx_no = format!("mock_tx_{}", Uuid::new_v4().simple());
    info!(tx_no = %tx_no, "Mock purchase request created");

    self.history.lock().insert(
      0,
      PurchaseRecord {
        tx_no: tx_no.clone(),
        product_name: name,
        product_type,
        quantity: req.quantity,
        total_price_coins: unit_price * u64::from(req.quantity),
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

  #[instrument(skip(self))]
  async fn list_purchase_history(&self, limit: u32, offset: u32) -> Result<Vec<PurchaseRecord>, BackendError> {
    tokio::time::sleep(std::time::Duration::from_millis(30)).await;
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

  #[instrument(skip(self))]
  async fn list_products(&self) -> Result<Vec<ProductSnapshot>, BackendError> {
    tokio::time::sleep(std::time::Duration::from_millis(30)).await;
    Ok(self.catalog.lock().clone())
  }
}
