// aidla_cart/src/backend.rs

//! The contract toward the external managed backend.
//!
//! Everything with real business logic (stock decrement, coin balance
//! checks, admin approval) lives behind these calls; this crate only shapes
//! requests and surfaces the backend's answers verbatim.

use async_trait::async_trait;

use crate::error::BackendError;
use crate::models::{NewPurchaseRequest, ProductSnapshot, PurchaseReceipt, PurchaseRecord};

/// The remote-procedure surface of the managed backend, as consumed by the
/// cart & checkout subsystem. Implemented by an HTTP RPC client in the app
/// and by scripted mocks in tests.
#[async_trait]
pub trait ShopBackend: Send + Sync {
  /// Creates one pending purchase request for one cart line. Fails with a
  /// backend-defined message when stock is insufficient, the product is
  /// inactive, or the user's coin balance does not cover the line.
  async fn create_purchase_request(&self, req: &NewPurchaseRequest) -> Result<PurchaseReceipt, BackendError>;

  /// User-scoped, read-only purchase history, newest first.
  async fn list_purchase_history(&self, limit: u32, offset: u32) -> Result<Vec<PurchaseRecord>, BackendError>;

  /// Current shop listing, used to feed `CartStore::add` and to re-sync
  /// stock snapshots.
  async fn list_products(&self) -> Result<Vec<ProductSnapshot>, BackendError>;
}
