// demos/shop_app/src/state.rs
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use aidla_cart::{SharedCart, ShopBackend};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
  /// The one logical writer of the cart is this dashboard session; the
  /// handle is shared read/write across workers.
  pub cart: SharedCart,
  pub backend: Arc<dyn ShopBackend>,
  pub config: Arc<AppConfig>, // Share loaded config
  /// Guards the checkout trigger: no two submission batches may run
  /// concurrently from the same dashboard instance.
  pub checkout_in_flight: Arc<AtomicBool>,
}
