// demos/shop_app/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use aidla_cart::CartViewModel;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
pub struct AddToCartPayload {
  pub product_id: String,
  /// Defaults to 1, matching the shop listing's "add" button.
  pub quantity: Option<u32>,
}

#[derive(Deserialize, Debug)]
pub struct SetQuantityPayload {
  pub product_id: String,
  pub quantity: u32,
}

#[derive(Deserialize, Debug)]
pub struct RemovePayload {
  pub product_id: String,
}

fn cart_view(app_state: &AppState) -> CartViewModel {
  CartViewModel::project(&app_state.cart.read())
}

// --- Handler Implementations ---

#[instrument(name = "handler::view_cart", skip(app_state))]
pub async fn view_cart_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  Ok(HttpResponse::Ok().json(cart_view(&app_state)))
}

#[instrument(
    name = "handler::add_to_cart",
    skip(app_state, payload),
    fields(product_id = %payload.product_id)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<AddToCartPayload>,
) -> Result<HttpResponse, AppError> {
  let quantity = payload.quantity.unwrap_or(1);

  // 1. Resolve the product against the current listing. The snapshot also
  //    refreshes the line's stock ceiling.
  let products = app_state.backend.list_products().await.map_err(|e| {
    warn!(error = %e, "Shop listing fetch failed during add-to-cart");
    AppError::Remote(e.message.clone())
  })?;
  let Some(snapshot) = products.iter().find(|p| p.product_id == payload.product_id) else {
    return Err(AppError::NotFound(format!("Product '{}' not found", payload.product_id)));
  };
  if !snapshot.is_active {
    return Err(AppError::Validation(format!(
      "Product '{}' is no longer available",
      snapshot.name
    )));
  }

  // 2. Mutate through the store; the clamp is deterministic, so the
  //    response can simply re-project the cart.
  app_state.cart.write().add(snapshot, quantity);
  info!(product_id = %payload.product_id, quantity, "Product added to cart");

  Ok(HttpResponse::Ok().json(json!({
      "message": "Item added to cart.",
      "cart": cart_view(&app_state)
  })))
}

#[instrument(
    name = "handler::set_quantity",
    skip(app_state, payload),
    fields(product_id = %payload.product_id, quantity = payload.quantity)
)]
pub async fn set_quantity_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<SetQuantityPayload>,
) -> Result<HttpResponse, AppError> {
  let updated = app_state.cart.write().set_quantity(&payload.product_id, payload.quantity);
  if !updated {
    return Err(AppError::NotFound(format!(
      "Cart has no line for product '{}'",
      payload.product_id
    )));
  }
  Ok(HttpResponse::Ok().json(cart_view(&app_state)))
}

#[instrument(
    name = "handler::remove_from_cart",
    skip(app_state, payload),
    fields(product_id = %payload.product_id)
)]
pub async fn remove_from_cart_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<RemovePayload>,
) -> Result<HttpResponse, AppError> {
  // Idempotent: removing an absent line is fine.
  app_state.cart.write().remove(&payload.product_id);
  Ok(HttpResponse::Ok().json(cart_view(&app_state)))
}

#[instrument(name = "handler::sync_stock", skip(app_state))]
pub async fn sync_stock_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  // Stock ceilings are snapshots; this refreshes them from the backend and
  // clamps any line whose stock shrank.
  let products = app_state
    .backend
    .list_products()
    .await
    .map_err(|e| AppError::Remote(e.message.clone()))?;
  app_state.cart.write().sync_stock(&products);
  Ok(HttpResponse::Ok().json(cart_view(&app_state)))
}
