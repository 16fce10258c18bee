// demos/shop_app/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;

/// Proxy of the shop listing, used by the dashboard to browse products and
/// feed add-to-cart. The listing itself is owned by the backend.
#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = app_state
    .backend
    .list_products()
    .await
    .map_err(|e| AppError::Remote(e.message.clone()))?;
  Ok(HttpResponse::Ok().json(products))
}
