// demos/shop_app/src/web/handlers/history_handlers.rs

use actix_web::{web, HttpResponse};
use aidla_cart::fetch_history;
use serde::Deserialize;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct HistoryQuery {
  pub limit: Option<u32>,
  pub offset: Option<u32>,
}

/// Read-only list of the user's purchase requests. There is no retry logic
/// here; the refresh action on the page simply requests this route again.
#[instrument(name = "handler::purchase_history", skip(app_state, query))]
pub async fn purchase_history_handler(
  app_state: web::Data<AppState>,
  query: web::Query<HistoryQuery>,
) -> Result<HttpResponse, AppError> {
  let limit = query.limit.unwrap_or(app_state.config.history_page_size);
  let offset = query.offset.unwrap_or(0);

  let page = fetch_history(app_state.backend.as_ref(), limit, offset).await?;
  Ok(HttpResponse::Ok().json(page))
}
