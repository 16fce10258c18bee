// demos/shop_app/src/web/handlers/checkout_handlers.rs

use std::sync::atomic::Ordering;

use actix_web::{web, HttpResponse};
use aidla_cart::{submit_checkout, CartError, CheckoutForm};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;

// --- Request DTO ---

#[derive(Deserialize, Debug)]
pub struct CheckoutPayload {
  pub full_name: String,
  pub phone: String,
  pub address: Option<String>,
  pub notes: Option<String>,
}

impl CheckoutPayload {
  fn into_form(self) -> CheckoutForm {
    CheckoutForm {
      full_name: self.full_name,
      phone: self.phone,
      address: self.address.unwrap_or_default(),
      notes: self.notes.unwrap_or_default(),
    }
  }
}

// --- Handler Implementation ---

#[instrument(name = "handler::submit_checkout", skip(app_state, payload))]
pub async fn submit_checkout_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CheckoutPayload>,
) -> Result<HttpResponse, AppError> {
  // 1. The checkout action is gated while any stock violation exists; the
  //    user resolves them (or re-syncs) first.
  {
    let guard = app_state.cart.read();
    let violations = guard.stock_violations();
    if !violations.is_empty() {
      warn!(violations = violations.len(), "Checkout refused due to stock violations");
      return Err(AppError::Conflict(
        "Some cart lines exceed the available stock; adjust them before checking out.".to_string(),
      ));
    }
  }

  // 2. Single-flight guard: the submit trigger stays disabled while a batch
  //    is in flight, so no two batches can interleave.
  if app_state
    .checkout_in_flight
    .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
    .is_err()
  {
    return Err(AppError::Conflict("A checkout submission is already in flight.".to_string()));
  }

  // 3. Run the sequential fail-fast batch, then release the guard whatever
  //    the outcome was.
  let form = payload.into_inner().into_form();
  let outcome = submit_checkout(&app_state.cart, app_state.backend.as_ref(), &form).await;
  app_state.checkout_in_flight.store(false, Ordering::SeqCst);

  match outcome {
    Ok(summary) => {
      info!(requests = summary.receipts.len(), total_coins = summary.total_coins, "Checkout completed");
      let tx_nos: Vec<&str> = summary.receipts.iter().map(|r| r.tx_no.as_str()).collect();
      Ok(HttpResponse::Ok().json(json!({
          "message": "Your purchase requests were submitted.",
          "txNos": tx_nos,
          "totalCoins": summary.total_coins,
          "redirectTo": "/api/v1/history"
      })))
    }
    Err(CartError::SubmissionFailed {
      product_id,
      submitted,
      source,
    }) => {
      // Fail-fast with no rollback: earlier lines stay submitted, the cart
      // stays intact, and the message says so to keep the retry risk honest.
      warn!(%product_id, submitted, "Checkout batch halted");
      let detail = if submitted > 0 {
        format!(
          "{} ({} earlier line(s) were already submitted and are not rolled back.)",
          source.message, submitted
        )
      } else {
        source.message.clone()
      };
      Err(AppError::Remote(detail))
    }
    Err(other) => Err(other.into()),
  }
}
