// aidla_cart/src/checkout.rs

//! Checkout: collect buyer metadata, then turn each cart line into one
//! remote purchase request.
//!
//! Submission is strictly sequential and fail-fast: each call is awaited
//! before the next begins, so the backend assigns `tx_no`s in cart order and
//! a failure halts the batch at a well-defined point. Already-submitted
//! lines are not rolled back; the error reports how many were created so the
//! surface can say so honestly.

use tracing::{event, instrument, span, Level};

use crate::backend::ShopBackend;
use crate::error::{CartError, CartResult};
use crate::models::{NewPurchaseRequest, OrderDetails, PurchaseReceipt};
use crate::store::SharedCart;

/// Raw checkout form input, as typed by the buyer. Validation trims every
/// field; `full_name` and `phone` are required, the rest may stay empty.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
  pub full_name: String,
  pub phone: String,
  pub address: String,
  pub notes: String,
}

impl CheckoutForm {
  /// Validates the required fields and produces the `OrderDetails` shared by
  /// every line item of the batch.
  pub fn validate(&self) -> CartResult<OrderDetails> {
    let full_name = self.full_name.trim();
    if full_name.is_empty() {
      return Err(CartError::MissingField { field: "full_name" });
    }
    let phone = self.phone.trim();
    if phone.is_empty() {
      return Err(CartError::MissingField { field: "phone" });
    }
    Ok(OrderDetails {
      full_name: full_name.to_string(),
      phone: phone.to_string(),
      address: self.address.trim().to_string(),
      notes: self.notes.trim().to_string(),
    })
  }
}

/// Outcome of a fully successful checkout batch.
#[derive(Debug)]
pub struct CheckoutSummary {
  /// One receipt per cart line, in cart order.
  pub receipts: Vec<PurchaseReceipt>,
  /// The cart total at submission time, for the acknowledgment view.
  pub total_coins: u64,
}

/// Submits the whole cart as one purchase request per line item.
///
/// Rejects before any remote call when the cart is empty or a required field
/// is blank. On full success the cart is cleared (its single teardown in the
/// lifecycle) and a summary is returned; on the first backend failure the
/// batch halts and the cart is left intact.
#[instrument(name = "checkout_submit", skip_all, err(Display))]
pub async fn submit_checkout(
  cart: &SharedCart,
  backend: &dyn ShopBackend,
  form: &CheckoutForm,
) -> CartResult<CheckoutSummary> {
  // Snapshot under the read guard; the guard must be gone before any await.
  let (lines, total_coins) = {
    let guard = cart.read();
    if guard.is_empty() {
      return Err(CartError::EmptyCart);
    }
    (guard.items().to_vec(), guard.total())
  };

  let order_details = form.validate()?;

  event!(
    Level::INFO,
    lines = lines.len(),
    total_coins,
    "Submitting checkout batch"
  );

  let mut receipts: Vec<PurchaseReceipt> = Vec::with_capacity(lines.len());
  for (line_index, line) in lines.iter().enumerate() {
    let line_span = span!(
      Level::INFO,
      "purchase_request",
      line_index,
      product_id = %line.product_id,
      quantity = line.quantity
    );
    let _line_span_guard = line_span.enter();

    let req = NewPurchaseRequest {
      product_id: line.product_id.clone(),
      quantity: line.quantity,
      order_details: order_details.clone(),
    };
    match backend.create_purchase_request(&req).await {
      Ok(receipt) => {
        event!(Level::DEBUG, tx_no = %receipt.tx_no, "Purchase request created");
        receipts.push(receipt);
      }
      Err(e) => {
        event!(
          Level::ERROR,
          error = %e,
          submitted = receipts.len(),
          "Purchase request failed; halting batch"
        );
        return Err(CartError::SubmissionFailed {
          product_id: line.product_id.clone(),
          submitted: receipts.len(),
          source: e,
        });
      }
    }
  }

  cart.write().clear();
  event!(Level::INFO, receipts = receipts.len(), "Checkout batch completed; cart cleared");
  Ok(CheckoutSummary { receipts, total_coins })
}
