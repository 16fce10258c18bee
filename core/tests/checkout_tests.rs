// tests/checkout_tests.rs
mod common; // Reference the common module

use aidla_cart::{submit_checkout, CartError, CartStore, CheckoutForm};
use common::*;

fn valid_form() -> CheckoutForm {
  CheckoutForm {
    full_name: "  Ada Lovelace ".to_string(),
    phone: "010-1234-5678".to_string(),
    address: "12 Analytical St".to_string(),
    notes: String::new(),
  }
}

#[tokio::test]
async fn empty_cart_is_rejected_before_any_remote_call() {
  setup_tracing();
  let (cart, _storage) = empty_cart();
  let backend = MockBackend::new();

  let err = submit_checkout(&cart, &backend, &valid_form())
    .await
    .expect_err("empty cart must not submit");

  assert!(matches!(err, CartError::EmptyCart));
  assert!(backend.attempts.lock().is_empty());
}

#[tokio::test]
async fn blank_required_field_blocks_submission() {
  setup_tracing();
  // Scenario D: non-empty cart, blank full_name.
  let (cart, _storage) = cart_with(&[line("p1", 100, 2, Some(5))]);
  let backend = MockBackend::new();

  let mut form = valid_form();
  form.full_name = "   ".to_string();

  let err = submit_checkout(&cart, &backend, &form)
    .await
    .expect_err("validation must fail");

  assert!(matches!(err, CartError::MissingField { field: "full_name" }));
  assert!(backend.attempts.lock().is_empty());
  assert_eq!(cart.read().len(), 1); // cart untouched

  let mut form = valid_form();
  form.phone = String::new();
  let err = submit_checkout(&cart, &backend, &form)
    .await
    .expect_err("validation must fail");
  assert!(matches!(err, CartError::MissingField { field: "phone" }));
}

#[tokio::test]
async fn batch_halts_on_first_failure_without_clearing_cart() {
  setup_tracing();
  // Three lines; the second one is rejected by the backend.
  let (cart, storage) = cart_with(&[
    line("p1", 100, 1, None),
    line("p2", 200, 2, None),
    line("p3", 300, 3, None),
  ]);
  let backend = MockBackend::failing_on("p2", "Insufficient coin balance");

  let err = submit_checkout(&cart, &backend, &valid_form())
    .await
    .expect_err("second line must halt the batch");

  match &err {
    CartError::SubmissionFailed {
      product_id, submitted, ..
    } => {
      assert_eq!(product_id, "p2");
      assert_eq!(*submitted, 1);
    }
    other => panic!("Expected SubmissionFailed, got {:?}", other),
  }

  // Exactly one request was created; the third line was never attempted.
  assert_eq!(backend.created_count(), 1);
  assert_eq!(backend.attempted_ids(), vec!["p1", "p2"]);

  // The cart is left fully intact, in memory and on the persisted entry.
  assert_eq!(cart.read().len(), 3);
  assert!(storage.snapshot().is_some());

  // The backend's message is surfaced verbatim.
  assert_eq!(err.display_message(), "Insufficient coin balance");
}

#[tokio::test]
async fn successful_batch_submits_in_cart_order_and_clears_cart() {
  setup_tracing();
  // Scenario E: two lines, both remote calls succeed.
  let (cart, storage) = cart_with(&[line("p1", 100, 2, Some(5)), line("p2", 50, 1, None)]);
  let backend = MockBackend::new();

  let summary = submit_checkout(&cart, &backend, &valid_form())
    .await
    .expect("both lines submit");

  assert_eq!(summary.receipts.len(), 2);
  assert_eq!(summary.receipts[0].tx_no, "tx-0001");
  assert_eq!(summary.receipts[1].tx_no, "tx-0002");
  assert_eq!(summary.total_coins, 250);

  // Strictly sequential, in cart order.
  assert_eq!(backend.attempted_ids(), vec!["p1", "p2"]);

  // Every line carries the same trimmed order details.
  let attempts = backend.attempts.lock();
  for req in attempts.iter() {
    assert_eq!(req.order_details.full_name, "Ada Lovelace");
    assert_eq!(req.order_details.phone, "010-1234-5678");
  }

  // The cart is cleared exactly once, and a reload sees the empty state.
  assert!(cart.read().is_empty());
  let reloaded = CartStore::load(storage);
  assert!(reloaded.is_empty());
}

#[tokio::test]
async fn quantities_are_submitted_as_clamped() {
  setup_tracing();
  // Persisted quantity 7 with stock 3 is clamped on load; the purchase
  // request must carry the clamped value.
  let (cart, _storage) = cart_with(&[line("p1", 100, 7, Some(3))]);
  let backend = MockBackend::new();

  submit_checkout(&cart, &backend, &valid_form()).await.expect("submits");

  let attempts = backend.attempts.lock();
  assert_eq!(attempts[0].quantity, 3);
}
