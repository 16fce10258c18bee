// tests/history_tests.rs
mod common; // Reference the common module

use aidla_cart::{fetch_history, CartError, PurchaseStatus};
use common::*;

#[tokio::test]
async fn fetch_pages_through_records() {
  setup_tracing();
  let mut backend = MockBackend::new();
  backend.seeded_history = vec![
    history_record("tx-0003", PurchaseStatus::Pending),
    history_record("tx-0002", PurchaseStatus::Approved),
    history_record("tx-0001", PurchaseStatus::Rejected),
  ];

  let page = fetch_history(&backend, 2, 0).await.expect("fetch succeeds");
  assert_eq!(page.records.len(), 2);
  assert_eq!(page.records[0].tx_no, "tx-0003");
  assert!(page.has_more());

  let page = fetch_history(&backend, 2, 2).await.expect("fetch succeeds");
  assert_eq!(page.records.len(), 1);
  assert_eq!(page.records[0].tx_no, "tx-0001");
  assert!(!page.has_more());
}

#[tokio::test]
async fn fetch_failure_surfaces_backend_message() {
  setup_tracing();
  let mut backend = MockBackend::new();
  backend.history_fails = true;

  let err = fetch_history(&backend, 10, 0).await.expect_err("fetch fails");
  assert!(matches!(err, CartError::Remote { .. }));
  assert_eq!(err.display_message(), "History is temporarily unavailable");
}

#[test]
fn status_badges_and_unknown_tags() {
  // Unknown statuses from newer backend revisions are preserved as-is.
  let status: PurchaseStatus = "pending".to_string().into();
  assert_eq!(status, PurchaseStatus::Pending);
  assert_eq!(status.badge(), "Pending");

  let status: PurchaseStatus = "on_hold".to_string().into();
  assert_eq!(status, PurchaseStatus::Other("on_hold".to_string()));
  assert_eq!(status.badge(), "on_hold");

  let round_trip: String = PurchaseStatus::Cancelled.into();
  assert_eq!(round_trip, "cancelled");
}
