// aidla_cart/src/history.rs

//! Read-only purchase history. No mutation operations exist here; a fetch
//! failure is surfaced inline and "retry" is just calling `fetch_history`
//! again from a manual refresh action.

use serde::Serialize;
use tracing::instrument;

use crate::backend::ShopBackend;
use crate::error::CartResult;
use crate::models::PurchaseRecord;

/// Default page size for the history view.
pub const DEFAULT_HISTORY_LIMIT: u32 = 20;

/// One fetched page of the user's purchase requests, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryPage {
  pub records: Vec<PurchaseRecord>,
  pub limit: u32,
  pub offset: u32,
}

impl HistoryPage {
  /// A full page suggests more records exist past this offset.
  pub fn has_more(&self) -> bool {
    self.records.len() as u32 >= self.limit
  }
}

/// Fetches one page of purchase history. Backend failures map to
/// `CartError::Remote` with the backend's message intact.
#[instrument(name = "history_fetch", skip(backend), err(Display))]
pub async fn fetch_history(backend: &dyn ShopBackend, limit: u32, offset: u32) -> CartResult<HistoryPage> {
  let records = backend.list_purchase_history(limit, offset).await?;
  Ok(HistoryPage { records, limit, offset })
}
