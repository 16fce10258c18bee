// aidla_cart/src/models/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Buyer contact/delivery metadata collected once per checkout and shared by
/// every line item of the batch. `address` and `notes` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetails {
  pub full_name: String,
  pub phone: String,
  #[serde(default)]
  pub address: String,
  #[serde(default)]
  pub notes: String,
}

/// Payload of one remote "create purchase request" call. One of these is
/// issued per cart line item at checkout time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPurchaseRequest {
  pub product_id: String,
  pub quantity: u32,
  pub order_details: OrderDetails,
}

/// What the backend returns for a created purchase request. Beyond `tx_no`
/// the shape is backend-defined and passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseReceipt {
  pub tx_no: String,
  #[serde(default, flatten)]
  pub extra: Map<String, Value>,
}

/// Admin-workflow status of a purchase request. Unknown tags from newer
/// backend revisions are preserved rather than dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PurchaseStatus {
  Pending,
  Approved,
  Rejected,
  Cancelled,
  Other(String),
}

impl PurchaseStatus {
  /// Short label for the status badge rendering.
  pub fn badge(&self) -> &str {
    match self {
      PurchaseStatus::Pending => "Pending",
      PurchaseStatus::Approved => "Approved",
      PurchaseStatus::Rejected => "Rejected",
      PurchaseStatus::Cancelled => "Cancelled",
      PurchaseStatus::Other(tag) => tag,
    }
  }
}

impl From<String> for PurchaseStatus {
  fn from(tag: String) -> Self {
    match tag.as_str() {
      "pending" => PurchaseStatus::Pending,
      "approved" => PurchaseStatus::Approved,
      "rejected" => PurchaseStatus::Rejected,
      "cancelled" => PurchaseStatus::Cancelled,
      _ => PurchaseStatus::Other(tag),
    }
  }
}

impl From<PurchaseStatus> for String {
  fn from(status: PurchaseStatus) -> Self {
    match status {
      PurchaseStatus::Pending => "pending".to_string(),
      PurchaseStatus::Approved => "approved".to_string(),
      PurchaseStatus::Rejected => "rejected".to_string(),
      PurchaseStatus::Cancelled => "cancelled".to_string(),
      PurchaseStatus::Other(tag) => tag,
    }
  }
}

/// One row of the user's purchase history, as returned by the backend.
/// All fields here are server-assigned and read-only on the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRecord {
  pub tx_no: String,
  pub product_name: String,
  pub product_type: super::line_item::ProductType,
  pub quantity: u32,
  pub total_price_coins: u64,
  pub status: PurchaseStatus,
  #[serde(default)]
  pub is_locked: bool,
  #[serde(default)]
  pub admin_note: Option<String>,
  pub created_at: DateTime<Utc>,
}
