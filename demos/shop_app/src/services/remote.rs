// demos/shop_app/src/services/remote.rs

//! HTTP client for the managed backend's remote-procedure layer.
//!
//! Every call is a POST to `<base>/rpc/<procedure>`; non-2xx responses carry
//! a JSON body whose `error`/`message` field is surfaced verbatim to the
//! user. No retries and no client-side timeouts beyond reqwest's defaults;
//! a failed call is reported once and retried only by the user.

use aidla_cart::{BackendError, NewPurchaseRequest, ProductSnapshot, PurchaseReceipt, PurchaseRecord, ShopBackend};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, instrument};

pub struct RpcBackend {
  http: reqwest::Client,
  base_url: String,
  api_key: Option<String>,
}

impl RpcBackend {
  pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
    RpcBackend {
      http: reqwest::Client::new(),
      base_url: base_url.into().trim_end_matches('/').to_string(),
      api_key,
    }
  }

  fn rpc_url(&self, procedure: &str) -> String {
    format!("{}/rpc/{}", self.base_url, procedure)
  }

  async fn post_rpc<T: DeserializeOwned>(&self, procedure: &str, body: &impl Serialize) -> Result<T, BackendError> {
    let mut request = self.http.post(self.rpc_url(procedure)).json(body);
    if let Some(key) = &self.api_key {
      request = request.bearer_auth(key).header("apikey", key.as_str());
    }

    let response = request
      .send()
      .await
      .map_err(|e| BackendError::with_source("Backend is unreachable", e))?;

    let status = response.status();
    debug!(procedure, status = %status, "RPC response received");
    if !status.is_success() {
      return Err(BackendError::msg(error_message(response).await));
    }
    response
      .json::<T>()
      .await
      .map_err(|e| BackendError::with_source("Backend returned an unreadable response", e))
  }
}

/// Best-effort extraction of the backend's own error text from a non-2xx
/// body; falls back to the HTTP status.
async fn error_message(response: reqwest::Response) -> String {
  let status = response.status();
  match response.json::<Value>().await {
    Ok(body) => body
      .get("error")
      .or_else(|| body.get("message"))
      .and_then(Value::as_str)
      .map(str::to_string)
      .unwrap_or_else(|| format!("Backend rejected the request ({})", status)),
    Err(_) => format!("Backend rejected the request ({})", status),
  }
}

#[async_trait]
impl ShopBackend for RpcBackend {
  #[instrument(skip(self, req), fields(product_id = %req.product_id, quantity = req.quantity))]
  async fn create_purchase_request(&self, req: &NewPurchaseRequest) -> Result<PurchaseReceipt, BackendError> {
    self.post_rpc("create_purchase_request", req).await
  }

  #[instrument(skip(self))]
  async fn list_purchase_history(&self, limit: u32, offset: u32) -> Result<Vec<PurchaseRecord>, BackendError> {
    self
      .post_rpc("purchase_history", &json!({ "limit": limit, "offset": offset }))
      .await
  }

  #[instrument(skip(self))]
  async fn list_products(&self) -> Result<Vec<ProductSnapshot>, BackendError> {
    self.post_rpc("shop_products", &json!({})).await
  }
}
