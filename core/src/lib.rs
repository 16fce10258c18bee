// src/lib.rs

//! aidla_cart: the cart & checkout engine of the AIDLA shop dashboard.
//!
//! This crate owns the one slice of the client with real state and
//! invariants:
//!  - A persisted cart store with stock-aware quantity clamping
//!    (one line per product, quantity floor of 1, ceiling at known stock).
//!  - Pure view models for the cart screen (stepper states, violation
//!    banner, checkout gate).
//!  - A checkout flow that validates buyer details and submits one purchase
//!    request per line item, sequentially and fail-fast.
//!  - A read-only purchase history fetch.
//!
//! Everything authoritative (live stock, coin balances, approval workflow)
//! lives behind the [`ShopBackend`] contract on the managed backend.

pub mod backend;
pub mod checkout;
pub mod error;
pub mod history;
pub mod models;
pub mod store;
pub mod view;

// --- Re-exports for the Public API ---

// Models that cross every seam
pub use crate::models::{
  CartLineItem, NewPurchaseRequest, OrderDetails, ProductSnapshot, ProductType, PurchaseReceipt, PurchaseRecord,
  PurchaseStatus,
};

// The store and its persistence owners
pub use crate::store::storage::{CartStorage, JsonFileStorage, MemoryStorage, CART_STORAGE_KEY};
pub use crate::store::{CartStore, SharedCart};

// Checkout and history flows
pub use crate::checkout::{submit_checkout, CheckoutForm, CheckoutSummary};
pub use crate::history::{fetch_history, HistoryPage, DEFAULT_HISTORY_LIMIT};

// View models
pub use crate::view::{CartViewModel, LineItemView};

// The backend contract and error taxonomy
pub use crate::backend::ShopBackend;
pub use crate::error::{BackendError, CartError, CartResult, StorageError};
