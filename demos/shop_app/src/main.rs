// demos/shop_app/src/main.rs

// Declare modules for the application
mod config;
mod errors;
mod services;
mod state;
mod web;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::backend_mock::MockShopBackend;
use crate::services::remote::RpcBackend;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer}; // Renamed web to actix_data
use aidla_cart::{JsonFileStorage, SharedCart, ShopBackend};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

// Main function
#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize tracing subscriber for logging
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting AIDLA shop dashboard server...");

  // Load application configuration
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg), // Arc the config for sharing
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      panic!("Configuration error: {}", e);
    }
  };

  // Load the persisted cart. Never fails: unreadable or malformed entries
  // reset to an empty cart.
  let cart = SharedCart::load(JsonFileStorage::new(&app_config.cart_storage_dir));
  tracing::info!(
    lines = cart.read().len(),
    dir = %app_config.cart_storage_dir.display(),
    "Cart loaded from persisted entry."
  );

  // Pick the backend implementation
  let backend: Arc<dyn ShopBackend> = if app_config.use_mock_backend {
    tracing::info!("Using the in-process mock backend.");
    Arc::new(MockShopBackend::seeded())
  } else {
    let base_url = app_config
      .backend_base_url
      .clone()
      .expect("config validation guarantees a backend URL");
    tracing::info!(%base_url, "Using the remote RPC backend.");
    Arc::new(RpcBackend::new(base_url, app_config.backend_api_key.clone()))
  };

  // Create AppState
  let app_state = AppState {
    cart,
    backend,
    config: app_config.clone(),
    checkout_in_flight: Arc::new(AtomicBool::new(false)),
  };

  // Configure and Start Actix Web Server
  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::routes::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
