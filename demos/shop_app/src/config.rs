// demos/shop_app/src/config.rs

use std::env;
use std::path::PathBuf;

use aidla_cart::DEFAULT_HISTORY_LIMIT;
use dotenvy::dotenv;

use crate::errors::{AppError, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  /// Base URL of the managed backend's RPC layer. Required unless the mock
  /// backend is enabled.
  pub backend_base_url: Option<String>,
  pub backend_api_key: Option<String>,

  /// Serve against an in-process mock backend instead of the remote one.
  pub use_mock_backend: bool,

  /// Directory holding the persisted cart entry.
  pub cart_storage_dir: PathBuf,

  pub history_page_size: u32,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let use_mock_backend = get_env("AIDLA_MOCK_BACKEND")
      .unwrap_or_else(|_| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid AIDLA_MOCK_BACKEND value: {}", e)))?;

    let backend_base_url = get_env("AIDLA_BACKEND_URL").ok();
    if backend_base_url.is_none() && !use_mock_backend {
      return Err(AppError::Config(
        "AIDLA_BACKEND_URL is required unless AIDLA_MOCK_BACKEND=true".to_string(),
      ));
    }
    let backend_api_key = get_env("AIDLA_BACKEND_API_KEY").ok();

    let cart_storage_dir = get_env("AIDLA_CART_DIR")
      .map(PathBuf::from)
      .unwrap_or_else(|_| PathBuf::from("./data"));

    let history_page_size = get_env("AIDLA_HISTORY_PAGE_SIZE")
      .unwrap_or_else(|_| DEFAULT_HISTORY_LIMIT.to_string())
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid AIDLA_HISTORY_PAGE_SIZE: {}", e)))?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      backend_base_url,
      backend_api_key,
      use_mock_backend,
      cart_storage_dir,
      history_page_size,
    })
  }
}
