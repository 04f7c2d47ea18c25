// server/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)] // Clone is useful if parts of config are passed around
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  // Payment method toggles and the details shown for manual transfers
  pub ussd_payment_enabled: bool,
  pub manual_payment_enabled: bool,
  pub manual_payment_phone: String,
  pub manual_payment_name: String,
  pub manual_payment_instructions: String,

  // Expiry sweep cadence
  pub sweep_interval_secs: u64,

  // Optional: seed demo plans/promos on startup
  pub seed_demo_data: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };
    let get_bool = |var_name: &str, default: bool| -> Result<bool> {
      get_env(var_name)
        .unwrap_or_else(|_| default.to_string())
        .parse::<bool>()
        .map_err(|e| AppError::Config(format!("Invalid {} value: {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let ussd_payment_enabled = get_bool("USSD_PAYMENT_ENABLED", true)?;
    let manual_payment_enabled = get_bool("MANUAL_PAYMENT_ENABLED", true)?;
    let manual_payment_phone = get_env("MANUAL_PAYMENT_PHONE").unwrap_or_else(|_| "+255 700 000 000".to_string());
    let manual_payment_name = get_env("MANUAL_PAYMENT_NAME").unwrap_or_else(|_| "Duka Store Ltd".to_string());
    let manual_payment_instructions = get_env("MANUAL_PAYMENT_INSTRUCTIONS")
      .unwrap_or_else(|_| "Send the amount to the number above, then submit the confirmation message.".to_string());

    let sweep_interval_secs = get_env("SWEEP_INTERVAL_SECS")
      .unwrap_or_else(|_| "300".to_string())
      .parse::<u64>()
      .map_err(|e| AppError::Config(format!("Invalid SWEEP_INTERVAL_SECS: {}", e)))?;

    let seed_demo_data = get_bool("SEED_DEMO_DATA", false)?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      ussd_payment_enabled,
      manual_payment_enabled,
      manual_payment_phone,
      manual_payment_name,
      manual_payment_instructions,
      sweep_interval_secs,
      seed_demo_data,
    })
  }
}
