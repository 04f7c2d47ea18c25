// server/src/main.rs

// Declare modules for the application
mod config;
mod errors;
mod services;
mod state;
mod web;

use crate::config::AppConfig;
use crate::services::fastlipa::FastLipaClient;
use crate::services::settings::EnvSettings;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer}; // Renamed web to actix_data
use chrono::Utc;
use duka_core::{
  DurationType, Fulfillment, OrderStore, PlanCatalog, PromoCode, PromoKind, PromoLedger,
  SubscriptionPlan,
};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use uuid::Uuid;

// Main function
#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize tracing subscriber for logging
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting Duka marketplace-operations server...");

  // Load application configuration
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg), // Arc the config for sharing
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      panic!("Configuration error: {}", e);
    }
  };

  // Assemble the core: stores, collaborators, and the fulfillment service
  let orders = Arc::new(OrderStore::new());
  let promos = Arc::new(PromoLedger::new());
  let catalog = Arc::new(PlanCatalog::new());
  let settings = Arc::new(EnvSettings::new(app_config.clone()));
  let push_provider = Arc::new(FastLipaClient::new());
  let fulfillment = Arc::new(Fulfillment::new(
    orders,
    promos.clone(),
    settings,
    push_provider,
  ));

  // Seed demo catalog data if configured
  if app_config.seed_demo_data {
    seed_demo_data(&catalog, &promos);
    tracing::info!("Demo plans and promo codes seeded.");
  }

  // Create AppState
  let app_state = AppState {
    fulfillment: fulfillment.clone(),
    catalog,
    config: app_config.clone(),
  };

  // Spawn the periodic expiry sweep. Orders whose access window lapses
  // without a delivery confirmation are moved to 'expired'; the sweep is
  // idempotent so the cadence is purely operational.
  let sweeper = fulfillment.clone();
  let sweep_interval = app_config.sweep_interval_secs;
  tokio::spawn(async move {
    let mut ticker = tokio::time::interval(std::time::Duration::from_secs(sweep_interval));
    loop {
      ticker.tick().await;
      let expired = sweeper.sweep_expired_orders(Utc::now());
      if expired > 0 {
        tracing::info!(expired, "Expiry sweep moved orders to 'expired'.");
      }
    }
  });
  tracing::info!("Expiry sweeper scheduled every {} seconds.", sweep_interval);

  // Configure and Start Actix Web Server
  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}

/// A small out-of-the-box catalog for local runs: one plan per duration tier
/// and a welcome discount code.
fn seed_demo_data(catalog: &PlanCatalog, promos: &PromoLedger) {
  catalog.seed(vec![
    SubscriptionPlan {
      id: Uuid::new_v4(),
      name: "Starter Week".to_string(),
      description: "Seven days of access.".to_string(),
      duration_type: DurationType::Weekly,
      price: 5_000,
      is_active: true,
      sort_order: 0,
    },
    SubscriptionPlan {
      id: Uuid::new_v4(),
      name: "Standard Month".to_string(),
      description: "Thirty days of access.".to_string(),
      duration_type: DurationType::Monthly,
      price: 15_000,
      is_active: true,
      sort_order: 1,
    },
    SubscriptionPlan {
      id: Uuid::new_v4(),
      name: "Annual Saver".to_string(),
      description: "A full year of access.".to_string(),
      duration_type: DurationType::Yearly,
      price: 120_000,
      is_active: true,
      sort_order: 2,
    },
  ]);

  promos.upsert(PromoCode {
    code: "KARIBU10".to_string(),
    description: "Welcome discount".to_string(),
    kind: PromoKind::Discount,
    discount_percent: 10,
    fixed_amount: 0,
    free_access_days: 0,
    max_uses: 0,
    max_uses_per_user: 1,
    used_count: 0,
    valid_from: None,
    valid_until: None,
    is_active: true,
  });
}
