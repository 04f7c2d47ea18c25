// server/src/web/handlers/settings_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;

/// What the storefront needs to render the payment step: which methods are
/// open and, for manual transfers, where to send the money.
#[instrument(name = "handler::payment_settings", skip(app_state))]
pub async fn payment_settings_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let config = &app_state.config;
  let manual = if config.manual_payment_enabled {
    json!({
        "enabled": true,
        "phone": config.manual_payment_phone,
        "name": config.manual_payment_name,
        "instructions": config.manual_payment_instructions,
    })
  } else {
    json!({"enabled": false})
  };

  Ok(HttpResponse::Ok().json(json!({
      "ussdPayment": { "enabled": config.ussd_payment_enabled },
      "manualPayment": manual,
  })))
}
