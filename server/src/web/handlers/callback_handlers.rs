// server/src/web/handlers/callback_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;
use duka_core::{CallbackOutcome, CoreError};

// --- Request DTO ---

/// The confirmation FastLipa posts back after a push: the transaction
/// reference we received at initiation plus the final outcome.
#[derive(Deserialize, Debug)]
pub struct FastLipaCallbackPayload {
  pub reference: String,
  pub outcome: CallbackOutcome,
}

// --- Handler Implementation ---

#[instrument(
    name = "handler::fastlipa_callback",
    skip(app_state, req_payload),
    fields(reference = %req_payload.reference, outcome = ?req_payload.outcome)
)]
pub async fn fastlipa_callback_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<FastLipaCallbackPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();
  info!("Received FastLipa callback for reference '{}'.", payload.reference);

  match app_state
    .fulfillment
    .handle_payment_callback(&payload.reference, payload.outcome)
  {
    Ok(()) => {
      // Acknowledge receipt quickly; the provider only needs a 200.
      Ok(HttpResponse::Ok().json(json!({"status": "received"})))
    }
    Err(CoreError::AlreadyFinalized { reference }) => {
      // Duplicate or conflicting delivery for a settled payment. Log and
      // acknowledge so the provider stops retrying; the order is untouched.
      warn!(
        "Ignoring callback for already-finalized payment reference '{}'.",
        reference
      );
      Ok(HttpResponse::Ok().json(json!({"status": "acknowledged_duplicate"})))
    }
    Err(err) => {
      // Unknown reference or a genuine processing error; let the provider
      // see the failure and retry.
      Err(err.into())
    }
  }
}
