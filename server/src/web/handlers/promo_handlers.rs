// server/src/web/handlers/promo_handlers.rs

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::handlers::order_handlers::AuthenticatedUser;
use duka_core::{PromoBenefit, PromoCode};

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
pub struct ValidatePromoRequestPayload {
  pub code: String,
  pub price: u64,
}

// --- Handler Implementations ---

#[instrument(
    name = "handler::validate_promo",
    skip(app_state, req_payload, auth_user),
    fields(user = %auth_user.user_ref)
)]
pub async fn validate_promo_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<ValidatePromoRequestPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();
  let quote = app_state
    .fulfillment
    .validate_promo(&payload.code, &auth_user.user_ref, payload.price, Utc::now())?;

  let discount = match quote.benefit {
    PromoBenefit::AmountOff(off) => off,
    PromoBenefit::FreeAccess { .. } => payload.price,
  };
  Ok(HttpResponse::Ok().json(json!({
      "message": "Promo code is valid.",
      "quote": quote,
      "discount": discount
  })))
}

#[instrument(name = "handler::list_promo_codes", skip(app_state))]
pub async fn list_promos_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let promos = app_state.fulfillment.promos().list();
  Ok(HttpResponse::Ok().json(json!({
      "message": "Promo codes fetched successfully.",
      "promoCodes": promos
  })))
}

#[instrument(name = "handler::upsert_promo_code", skip(app_state, req_payload))]
pub async fn upsert_promo_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<PromoCode>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();
  if payload.code.trim().is_empty() {
    return Err(AppError::Validation("Promo code text is required.".to_string()));
  }
  if payload.max_uses_per_user == 0 {
    return Err(AppError::Validation("max_uses_per_user must be at least 1.".to_string()));
  }
  if payload.discount_percent > 100 {
    return Err(AppError::Validation("discount_percent cannot exceed 100.".to_string()));
  }

  let stored = app_state.fulfillment.promos().upsert(payload);
  info!("Promo code '{}' saved.", stored.code);
  Ok(HttpResponse::Ok().json(json!({
      "message": "Promo code saved.",
      "promoCode": stored
  })))
}
