// server/src/web/handlers/order_handlers.rs

use actix_web::{web, FromRequest, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use duka_core::{Credentials, NewOrder, OrderStatus, PaymentMethod, ServiceSnapshot};

// --- Custom Extractor for the Authenticated Customer (Placeholder) ---
// In a real application, this would be implemented to extract user identity
// from a JWT, session, or other authentication mechanism. The core treats the
// reference as opaque, so the mock simply forwards the X-User-ID header.
#[derive(Debug)]
pub struct AuthenticatedUser {
  pub user_ref: String,
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError; // Use your app's error type
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    if let Some(user_header) = req.headers().get("X-User-ID") {
      if let Ok(user_ref) = user_header.to_str() {
        if !user_ref.trim().is_empty() {
          return futures_util::future::ready(Ok(AuthenticatedUser {
            user_ref: user_ref.trim().to_string(),
          }));
        }
      }
    }
    warn!("AuthenticatedUser extractor: Missing or invalid X-User-ID header.");
    futures_util::future::ready(Err(AppError::Auth(
      "User authentication required. Missing or invalid X-User-ID header for mock auth.".to_string(),
    )))
  }
}

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
pub struct CreateOrderRequestPayload {
  /// Purchase a catalog plan...
  pub plan_id: Option<Uuid>,
  /// ...or a one-off service listing resolved by the storefront.
  pub service: Option<ServiceSnapshot>,
  pub payment_method: PaymentMethod,
  pub payment_phone: String,
  pub promo_code: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateOrderRequestPayload {
  pub status: OrderStatus,
  pub admin_note: Option<String>,
  pub credentials: Option<Credentials>,
}

#[derive(Deserialize, Debug)]
pub struct SubmitProofRequestPayload {
  pub proof: String,
}

#[derive(Deserialize, Debug)]
pub struct ListOrdersQuery {
  pub status: Option<OrderStatus>,
}

// --- Handler Implementations ---

#[instrument(
    name = "handler::create_order",
    skip(app_state, req_payload, auth_user),
    fields(user = %auth_user.user_ref, method = %req_payload.payment_method)
)]
pub async fn create_order_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<CreateOrderRequestPayload>,
  auth_user: AuthenticatedUser, // Extracted authenticated customer
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();

  let service = match (payload.plan_id, payload.service) {
    (Some(plan_id), None) => {
      let plan = app_state
        .catalog
        .get(plan_id)
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::NotFound(format!("Subscription plan {} not found.", plan_id)))?;
      plan.snapshot()
    }
    (None, Some(snapshot)) => snapshot,
    _ => {
      return Err(AppError::Validation(
        "Provide exactly one of plan_id or service.".to_string(),
      ));
    }
  };

  let order = app_state
    .fulfillment
    .create_order(NewOrder {
      user_ref: auth_user.user_ref,
      service,
      payment_method: payload.payment_method,
      payment_phone: payload.payment_phone,
      promo_code: payload.promo_code,
    })
    .await?;

  info!("Order {} created for user {}.", order.id, order.user_ref);
  Ok(HttpResponse::Created().json(json!({
      "message": "Order placed successfully.",
      "order": order
  })))
}

#[instrument(name = "handler::list_orders", skip(app_state, query_params))]
pub async fn list_orders_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<ListOrdersQuery>,
) -> Result<HttpResponse, AppError> {
  let orders = app_state.fulfillment.orders().list(query_params.status);
  info!("Listed {} orders.", orders.len());
  Ok(HttpResponse::Ok().json(json!({
      "message": "Orders fetched successfully.",
      "orders": orders
  })))
}

#[instrument(
    name = "handler::update_order",
    skip(app_state, req_payload, path),
    fields(order_id = %path.as_ref(), requested = %req_payload.status)
)]
pub async fn update_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  req_payload: web::Json<UpdateOrderRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let order_id = path.into_inner();
  let payload = req_payload.into_inner();

  // Every operator request goes through the transition table; there is no
  // direct "set any status" escape hatch.
  let order = app_state
    .fulfillment
    .set_order_status(order_id, payload.status, payload.credentials, payload.admin_note)?;

  info!("Order {} moved to status '{}'.", order.id, order.status);
  Ok(HttpResponse::Ok().json(json!({
      "message": "Order updated.",
      "order": order
  })))
}

#[instrument(
    name = "handler::submit_payment_proof",
    skip(app_state, req_payload, path, auth_user),
    fields(order_id = %path.as_ref(), user = %auth_user.user_ref)
)]
pub async fn submit_proof_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  req_payload: web::Json<SubmitProofRequestPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let order_id = path.into_inner();
  let order = app_state
    .fulfillment
    .submit_manual_proof(order_id, &req_payload.proof)?;

  info!("Payment proof recorded for order {}.", order.id);
  Ok(HttpResponse::Ok().json(json!({
      "message": "Payment confirmation received. An operator will verify it shortly.",
      "order": order
  })))
}
