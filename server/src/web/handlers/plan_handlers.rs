// server/src/web/handlers/plan_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use duka_core::{DurationType, SubscriptionPlan};

#[instrument(name = "handler::list_plans", skip(app_state))]
pub async fn list_plans_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let plans = app_state.catalog.list_active();
  info!("Listed {} active subscription plans.", plans.len());
  Ok(HttpResponse::Ok().json(json!({
      "message": "Plans fetched successfully.",
      "plans": plans
  })))
}

// --- Request DTO ---

#[derive(Deserialize, Debug)]
pub struct UpsertPlanRequestPayload {
  pub id: Option<Uuid>,
  pub name: String,
  #[serde(default)]
  pub description: String,
  pub duration_type: DurationType,
  pub price: u64,
  #[serde(default = "default_true")]
  pub is_active: bool,
  #[serde(default)]
  pub sort_order: i32,
}

fn default_true() -> bool {
  true
}

#[instrument(name = "handler::upsert_plan", skip(app_state, req_payload), fields(plan_name = %req_payload.name))]
pub async fn upsert_plan_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<UpsertPlanRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();
  if payload.name.trim().is_empty() {
    return Err(AppError::Validation("Plan name is required.".to_string()));
  }

  let plan = SubscriptionPlan {
    id: payload.id.unwrap_or_else(Uuid::new_v4),
    name: payload.name,
    description: payload.description,
    duration_type: payload.duration_type,
    price: payload.price,
    is_active: payload.is_active,
    sort_order: payload.sort_order,
  };
  app_state.catalog.upsert(plan.clone());

  info!("Subscription plan '{}' saved.", plan.name);
  Ok(HttpResponse::Ok().json(json!({
      "message": "Plan saved.",
      "plan": plan
  })))
}
