// server/src/state.rs
use crate::config::AppConfig;
use duka_core::{Fulfillment, PlanCatalog};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub fulfillment: Arc<Fulfillment>,
  pub catalog: Arc<PlanCatalog>,
  pub config: Arc<AppConfig>, // Share loaded config
}
