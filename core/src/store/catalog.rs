// core/src/store/catalog.rs

use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use crate::model::plan::SubscriptionPlan;

/// Read-mostly catalog of purchasable subscription plans. Consulted at
/// order-creation time only; orders carry their own snapshot afterwards.
#[derive(Default)]
pub struct PlanCatalog {
  plans: RwLock<HashMap<Uuid, SubscriptionPlan>>,
}

impl PlanCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn seed(&self, plans: Vec<SubscriptionPlan>) {
    let mut guard = self.plans.write();
    for plan in plans {
      guard.insert(plan.id, plan);
    }
  }

  pub fn upsert(&self, plan: SubscriptionPlan) {
    self.plans.write().insert(plan.id, plan);
  }

  pub fn get(&self, id: Uuid) -> Option<SubscriptionPlan> {
    self.plans.read().get(&id).cloned()
  }

  pub fn list_active(&self) -> Vec<SubscriptionPlan> {
    let mut plans: Vec<SubscriptionPlan> = self
      .plans
      .read()
      .values()
      .filter(|plan| plan.is_active)
      .cloned()
      .collect();
    plans.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.name.cmp(&b.name)));
    plans
  }
}
