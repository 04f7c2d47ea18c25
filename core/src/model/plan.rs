// core/src/model/plan.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::order::ServiceSnapshot;

/// Subscription billing period. The day counts are authoritative and fixed;
/// they are never derived from calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationType {
  Weekly,
  Monthly,
  Yearly,
}

impl DurationType {
  pub fn days(&self) -> u32 {
    match self {
      DurationType::Weekly => 7,
      DurationType::Monthly => 30,
      DurationType::Yearly => 365,
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      DurationType::Weekly => "Weekly (7 days)",
      DurationType::Monthly => "Monthly (30 days)",
      DurationType::Yearly => "Yearly (365 days)",
    }
  }
}

/// An immutable purchasable duration/price tier. Purchasing one produces an
/// order whose snapshot is taken via [`SubscriptionPlan::snapshot`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionPlan {
  pub id: Uuid,
  pub name: String,
  #[serde(default)]
  pub description: String,
  pub duration_type: DurationType,
  pub price: u64,
  pub is_active: bool,
  #[serde(default)]
  pub sort_order: i32,
}

impl SubscriptionPlan {
  pub fn snapshot(&self) -> ServiceSnapshot {
    ServiceSnapshot {
      name: self.name.clone(),
      price: self.price,
      currency: "TZS".to_string(),
      duration_label: self.duration_type.label().to_string(),
      access_days: self.duration_type.days(),
      color: "#06B6D4".to_string(),
    }
  }
}
