// core/src/settings.rs

//! Read-only settings collaborator: which payment methods are enabled and the
//! display info customers need to complete a manual transfer. Queried at
//! order-creation time only.

use serde::{Deserialize, Serialize};

use crate::model::order::PaymentMethod;

/// Shown to customers paying by manual transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualPaymentInfo {
  pub phone: String,
  pub name: String,
  #[serde(default)]
  pub instructions: String,
}

pub trait SettingsProvider: Send + Sync {
  fn is_method_enabled(&self, method: PaymentMethod) -> bool;

  fn manual_payment_info(&self) -> Option<ManualPaymentInfo>;
}

/// A fixed settings source, useful for tests and single-tenant deployments.
#[derive(Debug, Clone)]
pub struct StaticSettings {
  pub manual_enabled: bool,
  pub ussd_enabled: bool,
  pub manual_info: Option<ManualPaymentInfo>,
}

impl StaticSettings {
  pub fn all_enabled() -> Self {
    StaticSettings {
      manual_enabled: true,
      ussd_enabled: true,
      manual_info: None,
    }
  }
}

impl SettingsProvider for StaticSettings {
  fn is_method_enabled(&self, method: PaymentMethod) -> bool {
    match method {
      PaymentMethod::Manual => self.manual_enabled,
      PaymentMethod::UssdPush => self.ussd_enabled,
    }
  }

  fn manual_payment_info(&self) -> Option<ManualPaymentInfo> {
    self.manual_info.clone()
  }
}
