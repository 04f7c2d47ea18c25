// server/src/services/settings.rs

use crate::config::AppConfig;
use std::sync::Arc;

use duka_core::{ManualPaymentInfo, PaymentMethod, SettingsProvider};

/// Settings backed by the loaded application config. The core queries this at
/// order-creation time to decide which payment paths are open.
pub struct EnvSettings {
  config: Arc<AppConfig>,
}

impl EnvSettings {
  pub fn new(config: Arc<AppConfig>) -> Self {
    EnvSettings { config }
  }
}

impl SettingsProvider for EnvSettings {
  fn is_method_enabled(&self, method: PaymentMethod) -> bool {
    match method {
      PaymentMethod::Manual => self.config.manual_payment_enabled,
      PaymentMethod::UssdPush => self.config.ussd_payment_enabled,
    }
  }

  fn manual_payment_info(&self) -> Option<ManualPaymentInfo> {
    if !self.config.manual_payment_enabled {
      return None;
    }
    Some(ManualPaymentInfo {
      phone: self.config.manual_payment_phone.clone(),
      name: self.config.manual_payment_name.clone(),
      instructions: self.config.manual_payment_instructions.clone(),
    })
  }
}
