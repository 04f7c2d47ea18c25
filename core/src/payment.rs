// core/src/payment.rs

//! Contract with the external mobile-money push provider. The core never
//! talks to the network itself; it asks the provider to start a push and the
//! provider later reports the result through a callback carrying the
//! transaction reference returned here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreResult;

/// Outcome carried by a provider confirmation callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallbackOutcome {
  Paid,
  Failed,
}

#[async_trait]
pub trait PushProvider: Send + Sync {
  /// Triggers a payment push on the customer's phone and returns the
  /// provider's transaction reference for callback routing.
  async fn initiate(&self, order_id: Uuid, phone: &str, amount: u64, currency: &str) -> CoreResult<String>;
}
