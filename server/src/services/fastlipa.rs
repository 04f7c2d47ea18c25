// server/src/services/fastlipa.rs

//! Mock FastLipa client: the USSD push provider that pops a payment prompt on
//! the customer's phone. The real integration is a thin HTTP call; this mock
//! keeps the same contract and latency profile so the rest of the system is
//! exercised realistically.

use async_trait::async_trait;
use tracing::{info, instrument};
use uuid::Uuid;

use duka_core::{CoreError, CoreResult, PushProvider};

#[derive(Debug, Clone, Default)]
pub struct FastLipaClient;

impl FastLipaClient {
  pub fn new() -> Self {
    FastLipaClient
  }
}

#[async_trait]
impl PushProvider for FastLipaClient {
  #[instrument(skip(self), fields(order_id = %order_id, amount, currency = %currency))]
  async fn initiate(&self, order_id: Uuid, phone: &str, amount: u64, currency: &str) -> CoreResult<String> {
    if amount == 0 {
      return Err(CoreError::Payment("Amount must be greater than zero".to_string()));
    }
    if phone.trim().is_empty() {
      return Err(CoreError::Payment("A payment phone number is required".to_string()));
    }
    tokio::time::sleep(std::time::Duration::from_millis(50)).await; // Simulate network latency

    let reference = format!("fl_tx_{}", Uuid::new_v4());
    info!("FastLipa push initiated, reference: {}", reference);
    Ok(reference)
  }
}
