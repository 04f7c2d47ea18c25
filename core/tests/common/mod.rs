// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use std::sync::{
  atomic::{AtomicBool, AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;
use uuid::Uuid;

use duka_core::{
  CoreError, CoreResult, Credentials, Fulfillment, NewOrder, OrderStore, PaymentMethod, PromoCode,
  PromoKind, PromoLedger, PushProvider, ServiceSnapshot, StaticSettings,
};

// --- Test push provider ---

/// Counts initiated pushes and hands out deterministic references, so tests
/// can assert both that the provider was (or was not) invoked and route
/// callbacks by reference.
#[derive(Default)]
pub struct TestPushProvider {
  pub initiated: AtomicUsize,
  pub fail_next: AtomicBool,
}

#[async_trait]
impl PushProvider for TestPushProvider {
  async fn initiate(&self, _order_id: Uuid, _phone: &str, _amount: u64, _currency: &str) -> CoreResult<String> {
    if self.fail_next.swap(false, Ordering::SeqCst) {
      return Err(CoreError::Payment("push rejected by test provider".to_string()));
    }
    let n = self.initiated.fetch_add(1, Ordering::SeqCst) + 1;
    Ok(format!("push_ref_{n}"))
  }
}

// --- Harness ---

pub struct TestHarness {
  pub fulfillment: Arc<Fulfillment>,
  pub orders: Arc<OrderStore>,
  pub promos: Arc<PromoLedger>,
  pub push: Arc<TestPushProvider>,
}

pub fn harness() -> TestHarness {
  harness_with_settings(StaticSettings::all_enabled())
}

pub fn harness_with_settings(settings: StaticSettings) -> TestHarness {
  let orders = Arc::new(OrderStore::new());
  let promos = Arc::new(PromoLedger::new());
  let push = Arc::new(TestPushProvider::default());
  let fulfillment = Arc::new(Fulfillment::new(
    orders.clone(),
    promos.clone(),
    Arc::new(settings),
    push.clone(),
  ));
  TestHarness {
    fulfillment,
    orders,
    promos,
    push,
  }
}

// --- Request builders ---

pub fn snapshot(price: u64) -> ServiceSnapshot {
  ServiceSnapshot {
    name: "Streaming Premium".to_string(),
    price,
    currency: "TZS".to_string(),
    duration_label: "Monthly (30 days)".to_string(),
    access_days: 30,
    color: "#E50914".to_string(),
  }
}

pub fn manual_order(user: &str, price: u64) -> NewOrder {
  NewOrder {
    user_ref: user.to_string(),
    service: snapshot(price),
    payment_method: PaymentMethod::Manual,
    payment_phone: "+255700000001".to_string(),
    promo_code: None,
  }
}

pub fn push_order(user: &str, price: u64) -> NewOrder {
  NewOrder {
    payment_method: PaymentMethod::UssdPush,
    ..manual_order(user, price)
  }
}

pub fn creds() -> Credentials {
  Credentials {
    username: "customer@example.com".to_string(),
    password: "pass1234".to_string(),
    account_details: "Profile 2, PIN 0000".to_string(),
  }
}

pub fn percent_promo(code: &str, percent: u32) -> PromoCode {
  PromoCode {
    code: code.to_string(),
    description: String::new(),
    kind: PromoKind::Discount,
    discount_percent: percent,
    fixed_amount: 0,
    free_access_days: 0,
    max_uses: 0,
    max_uses_per_user: 1,
    used_count: 0,
    valid_from: None,
    valid_until: None,
    is_active: true,
  }
}

pub fn fixed_promo(code: &str, amount: u64) -> PromoCode {
  PromoCode {
    kind: PromoKind::Fixed,
    discount_percent: 0,
    fixed_amount: amount,
    ..percent_promo(code, 0)
  }
}

pub fn free_access_promo(code: &str, days: u32) -> PromoCode {
  PromoCode {
    kind: PromoKind::FreeAccess,
    discount_percent: 0,
    free_access_days: days,
    ..percent_promo(code, 0)
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
