// tests/expiry_tests.rs
mod common;
use common::*;

use chrono::{Duration, Utc};
use duka_core::{CoreError, OrderStatus};
use serial_test::serial;

#[tokio::test]
#[serial]
async fn sweep_expires_lapsed_orders_once() {
  setup_tracing();
  let h = harness();
  let order = h.fulfillment.create_order(manual_order("user-1", 10_000)).await.unwrap();

  // The snapshot grants 30 days of access.
  let later = Utc::now() + Duration::days(31);
  assert_eq!(h.fulfillment.sweep_expired_orders(later), 1);
  assert_eq!(h.orders.get(order.id).unwrap().status, OrderStatus::Expired);

  // Re-running with the same clock finds nothing left to expire.
  assert_eq!(h.fulfillment.sweep_expired_orders(later), 0);
  assert_eq!(h.orders.get(order.id).unwrap().status, OrderStatus::Expired);
}

#[tokio::test]
#[serial]
async fn sweep_leaves_fresh_and_terminal_orders_alone() {
  setup_tracing();
  let h = harness();

  let fresh = h.fulfillment.create_order(manual_order("user-1", 10_000)).await.unwrap();

  let delivered = h.fulfillment.create_order(manual_order("user-2", 10_000)).await.unwrap();
  h.fulfillment
    .set_order_status(delivered.id, OrderStatus::Processing, None, None)
    .unwrap();
  h.fulfillment
    .set_order_status(delivered.id, OrderStatus::Active, Some(creds()), None)
    .unwrap();
  h.fulfillment
    .set_order_status(delivered.id, OrderStatus::Delivered, None, None)
    .unwrap();

  assert_eq!(h.fulfillment.sweep_expired_orders(Utc::now()), 0);

  let later = Utc::now() + Duration::days(60);
  // Only the undelivered order lapses; the delivered one stays delivered.
  assert_eq!(h.fulfillment.sweep_expired_orders(later), 1);
  assert_eq!(h.orders.get(fresh.id).unwrap().status, OrderStatus::Expired);
  assert_eq!(h.orders.get(delivered.id).unwrap().status, OrderStatus::Delivered);
}

#[tokio::test]
#[serial]
async fn expired_orders_cannot_be_revived() {
  setup_tracing();
  let h = harness();
  let order = h.fulfillment.create_order(manual_order("user-1", 10_000)).await.unwrap();
  h.fulfillment.sweep_expired_orders(Utc::now() + Duration::days(31));

  let result = h
    .fulfillment
    .set_order_status(order.id, OrderStatus::Active, Some(creds()), None);
  assert!(matches!(result, Err(CoreError::InvalidTransition { .. })));
}

#[tokio::test]
#[serial]
async fn activation_rebases_the_access_window() {
  setup_tracing();
  let h = harness();
  h.promos.upsert(free_access_promo("BONUS14", 14));

  let mut req = manual_order("user-1", 10_000);
  req.promo_code = Some("BONUS14".to_string());
  // Zero payable, so the order is created already Processing.
  let order = h.fulfillment.create_order(req).await.unwrap();
  assert_eq!(order.status, OrderStatus::Processing);

  let before = Utc::now();
  let order = h
    .fulfillment
    .set_order_status(order.id, OrderStatus::Active, Some(creds()), None)
    .unwrap();

  // 30 plan days plus 14 bonus days from the free-access code.
  let expires = order.access_expires_at.unwrap();
  assert!(expires >= before + Duration::days(44) - Duration::minutes(1));
  assert!(expires <= Utc::now() + Duration::days(44));
  assert_eq!(h.promos.get("BONUS14").unwrap().used_count, 1);
}
