// tests/payment_flow_tests.rs
mod common;
use common::*;

use duka_core::{
  CallbackOutcome, CoreError, OrderStatus, PaymentStatus, StaticSettings,
};
use serial_test::serial;
use std::sync::atomic::Ordering;

#[tokio::test]
#[serial]
async fn ussd_creation_initiates_a_push() {
  setup_tracing();
  let h = harness();
  let order = h.fulfillment.create_order(push_order("user-1", 10_000)).await.unwrap();

  assert_eq!(order.payment_status, PaymentStatus::Pending);
  assert_eq!(order.provider_ref.as_deref(), Some("push_ref_1"));
  assert_eq!(h.push.initiated.load(Ordering::SeqCst), 1);
}

#[tokio::test]
#[serial]
async fn paid_callback_confirms_and_processes() {
  setup_tracing();
  let h = harness();
  let order = h.fulfillment.create_order(push_order("user-1", 10_000)).await.unwrap();
  let reference = order.provider_ref.clone().unwrap();

  h.fulfillment
    .handle_payment_callback(&reference, CallbackOutcome::Paid)
    .unwrap();
  let order = h.orders.get(order.id).unwrap();
  assert_eq!(order.payment_status, PaymentStatus::Paid);
  assert_eq!(order.status, OrderStatus::Processing);

  // The provider retries; an identical callback changes nothing.
  h.fulfillment
    .handle_payment_callback(&reference, CallbackOutcome::Paid)
    .unwrap();
  let unchanged = h.orders.get(order.id).unwrap();
  assert_eq!(unchanged.status, OrderStatus::Processing);
  assert_eq!(unchanged.updated_at, order.updated_at);
}

#[tokio::test]
#[serial]
async fn failed_callback_cancels_and_conflicting_retry_is_rejected() {
  setup_tracing();
  let h = harness();
  let order = h.fulfillment.create_order(push_order("user-1", 10_000)).await.unwrap();
  let reference = order.provider_ref.clone().unwrap();

  h.fulfillment
    .handle_payment_callback(&reference, CallbackOutcome::Failed)
    .unwrap();
  let order = h.orders.get(order.id).unwrap();
  assert_eq!(order.status, OrderStatus::Cancelled);
  assert_eq!(order.payment_status, PaymentStatus::Failed);

  // A later "paid" for the same reference must not resurrect the order.
  let result = h
    .fulfillment
    .handle_payment_callback(&reference, CallbackOutcome::Paid);
  assert!(matches!(result, Err(CoreError::AlreadyFinalized { .. })));
  let unchanged = h.orders.get(order.id).unwrap();
  assert_eq!(unchanged.status, OrderStatus::Cancelled);
  assert_eq!(unchanged.payment_status, PaymentStatus::Failed);
}

#[tokio::test]
#[serial]
async fn late_confirmation_after_operator_cancel_is_rejected() {
  setup_tracing();
  let h = harness();
  let order = h.fulfillment.create_order(push_order("user-1", 10_000)).await.unwrap();
  let reference = order.provider_ref.clone().unwrap();

  h.fulfillment
    .set_order_status(order.id, OrderStatus::Cancelled, None, None)
    .unwrap();

  let result = h
    .fulfillment
    .handle_payment_callback(&reference, CallbackOutcome::Paid);
  assert!(matches!(result, Err(CoreError::AlreadyFinalized { .. })));
  assert_eq!(h.orders.get(order.id).unwrap().status, OrderStatus::Cancelled);
}

#[tokio::test]
#[serial]
async fn unknown_reference_is_not_found() {
  setup_tracing();
  let h = harness();
  let result = h
    .fulfillment
    .handle_payment_callback("fl_tx_missing", CallbackOutcome::Paid);
  assert!(matches!(result, Err(CoreError::NotFound(_))));
}

#[tokio::test]
#[serial]
async fn manual_proof_flow_end_to_end() {
  setup_tracing();
  let h = harness();
  h.promos.upsert(percent_promo("SAVE50", 50));

  let mut req = manual_order("user-1", 10_000);
  req.promo_code = Some("SAVE50".to_string());
  let order = h.fulfillment.create_order(req).await.unwrap();
  assert_eq!(order.payment_status, PaymentStatus::Pending);

  let order = h
    .fulfillment
    .submit_manual_proof(order.id, "Sent TZS 5000 ref#123")
    .unwrap();
  assert_eq!(order.payment_status, PaymentStatus::AwaitingVerification);
  assert_eq!(order.manual_payment_proof.as_deref(), Some("Sent TZS 5000 ref#123"));

  // Operator reviews the proof and fulfills by hand.
  h.fulfillment
    .set_order_status(order.id, OrderStatus::Processing, None, None)
    .unwrap();
  let order = h
    .fulfillment
    .set_order_status(order.id, OrderStatus::Active, Some(creds()), None)
    .unwrap();

  assert!(order.credentials.as_ref().is_some_and(|c| !c.is_empty()));
  assert_eq!(h.promos.get("SAVE50").unwrap().used_count, 1);
}

#[tokio::test]
#[serial]
async fn proof_is_for_manual_orders_only() {
  setup_tracing();
  let h = harness();
  let order = h.fulfillment.create_order(push_order("user-1", 10_000)).await.unwrap();

  let result = h.fulfillment.submit_manual_proof(order.id, "paid, promise");
  assert!(matches!(result, Err(CoreError::WrongPaymentMethod { .. })));
}

#[tokio::test]
#[serial]
async fn zero_payable_skips_the_payment_step() {
  setup_tracing();
  let h = harness();
  h.promos.upsert(free_access_promo("TRYIT", 14));

  let mut req = push_order("user-1", 10_000);
  req.promo_code = Some("TRYIT".to_string());
  let order = h.fulfillment.create_order(req).await.unwrap();

  assert_eq!(order.payable_amount, 0);
  assert_eq!(order.payment_status, PaymentStatus::Paid);
  assert_eq!(order.status, OrderStatus::Processing);
  assert!(order.provider_ref.is_none());
  assert_eq!(h.push.initiated.load(Ordering::SeqCst), 0);
}

#[tokio::test]
#[serial]
async fn disabled_payment_methods_are_rejected() {
  setup_tracing();
  let h = harness_with_settings(StaticSettings {
    manual_enabled: false,
    ussd_enabled: true,
    manual_info: None,
  });

  let result = h.fulfillment.create_order(manual_order("user-1", 10_000)).await;
  assert!(matches!(result, Err(CoreError::Validation(_))));

  assert!(h.fulfillment.create_order(push_order("user-1", 10_000)).await.is_ok());
}

#[tokio::test]
#[serial]
async fn provider_failure_leaves_no_order_behind() {
  setup_tracing();
  let h = harness();
  h.push.fail_next.store(true, Ordering::SeqCst);

  let result = h.fulfillment.create_order(push_order("user-1", 10_000)).await;
  assert!(matches!(result, Err(CoreError::Payment(_))));
  assert!(h.orders.list(None).is_empty());
}
