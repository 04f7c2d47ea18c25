// core/src/fulfillment/service.rs

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::fulfillment::transitions::transition_allowed;
use crate::model::order::{
  Credentials, Order, OrderStatus, PaymentMethod, PaymentStatus, ServiceSnapshot,
};
use crate::model::promo::{PromoKind, PromoQuote};
use crate::payment::{CallbackOutcome, PushProvider};
use crate::settings::SettingsProvider;
use crate::store::{OrderStore, PromoLedger};

/// Everything needed to place an order. The service snapshot is resolved by
/// the caller (plan catalog or service listing) before this point.
#[derive(Debug, Clone)]
pub struct NewOrder {
  pub user_ref: String,
  pub service: ServiceSnapshot,
  pub payment_method: PaymentMethod,
  pub payment_phone: String,
  pub promo_code: Option<String>,
}

/// The fulfillment service: owns the order store and promo ledger and
/// enforces the transition table on every status change, whoever the caller
/// is (operator tooling, payment callbacks, the expiry sweeper).
pub struct Fulfillment {
  orders: Arc<OrderStore>,
  promos: Arc<PromoLedger>,
  settings: Arc<dyn SettingsProvider>,
  push: Arc<dyn PushProvider>,
}

impl Fulfillment {
  pub fn new(
    orders: Arc<OrderStore>,
    promos: Arc<PromoLedger>,
    settings: Arc<dyn SettingsProvider>,
    push: Arc<dyn PushProvider>,
  ) -> Self {
    Fulfillment {
      orders,
      promos,
      settings,
      push,
    }
  }

  pub fn orders(&self) -> &OrderStore {
    &self.orders
  }

  pub fn promos(&self) -> &PromoLedger {
    &self.promos
  }

  /// Places an order: quotes the promo (read-only), snapshots the service,
  /// persists it as Pending and hands off to the chosen payment path.
  /// Zero-payable orders (free items or a fully discounting promo) skip the
  /// payment step entirely and enter Processing already marked paid.
  #[instrument(skip(self, req), fields(user = %req.user_ref, method = %req.payment_method))]
  pub async fn create_order(&self, req: NewOrder) -> CoreResult<Order> {
    if req.user_ref.trim().is_empty() {
      return Err(CoreError::Validation("user reference is required".to_string()));
    }
    if req.payment_phone.trim().is_empty() {
      return Err(CoreError::Validation("payment phone is required".to_string()));
    }
    if req.service.name.trim().is_empty() {
      return Err(CoreError::Validation("service name is required".to_string()));
    }
    if !self.settings.is_method_enabled(req.payment_method) {
      return Err(CoreError::Validation(format!(
        "payment method '{}' is not enabled",
        req.payment_method
      )));
    }

    let now = Utc::now();
    let mut applied_promo = None;
    let mut payable = req.service.price;
    if let Some(raw) = req.promo_code.as_deref().filter(|c| !c.trim().is_empty()) {
      let quote = self.promos.validate(raw, &req.user_ref, req.service.price, now)?;
      payable = quote.payable;
      applied_promo = Some(quote.code);
    }

    let id = Uuid::new_v4();
    let expires_at = now + Duration::days(i64::from(req.service.access_days));
    let mut order = Order {
      id,
      user_ref: req.user_ref,
      service: req.service,
      payment_method: req.payment_method,
      payment_phone: req.payment_phone,
      payment_status: PaymentStatus::Pending,
      provider_ref: None,
      manual_payment_proof: None,
      status: OrderStatus::Pending,
      credentials: None,
      admin_note: None,
      applied_promo,
      payable_amount: payable,
      access_expires_at: Some(expires_at),
      created_at: now,
      updated_at: now,
    };

    if payable == 0 {
      order.payment_status = PaymentStatus::Paid;
      order.status = OrderStatus::Processing;
    } else if order.payment_method == PaymentMethod::UssdPush {
      let reference = self
        .push
        .initiate(id, &order.payment_phone, payable, &order.service.currency)
        .await?;
      order.provider_ref = Some(reference);
    }

    self.orders.insert(order.clone());
    info!(order_id = %id, payable, promo = ?order.applied_promo, "order created");
    Ok(order)
  }

  /// The single status-update operation. Validates the requested move against
  /// the transition table and applies it atomically together with its side
  /// effects; a failure leaves the order (and any promo counters) untouched.
  ///
  /// Entering Active finalizes the applied promo: the ledger re-runs all
  /// eligibility checks and consumes a usage slot exactly once, here and
  /// nowhere else. A code that expired or exhausted since checkout fails the
  /// whole call.
  #[instrument(skip(self, credentials, admin_note), fields(order_id = %order_id, requested = %requested))]
  pub fn set_order_status(
    &self,
    order_id: Uuid,
    requested: OrderStatus,
    credentials: Option<Credentials>,
    admin_note: Option<String>,
  ) -> CoreResult<Order> {
    self.orders.update(order_id, |order| {
      if order.status == OrderStatus::Cancelled && requested == OrderStatus::Cancelled {
        // Re-cancelling is a no-op, not an error.
        return Ok(());
      }
      if !transition_allowed(order.status, requested) {
        return Err(CoreError::InvalidTransition {
          from: order.status,
          to: requested,
        });
      }

      let now = Utc::now();
      if requested == OrderStatus::Active {
        let supplied = credentials.filter(|c| !c.is_empty());
        let effective = supplied.or_else(|| order.credentials.clone().filter(|c| !c.is_empty()));
        let Some(creds) = effective else {
          return Err(CoreError::MissingCredentials);
        };

        let mut bonus_days = 0u32;
        if let Some(code) = order.applied_promo.clone() {
          self.promos.redeem(&code, &order.user_ref, now)?;
          if let Some(promo) = self.promos.get(&code) {
            if promo.kind == PromoKind::FreeAccess {
              bonus_days = promo.free_access_days;
            }
          }
        }

        order.credentials = Some(creds);
        order.access_expires_at =
          Some(now + Duration::days(i64::from(order.service.access_days + bonus_days)));
      }

      if let Some(note) = admin_note.filter(|n| !n.trim().is_empty()) {
        order.admin_note = Some(note);
      }
      order.status = requested;
      order.updated_at = now;
      Ok(())
    })
  }

  /// Records the customer's free-text transfer proof on a manual-payment
  /// order and flags the payment for operator review.
  #[instrument(skip(self, proof), fields(order_id = %order_id))]
  pub fn submit_manual_proof(&self, order_id: Uuid, proof: &str) -> CoreResult<Order> {
    self.orders.update(order_id, |order| {
      if order.payment_method != PaymentMethod::Manual {
        return Err(CoreError::WrongPaymentMethod {
          expected: PaymentMethod::Manual,
        });
      }
      if proof.trim().is_empty() {
        return Err(CoreError::Validation("payment proof text is required".to_string()));
      }
      order.manual_payment_proof = Some(proof.trim().to_string());
      // Re-submission overwrites the text but never downgrades a finalized payment.
      if !order.payment_status.is_final() {
        order.payment_status = PaymentStatus::AwaitingVerification;
      }
      order.updated_at = Utc::now();
      Ok(())
    })
  }

  /// Applies a push-provider confirmation callback. Repeating an identical
  /// callback is a no-op; a conflicting callback after the payment was
  /// finalized, or any callback on a terminal order (e.g. paid-after-cancel),
  /// is rejected as AlreadyFinalized.
  #[instrument(skip(self), fields(reference = %reference, outcome = ?outcome))]
  pub fn handle_payment_callback(&self, reference: &str, outcome: CallbackOutcome) -> CoreResult<()> {
    let Some(order_id) = self.orders.find_by_provider_ref(reference) else {
      return Err(CoreError::NotFound(format!("payment reference {reference}")));
    };

    let updated = self.orders.update(order_id, |order| {
      let duplicate = matches!(
        (outcome, order.payment_status),
        (CallbackOutcome::Paid, PaymentStatus::Paid) | (CallbackOutcome::Failed, PaymentStatus::Failed)
      );
      if duplicate {
        return Ok(());
      }
      if order.payment_status.is_final() || order.status.is_terminal() {
        return Err(CoreError::AlreadyFinalized {
          reference: reference.to_string(),
        });
      }

      match outcome {
        CallbackOutcome::Paid => {
          order.payment_status = PaymentStatus::Paid;
          if order.status == OrderStatus::Pending {
            order.status = OrderStatus::Processing;
          }
        }
        CallbackOutcome::Failed => {
          order.payment_status = PaymentStatus::Failed;
          order.status = OrderStatus::Cancelled;
        }
      }
      order.updated_at = Utc::now();
      Ok(())
    })?;

    info!(order_id = %updated.id, status = %updated.status, "payment callback applied");
    Ok(())
  }

  /// Expires every non-terminal order whose access window has lapsed without
  /// a delivery confirmation. Safe to run on any schedule; re-running with
  /// the same `now` finds nothing left to expire.
  pub fn sweep_expired_orders(&self, now: DateTime<Utc>) -> usize {
    let mut expired = 0usize;
    for id in self.orders.ids() {
      let mut changed = false;
      let result = self.orders.update(id, |order| {
        if !order.status.is_terminal() {
          if let Some(deadline) = order.access_expires_at {
            if deadline <= now {
              order.status = OrderStatus::Expired;
              order.updated_at = now;
              changed = true;
            }
          }
        }
        Ok(())
      });
      if let Err(err) = result {
        // Order vanished between listing and locking; nothing to do.
        warn!(order_id = %id, error = %err, "expiry sweep skipped order");
      } else if changed {
        expired += 1;
      }
    }
    if expired > 0 {
      info!(expired, "expiry sweep completed");
    }
    expired
  }

  /// Read-only promo check for display and price estimates. Never consumes a
  /// usage slot; see `set_order_status` for the commit half.
  pub fn validate_promo(
    &self,
    code: &str,
    user_ref: &str,
    price: u64,
    now: DateTime<Utc>,
  ) -> CoreResult<PromoQuote> {
    Ok(self.promos.validate(code, user_ref, price, now)?)
  }
}
