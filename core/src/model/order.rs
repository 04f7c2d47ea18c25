// core/src/model/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Fulfillment lifecycle of an order.
///
/// The happy path is `Pending -> Processing -> Active -> Delivered`.
/// `Cancelled` and `Expired` are reachable from any non-terminal state;
/// `Delivered`, `Cancelled` and `Expired` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Pending,
  Processing,
  Active,
  Delivered,
  Cancelled,
  Expired,
}

impl OrderStatus {
  pub fn is_terminal(&self) -> bool {
    matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::Expired)
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      OrderStatus::Pending => "pending",
      OrderStatus::Processing => "processing",
      OrderStatus::Active => "active",
      OrderStatus::Delivered => "delivered",
      OrderStatus::Cancelled => "cancelled",
      OrderStatus::Expired => "expired",
    };
    f.write_str(s)
  }
}

/// How the customer pays. Immutable once the order is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
  /// Customer transfers money themselves and submits proof text for review.
  Manual,
  /// Automated mobile-money push confirmed by a provider callback.
  UssdPush,
}

impl fmt::Display for PaymentMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PaymentMethod::Manual => f.write_str("manual"),
      PaymentMethod::UssdPush => f.write_str("ussd_push"),
    }
  }
}

/// Payment progress, tracked independently of the order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
  Pending,
  AwaitingVerification,
  Paid,
  Failed,
}

impl PaymentStatus {
  /// Paid and Failed are final; callbacks arriving afterwards are either
  /// duplicates or conflicts.
  pub fn is_final(&self) -> bool {
    matches!(self, PaymentStatus::Paid | PaymentStatus::Failed)
  }
}

/// What was purchased, captured at order creation. Later catalog edits never
/// retroactively change a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSnapshot {
  pub name: String,
  pub price: u64,
  pub currency: String,
  /// Human-readable duration, e.g. "Monthly (30 days)".
  pub duration_label: String,
  /// Machine-usable access window driving expiry.
  pub access_days: u32,
  pub color: String,
}

/// Access credentials an operator attaches when fulfilling an order.
/// Shared with the customer once the order is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
  #[serde(default)]
  pub username: String,
  #[serde(default)]
  pub password: String,
  #[serde(default)]
  pub account_details: String,
}

impl Credentials {
  pub fn is_empty(&self) -> bool {
    self.username.trim().is_empty()
      && self.password.trim().is_empty()
      && self.account_details.trim().is_empty()
  }
}

/// A customer's request to acquire a service or subscription, tracked through
/// the fulfillment lifecycle.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
  pub id: Uuid,
  pub user_ref: String,
  pub service: ServiceSnapshot,
  pub payment_method: PaymentMethod,
  pub payment_phone: String,
  pub payment_status: PaymentStatus,
  /// Push-provider transaction reference; only set for UssdPush orders.
  pub provider_ref: Option<String>,
  pub manual_payment_proof: Option<String>,
  pub status: OrderStatus,
  /// Non-empty only while the order is Active or Delivered.
  pub credentials: Option<Credentials>,
  /// Operator note, visible to the customer.
  pub admin_note: Option<String>,
  /// Normalized promo code, set at most once at creation and never cleared.
  /// Its usage slot is consumed at activation, not here.
  pub applied_promo: Option<String>,
  /// Price after the promo quote taken at creation time.
  pub payable_amount: u64,
  pub access_expires_at: Option<DateTime<Utc>>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}
