// src/lib.rs

//! Duka core: the order fulfillment state machine and promo-code redemption
//! logic behind the Duka digital-subscription storefront.
//!
//! What lives here:
//!  - The order lifecycle (`pending -> processing -> active -> delivered`,
//!    with `cancelled`/`expired` off-ramps) enforced through a single
//!    status-update operation.
//!  - A promo-code ledger with a two-phase contract: read-only validation at
//!    checkout, revalidate-and-commit at order activation.
//!  - Payment-path bifurcation: automated USSD push confirmed by provider
//!    callback, or manual transfer verified by an operator.
//!  - A periodic, idempotent expiry sweep for lapsed access windows.
//!
//! The HTTP surface, configuration and the concrete push provider live in the
//! companion `duka-server` crate.

pub mod error;
pub mod fulfillment;
pub mod model;
pub mod payment;
pub mod settings;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::error::{CoreError, CoreResult, PromoError};

pub use crate::model::order::{
  Credentials, Order, OrderStatus, PaymentMethod, PaymentStatus, ServiceSnapshot,
};
pub use crate::model::plan::{DurationType, SubscriptionPlan};
pub use crate::model::promo::{normalize_code, PromoBenefit, PromoCode, PromoKind, PromoQuote};

pub use crate::fulfillment::{transition_allowed, Fulfillment, NewOrder};

pub use crate::payment::{CallbackOutcome, PushProvider};
pub use crate::settings::{ManualPaymentInfo, SettingsProvider, StaticSettings};
pub use crate::store::{OrderStore, PlanCatalog, PromoLedger};
