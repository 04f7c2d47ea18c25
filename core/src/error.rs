// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

use crate::model::order::{OrderStatus, PaymentMethod};

/// Why a promo code was rejected. Surfaced verbatim to the purchase flow so
/// the customer sees the reason, both at checkout validation and again at
/// activation-time revalidation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PromoError {
  #[error("Promo code not found or inactive")]
  NotFound,

  #[error("Promo code is not valid yet")]
  NotYetValid,

  #[error("Promo code has expired")]
  Expired,

  #[error("Promo code has reached its usage limit")]
  GloballyExhausted,

  #[error("You have already used this promo code the maximum number of times")]
  PerUserLimitReached,
}

#[derive(Debug, Error)]
pub enum CoreError {
  #[error("Validation failed: {0}")]
  Validation(String),

  #[error("Order status cannot change from '{from}' to '{to}'")]
  InvalidTransition { from: OrderStatus, to: OrderStatus },

  #[error("Access credentials are required to activate an order")]
  MissingCredentials,

  #[error("Not found: {0}")]
  NotFound(String),

  #[error("Operation only applies to orders with the '{expected}' payment method")]
  WrongPaymentMethod { expected: PaymentMethod },

  #[error("Payment reference '{reference}' was already finalized")]
  AlreadyFinalized { reference: String },

  #[error("Promo code rejected: {0}")]
  Promo(#[from] PromoError),

  #[error("Payment provider error: {0}")]
  Payment(String),

  #[error("Internal error: {source}")]
  Internal {
    #[source]
    source: AnyhowError,
  },
}

// The key conversion the core provides for external errors: anything foreign
// becomes an Internal error unless it is already a CoreError in disguise.
impl From<AnyhowError> for CoreError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<CoreError>() {
      Ok(core_err) => core_err,
      Err(other) => CoreError::Internal { source: other },
    }
  }
}

pub type CoreResult<T, E = CoreError> = std::result::Result<T, E>;
