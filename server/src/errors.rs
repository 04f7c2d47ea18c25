// server/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use duka_core::{CoreError, PromoError};

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Promo Code Rejected: {0}")]
  Promo(#[from] PromoError),

  // InvalidTransition / MissingCredentials / WrongPaymentMethod, surfaced to
  // the operator verbatim rather than silently coerced.
  #[error("Workflow Violation: {0}")]
  Workflow(String),

  #[error("Duplicate Payment Callback: {0}")]
  AlreadyFinalized(String),

  #[error("Payment Provider Error: {0}")]
  Payment(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Internal Server Error: {0}")]
  Internal(String), // For miscellaneous errors
}

impl From<CoreError> for AppError {
  fn from(err: CoreError) -> Self {
    match err {
      CoreError::Validation(m) => AppError::Validation(m),
      CoreError::NotFound(m) => AppError::NotFound(m),
      CoreError::Promo(p) => AppError::Promo(p),
      CoreError::InvalidTransition { .. } | CoreError::MissingCredentials | CoreError::WrongPaymentMethod { .. } => {
        AppError::Workflow(err.to_string())
      }
      CoreError::AlreadyFinalized { reference } => AppError::AlreadyFinalized(reference),
      CoreError::Payment(m) => AppError::Payment(m),
      CoreError::Internal { source } => AppError::Internal(source.to_string()),
    }
  }
}

// Allow anyhow::Error to be converted into AppError::Internal for convenience
// in handlers that use `?` on functions returning anyhow::Result.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    if err.is::<CoreError>() {
      return AppError::from(err.downcast::<CoreError>().unwrap());
    }
    AppError::Internal(err.to_string())
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": m})),
      AppError::Auth(m) => HttpResponse::Unauthorized().json(json!({"error": m})),
      AppError::NotFound(m) => HttpResponse::NotFound().json(json!({"error": m})),
      AppError::Promo(p) => HttpResponse::UnprocessableEntity().json(json!({"error": p.to_string()})),
      AppError::Workflow(m) => HttpResponse::Conflict().json(json!({"error": m})),
      AppError::AlreadyFinalized(reference) => {
        HttpResponse::Conflict().json(json!({"error": "Payment already finalized", "reference": reference}))
      }
      AppError::Payment(m) => {
        HttpResponse::PaymentRequired().json(json!({"error": "Payment provider error", "detail": m}))
      }
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Internal(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": m}))
      }
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
