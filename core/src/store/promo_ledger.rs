// core/src/store/promo_ledger.rs

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::error::PromoError;
use crate::model::promo::{normalize_code, PromoCode, PromoQuote};

/// A code plus the per-user redemption tallies backing `max_uses_per_user`.
#[derive(Debug, Clone)]
struct PromoEntry {
  promo: PromoCode,
  redemptions: HashMap<String, u32>,
}

/// Stores promo codes and atomically tracks usage counts.
///
/// `validate` is read-only and can be called any number of times without
/// touching `used_count`. `redeem` is the commit half of the two-phase
/// contract: it re-runs the same eligibility checks and increments the
/// counters inside the per-code critical section, so two concurrent
/// redemptions with one slot left cannot both succeed.
#[derive(Default)]
pub struct PromoLedger {
  codes: RwLock<HashMap<String, Arc<RwLock<PromoEntry>>>>,
}

impl PromoLedger {
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates or replaces a code definition. Edits never reset the usage
  /// counters of an existing code.
  pub fn upsert(&self, mut promo: PromoCode) -> PromoCode {
    promo.code = normalize_code(&promo.code);
    let mut codes = self.codes.write();
    if let Some(existing) = codes.get(&promo.code).cloned() {
      let mut guard = existing.write();
      promo.used_count = guard.promo.used_count;
      guard.promo = promo.clone();
    } else {
      promo.used_count = 0;
      codes.insert(
        promo.code.clone(),
        Arc::new(RwLock::new(PromoEntry {
          promo: promo.clone(),
          redemptions: HashMap::new(),
        })),
      );
    }
    promo
  }

  pub fn get(&self, code: &str) -> Option<PromoCode> {
    let entry = self.codes.read().get(&normalize_code(code)).cloned()?;
    let promo = entry.read().promo.clone();
    Some(promo)
  }

  pub fn list(&self) -> Vec<PromoCode> {
    let mut promos: Vec<PromoCode> = self
      .codes
      .read()
      .values()
      .map(|entry| entry.read().promo.clone())
      .collect();
    promos.sort_by(|a, b| a.code.cmp(&b.code));
    promos
  }

  /// Read-only eligibility check and price quote. Never mutates `used_count`.
  pub fn validate(
    &self,
    code: &str,
    user_ref: &str,
    price: u64,
    now: DateTime<Utc>,
  ) -> Result<PromoQuote, PromoError> {
    let entry = self
      .codes
      .read()
      .get(&normalize_code(code))
      .cloned()
      .ok_or(PromoError::NotFound)?;
    let guard = entry.read();
    let prior = guard.redemptions.get(user_ref).copied().unwrap_or(0);
    guard.promo.check_redeemable(prior, now)?;
    Ok(guard.promo.quote(price))
  }

  /// Consumes one usage slot for `(code, user_ref)`. Revalidates everything
  /// under the per-code write lock; time may have passed since the checkout
  /// quote and a stale code must fail closed here rather than silently apply.
  pub fn redeem(&self, code: &str, user_ref: &str, now: DateTime<Utc>) -> Result<(), PromoError> {
    let entry = self
      .codes
      .read()
      .get(&normalize_code(code))
      .cloned()
      .ok_or(PromoError::NotFound)?;
    let mut guard = entry.write();
    let prior = guard.redemptions.get(user_ref).copied().unwrap_or(0);
    guard.promo.check_redeemable(prior, now)?;
    guard.promo.used_count += 1;
    *guard.redemptions.entry(user_ref.to_string()).or_insert(0) += 1;
    info!(code = %guard.promo.code, used_count = guard.promo.used_count, "promo code redeemed");
    Ok(())
  }
}
