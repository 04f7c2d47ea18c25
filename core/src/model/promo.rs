// core/src/model/promo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PromoError;

/// Codes are matched case-insensitively; the ledger stores them upper-cased.
pub fn normalize_code(raw: &str) -> String {
  raw.trim().to_uppercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromoKind {
  /// Percentage off the price.
  Discount,
  /// Absolute amount off the price, clamped so the payable never goes negative.
  Fixed,
  /// Not a price discount: grants days of access with a payable amount of 0.
  FreeAccess,
}

/// A redeemable token that discounts price or grants free access, with global
/// and per-user usage caps. Only the value field matching `kind` is consulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoCode {
  pub code: String,
  #[serde(default)]
  pub description: String,
  pub kind: PromoKind,
  #[serde(default)]
  pub discount_percent: u32,
  #[serde(default)]
  pub fixed_amount: u64,
  #[serde(default)]
  pub free_access_days: u32,
  /// 0 means unlimited.
  #[serde(default)]
  pub max_uses: u32,
  pub max_uses_per_user: u32,
  /// Monotonically increasing; mutated only by successful redemption.
  #[serde(default)]
  pub used_count: u32,
  pub valid_from: Option<DateTime<Utc>>,
  pub valid_until: Option<DateTime<Utc>>,
  pub is_active: bool,
}

impl PromoCode {
  /// The four eligibility checks, in order, short-circuiting on the first
  /// failure. Shared between read-only validation and redemption so both
  /// phases of the two-phase contract agree.
  pub(crate) fn check_redeemable(&self, prior_user_uses: u32, now: DateTime<Utc>) -> Result<(), PromoError> {
    if !self.is_active {
      return Err(PromoError::NotFound);
    }
    if let Some(from) = self.valid_from {
      if now < from {
        return Err(PromoError::NotYetValid);
      }
    }
    if let Some(until) = self.valid_until {
      if now > until {
        return Err(PromoError::Expired);
      }
    }
    // When both caps are hit, the customer sees the limit that applies to
    // them rather than the global one.
    if prior_user_uses >= self.max_uses_per_user {
      return Err(PromoError::PerUserLimitReached);
    }
    if self.max_uses > 0 && self.used_count >= self.max_uses {
      return Err(PromoError::GloballyExhausted);
    }
    Ok(())
  }

  /// Computes what this code is worth against a given price.
  pub fn quote(&self, price: u64) -> PromoQuote {
    let (benefit, payable) = match self.kind {
      PromoKind::Discount => {
        let off = price * u64::from(self.discount_percent) / 100;
        (PromoBenefit::AmountOff(off), price - off)
      }
      PromoKind::Fixed => {
        let off = self.fixed_amount.min(price);
        (PromoBenefit::AmountOff(off), price - off)
      }
      PromoKind::FreeAccess => (
        PromoBenefit::FreeAccess {
          days: self.free_access_days,
        },
        0,
      ),
    };
    PromoQuote {
      code: self.code.clone(),
      benefit,
      payable,
    }
  }
}

/// What a validated promo code grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromoBenefit {
  AmountOff(u64),
  FreeAccess { days: u32 },
}

/// Result of read-only validation: the normalized code, its benefit, and the
/// amount left to pay. Holding a quote reserves nothing; the usage slot is
/// only consumed when the order activates.
#[derive(Debug, Clone, Serialize)]
pub struct PromoQuote {
  pub code: String,
  pub benefit: PromoBenefit,
  pub payable: u64,
}
