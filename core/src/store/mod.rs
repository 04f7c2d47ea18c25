// core/src/store/mod.rs

//! In-memory persistence. Every entity lives behind its own lock so mutations
//! of unrelated orders or promo codes never contend with each other.

pub mod catalog;
pub mod order_store;
pub mod promo_ledger;

pub use catalog::PlanCatalog;
pub use order_store::OrderStore;
pub use promo_ledger::PromoLedger;
