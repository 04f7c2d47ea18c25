// core/src/store/order_store.rs

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::model::order::{Order, OrderStatus};

/// Stores orders plus a secondary index from push-provider transaction
/// references to order ids for callback routing.
///
/// Each order sits behind its own `RwLock`, which serializes status
/// transitions per order without a store-wide lock. Guards are blocking and
/// must not be held across `.await` points.
#[derive(Default)]
pub struct OrderStore {
  orders: RwLock<HashMap<Uuid, Arc<RwLock<Order>>>>,
  by_provider_ref: RwLock<HashMap<String, Uuid>>,
}

impl OrderStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&self, order: Order) {
    if let Some(reference) = &order.provider_ref {
      self.by_provider_ref.write().insert(reference.clone(), order.id);
    }
    self.orders.write().insert(order.id, Arc::new(RwLock::new(order)));
  }

  pub fn get(&self, id: Uuid) -> CoreResult<Order> {
    Ok(self.entry(id)?.read().clone())
  }

  pub fn find_by_provider_ref(&self, reference: &str) -> Option<Uuid> {
    self.by_provider_ref.read().get(reference).copied()
  }

  /// Runs `mutate` on a draft copy under the order's exclusive lock. The
  /// draft only replaces the stored order when the closure succeeds, so a
  /// failing update leaves no partial effect behind.
  pub fn update<F>(&self, id: Uuid, mutate: F) -> CoreResult<Order>
  where
    F: FnOnce(&mut Order) -> CoreResult<()>,
  {
    let entry = self.entry(id)?;
    let mut guard = entry.write();
    let mut draft = guard.clone();
    mutate(&mut draft)?;
    *guard = draft.clone();
    Ok(draft)
  }

  pub fn ids(&self) -> Vec<Uuid> {
    self.orders.read().keys().copied().collect()
  }

  /// Newest-first listing, optionally filtered by status.
  pub fn list(&self, status: Option<OrderStatus>) -> Vec<Order> {
    let mut orders: Vec<Order> = self
      .orders
      .read()
      .values()
      .map(|entry| entry.read().clone())
      .filter(|order| status.map_or(true, |s| order.status == s))
      .collect();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    orders
  }

  fn entry(&self, id: Uuid) -> CoreResult<Arc<RwLock<Order>>> {
    self
      .orders
      .read()
      .get(&id)
      .cloned()
      .ok_or_else(|| CoreError::NotFound(format!("order {id}")))
  }
}
