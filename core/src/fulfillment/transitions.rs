// core/src/fulfillment/transitions.rs

use crate::model::order::OrderStatus;

/// The legal status moves:
///
/// | From           | To         | Trigger                                    |
/// |----------------|------------|--------------------------------------------|
/// | Pending        | Processing | operator, or payment callback confirms     |
/// | Processing     | Active     | operator attaches credentials              |
/// | Active         | Delivered  | operator confirms customer receipt         |
/// | any non-terminal | Cancelled | operator override, or payment failure     |
/// | any non-terminal | Expired   | scheduled sweep past the access window    |
///
/// Re-cancelling an already-cancelled order is handled by the caller as an
/// idempotent no-op, not as a transition.
pub fn transition_allowed(from: OrderStatus, to: OrderStatus) -> bool {
  use OrderStatus::*;
  match (from, to) {
    (Pending, Processing) => true,
    (Processing, Active) => true,
    (Active, Delivered) => true,
    (from, Cancelled) | (from, Expired) => !from.is_terminal(),
    _ => false,
  }
}
