//! Order status transition rules
//!
//! `pending → confirmed → processing → shipped → delivered`, with
//! `cancelled` and `returned` as side exits. Admin updates validate against
//! this table; the `force` flag preserves the legacy unconstrained update as
//! an explicit, separate path.

use crate::db::models::OrderStatus;
use thiserror::Error;

/// Transition rejection reasons
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot transition from {from} to {to}")]
    NotAllowed { from: &'static str, to: &'static str },

    #[error("order in status {0} can no longer be cancelled by the customer")]
    NotCancellable(&'static str),
}

/// The allowed-from → allowed-to table
pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;
    matches!(
        (from, to),
        (Pending, Confirmed)
            | (Pending, Cancelled)
            | (Confirmed, Processing)
            | (Confirmed, Cancelled)
            | (Processing, Shipped)
            | (Shipped, Delivered)
            | (Delivered, Returned)
    )
}

/// Validate an admin status change. `force` bypasses the table entirely.
pub fn check_admin_transition(
    from: OrderStatus,
    to: OrderStatus,
    force: bool,
) -> Result<(), TransitionError> {
    if force || can_transition(from, to) {
        Ok(())
    } else {
        Err(TransitionError::NotAllowed {
            from: from.as_str(),
            to: to.as_str(),
        })
    }
}

/// Customers may only cancel orders that have not started fulfilment
pub fn check_customer_cancel(status: OrderStatus) -> Result<(), TransitionError> {
    match status {
        OrderStatus::Pending | OrderStatus::Confirmed => Ok(()),
        other => Err(TransitionError::NotCancellable(other.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn test_happy_path_chain() {
        assert!(can_transition(Pending, Confirmed));
        assert!(can_transition(Confirmed, Processing));
        assert!(can_transition(Processing, Shipped));
        assert!(can_transition(Shipped, Delivered));
        assert!(can_transition(Delivered, Returned));
    }

    #[test]
    fn test_no_skipping_or_reversing() {
        assert!(!can_transition(Pending, Shipped));
        assert!(!can_transition(Shipped, Pending));
        assert!(!can_transition(Delivered, Cancelled));
        assert!(!can_transition(Cancelled, Confirmed));
    }

    #[test]
    fn test_admin_force_bypasses_table() {
        assert!(check_admin_transition(Pending, Delivered, false).is_err());
        assert!(check_admin_transition(Pending, Delivered, true).is_ok());
    }

    #[test]
    fn test_customer_cancel_window() {
        assert!(check_customer_cancel(Pending).is_ok());
        assert!(check_customer_cancel(Confirmed).is_ok());
        assert_eq!(
            check_customer_cancel(Shipped),
            Err(TransitionError::NotCancellable("shipped"))
        );
        assert!(check_customer_cancel(Delivered).is_err());
        assert!(check_customer_cancel(Cancelled).is_err());
    }
}
