//! Order domain logic
//!
//! Pure rules that do not touch the database:
//! - [`lifecycle`] - status transition table and cancellation gates
//! - [`number`] - order number formatting and parsing

pub mod lifecycle;
pub mod number;

pub use lifecycle::{TransitionError, can_transition, check_admin_transition, check_customer_cancel};
pub use number::{day_key, format_order_number, parse_sequence};
