//! Order entity and related types.

mod aggregate;
mod commands;
mod service;
mod value_objects;

pub use aggregate::{CancelOutcome, Order};
pub use commands::*;
pub use service::{MAX_CANCEL_ATTEMPTS, OrderService};
pub use value_objects::TotalAmount;

use common::OrderStatus;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Total amount is zero or negative after rounding to cents.
    #[error("Invalid total amount: {amount} (must be greater than 0)")]
    InvalidTotalAmount { amount: Decimal },

    /// Total amount does not fit the stored precision.
    #[error("Total amount out of range: {amount}")]
    TotalAmountOutOfRange { amount: Decimal },

    /// Order is not in a state that allows the action.
    #[error("Invalid state transition: cannot {action} from {current_status} status")]
    InvalidStateTransition {
        current_status: OrderStatus,
        action: &'static str,
    },
}
