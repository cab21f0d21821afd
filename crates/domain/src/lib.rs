//! Domain layer for the order service.
//!
//! This crate provides:
//! - The Order entity and its cancel transition
//! - The TotalAmount value object (positive, two decimal places)
//! - Command structs and the OrderService that runs them against a store

pub mod error;
pub mod order;

pub use error::DomainError;
pub use order::{
    CancelOrder, CancelOutcome, CreateOrder, ListOrders, MAX_CANCEL_ATTEMPTS, Order, OrderError,
    OrderService, TotalAmount,
};
