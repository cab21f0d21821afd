//! Types shared by the store, domain and API crates.

pub mod status;
pub mod types;

pub use status::{OrderStatus, ParseStatusError};
pub use types::OrderId;
