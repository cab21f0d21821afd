pub mod error;
pub mod memory;
pub mod postgres;
pub mod query;
pub mod record;
pub mod store;

pub use common::{OrderId, OrderStatus};
pub use error::{OrderStoreError, Result};
pub use memory::InMemoryOrderStore;
pub use postgres::PostgresOrderStore;
pub use query::{
    DEFAULT_PAGE_SIZE, InvalidSort, MAX_PAGE_SIZE, OrderQuery, Page, PageRequest, Sort,
    SortDirection, SortField,
};
pub use record::{NewOrder, OrderRecord, Version};
pub use store::{OrderStore, OrderStoreExt, UpdateOptions};
