//! Order commands.

use common::{OrderId, OrderStatus};
use order_store::{OrderQuery, PageRequest, Sort};

use super::TotalAmount;

/// Command to create a new order.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    /// Validated order total.
    pub total_amount: TotalAmount,
}

impl CreateOrder {
    /// Creates a new CreateOrder command.
    pub fn new(total_amount: TotalAmount) -> Self {
        Self { total_amount }
    }
}

/// Command to cancel an order.
#[derive(Debug, Clone)]
pub struct CancelOrder {
    /// The order to cancel.
    pub order_id: OrderId,
}

impl CancelOrder {
    /// Creates a new CancelOrder command.
    pub fn new(order_id: OrderId) -> Self {
        Self { order_id }
    }
}

/// Query for a page of orders, optionally filtered by status.
///
/// Defaults to page 0, 20 per page, sorted by id ascending.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOrders {
    pub status: Option<OrderStatus>,
    pub page: PageRequest,
    pub sort: Sort,
}

impl ListOrders {
    /// Lists all orders with default paging.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only lists orders in the given status.
    pub fn with_status(mut self, status: Option<OrderStatus>) -> Self {
        self.status = status;
        self
    }

    /// Sets the page.
    pub fn page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }

    /// Sets the sort.
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub(crate) fn to_query(self) -> OrderQuery {
        let query = OrderQuery::new().page(self.page).sort(self.sort);
        match self.status {
            Some(status) => query.status(status),
            None => query,
        }
    }
}
