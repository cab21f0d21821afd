//! Wire representations of orders and their mapping to domain types.
//!
//! Everything here is pure: requests are turned into commands, domain
//! values into response bodies.

use chrono::{DateTime, Utc};
use common::{OrderId, OrderStatus};
use domain::{ListOrders, Order, TotalAmount};
use order_store::{Page, PageRequest, Sort};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Body of `POST /orders`.
///
/// Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub total_amount: Option<Decimal>,
}

impl CreateOrderRequest {
    /// Validates the requested total.
    pub fn total_amount(&self) -> Result<TotalAmount, ApiError> {
        let amount = self
            .total_amount
            .ok_or_else(|| ApiError::BadRequest("totalAmount is required".to_string()))?;
        Ok(TotalAmount::new(amount)?)
    }
}

/// Order as returned by every endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: OrderId,
    pub status: OrderStatus,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id(),
            status: order.status(),
            total_amount: order.total_amount(),
            created_at: order.created_at(),
            updated_at: order.updated_at(),
        }
    }
}

/// One page of results with its position in the full listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub number: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl From<Page<Order>> for PageResponse<OrderResponse> {
    fn from(page: Page<Order>) -> Self {
        let total_pages = page.total_pages();
        let first = page.is_first();
        let last = page.is_last();
        let content: Vec<OrderResponse> = page.content.iter().map(OrderResponse::from).collect();

        Self {
            number_of_elements: content.len(),
            empty: content.is_empty(),
            content,
            number: page.number,
            size: page.size,
            total_elements: page.total_elements,
            total_pages,
            first,
            last,
        }
    }
}

/// Query string of `GET /orders`.
#[derive(Debug, Default, Deserialize)]
pub struct ListOrdersParams {
    pub status: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
}

impl ListOrdersParams {
    /// Builds the listing command, rejecting unknown statuses and sorts.
    pub fn into_command(self) -> Result<ListOrders, ApiError> {
        let status = match non_empty(self.status) {
            Some(s) => Some(
                s.parse::<OrderStatus>()
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?,
            ),
            None => None,
        };

        let sort = match non_empty(self.sort) {
            Some(s) => Sort::parse(&s).map_err(|e| ApiError::BadRequest(e.to_string()))?,
            None => Sort::default(),
        };

        let defaults = PageRequest::default();
        let page = PageRequest::new(
            self.page.unwrap_or(defaults.page() as i64),
            self.size.unwrap_or(defaults.size() as i64),
        );

        Ok(ListOrders::new().with_status(status).page(page).sort(sort))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use order_store::{SortDirection, SortField};

    #[test]
    fn test_create_request_reads_camel_case_amount() {
        let req: CreateOrderRequest =
            serde_json::from_str(r#"{"totalAmount": 100.00, "status": "CANCELLED"}"#).unwrap();
        assert_eq!(req.total_amount().unwrap().to_string(), "100.00");
    }

    #[test]
    fn test_create_request_rounds_to_cents() {
        let req: CreateOrderRequest = serde_json::from_str(r#"{"totalAmount": 49.999}"#).unwrap();
        assert_eq!(req.total_amount().unwrap().to_string(), "50.00");
    }

    #[test]
    fn test_create_request_rejects_missing_zero_and_negative() {
        let missing: CreateOrderRequest = serde_json::from_str("{}").unwrap();
        assert!(missing.total_amount().is_err());

        let null: CreateOrderRequest = serde_json::from_str(r#"{"totalAmount": null}"#).unwrap();
        assert!(null.total_amount().is_err());

        for body in [r#"{"totalAmount": 0}"#, r#"{"totalAmount": -5.00}"#] {
            let req: CreateOrderRequest = serde_json::from_str(body).unwrap();
            assert!(req.total_amount().is_err(), "{body}");
        }
    }

    #[test]
    fn test_create_request_rejects_non_numeric() {
        let result = serde_json::from_str::<CreateOrderRequest>(r#"{"totalAmount": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_order_response_keeps_amount_scale() {
        let response = OrderResponse {
            id: OrderId::new(1),
            status: OrderStatus::Created,
            total_amount: Decimal::new(10000, 2),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""totalAmount":100.00"#), "{json}");
        assert!(json.contains(r#""status":"CREATED""#), "{json}");
        assert!(json.contains(r#""createdAt""#), "{json}");
    }

    #[test]
    fn test_list_params_defaults() {
        let cmd = ListOrdersParams::default().into_command().unwrap();
        assert_eq!(cmd.status, None);
        assert_eq!(cmd.page.page(), 0);
        assert_eq!(cmd.page.size(), 20);
        assert_eq!(cmd.sort, Sort::default());
    }

    #[test]
    fn test_list_params_parse_all_fields() {
        let params = ListOrdersParams {
            status: Some("CANCELLED".to_string()),
            page: Some(2),
            size: Some(5),
            sort: Some("createdAt,desc".to_string()),
        };

        let cmd = params.into_command().unwrap();
        assert_eq!(cmd.status, Some(OrderStatus::Cancelled));
        assert_eq!(cmd.page.page(), 2);
        assert_eq!(cmd.page.size(), 5);
        assert_eq!(
            cmd.sort,
            Sort::new(SortField::CreatedAt, SortDirection::Desc)
        );
    }

    #[test]
    fn test_list_params_reject_unknown_values() {
        let bad_status = ListOrdersParams {
            status: Some("BOGUS".to_string()),
            ..Default::default()
        };
        assert!(bad_status.into_command().is_err());

        let bad_sort = ListOrdersParams {
            sort: Some("customer,asc".to_string()),
            ..Default::default()
        };
        assert!(bad_sort.into_command().is_err());
    }
}
