//! Order endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use common::OrderId;
use domain::{CancelOrder, CreateOrder, OrderService};
use order_store::OrderStore;

use crate::dto::{CreateOrderRequest, ListOrdersParams, OrderResponse, PageResponse};
use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: OrderStore> {
    pub order_service: OrderService<S>,
}

/// POST /orders — create a new order.
#[tracing::instrument(skip(state, payload))]
pub async fn create<S: OrderStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<OrderResponse>), ApiError> {
    let Json(req) = payload?;
    let cmd = CreateOrder::new(req.total_amount()?);

    let order = state.order_service.create_order(cmd).await?;
    let location = format!("/orders/{}", order.id());

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(OrderResponse::from(&order)),
    ))
}

/// GET /orders/{id} — load an order by ID.
#[tracing::instrument(skip(state))]
pub async fn get<S: OrderStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    id: Result<Path<OrderId>, PathRejection>,
) -> Result<Json<OrderResponse>, ApiError> {
    let Path(id) = id?;
    let order = state.order_service.get_order(id).await?;
    Ok(Json(OrderResponse::from(&order)))
}

/// PUT /orders/{id}/cancel — cancel an order; repeating the call is a no-op.
#[tracing::instrument(skip(state))]
pub async fn cancel<S: OrderStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    id: Result<Path<OrderId>, PathRejection>,
) -> Result<Json<OrderResponse>, ApiError> {
    let Path(id) = id?;
    let order = state.order_service.cancel_order(CancelOrder::new(id)).await?;
    Ok(Json(OrderResponse::from(&order)))
}

/// GET /orders — list orders, optionally filtered by status.
#[tracing::instrument(skip(state))]
pub async fn list<S: OrderStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    params: Result<Query<ListOrdersParams>, QueryRejection>,
) -> Result<Json<PageResponse<OrderResponse>>, ApiError> {
    let Query(params) = params?;
    let page = state.order_service.list_orders(params.into_command()?).await?;
    Ok(Json(PageResponse::from(page)))
}
