use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    response::Response,
    routing::{get, patch},
};

use crate::{
    dto::orders::{CreateOrderRequest, OrderDto, OrderList, UpdateOrderStatusRequest},
    error::AppResult,
    response::{self, read_json},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/{id}", get(get_order).delete(delete_order))
        .route("/{id}/status", patch(update_order_status))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "List orders, newest first", body = OrderList)
    ),
    tag = "orders"
)]
pub async fn list_orders(State(state): State<AppState>) -> AppResult<Response> {
    let mut orders = state.api.list_orders().await?.unwrap_or_default();
    orders.sort_by(|a, b| b.order_date_utc.cmp(&a.order_date_utc));
    let items = orders.iter().map(OrderDto::from).collect();
    Ok(response::ok(&OrderList { items }))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Get order", body = OrderDto),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    Ok(match state.api.get_order(&id).await? {
        Some(order) => response::ok(&OrderDto::from(&order)),
        None => response::not_found(format!("Order {id} not found")),
    })
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = OrderDto),
        (status = 400, description = "Invalid customer, product or quantity"),
    ),
    tag = "orders"
)]
pub async fn create_order(State(state): State<AppState>, body: Bytes) -> AppResult<Response> {
    let payload: CreateOrderRequest = read_json(&body)?;
    let order = state
        .api
        .create_order(&payload.customer_id, &payload.product_id, payload.quantity)
        .await?;
    Ok(match order {
        Some(order) => {
            tracing::info!(
                order_id = %order.id,
                customer_id = %order.customer_id,
                total = %order.total_price,
                "order placed"
            );
            response::created(&OrderDto::from(&order))
        }
        None => response::bad_request("Could not create order"),
    })
}

#[utoipa::path(
    patch,
    path = "/api/orders/{id}/status",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Updated order", body = OrderDto),
        (status = 400, description = "Unknown order status"),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> AppResult<Response> {
    let payload: UpdateOrderStatusRequest = read_json(&body)?;
    Ok(match state.api.update_order_status(&id, &payload.status).await? {
        Some(order) => {
            tracing::info!(order_id = %order.id, status = %order.status, "order status updated");
            response::ok(&OrderDto::from(&order))
        }
        None => response::not_found(format!("Order {id} not found")),
    })
}

#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    responses(
        (status = 204, description = "Deleted order"),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    if !state.api.delete_order(&id).await? {
        return Ok(response::not_found(format!("Order {id} not found")));
    }
    Ok(response::no_content())
}
