use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    response::Response,
    routing::get,
};

use crate::{
    dto::customers::{CustomerList, CustomerPayload},
    error::AppResult,
    models::Customer,
    response::{self, read_json},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

#[utoipa::path(
    get,
    path = "/api/customers",
    responses(
        (status = 200, description = "List customers", body = CustomerList)
    ),
    tag = "customers"
)]
pub async fn list_customers(State(state): State<AppState>) -> AppResult<Response> {
    let items = state.api.list_customers().await?.unwrap_or_default();
    Ok(response::ok(&CustomerList { items }))
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    params(
        ("id" = String, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Get customer", body = Customer),
        (status = 404, description = "Customer not found"),
    ),
    tag = "customers"
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    Ok(match state.api.get_customer(&id).await? {
        Some(customer) => response::ok(&customer),
        None => response::not_found(format!("Customer {id} not found")),
    })
}

#[utoipa::path(
    post,
    path = "/api/customers",
    request_body = CustomerPayload,
    responses(
        (status = 201, description = "Create customer", body = Customer),
        (status = 400, description = "Invalid customer"),
    ),
    tag = "customers"
)]
pub async fn create_customer(State(state): State<AppState>, body: Bytes) -> AppResult<Response> {
    let payload: CustomerPayload = read_json(&body)?;
    let customer = payload.into_customer(String::new());
    Ok(match state.api.create_customer(customer).await? {
        Some(created) => {
            tracing::info!(customer_id = %created.id, "customer created");
            response::created(&created)
        }
        None => response::bad_request("Could not create customer"),
    })
}

#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    params(
        ("id" = String, Path, description = "Customer ID")
    ),
    request_body = CustomerPayload,
    responses(
        (status = 200, description = "Updated customer", body = Customer),
        (status = 404, description = "Customer not found"),
    ),
    tag = "customers"
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> AppResult<Response> {
    let payload: CustomerPayload = read_json(&body)?;
    let customer = payload.into_customer(id.clone());
    Ok(match state.api.update_customer(&id, customer).await? {
        Some(updated) => response::ok(&updated),
        None => response::not_found(format!("Customer {id} not found")),
    })
}

#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    params(
        ("id" = String, Path, description = "Customer ID")
    ),
    responses(
        (status = 204, description = "Deleted customer"),
        (status = 404, description = "Customer not found"),
    ),
    tag = "customers"
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    if !state.api.delete_customer(&id).await? {
        return Ok(response::not_found(format!("Customer {id} not found")));
    }
    Ok(response::no_content())
}
