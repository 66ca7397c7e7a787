use std::str::FromStr;

use axum::{
    Router,
    extract::{Multipart, Path, State},
    response::Response,
    routing::get,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    dto::products::{
        FIELD_DESCRIPTION, FIELD_IMAGE_FILE, FIELD_IMAGE_URL, FIELD_PRICE, FIELD_PRODUCT_NAME,
        FIELD_STOCK_AVAILABLE, ProductForm, ProductList,
    },
    error::{AppError, AppResult},
    models::{FileUpload, Product},
    response,
    state::AppState,
};

/// Documents the multipart body of product create and update.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ProductUpload {
    pub product_name: String,
    pub description: Option<String>,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub stock_available: i32,
    pub image_url: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image_file: Option<Vec<u8>>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Reads the product form fields; unknown fields are skipped.
pub async fn read_product_form(mut multipart: Multipart) -> AppResult<ProductForm> {
    let mut product_name = None;
    let mut price = None;
    let mut stock = None;
    let mut form = ProductForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FIELD_PRODUCT_NAME => product_name = Some(field.text().await?),
            FIELD_DESCRIPTION => form.description = field.text().await?,
            FIELD_PRICE => price = Some(field.text().await?),
            FIELD_STOCK_AVAILABLE => stock = Some(field.text().await?),
            FIELD_IMAGE_URL => {
                let url = field.text().await?;
                form.image_url = Some(url).filter(|u| !u.trim().is_empty());
            }
            FIELD_IMAGE_FILE => {
                let file_name = field.file_name().unwrap_or("image").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    form.image_file = Some(FileUpload {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    form.product_name = product_name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{FIELD_PRODUCT_NAME} is required")))?;
    let price = price
        .ok_or_else(|| AppError::BadRequest(format!("{FIELD_PRICE} is required")))?;
    form.price = Decimal::from_str(price.trim())
        .map_err(|_| AppError::BadRequest(format!("{FIELD_PRICE} must be a decimal number")))?;
    let stock = stock
        .ok_or_else(|| AppError::BadRequest(format!("{FIELD_STOCK_AVAILABLE} is required")))?;
    form.stock_available = stock
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("{FIELD_STOCK_AVAILABLE} must be an integer")))?;

    Ok(form)
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "List products", body = ProductList)
    ),
    tag = "products"
)]
pub async fn list_products(State(state): State<AppState>) -> AppResult<Response> {
    let items = state.api.list_products().await?.unwrap_or_default();
    Ok(response::ok(&ProductList { items }))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = Product),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    Ok(match state.api.get_product(&id).await? {
        Some(product) => response::ok(&product),
        None => response::not_found(format!("Product {id} not found")),
    })
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body(content = ProductUpload, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Create product", body = Product),
        (status = 400, description = "Invalid product form"),
    ),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Response> {
    let (product, image) = read_product_form(multipart).await?.into_parts(String::new());
    Ok(match state.api.create_product(product, image).await? {
        Some(created) => {
            tracing::info!(product_id = %created.id, "product created");
            response::created(&created)
        }
        None => response::bad_request("Could not create product"),
    })
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body(content = ProductUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Response> {
    let (product, image) = read_product_form(multipart).await?.into_parts(id.clone());
    Ok(match state.api.update_product(&id, product, image).await? {
        Some(updated) => response::ok(&updated),
        None => response::not_found(format!("Product {id} not found")),
    })
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Deleted product"),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    if !state.api.delete_product(&id).await? {
        return Ok(response::not_found(format!("Product {id} not found")));
    }
    Ok(response::no_content())
}
