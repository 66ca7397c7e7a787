use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::{
    Client, Method, RequestBuilder, Response, Url,
    multipart::{Form, Part},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    dto::{
        customers::CustomerPayload,
        orders::{CreateOrderRequest, OrderDto, UpdateOrderStatusRequest},
        products::{
            FIELD_DESCRIPTION, FIELD_IMAGE_FILE, FIELD_IMAGE_URL, FIELD_PRICE,
            FIELD_PRODUCT_NAME, FIELD_STOCK_AVAILABLE, ProductForm,
        },
        uploads::{FIELD_CUSTOMER_NAME, FIELD_ORDER_ID, FIELD_PROOF_OF_PAYMENT, UploadResponse},
    },
    error::{AppError, AppResult},
    models::{Customer, FileUpload, Order, Product},
    services::functions_api::FunctionsApi,
};

const CUSTOMERS_ROUTE: &str = "customers";
const PRODUCTS_ROUTE: &str = "products";
const ORDERS_ROUTE: &str = "orders";
const STATUS_SEGMENT: &str = "status";
const UPLOADS_ROUTE: [&str; 2] = ["uploads", "proof-of-payment"];

const OCTET_STREAM: &str = "application/octet-stream";

/// Proxy adapter that forwards every call to the remote function service.
///
/// A non-success status is reported as an empty result; only transport
/// failures surface as [`AppError::Upstream`].
#[derive(Debug, Clone)]
pub struct FunctionsApiClient {
    http: Client,
    base_url: Url,
}

impl FunctionsApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Self::with_client(http, base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> AppResult<Self> {
        let base_url = Url::parse(base_url).map_err(|err| {
            AppError::Internal(anyhow!("invalid functions base url `{base_url}`: {err}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Internal(anyhow!(
                "functions base url `{base_url}` cannot carry a path"
            )));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends each segment to the base path, percent-encoding it so ids
    /// containing `/`, `?` or `#` stay a single segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.http.request(method, self.url(segments))
    }

    async fn send(&self, builder: RequestBuilder) -> AppResult<Response> {
        let request = builder.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        let resp = self.http.execute(request).await?;
        tracing::debug!(%method, path, status = %resp.status(), "functions call");
        Ok(resp)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> AppResult<Option<T>> {
        let resp = self.send(self.request(Method::GET, segments)).await?;
        try_read_json(resp).await
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> AppResult<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.send(self.request(method, segments).json(body)).await?;
        try_read_json(resp).await
    }

    async fn send_form<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        form: Form,
    ) -> AppResult<Option<T>> {
        let resp = self
            .send(self.request(method, segments).multipart(form))
            .await?;
        try_read_json(resp).await
    }

    async fn delete(&self, segments: &[&str]) -> AppResult<bool> {
        let resp = self.send(self.request(Method::DELETE, segments)).await?;
        Ok(resp.status().is_success())
    }
}

fn to_order(dto: OrderDto) -> AppResult<Order> {
    Order::try_from(dto)
}

async fn try_read_json<T: DeserializeOwned>(resp: Response) -> AppResult<Option<T>> {
    if !resp.status().is_success() {
        return Ok(None);
    }
    Ok(Some(resp.json::<T>().await?))
}

fn file_part(file: FileUpload) -> AppResult<Part> {
    let content_type = file
        .content_type
        .unwrap_or_else(|| OCTET_STREAM.to_string());
    let part = Part::bytes(file.bytes)
        .file_name(file.file_name)
        .mime_str(&content_type)?;
    Ok(part)
}

fn product_form(form: ProductForm) -> AppResult<Form> {
    let mut multipart = Form::new()
        .text(FIELD_PRODUCT_NAME, form.product_name)
        .text(FIELD_DESCRIPTION, form.description)
        .text(FIELD_PRICE, form.price.to_string())
        .text(FIELD_STOCK_AVAILABLE, form.stock_available.to_string());
    if let Some(url) = form.image_url {
        multipart = multipart.text(FIELD_IMAGE_URL, url);
    }
    if let Some(file) = form.image_file {
        multipart = multipart.part(FIELD_IMAGE_FILE, file_part(file)?);
    }
    Ok(multipart)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

#[async_trait]
impl FunctionsApi for FunctionsApiClient {
    async fn list_customers(&self) -> AppResult<Option<Vec<Customer>>> {
        self.get_json(&[CUSTOMERS_ROUTE]).await
    }

    async fn get_customer(&self, id: &str) -> AppResult<Option<Customer>> {
        self.get_json(&[CUSTOMERS_ROUTE, id]).await
    }

    async fn create_customer(&self, customer: Customer) -> AppResult<Option<Customer>> {
        let body = CustomerPayload::from(&customer);
        self.send_json(Method::POST, &[CUSTOMERS_ROUTE], &body).await
    }

    async fn update_customer(&self, id: &str, customer: Customer) -> AppResult<Option<Customer>> {
        let body = CustomerPayload::from(&customer);
        self.send_json(Method::PUT, &[CUSTOMERS_ROUTE, id], &body)
            .await
    }

    async fn delete_customer(&self, id: &str) -> AppResult<bool> {
        self.delete(&[CUSTOMERS_ROUTE, id]).await
    }

    async fn list_products(&self) -> AppResult<Option<Vec<Product>>> {
        self.get_json(&[PRODUCTS_ROUTE]).await
    }

    async fn get_product(&self, id: &str) -> AppResult<Option<Product>> {
        self.get_json(&[PRODUCTS_ROUTE, id]).await
    }

    async fn create_product(
        &self,
        product: Product,
        image: Option<FileUpload>,
    ) -> AppResult<Option<Product>> {
        let form = product_form(ProductForm::from_product(&product, image))?;
        self.send_form(Method::POST, &[PRODUCTS_ROUTE], form).await
    }

    async fn update_product(
        &self,
        id: &str,
        product: Product,
        image: Option<FileUpload>,
    ) -> AppResult<Option<Product>> {
        let form = product_form(ProductForm::from_product(&product, image))?;
        self.send_form(Method::PUT, &[PRODUCTS_ROUTE, id], form)
            .await
    }

    async fn delete_product(&self, id: &str) -> AppResult<bool> {
        self.delete(&[PRODUCTS_ROUTE, id]).await
    }

    async fn list_orders(&self) -> AppResult<Option<Vec<Order>>> {
        let dtos: Option<Vec<OrderDto>> = self.get_json(&[ORDERS_ROUTE]).await?;
        dtos.map(|items| items.into_iter().map(to_order).collect())
            .transpose()
    }

    async fn get_order(&self, id: &str) -> AppResult<Option<Order>> {
        let dto: Option<OrderDto> = self.get_json(&[ORDERS_ROUTE, id]).await?;
        dto.map(to_order).transpose()
    }

    async fn create_order(
        &self,
        customer_id: &str,
        product_id: &str,
        quantity: i32,
    ) -> AppResult<Option<Order>> {
        let body = CreateOrderRequest {
            customer_id: customer_id.to_string(),
            product_id: product_id.to_string(),
            quantity,
        };
        let dto: Option<OrderDto> = self.send_json(Method::POST, &[ORDERS_ROUTE], &body).await?;
        dto.map(to_order).transpose()
    }

    async fn update_order_status(&self, id: &str, status: &str) -> AppResult<Option<Order>> {
        let body = UpdateOrderStatusRequest {
            status: status.to_string(),
        };
        let dto: Option<OrderDto> = self
            .send_json(Method::PATCH, &[ORDERS_ROUTE, id, STATUS_SEGMENT], &body)
            .await?;
        dto.map(to_order).transpose()
    }

    async fn delete_order(&self, id: &str) -> AppResult<bool> {
        self.delete(&[ORDERS_ROUTE, id]).await
    }

    async fn upload_proof_of_payment(
        &self,
        file: FileUpload,
        order_id: Option<&str>,
        customer_name: Option<&str>,
    ) -> AppResult<Option<String>> {
        let submitted_name = file.file_name.clone();
        let mut form = Form::new().part(FIELD_PROOF_OF_PAYMENT, file_part(file)?);
        if let Some(order_id) = non_blank(order_id) {
            form = form.text(FIELD_ORDER_ID, order_id);
        }
        if let Some(customer_name) = non_blank(customer_name) {
            form = form.text(FIELD_CUSTOMER_NAME, customer_name);
        }

        let resp: Option<UploadResponse> =
            self.send_form(Method::POST, &UPLOADS_ROUTE, form).await?;
        Ok(resp.map(|body| body.file_name.unwrap_or(submitted_name)))
    }
}
