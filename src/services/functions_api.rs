use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Customer, FileUpload, Order, Product},
};

/// Data access over customers, products, orders and proof-of-payment uploads.
///
/// Two adapters exist: [`InMemoryFunctionsApi`](super::memory_store::InMemoryFunctionsApi)
/// for local runs and [`FunctionsApiClient`](super::functions_client::FunctionsApiClient)
/// which proxies every call to a remote function service.
///
/// Absent entities are reported as `Ok(None)`, never as an error. Create and
/// update return `Ok(None)` when a precondition the adapter cannot express as
/// an error fails (an unknown id on update, or a non-success response from
/// the remote service).
#[async_trait]
pub trait FunctionsApi: Send + Sync {
    // Customers
    async fn list_customers(&self) -> AppResult<Option<Vec<Customer>>>;
    async fn get_customer(&self, id: &str) -> AppResult<Option<Customer>>;
    async fn create_customer(&self, customer: Customer) -> AppResult<Option<Customer>>;
    async fn update_customer(&self, id: &str, customer: Customer) -> AppResult<Option<Customer>>;
    /// Returns whether the delete was acknowledged.
    async fn delete_customer(&self, id: &str) -> AppResult<bool>;

    // Products
    async fn list_products(&self) -> AppResult<Option<Vec<Product>>>;
    async fn get_product(&self, id: &str) -> AppResult<Option<Product>>;
    async fn create_product(
        &self,
        product: Product,
        image: Option<FileUpload>,
    ) -> AppResult<Option<Product>>;
    async fn update_product(
        &self,
        id: &str,
        product: Product,
        image: Option<FileUpload>,
    ) -> AppResult<Option<Product>>;
    async fn delete_product(&self, id: &str) -> AppResult<bool>;

    // Orders
    async fn list_orders(&self) -> AppResult<Option<Vec<Order>>>;
    async fn get_order(&self, id: &str) -> AppResult<Option<Order>>;
    async fn create_order(
        &self,
        customer_id: &str,
        product_id: &str,
        quantity: i32,
    ) -> AppResult<Option<Order>>;
    async fn update_order_status(&self, id: &str, status: &str) -> AppResult<Option<Order>>;
    async fn delete_order(&self, id: &str) -> AppResult<bool>;

    // Uploads
    /// Stores a proof of payment and returns the name it was stored under.
    async fn upload_proof_of_payment(
        &self,
        file: FileUpload,
        order_id: Option<&str>,
        customer_name: Option<&str>,
    ) -> AppResult<Option<String>>;
}
