use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Customer, FileUpload, Order, OrderStatus, Product},
    services::functions_api::FunctionsApi,
};

#[derive(Debug, Default)]
struct Collections {
    customers: Vec<Customer>,
    products: Vec<Product>,
    orders: Vec<Order>,
}

/// Process-local adapter. All three collections sit behind one lock so an
/// order is validated and stock is reserved atomically.
#[derive(Debug, Default)]
pub struct InMemoryFunctionsApi {
    inner: RwLock<Collections>,
}

impl InMemoryFunctionsApi {
    pub fn new() -> Self {
        Self::default()
    }
}

fn assign_id(id: &str) -> String {
    if id.trim().is_empty() {
        Uuid::new_v4().to_string()
    } else {
        id.to_string()
    }
}

fn validate_product(product: &Product) -> AppResult<()> {
    if product.product_name.trim().is_empty() {
        return Err(AppError::BadRequest("Product name is required".into()));
    }
    if product.price.is_sign_negative() {
        return Err(AppError::BadRequest("Price must not be negative".into()));
    }
    if product.stock_available < 0 {
        return Err(AppError::BadRequest("Stock must not be negative".into()));
    }
    Ok(())
}

#[async_trait]
impl FunctionsApi for InMemoryFunctionsApi {
    async fn list_customers(&self) -> AppResult<Option<Vec<Customer>>> {
        Ok(Some(self.inner.read().await.customers.clone()))
    }

    async fn get_customer(&self, id: &str) -> AppResult<Option<Customer>> {
        let store = self.inner.read().await;
        Ok(store.customers.iter().find(|c| c.id == id).cloned())
    }

    async fn create_customer(&self, mut customer: Customer) -> AppResult<Option<Customer>> {
        let mut store = self.inner.write().await;
        customer.id = assign_id(&customer.id);
        if store.customers.iter().any(|c| c.id == customer.id) {
            return Err(AppError::BadRequest(format!(
                "Customer {} already exists",
                customer.id
            )));
        }
        store.customers.push(customer.clone());
        tracing::debug!(customer_id = %customer.id, "customer created");
        Ok(Some(customer))
    }

    async fn update_customer(&self, id: &str, customer: Customer) -> AppResult<Option<Customer>> {
        let mut store = self.inner.write().await;
        let Some(existing) = store.customers.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        existing.name = customer.name;
        existing.surname = customer.surname;
        existing.username = customer.username;
        existing.email = customer.email;
        existing.shipping_address = customer.shipping_address;
        Ok(Some(existing.clone()))
    }

    async fn delete_customer(&self, id: &str) -> AppResult<bool> {
        let mut store = self.inner.write().await;
        let before = store.customers.len();
        store.customers.retain(|c| c.id != id);
        Ok(store.customers.len() != before)
    }

    async fn list_products(&self) -> AppResult<Option<Vec<Product>>> {
        Ok(Some(self.inner.read().await.products.clone()))
    }

    async fn get_product(&self, id: &str) -> AppResult<Option<Product>> {
        let store = self.inner.read().await;
        Ok(store.products.iter().find(|p| p.id == id).cloned())
    }

    async fn create_product(
        &self,
        mut product: Product,
        image: Option<FileUpload>,
    ) -> AppResult<Option<Product>> {
        validate_product(&product)?;
        let mut store = self.inner.write().await;
        product.id = assign_id(&product.id);
        if store.products.iter().any(|p| p.id == product.id) {
            return Err(AppError::BadRequest(format!(
                "Product {} already exists",
                product.id
            )));
        }
        if let Some(image) = image {
            product.image_url = Some(image.file_name);
        }
        store.products.push(product.clone());
        tracing::debug!(product_id = %product.id, "product created");
        Ok(Some(product))
    }

    async fn update_product(
        &self,
        id: &str,
        product: Product,
        image: Option<FileUpload>,
    ) -> AppResult<Option<Product>> {
        validate_product(&product)?;
        let mut store = self.inner.write().await;
        let Some(existing) = store.products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        existing.product_name = product.product_name;
        existing.description = product.description;
        existing.price = product.price;
        existing.stock_available = product.stock_available;
        if let Some(image) = image {
            existing.image_url = Some(image.file_name);
        } else if product.image_url.is_some() {
            existing.image_url = product.image_url;
        }
        Ok(Some(existing.clone()))
    }

    async fn delete_product(&self, id: &str) -> AppResult<bool> {
        let mut store = self.inner.write().await;
        let before = store.products.len();
        store.products.retain(|p| p.id != id);
        Ok(store.products.len() != before)
    }

    async fn list_orders(&self) -> AppResult<Option<Vec<Order>>> {
        Ok(Some(self.inner.read().await.orders.clone()))
    }

    async fn get_order(&self, id: &str) -> AppResult<Option<Order>> {
        let store = self.inner.read().await;
        Ok(store.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn create_order(
        &self,
        customer_id: &str,
        product_id: &str,
        quantity: i32,
    ) -> AppResult<Option<Order>> {
        if quantity <= 0 {
            return Err(AppError::BadRequest("Quantity must be at least 1".into()));
        }

        let mut store = self.inner.write().await;
        let Collections {
            customers,
            products,
            orders,
        } = &mut *store;

        let customer_exists = customers.iter().any(|c| c.id == customer_id);
        let product = products.iter_mut().find(|p| p.id == product_id);
        let product = match (customer_exists, product) {
            (true, Some(p)) => p,
            _ => return Err(AppError::BadRequest("Invalid customer or product".into())),
        };

        if product.stock_available < quantity {
            return Err(AppError::BadRequest(format!(
                "Only {} in stock",
                product.stock_available
            )));
        }

        // Nothing is mutated until the order is fully priced.
        let order = Order::place(
            Uuid::new_v4().to_string(),
            customer_id.to_string(),
            product,
            quantity,
        )?;
        product.stock_available -= quantity;
        orders.push(order.clone());
        tracing::debug!(order_id = %order.id, total = %order.total_price, "order created");
        Ok(Some(order))
    }

    async fn update_order_status(&self, id: &str, status: &str) -> AppResult<Option<Order>> {
        let status = status.parse::<OrderStatus>().map_err(|err| {
            tracing::warn!(order_id = %id, error = %err, "rejected order status update");
            AppError::BadRequest(err.to_string())
        })?;
        let mut store = self.inner.write().await;
        let Some(order) = store.orders.iter_mut().find(|o| o.id == id) else {
            return Ok(None);
        };
        order.status = status;
        Ok(Some(order.clone()))
    }

    async fn delete_order(&self, id: &str) -> AppResult<bool> {
        let mut store = self.inner.write().await;
        let before = store.orders.len();
        store.orders.retain(|o| o.id != id);
        Ok(store.orders.len() != before)
    }

    async fn upload_proof_of_payment(
        &self,
        file: FileUpload,
        order_id: Option<&str>,
        customer_name: Option<&str>,
    ) -> AppResult<Option<String>> {
        tracing::debug!(
            file_name = %file.file_name,
            order_id = order_id.unwrap_or("-"),
            customer_name = customer_name.unwrap_or("-"),
            "proof of payment accepted"
        );
        Ok(Some(file.file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn customer(id: &str) -> Customer {
        Customer {
            id: id.into(),
            name: "Ada".into(),
            surname: "Lovelace".into(),
            username: "ada".into(),
            email: "ada@example.com".into(),
            shipping_address: "12 Analytical Way".into(),
        }
    }

    fn product(id: &str, price: Decimal, stock: i32) -> Product {
        Product {
            id: id.into(),
            product_name: "Ferris Mug".into(),
            description: "Coffee tastes better with Ferris".into(),
            price,
            stock_available: stock,
            image_url: None,
        }
    }

    async fn seeded() -> InMemoryFunctionsApi {
        let api = InMemoryFunctionsApi::new();
        api.create_customer(customer("C1")).await.unwrap();
        api.create_product(product("P1", Decimal::new(1000, 2), 10), None)
            .await
            .unwrap();
        api
    }

    #[tokio::test]
    async fn order_snapshots_unit_price_and_derives_total() {
        let api = seeded().await;

        let order = api.create_order("C1", "P1", 3).await.unwrap().unwrap();
        assert_eq!(order.unit_price, Decimal::new(1000, 2));
        assert_eq!(order.total_price, Decimal::new(3000, 2));
        assert_eq!(order.status, OrderStatus::Submitted);

        api.update_product("P1", product("P1", Decimal::new(2500, 2), 7), None)
            .await
            .unwrap();

        let stored = api.get_order(&order.id).await.unwrap().unwrap();
        assert_eq!(stored.unit_price, Decimal::new(1000, 2));
        assert_eq!(stored.total_price, Decimal::new(3000, 2));
    }

    #[tokio::test]
    async fn order_reserves_stock() {
        let api = seeded().await;
        api.create_order("C1", "P1", 4).await.unwrap();

        let p = api.get_product("P1").await.unwrap().unwrap();
        assert_eq!(p.stock_available, 6);

        let err = api.create_order("C1", "P1", 7).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn order_requires_known_customer_and_product() {
        let api = seeded().await;

        assert!(matches!(
            api.create_order("nobody", "P1", 1).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            api.create_order("C1", "nothing", 1).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            api.create_order("C1", "P1", 0).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(api.list_orders().await.unwrap().unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_of_unknown_id_returns_none_without_side_effects() {
        let api = seeded().await;

        let updated = api.update_customer("ghost", customer("ghost")).await.unwrap();
        assert!(updated.is_none());
        assert_eq!(api.list_customers().await.unwrap().unwrap().len(), 1);

        let updated = api
            .update_product("ghost", product("ghost", Decimal::ONE, 1), None)
            .await
            .unwrap();
        assert!(updated.is_none());
        assert_eq!(api.list_products().await.unwrap().unwrap().len(), 1);

        assert!(api.update_order_status("ghost", "Shipped").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_then_get_is_absent() {
        let api = seeded().await;
        let order = api.create_order("C1", "P1", 1).await.unwrap().unwrap();

        assert!(api.delete_order(&order.id).await.unwrap());
        assert!(api.get_order(&order.id).await.unwrap().is_none());

        assert!(api.delete_product("P1").await.unwrap());
        assert!(api.get_product("P1").await.unwrap().is_none());

        assert!(api.delete_customer("C1").await.unwrap());
        assert!(api.get_customer("C1").await.unwrap().is_none());
        assert!(!api.delete_customer("C1").await.unwrap());
    }

    #[tokio::test]
    async fn status_update_ignores_case_and_rejects_unknown_text() {
        let api = seeded().await;
        let order = api.create_order("C1", "P1", 1).await.unwrap().unwrap();

        let shipped = api.update_order_status(&order.id, "shipped").await.unwrap().unwrap();
        assert_eq!(shipped.status, OrderStatus::Shipped);

        let err = api.update_order_status(&order.id, "teleported").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        let stored = api.get_order(&order.id).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Shipped);
    }

    #[tokio::test]
    async fn overflowing_total_is_rejected_and_stock_is_untouched() {
        let api = seeded().await;
        api.create_product(product("P-MAX", Decimal::MAX, 10), None)
            .await
            .unwrap();

        let err = api.create_order("C1", "P-MAX", 2).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let p = api.get_product("P-MAX").await.unwrap().unwrap();
        assert_eq!(p.stock_available, 10);
        assert!(api.list_orders().await.unwrap().unwrap().is_empty());

        // A single unit at the largest price still fits.
        let order = api.create_order("C1", "P-MAX", 1).await.unwrap().unwrap();
        assert_eq!(order.total_price, Decimal::MAX);
    }

    #[tokio::test]
    async fn create_assigns_ids_and_rejects_duplicates() {
        let api = seeded().await;

        let mut anonymous = customer("");
        anonymous.username = "anon".into();
        let created = api.create_customer(anonymous).await.unwrap().unwrap();
        assert!(Uuid::parse_str(&created.id).is_ok());

        assert!(matches!(
            api.create_customer(customer("C1")).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            api.create_product(product("P2", Decimal::new(-1, 0), 1), None).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn image_attachment_sets_image_url_and_upload_echoes_name() {
        let api = seeded().await;
        let image = FileUpload::new("mug.png", vec![1, 2, 3]).with_content_type("image/png");

        let updated = api
            .update_product("P1", product("P1", Decimal::TEN, 3), Some(image))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.image_url.as_deref(), Some("mug.png"));

        let name = api
            .upload_proof_of_payment(FileUpload::new("receipt.pdf", b"%PDF".to_vec()), Some("O1"), None)
            .await
            .unwrap();
        assert_eq!(name.as_deref(), Some("receipt.pdf"));
    }
}
