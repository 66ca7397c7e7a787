use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        customers::{CustomerList, CustomerPayload},
        orders::{CreateOrderRequest, OrderDto, OrderList, UpdateOrderStatusRequest},
        products::ProductList,
        uploads::UploadResponse,
    },
    models::{Customer, OrderStatus, Product},
    routes::{
        customers, health, orders,
        products::{self, ProductUpload},
        uploads::{self, ProofOfPaymentUpload},
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        customers::list_customers,
        customers::get_customer,
        customers::create_customer,
        customers::update_customer,
        customers::delete_customer,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        orders::list_orders,
        orders::get_order,
        orders::create_order,
        orders::update_order_status,
        orders::delete_order,
        uploads::upload_proof_of_payment,
    ),
    components(
        schemas(
            Customer,
            CustomerPayload,
            CustomerList,
            Product,
            ProductList,
            ProductUpload,
            OrderDto,
            OrderList,
            OrderStatus,
            CreateOrderRequest,
            UpdateOrderStatusRequest,
            ProofOfPaymentUpload,
            UploadResponse,
            health::HealthData,
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "customers", description = "Customer endpoints"),
        (name = "products", description = "Product catalogue endpoints"),
        (name = "orders", description = "Order endpoints"),
        (name = "uploads", description = "Proof-of-payment uploads"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
