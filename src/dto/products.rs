use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{FileUpload, Product};

pub const FIELD_PRODUCT_NAME: &str = "ProductName";
pub const FIELD_DESCRIPTION: &str = "Description";
pub const FIELD_PRICE: &str = "Price";
pub const FIELD_STOCK_AVAILABLE: &str = "StockAvailable";
pub const FIELD_IMAGE_URL: &str = "ImageUrl";
pub const FIELD_IMAGE_FILE: &str = "ImageFile";

/// Multipart form carried by product create and update.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub product_name: String,
    pub description: String,
    pub price: Decimal,
    pub stock_available: i32,
    pub image_url: Option<String>,
    pub image_file: Option<FileUpload>,
}

impl ProductForm {
    pub fn from_product(product: &Product, image_file: Option<FileUpload>) -> Self {
        Self {
            product_name: product.product_name.clone(),
            description: product.description.clone(),
            price: product.price,
            stock_available: product.stock_available,
            image_url: product.image_url.clone().filter(|url| !url.trim().is_empty()),
            image_file: image_file.filter(|file| !file.is_empty()),
        }
    }

    /// Splits the form into the scalar product and its optional attachment.
    pub fn into_parts(self, id: impl Into<String>) -> (Product, Option<FileUpload>) {
        let product = Product {
            id: id.into(),
            product_name: self.product_name,
            description: self.description,
            price: self.price,
            stock_available: self.stock_available,
            image_url: self.image_url,
        };
        (product, self.image_file)
    }
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}
