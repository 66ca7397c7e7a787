use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppError,
    models::{Order, OrderStatus, line_total},
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

/// Wire shape of an order. Status travels as free text and the total is
/// derived on the receiving side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: String,
    pub customer_id: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    #[schema(value_type = String, format = DateTime)]
    pub order_date_utc: DateTime<FixedOffset>,
    pub status: String,
}

impl TryFrom<OrderDto> for Order {
    type Error = AppError;

    fn try_from(dto: OrderDto) -> Result<Self, Self::Error> {
        Ok(Order {
            total_price: line_total(dto.unit_price, dto.quantity)?,
            status: OrderStatus::parse_or_default(&dto.status),
            order_date_utc: dto.order_date_utc.with_timezone(&Utc),
            id: dto.id,
            customer_id: dto.customer_id,
            product_id: dto.product_id,
            product_name: dto.product_name,
            quantity: dto.quantity,
            unit_price: dto.unit_price,
        })
    }
}

impl From<&Order> for OrderDto {
    fn from(order: &Order) -> Self {
        OrderDto {
            id: order.id.clone(),
            customer_id: order.customer_id.clone(),
            product_id: order.product_id.clone(),
            product_name: order.product_name.clone(),
            quantity: order.quantity,
            unit_price: order.unit_price,
            order_date_utc: order.order_date_utc.fixed_offset(),
            status: order.status.to_string(),
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<OrderDto>)]
    pub items: Vec<OrderDto>,
}
