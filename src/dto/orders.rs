use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::{check_amount, check_quantity, require},
    error::{AppError, AppResult},
    models::{Order, OrderItem, OrderStatus, ShippingAddress},
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    /// Label stored on the order, such as `creditCard` or `paypal`.
    pub payment_method: String,
}

/// Cart line as submitted at checkout. Name, price and image are copied onto
/// the order item as they are here.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemInput {
    pub product_id: i64,
    pub name: String,
    #[schema(value_type = String, example = "29.99")]
    pub price: Decimal,
    pub quantity: u32,
    pub size: String,
    pub color: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub shipping_info: ShippingAddress,
    pub billing_info: Option<ShippingAddress>,
    pub payment_info: PaymentInfo,
    pub cart_items: Vec<CartItemInput>,
}

impl CreateOrderRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.cart_items.is_empty() {
            return Err(AppError::BadRequest("Cart is empty".into()));
        }
        check_address("shippingInfo", &self.shipping_info)?;
        if let Some(billing) = &self.billing_info {
            check_address("billingInfo", billing)?;
        }
        require("paymentInfo.paymentMethod", &self.payment_info.payment_method)?;
        for item in &self.cart_items {
            check_quantity(item.quantity)?;
            check_amount("price", item.price)?;
            require("name", &item.name)?;
        }
        Ok(())
    }
}

fn check_address(prefix: &str, address: &ShippingAddress) -> AppResult<()> {
    let fields = [
        ("firstName", &address.first_name),
        ("lastName", &address.last_name),
        ("address", &address.address),
        ("city", &address.city),
        ("state", &address.state),
        ("zipCode", &address.zip_code),
        ("country", &address.country),
        ("phone", &address.phone),
    ];
    for (name, value) in fields {
        require(&format!("{prefix}.{name}"), value)?;
    }
    Ok(())
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<OrderWithItems>)]
    pub items: Vec<OrderWithItems>,
}
