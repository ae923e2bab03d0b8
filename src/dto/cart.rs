use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::{check_amount, check_quantity},
    error::AppResult,
    pricing::OrderTotals,
};

/// A cart line as far as pricing cares. Clients may send their full cart
/// items; extra fields are ignored.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    #[schema(value_type = String, example = "29.99")]
    pub price: Decimal,
    pub quantity: u32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartQuoteRequest {
    pub cart_items: Vec<QuoteLine>,
}

impl CartQuoteRequest {
    pub fn validate(&self) -> AppResult<()> {
        for line in &self.cart_items {
            check_quantity(line.quantity)?;
            check_amount("price", line.price)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartQuote {
    #[serde(flatten)]
    pub totals: OrderTotals,
    pub item_count: u32,
}
