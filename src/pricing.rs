//! Order totals. Cart quotes and persisted orders both go through
//! [`OrderTotals::from_lines`], so the numbers a shopper sees are the numbers
//! that get stored.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Flat shipping charge per order.
pub const SHIPPING_FLAT: Decimal = Decimal::from_parts(599, 0, 0, false, 2);
/// Sales tax rate applied to the subtotal.
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    #[schema(value_type = String, example = "94.97")]
    pub subtotal: Decimal,
    #[schema(value_type = String, example = "5.99")]
    pub shipping: Decimal,
    #[schema(value_type = String, example = "7.60")]
    pub tax: Decimal,
    #[schema(value_type = String, example = "108.56")]
    pub total: Decimal,
}

impl OrderTotals {
    /// `lines` are `(unit price, quantity)` pairs. Amounts that do not fit in
    /// a `Decimal` are rejected rather than wrapped.
    pub fn from_lines<I>(lines: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (Decimal, u32)>,
    {
        let mut subtotal = Decimal::ZERO;
        for (price, quantity) in lines {
            subtotal = price
                .checked_mul(Decimal::from(quantity))
                .and_then(|line| subtotal.checked_add(line))
                .ok_or_else(too_large)?;
        }
        let subtotal = to_cents(subtotal);
        let shipping = to_cents(SHIPPING_FLAT);
        let tax = to_cents(subtotal.checked_mul(TAX_RATE).ok_or_else(too_large)?);
        let total = subtotal
            .checked_add(shipping)
            .and_then(|sum| sum.checked_add(tax))
            .map(to_cents)
            .ok_or_else(too_large)?;

        Ok(Self {
            subtotal,
            shipping,
            tax,
            total,
        })
    }
}

fn too_large() -> AppError {
    AppError::BadRequest("order total is too large".into())
}

/// Rounds half away from zero to two places and pins the scale at 2, so
/// `30` renders as `"30.00"`.
pub fn to_cents(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
