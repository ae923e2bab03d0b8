use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};

pub mod addresses;
pub mod auth;
pub mod cart;
pub mod orders;
pub mod payment_methods;
pub mod products;
pub mod users;

pub(crate) fn require(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(())
}

/// Same as [`require`] for a field a partial update may leave out.
pub(crate) fn require_if_present(field: &str, value: Option<&String>) -> AppResult<()> {
    match value {
        Some(value) => require(field, value),
        None => Ok(()),
    }
}

/// Largest accepted price, 1,000,000.00.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 2);
/// Largest accepted quantity on a single cart line.
pub const MAX_QUANTITY: u32 = 1_000;

/// Money must be non-negative, at most [`MAX_AMOUNT`], with at most two
/// decimal places.
pub(crate) fn check_amount(field: &str, amount: Decimal) -> AppResult<()> {
    if amount < Decimal::ZERO {
        return Err(AppError::BadRequest(format!("{field} must not be negative")));
    }
    if amount > MAX_AMOUNT {
        return Err(AppError::BadRequest(format!(
            "{field} must not exceed {MAX_AMOUNT}"
        )));
    }
    if amount.normalize().scale() > 2 {
        return Err(AppError::BadRequest(format!(
            "{field} must have at most two decimal places"
        )));
    }
    Ok(())
}

pub(crate) fn check_quantity(quantity: u32) -> AppResult<()> {
    if quantity == 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".into(),
        ));
    }
    if quantity > MAX_QUANTITY {
        return Err(AppError::BadRequest(format!(
            "quantity must not exceed {MAX_QUANTITY}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn blank_strings_are_rejected() {
        assert!(require("city", "  ").is_err());
        assert!(require("city", "Test City").is_ok());
        assert!(require_if_present("city", None).is_ok());
    }

    #[test]
    fn amounts_are_cents_precision() {
        assert!(check_amount("price", Decimal::from_str("29.99").unwrap()).is_ok());
        assert!(check_amount("price", Decimal::from_str("29.990").unwrap()).is_ok());
        assert!(check_amount("price", Decimal::from_str("29.999").unwrap()).is_err());
        assert!(check_amount("price", Decimal::from_str("-1").unwrap()).is_err());
        assert!(check_amount("price", MAX_AMOUNT).is_ok());
        assert!(check_amount("price", Decimal::from_str("1000000.01").unwrap()).is_err());
        assert!(check_amount("price", Decimal::MAX).is_err());
    }

    #[test]
    fn quantities_are_bounded() {
        assert!(check_quantity(0).is_err());
        assert!(check_quantity(1).is_ok());
        assert!(check_quantity(MAX_QUANTITY).is_ok());
        assert!(check_quantity(MAX_QUANTITY + 1).is_err());
    }
}
