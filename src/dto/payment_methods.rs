use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::{require, require_if_present},
    error::{AppError, AppResult},
    models::PaymentMethod,
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentMethodRequest {
    pub card_name: String,
    pub cardholder_name: String,
    /// Either the last four digits or a full card number; only the last four
    /// are kept.
    pub card_number: String,
    pub card_type: String,
    pub expiry_month: String,
    pub expiry_year: String,
    #[serde(default)]
    pub is_default: bool,
}

impl CreatePaymentMethodRequest {
    /// Validates and reduces `card_number` to its last four digits.
    pub fn normalize(mut self) -> AppResult<Self> {
        require("cardName", &self.card_name)?;
        require("cardholderName", &self.cardholder_name)?;
        require("cardType", &self.card_type)?;
        check_expiry_month(&self.expiry_month)?;
        check_expiry_year(&self.expiry_year)?;
        self.card_number = last_four(&self.card_number)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentMethodRequest {
    pub card_name: Option<String>,
    pub cardholder_name: Option<String>,
    pub card_number: Option<String>,
    pub card_type: Option<String>,
    pub expiry_month: Option<String>,
    pub expiry_year: Option<String>,
    pub is_default: Option<bool>,
}

impl UpdatePaymentMethodRequest {
    pub fn normalize(mut self) -> AppResult<Self> {
        require_if_present("cardName", self.card_name.as_ref())?;
        require_if_present("cardholderName", self.cardholder_name.as_ref())?;
        require_if_present("cardType", self.card_type.as_ref())?;
        if let Some(month) = &self.expiry_month {
            check_expiry_month(month)?;
        }
        if let Some(year) = &self.expiry_year {
            check_expiry_year(year)?;
        }
        self.card_number = self.card_number.as_deref().map(last_four).transpose()?;
        Ok(self)
    }

    pub fn apply(self, method: &mut PaymentMethod) {
        if let Some(card_name) = self.card_name {
            method.card_name = card_name;
        }
        if let Some(cardholder_name) = self.cardholder_name {
            method.cardholder_name = cardholder_name;
        }
        if let Some(card_number) = self.card_number {
            method.card_number = card_number;
        }
        if let Some(card_type) = self.card_type {
            method.card_type = card_type;
        }
        if let Some(expiry_month) = self.expiry_month {
            method.expiry_month = expiry_month;
        }
        if let Some(expiry_year) = self.expiry_year {
            method.expiry_year = expiry_year;
        }
        if let Some(is_default) = self.is_default {
            method.is_default = is_default;
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct PaymentMethodList {
    #[schema(value_type = Vec<PaymentMethod>)]
    pub items: Vec<PaymentMethod>,
}

/// Keeps the last four digits of a card number. Spaces and dashes are
/// ignored; anything else non-numeric is rejected.
pub fn last_four(card_number: &str) -> AppResult<String> {
    let digits: String = card_number
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();
    if digits.len() < 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest(
            "cardNumber must contain at least four digits".into(),
        ));
    }
    Ok(digits[digits.len() - 4..].to_string())
}

fn check_expiry_month(month: &str) -> AppResult<()> {
    match month.parse::<u8>() {
        Ok(1..=12) => Ok(()),
        _ => Err(AppError::BadRequest(
            "expiryMonth must be between 01 and 12".into(),
        )),
    }
}

fn check_expiry_year(year: &str) -> AppResult<()> {
    if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(AppError::BadRequest(
            "expiryYear must be a four digit year".into(),
        ))
    }
}
