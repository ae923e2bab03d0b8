use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::{require, require_if_present},
    error::AppResult,
    models::Address,
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressRequest {
    pub address_name: String,
    #[serde(default)]
    pub is_default: bool,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone: String,
}

impl CreateAddressRequest {
    pub fn validate(&self) -> AppResult<()> {
        require("addressName", &self.address_name)?;
        require("firstName", &self.first_name)?;
        require("lastName", &self.last_name)?;
        require("address", &self.address)?;
        require("city", &self.city)?;
        require("state", &self.state)?;
        require("zipCode", &self.zip_code)?;
        require("country", &self.country)?;
        require("phone", &self.phone)
    }
}

/// Partial update; absent fields keep their stored value. `PUT` and `PATCH`
/// both merge.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAddressRequest {
    pub address_name: Option<String>,
    pub is_default: Option<bool>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
}

impl UpdateAddressRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_if_present("addressName", self.address_name.as_ref())?;
        require_if_present("firstName", self.first_name.as_ref())?;
        require_if_present("lastName", self.last_name.as_ref())?;
        require_if_present("address", self.address.as_ref())?;
        require_if_present("city", self.city.as_ref())?;
        require_if_present("state", self.state.as_ref())?;
        require_if_present("zipCode", self.zip_code.as_ref())?;
        require_if_present("country", self.country.as_ref())?;
        require_if_present("phone", self.phone.as_ref())
    }

    /// Copies every supplied field onto `address`.
    pub fn apply(self, address: &mut Address) {
        if let Some(address_name) = self.address_name {
            address.address_name = address_name;
        }
        if let Some(is_default) = self.is_default {
            address.is_default = is_default;
        }
        if let Some(first_name) = self.first_name {
            address.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            address.last_name = last_name;
        }
        if let Some(street) = self.address {
            address.address = street;
        }
        if let Some(city) = self.city {
            address.city = city;
        }
        if let Some(state) = self.state {
            address.state = state;
        }
        if let Some(zip_code) = self.zip_code {
            address.zip_code = zip_code;
        }
        if let Some(country) = self.country {
            address.country = country;
        }
        if let Some(phone) = self.phone {
            address.phone = phone;
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct AddressList {
    #[schema(value_type = Vec<Address>)]
    pub items: Vec<Address>,
}
