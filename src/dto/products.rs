use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::{check_amount, require, require_if_present},
    error::AppResult,
    models::{Gender, Product},
    pricing::to_cents,
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "29.99")]
    pub price: Decimal,
    pub category: String,
    pub image_url: String,
    pub images: Option<Vec<String>>,
    pub materials: Option<String>,
    pub care_instructions: Option<String>,
    #[serde(default = "in_stock_default")]
    pub in_stock: bool,
    #[serde(default)]
    pub available_colors: Vec<String>,
    #[serde(default)]
    pub available_sizes: Vec<String>,
    #[serde(default)]
    pub gender: Gender,
}

fn in_stock_default() -> bool {
    true
}

impl CreateProductRequest {
    pub fn validate(&self) -> AppResult<()> {
        require("name", &self.name)?;
        require("category", &self.category)?;
        require("imageUrl", &self.image_url)?;
        check_amount("price", self.price)
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, example = "29.99")]
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub images: Option<Vec<String>>,
    pub materials: Option<String>,
    pub care_instructions: Option<String>,
    pub in_stock: Option<bool>,
    pub available_colors: Option<Vec<String>>,
    pub available_sizes: Option<Vec<String>>,
    pub gender: Option<Gender>,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_if_present("name", self.name.as_ref())?;
        require_if_present("category", self.category.as_ref())?;
        require_if_present("imageUrl", self.image_url.as_ref())?;
        match self.price {
            Some(price) => check_amount("price", price),
            None => Ok(()),
        }
    }

    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = Some(description);
        }
        if let Some(price) = self.price {
            product.price = to_cents(price);
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(image_url) = self.image_url {
            product.image_url = image_url;
        }
        if let Some(images) = self.images {
            product.images = Some(images);
        }
        if let Some(materials) = self.materials {
            product.materials = Some(materials);
        }
        if let Some(care_instructions) = self.care_instructions {
            product.care_instructions = Some(care_instructions);
        }
        if let Some(in_stock) = self.in_stock {
            product.in_stock = in_stock;
        }
        if let Some(colors) = self.available_colors {
            product.available_colors = colors;
        }
        if let Some(sizes) = self.available_sizes {
            product.available_sizes = sizes;
        }
        if let Some(gender) = self.gender {
            product.gender = gender;
        }
    }
}

/// One page of a catalog query. `total` counts every match, not just this
/// page.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: usize,
}
