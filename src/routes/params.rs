use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::{AppError, AppResult},
    models::Gender,
    store::{ProductFilter, ProductSort},
};

pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Exact category name.
    pub category: Option<String>,
    /// Defaults to `true`; pass `false` to list sold-out tees.
    pub in_stock: Option<bool>,
    /// Case-sensitive color name, e.g. `Black`.
    pub color: Option<String>,
    pub size: Option<String>,
    /// `men`, `women` or `unisex`. Any other value is a 400 rather than an
    /// empty result.
    pub gender: Option<String>,
    /// `price_asc`, `price_desc` or `newest`. Other values keep catalog order.
    pub sort: Option<String>,
    /// 1-indexed; only applied together with `pageSize`.
    pub page: Option<i64>,
    /// Capped at 100.
    pub page_size: Option<i64>,
}

impl ProductQuery {
    pub fn into_filter(self) -> AppResult<ProductFilter> {
        let gender = match self.gender.as_deref().filter(|g| !g.is_empty()) {
            Some(raw) => Some(
                Gender::parse(raw)
                    .ok_or_else(|| AppError::BadRequest(format!("unknown gender {raw}")))?,
            ),
            None => None,
        };

        let page = self.page.map(|page| positive("page", page)).transpose()?;
        let page_size = self
            .page_size
            .map(|size| positive("pageSize", size.min(MAX_PAGE_SIZE)))
            .transpose()?;

        Ok(ProductFilter {
            category: self.category.filter(|c| !c.is_empty()),
            in_stock: Some(self.in_stock.unwrap_or(true)),
            color: self.color.filter(|c| !c.is_empty()),
            size: self.size.filter(|s| !s.is_empty()),
            gender,
            sort: self.sort.as_deref().and_then(ProductSort::parse),
            page,
            page_size,
        })
    }
}

fn positive(field: &str, value: i64) -> AppResult<usize> {
    if value < 1 {
        return Err(AppError::BadRequest(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_stock_defaults_to_true() {
        let filter = ProductQuery::default().into_filter().unwrap();
        assert_eq!(filter.in_stock, Some(true));

        let filter = ProductQuery {
            in_stock: Some(false),
            ..Default::default()
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.in_stock, Some(false));
    }

    #[test]
    fn page_size_is_capped() {
        let filter = ProductQuery {
            page: Some(1),
            page_size: Some(500),
            ..Default::default()
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.page_size, Some(100));
    }

    #[test]
    fn rejects_zero_page_and_bad_gender() {
        let zero = ProductQuery {
            page: Some(0),
            page_size: Some(9),
            ..Default::default()
        };
        assert!(matches!(zero.into_filter(), Err(AppError::BadRequest(_))));

        let gender = ProductQuery {
            gender: Some("kids".into()),
            ..Default::default()
        };
        assert!(matches!(gender.into_filter(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn unknown_sort_is_dropped() {
        let filter = ProductQuery {
            sort: Some("popular".into()),
            ..Default::default()
        }
        .into_filter()
        .unwrap();
        assert!(filter.sort.is_none());
    }
}
