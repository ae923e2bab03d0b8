use chrono::{DateTime, Utc};

use crate::{
    dto::products::{CreateProductRequest, ProductPage, UpdateProductRequest},
    error::AppResult,
    models::{Gender, Product},
    pricing::to_cents,
    store::Store,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    PriceAsc,
    PriceDesc,
    Newest,
}

impl ProductSort {
    /// Unknown keys yield `None`, which keeps the catalog in insertion order.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "price_asc" => Some(ProductSort::PriceAsc),
            "price_desc" => Some(ProductSort::PriceDesc),
            "newest" => Some(ProductSort::Newest),
            _ => None,
        }
    }
}

/// Catalog query. Every `Some` field must match; `page` and `page_size` only
/// take effect together.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub in_stock: Option<bool>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub gender: Option<Gender>,
    pub sort: Option<ProductSort>,
    /// 1-indexed.
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        self.category
            .as_ref()
            .is_none_or(|category| &product.category == category)
            && self.in_stock.is_none_or(|in_stock| product.in_stock == in_stock)
            && self
                .color
                .as_ref()
                .is_none_or(|color| product.available_colors.contains(color))
            && self
                .size
                .as_ref()
                .is_none_or(|size| product.available_sizes.contains(size))
            && self.gender.is_none_or(|gender| product.gender == gender)
    }
}

impl Store {
    pub fn list_products(&self, filter: &ProductFilter) -> AppResult<ProductPage> {
        let tables = self.read()?;
        let mut products: Vec<Product> = tables
            .products
            .rows
            .values()
            .filter(|product| filter.matches(product))
            .cloned()
            .collect();

        // sort_by is stable, so ties keep catalog order
        match filter.sort {
            Some(ProductSort::PriceAsc) => products.sort_by(|a, b| a.price.cmp(&b.price)),
            Some(ProductSort::PriceDesc) => products.sort_by(|a, b| b.price.cmp(&a.price)),
            Some(ProductSort::Newest) => {
                products.sort_by(|a, b| b.created_at.cmp(&a.created_at))
            }
            None => {}
        }

        let total = products.len();

        if let (Some(page), Some(page_size)) = (filter.page, filter.page_size) {
            let start = page.saturating_sub(1).saturating_mul(page_size);
            products = products.into_iter().skip(start).take(page_size).collect();
        }

        Ok(ProductPage { products, total })
    }

    pub fn get_product(&self, id: i64) -> AppResult<Option<Product>> {
        Ok(self.read()?.products.rows.get(&id).cloned())
    }

    pub fn create_product(&self, payload: CreateProductRequest) -> AppResult<Product> {
        self.create_product_at(payload, Utc::now())
    }

    /// Like [`Store::create_product`] with an explicit creation time, so the
    /// seeded catalog has a meaningful "newest" order.
    pub(crate) fn create_product_at(
        &self,
        payload: CreateProductRequest,
        created_at: DateTime<Utc>,
    ) -> AppResult<Product> {
        let mut tables = self.write()?;
        let id = tables.products.allocate_id();
        let product = Product {
            id,
            name: payload.name,
            description: payload.description,
            price: to_cents(payload.price),
            category: payload.category,
            image_url: payload.image_url,
            images: payload.images,
            materials: payload.materials,
            care_instructions: payload.care_instructions,
            in_stock: payload.in_stock,
            available_colors: payload.available_colors,
            available_sizes: payload.available_sizes,
            gender: payload.gender,
            created_at,
        };
        tables.products.rows.insert(id, product.clone());
        Ok(product)
    }

    pub fn update_product(
        &self,
        id: i64,
        payload: UpdateProductRequest,
    ) -> AppResult<Option<Product>> {
        let mut tables = self.write()?;
        let Some(product) = tables.products.rows.get_mut(&id) else {
            return Ok(None);
        };
        payload.apply(product);
        Ok(Some(product.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn tee(
        name: &str,
        price: &str,
        category: &str,
        colors: &[&str],
        sizes: &[&str],
    ) -> CreateProductRequest {
        CreateProductRequest {
            name: name.to_string(),
            description: None,
            price: Decimal::from_str(price).unwrap(),
            category: category.to_string(),
            image_url: format!("https://img.example/{name}.jpg"),
            images: None,
            materials: None,
            care_instructions: None,
            in_stock: true,
            available_colors: colors.iter().map(|c| c.to_string()).collect(),
            available_sizes: sizes.iter().map(|s| s.to_string()).collect(),
            gender: Gender::Unisex,
        }
    }

    fn names(page: &ProductPage) -> Vec<&str> {
        page.products.iter().map(|p| p.name.as_str()).collect()
    }

    fn store_with_twenty() -> Store {
        let store = Store::new();
        let base = Utc::now() - Duration::hours(1);
        for i in 1..=20 {
            let price = format!("{}.99", 20 + (i * 7) % 25);
            store
                .create_product_at(
                    tee(&format!("tee-{i}"), &price, "Basics", &["White"], &["M"]),
                    base + Duration::minutes(i),
                )
                .unwrap();
        }
        store
    }

    #[test]
    fn filters_are_conjunctive() {
        let store = Store::new();
        store
            .create_product(tee("a", "10.00", "Classics", &["White", "Black"], &["S", "M"]))
            .unwrap();
        store
            .create_product(tee("b", "12.00", "Classics", &["Black"], &["L"]))
            .unwrap();
        store
            .create_product(tee("c", "14.00", "Graphics", &["Black"], &["M"]))
            .unwrap();

        let filter = ProductFilter {
            category: Some("Classics".into()),
            color: Some("Black".into()),
            size: Some("M".into()),
            ..Default::default()
        };
        let page = store.list_products(&filter).unwrap();
        assert_eq!(names(&page), vec!["a"]);
        assert_eq!(page.total, 1);
    }

    #[test]
    fn color_match_is_case_sensitive() {
        let store = Store::new();
        store
            .create_product(tee("a", "10.00", "Classics", &["Black"], &["M"]))
            .unwrap();

        let filter = ProductFilter {
            color: Some("black".into()),
            ..Default::default()
        };
        assert_eq!(store.list_products(&filter).unwrap().total, 0);
    }

    #[test]
    fn out_of_stock_and_gender_filters() {
        let store = Store::new();
        let mut sold_out = tee("gone", "10.00", "Classics", &["Black"], &["M"]);
        sold_out.in_stock = false;
        store.create_product(sold_out).unwrap();
        let mut womens = tee("w", "10.00", "Classics", &["Black"], &["M"]);
        womens.gender = Gender::Women;
        store.create_product(womens).unwrap();

        let in_stock = ProductFilter {
            in_stock: Some(true),
            ..Default::default()
        };
        assert_eq!(names(&store.list_products(&in_stock).unwrap()), vec!["w"]);

        let men = ProductFilter {
            gender: Some(Gender::Men),
            ..Default::default()
        };
        assert_eq!(store.list_products(&men).unwrap().total, 0);
    }

    #[test]
    fn price_sort_is_numeric() {
        let store = Store::new();
        store.create_product(tee("nine", "9.99", "C", &[], &[])).unwrap();
        store.create_product(tee("hundred", "100.00", "C", &[], &[])).unwrap();
        store.create_product(tee("twenty", "20.50", "C", &[], &[])).unwrap();

        let asc = ProductFilter {
            sort: Some(ProductSort::PriceAsc),
            ..Default::default()
        };
        assert_eq!(
            names(&store.list_products(&asc).unwrap()),
            vec!["nine", "twenty", "hundred"]
        );

        let desc = ProductFilter {
            sort: Some(ProductSort::PriceDesc),
            ..Default::default()
        };
        assert_eq!(
            names(&store.list_products(&desc).unwrap()),
            vec!["hundred", "twenty", "nine"]
        );
    }

    #[test]
    fn equal_prices_keep_catalog_order() {
        let store = Store::new();
        store.create_product(tee("first", "29.99", "C", &[], &[])).unwrap();
        store.create_product(tee("cheap", "5.00", "C", &[], &[])).unwrap();
        store.create_product(tee("second", "29.99", "C", &[], &[])).unwrap();

        let asc = ProductFilter {
            sort: Some(ProductSort::PriceAsc),
            ..Default::default()
        };
        assert_eq!(
            names(&store.list_products(&asc).unwrap()),
            vec!["cheap", "first", "second"]
        );
    }

    #[test]
    fn newest_sorts_by_creation_time() {
        let store = store_with_twenty();
        let newest = ProductFilter {
            sort: Some(ProductSort::Newest),
            page: Some(1),
            page_size: Some(3),
            ..Default::default()
        };
        assert_eq!(
            names(&store.list_products(&newest).unwrap()),
            vec!["tee-20", "tee-19", "tee-18"]
        );
    }

    #[test]
    fn unknown_sort_key_is_ignored() {
        assert_eq!(ProductSort::parse("popular"), None);
        assert_eq!(ProductSort::parse("price_asc"), Some(ProductSort::PriceAsc));
    }

    #[test]
    fn second_page_of_nine() {
        let store = store_with_twenty();
        let filter = ProductFilter {
            page: Some(2),
            page_size: Some(9),
            ..Default::default()
        };
        let page = store.list_products(&filter).unwrap();
        assert_eq!(page.total, 20);
        assert_eq!(page.products.len(), 9);
        assert_eq!(page.products.first().unwrap().name, "tee-10");
        assert_eq!(page.products.last().unwrap().name, "tee-18");
    }

    #[test]
    fn page_lengths_follow_the_window() {
        let store = store_with_twenty();
        for page_size in 1..=7usize {
            for page in 1..=6usize {
                let filter = ProductFilter {
                    page: Some(page),
                    page_size: Some(page_size),
                    ..Default::default()
                };
                let result = store.list_products(&filter).unwrap();
                let expected = page_size.min(20usize.saturating_sub((page - 1) * page_size));
                assert_eq!(result.products.len(), expected, "page {page} size {page_size}");
                assert_eq!(result.total, 20);
            }
        }
    }

    #[test]
    fn page_without_size_returns_everything() {
        let store = store_with_twenty();
        let filter = ProductFilter {
            page: Some(3),
            ..Default::default()
        };
        assert_eq!(store.list_products(&filter).unwrap().products.len(), 20);
    }

    #[test]
    fn prices_are_stored_in_cents() {
        let store = Store::new();
        let whole = store.create_product(tee("whole", "30", "C", &[], &[])).unwrap();
        assert_eq!(whole.price.to_string(), "30.00");
        let padded = store.create_product(tee("padded", "29.990", "C", &[], &[])).unwrap();
        assert_eq!(padded.price.to_string(), "29.99");

        let updated = store
            .update_product(
                whole.id,
                UpdateProductRequest {
                    price: Some(Decimal::from_str("12.5").unwrap()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.price.to_string(), "12.50");
    }

    #[test]
    fn update_merges_fields() {
        let store = Store::new();
        let product = store
            .create_product(tee("a", "10.00", "Classics", &["Black"], &["M"]))
            .unwrap();

        let updated = store
            .update_product(
                product.id,
                UpdateProductRequest {
                    in_stock: Some(false),
                    price: Some(Decimal::from_str("12.50").unwrap()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert!(!updated.in_stock);
        assert_eq!(updated.price.to_string(), "12.50");
        assert_eq!(updated.name, "a");

        assert!(
            store
                .update_product(999, UpdateProductRequest::default())
                .unwrap()
                .is_none()
        );
    }
}
