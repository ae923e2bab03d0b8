//! Startup data: the t-shirt catalog and a demo account with saved
//! addresses, cards and one past order.

use std::str::FromStr;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use crate::{
    dto::{
        addresses::CreateAddressRequest,
        auth::RegisterRequest,
        orders::CartItemInput,
        payment_methods::CreatePaymentMethodRequest,
        products::CreateProductRequest,
        users::UpdateProfileRequest,
    },
    error::AppResult,
    models::{Gender, OrderStatus, ShippingAddress},
    store::{NewOrder, Store},
};

pub const DEMO_USERNAME: &str = "testuser";
pub const DEMO_PASSWORD: &str = "password123";

struct SeedTee {
    name: &'static str,
    price: &'static str,
    category: &'static str,
    gender: Gender,
    materials: &'static str,
    colors: &'static [&'static str],
    sizes: &'static [&'static str],
    blurb: &'static str,
}

const CATALOG: &[SeedTee] = &[
    SeedTee {
        name: "Classic White Tee",
        price: "29.99",
        category: "Chill Mode Classics",
        gender: Gender::Unisex,
        materials: "100% Cotton",
        colors: &["White", "Black", "Gray", "Blue"],
        sizes: &["S", "M", "L", "XL", "XXL"],
        blurb: "Soft, breathable cotton in a relaxed fit. The base layer for everything.",
    },
    SeedTee {
        name: "Ocean Waves Graphic",
        price: "34.99",
        category: "Glacier Graphics",
        gender: Gender::Men,
        materials: "100% Organic Cotton",
        colors: &["Blue", "White", "Navy"],
        sizes: &["XS", "S", "M", "L", "XL"],
        blurb: "Hand-drawn wave print on organic cotton.",
    },
    SeedTee {
        name: "Summer Stripes",
        price: "32.99",
        category: "Frosty Fresh Tees",
        gender: Gender::Women,
        materials: "95% Cotton, 5% Elastane",
        colors: &["Blue", "Red", "Green"],
        sizes: &["S", "M", "L", "XL"],
        blurb: "Breton stripes with a little stretch.",
    },
    SeedTee {
        name: "Retro Black",
        price: "27.99",
        category: "Frozen Vintage",
        gender: Gender::Unisex,
        materials: "100% Cotton",
        colors: &["Black", "Gray", "White"],
        sizes: &["S", "M", "L", "XL", "XXL"],
        blurb: "Garment-dyed black with a broken-in feel from day one.",
    },
    SeedTee {
        name: "Soft Touch Premium",
        price: "39.99",
        category: "Icy Luxe",
        gender: Gender::Men,
        materials: "60% Pima Cotton, 40% Modal",
        colors: &["Gray", "Black", "Navy", "Purple"],
        sizes: &["S", "M", "L", "XL", "XXL", "3XL"],
        blurb: "Pima and modal blend with a silky hand.",
    },
    SeedTee {
        name: "Urban Explorer",
        price: "36.99",
        category: "Arctic Streetwear",
        gender: Gender::Women,
        materials: "100% Heavyweight Cotton",
        colors: &["Black", "Gray", "Orange"],
        sizes: &["S", "M", "L", "XL"],
        blurb: "Boxy streetwear cut with a dropped shoulder.",
    },
    SeedTee {
        name: "Easy Blue",
        price: "29.99",
        category: "Chill Mode Classics",
        gender: Gender::Men,
        materials: "100% Cotton",
        colors: &["Blue", "Navy", "Light Blue"],
        sizes: &["S", "M", "L", "XL", "XXL"],
        blurb: "Everyday crew neck in three shades of blue.",
    },
    SeedTee {
        name: "Mountain Range",
        price: "34.99",
        category: "Glacier Graphics",
        gender: Gender::Unisex,
        materials: "50% Cotton, 50% Recycled Polyester",
        colors: &["Gray", "Green", "Brown"],
        sizes: &["S", "M", "L", "XL"],
        blurb: "Line-art peaks across the chest.",
    },
    SeedTee {
        name: "Minimalist Logo Tee",
        price: "32.99",
        category: "Frosty Fresh Tees",
        gender: Gender::Unisex,
        materials: "100% Organic Cotton",
        colors: &["White", "Black", "Gray", "Sand"],
        sizes: &["XS", "S", "M", "L", "XL", "XXL"],
        blurb: "Small embroidered logo, nothing else.",
    },
    SeedTee {
        name: "Heavyweight Box Tee",
        price: "37.99",
        category: "Arctic Streetwear",
        gender: Gender::Unisex,
        materials: "100% Heavyweight Cotton (240 GSM)",
        colors: &["Black", "White", "Charcoal", "Olive"],
        sizes: &["S", "M", "L", "XL", "XXL"],
        blurb: "Thick 240 GSM jersey that holds its shape.",
    },
    SeedTee {
        name: "Tech Performance Tee",
        price: "42.99",
        category: "Chill Mode Classics",
        gender: Gender::Unisex,
        materials: "88% Polyester, 12% Spandex",
        colors: &["Gray", "Black", "Navy", "Red"],
        sizes: &["S", "M", "L", "XL"],
        blurb: "Moisture-wicking knit for training days.",
    },
    SeedTee {
        name: "Abstract Art Tee",
        price: "38.99",
        category: "Glacier Graphics",
        gender: Gender::Unisex,
        materials: "100% Cotton",
        colors: &["White", "Black"],
        sizes: &["S", "M", "L", "XL"],
        blurb: "Full-front abstract print in two colorways.",
    },
    SeedTee {
        name: "Vintage Wash Tee",
        price: "28.99",
        category: "Frozen Vintage",
        gender: Gender::Unisex,
        materials: "100% Cotton",
        colors: &["Washed Black", "Washed Blue", "Washed Red"],
        sizes: &["S", "M", "L", "XL", "XXL"],
        blurb: "Acid-washed for a faded thrift-store look.",
    },
    SeedTee {
        name: "Embroidered Detail Tee",
        price: "36.99",
        category: "Icy Luxe",
        gender: Gender::Unisex,
        materials: "100% Supima Cotton",
        colors: &["White", "Black", "Beige"],
        sizes: &["S", "M", "L", "XL"],
        blurb: "Tonal embroidery on Supima cotton.",
    },
    SeedTee {
        name: "Sunset Gradient Tee",
        price: "31.99",
        category: "Glacier Graphics",
        gender: Gender::Unisex,
        materials: "100% Cotton",
        colors: &["Orange/Pink", "Blue/Purple"],
        sizes: &["S", "M", "L", "XL"],
        blurb: "Dip-dyed gradient, no two exactly alike.",
    },
    SeedTee {
        name: "Urban Skyline Tee",
        price: "33.99",
        category: "Glacier Graphics",
        gender: Gender::Unisex,
        materials: "100% Cotton",
        colors: &["Gray", "Black", "White"],
        sizes: &["S", "M", "L", "XL"],
        blurb: "City skyline silhouette printed across the back.",
    },
    SeedTee {
        name: "Cropped Relaxed Tee",
        price: "27.99",
        category: "Arctic Streetwear",
        gender: Gender::Women,
        materials: "100% Cotton",
        colors: &["White", "Black", "Pink", "Blue"],
        sizes: &["XS", "S", "M", "L"],
        blurb: "Cropped length with a relaxed body.",
    },
    SeedTee {
        name: "Winter Mountain Tee",
        price: "32.99",
        category: "Glacier Graphics",
        gender: Gender::Unisex,
        materials: "100% Organic Cotton",
        colors: &["Blue", "White", "Gray"],
        sizes: &["S", "M", "L", "XL", "XXL"],
        blurb: "Snowy peaks in a two-tone print.",
    },
];

fn slug(name: &str) -> String {
    name.to_ascii_lowercase().replace(' ', "-")
}

fn product_request(tee: &SeedTee) -> AppResult<CreateProductRequest> {
    let price = Decimal::from_str(tee.price).map_err(anyhow::Error::from)?;
    let image_url = format!("https://images.teeshop.dev/products/{}.jpg", slug(tee.name));
    Ok(CreateProductRequest {
        name: tee.name.to_string(),
        description: Some(tee.blurb.to_string()),
        price,
        category: tee.category.to_string(),
        images: Some(vec![
            image_url.clone(),
            format!("https://images.teeshop.dev/products/{}-back.jpg", slug(tee.name)),
        ]),
        image_url,
        materials: Some(tee.materials.to_string()),
        care_instructions: Some("Machine wash cold. Tumble dry low.".to_string()),
        in_stock: true,
        available_colors: tee.colors.iter().map(|c| c.to_string()).collect(),
        available_sizes: tee.sizes.iter().map(|s| s.to_string()).collect(),
        gender: tee.gender,
    })
}

/// Inserts the catalog. Creation times are staggered a minute apart so the
/// last entry is the newest.
pub fn seed_catalog(store: &Store) -> AppResult<usize> {
    let base = Utc::now() - Duration::minutes(CATALOG.len() as i64);
    for (offset, tee) in CATALOG.iter().enumerate() {
        store.create_product_at(product_request(tee)?, base + Duration::minutes(offset as i64))?;
    }
    Ok(CATALOG.len())
}

fn demo_address(
    name: &str,
    street: &str,
    city: &str,
    state: &str,
    zip: &str,
    phone: &str,
    is_default: bool,
) -> CreateAddressRequest {
    CreateAddressRequest {
        address_name: name.to_string(),
        is_default,
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        address: street.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        zip_code: zip.to_string(),
        country: "Testland".to_string(),
        phone: phone.to_string(),
    }
}

/// Creates the demo account and returns its id.
pub fn seed_demo_user(store: &Store) -> AppResult<i64> {
    let user = store.create_user(RegisterRequest {
        username: DEMO_USERNAME.to_string(),
        password: DEMO_PASSWORD.to_string(),
        email: Some("test@example.com".to_string()),
    })?;
    store.update_user(
        user.id,
        UpdateProfileRequest {
            name: Some("Test User".to_string()),
            email: None,
            phone: Some("555-123-4567".to_string()),
        },
    )?;

    let home = store.create_address(
        user.id,
        demo_address("Home", "123 Test Street", "Test City", "TS", "12345", "555-123-4567", true),
    )?;
    store.create_address(
        user.id,
        demo_address(
            "Work",
            "456 Office Building",
            "Business City",
            "BC",
            "67890",
            "555-987-6543",
            false,
        ),
    )?;

    store.create_payment_method(
        user.id,
        CreatePaymentMethodRequest {
            card_name: "Visa Card".to_string(),
            cardholder_name: "Test User".to_string(),
            card_number: "4234".to_string(),
            card_type: "visa".to_string(),
            expiry_month: "12".to_string(),
            expiry_year: "2027".to_string(),
            is_default: true,
        },
    )?;
    store.create_payment_method(
        user.id,
        CreatePaymentMethodRequest {
            card_name: "Master Card".to_string(),
            cardholder_name: "Test User".to_string(),
            card_number: "5678".to_string(),
            card_type: "mastercard".to_string(),
            expiry_month: "06".to_string(),
            expiry_year: "2028".to_string(),
            is_default: false,
        },
    )?;

    seed_demo_order(store, user.id, ShippingAddress::from(&home))?;
    Ok(user.id)
}

/// A delivered order from last week, built from the first two catalog
/// entries so the order history page has something to show.
fn seed_demo_order(
    store: &Store,
    user_id: i64,
    shipping_address: ShippingAddress,
) -> AppResult<()> {
    let page = store.list_products(&crate::store::ProductFilter {
        page: Some(1),
        page_size: Some(2),
        ..Default::default()
    })?;
    let items: Vec<CartItemInput> = page
        .products
        .iter()
        .zip([2u32, 1])
        .map(|(product, quantity)| CartItemInput {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity,
            size: product.available_sizes.get(1).cloned().unwrap_or_default(),
            color: product.available_colors.first().cloned().unwrap_or_default(),
            image_url: Some(product.image_url.clone()),
        })
        .collect();
    if items.is_empty() {
        return Ok(());
    }

    let placed = store.create_order_at(
        NewOrder {
            user_id: Some(user_id),
            shipping_address,
            billing_address: None,
            payment_method: "creditCard".to_string(),
            items,
        },
        Utc::now() - Duration::days(7),
    )?;
    store.update_order_status(placed.order.id, OrderStatus::Delivered)?;
    Ok(())
}

/// Full startup seed: catalog first, then the demo account.
pub fn seed_all(store: &Store) -> AppResult<()> {
    let products = seed_catalog(store)?;
    let user_id = seed_demo_user(store)?;
    tracing::info!(products, user_id, "seeded demo data");
    Ok(())
}
