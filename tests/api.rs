use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

use tee_storefront_api::{
    config::AppConfig, routes::create_app, seed::seed_all, state::AppState, store::Store,
};

fn make_server() -> TestServer {
    let store = Store::new();
    seed_all(&store).unwrap();
    TestServer::new(create_app(AppState::new(store, &AppConfig::default())))
}

#[tokio::test]
async fn lists_second_page_of_products() {
    let server = make_server();

    let response = server.get("/api/products?page=2&pageSize=9").await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["data"]["total"], 18);
    assert_eq!(body["data"]["products"].as_array().map(Vec::len), Some(9));
    assert_eq!(body["meta"]["page"], 2);
}

#[tokio::test]
async fn price_sort_is_ascending() {
    let server = make_server();

    let response = server.get("/api/products?sort=price_asc").await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    let prices: Vec<f64> = body["data"]["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["price"].as_str().unwrap().parse().unwrap())
        .collect();
    assert!(prices.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[tokio::test]
async fn zero_page_is_a_bad_request() {
    let server = make_server();

    let response = server.get("/api/products?page=0&pageSize=9").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["data"]["error"].as_str().is_some());
}

#[tokio::test]
async fn quote_uses_checkout_pricing() {
    let server = make_server();

    let response = server
        .post("/api/cart/quote")
        .json(&json!({
            "cartItems": [
                { "price": "29.99", "quantity": 2 },
                { "price": "34.99", "quantity": 1 }
            ]
        }))
        .await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["data"]["subtotal"], "94.97");
    assert_eq!(body["data"]["tax"], "7.60");
    assert_eq!(body["data"]["shipping"], "5.99");
    assert_eq!(body["data"]["total"], "108.56");
    assert_eq!(body["data"]["itemCount"], 3);
}

#[tokio::test]
async fn creating_a_default_card_demotes_the_previous_one() {
    let server = make_server();

    let created = server
        .post("/api/users/payment-methods")
        .json(&json!({
            "cardName": "Travel card",
            "cardholderName": "Test User",
            "cardNumber": "4000-0000-0000-9876",
            "cardType": "visa",
            "expiryMonth": "03",
            "expiryYear": "2031",
            "isDefault": true
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let created: Value = created.json();
    assert_eq!(created["data"]["cardNumber"], "9876");

    let list: Value = server.get("/api/users/payment-methods").await.json();
    let defaults: Vec<&Value> = list["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|m| m["isDefault"] == true)
        .collect();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0]["id"], created["data"]["id"]);
}

#[tokio::test]
async fn missing_address_is_not_found() {
    let server = make_server();

    let response = server
        .patch("/api/users/addresses/999")
        .json(&json!({ "isDefault": true }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn places_an_order_and_fetches_it() {
    let server = make_server();

    let response = server
        .post("/api/orders")
        .json(&json!({
            "shippingInfo": {
                "firstName": "Test",
                "lastName": "User",
                "address": "123 Test Street",
                "city": "Test City",
                "state": "TS",
                "zipCode": "12345",
                "country": "Testland",
                "phone": "555-123-4567"
            },
            "paymentInfo": { "paymentMethod": "creditCard" },
            "cartItems": [
                {
                    "productId": 1, "name": "Tee", "price": 29.99,
                    "quantity": 2, "size": "M", "color": "Black"
                },
                {
                    "productId": 2, "name": "Other tee", "price": "34.99",
                    "quantity": 1, "size": "L", "color": "White"
                }
            ]
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["data"]["order"]["total"], "108.56");
    assert_eq!(body["data"]["order"]["status"], "processing");
    let id = body["data"]["order"]["id"].as_i64().unwrap();

    let fetched = server.get(&format!("/api/orders/{id}")).await;
    fetched.assert_status(StatusCode::OK);
    let fetched: Value = fetched.json();
    assert_eq!(fetched["data"]["items"].as_array().map(Vec::len), Some(2));

    let recent: Value = server.get("/api/orders/recent").await.json();
    assert_eq!(recent["data"]["order"]["id"], id);
}

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let server = make_server();

    let response = server.get("/api/nope").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["data"]["path"], "/api/nope");
}

#[tokio::test]
async fn oversized_prices_are_rejected_by_quote_and_checkout() {
    let server = make_server();

    let quote = server
        .post("/api/cart/quote")
        .json(&json!({
            "cartItems": [{ "price": "79228162514264337593543950335", "quantity": 2 }]
        }))
        .await;
    quote.assert_status(StatusCode::BAD_REQUEST);

    let too_many = server
        .post("/api/cart/quote")
        .json(&json!({ "cartItems": [{ "price": "10.00", "quantity": 5000 }] }))
        .await;
    too_many.assert_status(StatusCode::BAD_REQUEST);

    let order = server
        .post("/api/orders")
        .json(&json!({
            "shippingInfo": {
                "firstName": "Test",
                "lastName": "User",
                "address": "123 Test Street",
                "city": "Test City",
                "state": "TS",
                "zipCode": "12345",
                "country": "Testland",
                "phone": "555-123-4567"
            },
            "paymentInfo": { "paymentMethod": "creditCard" },
            "cartItems": [{
                "productId": 1, "name": "Tee", "price": "79228162514264337593543950335",
                "quantity": 2, "size": "M", "color": "Black"
            }]
        }))
        .await;
    order.assert_status(StatusCode::BAD_REQUEST);

    let history: Value = server.get("/api/orders").await.json();
    assert_eq!(history["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn product_prices_serialize_with_two_decimals() {
    let server = make_server();

    for (sent, stored) in [("30", "30.00"), ("29.990", "29.99")] {
        let response = server
            .post("/api/products")
            .json(&json!({
                "name": format!("Plain tee {sent}"),
                "price": sent,
                "category": "Basics",
                "imageUrl": "https://images.teeshop.dev/products/plain.jpg"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["price"], stored);
    }
}
