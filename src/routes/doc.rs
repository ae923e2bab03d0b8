use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        addresses::{AddressList, CreateAddressRequest, UpdateAddressRequest},
        auth::{LoginRequest, RegisterRequest},
        cart::{CartQuote, CartQuoteRequest, QuoteLine},
        orders::{
            CartItemInput, CreateOrderRequest, OrderList, OrderWithItems, PaymentInfo,
            UpdateOrderStatusRequest,
        },
        payment_methods::{
            CreatePaymentMethodRequest, PaymentMethodList, UpdatePaymentMethodRequest,
        },
        products::{CreateProductRequest, ProductPage, UpdateProductRequest},
        users::UpdateProfileRequest,
    },
    models::{
        Address, Gender, Order, OrderItem, OrderStatus, PaymentMethod, Product, PublicUser,
        ShippingAddress,
    },
    pricing::OrderTotals,
    response::{ApiResponse, Meta},
    routes::{auth, cart, health, orders, products, users},
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Tee storefront API"),
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::logout,
        auth::me,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        cart::quote,
        users::get_profile,
        users::update_profile,
        users::list_addresses,
        users::get_address,
        users::create_address,
        users::update_address,
        users::delete_address,
        users::list_payment_methods,
        users::get_payment_method,
        users::create_payment_method,
        users::update_payment_method,
        users::delete_payment_method,
        orders::create_order,
        orders::list_orders,
        orders::recent_order,
        orders::get_order,
        orders::update_order_status
    ),
    components(
        schemas(
            PublicUser,
            Address,
            PaymentMethod,
            Product,
            Gender,
            Order,
            OrderItem,
            OrderStatus,
            ShippingAddress,
            OrderTotals,
            RegisterRequest,
            LoginRequest,
            UpdateProfileRequest,
            CreateAddressRequest,
            UpdateAddressRequest,
            AddressList,
            CreatePaymentMethodRequest,
            UpdatePaymentMethodRequest,
            PaymentMethodList,
            CreateProductRequest,
            UpdateProductRequest,
            ProductPage,
            QuoteLine,
            CartQuoteRequest,
            CartQuote,
            PaymentInfo,
            CartItemInput,
            CreateOrderRequest,
            UpdateOrderStatusRequest,
            OrderWithItems,
            OrderList,
            health::HealthData,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductPage>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration, login and the current session user"),
        (name = "Products", description = "Catalog browsing and product admin"),
        (name = "Cart", description = "Cart pricing"),
        (name = "Users", description = "Profile of the current user"),
        (name = "Addresses", description = "Saved shipping addresses"),
        (name = "Payment methods", description = "Saved cards"),
        (name = "Orders", description = "Checkout and order history"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
