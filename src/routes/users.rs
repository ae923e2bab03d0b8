use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::{
        addresses::{AddressList, CreateAddressRequest, UpdateAddressRequest},
        payment_methods::{
            CreatePaymentMethodRequest, PaymentMethodList, UpdatePaymentMethodRequest,
        },
        users::UpdateProfileRequest,
    },
    error::AppResult,
    middleware::auth::CurrentUser,
    models::{Address, PaymentMethod, PublicUser},
    response::ApiResponse,
    services::{address_service, payment_method_service, user_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).patch(update_profile))
        .route("/addresses", get(list_addresses).post(create_address))
        .route(
            "/addresses/{id}",
            get(get_address)
                .put(update_address)
                .patch(update_address)
                .delete(delete_address),
        )
        .route(
            "/payment-methods",
            get(list_payment_methods).post(create_payment_method),
        )
        .route(
            "/payment-methods/{id}",
            get(get_payment_method)
                .put(update_payment_method)
                .patch(update_payment_method)
                .delete(delete_payment_method),
        )
}

#[utoipa::path(
    get,
    path = "/api/users/profile",
    responses(
        (status = 200, description = "Profile of the current user", body = ApiResponse<PublicUser>),
        (status = 401, description = "Not authenticated")
    ),
    tag = "Users"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<PublicUser>>> {
    let resp = user_service::get_profile(&state, &user)?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/users/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ApiResponse<PublicUser>),
        (status = 400, description = "Bad request")
    ),
    tag = "Users"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<PublicUser>>> {
    let resp = user_service::update_profile(&state, &user, payload)?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/users/addresses",
    responses(
        (status = 200, description = "Saved addresses", body = ApiResponse<AddressList>)
    ),
    tag = "Addresses"
)]
pub async fn list_addresses(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<AddressList>>> {
    let resp = address_service::list_addresses(&state, &user)?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/users/addresses/{id}",
    params(
        ("id" = i64, Path, description = "Address ID")
    ),
    responses(
        (status = 200, description = "Get address", body = ApiResponse<Address>),
        (status = 403, description = "Address belongs to another user"),
        (status = 404, description = "Address not found")
    ),
    tag = "Addresses"
)]
pub async fn get_address(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Address>>> {
    let resp = address_service::get_address(&state, &user, id)?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/users/addresses",
    request_body = CreateAddressRequest,
    responses(
        (status = 201, description = "Create address", body = ApiResponse<Address>),
        (status = 400, description = "Bad request")
    ),
    tag = "Addresses"
)]
pub async fn create_address(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateAddressRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Address>>)> {
    let resp = address_service::create_address(&state, &user, payload)?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/api/users/addresses/{id}",
    params(
        ("id" = i64, Path, description = "Address ID")
    ),
    request_body = UpdateAddressRequest,
    responses(
        (status = 200, description = "Updated address", body = ApiResponse<Address>),
        (status = 403, description = "Address belongs to another user"),
        (status = 404, description = "Address not found")
    ),
    tag = "Addresses"
)]
pub async fn update_address(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAddressRequest>,
) -> AppResult<Json<ApiResponse<Address>>> {
    let resp = address_service::update_address(&state, &user, id, payload)?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/users/addresses/{id}",
    params(
        ("id" = i64, Path, description = "Address ID")
    ),
    responses(
        (status = 200, description = "Deleted address", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Address not found")
    ),
    tag = "Addresses"
)]
pub async fn delete_address(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = address_service::delete_address(&state, &user, id)?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/users/payment-methods",
    responses(
        (status = 200, description = "Saved payment methods", body = ApiResponse<PaymentMethodList>)
    ),
    tag = "Payment methods"
)]
pub async fn list_payment_methods(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<PaymentMethodList>>> {
    let resp = payment_method_service::list_payment_methods(&state, &user)?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/users/payment-methods/{id}",
    params(
        ("id" = i64, Path, description = "Payment method ID")
    ),
    responses(
        (status = 200, description = "Get payment method", body = ApiResponse<PaymentMethod>),
        (status = 403, description = "Payment method belongs to another user"),
        (status = 404, description = "Payment method not found")
    ),
    tag = "Payment methods"
)]
pub async fn get_payment_method(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<PaymentMethod>>> {
    let resp = payment_method_service::get_payment_method(&state, &user, id)?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/users/payment-methods",
    request_body = CreatePaymentMethodRequest,
    responses(
        (status = 201, description = "Create payment method", body = ApiResponse<PaymentMethod>),
        (status = 400, description = "Bad request")
    ),
    tag = "Payment methods"
)]
pub async fn create_payment_method(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreatePaymentMethodRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<PaymentMethod>>)> {
    let resp = payment_method_service::create_payment_method(&state, &user, payload)?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/api/users/payment-methods/{id}",
    params(
        ("id" = i64, Path, description = "Payment method ID")
    ),
    request_body = UpdatePaymentMethodRequest,
    responses(
        (status = 200, description = "Updated payment method", body = ApiResponse<PaymentMethod>),
        (status = 403, description = "Payment method belongs to another user"),
        (status = 404, description = "Payment method not found")
    ),
    tag = "Payment methods"
)]
pub async fn update_payment_method(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePaymentMethodRequest>,
) -> AppResult<Json<ApiResponse<PaymentMethod>>> {
    let resp = payment_method_service::update_payment_method(&state, &user, id, payload)?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/users/payment-methods/{id}",
    params(
        ("id" = i64, Path, description = "Payment method ID")
    ),
    responses(
        (status = 200, description = "Deleted payment method", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Payment method not found")
    ),
    tag = "Payment methods"
)]
pub async fn delete_payment_method(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = payment_method_service::delete_payment_method(&state, &user, id)?;
    Ok(Json(resp))
}
