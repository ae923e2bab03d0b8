use axum::{Json, Router, routing::post};

use crate::{
    dto::cart::{CartQuote, CartQuoteRequest},
    error::AppResult,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/quote", post(quote))
}

#[utoipa::path(
    post,
    path = "/api/cart/quote",
    request_body = CartQuoteRequest,
    responses(
        (status = 200, description = "Subtotal, shipping, tax and total for a cart", body = ApiResponse<CartQuote>),
        (status = 400, description = "Bad request")
    ),
    tag = "Cart"
)]
pub async fn quote(
    Json(payload): Json<CartQuoteRequest>,
) -> AppResult<Json<ApiResponse<CartQuote>>> {
    let resp = cart_service::quote_cart(payload)?;
    Ok(Json(resp))
}
