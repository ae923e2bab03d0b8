use crate::{
    dto::cart::{CartQuote, CartQuoteRequest},
    error::AppResult,
    pricing::OrderTotals,
    response::{ApiResponse, Meta},
};

/// Prices a client-held cart with the same rules checkout uses.
pub fn quote_cart(payload: CartQuoteRequest) -> AppResult<ApiResponse<CartQuote>> {
    payload.validate()?;

    let item_count = payload
        .cart_items
        .iter()
        .map(|line| line.quantity)
        .fold(0u32, u32::saturating_add);
    let totals = OrderTotals::from_lines(
        payload
            .cart_items
            .into_iter()
            .map(|line| (line.price, line.quantity)),
    )?;

    Ok(ApiResponse::success(
        "Cart quote",
        CartQuote { totals, item_count },
        Some(Meta::empty()),
    ))
}
