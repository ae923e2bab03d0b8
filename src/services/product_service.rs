use crate::{
    dto::products::{CreateProductRequest, ProductPage, UpdateProductRequest},
    error::{AppError, AppResult},
    models::Product,
    response::{ApiResponse, Meta},
    state::AppState,
    store::ProductFilter,
};

pub fn list_products(
    state: &AppState,
    filter: ProductFilter,
) -> AppResult<ApiResponse<ProductPage>> {
    let page = state.store.list_products(&filter)?;

    let meta = match (filter.page, filter.page_size) {
        (Some(number), Some(size)) => Meta::new(number as i64, size as i64, page.total as i64),
        _ => Meta::total(page.total),
    };
    Ok(ApiResponse::success("Products", page, Some(meta)))
}

pub fn get_product(state: &AppState, id: i64) -> AppResult<ApiResponse<Product>> {
    let product = state.store.get_product(id)?.ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Product", product, None))
}

pub fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    payload.validate()?;
    let product = state.store.create_product(payload)?;

    tracing::info!(product_id = product.id, name = %product.name, "product created");
    Ok(ApiResponse::success(
        "Product created",
        product,
        Some(Meta::empty()),
    ))
}

pub fn update_product(
    state: &AppState,
    id: i64,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    payload.validate()?;
    let product = state
        .store
        .update_product(id, payload)?
        .ok_or(AppError::NotFound)?;

    tracing::info!(product_id = product.id, "product updated");
    Ok(ApiResponse::success("Updated", product, Some(Meta::empty())))
}
