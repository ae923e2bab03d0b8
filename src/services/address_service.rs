use crate::{
    dto::addresses::{AddressList, CreateAddressRequest, UpdateAddressRequest},
    error::{AppError, AppResult},
    middleware::auth::{CurrentUser, ensure_owner},
    models::Address,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn list_addresses(state: &AppState, user: &CurrentUser) -> AppResult<ApiResponse<AddressList>> {
    let items = state.store.list_addresses(user.user_id)?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Addresses", AddressList { items }, Some(meta)))
}

pub fn get_address(
    state: &AppState,
    user: &CurrentUser,
    id: i64,
) -> AppResult<ApiResponse<Address>> {
    let address = state.store.get_address(id)?.ok_or(AppError::NotFound)?;
    ensure_owner(user, address.user_id)?;
    Ok(ApiResponse::success("Address", address, None))
}

pub fn create_address(
    state: &AppState,
    user: &CurrentUser,
    payload: CreateAddressRequest,
) -> AppResult<ApiResponse<Address>> {
    payload.validate()?;
    let address = state.store.create_address(user.user_id, payload)?;

    tracing::info!(
        user_id = user.user_id,
        address_id = address.id,
        is_default = address.is_default,
        "address created"
    );
    Ok(ApiResponse::success(
        "Address created",
        address,
        Some(Meta::empty()),
    ))
}

pub fn update_address(
    state: &AppState,
    user: &CurrentUser,
    id: i64,
    payload: UpdateAddressRequest,
) -> AppResult<ApiResponse<Address>> {
    payload.validate()?;
    let address = state
        .store
        .update_address(id, user.user_id, payload)?
        .ok_or(AppError::NotFound)?;

    tracing::info!(
        user_id = user.user_id,
        address_id = address.id,
        is_default = address.is_default,
        "address updated"
    );
    Ok(ApiResponse::success("Updated", address, Some(Meta::empty())))
}

pub fn delete_address(
    state: &AppState,
    user: &CurrentUser,
    id: i64,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if !state.store.delete_address(id, user.user_id)? {
        return Err(AppError::NotFound);
    }

    tracing::info!(user_id = user.user_id, address_id = id, "address deleted");
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
