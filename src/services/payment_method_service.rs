use crate::{
    dto::payment_methods::{
        CreatePaymentMethodRequest, PaymentMethodList, UpdatePaymentMethodRequest,
    },
    error::{AppError, AppResult},
    middleware::auth::{CurrentUser, ensure_owner},
    models::PaymentMethod,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn list_payment_methods(
    state: &AppState,
    user: &CurrentUser,
) -> AppResult<ApiResponse<PaymentMethodList>> {
    let items = state.store.list_payment_methods(user.user_id)?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Payment methods",
        PaymentMethodList { items },
        Some(meta),
    ))
}

pub fn get_payment_method(
    state: &AppState,
    user: &CurrentUser,
    id: i64,
) -> AppResult<ApiResponse<PaymentMethod>> {
    let method = state
        .store
        .get_payment_method(id)?
        .ok_or(AppError::NotFound)?;
    ensure_owner(user, method.user_id)?;
    Ok(ApiResponse::success("Payment method", method, None))
}

pub fn create_payment_method(
    state: &AppState,
    user: &CurrentUser,
    payload: CreatePaymentMethodRequest,
) -> AppResult<ApiResponse<PaymentMethod>> {
    let payload = payload.normalize()?;
    let method = state.store.create_payment_method(user.user_id, payload)?;

    tracing::info!(
        user_id = user.user_id,
        payment_method_id = method.id,
        is_default = method.is_default,
        "payment method created"
    );
    Ok(ApiResponse::success(
        "Payment method created",
        method,
        Some(Meta::empty()),
    ))
}

pub fn update_payment_method(
    state: &AppState,
    user: &CurrentUser,
    id: i64,
    payload: UpdatePaymentMethodRequest,
) -> AppResult<ApiResponse<PaymentMethod>> {
    let payload = payload.normalize()?;
    let method = state
        .store
        .update_payment_method(id, user.user_id, payload)?
        .ok_or(AppError::NotFound)?;

    tracing::info!(
        user_id = user.user_id,
        payment_method_id = method.id,
        is_default = method.is_default,
        "payment method updated"
    );
    Ok(ApiResponse::success("Updated", method, Some(Meta::empty())))
}

pub fn delete_payment_method(
    state: &AppState,
    user: &CurrentUser,
    id: i64,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if !state.store.delete_payment_method(id, user.user_id)? {
        return Err(AppError::NotFound);
    }

    tracing::info!(
        user_id = user.user_id,
        payment_method_id = id,
        "payment method deleted"
    );
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
