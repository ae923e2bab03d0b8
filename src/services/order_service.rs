use crate::{
    dto::orders::{CreateOrderRequest, OrderList, OrderWithItems, UpdateOrderStatusRequest},
    error::{AppError, AppResult},
    middleware::auth::{CurrentUser, ensure_owner},
    models::Order,
    response::{ApiResponse, Meta},
    state::AppState,
    store::NewOrder,
};

pub fn create_order(
    state: &AppState,
    user: &CurrentUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    payload.validate()?;

    let created = state.store.create_order(NewOrder {
        user_id: Some(user.user_id),
        shipping_address: payload.shipping_info,
        billing_address: payload.billing_info,
        payment_method: payload.payment_info.payment_method,
        items: payload.cart_items,
    })?;

    tracing::info!(
        user_id = user.user_id,
        order_id = created.order.id,
        order_number = %created.order.order_number,
        total = %created.order.total,
        "order placed"
    );
    Ok(ApiResponse::success(
        "Order created",
        created,
        Some(Meta::empty()),
    ))
}

/// The caller's orders, newest first.
pub fn list_orders(state: &AppState, user: &CurrentUser) -> AppResult<ApiResponse<OrderList>> {
    let mut orders = state.store.list_orders(Some(user.user_id))?;
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

    let mut items = Vec::with_capacity(orders.len());
    for order in orders {
        let order_items = state.store.get_order_items(order.id)?;
        items.push(OrderWithItems {
            order,
            items: order_items,
        });
    }

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub fn get_order(
    state: &AppState,
    user: &CurrentUser,
    id: i64,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let found = state
        .store
        .get_order_with_items(id)?
        .ok_or(AppError::NotFound)?;
    if let Some(owner_id) = found.order.user_id {
        ensure_owner(user, owner_id)?;
    }
    Ok(ApiResponse::success("Order", found, None))
}

pub fn get_recent_order(
    state: &AppState,
    user: &CurrentUser,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let recent = state
        .store
        .get_most_recent_order(Some(user.user_id))?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Most recent order", recent, None))
}

pub fn update_order_status(
    state: &AppState,
    id: i64,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    let order = state
        .store
        .update_order_status(id, payload.status)?
        .ok_or(AppError::NotFound)?;

    tracing::info!(
        order_id = order.id,
        status = order.status.as_str(),
        "order status updated"
    );
    Ok(ApiResponse::success("Updated", order, Some(Meta::empty())))
}
