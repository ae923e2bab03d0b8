use crate::{
    dto::auth::{LoginRequest, RegisterRequest},
    error::{AppError, AppResult},
    middleware::auth::CurrentUser,
    models::PublicUser,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<PublicUser>> {
    payload.validate()?;
    let user = state.store.create_user(payload)?;
    tracing::info!(user_id = user.id, username = %user.username, "user registered");
    Ok(ApiResponse::success("User created", user.into(), None))
}

/// Compares the stored password verbatim. Success does not open a session;
/// requests keep acting as the demo user.
pub fn login_user(state: &AppState, payload: LoginRequest) -> AppResult<ApiResponse<PublicUser>> {
    payload.validate()?;
    let user = state
        .store
        .get_user_by_username(&payload.username)?
        .filter(|user| user.password == payload.password)
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".into()))?;

    tracing::info!(user_id = user.id, "user logged in");
    Ok(ApiResponse::success(
        "Logged in",
        user.into(),
        Some(Meta::empty()),
    ))
}

pub fn logout_user() -> ApiResponse<serde_json::Value> {
    ApiResponse::success(
        "Logged out successfully",
        serde_json::json!({}),
        Some(Meta::empty()),
    )
}

pub fn current_user(state: &AppState, user: &CurrentUser) -> AppResult<ApiResponse<PublicUser>> {
    let user = state
        .store
        .get_user(user.user_id)?
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".into()))?;
    Ok(ApiResponse::success("Current user", user.into(), None))
}
