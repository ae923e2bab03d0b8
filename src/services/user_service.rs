use crate::{
    dto::users::UpdateProfileRequest,
    error::{AppError, AppResult},
    middleware::auth::CurrentUser,
    models::PublicUser,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn get_profile(state: &AppState, user: &CurrentUser) -> AppResult<ApiResponse<PublicUser>> {
    let profile = state
        .store
        .get_user(user.user_id)?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Profile", profile.into(), None))
}

pub fn update_profile(
    state: &AppState,
    user: &CurrentUser,
    payload: UpdateProfileRequest,
) -> AppResult<ApiResponse<PublicUser>> {
    payload.validate()?;
    let profile = state
        .store
        .update_user(user.user_id, payload)?
        .ok_or(AppError::NotFound)?;

    tracing::info!(user_id = profile.id, "profile updated");
    Ok(ApiResponse::success(
        "Profile updated",
        profile.into(),
        Some(Meta::empty()),
    ))
}
