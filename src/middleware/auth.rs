use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{error::AppError, state::AppState};

/// The account a request acts as. There are no real sessions: every request
/// resolves to the configured demo username.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i64,
    pub username: String,
}

/// Ownership check for records that belong to a single user.
pub fn ensure_owner(user: &CurrentUser, owner_id: i64) -> Result<(), AppError> {
    if user.user_id != owner_id {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_session(state)
    }
}

pub fn resolve_session(state: &AppState) -> Result<CurrentUser, AppError> {
    let user = state
        .store
        .get_user_by_username(&state.session_username)?
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".into()))?;
    Ok(CurrentUser {
        user_id: user.id,
        username: user.username,
    })
}
