use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    dto::require,
    error::{AppError, AppResult},
};

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> AppResult<()> {
        require("username", &self.username)?;
        require("password", &self.password)?;
        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            if !email.contains('@') {
                return Err(AppError::BadRequest("email is invalid".into()));
            }
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(AppError::BadRequest(
                "Username and password are required".into(),
            ));
        }
        Ok(())
    }
}
