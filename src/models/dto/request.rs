use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::Role;

pub const MISSING_CREDENTIALS: &str = "Missing userid, password, or role";

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(required, length(min = 1))]
    pub userid: Option<String>,

    #[validate(required, length(min = 1))]
    pub password: Option<String>,

    #[validate(required, length(min = 1))]
    pub role: Option<String>,
}

impl RegisterRequest {
    /// Checks that every field is present and the role is known.
    pub fn into_parts(self) -> AppResult<(String, String, Role)> {
        self.validate()
            .map_err(|_| AppError::ValidationError(MISSING_CREDENTIALS.to_string()))?;

        let (Some(userid), Some(password), Some(role)) = (self.userid, self.password, self.role)
        else {
            return Err(AppError::ValidationError(MISSING_CREDENTIALS.to_string()));
        };

        Ok((userid, password, role.parse()?))
    }
}

/// Login form as posted by the frontend; the password field is `pswd`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(required, length(min = 1))]
    pub userid: Option<String>,

    #[validate(required, length(min = 1))]
    pub pswd: Option<String>,

    #[validate(required, length(min = 1))]
    pub role: Option<String>,
}

impl LoginRequest {
    /// Returns `None` when any field is missing or empty.
    pub fn into_parts(self) -> Option<(String, String, String)> {
        self.validate().ok()?;
        Some((self.userid?, self.pswd?, self.role?))
    }
}
