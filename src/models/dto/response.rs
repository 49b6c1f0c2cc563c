use serde::{Deserialize, Serialize};

use crate::models::domain::{Role, User};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserDto {
    pub userid: String,
    pub role: Role,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            userid: user.userid,
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type RegisterResponse = MessageResponse;

/// Result of `/check-user`. Credential failures are reported with
/// `exists: false` rather than an error status.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginResponse {
    pub exists: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl LoginResponse {
    pub fn success(user: &User, token: String) -> Self {
        Self {
            exists: true,
            message: "Login successful".to_string(),
            token: Some(token),
            userid: Some(user.userid.clone()),
            role: Some(user.role),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            exists: false,
            message: message.into(),
            token: None,
            userid: None,
            role: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardResponse {
    pub message: String,
    pub user: UserDto,
}
