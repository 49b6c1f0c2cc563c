use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::User,
        dto::{
            request::{LoginRequest, RegisterRequest, MISSING_CREDENTIALS},
            response::{MessageResponse, RegisterResponse},
        },
    },
    repositories::UserRepository,
};

pub const USER_EXISTS: &str = "USER ID already exists!";

/// Outcome of a credential check that reached the store.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Accepted(User),
    Rejected(String),
}

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<RegisterResponse> {
        let (userid, password, role) = request.into_parts()?;

        if self.repository.find_by_userid(&userid).await?.is_some() {
            return Err(AppError::AlreadyExists(USER_EXISTS.to_string()));
        }

        // The unique index still guards against a concurrent registration
        let user = self
            .repository
            .create(User::new(&userid, &password, role)?)
            .await
            .map_err(|e| match e {
                AppError::AlreadyExists(_) => AppError::AlreadyExists(USER_EXISTS.to_string()),
                other => other,
            })?;

        log::info!("Registered {} {}", user.role, user.userid);
        Ok(MessageResponse::new("User registered successfully!"))
    }

    /// Checks userid, role and password, in that order.
    pub async fn verify_credentials(&self, request: LoginRequest) -> AppResult<LoginOutcome> {
        let Some((userid, password, role)) = request.into_parts() else {
            return Ok(LoginOutcome::Rejected(MISSING_CREDENTIALS.to_string()));
        };

        let Some(user) = self.repository.find_by_userid(&userid).await? else {
            return Ok(LoginOutcome::Rejected("User does not exist".to_string()));
        };

        if user.role.as_str() != role {
            return Ok(LoginOutcome::Rejected(format!("User is not {}", role)));
        }

        if !user.check_password(&password) {
            return Ok(LoginOutcome::Rejected("Incorrect password".to_string()));
        }

        Ok(LoginOutcome::Accepted(user))
    }

    pub async fn get_user(&self, userid: &str) -> AppResult<User> {
        self.repository
            .find_by_userid(userid)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
