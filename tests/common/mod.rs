#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::RwLock;

use classroom_quiz_server::{
    config::Config,
    errors::{AppError, AppResult},
    models::domain::User,
    repositories::UserRepository,
};

/// Credential store backed by a map, keyed by userid.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.userid) {
            return Err(AppError::AlreadyExists(format!(
                "duplicate key userid '{}'",
                user.userid
            )));
        }
        users.insert(user.userid.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_userid(&self, userid: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(userid).cloned())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

pub fn test_config() -> Config {
    Config {
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "classroom-quiz-test".to_string(),
        users_collection: "logindata".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 0,
        relay_port: 0,
        jwt_secret: SecretString::from("integration_test_secret".to_string()),
        jwt_expiration_minutes: 30,
        environment: "test".to_string(),
    }
}
