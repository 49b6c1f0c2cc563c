use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    relay::RelayHandle,
    repositories::{MongoUserRepository, UserRepository},
    services::UserService,
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub jwt_service: JwtService,
    pub relay: RelayHandle,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config, relay: RelayHandle) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        Ok(Self::with_repository(config, user_repository, relay))
    }

    /// Builds the state around any credential store.
    pub fn with_repository(
        config: Config,
        user_repository: Arc<dyn UserRepository>,
        relay: RelayHandle,
    ) -> Self {
        let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expiration_minutes);

        Self {
            user_service: Arc::new(UserService::new(user_repository)),
            jwt_service,
            relay,
            config: Arc::new(config),
        }
    }
}
