use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};
use std::time::Duration;

use crate::{config::Config, errors::AppResult, models::domain::User};

/// Handle on the quiz database. Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
    users_collection: String,
}

impl Database {
    /// Connects and pings the server so a bad connection string fails at startup.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let client = Client::with_options(client_options(config).await?)?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        log::info!(
            "Connected to MongoDB database '{}' (users in '{}')",
            config.mongo_db_name,
            config.users_collection
        );

        Ok(Self {
            client,
            db_name: config.mongo_db_name.clone(),
            users_collection: config.users_collection.clone(),
        })
    }

    /// Login records, one document per userid.
    pub fn users(&self) -> Collection<User> {
        self.client
            .database(&self.db_name)
            .collection(&self.users_collection)
    }
}

async fn client_options(config: &Config) -> AppResult<ClientOptions> {
    let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;

    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    options.max_pool_size = Some(10);
    options.min_pool_size = Some(2);
    options.connect_timeout = Some(Duration::from_secs(5));
    options.server_selection_timeout = Some(Duration::from_secs(5));

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<Database>();
    }

    #[tokio::test]
    async fn test_client_options_from_config() {
        let options = client_options(&Config::test_config()).await.unwrap();

        assert_eq!(options.app_name.as_deref(), Some("classroom-quiz-server"));
        assert_eq!(options.max_pool_size, Some(10));
        assert_eq!(options.min_pool_size, Some(2));
        assert_eq!(options.server_selection_timeout, Some(Duration::from_secs(5)));
        assert!(options.server_api.is_some());
    }

    #[tokio::test]
    async fn test_bad_connection_string_is_database_error() {
        let config = Config {
            mongo_conn_string: "not-a-mongo-uri".to_string(),
            ..Config::test_config()
        };
        assert!(matches!(
            client_options(&config).await,
            Err(crate::errors::AppError::DatabaseError(_))
        ));
    }
}
