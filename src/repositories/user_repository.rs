use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

#[cfg(test)]
use mockall::automock;

use crate::{db::Database, errors::AppResult, models::domain::User};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user. Fails with `AlreadyExists` if the userid is taken.
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_userid(&self, userid: &str) -> AppResult<Option<User>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.users(),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let result = self.collection.insert_one(&user).await?;
        Ok(User {
            id: result.inserted_id.as_object_id(),
            ..user
        })
    }

    async fn find_by_userid(&self, userid: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "userid": userid }).await?;
        Ok(user)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let options = IndexOptions::builder().unique(true).build();
        let model = IndexModel::builder()
            .keys(doc! { "userid": 1 })
            .options(options)
            .build();

        self.collection.create_index(model).await?;
        log::info!("Ensured unique index on userid field");

        Ok(())
    }
}
