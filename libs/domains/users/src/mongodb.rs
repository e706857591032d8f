//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use database::is_duplicate_key_error;
use mongodb::{Collection, Database, IndexModel, bson::doc, options::IndexOptions};
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::User;
use crate::repository::UserRepository;

pub const USERS_COLLECTION: &str = "users";

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<User>(USERS_COLLECTION),
        }
    }

    /// Create the unique email index. Safe to call on every startup.
    pub async fn init_indexes(&self) -> UserResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("idx_email_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("User indexes created successfully");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: User) -> UserResult<User> {
        self.collection.insert_one(&user).await.map_err(|e| {
            if is_duplicate_key_error(&e) {
                UserError::DuplicateEmail(user.email.clone())
            } else {
                UserError::Store(e.to_string())
            }
        })?;

        tracing::info!("User created successfully");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> UserResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "email": email })
            .limit(1)
            .await?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, SignupRequest};
    use testcontainers_modules::{mongo::Mongo, testcontainers::runners::AsyncRunner};

    fn user(email: &str) -> User {
        let input = SignupRequest {
            name: "Alan".to_string(),
            surname: "Turing".to_string(),
            age: 41,
            address: Address {
                city: "Wilmslow".to_string(),
                postal_code: "SK9".to_string(),
                street_number: "43".to_string(),
                street_name: "Adlington Road".to_string(),
            },
            email: email.to_string(),
            password: "unused".to_string(),
        };
        User::new(input, "hash".to_string(), false)
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_unique_index_maps_to_duplicate_email() {
        let container = Mongo::default().start().await.unwrap();
        let port = container.get_host_port_ipv4(27017).await.unwrap();
        let client = mongodb::Client::with_uri_str(format!("mongodb://127.0.0.1:{port}"))
            .await
            .unwrap();
        let repo = MongoUserRepository::new(&client.database("users_test"));
        repo.init_indexes().await.unwrap();

        repo.create(user("alan@bletchley.uk")).await.unwrap();
        let result = repo.create(user("alan@bletchley.uk")).await;

        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
        assert!(repo.email_exists("alan@bletchley.uk").await.unwrap());
        let found = repo.get_by_email("alan@bletchley.uk").await.unwrap().unwrap();
        assert_eq!(found.surname, "Turing");
    }
}
