//! Sled User Repository

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::SledStore;
use crate::application::ports::{RepositoryError, UserRepositoryPort};
use crate::domain::account::User;

const USERS_KEY: &str = "bookverse_users";

pub struct SledUserRepository {
    store: SledStore,
    write_lock: Mutex<()>,
}

impl SledUserRepository {
    pub fn new(store: SledStore) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.store.get_json(USERS_KEY)?.unwrap_or_default())
    }
}

#[async_trait]
impl UserRepositoryPort for SledUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.load()?.into_iter().find(|u| u.email == email))
    }

    async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut users = self.load()?;
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::Duplicate(user.email.clone()));
        }
        users.push(user.clone());
        self.store.put_json(USERS_KEY, &users)
    }
}
