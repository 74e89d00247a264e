//! Account Command Handlers

use std::sync::Arc;

use crate::application::commands::{Login, Register};
use crate::application::error::ApplicationError;
use crate::application::ports::{RepositoryError, UserRepositoryPort};
use crate::domain::account::{AccountError, User};

/// 登录/注册成功后返回的用户信息（不含密码摘要）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    pub name: String,
    pub email: String,
}

impl From<User> for AccountProfile {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            email: user.email,
        }
    }
}

/// Register Handler
pub struct RegisterHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl RegisterHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, command: Register) -> Result<AccountProfile, ApplicationError> {
        let user = User::register(&command.name, &command.email, &command.password)?;

        match self.user_repo.insert(&user).await {
            Ok(()) => {}
            Err(RepositoryError::Duplicate(_)) => return Err(AccountError::EmailTaken.into()),
            Err(e) => return Err(e.into()),
        }

        tracing::info!(email = %user.email, "Account registered");
        Ok(user.into())
    }
}

/// Login Handler
pub struct LoginHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl LoginHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, command: Login) -> Result<AccountProfile, ApplicationError> {
        let user = self
            .user_repo
            .find_by_email(command.email.trim())
            .await?
            .filter(|u| u.verify(&command.email, &command.password));

        match user {
            Some(user) => {
                tracing::info!(email = %user.email, "Account logged in");
                Ok(user.into())
            }
            None => {
                tracing::warn!(email = %command.email, "Login rejected");
                Err(AccountError::InvalidCredentials.into())
            }
        }
    }
}
