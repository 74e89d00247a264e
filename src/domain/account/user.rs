//! 用户实体

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::AccountError;

/// 已注册用户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    /// SHA-256 十六进制摘要
    pub password_hash: String,
}

impl User {
    /// 注册新用户（校验字段非空）
    pub fn register(name: &str, email: &str, password: &str) -> Result<Self, AccountError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AccountError::InvalidField("email"));
        }
        if password.is_empty() {
            return Err(AccountError::InvalidField("password"));
        }

        Ok(Self {
            name: name.trim().to_string(),
            email: email.to_string(),
            password_hash: hash_password(password),
        })
    }

    pub fn verify(&self, email: &str, password: &str) -> bool {
        self.email == email.trim() && self.password_hash == hash_password(password)
    }
}

/// 密码摘要
pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_verify() {
        let user = User::register(" Ada ", "ada@example.com", "secret").unwrap();
        assert_eq!(user.name, "Ada");
        assert_ne!(user.password_hash, "secret");
        assert!(user.verify("ada@example.com", "secret"));
        assert!(!user.verify("ada@example.com", "wrong"));
        assert!(!user.verify("bob@example.com", "secret"));
    }

    #[test]
    fn test_register_rejects_empty_fields() {
        assert_eq!(
            User::register("Ada", "  ", "secret"),
            Err(AccountError::InvalidField("email"))
        );
        assert_eq!(
            User::register("Ada", "ada@example.com", ""),
            Err(AccountError::InvalidField("password"))
        );
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
