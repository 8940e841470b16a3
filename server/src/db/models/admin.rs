//! Admin User Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Admin user ID type
pub type AdminUserId = RecordId;

/// Back-office account. The storefront has no customer accounts; this table
/// only carries administrators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<AdminUserId>,
    pub username: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub role: String,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl AdminUser {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_round_trip() {
        let hash = AdminUser::hash_password("s3cret-pass").expect("hashing failed");
        let user = AdminUser {
            id: None,
            username: "admin".to_string(),
            hash_pass: hash,
            role: "admin".to_string(),
            is_active: true,
        };
        assert!(user.verify_password("s3cret-pass").unwrap());
        assert!(!user.verify_password("wrong-pass").unwrap());
    }
}
