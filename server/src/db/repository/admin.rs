//! Admin User Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::AdminUser;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct AdminRepository {
    base: BaseRepository,
}

impl AdminRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<AdminUser>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM admin_user WHERE username = $username LIMIT 1")
            .bind(("username", username.to_string()))
            .await?;
        let users: Vec<AdminUser> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Seed the default administrator on first startup. A no-op when the
    /// username already exists.
    pub async fn seed_default_admin(&self, username: &str, password: &str) -> RepoResult<()> {
        if self.find_by_username(username).await?.is_some() {
            return Ok(());
        }

        let hash_pass = AdminUser::hash_password(password)
            .map_err(|e| RepoError::Database(format!("Password hashing failed: {e}")))?;

        // hash_pass is skip_serializing on the model, so the insert binds it
        // explicitly instead of going through .content()
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE admin_user SET
                    username = $username,
                    hash_pass = $hash_pass,
                    role = 'admin',
                    is_active = true
                RETURN AFTER"#,
            )
            .bind(("username", username.to_string()))
            .bind(("hash_pass", hash_pass))
            .await?;
        let created: Vec<AdminUser> = result.take(0)?;
        if created.is_empty() {
            return Err(RepoError::Database("Failed to seed admin user".to_string()));
        }
        tracing::info!("Seeded default admin user '{}'", username);
        Ok(())
    }
}
