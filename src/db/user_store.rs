use crate::{
    auth::password,
    db::DbPool,
    error::{AppError, Result},
    models::user::{Role, User},
};

/// User store for database operations
#[derive(Clone)]
pub struct UserStore {
    pool: DbPool,
}

impl UserStore {
    /// Create a new UserStore with the provided database pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a list of all users
    pub async fn get_all_users(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(users)
    }

    /// Get a user by username
    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(user)
    }

    /// Check a username/password pair. `None` covers both an unknown user and a wrong password.
    pub async fn authenticate(&self, username: &str, plain: &str) -> Result<Option<User>> {
        let Some(user) = self.get_user_by_username(username).await? else {
            return Ok(None);
        };

        if password::verify_password(plain, &user.password_hash) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    /// Create a user, hashing the password before storage
    pub async fn create_user(&self, username: &str, plain: &str, role: Role) -> Result<i64> {
        let hash = password::hash_password(plain)?;

        let result = sqlx::query("INSERT INTO users (username, password_hash, role) VALUES (?, ?, ?)")
            .bind(username)
            .bind(hash)
            .bind(role)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_insert(e, format!("user '{}'", username)))?;

        Ok(result.last_insert_rowid())
    }
}
