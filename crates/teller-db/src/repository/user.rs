//! # User Repository
//!
//! Registration and login for inventory operators. Passwords are stored as
//! salted Argon2 hashes (`SecretHash`), never as plaintext.

use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use teller_core::validation::{validate_password, validate_username};
use teller_core::{SecretHash, User};

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Registers a new user.
    ///
    /// ## Returns
    /// * `Ok(User)` - Registered user
    /// * `Err(DbError::UniqueViolation)` - Username already taken
    /// * `Err(DbError::Core)` - Username or password failed validation
    pub async fn register(&self, username: &str, password: &str) -> DbResult<User> {
        validate_username(username)?;
        validate_password(password)?;

        let hash = SecretHash::new(password)?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES (?1, ?2)
            "#,
        )
        .bind(username)
        .bind(hash.as_phc())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                DbError::duplicate("username", username)
            }
            other => DbError::from(other),
        })?;

        info!(username = %username, "Registered user");

        Ok(User {
            id: result.last_insert_rowid(),
            username: username.to_string(),
            password_hash: hash.as_phc().to_string(),
        })
    }

    /// Returns the user iff `username` exists and `password` verifies.
    ///
    /// Unknown users and wrong passwords both yield `Ok(None)`.
    pub async fn authenticate(&self, username: &str, password: &str) -> DbResult<Option<User>> {
        let Some(user) = self.get_by_username(username).await? else {
            debug!(username = %username, "Login for unknown user");
            return Ok(None);
        };

        let hash = match SecretHash::from_phc(user.password_hash.as_str()) {
            Ok(hash) => hash,
            Err(e) => {
                warn!(username = %username, error = %e, "Stored password hash is unreadable");
                return Ok(None);
            }
        };

        if hash.verify(password) {
            Ok(Some(user))
        } else {
            debug!(username = %username, "Login with wrong password");
            Ok(None)
        }
    }

    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let db = db().await;
        let users = db.users();

        let alice = users.register("alice", "s3cret").await.unwrap();
        assert!(alice.password_hash.starts_with("$argon2"));
        assert!(!alice.password_hash.contains("s3cret"));

        let logged_in = users.authenticate("alice", "s3cret").await.unwrap();
        assert_eq!(logged_in.map(|u| u.id), Some(alice.id));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_fail() {
        let db = db().await;
        let users = db.users();
        users.register("alice", "s3cret").await.unwrap();

        assert_eq!(users.authenticate("alice", "S3cret").await.unwrap(), None);
        assert_eq!(users.authenticate("alice", "").await.unwrap(), None);
        assert_eq!(users.authenticate("bob", "s3cret").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let db = db().await;
        let users = db.users();
        users.register("alice", "first").await.unwrap();

        match users.register("alice", "second").await {
            Err(DbError::UniqueViolation { field, value }) => {
                assert_eq!(field, "username");
                assert_eq!(value, "alice");
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }

        assert_eq!(users.count().await.unwrap(), 1);
        // First registration is kept
        assert!(users.authenticate("alice", "first").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_register_validates_input() {
        let db = db().await;
        let users = db.users();

        assert!(matches!(
            users.register("al", "long enough").await,
            Err(DbError::Core(_))
        ));
        assert!(matches!(
            users.register("alice", "abc").await,
            Err(DbError::Core(_))
        ));
        assert_eq!(users.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_stored_hash_denies_login() {
        let db = db().await;
        sqlx::query("INSERT INTO users (username, password_hash) VALUES ('legacy', 'abc123')")
            .execute(db.pool())
            .await
            .unwrap();

        assert_eq!(db.users().authenticate("legacy", "abc123").await.unwrap(), None);
    }
}
