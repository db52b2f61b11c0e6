//! # User Repository
//!
//! Database operations for user accounts.
//!
//! ## Registration
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  argon2 hash (no lock held)                                             │
//! │  BEGIN IMMEDIATE                                                        │
//! │   ├── username taken? ──► UniqueViolation { field: "username" }        │
//! │   ├── email taken?    ──► UniqueViolation { field: "email" }           │
//! │   └── INSERT (UNIQUE race ──► TransactionFailed, rolled back)          │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `password` column is read only by [`UserRepository::authenticate`];
//! every other query selects profile columns only.

use sqlx::SqlitePool;
use tracing::{debug, info};

use pantry_core::{Credentials, NewUser, Role, User};

use crate::error::{DbError, DbResult};
use crate::password::{hash_password, verify_password};
use crate::repository::begin_write;

/// A user row including the stored hash.
#[derive(sqlx::FromRow)]
struct CredentialRow {
    #[sqlx(flatten)]
    user: User,
    password: String,
}

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Lists every user, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, first_name, last_name, role
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    /// Gets a user by id.
    #[cfg(test)]
    pub(crate) async fn get_by_id(&self, id: i64) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, first_name, last_name, role
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Registers a new account with role `user`.
    ///
    /// ## Returns
    /// * `Ok(User)` - The created profile with its generated id
    /// * `Err(DbError::UniqueViolation)` - Username or email already taken
    /// * `Err(DbError::TransactionFailed)` - Another registration took the
    ///   username or email between the checks and the insert
    pub async fn create(&self, new_user: &NewUser) -> DbResult<User> {
        debug!(username = %new_user.username, "Registering user");

        let hash = hash_password(&new_user.password)?;
        let role = Role::User;

        let mut tx = begin_write(&self.pool).await?;

        let username_taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?1)")
                .bind(&new_user.username)
                .fetch_one(&mut *tx)
                .await?;
        if username_taken {
            return Err(DbError::duplicate("username", &new_user.username));
        }

        let email_taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)")
                .bind(&new_user.email)
                .fetch_one(&mut *tx)
                .await?;
        if email_taken {
            return Err(DbError::duplicate("email", &new_user.email));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password, email, first_name, last_name, role)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&new_user.username)
        .bind(hash)
        .bind(&new_user.email)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(role)
        .execute(&mut *tx)
        .await
        .map_err(|e| match DbError::from(e) {
            // Lost a race with a concurrent registration after the checks above
            DbError::UniqueViolation { field, .. } => {
                DbError::TransactionFailed(format!("{field} claimed concurrently"))
            }
            other => other,
        })?;

        tx.commit().await?;

        let user = User {
            id: result.last_insert_rowid(),
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            first_name: new_user.first_name.clone(),
            last_name: new_user.last_name.clone(),
            role,
        };

        info!(id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Checks credentials.
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - Username exists and the password matches
    /// * `Ok(None)` - Unknown username or wrong password
    pub async fn authenticate(&self, credentials: &Credentials) -> DbResult<Option<User>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, username, email, first_name, last_name, role, password
            FROM users
            WHERE username = ?1
            "#,
        )
        .bind(&credentials.username)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            debug!(username = %credentials.username, "Login for unknown username");
            return Ok(None);
        };

        if !verify_password(&credentials.password, &row.password) {
            debug!(username = %credentials.username, "Login with wrong password");
            return Ok(None);
        }

        Ok(Some(row.user))
    }

    /// Deletes a user by id. Their lists are left in place.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting user");

        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        info!(id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn alice() -> NewUser {
        NewUser {
            username: "alice".to_string(),
            password: "pw1".to_string(),
            email: "a@x.com".to_string(),
            first_name: "A".to_string(),
            last_name: "L".to_string(),
        }
    }

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_after_seeds_gets_id_3() {
        let db = db().await;
        let user = db.users().create(&alice()).await.unwrap();

        assert_eq!(user.id, 3);
        assert_eq!(user.role, Role::User);
        assert_eq!(db.users().get_by_id(3).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_duplicate_username_and_email() {
        let db = db().await;
        db.users().create(&alice()).await.unwrap();

        let mut same_name = alice();
        same_name.email = "other@x.com".to_string();
        match db.users().create(&same_name).await {
            Err(DbError::UniqueViolation { field, .. }) => assert_eq!(field, "username"),
            other => panic!("expected username conflict, got {other:?}"),
        }

        let mut same_email = alice();
        same_email.username = "alice2".to_string();
        match db.users().create(&same_email).await {
            Err(DbError::UniqueViolation { field, .. }) => assert_eq!(field, "email"),
            other => panic!("expected email conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_password_is_stored_hashed() {
        let db = db().await;
        db.users().create(&alice()).await.unwrap();

        let stored: String = sqlx::query_scalar("SELECT password FROM users WHERE username = 'alice'")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_ne!(stored, "pw1");
        assert!(verify_password("pw1", &stored));
    }

    #[tokio::test]
    async fn test_authenticate() {
        let db = db().await;
        let created = db.users().create(&alice()).await.unwrap();

        let ok = Credentials {
            username: "alice".to_string(),
            password: "pw1".to_string(),
        };
        assert_eq!(db.users().authenticate(&ok).await.unwrap(), Some(created));

        let wrong_password = Credentials {
            username: "alice".to_string(),
            password: "nope".to_string(),
        };
        assert_eq!(db.users().authenticate(&wrong_password).await.unwrap(), None);

        let unknown = Credentials {
            username: "bob".to_string(),
            password: "pw1".to_string(),
        };
        assert_eq!(db.users().authenticate(&unknown).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_seed_users_can_log_in() {
        let db = db().await;
        let admin = Credentials {
            username: "mvc".to_string(),
            password: "mvc".to_string(),
        };
        let user = db.users().authenticate(&admin).await.unwrap().unwrap();
        assert_eq!(user.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_delete() {
        let db = db().await;
        let user = db.users().create(&alice()).await.unwrap();

        db.users().delete(user.id).await.unwrap();
        assert!(db.users().list().await.unwrap().iter().all(|u| u.id != user.id));

        assert!(matches!(
            db.users().delete(user.id).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
