use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{NewUser, UserProfile, UserRow, UserUpdate};

/// Account storage. Carried in `AppState` as `Arc<dyn UserRepository>`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<UserProfile, sqlx::Error>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, sqlx::Error>;

    async fn find_profile(&self, id: Uuid) -> Result<Option<UserProfile>, sqlx::Error>;

    /// True if `email` belongs to an account other than `id`.
    async fn email_taken_by_other(&self, email: &str, id: Uuid) -> Result<bool, sqlx::Error>;

    /// Returns the updated profile, or `None` if the account does not exist.
    async fn update(&self, id: Uuid, update: UserUpdate)
        -> Result<Option<UserProfile>, sqlx::Error>;

    /// Returns false if the account did not exist.
    async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error>;
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> Result<UserProfile, sqlx::Error> {
        sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO users (id, username, email, password_hash, account_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, account_type
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.account_type)
        .fetch_one(&self.pool)
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, sqlx::Error> {
        sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_profile(&self, id: Uuid) -> Result<Option<UserProfile>, sqlx::Error> {
        sqlx::query_as::<_, UserProfile>(
            "SELECT id, username, email, account_type FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn email_taken_by_other(&self, email: &str, id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE email = $1 AND id <> $2)",
        )
        .bind(email)
        .bind(id)
        .fetch_one(&self.pool)
        .await
    }

    async fn update(
        &self,
        id: Uuid,
        update: UserUpdate,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        sqlx::query_as::<_, UserProfile>(
            r#"
            UPDATE users
            SET username = $1,
                email = $2,
                password_hash = COALESCE($3, password_hash)
            WHERE id = $4
            RETURNING id, username, email, account_type
            "#,
        )
        .bind(&update.username)
        .bind(&update.email)
        .bind(&update.password_hash)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
pub mod memory {
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;

    /// Vec-backed repository for handler tests.
    #[derive(Default)]
    pub struct InMemoryUsers {
        rows: Mutex<Vec<UserRow>>,
    }

    #[async_trait]
    impl UserRepository for InMemoryUsers {
        async fn create(&self, user: NewUser) -> Result<UserProfile, sqlx::Error> {
            let row = UserRow {
                id: Uuid::new_v4(),
                username: user.username,
                email: user.email,
                password_hash: user.password_hash,
                account_type: user.account_type,
                created_at: Utc::now(),
            };
            self.rows.lock().unwrap().push(row.clone());
            Ok(row.into())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, sqlx::Error> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|u| u.email == email).cloned())
        }

        async fn find_profile(&self, id: Uuid) -> Result<Option<UserProfile>, sqlx::Error> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|u| u.id == id).cloned().map(Into::into))
        }

        async fn email_taken_by_other(&self, email: &str, id: Uuid) -> Result<bool, sqlx::Error> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().any(|u| u.email == email && u.id != id))
        }

        async fn update(
            &self,
            id: Uuid,
            update: UserUpdate,
        ) -> Result<Option<UserProfile>, sqlx::Error> {
            let mut rows = self.rows.lock().unwrap();
            let Some(row) = rows.iter_mut().find(|u| u.id == id) else {
                return Ok(None);
            };
            row.username = update.username;
            row.email = update.email;
            if let Some(hash) = update.password_hash {
                row.password_hash = hash;
            }
            Ok(Some(row.clone().into()))
        }

        async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|u| u.id != id);
            Ok(rows.len() < before)
        }
    }
}
