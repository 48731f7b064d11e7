use axum::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::ApiError;
use crate::users::repo_types::{ProfilePatch, User};

const DUPLICATE_PHONE: &str = "phone already registered";

/// Store operations the handlers depend on. Postgres in production,
/// in-memory fakes in tests.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(
        &self,
        id: Uuid,
        phone: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<(), ApiError>;

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, ApiError>;

    async fn increment_login_counter(&self, phone: &str) -> Result<(), ApiError>;

    async fn update_by_phone(&self, patch: &ProfilePatch, phone: &str) -> Result<(), ApiError>;
}

pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    /// Persist a new account. A duplicate phone surfaces as a conflict.
    async fn insert(
        &self,
        id: Uuid,
        phone: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<(), ApiError> {
        let mut tx = self.db.begin().await?;
        sqlx::query(
            r#"
            INSERT INTO users (id, phone, name, password_hash)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(phone)
        .bind(name)
        .bind(password_hash)
        .execute(&mut *tx)
        .await
        .map_err(|e| ApiError::conflict_on_unique(e, DUPLICATE_PHONE))?;
        tx.commit().await?;
        Ok(())
    }

    /// Find an account by phone number.
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, phone, name, password_hash, success_login, created_at, updated_at
            FROM users
            WHERE phone = $1
            "#,
        )
        .bind(phone)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    /// Bump the success-login counter and refresh `updated_at`.
    async fn increment_login_counter(&self, phone: &str) -> Result<(), ApiError> {
        let mut tx = self.db.begin().await?;
        let res = sqlx::query(
            r#"
            UPDATE users
            SET success_login = success_login + 1,
                updated_at = now()
            WHERE phone = $1
            "#,
        )
        .bind(phone)
        .execute(&mut *tx)
        .await?;
        if res.rows_affected() < 1 {
            return Err(ApiError::Internal(anyhow::anyhow!("login tracking failed")));
        }
        tx.commit().await?;
        Ok(())
    }

    /// Apply a partial update to the account owning `phone`, writing only
    /// the patch's columns plus a refreshed `updated_at`.
    async fn update_by_phone(&self, patch: &ProfilePatch, phone: &str) -> Result<(), ApiError> {
        let mut tx = self.db.begin().await?;

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE users SET ");
        let mut cols = qb.separated(", ");
        for (column, value) in patch.fields() {
            cols.push(column)
                .push_unseparated(" = ")
                .push_bind_unseparated(value.to_string());
        }
        cols.push("updated_at = now()");
        qb.push(" WHERE phone = ").push_bind(phone);

        let res = qb
            .build()
            .execute(&mut *tx)
            .await
            .map_err(|e| ApiError::conflict_on_unique(e, DUPLICATE_PHONE))?;
        if res.rows_affected() < 1 {
            return Err(ApiError::Internal(anyhow::anyhow!(
                "no matching account to update"
            )));
        }
        tx.commit().await?;
        Ok(())
    }
}
