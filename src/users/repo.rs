use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::db::Database;
use crate::users::repo_types::{NewUser, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Storage seam for user records. Reads only ever see active rows.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list_active(&self) -> Result<Vec<User>, StoreError>;
    /// Returns the generated identifier.
    async fn insert(&self, user: NewUser) -> Result<i64, StoreError>;
    /// Soft delete. Returns the number of rows that changed (0 or 1).
    async fn deactivate(&self, id: i64) -> Result<u64, StoreError>;
    async fn close(&self);
}

pub struct PgUserStore {
    db: Database,
}

impl PgUserStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list_active(&self) -> Result<Vec<User>, StoreError> {
        let pool = self.db.handle().await?;
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT usuario_id, nombre, email, telefono, fecha_registro, activo
            FROM usuarios
            WHERE activo = TRUE
            ORDER BY fecha_registro DESC
            "#,
        )
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    async fn insert(&self, user: NewUser) -> Result<i64, StoreError> {
        let pool = self.db.handle().await?;
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO usuarios (nombre, email, telefono)
            VALUES ($1, $2, $3)
            RETURNING usuario_id
            "#,
        )
        .bind(&user.nombre)
        .bind(&user.email)
        .bind(user.telefono.as_deref()) // None → NULL
        .fetch_one(pool)
        .await?;
        Ok(id)
    }

    async fn deactivate(&self, id: i64) -> Result<u64, StoreError> {
        let pool = self.db.handle().await?;
        let result = sqlx::query(
            r#"
            UPDATE usuarios
               SET activo = FALSE
             WHERE usuario_id = $1 AND activo = TRUE
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;
        debug!(id, rows = result.rows_affected(), "deactivate");
        Ok(result.rows_affected())
    }

    async fn close(&self) {
        self.db.close().await;
    }
}
