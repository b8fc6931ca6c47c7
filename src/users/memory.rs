//! In-process `UserStore` used by the handler and router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;

use super::repo::{StoreError, UserStore};
use super::repo_types::{NewUser, User};

#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    /// Every row including inactive ones, in insertion order.
    pub fn all_rows(&self) -> Vec<User> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list_active(&self) -> Result<Vec<User>, StoreError> {
        let mut active: Vec<User> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.activo)
            .cloned()
            .collect();
        // newest first; ties broken by id so later inserts still come first
        active.sort_by(|a, b| {
            b.fecha_registro
                .cmp(&a.fecha_registro)
                .then(b.usuario_id.cmp(&a.usuario_id))
        });
        Ok(active)
    }

    async fn insert(&self, user: NewUser) -> Result<i64, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i64 + 1;
        rows.push(User {
            usuario_id: id,
            nombre: user.nombre,
            email: user.email,
            telefono: user.telefono,
            fecha_registro: OffsetDateTime::now_utc(),
            activo: true,
        });
        Ok(id)
    }

    async fn deactivate(&self, id: i64) -> Result<u64, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|u| u.usuario_id == id && u.activo) {
            Some(user) => {
                user.activo = false;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn close(&self) {}
}

/// Store whose every query fails the way an unreachable database does.
pub struct FailingUserStore;

#[async_trait]
impl UserStore for FailingUserStore {
    async fn list_active(&self) -> Result<Vec<User>, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn insert(&self, _user: NewUser) -> Result<i64, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn deactivate(&self, _id: i64) -> Result<u64, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn close(&self) {}
}
