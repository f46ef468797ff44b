pub mod seed;

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::database::models::Role;

#[derive(Debug, Error)]
pub enum RoleStoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Persistence for the fixed set of authorization roles.
///
/// Written once at provisioning time with exclusive access to the roles
/// table; request handling never touches it.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Create the `(name, guard)` pair if absent. Idempotent.
    async fn ensure_role(&self, name: &str, guard: &str) -> Result<(), RoleStoreError>;

    /// Unconditional insert with no guard scoping. Not idempotent: calling it
    /// twice leaves two rows.
    async fn create_role(&self, name: &str) -> Result<(), RoleStoreError>;

    async fn roles(&self) -> Result<Vec<Role>, RoleStoreError>;
}

pub struct PgRoleStore {
    pool: PgPool,
}

impl PgRoleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleStore for PgRoleStore {
    async fn ensure_role(&self, name: &str, guard: &str) -> Result<(), RoleStoreError> {
        // Relies on the unique index over (name, guard_name)
        sqlx::query(
            "INSERT INTO roles (name, guard_name) VALUES ($1, $2) \
             ON CONFLICT (name, guard_name) DO NOTHING",
        )
        .bind(name)
        .bind(guard)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn create_role(&self, name: &str) -> Result<(), RoleStoreError> {
        sqlx::query("INSERT INTO roles (name) VALUES ($1)")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn roles(&self) -> Result<Vec<Role>, RoleStoreError> {
        let rows =
            sqlx::query_as::<_, Role>("SELECT id, name, guard_name FROM roles ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }
}

/// In-memory store backing the seeding tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryRoleStore {
    rows: std::sync::Mutex<Vec<(String, Option<String>)>>,
}

#[cfg(test)]
#[async_trait]
impl RoleStore for MemoryRoleStore {
    async fn ensure_role(&self, name: &str, guard: &str) -> Result<(), RoleStoreError> {
        let mut rows = self.rows.lock().unwrap();
        let exists = rows
            .iter()
            .any(|(n, g)| n == name && g.as_deref() == Some(guard));
        if !exists {
            rows.push((name.to_string(), Some(guard.to_string())));
        }
        Ok(())
    }

    async fn create_role(&self, name: &str) -> Result<(), RoleStoreError> {
        self.rows.lock().unwrap().push((name.to_string(), None));
        Ok(())
    }

    async fn roles(&self) -> Result<Vec<Role>, RoleStoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .enumerate()
            .map(|(i, (name, guard))| Role {
                id: i as i64 + 1,
                name: name.clone(),
                guard_name: guard.clone(),
            })
            .collect())
    }
}
