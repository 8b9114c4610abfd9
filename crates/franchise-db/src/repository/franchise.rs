//! # Franchise Gateway
//!
//! SQLite implementation of [`FranchiseGateway`].
//!
//! Rows are read without their branches. The use cases attach children
//! through the branch and product gateways.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use franchise_core::gateway::{FranchiseGateway, GatewayResult};
use franchise_core::{EntityId, Franchise};

use crate::error::DbError;

/// Franchise rows in the `franchises` table.
///
/// ## Usage
/// ```rust,ignore
/// let gateway = SqliteFranchiseGateway::new(pool);
/// let saved = gateway.save(&Franchise::new("Acme")).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SqliteFranchiseGateway {
    pool: SqlitePool,
}

impl SqliteFranchiseGateway {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteFranchiseGateway { pool }
    }
}

#[async_trait]
impl FranchiseGateway for SqliteFranchiseGateway {
    async fn save(&self, franchise: &Franchise) -> GatewayResult<Franchise> {
        let saved = sqlx::query_as::<_, Franchise>(
            "INSERT INTO franchises (name) VALUES (?1) RETURNING id, name",
        )
        .bind(&franchise.name)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from)?;

        debug!(franchise_id = ?saved.id, "Inserted franchise");
        Ok(saved)
    }

    async fn find_by_id(&self, id: EntityId) -> GatewayResult<Option<Franchise>> {
        let franchise =
            sqlx::query_as::<_, Franchise>("SELECT id, name FROM franchises WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(DbError::from)?;

        Ok(franchise)
    }

    async fn find_all(&self) -> GatewayResult<Vec<Franchise>> {
        let franchises = sqlx::query_as::<_, Franchise>("SELECT id, name FROM franchises ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::from)?;

        Ok(franchises)
    }

    async fn update(&self, franchise: &Franchise) -> GatewayResult<Franchise> {
        let id = franchise
            .id
            .ok_or_else(|| DbError::not_found("franchise", None))?;

        let updated = sqlx::query_as::<_, Franchise>(
            r#"
            UPDATE franchises
            SET name = ?1, updated_at = ?2
            WHERE id = ?3
            RETURNING id, name
            "#,
        )
        .bind(&franchise.name)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from)?
        .ok_or_else(|| DbError::not_found("franchise", Some(id)))?;

        Ok(updated)
    }

    async fn delete_by_id(&self, id: EntityId) -> GatewayResult<()> {
        sqlx::query("DELETE FROM franchises WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn exists_by_id(&self, id: EntityId) -> GatewayResult<bool> {
        let exists: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM franchises WHERE id = ?1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(DbError::from)?;

        Ok(exists != 0)
    }
}
