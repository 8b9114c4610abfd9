//! # Branch Gateway
//!
//! SQLite implementation of [`BranchGateway`].

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use franchise_core::gateway::{BranchGateway, GatewayResult};
use franchise_core::{Branch, EntityId};

use crate::error::DbError;

/// Branch rows in the `branches` table.
///
/// `franchise_id` is written once on insert. `update` only touches the name.
#[derive(Debug, Clone)]
pub struct SqliteBranchGateway {
    pool: SqlitePool,
}

impl SqliteBranchGateway {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteBranchGateway { pool }
    }
}

#[async_trait]
impl BranchGateway for SqliteBranchGateway {
    async fn save(&self, branch: &Branch) -> GatewayResult<Branch> {
        let saved = sqlx::query_as::<_, Branch>(
            r#"
            INSERT INTO branches (name, franchise_id)
            VALUES (?1, ?2)
            RETURNING id, name, franchise_id
            "#,
        )
        .bind(&branch.name)
        .bind(branch.franchise_id)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from)?;

        debug!(branch_id = ?saved.id, franchise_id = ?saved.franchise_id, "Inserted branch");
        Ok(saved)
    }

    async fn find_by_id(&self, id: EntityId) -> GatewayResult<Option<Branch>> {
        let branch = sqlx::query_as::<_, Branch>(
            "SELECT id, name, franchise_id FROM branches WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from)?;

        Ok(branch)
    }

    async fn find_by_franchise_id(&self, franchise_id: EntityId) -> GatewayResult<Vec<Branch>> {
        let branches = sqlx::query_as::<_, Branch>(
            r#"
            SELECT id, name, franchise_id
            FROM branches
            WHERE franchise_id = ?1
            ORDER BY id
            "#,
        )
        .bind(franchise_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from)?;

        Ok(branches)
    }

    async fn find_all(&self) -> GatewayResult<Vec<Branch>> {
        let branches =
            sqlx::query_as::<_, Branch>("SELECT id, name, franchise_id FROM branches ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(DbError::from)?;

        Ok(branches)
    }

    async fn update(&self, branch: &Branch) -> GatewayResult<Branch> {
        let id = branch.id.ok_or_else(|| DbError::not_found("branch", None))?;

        let updated = sqlx::query_as::<_, Branch>(
            r#"
            UPDATE branches
            SET name = ?1, updated_at = ?2
            WHERE id = ?3
            RETURNING id, name, franchise_id
            "#,
        )
        .bind(&branch.name)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from)?
        .ok_or_else(|| DbError::not_found("branch", Some(id)))?;

        Ok(updated)
    }

    async fn delete_by_id(&self, id: EntityId) -> GatewayResult<()> {
        sqlx::query("DELETE FROM branches WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn exists_by_id(&self, id: EntityId) -> GatewayResult<bool> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM branches WHERE id = ?1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::from)?;

        Ok(exists != 0)
    }

    async fn exists_by_id_and_franchise_id(
        &self,
        branch_id: EntityId,
        franchise_id: EntityId,
    ) -> GatewayResult<bool> {
        let exists: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM branches WHERE id = ?1 AND franchise_id = ?2)",
        )
        .bind(branch_id)
        .bind(franchise_id)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from)?;

        Ok(exists != 0)
    }
}
