//! # Product Gateway
//!
//! SQLite implementation of [`ProductGateway`].
//!
//! ## Top-Stock Lookup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  find_top_by_branch_id_order_by_stock_desc(branch)                     │
//! │                                                                         │
//! │  SELECT ... WHERE branch_id = ?                                        │
//! │  ORDER BY stock DESC, id ASC     ← highest stock, oldest row on ties   │
//! │  LIMIT 1                                                               │
//! │                                                                         │
//! │  Served by idx_products_branch_stock (branch_id, stock DESC, id)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use franchise_core::gateway::{GatewayResult, ProductGateway};
use franchise_core::{EntityId, Product};

use crate::error::DbError;

/// Product rows in the `products` table.
///
/// `branch_id` is written once on insert. `update` touches name and stock.
#[derive(Debug, Clone)]
pub struct SqliteProductGateway {
    pool: SqlitePool,
}

impl SqliteProductGateway {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteProductGateway { pool }
    }
}

#[async_trait]
impl ProductGateway for SqliteProductGateway {
    async fn save(&self, product: &Product) -> GatewayResult<Product> {
        let saved = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, stock, branch_id)
            VALUES (?1, ?2, ?3)
            RETURNING id, name, stock, branch_id
            "#,
        )
        .bind(&product.name)
        .bind(product.stock)
        .bind(product.branch_id)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from)?;

        debug!(product_id = ?saved.id, branch_id = ?saved.branch_id, "Inserted product");
        Ok(saved)
    }

    async fn find_by_id(&self, id: EntityId) -> GatewayResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, stock, branch_id FROM products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from)?;

        Ok(product)
    }

    async fn find_by_branch_id(&self, branch_id: EntityId) -> GatewayResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, stock, branch_id
            FROM products
            WHERE branch_id = ?1
            ORDER BY id
            "#,
        )
        .bind(branch_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from)?;

        Ok(products)
    }

    async fn find_all(&self) -> GatewayResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, stock, branch_id FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from)?;

        Ok(products)
    }

    async fn update(&self, product: &Product) -> GatewayResult<Product> {
        let id = product.id.ok_or_else(|| DbError::not_found("product", None))?;

        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = ?1, stock = ?2, updated_at = ?3
            WHERE id = ?4
            RETURNING id, name, stock, branch_id
            "#,
        )
        .bind(&product.name)
        .bind(product.stock)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from)?
        .ok_or_else(|| DbError::not_found("product", Some(id)))?;

        Ok(updated)
    }

    async fn delete_by_id(&self, id: EntityId) -> GatewayResult<()> {
        sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn exists_by_id(&self, id: EntityId) -> GatewayResult<bool> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = ?1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::from)?;

        Ok(exists != 0)
    }

    async fn exists_by_id_and_branch_id(
        &self,
        product_id: EntityId,
        branch_id: EntityId,
    ) -> GatewayResult<bool> {
        let exists: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM products WHERE id = ?1 AND branch_id = ?2)",
        )
        .bind(product_id)
        .bind(branch_id)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from)?;

        Ok(exists != 0)
    }

    async fn find_top_by_branch_id_order_by_stock_desc(
        &self,
        branch_id: EntityId,
    ) -> GatewayResult<Option<Product>> {
        let top = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, stock, branch_id
            FROM products
            WHERE branch_id = ?1
            ORDER BY stock DESC, id ASC
            LIMIT 1
            "#,
        )
        .bind(branch_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from)?;

        Ok(top)
    }

    async fn update_stock(&self, product_id: EntityId, stock: i32) -> GatewayResult<Product> {
        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET stock = ?1, updated_at = ?2
            WHERE id = ?3
            RETURNING id, name, stock, branch_id
            "#,
        )
        .bind(stock)
        .bind(Utc::now())
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from)?
        .ok_or_else(|| DbError::not_found("product", Some(product_id)))?;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use franchise_core::gateway::{BranchGateway, FranchiseGateway};
    use franchise_core::{Branch, Franchise};

    /// In-memory database with one franchise and two branches.
    async fn setup() -> (Database, EntityId, EntityId) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let acme = db
            .franchises()
            .save(&Franchise::new("Acme"))
            .await
            .unwrap()
            .id
            .unwrap();
        let downtown = db
            .branches()
            .save(&Branch::new("Downtown").assigned_to(acme))
            .await
            .unwrap()
            .id
            .unwrap();
        let airport = db
            .branches()
            .save(&Branch::new("Airport").assigned_to(acme))
            .await
            .unwrap()
            .id
            .unwrap();
        (db, downtown, airport)
    }

    #[tokio::test]
    async fn test_save_and_membership() {
        let (db, downtown, airport) = setup().await;
        let gateway = db.products();

        let widget = gateway
            .save(&Product::new("Widget", 5).assigned_to(downtown))
            .await
            .unwrap();
        let id = widget.id.unwrap();

        assert_eq!(widget.stock, 5);
        assert!(gateway.exists_by_id(id).await.unwrap());
        assert!(gateway.exists_by_id_and_branch_id(id, downtown).await.unwrap());
        assert!(!gateway.exists_by_id_and_branch_id(id, airport).await.unwrap());
        assert_eq!(gateway.find_by_branch_id(downtown).await.unwrap().len(), 1);
        assert!(gateway.find_by_branch_id(airport).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_top_by_stock_breaks_ties_by_lowest_id() {
        let (db, downtown, airport) = setup().await;
        let gateway = db.products();

        gateway
            .save(&Product::new("Widget", 5).assigned_to(downtown))
            .await
            .unwrap();
        let first_max = gateway
            .save(&Product::new("Gadget", 12).assigned_to(downtown))
            .await
            .unwrap();
        gateway
            .save(&Product::new("Gizmo", 12).assigned_to(downtown))
            .await
            .unwrap();

        let top = gateway
            .find_top_by_branch_id_order_by_stock_desc(downtown)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(top.id, first_max.id);
        assert_eq!(top.stock, 12);

        assert!(gateway
            .find_top_by_branch_id_order_by_stock_desc(airport)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_and_update_stock() {
        let (db, downtown, _) = setup().await;
        let gateway = db.products();
        let saved = gateway
            .save(&Product::new("Widget", 5).assigned_to(downtown))
            .await
            .unwrap();
        let id = saved.id.unwrap();

        let renamed = gateway
            .update(&saved.update_name("Sprocket").unwrap())
            .await
            .unwrap();
        assert_eq!(renamed.name, "Sprocket");
        assert_eq!(renamed.stock, 5);

        let restocked = gateway.update_stock(id, 40).await.unwrap();
        assert_eq!(restocked.stock, 40);
        assert_eq!(restocked.name, "Sprocket");
        assert_eq!(restocked.branch_id, Some(downtown));

        let err = gateway.update_stock(id + 1000, 1).await.unwrap_err();
        assert!(err.message().contains("not found"));
    }

    #[tokio::test]
    async fn test_negative_stock_is_rejected_by_the_schema() {
        let (db, downtown, _) = setup().await;
        let err = db
            .products()
            .save(&Product::new("Widget", -1).assigned_to(downtown))
            .await
            .unwrap_err();
        assert!(err.message().contains("Check constraint violation"));
    }

    #[tokio::test]
    async fn test_delete_and_cascade() {
        let (db, downtown, airport) = setup().await;
        let gateway = db.products();
        let widget = gateway
            .save(&Product::new("Widget", 5).assigned_to(downtown))
            .await
            .unwrap()
            .id
            .unwrap();
        let bolt = gateway
            .save(&Product::new("Bolt", 1).assigned_to(airport))
            .await
            .unwrap()
            .id
            .unwrap();

        gateway.delete_by_id(widget).await.unwrap();
        assert!(gateway.find_by_id(widget).await.unwrap().is_none());

        db.branches().delete_by_id(airport).await.unwrap();
        assert!(!gateway.exists_by_id(bolt).await.unwrap());
        assert!(gateway.find_all().await.unwrap().is_empty());
    }
}
