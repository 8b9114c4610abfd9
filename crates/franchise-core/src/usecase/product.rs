//! Product-level use cases.
//!
//! Remove and stock update accept an optional branch id. When it is given
//! the product must belong to that branch, otherwise the call fails with
//! `NotFound` even if the product exists elsewhere.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{CoreError, CoreResult, EntityKind};
use crate::gateway::{BranchGateway, GatewayResultExt, ProductGateway};
use crate::types::{EntityId, Product};
use crate::validation::{validate_entity_name, validate_stock};

/// Fails with `NotFound` unless the product exists, and belongs to
/// `branch_id` when one is given.
async fn ensure_product(
    products: &dyn ProductGateway,
    product_id: EntityId,
    branch_id: Option<EntityId>,
    context: &str,
) -> CoreResult<()> {
    match branch_id {
        Some(branch_id) => {
            let belongs = products
                .exists_by_id_and_branch_id(product_id, branch_id)
                .await
                .or_wrap(context)?;
            if !belongs {
                return Err(CoreError::not_found_in(
                    EntityKind::Product,
                    product_id,
                    EntityKind::Branch,
                    branch_id,
                ));
            }
        }
        None => {
            let exists = products.exists_by_id(product_id).await.or_wrap(context)?;
            if !exists {
                return Err(CoreError::not_found(EntityKind::Product, product_id));
            }
        }
    }
    Ok(())
}

// =============================================================================
// Add
// =============================================================================

/// Adds a new product under an existing branch.
#[derive(Clone)]
pub struct AddProductToBranch {
    branches: Arc<dyn BranchGateway>,
    products: Arc<dyn ProductGateway>,
}

impl AddProductToBranch {
    const CONTEXT: &'static str = "Error adding product to branch";

    pub fn new(branches: Arc<dyn BranchGateway>, products: Arc<dyn ProductGateway>) -> Self {
        AddProductToBranch { branches, products }
    }

    /// Persists `product` as a child of `branch_id`.
    ///
    /// The parent id on `product` is overwritten and its id is ignored.
    pub async fn execute(&self, branch_id: EntityId, product: &Product) -> CoreResult<Product> {
        let name = validate_entity_name(EntityKind::Product, &product.name)?;
        let stock = validate_stock("Product stock", product.stock)?;

        let exists = self
            .branches
            .exists_by_id(branch_id)
            .await
            .or_wrap(Self::CONTEXT)?;
        if !exists {
            return Err(CoreError::not_found(EntityKind::Branch, branch_id));
        }

        let prepared = Product {
            name,
            stock,
            ..product.assigned_to(branch_id)
        };
        let saved = self
            .products
            .save(&prepared)
            .await
            .or_wrap(Self::CONTEXT)?;

        info!(branch_id, product_id = ?saved.id, name = %saved.name, stock = saved.stock, "Product added");
        Ok(saved)
    }
}

// =============================================================================
// Remove
// =============================================================================

#[derive(Clone)]
pub struct RemoveProduct {
    products: Arc<dyn ProductGateway>,
}

impl RemoveProduct {
    const CONTEXT: &'static str = "Error removing product";

    pub fn new(products: Arc<dyn ProductGateway>) -> Self {
        RemoveProduct { products }
    }

    /// Deletes a product, optionally checking it belongs to `branch_id`.
    pub async fn execute(&self, product_id: EntityId, branch_id: Option<EntityId>) -> CoreResult<()> {
        ensure_product(self.products.as_ref(), product_id, branch_id, Self::CONTEXT).await?;

        self.products
            .delete_by_id(product_id)
            .await
            .or_wrap(Self::CONTEXT)?;

        info!(product_id, ?branch_id, "Product removed");
        Ok(())
    }
}

// =============================================================================
// Stock
// =============================================================================

/// Replaces the stock of a product.
///
/// No compare-and-swap: a concurrent rename of the same product may
/// interleave, and the store decides which write lands last.
#[derive(Clone)]
pub struct UpdateProductStock {
    products: Arc<dyn ProductGateway>,
}

impl UpdateProductStock {
    const CONTEXT: &'static str = "Error updating product stock";

    pub fn new(products: Arc<dyn ProductGateway>) -> Self {
        UpdateProductStock { products }
    }

    pub async fn execute(
        &self,
        product_id: EntityId,
        branch_id: Option<EntityId>,
        new_stock: i32,
    ) -> CoreResult<Product> {
        validate_stock("Stock", new_stock)?;

        if branch_id.is_some() {
            ensure_product(self.products.as_ref(), product_id, branch_id, Self::CONTEXT).await?;
        }

        let current = self
            .products
            .find_by_id(product_id)
            .await
            .or_wrap(Self::CONTEXT)?
            .ok_or_else(|| CoreError::not_found(EntityKind::Product, product_id))?;

        let updated = current.update_stock(new_stock)?;
        let saved = self
            .products
            .update(&updated)
            .await
            .or_wrap(Self::CONTEXT)?;

        debug!(product_id, stock = saved.stock, "Product stock updated");
        Ok(saved)
    }
}

// =============================================================================
// Rename
// =============================================================================

#[derive(Clone)]
pub struct RenameProduct {
    products: Arc<dyn ProductGateway>,
}

impl RenameProduct {
    const CONTEXT: &'static str = "Error updating product name";

    pub fn new(products: Arc<dyn ProductGateway>) -> Self {
        RenameProduct { products }
    }

    pub async fn execute(&self, id: EntityId, new_name: &str) -> CoreResult<Product> {
        validate_entity_name(EntityKind::Product, new_name)?;

        let current = self
            .products
            .find_by_id(id)
            .await
            .or_wrap(Self::CONTEXT)?
            .ok_or_else(|| CoreError::not_found(EntityKind::Product, id))?;

        let renamed = current.update_name(new_name)?;
        let saved = self
            .products
            .update(&renamed)
            .await
            .or_wrap(Self::CONTEXT)?;

        debug!(product_id = id, name = %saved.name, "Product renamed");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{CoreError, NotFoundError, ValidationError};
    use crate::types::Product;
    use crate::usecase::testing::{Failure, InMemoryStore};

    #[tokio::test]
    async fn test_add_product_sets_branch() {
        let store = InMemoryStore::arc();
        let acme = store.insert_franchise("Acme");
        let downtown = store.insert_branch(acme, "Downtown");

        let input = Product {
            id: Some(31),
            branch_id: Some(12345),
            ..Product::new(" Widget ", 5)
        };
        let saved = store
            .use_cases()
            .add_product
            .execute(downtown, &input)
            .await
            .unwrap();

        assert_ne!(saved.id, Some(31));
        assert_eq!(saved.branch_id, Some(downtown));
        assert_eq!(saved.name, "Widget");
        assert_eq!(saved.stock, 5);
    }

    #[tokio::test]
    async fn test_add_product_validation() {
        let store = InMemoryStore::arc();
        let acme = store.insert_franchise("Acme");
        let downtown = store.insert_branch(acme, "Downtown");
        let use_cases = store.use_cases();

        let err = use_cases
            .add_product
            .execute(downtown, &Product::new("Widget", -1))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Product stock cannot be negative");

        let err = use_cases
            .add_product
            .execute(downtown, &Product::new("", 1))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Product name cannot be empty");

        assert_eq!(store.product_saves(), 0);
    }

    #[tokio::test]
    async fn test_add_product_to_missing_branch() {
        let store = InMemoryStore::arc();
        let err = store
            .use_cases()
            .add_product
            .execute(8, &Product::new("Widget", 1))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Branch with ID 8 not found");
        assert_eq!(store.product_saves(), 0);
    }

    #[tokio::test]
    async fn test_remove_product() {
        let store = InMemoryStore::arc();
        let acme = store.insert_franchise("Acme");
        let downtown = store.insert_branch(acme, "Downtown");
        let widget = store.insert_product(downtown, "Widget", 5);

        store
            .use_cases()
            .remove_product
            .execute(widget, Some(downtown))
            .await
            .unwrap();
        assert!(store.product(widget).is_none());
    }

    #[tokio::test]
    async fn test_remove_product_from_wrong_branch_keeps_it() {
        let store = InMemoryStore::arc();
        let acme = store.insert_franchise("Acme");
        let downtown = store.insert_branch(acme, "Downtown");
        let airport = store.insert_branch(acme, "Airport");
        let widget = store.insert_product(downtown, "Widget", 5);

        let err = store
            .use_cases()
            .remove_product
            .execute(widget, Some(airport))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::NotFound(NotFoundError::Relation { .. })
        ));
        assert_eq!(
            err.to_string(),
            format!("Product with ID {widget} not found in Branch {airport}")
        );
        assert!(store.product(widget).is_some());
        assert_eq!(store.product_deletes(), 0);
    }

    #[tokio::test]
    async fn test_remove_missing_product_without_branch() {
        let store = InMemoryStore::arc();
        let err = store
            .use_cases()
            .remove_product
            .execute(3, None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Product with ID 3 not found");
    }

    #[tokio::test]
    async fn test_update_stock() {
        let store = InMemoryStore::arc();
        let acme = store.insert_franchise("Acme");
        let downtown = store.insert_branch(acme, "Downtown");
        let widget = store.insert_product(downtown, "Widget", 5);
        let use_cases = store.use_cases();

        let updated = use_cases
            .update_product_stock
            .execute(widget, None, 40)
            .await
            .unwrap();
        assert_eq!(updated.stock, 40);
        assert_eq!(updated.name, "Widget");
        assert_eq!(updated.branch_id, Some(downtown));

        let updated = use_cases
            .update_product_stock
            .execute(widget, Some(downtown), 0)
            .await
            .unwrap();
        assert_eq!(updated.stock, 0);
        assert_eq!(store.product(widget).unwrap().stock, 0);
    }

    #[tokio::test]
    async fn test_update_stock_rejects_negative_before_io() {
        let store = InMemoryStore::arc();
        store.fail(Failure::Everything);

        let err = store
            .use_cases()
            .update_product_stock
            .execute(1, None, -3)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Negative { .. })
        ));
        assert_eq!(store.product_updates(), 0);
    }

    #[tokio::test]
    async fn test_update_stock_wrong_branch() {
        let store = InMemoryStore::arc();
        let acme = store.insert_franchise("Acme");
        let downtown = store.insert_branch(acme, "Downtown");
        let widget = store.insert_product(downtown, "Widget", 5);

        let err = store
            .use_cases()
            .update_product_stock
            .execute(widget, Some(downtown + 100), 9)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.product(widget).unwrap().stock, 5);
    }

    #[tokio::test]
    async fn test_update_stock_missing_product() {
        let store = InMemoryStore::arc();
        let err = store
            .use_cases()
            .update_product_stock
            .execute(55, None, 1)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Product with ID 55 not found");
    }

    #[tokio::test]
    async fn test_rename_product() {
        let store = InMemoryStore::arc();
        let acme = store.insert_franchise("Acme");
        let downtown = store.insert_branch(acme, "Downtown");
        let widget = store.insert_product(downtown, "Widget", 5);
        let use_cases = store.use_cases();

        let renamed = use_cases
            .rename_product
            .execute(widget, "  Sprocket")
            .await
            .unwrap();
        assert_eq!(renamed.name, "Sprocket");
        assert_eq!(renamed.stock, 5);

        let err = use_cases.rename_product.execute(999, "Sprocket").await.unwrap_err();
        assert!(err.is_not_found());

        let err = use_cases.rename_product.execute(widget, "").await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_store_outage_during_update_is_wrapped() {
        let store = InMemoryStore::arc();
        let acme = store.insert_franchise("Acme");
        let downtown = store.insert_branch(acme, "Downtown");
        let widget = store.insert_product(downtown, "Widget", 5);
        store.fail(Failure::Everything);

        let err = store
            .use_cases()
            .update_product_stock
            .execute(widget, None, 7)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Error updating product stock: store unavailable");
    }
}
