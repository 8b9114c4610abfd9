//! Franchise-level use cases: create, rename, list the full tree, and the
//! per-branch top-stock report.

use std::sync::Arc;

use futures_util::future::{join_all, try_join_all};
use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult, EntityKind};
use crate::gateway::{
    BranchGateway, FranchiseGateway, GatewayResult, GatewayResultExt, ProductGateway,
};
use crate::types::{Branch, BranchTopProduct, EntityId, Franchise};
use crate::validation::validate_entity_name;

// =============================================================================
// Create
// =============================================================================

/// Creates a franchise with no branches.
#[derive(Clone)]
pub struct CreateFranchise {
    franchises: Arc<dyn FranchiseGateway>,
}

impl CreateFranchise {
    pub fn new(franchises: Arc<dyn FranchiseGateway>) -> Self {
        CreateFranchise { franchises }
    }

    /// Validates the name and persists a fresh franchise.
    ///
    /// Any id or branches on `franchise` are ignored. The returned value
    /// carries the store-assigned id.
    pub async fn execute(&self, franchise: &Franchise) -> CoreResult<Franchise> {
        let name = validate_entity_name(EntityKind::Franchise, &franchise.name)?;

        let saved = self
            .franchises
            .save(&Franchise::new(name))
            .await
            .or_wrap("Error creating franchise")?;

        info!(franchise_id = ?saved.id, name = %saved.name, "Franchise created");
        Ok(saved)
    }
}

// =============================================================================
// Rename
// =============================================================================

#[derive(Clone)]
pub struct RenameFranchise {
    franchises: Arc<dyn FranchiseGateway>,
}

impl RenameFranchise {
    const CONTEXT: &'static str = "Error updating franchise name";

    pub fn new(franchises: Arc<dyn FranchiseGateway>) -> Self {
        RenameFranchise { franchises }
    }

    /// Renames an existing franchise and returns the stored result.
    ///
    /// ## Errors
    /// - `Validation` if `new_name` is blank or too long (checked first)
    /// - `NotFound` if no franchise has this id
    pub async fn execute(&self, id: EntityId, new_name: &str) -> CoreResult<Franchise> {
        validate_entity_name(EntityKind::Franchise, new_name)?;

        let current = self
            .franchises
            .find_by_id(id)
            .await
            .or_wrap(Self::CONTEXT)?
            .ok_or_else(|| CoreError::not_found(EntityKind::Franchise, id))?;

        let renamed = current.update_name(new_name)?;
        let saved = self
            .franchises
            .update(&renamed)
            .await
            .or_wrap(Self::CONTEXT)?;

        debug!(franchise_id = id, name = %saved.name, "Franchise renamed");
        Ok(saved)
    }
}

// =============================================================================
// List With Children
// =============================================================================

/// Lists every franchise with its branches and their products.
///
/// ## Partial Results
/// ```text
/// find_all() fails                   → the whole call fails
/// branches of one franchise fail     → that franchise is listed with no branches
/// products of one branch fail        → that branch is listed with no products
/// ```
/// Degraded nodes are logged at `warn`. Nothing else is swallowed.
#[derive(Clone)]
pub struct ListFranchisesWithChildren {
    franchises: Arc<dyn FranchiseGateway>,
    branches: Arc<dyn BranchGateway>,
    products: Arc<dyn ProductGateway>,
}

impl ListFranchisesWithChildren {
    pub fn new(
        franchises: Arc<dyn FranchiseGateway>,
        branches: Arc<dyn BranchGateway>,
        products: Arc<dyn ProductGateway>,
    ) -> Self {
        ListFranchisesWithChildren {
            franchises,
            branches,
            products,
        }
    }

    pub async fn execute(&self) -> CoreResult<Vec<Franchise>> {
        let franchises = self
            .franchises
            .find_all()
            .await
            .or_wrap("Error getting franchises")?;

        let loaded = join_all(franchises.iter().map(|franchise| self.load_branches(franchise))).await;

        debug!(count = loaded.len(), "Listed franchises");
        Ok(loaded)
    }

    async fn load_branches(&self, franchise: &Franchise) -> Franchise {
        let franchise_id = match franchise.id {
            Some(id) => id,
            None => return franchise.with_branches(Vec::new()),
        };

        match self.branches.find_by_franchise_id(franchise_id).await {
            Ok(branches) => {
                let branches = join_all(branches.iter().map(|branch| self.load_products(branch))).await;
                debug!(franchise_id, count = branches.len(), "Loaded branches");
                franchise.with_branches(branches)
            }
            Err(e) => {
                warn!(franchise_id, error = %e, "Failed to load branches, listing franchise without them");
                franchise.with_branches(Vec::new())
            }
        }
    }

    async fn load_products(&self, branch: &Branch) -> Branch {
        let branch_id = match branch.id {
            Some(id) => id,
            None => return branch.with_products(Vec::new()),
        };

        match self.products.find_by_branch_id(branch_id).await {
            Ok(products) => branch.with_products(products),
            Err(e) => {
                warn!(branch_id, error = %e, "Failed to load products, listing branch without them");
                branch.with_products(Vec::new())
            }
        }
    }
}

// =============================================================================
// Top Stock Per Branch
// =============================================================================

/// Reports the highest-stock product of every branch of one franchise.
///
/// ## Algorithm
/// ```text
/// exists_by_id(franchise)                          1 query
/// find_by_franchise_id(franchise)                  1 query
/// for each branch, concurrently:
///     find_top_by_branch_id_order_by_stock_desc    N queries
/// ```
/// Every branch appears in the result, in the order the branch gateway
/// listed them. A branch with no products gets `product: None`.
#[derive(Clone)]
pub struct GetTopStockProductPerBranch {
    franchises: Arc<dyn FranchiseGateway>,
    branches: Arc<dyn BranchGateway>,
    products: Arc<dyn ProductGateway>,
}

impl GetTopStockProductPerBranch {
    const CONTEXT: &'static str = "Error getting top stock products";

    pub fn new(
        franchises: Arc<dyn FranchiseGateway>,
        branches: Arc<dyn BranchGateway>,
        products: Arc<dyn ProductGateway>,
    ) -> Self {
        GetTopStockProductPerBranch {
            franchises,
            branches,
            products,
        }
    }

    pub async fn execute(&self, franchise_id: EntityId) -> CoreResult<Vec<BranchTopProduct>> {
        let exists = self
            .franchises
            .exists_by_id(franchise_id)
            .await
            .or_wrap(Self::CONTEXT)?;
        if !exists {
            return Err(CoreError::not_found(EntityKind::Franchise, franchise_id));
        }

        let branches = self
            .branches
            .find_by_franchise_id(franchise_id)
            .await
            .or_wrap(Self::CONTEXT)?;

        let report = try_join_all(branches.into_iter().map(|branch| self.top_product_for(branch)))
            .await
            .or_wrap(Self::CONTEXT)?;

        debug!(franchise_id, branches = report.len(), "Computed top stock per branch");
        Ok(report)
    }

    async fn top_product_for(&self, branch: Branch) -> GatewayResult<BranchTopProduct> {
        let product = match branch.id {
            Some(branch_id) => {
                self.products
                    .find_top_by_branch_id_order_by_stock_desc(branch_id)
                    .await?
            }
            None => None,
        };
        Ok(BranchTopProduct { branch, product })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
