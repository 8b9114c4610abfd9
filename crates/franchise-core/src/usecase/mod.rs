//! # Use Cases
//!
//! One orchestrator per operation on the aggregate.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Every Orchestrator, In Order                        │
//! │                                                                         │
//! │  1. Validate input        pure, no I/O          → ValidationError      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  2. Existence check(s)    gateway reads         → NotFoundError        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  3. Apply entity rule     copy-on-write         → ValidationError      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  4. Persist               one gateway write     → result unchanged     │
//! │                                                                         │
//! │  Gateway failures at any stage become ValidationError::Gateway.        │
//! │  The first failure ends the pipeline.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Orchestrators hold their gateways as `Arc<dyn …Gateway>` and are cheap to
//! clone. They keep no state between calls.

mod branch;
mod franchise;
mod product;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

pub use branch::{AddBranchToFranchise, RenameBranch};
pub use franchise::{
    CreateFranchise, GetTopStockProductPerBranch, ListFranchisesWithChildren, RenameFranchise,
};
pub use product::{AddProductToBranch, RemoveProduct, RenameProduct, UpdateProductStock};

use crate::gateway::{BranchGateway, FranchiseGateway, ProductGateway};

/// Every orchestrator, wired to one set of gateways.
///
/// ## Usage
/// ```rust,ignore
/// let use_cases = UseCases::new(franchises, branches, products);
///
/// let acme = use_cases.create_franchise.execute(Franchise::new("Acme")).await?;
/// let report = use_cases.top_stock_per_branch.execute(acme.id.unwrap()).await?;
/// ```
#[derive(Clone)]
pub struct UseCases {
    pub create_franchise: CreateFranchise,
    pub rename_franchise: RenameFranchise,
    pub list_franchises: ListFranchisesWithChildren,
    pub top_stock_per_branch: GetTopStockProductPerBranch,
    pub add_branch: AddBranchToFranchise,
    pub rename_branch: RenameBranch,
    pub add_product: AddProductToBranch,
    pub remove_product: RemoveProduct,
    pub update_product_stock: UpdateProductStock,
    pub rename_product: RenameProduct,
}

impl UseCases {
    pub fn new(
        franchises: Arc<dyn FranchiseGateway>,
        branches: Arc<dyn BranchGateway>,
        products: Arc<dyn ProductGateway>,
    ) -> Self {
        UseCases {
            create_franchise: CreateFranchise::new(franchises.clone()),
            rename_franchise: RenameFranchise::new(franchises.clone()),
            list_franchises: ListFranchisesWithChildren::new(
                franchises.clone(),
                branches.clone(),
                products.clone(),
            ),
            top_stock_per_branch: GetTopStockProductPerBranch::new(
                franchises.clone(),
                branches.clone(),
                products.clone(),
            ),
            add_branch: AddBranchToFranchise::new(franchises, branches.clone()),
            rename_branch: RenameBranch::new(branches.clone()),
            add_product: AddProductToBranch::new(branches, products.clone()),
            remove_product: RemoveProduct::new(products.clone()),
            update_product_stock: UpdateProductStock::new(products.clone()),
            rename_product: RenameProduct::new(products),
        }
    }
}
