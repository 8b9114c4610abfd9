//! # Domain Types
//!
//! The three-level aggregate: Franchise → Branch → Product.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Franchise    │   │     Branch      │   │     Product     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │1─N│  id             │1─N│  id             │       │
//! │  │  name           │   │  franchise_id   │   │  branch_id      │       │
//! │  │  branches       │   │  name           │   │  name           │       │
//! │  │                 │   │  products       │   │  stock (>= 0)   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Copy-on-Write
//! Every rule that "changes" an entity takes `&self` and returns a new value.
//! The receiver is never touched, so the rules can be tested without a store
//! and shared freely between concurrent use cases.
//!
//! ## Identity
//! `id` is `None` until the store assigns one on first save. Parent ids
//! (`franchise_id`, `branch_id`) are set by the use cases and never change
//! afterwards.
//!
//! Children are linked by foreign-key fields. The `branches` / `products`
//! collections are only populated when a use case loads them through the
//! gateways.

use serde::{Deserialize, Serialize};

use crate::error::{EntityKind, ValidationResult};
use crate::validation::{validate_entity_name, validate_stock};

/// Store-assigned identifier shared by all three entities.
pub type EntityId = i64;

// =============================================================================
// Product
// =============================================================================

/// A product stocked by one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Store-assigned identifier, `None` before the first save.
    pub id: Option<EntityId>,

    /// Display name, trimmed, 1 to 100 characters.
    pub name: String,

    /// Units in stock. Never negative once persisted.
    pub stock: i32,

    /// Owning branch.
    pub branch_id: Option<EntityId>,
}

impl Product {
    /// Creates an unsaved product with no branch yet.
    pub fn new(name: impl Into<String>, stock: i32) -> Self {
        Product {
            id: None,
            name: name.into(),
            stock,
            branch_id: None,
        }
    }

    /// True iff at least one unit is in stock.
    #[inline]
    pub fn has_stock(&self) -> bool {
        self.stock > 0
    }

    /// True iff the stock covers `required` units.
    #[inline]
    pub fn has_sufficient_stock(&self, required: i32) -> bool {
        self.stock >= required
    }

    /// Returns a copy with the stock replaced.
    ///
    /// Fails with a validation error if `new_stock` is negative. Every other
    /// field is carried over unchanged.
    pub fn update_stock(&self, new_stock: i32) -> ValidationResult<Product> {
        let stock = validate_stock("Stock", new_stock)?;
        Ok(Product {
            stock,
            ..self.clone()
        })
    }

    /// Returns a copy with the name replaced by the trimmed `new_name`.
    pub fn update_name(&self, new_name: &str) -> ValidationResult<Product> {
        let name = validate_entity_name(EntityKind::Product, new_name)?;
        Ok(Product {
            name,
            ..self.clone()
        })
    }

    /// Returns an unsaved copy owned by `branch_id`.
    ///
    /// The id is cleared: the result is a new record under that branch.
    pub fn assigned_to(&self, branch_id: EntityId) -> Product {
        Product {
            id: None,
            branch_id: Some(branch_id),
            ..self.clone()
        }
    }
}

// =============================================================================
// Branch
// =============================================================================

/// A branch of a franchise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Branch {
    /// Store-assigned identifier, `None` before the first save.
    pub id: Option<EntityId>,

    /// Display name, trimmed, 1 to 100 characters.
    pub name: String,

    /// Owning franchise.
    pub franchise_id: Option<EntityId>,

    /// Products of this branch, when loaded. Order is irrelevant.
    #[serde(default)]
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub products: Vec<Product>,
}

impl Branch {
    /// Creates an unsaved branch with no franchise and no products.
    pub fn new(name: impl Into<String>) -> Self {
        Branch {
            id: None,
            name: name.into(),
            franchise_id: None,
            products: Vec::new(),
        }
    }

    /// The product with the largest stock, or `None` for an empty branch.
    ///
    /// ## Ties
    /// When several products share the maximum stock, any one of them may
    /// be returned. Callers must not depend on which.
    pub fn product_with_highest_stock(&self) -> Option<&Product> {
        self.products.iter().max_by_key(|product| product.stock)
    }

    /// Returns a copy with `product` appended.
    pub fn add_product(&self, product: Product) -> Branch {
        let mut products = self.products.clone();
        products.push(product);
        self.with_products(products)
    }

    /// Returns a copy without the product whose id is `product_id`.
    pub fn remove_product(&self, product_id: EntityId) -> Branch {
        let products = self
            .products
            .iter()
            .filter(|product| product.id != Some(product_id))
            .cloned()
            .collect();
        self.with_products(products)
    }

    /// Finds a loaded product by id.
    pub fn find_product(&self, product_id: EntityId) -> Option<&Product> {
        self.products
            .iter()
            .find(|product| product.id == Some(product_id))
    }

    /// Returns a copy with the name replaced by the trimmed `new_name`.
    pub fn update_name(&self, new_name: &str) -> ValidationResult<Branch> {
        let name = validate_entity_name(EntityKind::Branch, new_name)?;
        Ok(Branch {
            name,
            ..self.clone()
        })
    }

    #[inline]
    pub fn has_products(&self) -> bool {
        !self.products.is_empty()
    }

    /// Returns a copy carrying `products` as its children.
    pub fn with_products(&self, products: Vec<Product>) -> Branch {
        Branch {
            id: self.id,
            name: self.name.clone(),
            franchise_id: self.franchise_id,
            products,
        }
    }

    /// Returns an unsaved copy owned by `franchise_id`.
    ///
    /// The id is cleared: the result is a new record under that franchise.
    pub fn assigned_to(&self, franchise_id: EntityId) -> Branch {
        Branch {
            id: None,
            franchise_id: Some(franchise_id),
            ..self.clone()
        }
    }
}

// =============================================================================
// Franchise
// =============================================================================

/// The root of the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Franchise {
    /// Store-assigned identifier, `None` before the first save.
    pub id: Option<EntityId>,

    /// Display name, trimmed, 1 to 100 characters.
    pub name: String,

    /// Branches of this franchise, when loaded. Order is irrelevant.
    #[serde(default)]
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub branches: Vec<Branch>,
}

impl Franchise {
    /// Creates an unsaved franchise with no branches.
    pub fn new(name: impl Into<String>) -> Self {
        Franchise {
            id: None,
            name: name.into(),
            branches: Vec::new(),
        }
    }

    /// Pairs every branch that has products with its highest-stock product.
    ///
    /// Branches without products are left out entirely. Compare with the
    /// per-branch report built by
    /// [`GetTopStockProductPerBranch`](crate::usecase::GetTopStockProductPerBranch),
    /// which keeps empty branches with no product.
    pub fn product_with_highest_stock_per_branch(&self) -> Vec<(&Branch, &Product)> {
        self.branches
            .iter()
            .filter_map(|branch| {
                branch
                    .product_with_highest_stock()
                    .map(|product| (branch, product))
            })
            .collect()
    }

    /// Returns a copy with `branch` appended.
    pub fn add_branch(&self, branch: Branch) -> Franchise {
        let mut branches = self.branches.clone();
        branches.push(branch);
        self.with_branches(branches)
    }

    /// Finds a loaded branch by id.
    pub fn find_branch(&self, branch_id: EntityId) -> Option<&Branch> {
        self.branches
            .iter()
            .find(|branch| branch.id == Some(branch_id))
    }

    /// Returns a copy with the name replaced by the trimmed `new_name`.
    pub fn update_name(&self, new_name: &str) -> ValidationResult<Franchise> {
        let name = validate_entity_name(EntityKind::Franchise, new_name)?;
        Ok(Franchise {
            name,
            ..self.clone()
        })
    }

    #[inline]
    pub fn has_branches(&self) -> bool {
        !self.branches.is_empty()
    }

    /// Number of loaded products across all loaded branches.
    pub fn total_product_count(&self) -> usize {
        self.branches
            .iter()
            .map(|branch| branch.products.len())
            .sum()
    }

    /// Finds a loaded product in any loaded branch.
    pub fn find_product_in_any_branch(&self, product_id: EntityId) -> Option<&Product> {
        self.branches
            .iter()
            .find_map(|branch| branch.find_product(product_id))
    }

    /// Returns a copy carrying `branches` as its children.
    pub fn with_branches(&self, branches: Vec<Branch>) -> Franchise {
        Franchise {
            id: self.id,
            name: self.name.clone(),
            branches,
        }
    }
}

// =============================================================================
// Top-Stock Report
// =============================================================================

/// One entry of the per-branch top-stock report.
///
/// `product` is `None` when the branch has no products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchTopProduct {
    pub branch: Branch,
    pub product: Option<Product>,
}

impl BranchTopProduct {
    #[inline]
    pub fn has_product(&self) -> bool {
        self.product.is_some()
    }

    pub fn branch_name(&self) -> &str {
        &self.branch.name
    }

    pub fn product_name(&self) -> Option<&str> {
        self.product.as_ref().map(|product| product.name.as_str())
    }

    pub fn product_stock(&self) -> Option<i32> {
        self.product.as_ref().map(|product| product.stock)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
