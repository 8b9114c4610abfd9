//! # Persistence Gateways
//!
//! The ports the use cases read and write through. Implementations live
//! outside this crate (franchise-db provides the SQLite ones).
//!
//! ## Ports
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Gateway Contracts                               │
//! │                                                                         │
//! │  Use case ──► Arc<dyn FranchiseGateway> ──► store                      │
//! │          ├──► Arc<dyn BranchGateway>    ──► store                      │
//! │          └──► Arc<dyn ProductGateway>   ──► store                      │
//! │                                                                         │
//! │  Every call is async and may fail with a GatewayError. The use case    │
//! │  maps that failure into ValidationError::Gateway with a context line.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract Notes
//! - `save` ignores any id on the input and returns the stored row with the
//!   store-assigned id.
//! - `find_*` never populate child collections.
//! - `update` of a row that no longer exists is an error.
//! - Ties in `find_top_by_branch_id_order_by_stock_desc` are broken by a
//!   rule the store chooses. It must be stable for a fixed data snapshot.

use std::error::Error as StdError;

use async_trait::async_trait;
use thiserror::Error;

use crate::error::ValidationError;
use crate::types::{Branch, EntityId, Franchise, Product};

// =============================================================================
// Gateway Error
// =============================================================================

/// Any failure a gateway reports.
///
/// The message is what the use case shows after its own context. The store's
/// native error, when there is one, is kept as the source.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct GatewayError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl GatewayError {
    pub fn new(message: impl Into<String>) -> Self {
        GatewayError {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error that keeps `source` as its cause.
    pub fn with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        GatewayError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type returned by every gateway operation.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Normalizes a gateway failure into the validation kind.
///
/// ## Usage
/// ```rust,ignore
/// let saved = self
///     .franchises
///     .save(&franchise)
///     .await
///     .or_wrap("Error creating franchise")?;
/// ```
pub trait GatewayResultExt<T> {
    fn or_wrap(self, context: &str) -> Result<T, ValidationError>;
}

impl<T> GatewayResultExt<T> for GatewayResult<T> {
    fn or_wrap(self, context: &str) -> Result<T, ValidationError> {
        self.map_err(|source| ValidationError::Gateway {
            context: context.to_string(),
            source,
        })
    }
}

// =============================================================================
// Franchise Gateway
// =============================================================================

#[async_trait]
pub trait FranchiseGateway: Send + Sync {
    /// Inserts a franchise and returns it with its new id.
    async fn save(&self, franchise: &Franchise) -> GatewayResult<Franchise>;

    async fn find_by_id(&self, id: EntityId) -> GatewayResult<Option<Franchise>>;

    /// All franchises, children not populated.
    async fn find_all(&self) -> GatewayResult<Vec<Franchise>>;

    /// Overwrites the stored row with the same id.
    async fn update(&self, franchise: &Franchise) -> GatewayResult<Franchise>;

    async fn delete_by_id(&self, id: EntityId) -> GatewayResult<()>;

    async fn exists_by_id(&self, id: EntityId) -> GatewayResult<bool>;
}

// =============================================================================
// Branch Gateway
// =============================================================================

#[async_trait]
pub trait BranchGateway: Send + Sync {
    /// Inserts a branch and returns it with its new id.
    async fn save(&self, branch: &Branch) -> GatewayResult<Branch>;

    async fn find_by_id(&self, id: EntityId) -> GatewayResult<Option<Branch>>;

    /// Branches of one franchise, in the store's listing order.
    async fn find_by_franchise_id(&self, franchise_id: EntityId) -> GatewayResult<Vec<Branch>>;

    async fn find_all(&self) -> GatewayResult<Vec<Branch>>;

    /// Overwrites the stored row with the same id.
    async fn update(&self, branch: &Branch) -> GatewayResult<Branch>;

    async fn delete_by_id(&self, id: EntityId) -> GatewayResult<()>;

    async fn exists_by_id(&self, id: EntityId) -> GatewayResult<bool>;

    /// True iff the branch exists and belongs to the franchise.
    async fn exists_by_id_and_franchise_id(
        &self,
        branch_id: EntityId,
        franchise_id: EntityId,
    ) -> GatewayResult<bool>;
}

// =============================================================================
// Product Gateway
// =============================================================================

#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// Inserts a product and returns it with its new id.
    async fn save(&self, product: &Product) -> GatewayResult<Product>;

    async fn find_by_id(&self, id: EntityId) -> GatewayResult<Option<Product>>;

    async fn find_by_branch_id(&self, branch_id: EntityId) -> GatewayResult<Vec<Product>>;

    async fn find_all(&self) -> GatewayResult<Vec<Product>>;

    /// Overwrites the stored row with the same id.
    async fn update(&self, product: &Product) -> GatewayResult<Product>;

    async fn delete_by_id(&self, id: EntityId) -> GatewayResult<()>;

    async fn exists_by_id(&self, id: EntityId) -> GatewayResult<bool>;

    /// True iff the product exists and belongs to the branch.
    async fn exists_by_id_and_branch_id(
        &self,
        product_id: EntityId,
        branch_id: EntityId,
    ) -> GatewayResult<bool>;

    /// The product of the branch with the largest stock, if any.
    async fn find_top_by_branch_id_order_by_stock_desc(
        &self,
        branch_id: EntityId,
    ) -> GatewayResult<Option<Product>>;

    /// Sets the stock of one product and returns the stored row.
    async fn update_stock(&self, product_id: EntityId, stock: i32) -> GatewayResult<Product>;
}
