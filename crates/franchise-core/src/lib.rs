//! # franchise-core: Aggregate Rules and Use Cases
//!
//! This crate holds the business logic for the franchise → branch → product
//! aggregate. It never talks to a store directly: every read and write goes
//! through the gateway traits in [`gateway`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Franchise Inventory Architecture                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Callers (seed binary, transports)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain ids / value objects              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ franchise-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ validation│  │  usecase  │  │  gateway  │  │   │
//! │  │   │ Franchise │  │   names   │  │  Create…  │  │  traits   │  │   │
//! │  │   │  Branch   │  │   stock   │  │  Rename…  │  │  (ports)  │  │   │
//! │  │   │  Product  │  │           │  │  TopStock │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO DATABASE • NO NETWORK • NO FILE SYSTEM                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Arc<dyn …Gateway>                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 franchise-db (SQLite gateways)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Franchise, Branch, Product and the top-stock report entry
//! - [`error`] - The two error kinds every use case returns
//! - [`validation`] - Name and stock rules
//! - [`gateway`] - Persistence ports implemented by a store
//! - [`usecase`] - One orchestrator per operation
//!
//! ## Example Usage
//!
//! ```rust
//! use franchise_core::{Branch, Product};
//!
//! let branch = Branch::new("Downtown")
//!     .add_product(Product::new("Widget", 5))
//!     .add_product(Product::new("Gadget", 12));
//!
//! let top = branch.product_with_highest_stock().unwrap();
//! assert_eq!(top.name, "Gadget");
//!
//! // Rules return new values and leave the receiver alone
//! let restocked = top.update_stock(40).unwrap();
//! assert_eq!(restocked.stock, 40);
//! assert_eq!(top.stock, 12);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod gateway;
pub mod types;
pub mod usecase;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, EntityKind, NotFoundError, ValidationError};
pub use gateway::{BranchGateway, FranchiseGateway, GatewayError, GatewayResult, ProductGateway};
pub use types::*;
pub use usecase::UseCases;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of any franchise, branch or product name, in characters,
/// measured after trimming.
pub const MAX_NAME_LENGTH: usize = 100;
