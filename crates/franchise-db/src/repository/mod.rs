//! # Repository Module
//!
//! SQLite implementations of the franchise-core gateway traits.
//!
//! ## Gateway Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Gateways Over SQLite                                 │
//! │                                                                         │
//! │  Use case (franchise-core)                                             │
//! │       │                                                                 │
//! │       │  Arc<dyn ProductGateway>                                        │
//! │       ▼                                                                 │
//! │  SqliteProductGateway                                                  │
//! │  ├── save(&self, product)          INSERT ... RETURNING                │
//! │  ├── find_by_id(&self, id)         SELECT                              │
//! │  ├── update(&self, product)        UPDATE ... RETURNING                │
//! │  └── ...                                                               │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  sqlx::Error → DbError → GatewayError at every trait method            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Gateways
//!
//! - [`SqliteFranchiseGateway`] - `franchises` table
//! - [`SqliteBranchGateway`] - `branches` table
//! - [`SqliteProductGateway`] - `products` table, including the top-stock lookup

pub mod branch;
pub mod franchise;
pub mod product;

pub use branch::SqliteBranchGateway;
pub use franchise::SqliteFranchiseGateway;
pub use product::SqliteProductGateway;
