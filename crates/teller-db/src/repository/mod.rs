//! # Repository Module
//!
//! Database repositories for the inventory store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Inventory shell                                                        │
//! │       │                                                                 │
//! │       │  db.sales().record(product_id, quantity)                       │
//! │       ▼                                                                 │
//! │  SaleRepository                                                        │
//! │  ├── record(&self, product_id, quantity)                               │
//! │  ├── list(&self)                                                       │
//! │  └── summary(&self)                                                    │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each repository owns a clone of the pool handle and is cheap to create,
//! so callers take a fresh one per operation via `Database::products()` etc.
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD and low stock report
//! - [`UserRepository`](user::UserRepository) - Registration and login
//! - [`SaleRepository`](sale::SaleRepository) - Sale recording and summary

pub mod product;
pub mod sale;
pub mod user;
