//! # teller-core: Pure Business Logic for Teller
//!
//! This crate is the **heart** of both Teller applications. It contains the
//! account ledger, money arithmetic, secret handling and inventory rules as
//! pure code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Teller Architecture                              │
//! │                                                                         │
//! │  ┌──────────────────────────┐      ┌──────────────────────────────┐    │
//! │  │   apps/atm (console)     │      │   apps/inventory (console)   │    │
//! │  │  create / login / menu   │      │  login / products / sales    │    │
//! │  └────────────┬─────────────┘      └───────────────┬──────────────┘    │
//! │               │                                    │                    │
//! │  ┌────────────▼────────────────────────────────────▼──────────────┐    │
//! │  │               ★ teller-core (THIS CRATE) ★                      │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │    │
//! │  │   │  account  │  │ directory │  │   money   │  │   types   │  │    │
//! │  │   │  Account  │  │ AccountDi │  │   Money   │  │  Product  │  │    │
//! │  │   │  Session  │  │  rectory  │  │  parsing  │  │ Sale/User │  │    │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO DATABASE • NO TERMINAL • PURE FUNCTIONS          │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │                                    │                                    │
//! │  ┌─────────────────────────────────▼───────────────────────────────┐    │
//! │  │                  teller-db (Inventory Store)                    │    │
//! │  │              SQLite queries, migrations, repositories           │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`account`] - A single ledger record and the logged-in [`Session`]
//! - [`directory`] - The registry of accounts keyed by identifier
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`secret`] - Salted hashing for PINs and passwords
//! - [`types`] - Inventory domain types (Product, Sale, User)
//! - [`validation`] - Input validation rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use teller_core::{AccountDirectory, Money};
//!
//! let mut directory = AccountDirectory::new();
//! directory.create("A1", "1234", Money::from_cents(10_000)).unwrap();
//!
//! let account = directory.authenticate("A1", "1234").unwrap();
//! account.deposit(Money::from_cents(5_000)).unwrap();
//! assert_eq!(account.inquire(), Money::from_cents(15_000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod account;
pub mod directory;
pub mod error;
pub mod money;
pub mod secret;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use account::{Account, Session};
pub use directory::AccountDirectory;
pub use error::{CoreError, CoreResult, LedgerError, LedgerResult, SecretError, ValidationError};
pub use money::Money;
pub use secret::SecretHash;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Quantity below which a product shows up in the low stock report.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;
