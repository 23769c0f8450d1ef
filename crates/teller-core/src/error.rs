//! # Error Types
//!
//! Domain-specific error types for teller-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  teller-core errors (this file)                                        │
//! │  ├── LedgerError      - Account / directory rule violations            │
//! │  ├── SecretError      - Hashing or stored-hash failures                │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── CoreError        - Inventory rules, wraps the above               │
//! │                                                                         │
//! │  teller-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → shell message           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Ledger Error
// =============================================================================

/// Failures of the account ledger.
///
/// None of these are fatal: every variant is a rejected request that left
/// the ledger exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// `create` was called with an identifier that is already registered.
    #[error("Account {0} already exists")]
    DuplicateIdentifier(String),

    /// Unknown identifier or wrong PIN. The two cases are deliberately
    /// indistinguishable.
    #[error("Invalid account number or PIN")]
    AuthenticationFailed,

    /// Amount is zero, negative, or would overflow the balance.
    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: Money },

    /// Withdrawal larger than the current balance.
    ///
    /// ## User Workflow
    /// ```text
    /// Balance: $150.00
    ///      │
    ///      ▼
    /// withdraw($200.00)
    ///      │
    ///      ▼
    /// InsufficientFunds { balance: $150.00, requested: $200.00 }
    ///      │
    ///      ▼
    /// Balance still $150.00
    /// ```
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Money, requested: Money },

    /// The PIN could not be hashed when the account was created.
    #[error(transparent)]
    Secret(#[from] SecretError),
}

/// Convenience type alias for ledger results.
pub type LedgerResult<T> = Result<T, LedgerError>;

// =============================================================================
// Secret Error
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretError {
    /// The hasher rejected the input or its parameters.
    #[error("Failed to hash secret: {0}")]
    Hash(String),

    /// A stored hash is not a valid PHC string.
    #[error("Stored secret hash is malformed: {0}")]
    Malformed(String),
}

// =============================================================================
// Core Error
// =============================================================================

/// Inventory business rule errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Sale quantity exceeds the stock on hand.
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: i64,
        available: i64,
        requested: i64,
    },

    #[error("Secret error: {0}")]
    Secret(#[from] SecretError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. unparsable amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_error_messages() {
        let err = LedgerError::InsufficientFunds {
            balance: Money::from_cents(15_000),
            requested: Money::from_cents(20_000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: balance $150.00, requested $200.00"
        );

        let err = LedgerError::DuplicateIdentifier("A1".to_string());
        assert_eq!(err.to_string(), "Account A1 already exists");
    }

    #[test]
    fn test_core_error_messages() {
        let err = CoreError::InsufficientStock {
            product_id: 7,
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 7: available 3, requested 5"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
