//! # Account Directory
//!
//! The registry of every account, keyed by identifier.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Process start ──► AccountDirectory::new() (empty, in memory)           │
//! │                                                                         │
//! │  create(id, pin, seed) ──► id unknown?  ──► insert                      │
//! │                        └─► id known?    ──► DuplicateIdentifier         │
//! │                                             (first record kept)         │
//! │                                                                         │
//! │  authenticate(id, pin) ──► id known AND pin verifies ──► &mut Account   │
//! │                        └─► anything else ──────────────► AuthFailed     │
//! │                                                                         │
//! │  Entries are never removed. Process exit drops everything.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The directory is a plain value: the shell builds one at startup and passes
//! it down by `&mut`. It has no internal locking; wrap it in a `Mutex` before
//! sharing it between threads.

use std::collections::HashMap;

use crate::account::Account;
use crate::error::{LedgerError, LedgerResult};
use crate::money::Money;

#[derive(Debug, Default)]
pub struct AccountDirectory {
    accounts: HashMap<String, Account>,
}

impl AccountDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        AccountDirectory::default()
    }

    /// Registers a new account.
    ///
    /// `initial_balance` is accepted as given, including negative values, so
    /// operators can seed overdrawn test accounts. Ids and PINs are stored
    /// verbatim (no trimming).
    ///
    /// ## Returns
    /// * `Ok(())` - Account inserted
    /// * `Err(LedgerError::DuplicateIdentifier)` - `id` already present;
    ///   the existing account is untouched
    pub fn create(&mut self, id: &str, pin: &str, initial_balance: Money) -> LedgerResult<()> {
        if self.accounts.contains_key(id) {
            return Err(LedgerError::DuplicateIdentifier(id.to_string()));
        }

        let account = Account::new(id, pin, initial_balance)?;
        self.accounts.insert(id.to_string(), account);
        Ok(())
    }

    /// [`create`](Self::create) with a zero opening balance.
    pub fn create_with_zero(&mut self, id: &str, pin: &str) -> LedgerResult<()> {
        self.create(id, pin, Money::zero())
    }

    /// Returns the account iff `id` exists and `pin` matches exactly.
    ///
    /// No lockout and no attempt counting.
    pub fn authenticate(&mut self, id: &str, pin: &str) -> LedgerResult<&mut Account> {
        match self.accounts.get_mut(id) {
            Some(account) if account.verify_pin(pin) => Ok(account),
            _ => Err(LedgerError::AuthenticationFailed),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.accounts.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dollars(d: i64) -> Money {
        Money::from_cents(d * 100)
    }

    #[test]
    fn test_starts_empty() {
        let directory = AccountDirectory::new();
        assert!(directory.is_empty());
        assert_eq!(directory.len(), 0);
    }

    /// Walkthrough: create, deposit, over-withdraw, exact withdraw,
    /// duplicate create, wrong PIN.
    #[test]
    fn test_banking_walkthrough() {
        let mut directory = AccountDirectory::new();

        // 1. Create and authenticate
        assert!(directory.create("A1", "1234", dollars(100)).is_ok());
        let account = directory.authenticate("A1", "1234").unwrap();
        assert_eq!(account.inquire(), dollars(100));

        // 2. Deposit 50 into 100
        assert_eq!(account.deposit(dollars(50)), Ok(dollars(150)));

        // 3. Withdraw 200 from 150 fails
        assert!(account.withdraw(dollars(200)).is_err());
        assert_eq!(account.inquire(), dollars(150));

        // 4. Withdraw 150 from 150 succeeds
        assert_eq!(account.withdraw(dollars(150)), Ok(Money::zero()));

        // 5. Duplicate create fails
        assert_eq!(
            directory.create("A1", "9999", dollars(1)),
            Err(LedgerError::DuplicateIdentifier("A1".to_string()))
        );

        // 6. Wrong PIN fails
        assert_eq!(
            directory.authenticate("A1", "wrong").map(|a| a.inquire()),
            Err(LedgerError::AuthenticationFailed)
        );
    }

    #[test]
    fn test_duplicate_create_keeps_first_record() {
        let mut directory = AccountDirectory::new();
        directory.create("A1", "1111", dollars(10)).unwrap();
        assert!(directory.create("A1", "2222", dollars(99)).is_err());

        assert_eq!(directory.len(), 1);
        assert!(directory.authenticate("A1", "2222").is_err());
        let account = directory.authenticate("A1", "1111").unwrap();
        assert_eq!(account.inquire(), dollars(10));
    }

    #[test]
    fn test_negative_seed_balance_is_accepted() {
        let mut directory = AccountDirectory::new();
        assert!(directory.create("OD", "0000", Money::from_cents(-2_500)).is_ok());
        let account = directory.authenticate("OD", "0000").unwrap();
        assert_eq!(account.inquire(), Money::from_cents(-2_500));
    }

    #[test]
    fn test_create_with_zero_defaults_balance() {
        let mut directory = AccountDirectory::new();
        directory.create_with_zero("Z", "1").unwrap();
        assert_eq!(directory.authenticate("Z", "1").unwrap().inquire(), Money::zero());
    }

    #[test]
    fn test_authenticate_requires_exact_match() {
        let mut directory = AccountDirectory::new();
        directory.create("A1", "Pin9", dollars(1)).unwrap();

        assert!(directory.authenticate("A1", "Pin9").is_ok());
        for (id, pin) in [
            ("A1", "pin9"),
            ("A1", "Pin9 "),
            ("A1", ""),
            ("a1", "Pin9"),
            ("A1 ", "Pin9"),
            ("B2", "Pin9"),
        ] {
            assert!(
                matches!(
                    directory.authenticate(id, pin),
                    Err(LedgerError::AuthenticationFailed)
                ),
                "{id:?}/{pin:?} should not authenticate"
            );
        }
    }

    #[test]
    fn test_accounts_are_independent() {
        let mut directory = AccountDirectory::new();
        directory.create("A1", "1", dollars(10)).unwrap();
        directory.create("A2", "2", dollars(20)).unwrap();

        directory.authenticate("A1", "1").unwrap().deposit(dollars(5)).unwrap();

        assert_eq!(directory.authenticate("A2", "2").unwrap().inquire(), dollars(20));
        assert!(directory.contains("A1"));
        assert!(!directory.contains("A3"));
    }
}
