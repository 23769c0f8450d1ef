//! # Account Module
//!
//! A single ledger record and the session that borrows it.
//!
//! ## Balance Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  deposit(amount)                                                        │
//! │    amount <= 0           → InvalidAmount      (balance unchanged)       │
//! │    otherwise             → balance + amount                             │
//! │                                                                         │
//! │  withdraw(amount)                                                       │
//! │    amount <= 0           → InvalidAmount      (balance unchanged)       │
//! │    amount > balance      → InsufficientFunds  (balance unchanged)       │
//! │    otherwise             → balance - amount                             │
//! │                                                                         │
//! │  A withdrawal is never clamped: it either happens in full or not at all│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{LedgerError, LedgerResult};
use crate::money::Money;
use crate::secret::SecretHash;

// =============================================================================
// Account
// =============================================================================

/// A ledger record: identifier, hashed PIN and balance.
///
/// Accounts are created and owned by
/// [`AccountDirectory`](crate::AccountDirectory); the id and PIN never change
/// after creation.
#[derive(Debug, Clone)]
pub struct Account {
    id: String,
    pin: SecretHash,
    balance: Money,
}

impl Account {
    /// Creates an account, hashing the PIN. The opening balance is taken as
    /// given.
    pub fn new(id: impl Into<String>, pin: &str, opening_balance: Money) -> LedgerResult<Self> {
        Ok(Account {
            id: id.into(),
            pin: SecretHash::new(pin)?,
            balance: opening_balance,
        })
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the current balance. Never fails, never mutates.
    #[inline]
    pub fn inquire(&self) -> Money {
        self.balance
    }

    /// Adds `amount` to the balance and returns the new balance.
    ///
    /// ## Example
    /// ```rust
    /// use teller_core::{Account, LedgerError, Money};
    ///
    /// let mut account = Account::new("A1", "1234", Money::from_cents(10_000)).unwrap();
    /// assert_eq!(account.deposit(Money::from_cents(5_000)), Ok(Money::from_cents(15_000)));
    /// assert!(matches!(
    ///     account.deposit(Money::zero()),
    ///     Err(LedgerError::InvalidAmount { .. })
    /// ));
    /// ```
    pub fn deposit(&mut self, amount: Money) -> LedgerResult<Money> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount { amount });
        }

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount { amount })?;

        Ok(self.balance)
    }

    /// Removes `amount` from the balance and returns the new balance.
    pub fn withdraw(&mut self, amount: Money) -> LedgerResult<Money> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount { amount });
        }

        if amount > self.balance {
            return Err(LedgerError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }

        // amount is in (0, balance], so this cannot overflow
        self.balance -= amount;
        Ok(self.balance)
    }

    /// Checks a candidate PIN against the stored hash.
    pub fn verify_pin(&self, candidate: &str) -> bool {
        self.pin.verify(candidate)
    }
}

// =============================================================================
// Session
// =============================================================================

/// The logged-in state of a shell, bound to exactly one account.
///
/// ```text
///            Session::open ok
/// LoggedOut ─────────────────► LoggedIn (Session value exists)
///     ▲                             │
///     └──────── Session::close ─────┘
///
/// A failed open leaves the shell LoggedOut.
/// ```
///
/// The session holds the directory's mutable borrow for as long as it
/// lives, which is what makes a second concurrent login impossible.
#[derive(Debug)]
pub struct Session<'d> {
    account: &'d mut Account,
}

impl<'d> Session<'d> {
    /// Authenticates against `directory` and opens a session.
    pub fn open(
        directory: &'d mut crate::AccountDirectory,
        id: &str,
        pin: &str,
    ) -> LedgerResult<Self> {
        let account = directory.authenticate(id, pin)?;
        Ok(Session { account })
    }

    pub fn account_id(&self) -> &str {
        self.account.id()
    }

    pub fn inquire(&self) -> Money {
        self.account.inquire()
    }

    pub fn deposit(&mut self, amount: Money) -> LedgerResult<Money> {
        self.account.deposit(amount)
    }

    pub fn withdraw(&mut self, amount: Money) -> LedgerResult<Money> {
        self.account.withdraw(amount)
    }

    /// Logs out, releasing the borrow on the directory.
    pub fn close(self) {}
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AccountDirectory;

    fn account_with(cents: i64) -> Account {
        Account::new("A1", "1234", Money::from_cents(cents)).unwrap()
    }

    #[test]
    fn test_inquire_has_no_side_effect() {
        let account = account_with(10_000);
        assert_eq!(account.inquire(), Money::from_cents(10_000));
        assert_eq!(account.inquire(), Money::from_cents(10_000));
    }

    #[test]
    fn test_deposit_rejects_non_positive_amounts() {
        let mut account = account_with(10_000);
        for cents in [0, -1, -100, -10_000, i64::MIN] {
            let result = account.deposit(Money::from_cents(cents));
            assert_eq!(
                result,
                Err(LedgerError::InvalidAmount {
                    amount: Money::from_cents(cents)
                })
            );
            assert_eq!(account.inquire(), Money::from_cents(10_000));
        }
    }

    #[test]
    fn test_deposit_adds_positive_amounts() {
        let mut account = account_with(10_000);
        let mut expected = 10_000;
        for cents in [1, 99, 5_000, 123_456_789] {
            expected += cents;
            assert_eq!(
                account.deposit(Money::from_cents(cents)),
                Ok(Money::from_cents(expected))
            );
        }
        assert_eq!(account.inquire(), Money::from_cents(expected));
    }

    #[test]
    fn test_deposit_overflow_is_rejected() {
        let mut account = account_with(i64::MAX - 10);
        assert!(account.deposit(Money::from_cents(11)).is_err());
        assert_eq!(account.inquire(), Money::from_cents(i64::MAX - 10));
        assert!(account.deposit(Money::from_cents(10)).is_ok());
    }

    #[test]
    fn test_withdraw_rejects_invalid_amounts() {
        let mut account = account_with(15_000);
        for cents in [0, -1, -15_000] {
            assert!(matches!(
                account.withdraw(Money::from_cents(cents)),
                Err(LedgerError::InvalidAmount { .. })
            ));
        }
        for cents in [15_001, 20_000, i64::MAX] {
            assert_eq!(
                account.withdraw(Money::from_cents(cents)),
                Err(LedgerError::InsufficientFunds {
                    balance: Money::from_cents(15_000),
                    requested: Money::from_cents(cents),
                })
            );
        }
        assert_eq!(account.inquire(), Money::from_cents(15_000));
    }

    #[test]
    fn test_withdraw_subtracts_valid_amounts() {
        let mut account = account_with(15_000);
        assert_eq!(account.withdraw(Money::from_cents(1)), Ok(Money::from_cents(14_999)));
        assert_eq!(account.withdraw(Money::from_cents(4_999)), Ok(Money::from_cents(10_000)));
        // Exactly the balance is allowed
        assert_eq!(account.withdraw(Money::from_cents(10_000)), Ok(Money::zero()));
        assert!(account.withdraw(Money::from_cents(1)).is_err());
    }

    #[test]
    fn test_negative_seed_blocks_withdrawals_but_not_deposits() {
        let mut account = account_with(-500);
        assert!(matches!(
            account.withdraw(Money::from_cents(1)),
            Err(LedgerError::InsufficientFunds { .. })
        ));
        assert_eq!(account.deposit(Money::from_cents(700)), Ok(Money::from_cents(200)));
    }

    #[test]
    fn test_session_lifecycle() {
        let mut directory = AccountDirectory::new();
        directory.create("A1", "1234", Money::from_cents(10_000)).unwrap();

        assert!(Session::open(&mut directory, "A1", "nope").is_err());

        let mut session = Session::open(&mut directory, "A1", "1234").unwrap();
        assert_eq!(session.account_id(), "A1");
        session.deposit(Money::from_cents(5_000)).unwrap();
        session.withdraw(Money::from_cents(2_500)).unwrap();
        assert_eq!(session.inquire(), Money::from_cents(12_500));
        session.close();

        // Changes made during the session stay in the directory
        let account = directory.authenticate("A1", "1234").unwrap();
        assert_eq!(account.inquire(), Money::from_cents(12_500));
    }
}
