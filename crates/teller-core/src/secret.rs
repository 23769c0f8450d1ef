//! # Secret Module
//!
//! One policy for every shared secret in Teller: ATM PINs and inventory
//! passwords are stored as salted Argon2id hashes in PHC string format and
//! checked with the Argon2 verifier. Plaintext never outlives the call that
//! received it.
//!
//! ```text
//! create("A1", "1234")                    authenticate("A1", "1234")
//!      │                                        │
//!      ▼                                        ▼
//! SecretHash::new("1234")                 hash.verify("1234")
//!      │  random salt                           │  re-derive with stored salt
//!      ▼                                        ▼
//! "$argon2id$v=19$m=19456,t=2,p=1$..."    true / false
//! ```

use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::SecretError;

/// A salted hash of a PIN or password.
///
/// `Debug` is redacted so accounts and users can be logged freely.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretHash(String);

impl SecretHash {
    /// Hashes `plaintext` with a fresh random salt.
    ///
    /// ## Example
    /// ```rust
    /// use teller_core::SecretHash;
    ///
    /// let hash = SecretHash::new("1234").unwrap();
    /// assert!(hash.verify("1234"));
    /// assert!(!hash.verify("1235"));
    /// ```
    pub fn new(plaintext: &str) -> Result<Self, SecretError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| SecretError::Hash(e.to_string()))?;

        Ok(SecretHash(hash.to_string()))
    }

    /// Wraps a PHC string previously produced by [`SecretHash::new`],
    /// e.g. one read back from the `users` table.
    pub fn from_phc(phc: impl Into<String>) -> Result<Self, SecretError> {
        let phc = phc.into();
        PasswordHash::new(&phc).map_err(|e| SecretError::Malformed(e.to_string()))?;
        Ok(SecretHash(phc))
    }

    /// Checks a candidate secret. Comparison is exact (case-sensitive, no
    /// trimming) and the final digest comparison is constant-time.
    pub fn verify(&self, candidate: &str) -> bool {
        let parsed = match PasswordHash::new(&self.0) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }

    /// The PHC string, for storage.
    pub fn as_phc(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretHash(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_is_exact() {
        let hash = SecretHash::new("Secret").unwrap();
        assert!(hash.verify("Secret"));
        assert!(!hash.verify("secret"));
        assert!(!hash.verify("Secret "));
        assert!(!hash.verify(""));
    }

    #[test]
    fn test_salt_differs_per_hash() {
        let a = SecretHash::new("1234").unwrap();
        let b = SecretHash::new("1234").unwrap();
        assert_ne!(a.as_phc(), b.as_phc());
        assert!(!a.as_phc().contains("1234"));
    }

    #[test]
    fn test_phc_round_trip_through_storage() {
        let stored = SecretHash::new("hunter22").unwrap().as_phc().to_string();
        let loaded = SecretHash::from_phc(stored).unwrap();
        assert!(loaded.verify("hunter22"));
    }

    #[test]
    fn test_malformed_phc_rejected() {
        assert!(matches!(
            SecretHash::from_phc("5e884898da28047151d0e56f8dc6292773603d0d"),
            Err(SecretError::Malformed(_))
        ));
    }

    #[test]
    fn test_debug_is_redacted() {
        let hash = SecretHash::new("1234").unwrap();
        assert_eq!(format!("{hash:?}"), "SecretHash(<redacted>)");
    }
}
