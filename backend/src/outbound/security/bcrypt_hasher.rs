//! bcrypt implementation of the password hashing port.

use crate::domain::ports::{PasswordHashError, PasswordHasher};

const DEFAULT_COST: u32 = 10;

/// Hasher producing bcrypt digests.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with an explicit cost factor.
    pub const fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::with_cost(DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plain: &str) -> Result<String, PasswordHashError> {
        bcrypt::hash(plain, self.cost).map_err(|err| PasswordHashError::hash(err.to_string()))
    }
}
