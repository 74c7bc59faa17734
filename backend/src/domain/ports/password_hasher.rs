//! Driven port for one-way password hashing.

/// Errors raised by hashing adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// The hashing primitive rejected the input or failed internally.
    #[error("password hashing failed: {message}")]
    Hash {
        /// Primitive-level failure description, for logs only.
        message: String,
    },
}

impl PasswordHashError {
    /// Hashing-primitive failure.
    pub fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }
}

/// Port for producing one-way password digests.
///
/// Plain-text passwords must not survive past this boundary: the service
/// hashes before handing anything to a store.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Digest a plain-text password.
    fn hash(&self, plain: &str) -> Result<String, PasswordHashError>;
}

/// Fixture hasher for tests that do not exercise hashing behaviour.
///
/// Produces a recognisable, reversible marker instead of a real digest.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

impl PasswordHasher for FixturePasswordHasher {
    fn hash(&self, plain: &str) -> Result<String, PasswordHashError> {
        Ok(format!("hashed:{plain}"))
    }
}
