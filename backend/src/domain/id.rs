//! Store-generated document identifiers.

use bson::oid::ObjectId;

/// Rejection raised when text is not a well-formed document identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a valid document identifier: {value}")]
pub struct InvalidDocumentId {
    /// The rejected text.
    pub value: String,
}

/// Opaque identifier assigned to every stored document.
///
/// Wire representation is the store's 24-character hex form. Parsing only
/// checks the syntactic shape; it says nothing about whether a document with
/// this identifier exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(ObjectId);

impl DocumentId {
    /// Parse the 24-hex wire form of an identifier.
    ///
    /// # Errors
    /// Returns [`InvalidDocumentId`] when `raw` is not 24 hex characters.
    pub fn parse(raw: &str) -> Result<Self, InvalidDocumentId> {
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| InvalidDocumentId {
                value: raw.to_owned(),
            })
    }

    /// Mint a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// The underlying store identifier.
    #[must_use]
    pub const fn as_object_id(self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for DocumentId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl std::str::FromStr for DocumentId {
    type Err = InvalidDocumentId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
