//! Identifier codec
//!
//! External callers address documents with 24-digit hex strings; the store
//! keys them with BSON `ObjectId`s. Every reference field that has to be
//! turned into a lookup key goes through [`decode`].

use bson::oid::ObjectId;
use thiserror::Error;

/// The external string was not a well-formed identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid identifier: '{value}'")]
pub struct InvalidIdentifier {
    pub value: String,
}

/// Parse an external identifier into the store's native form
pub fn decode(value: &str) -> Result<ObjectId, InvalidIdentifier> {
    ObjectId::parse_str(value).map_err(|_| InvalidIdentifier {
        value: value.to_string(),
    })
}

/// Render a native identifier in its canonical external form (lowercase hex)
pub fn encode(id: &ObjectId) -> String {
    id.to_hex()
}
