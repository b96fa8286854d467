//! Identity types for indexed documents
//!
//! - LinkId: identifier of the link-graph entry a document was crawled from

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a crawled link
///
/// A LinkId wraps a UUID and references the corresponding link-graph
/// entry. The nil (all-zero) identifier never names a real document; the
/// indexer rejects it with [`Error::MissingKey`](crate::Error::MissingKey).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkId(Uuid);

impl LinkId {
    /// Create a new random LinkId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The nil identifier
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Create a LinkId from raw bytes
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Parse a LinkId from a string representation
    ///
    /// Accepts standard UUID format (with or without hyphens).
    /// Returns None if the string is not a valid UUID.
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    /// Get the raw bytes of this LinkId
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Whether this is the nil identifier
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for LinkId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for LinkId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
