//! Search request types
//!
//! - QueryType: how the expression is interpreted
//! - Query: immutable search request passed by the caller

use serde::{Deserialize, Serialize};

/// The way an indexer interprets a search expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QueryType {
    /// Match each expression term, in any order
    #[default]
    Match,
    /// Match the expression as an exact phrase
    Phrase,
}

/// Parameters for searching indexed documents
///
/// # Examples
///
/// ```
/// use textindex_core::{Query, QueryType};
///
/// let query = Query::phrase("brown fox").with_offset(20);
/// assert_eq!(query.query_type, QueryType::Phrase);
/// assert_eq!(query.offset, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Query {
    /// Interpretation of the expression
    pub query_type: QueryType,

    /// Raw search text entered by the user
    pub expression: String,

    /// Number of search results to skip
    pub offset: u64,
}

impl Query {
    /// Create a query of the given type starting at offset 0
    pub fn new(query_type: QueryType, expression: impl Into<String>) -> Self {
        Query {
            query_type,
            expression: expression.into(),
            offset: 0,
        }
    }

    /// Terms in any order
    pub fn match_terms(expression: impl Into<String>) -> Self {
        Self::new(QueryType::Match, expression)
    }

    /// Exact phrase
    pub fn phrase(expression: impl Into<String>) -> Self {
        Self::new(QueryType::Phrase, expression)
    }

    /// Builder: set result offset
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }
}
