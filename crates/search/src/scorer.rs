//! Relevance scoring for the full-text engine
//!
//! This module provides:
//! - Scorer trait for pluggable scoring algorithms
//! - ScorerContext for corpus-level statistics
//! - SearchDoc: per-candidate term statistics
//! - BM25LiteScorer default implementation
//!
//! Relevance is the secondary sort key of the engine; the externally
//! computed page rank always dominates it.

use std::collections::HashMap;

// ============================================================================
// SearchDoc
// ============================================================================

/// Term statistics of one candidate document
///
/// An ephemeral view built during search from posting lists; the engine
/// never keeps the original text around.
#[derive(Debug, Clone, Default)]
pub struct SearchDoc {
    /// Document length in tokens (title and content)
    pub doc_len: u32,

    /// Frequency of each matched query term
    pub term_freqs: HashMap<String, u32>,

    /// Whether any query term occurs in the title
    pub title_match: bool,
}

impl SearchDoc {
    /// Create an empty SearchDoc of the given length
    pub fn new(doc_len: u32) -> Self {
        SearchDoc {
            doc_len,
            term_freqs: HashMap::new(),
            title_match: false,
        }
    }

    /// Builder: record a term frequency
    pub fn with_term(mut self, term: &str, tf: u32) -> Self {
        self.term_freqs.insert(term.to_string(), tf);
        self
    }

    /// Builder: mark a title match
    pub fn with_title_match(mut self, title_match: bool) -> Self {
        self.title_match = title_match;
        self
    }
}

// ============================================================================
// ScorerContext
// ============================================================================

/// Corpus-level statistics needed by BM25
#[derive(Debug, Clone, Default)]
pub struct ScorerContext {
    /// Total documents in corpus (for IDF calculation)
    pub total_docs: usize,

    /// Document frequency per term (for IDF calculation)
    pub doc_freqs: HashMap<String, usize>,

    /// Average document length in tokens (for length normalization)
    pub avg_doc_len: f32,
}

impl ScorerContext {
    /// Create a new ScorerContext
    pub fn new(total_docs: usize) -> Self {
        ScorerContext {
            total_docs,
            doc_freqs: HashMap::new(),
            avg_doc_len: 0.0,
        }
    }

    /// Compute IDF for a term
    ///
    /// IDF(t) = ln((N - df + 0.5) / (df + 0.5) + 1)
    pub fn idf(&self, term: &str) -> f32 {
        let df = self.doc_freqs.get(term).copied().unwrap_or(0) as f32;
        let n = self.total_docs as f32;
        ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
    }

    /// Add document frequency for a term
    pub fn add_doc_freq(&mut self, term: &str, count: usize) {
        self.doc_freqs.insert(term.to_string(), count);
    }

    /// Set average document length
    pub fn with_avg_doc_len(mut self, len: f32) -> Self {
        self.avg_doc_len = len;
        self
    }
}

// ============================================================================
// Scorer Trait
// ============================================================================

/// Pluggable scoring interface
///
/// Returns a relevance score where higher = more relevant.
pub trait Scorer: Send + Sync {
    /// Score a candidate against the query terms
    fn score(&self, doc: &SearchDoc, query_terms: &[String], ctx: &ScorerContext) -> f32;

    /// Name for debugging and logging
    fn name(&self) -> &str;
}

// ============================================================================
// BM25LiteScorer
// ============================================================================

/// BM25-inspired scorer
///
/// For each query term t:
/// score += IDF(t) * (tf * (k1 + 1)) / (tf + k1 * (1 - b + b * dl/avgdl))
///
/// The sum is multiplied by `title_boost` when a query term occurs in the
/// document title.
#[derive(Debug, Clone)]
pub struct BM25LiteScorer {
    k1: f32,
    b: f32,
    title_boost: f32,
}

impl Default for BM25LiteScorer {
    fn default() -> Self {
        BM25LiteScorer {
            k1: 1.2,
            b: 0.75,
            title_boost: 1.2,
        }
    }
}

impl BM25LiteScorer {
    /// Create a new BM25LiteScorer with custom parameters
    pub fn new(k1: f32, b: f32) -> Self {
        BM25LiteScorer {
            k1,
            b,
            ..Default::default()
        }
    }

    /// Builder: set title boost factor (1.0 disables it)
    pub fn with_title_boost(mut self, factor: f32) -> Self {
        self.title_boost = factor;
        self
    }
}

impl Scorer for BM25LiteScorer {
    fn score(&self, doc: &SearchDoc, query_terms: &[String], ctx: &ScorerContext) -> f32 {
        if query_terms.is_empty() || doc.doc_len == 0 {
            return 0.0;
        }

        let doc_len = doc.doc_len as f32;
        let avg_len = ctx.avg_doc_len.max(1.0);
        let mut score = 0.0;

        for term in query_terms {
            let tf = doc.term_freqs.get(term).copied().unwrap_or(0) as f32;
            if tf == 0.0 {
                continue;
            }
            let tf_component = (tf * (self.k1 + 1.0))
                / (tf + self.k1 * (1.0 - self.b + self.b * doc_len / avg_len));
            score += ctx.idf(term) * tf_component;
        }

        if doc.title_match {
            score *= self.title_boost;
        }

        score
    }

    fn name(&self) -> &str {
        "bm25-lite"
    }
}
