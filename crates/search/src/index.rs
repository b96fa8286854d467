//! In-memory inverted index with positional postings
//!
//! This module provides:
//! - InvertedIndex: the embedded full-text engine
//! - PostingList / PostingEntry: per-term postings with word positions
//! - Term ("any term, any order") and phrase ("adjacent, in order") matching
//! - Version watermark incremented on every write
//!
//! # Projection only
//!
//! The index keeps postings, document lengths and the rank used for
//! sorting. It never stores the original text and cannot rebuild a
//! document; hits carry only the key the document was indexed under.
//!
//! # Positions
//!
//! Title tokens occupy positions `0..title_span`. Content tokens start at
//! `title_span + POSITION_GAP`, so a phrase never matches across the two
//! fields.
//!
//! # Thread Safety
//!
//! All state sits behind one `parking_lot::RwLock`. Searches take the read
//! side and run concurrently; writes are serialized.

use crate::engine::{EngineHit, EngineQuery, EngineResults, IndexedFields, MatchMode, TextEngine};
use crate::error::EngineError;
use crate::scorer::{BM25LiteScorer, Scorer, ScorerContext, SearchDoc};
use crate::tokenizer::tokenize_with_positions;
use parking_lot::RwLock;
use std::cmp::Ordering as CmpOrdering;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Positions left empty between the title and the content
pub const POSITION_GAP: u32 = 100;

// ============================================================================
// PostingEntry
// ============================================================================

/// Occurrences of a term in one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingEntry {
    /// Internal document identifier
    pub doc_id: u32,
    /// Ascending word positions of the term
    pub positions: Vec<u32>,
}

impl PostingEntry {
    /// Create a new posting entry
    pub fn new(doc_id: u32, positions: Vec<u32>) -> Self {
        PostingEntry { doc_id, positions }
    }

    /// Term frequency in this document
    pub fn tf(&self) -> u32 {
        self.positions.len() as u32
    }

    fn has_position(&self, pos: u32) -> bool {
        self.positions.binary_search(&pos).is_ok()
    }
}

// ============================================================================
// PostingList
// ============================================================================

/// Documents containing a term, ordered by doc_id
#[derive(Debug, Clone, Default)]
pub struct PostingList {
    /// Document entries
    pub entries: Vec<PostingEntry>,
}

impl PostingList {
    /// Create a new empty posting list
    pub fn new() -> Self {
        PostingList { entries: vec![] }
    }

    /// Add or replace the entry for a document
    pub fn add(&mut self, entry: PostingEntry) {
        match self
            .entries
            .binary_search_by_key(&entry.doc_id, |e| e.doc_id)
        {
            Ok(idx) => self.entries[idx] = entry,
            Err(idx) => self.entries.insert(idx, entry),
        }
    }

    /// Entry for a document, if the term occurs in it
    pub fn get(&self, doc_id: u32) -> Option<&PostingEntry> {
        self.entries
            .binary_search_by_key(&doc_id, |e| e.doc_id)
            .ok()
            .map(|idx| &self.entries[idx])
    }

    /// Remove the entry for a document; returns whether one was removed
    pub fn remove_by_id(&mut self, doc_id: u32) -> bool {
        match self.entries.binary_search_by_key(&doc_id, |e| e.doc_id) {
            Ok(idx) => {
                self.entries.remove(idx);
                true
            }
            Err(_) => false,
        }
    }

    /// Number of documents containing this term
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if posting list is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Index state
// ============================================================================

#[derive(Debug, Clone)]
struct DocEntry {
    key: String,
    page_rank: f64,
    doc_len: u32,
    title_span: u32,
    terms: Vec<String>,
}

#[derive(Debug, Default)]
struct IndexState {
    postings: HashMap<String, PostingList>,
    docs: HashMap<u32, DocEntry>,
    key_to_id: HashMap<String, u32>,
    next_doc_id: u32,
    total_doc_len: usize,
    closed: bool,
}

impl IndexState {
    fn remove_postings(&mut self, doc_id: u32) {
        let Some(entry) = self.docs.remove(&doc_id) else {
            return;
        };
        for term in &entry.terms {
            let now_empty = match self.postings.get_mut(term) {
                Some(list) => {
                    list.remove_by_id(doc_id);
                    list.is_empty()
                }
                None => false,
            };
            if now_empty {
                self.postings.remove(term);
            }
        }
        self.total_doc_len -= entry.doc_len as usize;
    }

    fn doc_freq(&self, term: &str) -> usize {
        self.postings.get(term).map(|l| l.len()).unwrap_or(0)
    }

    fn avg_doc_len(&self) -> f32 {
        if self.docs.is_empty() {
            return 0.0;
        }
        self.total_doc_len as f32 / self.docs.len() as f32
    }

    /// Documents containing at least one of `terms`
    fn match_terms(&self, terms: &[String]) -> Vec<(u32, SearchDoc)> {
        let mut matched: HashMap<u32, SearchDoc> = HashMap::new();
        for term in terms {
            let Some(list) = self.postings.get(term) else {
                continue;
            };
            for posting in &list.entries {
                let Some(entry) = self.docs.get(&posting.doc_id) else {
                    continue;
                };
                let doc = matched
                    .entry(posting.doc_id)
                    .or_insert_with(|| SearchDoc::new(entry.doc_len));
                doc.term_freqs.insert(term.clone(), posting.tf());
                if posting.positions.first().is_some_and(|&p| p < entry.title_span) {
                    doc.title_match = true;
                }
            }
        }
        matched.into_iter().collect()
    }

    /// Documents containing `terms` at the same relative positions
    fn match_phrase(&self, terms: &[(String, u32)]) -> Vec<(u32, SearchDoc)> {
        let Some(lists) = terms
            .iter()
            .map(|(term, _)| self.postings.get(term))
            .collect::<Option<Vec<&PostingList>>>()
        else {
            return Vec::new();
        };
        let first_pos = terms[0].1;

        let mut matched = Vec::new();
        for anchor in &lists[0].entries {
            let Some(entry) = self.docs.get(&anchor.doc_id) else {
                continue;
            };
            let Some(per_term) = lists
                .iter()
                .map(|list| list.get(anchor.doc_id))
                .collect::<Option<Vec<&PostingEntry>>>()
            else {
                continue;
            };

            let mut occurrences = 0u32;
            let mut in_title = false;
            for &start in &anchor.positions {
                let aligned = terms
                    .iter()
                    .zip(&per_term)
                    .skip(1)
                    .all(|((_, qpos), posting)| posting.has_position(start + (qpos - first_pos)));
                if aligned {
                    occurrences += 1;
                    in_title |= start < entry.title_span;
                }
            }
            if occurrences == 0 {
                continue;
            }

            let mut doc = SearchDoc::new(entry.doc_len).with_title_match(in_title);
            for ((term, _), posting) in terms.iter().zip(&per_term) {
                doc.term_freqs.insert(term.clone(), posting.tf());
            }
            matched.push((anchor.doc_id, doc));
        }
        matched
    }
}

/// Sort order of hits: rank desc, relevance desc, key asc
fn rank_order(a: &(f64, f32, &str), b: &(f64, f32, &str)) -> CmpOrdering {
    b.0.total_cmp(&a.0)
        .then_with(|| b.1.total_cmp(&a.1))
        .then_with(|| a.2.cmp(b.2))
}

// ============================================================================
// InvertedIndex
// ============================================================================

/// Embedded full-text engine
pub struct InvertedIndex {
    state: RwLock<IndexState>,
    scorer: Box<dyn Scorer>,
    max_documents: Option<usize>,
    version: AtomicU64,
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl InvertedIndex {
    /// Create an empty, unbounded index scored with BM25
    pub fn new() -> Self {
        InvertedIndex {
            state: RwLock::new(IndexState::default()),
            scorer: Box::new(BM25LiteScorer::default()),
            max_documents: None,
            version: AtomicU64::new(0),
        }
    }

    /// Builder: replace the relevance scorer
    pub fn with_scorer(mut self, scorer: impl Scorer + 'static) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    /// Builder: cap the number of distinct keys
    pub fn with_max_documents(mut self, limit: Option<usize>) -> Self {
        self.max_documents = limit;
        self
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Get total number of indexed documents
    pub fn total_docs(&self) -> usize {
        self.state.read().docs.len()
    }

    /// Get document frequency for a term
    pub fn doc_freq(&self, term: &str) -> usize {
        self.state.read().doc_freq(term)
    }

    /// Get average document length in tokens
    pub fn avg_doc_len(&self) -> f32 {
        self.state.read().avg_doc_len()
    }

    /// Whether a projection is stored under `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.state.read().key_to_id.contains_key(key)
    }

    /// Postings for a term
    pub fn lookup(&self, term: &str) -> Option<PostingList> {
        self.state.read().postings.get(term).cloned()
    }

    /// Get current version
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Whether `close` has been called
    pub fn is_closed(&self) -> bool {
        self.state.read().closed
    }

    /// Name of the relevance scorer
    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }
}

impl TextEngine for InvertedIndex {
    fn index(&self, key: &str, fields: IndexedFields) -> Result<(), EngineError> {
        let (title_terms, title_span) = tokenize_with_positions(&fields.title);
        let (content_terms, _) = tokenize_with_positions(&fields.content);
        let content_offset = title_span + POSITION_GAP;

        let mut positions: HashMap<String, Vec<u32>> = HashMap::new();
        for (term, pos) in title_terms {
            positions.entry(term).or_default().push(pos);
        }
        for (term, pos) in content_terms {
            positions.entry(term).or_default().push(pos + content_offset);
        }
        let doc_len: u32 = positions.values().map(|p| p.len() as u32).sum();

        let mut guard = self.state.write();
        let state = &mut *guard;
        if state.closed {
            return Err(EngineError::Closed);
        }

        let doc_id = match state.key_to_id.get(key).copied() {
            Some(id) => {
                state.remove_postings(id);
                id
            }
            None => {
                if let Some(limit) = self.max_documents {
                    if state.key_to_id.len() >= limit {
                        return Err(EngineError::CapacityExceeded { limit });
                    }
                }
                let id = state.next_doc_id;
                state.next_doc_id += 1;
                state.key_to_id.insert(key.to_string(), id);
                id
            }
        };

        let mut terms = Vec::with_capacity(positions.len());
        for (term, term_positions) in positions {
            state
                .postings
                .entry(term.clone())
                .or_default()
                .add(PostingEntry::new(doc_id, term_positions));
            terms.push(term);
        }
        state.docs.insert(
            doc_id,
            DocEntry {
                key: key.to_string(),
                page_rank: fields.page_rank,
                doc_len,
                title_span,
                terms,
            },
        );
        state.total_doc_len += doc_len as usize;
        self.version.fetch_add(1, Ordering::Release);
        Ok(())
    }

    fn search(&self, query: &EngineQuery) -> Result<EngineResults, EngineError> {
        let (query_terms, _) = tokenize_with_positions(&query.expression);

        let state = self.state.read();
        if state.closed {
            return Err(EngineError::Closed);
        }
        if query_terms.is_empty() {
            return Ok(EngineResults::default());
        }

        let mut seen = HashSet::new();
        let unique: Vec<String> = query_terms
            .iter()
            .filter(|(t, _)| seen.insert(t.as_str()))
            .map(|(t, _)| t.clone())
            .collect();

        let mut ctx = ScorerContext::new(state.docs.len()).with_avg_doc_len(state.avg_doc_len());
        for term in &unique {
            ctx.add_doc_freq(term, state.doc_freq(term));
        }

        let candidates = match query.mode {
            MatchMode::Terms => state.match_terms(&unique),
            MatchMode::Phrase => state.match_phrase(&query_terms),
        };

        let mut ranked: Vec<(f64, f32, &str)> = candidates
            .iter()
            .filter_map(|(doc_id, doc)| {
                let entry = state.docs.get(doc_id)?;
                let relevance = self.scorer.score(doc, &unique, &ctx);
                Some((entry.page_rank, relevance, entry.key.as_str()))
            })
            .collect();
        ranked.sort_by(rank_order);

        let total = ranked.len() as u64;
        let hits: Vec<EngineHit> = ranked
            .into_iter()
            .skip(query.from)
            .take(query.size)
            .map(|(page_rank, relevance, key)| EngineHit {
                key: key.to_string(),
                page_rank,
                relevance,
            })
            .collect();

        debug!(
            target: "textindex::search",
            expression = %query.expression,
            mode = ?query.mode,
            from = query.from,
            total,
            returned = hits.len(),
            "Engine query executed"
        );
        Ok(EngineResults { total, hits })
    }

    fn close(&self) -> Result<(), EngineError> {
        let mut state = self.state.write();
        if !state.closed {
            *state = IndexState {
                closed: true,
                ..IndexState::default()
            };
            self.version.fetch_add(1, Ordering::Release);
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
