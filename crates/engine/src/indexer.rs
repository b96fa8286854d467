//! In-memory indexer: document store plus full-text engine
//!
//! The store is authoritative for full documents; the engine only holds a
//! projection used for matching and ranking. Every mutation takes the store
//! write lock, writes the engine first and commits to the store only once
//! the engine accepted the projection, so a rejected write leaves both
//! sides as they were.
//!
//! Searches query the engine without holding the store lock. Each hit is
//! then resolved under a store read lock; because writers hold the write
//! lock across both the engine and store writes, a hit is never resolved
//! against a store that has not yet caught up.

use crate::config::IndexerConfig;
use crate::iterator::InMemoryIterator;
use crate::store::DocStore;
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use textindex_core::{Document, Error, Indexer, LinkId, Query, Result, SearchIterator};
use textindex_search::{EngineError, IndexedFields, InvertedIndex, TextEngine};
use tracing::{debug, info, warn};

pub(crate) struct Shared<E> {
    pub(crate) engine: E,
    pub(crate) store: RwLock<DocStore>,
    closed: AtomicBool,
}

/// Indexer keeping documents and the full-text index in process memory
///
/// Cheap handles are not provided; share an instance behind an `Arc`.
/// Iterators returned by [`search`](Indexer::search) keep the underlying
/// state alive on their own.
pub struct InMemoryIndexer<E: TextEngine = InvertedIndex> {
    shared: Arc<Shared<E>>,
    config: IndexerConfig,
}

impl<E: TextEngine> std::fmt::Debug for InMemoryIndexer<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryIndexer")
            .field("documents", &self.len())
            .field("closed", &self.is_closed())
            .field("config", &self.config)
            .finish()
    }
}

impl InMemoryIndexer<InvertedIndex> {
    /// Create an indexer with the default configuration
    pub fn new() -> Self {
        let config = IndexerConfig::default();
        let engine = config.build_engine();
        Self::from_parts(engine, config)
    }

    /// Create an indexer from a configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the configuration fails validation.
    pub fn with_config(config: IndexerConfig) -> Result<Self> {
        config.validate()?;
        let engine = config.build_engine();
        Ok(Self::from_parts(engine, config))
    }
}

impl Default for InMemoryIndexer<InvertedIndex> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: TextEngine> InMemoryIndexer<E> {
    /// Create an indexer over a caller-supplied engine
    ///
    /// Scoring and capacity settings in `config` are not applied to `engine`;
    /// only `batch_size` is used.
    pub fn with_engine(engine: E, config: IndexerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(engine, config))
    }

    fn from_parts(engine: E, config: IndexerConfig) -> Self {
        info!(
            target: "textindex::indexer",
            batch_size = config.batch_size,
            max_documents = ?config.max_documents,
            "Indexer created"
        );
        InMemoryIndexer {
            shared: Arc::new(Shared {
                engine,
                store: RwLock::new(DocStore::new()),
                closed: AtomicBool::new(false),
            }),
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    /// Number of stored documents, placeholders included
    pub fn len(&self) -> usize {
        self.shared.store.read().len()
    }

    /// Whether no documents are stored
    pub fn is_empty(&self) -> bool {
        self.shared.store.read().is_empty()
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::Acquire)
    }

    /// Close the engine; further operations fail with a backend error
    ///
    /// Open iterators fail on their next page request. Idempotent.
    pub fn close(&self) -> Result<()> {
        // Serialize with in-flight writers
        let _store = self.shared.store.write();
        if self.shared.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        self.shared
            .engine
            .close()
            .map_err(|e| Error::backend("close", "", e))?;
        info!(target: "textindex::indexer", "Indexer closed");
        Ok(())
    }

    fn ensure_open(&self, op: &'static str, key: &str) -> Result<()> {
        if self.is_closed() {
            return Err(Error::backend(op, key, EngineError::Closed));
        }
        Ok(())
    }

    /// Search returning the concrete iterator type
    pub fn search_iter(&self, query: &Query) -> Result<InMemoryIterator<E>> {
        self.ensure_open("search", &query.expression)?;
        InMemoryIterator::open(Arc::clone(&self.shared), query, self.config.batch_size)
    }

    fn write_projection(&self, op: &'static str, key: &str, doc: &Document) -> Result<()> {
        let fields = IndexedFields::new(doc.title.clone(), doc.content.clone(), doc.page_rank);
        self.shared.engine.index(key, fields).map_err(|e| {
            warn!(target: "textindex::indexer", op, key, error = %e, "Engine rejected write");
            Error::backend(op, key, e)
        })
    }
}

impl<E> Indexer for InMemoryIndexer<E>
where
    E: TextEngine + 'static,
{
    fn index(&self, doc: &mut Document) -> Result<()> {
        if doc.link_id.is_nil() {
            return Err(Error::MissingKey);
        }
        let key = doc.key();
        let mut copy = doc.clone();
        copy.indexed_at = Utc::now();

        let mut store = self.shared.store.write();
        self.ensure_open("index", &key)?;

        let existing = store.score_of(&key);
        if let Some(page_rank) = existing {
            copy.page_rank = page_rank;
        }
        self.write_projection("index", &key, &copy)?;
        let indexed_at = copy.indexed_at;
        store.insert(key.clone(), copy);
        drop(store);
        doc.indexed_at = indexed_at;

        debug!(
            target: "textindex::indexer",
            key = %key,
            reindex = existing.is_some(),
            "Document indexed"
        );
        Ok(())
    }

    fn find_by_id(&self, link_id: LinkId) -> Result<Document> {
        let key = link_id.to_string();
        self.ensure_open("find_by_id", &key)?;
        self.shared
            .store
            .read()
            .get(&key)
            .ok_or(Error::NotFound(link_id))
    }

    fn search(&self, query: &Query) -> Result<Box<dyn SearchIterator>> {
        let it = self.search_iter(query)?;
        Ok(Box::new(it))
    }

    fn update_score(&self, link_id: LinkId, score: f64) -> Result<()> {
        if link_id.is_nil() {
            return Err(Error::MissingKey);
        }
        let key = link_id.to_string();

        let mut store = self.shared.store.write();
        self.ensure_open("update_score", &key)?;

        let (mut updated, created) = match store.get(&key) {
            Some(doc) => (doc, false),
            None => (Document::placeholder(link_id, score), true),
        };
        updated.page_rank = score;
        self.write_projection("update_score", &key, &updated)?;
        store.insert(key.clone(), updated);
        drop(store);

        debug!(
            target: "textindex::indexer",
            key = %key,
            score,
            placeholder = created,
            "Score updated"
        );
        Ok(())
    }
}
