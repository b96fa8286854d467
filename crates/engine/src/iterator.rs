//! Page-buffered search result iterator
//!
//! The iterator holds one page of engine hits at a time. Each call to
//! `next` resolves the following hit against the document store and latches
//! a copy of it; when the page runs out the next one is requested at
//! `from + batch_size`.

use crate::indexer::Shared;
use std::sync::Arc;
use textindex_core::{Document, Error, IteratorState, Query, QueryType, Result, SearchIterator};
use textindex_search::{EngineHit, EngineQuery, MatchMode, TextEngine};
use tracing::{debug, error};

/// Cursor over the results of one query against an `InMemoryIndexer`
pub struct InMemoryIterator<E: TextEngine> {
    shared: Arc<Shared<E>>,
    request: EngineQuery,
    hits: Vec<EngineHit>,
    page_idx: usize,
    // Absolute position of the next hit, including the query offset
    cum_idx: u64,
    total: u64,
    latest_total: u64,
    latched: Option<Document>,
    last_err: Option<Error>,
    state: IteratorState,
}

impl<E: TextEngine> std::fmt::Debug for InMemoryIterator<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryIterator")
            .field("expression", &self.request.expression)
            .field("from", &self.request.from)
            .field("cum_idx", &self.cum_idx)
            .field("total", &self.total)
            .field("state", &self.state)
            .finish()
    }
}

fn match_mode(query_type: QueryType) -> MatchMode {
    match query_type {
        QueryType::Match => MatchMode::Terms,
        QueryType::Phrase => MatchMode::Phrase,
    }
}

impl<E: TextEngine> InMemoryIterator<E> {
    /// Issue the first page request
    ///
    /// Failures here are returned to the caller of `search` rather than
    /// latched on the iterator.
    pub(crate) fn open(shared: Arc<Shared<E>>, query: &Query, batch_size: usize) -> Result<Self> {
        let from = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let request =
            EngineQuery::new(query.expression.clone(), match_mode(query.query_type), batch_size)
                .with_from(from);

        let page = shared
            .engine
            .search(&request)
            .map_err(|e| Error::backend("search", query.expression.clone(), e))?;

        let state = if page.hits.is_empty() {
            IteratorState::Exhausted
        } else {
            IteratorState::Ready
        };
        debug!(
            target: "textindex::iterator",
            expression = %query.expression,
            offset = query.offset,
            total = page.total,
            "Search iterator opened"
        );

        Ok(InMemoryIterator {
            shared,
            request,
            hits: page.hits,
            page_idx: 0,
            cum_idx: query.offset,
            total: page.total,
            latest_total: page.total,
            latched: None,
            last_err: None,
            state,
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> IteratorState {
        self.state
    }

    fn fail(&mut self, err: Error) -> bool {
        self.latched = None;
        self.last_err = Some(err);
        self.state = IteratorState::Errored;
        false
    }

    fn exhaust(&mut self) -> bool {
        self.latched = None;
        self.state = IteratorState::Exhausted;
        false
    }

    fn fetch_next_page(&mut self) -> Result<()> {
        self.request.from = self.request.from.saturating_add(self.request.size);
        let page = self
            .shared
            .engine
            .search(&self.request)
            .map_err(|e| Error::backend("search", self.request.expression.clone(), e))?;
        debug!(
            target: "textindex::iterator",
            from = self.request.from,
            returned = page.hits.len(),
            total = page.total,
            "Fetched result page"
        );
        self.latest_total = page.total;
        self.hits = page.hits;
        self.page_idx = 0;
        Ok(())
    }
}

impl<E: TextEngine> SearchIterator for InMemoryIterator<E> {
    fn next(&mut self) -> bool {
        if self.state != IteratorState::Ready {
            return false;
        }

        if self.page_idx >= self.hits.len() {
            if self.cum_idx >= self.latest_total {
                return self.exhaust();
            }
            if let Err(e) = self.fetch_next_page() {
                return self.fail(e);
            }
            if self.hits.is_empty() {
                return self.exhaust();
            }
        }

        let key = self.hits[self.page_idx].key.clone();
        let resolved = self.shared.store.read().get(&key);
        match resolved {
            Some(doc) => {
                self.latched = Some(doc);
                self.page_idx += 1;
                self.cum_idx += 1;
                true
            }
            None => {
                error!(
                    target: "textindex::iterator",
                    key = %key,
                    "Engine returned a key with no stored document"
                );
                self.fail(Error::InvariantViolation(format!(
                    "search hit {} has no stored document",
                    key
                )))
            }
        }
    }

    fn document(&self) -> Option<&Document> {
        self.latched.as_ref()
    }

    fn total_count(&self) -> u64 {
        self.total
    }

    fn error(&self) -> Option<&Error> {
        self.last_err.as_ref()
    }

    fn close(&mut self) -> Result<()> {
        self.latched = None;
        self.last_err = None;
        self.hits = Vec::new();
        self.state = IteratorState::Closed;
        Ok(())
    }
}
