//! Search request orchestration
//!
//! [`SearchController`] decides when a page request goes out and whether an
//! answer may touch the result set. Requests are never cancelled; instead
//! every committed query starts a new generation and answers tagged with an
//! older generation are dropped on arrival.
//!
//! The controller performs no I/O. It hands back a [`FetchRequest`] and the
//! owner runs it, then reports the outcome through [`SearchController::resolve`].

use crate::config::DEFAULT_PAGE_SIZE;
use crate::error::FetchError;
use crate::result_set::ResultSet;
use crate::types::{Page, Query};

/// Identifies one request: the generation that issued it and its offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub generation: u64,
    pub offset: usize,
}

/// A page request the owner must run against a `PageFetcher`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub query: Query,
    pub limit: usize,
}

impl FetchRequest {
    pub fn generation(&self) -> u64 {
        self.ticket.generation
    }

    pub fn offset(&self) -> usize {
        self.ticket.offset
    }
}

/// Where the controller is for the current query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No query, nothing shown
    Idle,
    /// First page in flight
    Fetching,
    /// At least the first page applied, more may be available
    Loaded,
    /// Continuation page in flight
    FetchingMore,
    /// Nothing more will be fetched for this query
    Exhausted,
}

/// What happened to a fetch outcome handed to [`SearchController::resolve`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Discarded,
}

/// State machine wiring committed queries and load-more triggers to fetches
#[derive(Debug)]
pub struct SearchController {
    page_size: usize,
    generation: u64,
    phase: Phase,
    in_flight: Option<FetchTicket>,
    results: ResultSet,
}

impl SearchController {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            generation: 0,
            phase: Phase::Idle,
            in_flight: None,
            results: ResultSet::new(),
        }
    }

    /// Handle a committed query.
    ///
    /// Always starts a new generation, so anything still in flight becomes
    /// stale. The empty query stops there; any other query resets the result
    /// set and asks for its first page.
    pub fn commit_query(&mut self, text: &str) -> Option<FetchRequest> {
        self.generation += 1;
        self.in_flight = None;

        if text.is_empty() {
            log::debug!("Generation {}: empty query, going idle", self.generation);
            self.results.reset(Query::default());
            self.phase = Phase::Idle;
            return None;
        }

        let query = Query::new(text);
        log::debug!("Generation {}: fetching first page for {:?}", self.generation, text);
        self.results.reset(query.clone());
        self.results.begin_load();
        self.phase = Phase::Fetching;
        Some(self.issue(query, 0))
    }

    /// Ask for the next page, if the current query has one and nothing is
    /// already in flight
    pub fn load_more(&mut self) -> Option<FetchRequest> {
        if self.phase != Phase::Loaded || !self.results.has_more() || self.results.is_loading() {
            return None;
        }

        let offset = self.results.len();
        log::debug!(
            "Generation {}: loading more for {:?} from offset {}",
            self.generation,
            self.results.query().as_str(),
            offset
        );
        let query = self.results.query().clone();
        self.results.begin_load();
        self.phase = Phase::FetchingMore;
        Some(self.issue(query, offset))
    }

    /// Apply the outcome of a request if it is the one currently awaited
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Page, FetchError>,
    ) -> Resolution {
        if self.in_flight != Some(ticket) {
            log::debug!(
                "Discarding stale answer (generation {}, offset {}); current generation is {}",
                ticket.generation,
                ticket.offset,
                self.generation
            );
            return Resolution::Discarded;
        }
        self.in_flight = None;

        match outcome {
            Ok(mut page) => {
                let is_first_page = self.phase == Phase::Fetching;
                let loaded_after = if is_first_page {
                    page.items.len()
                } else {
                    self.results.len() + page.items.len()
                };

                if page.items.is_empty() {
                    if page.total > loaded_after {
                        log::warn!(
                            "Empty page at offset {} (total claimed {}), treating as exhausted",
                            ticket.offset,
                            page.total
                        );
                    }
                    page.total = loaded_after;
                }
                page.total = page.total.max(loaded_after);

                self.results.apply_page(page, is_first_page);
                self.phase = if self.results.has_more() {
                    Phase::Loaded
                } else {
                    Phase::Exhausted
                };
            }
            Err(err) => {
                log::info!(
                    "Search for {:?} failed: {}",
                    self.results.query().as_str(),
                    err
                );
                self.results.apply_failure(err.kind());
                self.phase = Phase::Exhausted;
            }
        }

        Resolution::Applied
    }

    fn issue(&mut self, query: Query, offset: usize) -> FetchRequest {
        let ticket = FetchTicket {
            generation: self.generation,
            offset,
        };
        self.in_flight = Some(ticket);
        FetchRequest {
            ticket,
            query,
            limit: self.page_size,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.results.is_loading()
    }

    pub fn has_more(&self) -> bool {
        self.results.has_more()
    }
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
