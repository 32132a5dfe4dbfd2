//! Query debounce control
//!
//! Collapses a burst of keystrokes into one committed query once the input
//! has been quiet for the configured delay. The raw text is recorded right
//! away so the input field never lags behind the user. Clearing the input
//! commits immediately, since the empty query costs no request.
//!
//! Time is passed in explicitly; the owner decides when to poll, typically by
//! sleeping until [`QueryDebouncer::deadline`].

use std::time::Duration;
use tokio::time::Instant;

/// Debounce controller turning raw input into committed queries
#[derive(Debug)]
pub struct QueryDebouncer {
    /// Quiet window before a pending query is committed (default: 400ms)
    pub debounce_delay: Duration,

    /// Latest text exactly as typed
    raw_text: String,

    /// Query waiting for the quiet window to elapse
    pending_query: Option<String>,

    /// When the pending query becomes ready
    deadline: Option<Instant>,
}

impl QueryDebouncer {
    /// Create new debouncer with the default delay (400ms)
    pub fn new() -> Self {
        Self::with_delay(Duration::from_millis(crate::config::DEFAULT_DEBOUNCE_MS))
    }

    /// Create new debouncer with custom delay
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            debounce_delay: delay,
            raw_text: String::new(),
            pending_query: None,
            deadline: None,
        }
    }

    /// Record a raw input change.
    ///
    /// Any pending commit is cancelled. Returns `Some("")` when the input is
    /// blank and must be committed right now; otherwise schedules a commit
    /// `debounce_delay` after `now` and returns `None`.
    pub fn on_raw_input(&mut self, text: impl Into<String>, now: Instant) -> Option<String> {
        let text = text.into();
        self.raw_text = text.clone();
        self.clear_pending();

        if text.trim().is_empty() {
            log::trace!("Blank input, committing empty query immediately");
            return Some(String::new());
        }

        self.pending_query = Some(text);
        self.deadline = Some(now + self.debounce_delay);
        None
    }

    /// Take the pending query if its quiet window has elapsed
    pub fn poll_commit(&mut self, now: Instant) -> Option<String> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending_query.take()
            }
            _ => None,
        }
    }

    /// Drop the pending commit, if any
    pub fn clear_pending(&mut self) {
        self.pending_query = None;
        self.deadline = None;
    }

    pub fn has_pending_commit(&self) -> bool {
        self.pending_query.is_some()
    }

    /// Instant at which the pending query becomes ready
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Remaining time until the pending query becomes ready
    pub fn time_until_ready(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }
}

impl Default for QueryDebouncer {
    fn default() -> Self {
        Self::new()
    }
}
