//! In-flight request bookkeeping for a refresh cycle.
//!
//! # Design
//! Requests are keyed by target URL in a set. A cycle starts with the first
//! `begin` while idle and ends when `end` removes the last key; at that
//! moment the one-shot drain callback fires with the first error recorded
//! during the cycle. Errors after the first are kept for diagnostics only.
//! The tracker has no locking: it is owned by a `Session` and mutated from a
//! single coordination context.

use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use crate::error::SyncError;

/// One-shot callback fired when a cycle drains.
pub type DrainCallback = Box<dyn FnOnce(Option<SyncError>) + Send>;

/// In-flight requests of the current refresh cycle.
#[derive(Default)]
pub struct RequestTracker {
    pending: HashSet<String>,
    active: bool,
    first_error: Option<SyncError>,
    suppressed: Vec<SyncError>,
    on_drain: Option<DrainCallback>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an in-flight request. Starts a new cycle when idle, clearing
    /// the errors of the previous one.
    ///
    /// Beginning the same key twice leaves a single entry.
    pub fn begin(&mut self, key: impl Into<String>) {
        if !self.active {
            self.active = true;
            self.first_error = None;
            self.suppressed.clear();
        }
        let key = key.into();
        debug!(key = %key, pending = self.pending.len() + 1, "request begun");
        self.pending.insert(key);
    }

    /// Retire a request. Unknown keys are ignored.
    ///
    /// Returns `true` when this call drained the active cycle.
    pub fn end(&mut self, key: &str) -> bool {
        if !self.pending.remove(key) {
            return false;
        }
        debug!(key, pending = self.pending.len(), "request ended");
        if !self.pending.is_empty() || !self.active {
            return false;
        }

        self.active = false;
        let error = self.first_error.clone();
        if let Some(callback) = self.on_drain.take() {
            callback(error);
        }
        true
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.pending.contains(key)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Arm the one-shot drain callback, replacing any unfired one.
    pub fn on_drain<F>(&mut self, callback: F)
    where
        F: FnOnce(Option<SyncError>) + Send + 'static,
    {
        self.on_drain = Some(Box::new(callback));
    }

    /// Record an error against the current cycle. Only the first is surfaced.
    pub fn record_error(&mut self, error: SyncError) {
        if self.first_error.is_none() {
            self.first_error = Some(error);
        } else {
            self.suppressed.push(error);
        }
    }

    /// First error of the current or most recently drained cycle.
    pub fn first_error(&self) -> Option<&SyncError> {
        self.first_error.as_ref()
    }

    /// Errors recorded after the first one, in arrival order.
    pub fn suppressed_errors(&self) -> &[SyncError] {
        &self.suppressed
    }
}

impl fmt::Debug for RequestTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestTracker")
            .field("pending", &self.pending)
            .field("active", &self.active)
            .field("first_error", &self.first_error)
            .field("suppressed", &self.suppressed.len())
            .field("armed", &self.on_drain.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::error::TransportError;

    type Calls = Arc<Mutex<Vec<Option<SyncError>>>>;

    fn recorder(tracker: &mut RequestTracker) -> Calls {
        let calls: Calls = Arc::default();
        let sink = Arc::clone(&calls);
        tracker.on_drain(move |err| sink.lock().unwrap().push(err));
        calls
    }

    fn transport_error(url: &str) -> SyncError {
        TransportError::new(url, "connection reset").into()
    }

    #[test]
    fn drain_fires_once_when_last_request_ends() {
        let mut tracker = RequestTracker::new();
        tracker.begin("a");
        tracker.begin("b");
        let calls = recorder(&mut tracker);

        assert!(!tracker.end("a"));
        assert!(calls.lock().unwrap().is_empty());
        assert!(tracker.end("b"));
        assert!(tracker.is_idle());
        assert_eq!(calls.lock().unwrap().len(), 1);

        // Repeated and unknown ends are no-ops.
        assert!(!tracker.end("b"));
        assert!(!tracker.end("zzz"));
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn end_of_unknown_key_while_idle_is_noop() {
        let mut tracker = RequestTracker::new();
        let calls = recorder(&mut tracker);
        assert!(!tracker.end("never-begun"));
        assert!(tracker.is_idle());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn duplicate_begin_keeps_one_entry() {
        let mut tracker = RequestTracker::new();
        tracker.begin("same");
        tracker.begin("same");
        assert_eq!(tracker.pending_count(), 1);
        assert!(tracker.end("same"));
    }

    #[test]
    fn first_error_wins() {
        let mut tracker = RequestTracker::new();
        tracker.begin("a");
        tracker.begin("b");
        let calls = recorder(&mut tracker);

        tracker.record_error(transport_error("a"));
        tracker.record_error(transport_error("b"));
        tracker.end("a");
        tracker.end("b");

        let calls = calls.lock().unwrap();
        assert_eq!(calls[0].as_ref().unwrap().url(), "a");
        assert_eq!(tracker.suppressed_errors().len(), 1);
        assert_eq!(tracker.suppressed_errors()[0].url(), "b");
    }

    #[test]
    fn callback_is_not_reused_across_cycles() {
        let mut tracker = RequestTracker::new();
        tracker.begin("a");
        let calls = recorder(&mut tracker);
        tracker.end("a");

        tracker.begin("a");
        tracker.end("a");
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn new_cycle_clears_previous_errors() {
        let mut tracker = RequestTracker::new();
        tracker.begin("a");
        tracker.record_error(transport_error("a"));
        tracker.record_error(transport_error("a"));
        tracker.end("a");
        assert!(tracker.first_error().is_some());

        tracker.begin("b");
        assert!(tracker.first_error().is_none());
        assert!(tracker.suppressed_errors().is_empty());
        let calls = recorder(&mut tracker);
        tracker.end("b");
        assert_eq!(*calls.lock().unwrap(), vec![None]);
    }
}
