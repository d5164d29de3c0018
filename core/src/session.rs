//! Refresh orchestration: one request per endpoint, one completion per cycle.
//!
//! # Design
//! A `Session` owns everything a refresh mutates: the `Account`, the
//! `RequestTracker` and the optional diagnostic hooks. There are no globals,
//! so independent sessions can coexist in one process.
//!
//! Two ways to drive a cycle share the same state machine:
//! - host-does-IO: `refresh` hands back the requests to execute and the host
//!   feeds each outcome into `handle_response`;
//! - async: `run_refresh` executes the requests concurrently through a
//!   `Transport` and feeds outcomes back as they complete.
//!
//! Either way, every mutation goes through `&mut self`, which is the single
//! coordination point for the account and the tracker.

use std::fmt;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info, trace, warn};

use crate::account::Account;
use crate::classify::classify_and_decode;
use crate::client::WaniKaniClient;
use crate::error::{DecodeError, SyncError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::schema::{Kind, SchemaRegistry};
use crate::tracker::RequestTracker;
use crate::transport::Transport;

/// Receives every raw exchange. Diagnostics only.
pub type ResponseLogger = Box<dyn Fn(&Exchange<'_>) + Send + Sync>;

/// Receives every decode failure. Diagnostics only.
pub type DecodeErrorLogger = Box<dyn Fn(&DecodeError) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    Refreshing,
}

/// What `handle_response` did with one outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handled {
    /// Decoded and stored in the account.
    Merged(Kind),
    /// No schema matched the response URL; the account is untouched.
    Unrecognized,
    /// Transport, status or decode failure, recorded against the cycle.
    Failed,
    /// The key was not in flight (late or duplicate delivery).
    Ignored,
}

/// One request/response pair as seen by the response logger.
#[derive(Debug)]
pub struct Exchange<'a> {
    pub request_url: &'a str,
    pub outcome: &'a Result<HttpResponse, TransportError>,
}

impl fmt::Display for Exchange<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[request] {}", self.request_url)?;
        match self.outcome {
            Ok(response) => {
                writeln!(f, "[response] {} {}", response.status, response.url)?;
                writeln!(f, "[data] {} bytes", response.body.len())?;
                write!(f, "[text] {}", String::from_utf8_lossy(&response.body))
            }
            Err(e) => write!(f, "[error] {}", e.message),
        }
    }
}

/// Owns the account and tracker of one client and drives refresh cycles.
pub struct Session {
    client: WaniKaniClient,
    registry: SchemaRegistry,
    account: Account,
    tracker: RequestTracker,
    response_logger: Option<ResponseLogger>,
    decode_error_logger: Option<DecodeErrorLogger>,
}

impl Session {
    pub fn new(client: WaniKaniClient) -> Self {
        Self::with_registry(client, SchemaRegistry::global().clone())
    }

    pub fn with_registry(client: WaniKaniClient, registry: SchemaRegistry) -> Self {
        Self {
            client,
            registry,
            account: Account::new(),
            tracker: RequestTracker::new(),
            response_logger: None,
            decode_error_logger: None,
        }
    }

    pub fn client(&self) -> &WaniKaniClient {
        &self.client
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn account_mut(&mut self) -> &mut Account {
        &mut self.account
    }

    /// Replace the account, e.g. with one loaded from the host's store.
    pub fn restore_account(&mut self, account: Account) {
        self.account = account;
    }

    pub fn reset_account(&mut self) {
        self.account.reset();
    }

    pub fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }

    pub fn state(&self) -> RefreshState {
        if self.tracker.is_idle() {
            RefreshState::Idle
        } else {
            RefreshState::Refreshing
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.state() == RefreshState::Refreshing
    }

    /// First error of the current or last cycle.
    pub fn first_error(&self) -> Option<&SyncError> {
        self.tracker.first_error()
    }

    /// Errors of the current or last cycle that were not surfaced.
    pub fn suppressed_errors(&self) -> &[SyncError] {
        self.tracker.suppressed_errors()
    }

    pub fn set_response_logger(&mut self, logger: Option<ResponseLogger>) {
        self.response_logger = logger;
    }

    pub fn set_decode_error_logger(&mut self, logger: Option<DecodeErrorLogger>) {
        self.decode_error_logger = logger;
    }

    pub fn response_logging_enabled(&self) -> bool {
        self.response_logger.is_some()
    }

    pub fn decode_error_logging_enabled(&self) -> bool {
        self.decode_error_logger.is_some()
    }

    /// Start a refresh cycle and return the requests the host must execute.
    ///
    /// Returns `None`, dropping `completion`, when a cycle is already in
    /// progress. Every returned request is tracked before it is handed out.
    /// `completion` fires once, from the `handle_response` call that retires
    /// the last request, with the first error of the cycle. With no endpoints
    /// configured it fires immediately.
    pub fn refresh<F>(&mut self, completion: F) -> Option<Vec<HttpRequest>>
    where
        F: FnOnce(Option<SyncError>) + Send + 'static,
    {
        if self.is_refreshing() {
            debug!(pending = self.tracker.pending_count(), "refresh already in progress");
            return None;
        }

        let requests = self.client.build_refresh_requests();
        if requests.is_empty() {
            info!("refresh requested with no endpoints configured");
            completion(None);
            return Some(requests);
        }

        info!(endpoints = requests.len(), "refresh started");
        for request in &requests {
            self.tracker.begin(request.url.clone());
        }
        self.tracker.on_drain(move |error| {
            match &error {
                Some(e) => info!(error = %e, "refresh finished with error"),
                None => info!("refresh finished"),
            }
            completion(error);
        });
        Some(requests)
    }

    /// Process the outcome of the request tracked under `key`.
    ///
    /// Always retires `key`; nothing here fails or panics. Keys that are not
    /// in flight are ignored so a late duplicate cannot disturb a new cycle.
    ///
    /// A non-2xx status is recorded as `SyncError::Status` before any
    /// classification, even when the response URL matches no schema. Such
    /// bodies never reach the decode-error logger; the response logger still
    /// sees them.
    pub fn handle_response(
        &mut self,
        key: &str,
        outcome: Result<HttpResponse, TransportError>,
    ) -> Handled {
        if let Some(logger) = &self.response_logger {
            logger(&Exchange {
                request_url: key,
                outcome: &outcome,
            });
        }

        if !self.tracker.is_pending(key) {
            warn!(key, "response for a request that is not in flight; ignoring");
            return Handled::Ignored;
        }

        let handled = match outcome {
            Err(e) => {
                warn!(key, error = %e, "transport failure");
                self.tracker.record_error(SyncError::Transport(e));
                Handled::Failed
            }
            Ok(response) if !response.is_success() => {
                warn!(key, status = response.status, "unexpected HTTP status");
                self.tracker.record_error(SyncError::Status {
                    url: response.url,
                    status: response.status,
                    body: String::from_utf8_lossy(&response.body).into_owned(),
                });
                Handled::Failed
            }
            Ok(response) => match classify_and_decode(&self.registry, &response.url, &response.body) {
                Ok(Some(payload)) => {
                    let kind = payload.kind();
                    self.account.merge(payload);
                    Handled::Merged(kind)
                }
                Ok(None) => {
                    trace!(key, url = %response.url, "unrecognized response ignored");
                    Handled::Unrecognized
                }
                Err(e) => {
                    warn!(key, kind = %e.kind, error = %e.message, "decode failure");
                    if let Some(logger) = &self.decode_error_logger {
                        logger(&e);
                    }
                    self.tracker.record_error(SyncError::Decode(e));
                    Handled::Failed
                }
            },
        };

        self.tracker.end(key);
        handled
    }

    /// Run a whole cycle through `transport`.
    ///
    /// Requests are issued concurrently; outcomes are handled one at a time
    /// in completion order. Returns `false` if a cycle was already active.
    pub async fn run_refresh<T, F>(&mut self, transport: &T, completion: F) -> bool
    where
        T: Transport + ?Sized,
        F: FnOnce(Option<SyncError>) + Send + 'static,
    {
        let Some(requests) = self.refresh(completion) else {
            return false;
        };

        let mut in_flight: FuturesUnordered<_> = requests
            .into_iter()
            .map(|request| async move {
                let key = request.url.clone();
                let outcome = transport.execute(request).await;
                (key, outcome)
            })
            .collect();

        while let Some((key, outcome)) = in_flight.next().await {
            self.handle_response(&key, outcome);
        }
        true
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("client", &self.client)
            .field("state", &self.state())
            .field("tracker", &self.tracker)
            .field("kinds", &self.account.kinds())
            .finish_non_exhaustive()
    }
}
