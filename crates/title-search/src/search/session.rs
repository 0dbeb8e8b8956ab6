use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

use tracing::{debug, warn};

use super::domain::{SearchRequest, TitleSearchResult};
use super::gateway::{CredentialStore, SearchFailure, SearchGateway};

/// Transient view-layer state: the current result and a busy indicator, with
/// one writer per resolved request.
///
/// Every submission draws a monotonically increasing sequence number; a
/// response only replaces the displayed result if it is newer than the last
/// applied one, so a slow response can never clobber a fresher search.
pub struct SearchSession<G, C> {
    gateway: G,
    credentials: C,
    issued: AtomicU64,
    in_flight: AtomicUsize,
    panel: Mutex<PanelState>,
}

#[derive(Debug, Default)]
struct PanelState {
    applied_sequence: u64,
    result: Option<TitleSearchResult>,
}

/// How a resolved response was folded into session state.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The response replaced the displayed result.
    Applied(TitleSearchResult),
    /// A newer submission already resolved; the displayed result was left
    /// untouched.
    Superseded(TitleSearchResult),
}

impl SubmissionOutcome {
    pub fn result(&self) -> &TitleSearchResult {
        match self {
            Self::Applied(result) | Self::Superseded(result) => result,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

enum Dispatch<'a> {
    Submit(&'a SearchRequest),
    Fetch(&'a str),
}

impl<G, C> SearchSession<G, C>
where
    G: SearchGateway,
    C: CredentialStore,
{
    pub fn new(gateway: G, credentials: C) -> Self {
        Self {
            gateway,
            credentials,
            issued: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
            panel: Mutex::new(PanelState::default()),
        }
    }

    /// Whether any request is still awaiting its response.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// The currently displayed result, if any search has resolved yet.
    pub fn current_result(&self) -> Option<TitleSearchResult> {
        let panel = self.panel.lock().expect("session state mutex poisoned");
        panel.result.clone()
    }

    /// Submit a validated request: marks the session busy, issues exactly one
    /// HTTP request, and clears the busy flag regardless of outcome. Failures
    /// leave the displayed result unchanged.
    pub async fn submit(
        &self,
        request: SearchRequest,
    ) -> Result<SubmissionOutcome, SearchFailure> {
        self.run(Dispatch::Submit(&request)).await
    }

    /// Re-fetch a previously initiated search by id, with the same busy,
    /// failure, and sequencing semantics as `submit`.
    pub async fn refresh(&self, search_id: &str) -> Result<SubmissionOutcome, SearchFailure> {
        self.run(Dispatch::Fetch(search_id)).await
    }

    async fn run(&self, call: Dispatch<'_>) -> Result<SubmissionOutcome, SearchFailure> {
        let sequence = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let outcome = self.dispatch(sequence, call).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }

    async fn dispatch(
        &self,
        sequence: u64,
        call: Dispatch<'_>,
    ) -> Result<SubmissionOutcome, SearchFailure> {
        let token = self
            .credentials
            .token()
            .ok_or(SearchFailure::MissingCredentials)?;

        let resolved = match call {
            Dispatch::Submit(request) => self.gateway.submit(request, &token).await,
            Dispatch::Fetch(search_id) => self.gateway.fetch(search_id, &token).await,
        };

        match resolved {
            Ok(result) => Ok(self.apply(sequence, result)),
            Err(failure) => {
                warn!(error = %failure, "title search request failed");
                Err(failure)
            }
        }
    }

    fn apply(&self, sequence: u64, result: TitleSearchResult) -> SubmissionOutcome {
        let mut panel = self.panel.lock().expect("session state mutex poisoned");
        if sequence > panel.applied_sequence {
            panel.applied_sequence = sequence;
            panel.result = Some(result.clone());
            SubmissionOutcome::Applied(result)
        } else {
            debug!(sequence, "discarding stale title search response");
            SubmissionOutcome::Superseded(result)
        }
    }
}
