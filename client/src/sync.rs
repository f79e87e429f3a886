//! Backend synchronization: persist the point set, then refresh the diagram.
//!
//! DESIGN
//! ======
//! A sync cycle is split into three steps so the persist-then-fetch order is
//! explicit and overlapping cycles stay safe:
//!
//! 1. `SyncClient::persist` / `SyncClient::refresh` snapshot the request and
//!    stamp it with a new generation number ([`SyncTicket`]).
//! 2. [`SyncTicket::run`] performs the network calls. The diagram fetch only
//!    starts after the save has settled successfully.
//! 3. The app applies the [`SyncOutcome`] only if the ticket is still the
//!    latest one issued; results of superseded cycles are dropped so a late
//!    response can never overwrite a newer render.
//!
//! ERROR HANDLING
//! ==============
//! Failures are data ([`SyncOutcome::PersistFailed`],
//! [`SyncOutcome::FetchFailed`]), never panics. The app logs them and keeps
//! the map interactive.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use std::rc::Rc;

use tracing::debug;
use wire::{DiagramResponse, FeatureCollection, PointRecord};

/// Errors produced by backend calls.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The request could not be sent or the connection failed.
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// A response body that must be decoded was not valid JSON of the expected shape.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// The two backend calls a sync cycle needs.
///
/// The client runs on a single-threaded event loop, so futures need not be `Send`.
#[async_trait::async_trait(?Send)]
pub trait Backend {
    /// Replace the stored point set with `points`, in order.
    async fn save_points(&self, points: &[PointRecord]) -> Result<(), SyncError>;

    /// Fetch the diagram computed from the stored point set.
    async fn fetch_diagram(&self) -> Result<DiagramResponse, SyncError>;
}

// =============================================================================
// TICKETS
// =============================================================================

/// What a sync cycle does.
#[derive(Clone, Debug, PartialEq)]
pub enum SyncRequest {
    /// Save this snapshot, then fetch the diagram.
    PersistAndRefresh(Vec<PointRecord>),
    /// Fetch the diagram only.
    Refresh,
}

/// One issued sync cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct SyncTicket {
    generation: u64,
    request: SyncRequest,
}

/// Result of running a ticket.
#[derive(Debug)]
pub enum SyncOutcome {
    /// Save (if any) and fetch succeeded. `None` means there is no diagram to show.
    Diagram(Option<FeatureCollection>),
    /// Save failed; the fetch was never issued.
    PersistFailed(SyncError),
    /// Fetch failed or returned a non-success status.
    FetchFailed(SyncError),
}

impl SyncTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn request(&self) -> &SyncRequest {
        &self.request
    }

    /// Run the cycle against `backend`. The fetch awaits the save's completion.
    pub async fn run<B: Backend + ?Sized>(&self, backend: &B) -> SyncOutcome {
        if let SyncRequest::PersistAndRefresh(points) = &self.request {
            if let Err(e) = backend.save_points(points).await {
                return SyncOutcome::PersistFailed(e);
            }
        }
        match fetch_diagram(backend).await {
            Ok(diagram) => SyncOutcome::Diagram(diagram),
            Err(e) => SyncOutcome::FetchFailed(e),
        }
    }
}

/// Fetch and decode the current diagram.
///
/// An absent or malformed `geojson` payload is "no diagram", not an error.
///
/// # Errors
///
/// Returns the backend's error when the request itself fails.
pub async fn fetch_diagram<B: Backend + ?Sized>(backend: &B) -> Result<Option<FeatureCollection>, SyncError> {
    let response = backend.fetch_diagram().await?;
    let collection = response.collection();
    if collection.is_none() && response.geojson.is_some() {
        debug!("diagram payload did not decode; treating as empty");
    }
    Ok(collection)
}

// =============================================================================
// CLIENT
// =============================================================================

/// Issues sync tickets and tracks which one is current.
pub struct SyncClient<B> {
    backend: Rc<B>,
    issued: u64,
}

impl<B: Backend> SyncClient<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::from_shared(Rc::new(backend))
    }

    #[must_use]
    pub fn from_shared(backend: Rc<B>) -> Self {
        Self { backend, issued: 0 }
    }

    /// Shared handle for running tickets outside a borrow of the app.
    #[must_use]
    pub fn backend(&self) -> Rc<B> {
        Rc::clone(&self.backend)
    }

    /// Issue a persist-then-refresh cycle for this snapshot.
    pub fn persist(&mut self, points: Vec<PointRecord>) -> SyncTicket {
        self.issue(SyncRequest::PersistAndRefresh(points))
    }

    /// Issue a fetch-only cycle.
    pub fn refresh(&mut self) -> SyncTicket {
        self.issue(SyncRequest::Refresh)
    }

    /// Whether `ticket` is the most recently issued cycle.
    #[must_use]
    pub fn is_current(&self, ticket: &SyncTicket) -> bool {
        ticket.generation == self.issued
    }

    #[must_use]
    pub fn latest_generation(&self) -> u64 {
        self.issued
    }

    fn issue(&mut self, request: SyncRequest) -> SyncTicket {
        self.issued += 1;
        SyncTicket { generation: self.issued, request }
    }
}
