//! State behind the results view.
//!
//! A [`ResultsSession`] is created with a submitted preference record. It
//! issues the recommendation request once, keeps the loading state up for
//! at least the configured minimum, and fetches descriptions on demand.
//! Requests run as tokio tasks; their outcomes come back over a channel and
//! are applied by [`ResultsSession::pump`] on the caller's thread.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use cinescout_core::model::movie::assign_ids;
use cinescout_core::{Movie, MovieDescription, PreferenceRecord};

use crate::api::MovieService;
use crate::error::ClientResult;
use crate::guard::{InFlight, InFlightToken};
use crate::requests::{DescriptionRequest, RecommendationRequest};

/// Status lines cycled while recommendations load.
pub const LOADING_MESSAGES: [&str; 4] = [
    "Analyzing your preferences...",
    "Exploring movie databases...",
    "Finding hidden gems...",
    "Creating recommendations...",
];

const LOADING_MESSAGE_PERIOD: Duration = Duration::from_secs(2);

/// The generic notice shown for any failed request.
pub const ERROR_NOTICE: &str =
    "Error while trying to generate movie recommendation. Please try again later.";

/// Summary panel state for the expanded card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryState {
    Generating,
    Ready(MovieDescription),
    Unavailable,
}

#[derive(Debug)]
enum SessionEvent {
    Recommendations {
        result: ClientResult<Vec<Movie>>,
        // Released once the outcome is applied, not when the task ends.
        _token: InFlightToken,
    },
    Description {
        movie_id: String,
        result: ClientResult<MovieDescription>,
    },
}

/// Results view state for one submitted preference record.
#[derive(Debug)]
pub struct ResultsSession {
    service: Arc<dyn MovieService>,
    preferences: PreferenceRecord,
    in_flight: InFlight,
    events_tx: UnboundedSender<SessionEvent>,
    events_rx: UnboundedReceiver<SessionEvent>,
    min_loading: Duration,
    activated_at: Option<Instant>,
    fetched: bool,
    movies: Vec<Movie>,
    expanded: Option<String>,
    summary: Option<SummaryState>,
    error_visible: bool,
}

impl ResultsSession {
    pub fn new(
        service: Arc<dyn MovieService>,
        preferences: PreferenceRecord,
        min_loading: Duration,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            service,
            preferences,
            in_flight: InFlight::new(),
            events_tx,
            events_rx,
            min_loading,
            activated_at: None,
            fetched: false,
            movies: Vec::new(),
            expanded: None,
            summary: None,
            error_visible: false,
        }
    }

    /// Issue the recommendation request if it has not completed yet and is
    /// not already running.
    ///
    /// Returns `true` when a request was started. Must be called from
    /// within a tokio runtime.
    pub fn activate(&mut self) -> bool {
        if self.fetched {
            return false;
        }
        let Some(token) = self.in_flight.try_begin() else {
            log::debug!("Recommendation request already in flight");
            return false;
        };
        if self.activated_at.is_none() {
            self.activated_at = Some(Instant::now());
        }

        let request = RecommendationRequest::from(&self.preferences);
        let service = Arc::clone(&self.service);
        let tx = self.events_tx.clone();
        log::info!("Requesting recommendations for {:?}", request);

        tokio::spawn(async move {
            let result = service.movie_recommendation(&request).await;
            let event = SessionEvent::Recommendations {
                result,
                _token: token,
            };
            if tx.send(event).is_err() {
                log::debug!("Results view closed before recommendations arrived");
            }
        });
        true
    }

    /// Request the description for the movie at `index` and expand its card.
    ///
    /// Any other expanded card collapses. Returns `false` when there is no
    /// movie at `index`.
    pub fn describe(&mut self, index: usize) -> bool {
        let Some(movie) = self.movies.get(index) else {
            return false;
        };
        let request = DescriptionRequest::from(movie);
        let movie_id = movie.id.clone();

        self.expanded = Some(movie_id.clone());
        self.summary = Some(SummaryState::Generating);

        let service = Arc::clone(&self.service);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = service.movie_description(&request).await;
            if tx.send(SessionEvent::Description { movie_id, result }).is_err() {
                log::debug!("Results view closed before description arrived");
            }
        });
        true
    }

    pub fn collapse(&mut self) {
        self.expanded = None;
        self.summary = None;
    }

    /// Hide the error notice. Nothing is retried.
    pub fn dismiss_error(&mut self) {
        self.error_visible = false;
    }

    /// Apply every completed request. Returns `true` if anything changed.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
            changed = true;
        }
        changed
    }

    fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Recommendations { result, _token } => {
                self.fetched = true;
                match result {
                    Ok(mut movies) => {
                        assign_ids(&mut movies);
                        self.movies = movies;
                    }
                    Err(e) => {
                        log::warn!("Recommendations unavailable: {}", e);
                        self.movies.clear();
                        self.error_visible = true;
                    }
                }
            }
            SessionEvent::Description { movie_id, result } => {
                if self.expanded.as_deref() != Some(movie_id.as_str()) {
                    log::debug!("Discarding description for collapsed card {}", movie_id);
                    return;
                }
                match result {
                    Ok(description) => self.summary = Some(SummaryState::Ready(description)),
                    Err(e) => {
                        log::warn!("Description unavailable for {}: {}", movie_id, e);
                        self.summary = Some(SummaryState::Unavailable);
                        self.error_visible = true;
                    }
                }
            }
        }
    }

    /// Whether the loading animation should show at `now`.
    ///
    /// True until the recommendation request has completed and the minimum
    /// loading time since activation has passed.
    pub fn is_loading(&self, now: Instant) -> bool {
        if !self.fetched {
            return true;
        }
        self.activated_at
            .map(|at| now.saturating_duration_since(at) < self.min_loading)
            .unwrap_or(false)
    }

    /// The loading status line to show at `now`.
    pub fn loading_message(&self, now: Instant) -> &'static str {
        let elapsed = self
            .activated_at
            .map(|at| now.saturating_duration_since(at))
            .unwrap_or_default();
        let index = (elapsed.as_millis() / LOADING_MESSAGE_PERIOD.as_millis()) as usize;
        LOADING_MESSAGES[index % LOADING_MESSAGES.len()]
    }

    pub fn preferences(&self) -> &PreferenceRecord {
        &self.preferences
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn is_fetched(&self) -> bool {
        self.fetched
    }

    pub fn is_request_in_flight(&self) -> bool {
        self.in_flight.is_busy()
    }

    pub fn expanded_id(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    pub fn is_expanded(&self, movie: &Movie) -> bool {
        self.expanded.as_deref() == Some(movie.id.as_str())
    }

    /// Summary panel state for `movie`, if its card is expanded.
    pub fn summary_for(&self, movie: &Movie) -> Option<&SummaryState> {
        if self.is_expanded(movie) {
            self.summary.as_ref()
        } else {
            None
        }
    }

    pub fn error_visible(&self) -> bool {
        self.error_visible
    }
}
