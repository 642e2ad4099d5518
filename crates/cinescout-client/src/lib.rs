//! Recommendation service client for cinescout.
//!
//! Provides layered configuration, the [`MovieService`] seam with its HTTP
//! implementation, and the [`ResultsSession`] that drives a single
//! recommendation request and the per-movie description requests behind
//! the results view.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod requests;
pub mod session;

pub use api::{MovieService, RemoteClient};
pub use config::Config;
pub use error::{ClientError, ClientResult, Operation};
pub use guard::{InFlight, InFlightToken};
pub use requests::{DescriptionRequest, RecommendationRequest};
pub use session::{ResultsSession, SummaryState};
