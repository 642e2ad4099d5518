//! The recommendation service seam and its HTTP implementation.
//!
//! Four operations, one request each: no timeout, no retry. Every failure
//! (transport, non-2xx status, undecodable body) is logged here and handed
//! back as a [`ClientError`]; nothing is retried.

use std::fmt;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use cinescout_core::{Movie, MovieDescription};

use crate::config::Config;
use crate::error::{ClientError, ClientResult, Operation};
use crate::requests::{DescriptionRequest, RecommendationRequest};

const USER_AGENT: &str = concat!("cinescout/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GenresResponse {
    genres: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct LanguagesResponse {
    languages: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RecommendationResponse {
    movies: Vec<Movie>,
}

// ---------------------------------------------------------------------------
// Service trait
// ---------------------------------------------------------------------------

/// The operations offered by the recommendation service.
#[async_trait]
pub trait MovieService: Send + Sync + fmt::Debug {
    /// `GET /availableGenres`
    async fn available_genres(&self) -> ClientResult<Vec<String>>;

    /// `GET /availableLanguages`
    async fn available_languages(&self) -> ClientResult<Vec<String>>;

    /// `POST /movieDescription`
    async fn movie_description(
        &self,
        request: &DescriptionRequest,
    ) -> ClientResult<MovieDescription>;

    /// `POST /movieRecommendation`
    ///
    /// Movies are returned as sent; card ids are not filled in here.
    async fn movie_recommendation(
        &self,
        request: &RecommendationRequest,
    ) -> ClientResult<Vec<Movie>>;
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

/// HTTP client for the recommendation service.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: Client,
    base_url: String,
}

impl RemoteClient {
    /// Create a client for the service at `base_url`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &Config) -> ClientResult<Self> {
        Self::new(config.base_url.as_str())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, operation: Operation) -> String {
        format!("{}{}", self.base_url, operation.path())
    }

    async fn get<T: DeserializeOwned>(&self, operation: Operation) -> ClientResult<T> {
        log::debug!("GET {}", self.url(operation));
        let sent = self
            .http
            .get(self.url(operation))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await;
        logged(operation, decode(operation, sent).await)
    }

    async fn post<B, T>(&self, operation: Operation, body: &B) -> ClientResult<T>
    where
        B: Serialize + fmt::Debug + Sync + ?Sized,
        T: DeserializeOwned,
    {
        log::debug!("POST {} {:?}", self.url(operation), body);
        let sent = self
            .http
            .post(self.url(operation))
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await;
        logged(operation, decode(operation, sent).await)
    }
}

/// Turn a send result into the decoded body, classifying each failure.
async fn decode<T: DeserializeOwned>(
    operation: Operation,
    sent: Result<Response, reqwest::Error>,
) -> ClientResult<T> {
    let response = sent.map_err(|source| ClientError::Request { operation, source })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status {
            operation,
            status: status.as_u16(),
        });
    }

    let text = response
        .text()
        .await
        .map_err(|source| ClientError::Request { operation, source })?;

    serde_json::from_str(&text).map_err(|e| ClientError::Decode {
        operation,
        message: e.to_string(),
    })
}

fn logged<T>(operation: Operation, result: ClientResult<T>) -> ClientResult<T> {
    if let Err(e) = &result {
        log::error!("Error fetching {}: {}", operation, e);
    }
    result
}

#[async_trait]
impl MovieService for RemoteClient {
    async fn available_genres(&self) -> ClientResult<Vec<String>> {
        let response: GenresResponse = self.get(Operation::AvailableGenres).await?;
        log::info!("Service offers {} genres", response.genres.len());
        Ok(response.genres)
    }

    async fn available_languages(&self) -> ClientResult<Vec<String>> {
        let response: LanguagesResponse = self.get(Operation::AvailableLanguages).await?;
        log::info!("Service offers {} languages", response.languages.len());
        Ok(response.languages)
    }

    async fn movie_description(
        &self,
        request: &DescriptionRequest,
    ) -> ClientResult<MovieDescription> {
        let description: MovieDescription =
            self.post(Operation::MovieDescription, request).await?;
        log::info!(
            "Received description for {} ({}) with {} themes",
            request.title,
            request.year,
            description.genre.len()
        );
        Ok(description)
    }

    async fn movie_recommendation(
        &self,
        request: &RecommendationRequest,
    ) -> ClientResult<Vec<Movie>> {
        let response: RecommendationResponse =
            self.post(Operation::MovieRecommendation, request).await?;
        log::info!("Received {} recommendations", response.movies.len());
        Ok(response.movies)
    }
}
