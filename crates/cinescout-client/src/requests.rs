//! Request bodies sent to the recommendation service.

use serde::Serialize;

use cinescout_core::{Movie, PreferenceRecord};

/// Body of `POST /movieRecommendation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub mood: String,
    pub era: String,
    pub language: String,
    pub additional_notes: String,
    pub genres: Vec<String>,
}

impl From<&PreferenceRecord> for RecommendationRequest {
    /// Every field is lowercased; the service matches on lowercase values.
    fn from(record: &PreferenceRecord) -> Self {
        Self {
            mood: record.mood.to_lowercase(),
            era: record.era.to_lowercase(),
            language: record.language.to_lowercase(),
            additional_notes: record.additional_notes.to_lowercase(),
            genres: record.genres.iter().map(|g| g.to_lowercase()).collect(),
        }
    }
}

/// Body of `POST /movieDescription`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptionRequest {
    pub id: String,
    pub title: String,
    pub year: i32,
}

impl From<&Movie> for DescriptionRequest {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            year: movie.year,
        }
    }
}
