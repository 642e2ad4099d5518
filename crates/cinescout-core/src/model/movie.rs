use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// A recommended movie as returned by the recommendation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Card key. Taken from the service when it supplies one, otherwise
    /// synthesized by [`assign_ids`].
    #[serde(default, deserialize_with = "text_or_number")]
    pub id: String,
    pub title: String,
    pub year: i32,
    /// Poster path relative to the image host (e.g. `/9gk7.jpg`).
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub rating: f64,
    /// Relevance score in `0.0..=1.0`.
    #[serde(default)]
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Movie {
    #[must_use]
    pub fn new(title: impl Into<String>, year: i32) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            year,
            poster: String::new(),
            rating: 0.0,
            confidence: 0.0,
            genre: None,
            duration: None,
            summary: None,
        }
    }

    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    #[must_use]
    pub fn with_poster(mut self, poster: impl Into<String>) -> Self {
        self.poster = poster.into();
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Full poster URL under `image_base`.
    ///
    /// Paths that are already absolute URLs are returned unchanged. Returns
    /// `None` when the movie has no poster.
    #[must_use]
    pub fn poster_url(&self, image_base: &str) -> Option<String> {
        if self.poster.is_empty() {
            return None;
        }
        if self.poster.starts_with("http://") || self.poster.starts_with("https://") {
            return Some(self.poster.clone());
        }
        Some(format!("{}{}", image_base, self.poster))
    }

    /// Confidence as a whole percentage, e.g. `"87%"`.
    #[must_use]
    pub fn confidence_label(&self) -> String {
        format!("{:.0}%", self.confidence * 100.0)
    }

    /// Rating with one decimal, e.g. `"8.1"`.
    #[must_use]
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.rating)
    }

    /// Year followed by the duration when known, e.g. `"2010  148 min"`.
    #[must_use]
    pub fn year_label(&self) -> String {
        match &self.duration {
            Some(duration) => format!("{}  {}", self.year, duration),
            None => self.year.to_string(),
        }
    }
}

/// Build the card key for the movie at `index` in a result list.
#[must_use]
pub fn synthesize_id(index: usize, title: &str, year: i32) -> String {
    format!("{}{}{}", index, title, year)
}

/// Give every movie in a result list a distinct card key.
///
/// A service id is kept when it is non-empty and appears once in the list.
/// Missing or repeated ids are replaced by `index + title + year`, which is
/// only stable within one result list.
pub fn assign_ids(movies: &mut [Movie]) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for movie in movies.iter() {
        let id = movie.id.trim();
        if !id.is_empty() {
            *seen.entry(id.to_string()).or_default() += 1;
        }
    }

    for (index, movie) in movies.iter_mut().enumerate() {
        let unique = seen.get(movie.id.trim()).is_some_and(|count| *count == 1);
        if unique {
            continue;
        }
        if !movie.id.trim().is_empty() {
            log::warn!("Replacing repeated service id {:?} for {}", movie.id, movie.title);
        }
        movie.id = synthesize_id(index, &movie.title, movie.year);
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(s)) => s,
        Some(RawId::Integer(n)) => n.to_string(),
        Some(RawId::Float(n)) => n.to_string(),
        None => String::new(),
    })
}
