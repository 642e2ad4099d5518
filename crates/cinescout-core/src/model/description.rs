use serde::{Deserialize, Serialize};

/// AI-generated synopsis for a single movie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDescription {
    /// Key themes, shown as tags under the summary.
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

impl MovieDescription {
    #[must_use]
    pub fn themes(&self) -> &[String] {
        &self.genre
    }
}
