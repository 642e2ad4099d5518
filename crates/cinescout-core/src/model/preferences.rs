use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One field of a [`PreferenceRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceField {
    Genres,
    Mood,
    Era,
    Language,
    AdditionalNotes,
}

impl PreferenceField {
    /// Wire name of the field, as sent to the recommendation service.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Genres => "genres",
            Self::Mood => "mood",
            Self::Era => "era",
            Self::Language => "language",
            Self::AdditionalNotes => "additionalNotes",
        }
    }
}

impl fmt::Display for PreferenceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The preferences collected by the wizard.
///
/// Scalar fields use the empty string for "unset". The record is filled in
/// one field per step and handed over, unchanged, once the last step is
/// confirmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceRecord {
    /// Selected genres, in selection order. Never contains duplicates.
    pub genres: Vec<String>,
    pub mood: String,
    pub era: String,
    pub language: String,
    pub additional_notes: String,
}

impl PreferenceRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    /// Add `genre` if absent, remove it if present.
    ///
    /// Returns `true` when the genre is selected after the call.
    pub fn toggle_genre(&mut self, genre: &str) -> bool {
        if let Some(pos) = self.genres.iter().position(|g| g == genre) {
            self.genres.remove(pos);
            false
        } else {
            self.genres.push(genre.to_string());
            true
        }
    }

    pub fn set_mood(&mut self, mood: impl Into<String>) {
        self.mood = mood.into();
    }

    pub fn set_era(&mut self, era: impl Into<String>) {
        self.era = era.into();
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.additional_notes = notes.into();
    }

    /// Whether `field` holds a value. Notes count as set even when empty.
    #[must_use]
    pub fn is_set(&self, field: PreferenceField) -> bool {
        match field {
            PreferenceField::Genres => !self.genres.is_empty(),
            PreferenceField::Mood => !self.mood.is_empty(),
            PreferenceField::Era => !self.era.is_empty(),
            PreferenceField::Language => !self.language.is_empty(),
            PreferenceField::AdditionalNotes => true,
        }
    }

    /// The first required field that is still unset, if any.
    #[must_use]
    pub fn missing_field(&self) -> Option<PreferenceField> {
        [
            PreferenceField::Genres,
            PreferenceField::Mood,
            PreferenceField::Era,
            PreferenceField::Language,
        ]
        .into_iter()
        .find(|field| !self.is_set(*field))
    }

    #[must_use]
    pub fn is_submit_ready(&self) -> bool {
        self.missing_field().is_none()
    }

    /// Check that every required field is populated.
    pub fn validate(&self) -> Result<()> {
        match self.missing_field() {
            Some(field) => Err(Error::Incomplete(field)),
            None => Ok(()),
        }
    }
}
