//! The preference form state machine.
//!
//! Five linear steps, one record field each. `Next` is gated on the current
//! step's field; `Back` never is, and never clears anything.

use std::fmt;

use crate::model::{PreferenceField, PreferenceRecord};

/// A wizard step, numbered 1 through 5.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    #[default]
    Genres = 1,
    Mood = 2,
    Era = 3,
    Language = 4,
    Notes = 5,
}

impl Step {
    pub const ALL: [Self; 5] = [Self::Genres, Self::Mood, Self::Era, Self::Language, Self::Notes];

    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Genres => Some(Self::Mood),
            Self::Mood => Some(Self::Era),
            Self::Era => Some(Self::Language),
            Self::Language => Some(Self::Notes),
            Self::Notes => None,
        }
    }

    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Genres => None,
            Self::Mood => Some(Self::Genres),
            Self::Era => Some(Self::Mood),
            Self::Language => Some(Self::Era),
            Self::Notes => Some(Self::Language),
        }
    }

    /// The record field this step fills in.
    #[must_use]
    pub const fn field(self) -> PreferenceField {
        match self {
            Self::Genres => PreferenceField::Genres,
            Self::Mood => PreferenceField::Mood,
            Self::Era => PreferenceField::Era,
            Self::Language => PreferenceField::Language,
            Self::Notes => PreferenceField::AdditionalNotes,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Genres => "What genres interest you?",
            Self::Mood => "What's your preferred mood?",
            Self::Era => "Choose your favorite era",
            Self::Language => "Language preferences",
            Self::Notes => "Any additional preferences?",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Genres => "Select multiple genres that catch your attention",
            Self::Mood => "Pick the type of experience you're looking for",
            Self::Era => "Tell us which time period interests you most",
            Self::Language => "Choose your preferred viewing language",
            Self::Notes => "Optional: Tell us more about what you're looking for",
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Genres => "\u{1F3F7}",
            Self::Mood => "\u{263A}",
            Self::Era => "\u{23F1}",
            Self::Language => "\u{1F310}",
            Self::Notes => "\u{270E}",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.number())
    }
}

/// Outcome of a `Next` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The cursor moved to the given step.
    Moved(Step),
    /// The current step's field is empty; nothing changed.
    Blocked(Step),
    /// Next on the last step: the completed record, ready to submit.
    Submitted(PreferenceRecord),
}

/// Owns the wizard cursor and the preference record being built.
#[derive(Debug, Clone, Default)]
pub struct PreferenceForm {
    step: Step,
    record: PreferenceRecord,
    finished: bool,
}

impl PreferenceForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub fn record(&self) -> &PreferenceRecord {
        &self.record
    }

    /// Whether the record has been handed over for submission.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether `Next` is enabled on the current step.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.record.is_set(self.step.field())
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.step.previous().is_some()
    }

    /// Whether the progress bar segment for `step` is filled.
    #[must_use]
    pub fn is_reached(&self, step: Step) -> bool {
        self.step >= step
    }

    /// Advance past the current step, or hand over the record on the last
    /// one. A finished form never submits again.
    pub fn next(&mut self) -> Advance {
        if self.finished {
            log::debug!("preference form already submitted");
            return Advance::Blocked(self.step);
        }
        if !self.can_advance() {
            return Advance::Blocked(self.step);
        }
        match self.step.next() {
            Some(step) => {
                self.step = step;
                Advance::Moved(step)
            }
            None => {
                self.finished = true;
                log::debug!("preference form submitted: {:?}", self.record);
                Advance::Submitted(self.record.clone())
            }
        }
    }

    /// Move one step back. Returns `false` on the first step.
    pub fn back(&mut self) -> bool {
        match self.step.previous() {
            Some(step) => {
                self.step = step;
                true
            }
            None => false,
        }
    }

    pub fn toggle_genre(&mut self, genre: &str) -> bool {
        self.record.toggle_genre(genre)
    }

    pub fn select_mood(&mut self, mood: &str) {
        self.record.set_mood(mood);
    }

    pub fn select_era(&mut self, era: &str) {
        self.record.set_era(era);
    }

    /// Choose a language and move on to the notes step.
    pub fn select_language(&mut self, language: &str) -> Advance {
        self.record.set_language(language);
        self.next()
    }

    pub fn push_note_char(&mut self, c: char) {
        self.record.additional_notes.push(c);
    }

    pub fn pop_note_char(&mut self) {
        self.record.additional_notes.pop();
    }
}
