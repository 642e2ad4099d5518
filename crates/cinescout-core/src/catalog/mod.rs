//! Option catalogs for the wizard steps.

pub mod era;
pub mod genre;
pub mod mood;

pub use era::{find_era, EraOption, ERAS};
pub use genre::{all_genres, genre_options, GenreOption};
pub use mood::{MoodOption, MOODS};
