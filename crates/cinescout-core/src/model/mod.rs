pub mod description;
pub mod language;
pub mod movie;
pub mod preferences;

pub use description::MovieDescription;
pub use language::LanguageOption;
pub use movie::Movie;
pub use preferences::{PreferenceField, PreferenceRecord};
