use thiserror::Error;

use crate::model::PreferenceField;

#[derive(Debug, Error)]
pub enum Error {
    #[error("preferences incomplete: {0} is not set")]
    Incomplete(PreferenceField),
}

pub type Result<T> = std::result::Result<T, Error>;
