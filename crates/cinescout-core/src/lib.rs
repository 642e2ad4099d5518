//! Core domain model for cinescout.
//!
//! This crate defines the preference record collected by the wizard, the
//! movie and description types returned by the recommendation service, the
//! option catalogs offered on each wizard step, and the preference form
//! state machine that sequences the steps. It performs no I/O.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod catalog;
pub mod error;
pub mod model;
pub mod wizard;

pub use error::{Error, Result};
pub use model::{LanguageOption, Movie, MovieDescription, PreferenceField, PreferenceRecord};
pub use wizard::{Advance, PreferenceForm, Step};
