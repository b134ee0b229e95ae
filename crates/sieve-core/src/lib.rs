pub mod dictionary;
pub mod error;
pub mod language;
pub mod omission;
pub mod preprocess;
pub mod report;
pub mod resolver;
pub mod substitution;

pub use error::{InputError, Result, SieveError};
