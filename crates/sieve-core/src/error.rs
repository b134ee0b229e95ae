use std::path::PathBuf;

use crate::dictionary::LookupError;

pub type Result<T> = std::result::Result<T, SieveError>;

/// Input that cannot be sieved at all
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Input text is empty")]
    Empty,

    #[error("No kanji found in input text")]
    NoKanji,
}

#[derive(Debug, thiserror::Error)]
pub enum SieveError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Lookup source {name} unavailable: {reason}")]
    SourceUnavailable {
        name: String,
        #[source]
        reason: LookupError,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl SieveError {
    pub fn source_unavailable(name: impl Into<String>, reason: LookupError) -> Self {
        SieveError::SourceUnavailable {
            name: name.into(),
            reason,
        }
    }
}
