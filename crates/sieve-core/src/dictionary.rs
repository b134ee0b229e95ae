use sieve_config::LinkScheme;

/// Read-only table consulted by the resolver
pub trait LookupSource {
    /// Name used in logs and error messages
    fn name(&self) -> &str;

    /// Exact match on the source's primary key (the written form)
    fn lookup_by_key(&self, term: &str) -> Result<Option<Definition>, LookupError>;

    /// Whether `lookup_by_reading` is backed by a reading index
    fn supports_reading(&self) -> bool {
        false
    }

    /// Exact match on the reading column
    fn lookup_by_reading(&self, term: &str) -> Result<Option<Definition>, LookupError> {
        let _ = term;
        Ok(None)
    }
}

impl<S: LookupSource + ?Sized> LookupSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn lookup_by_key(&self, term: &str) -> Result<Option<Definition>, LookupError> {
        (**self).lookup_by_key(term)
    }

    fn supports_reading(&self) -> bool {
        (**self).supports_reading()
    }

    fn lookup_by_reading(&self, term: &str) -> Result<Option<Definition>, LookupError> {
        (**self).lookup_by_reading(term)
    }
}

/// A single dictionary row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definition {
    pub headword: String,
    pub reading: String,
    /// Part of speech or tag list, as stored
    pub tags: String,
    pub gloss: String,
    /// Source specific trailing field (Japanese gloss of the user list)
    pub extra: Option<String>,
}

impl Definition {
    pub fn new(
        headword: impl Into<String>,
        reading: impl Into<String>,
        tags: impl Into<String>,
        gloss: impl Into<String>,
    ) -> Self {
        Self {
            headword: headword.into(),
            reading: reading.into(),
            tags: tags.into(),
            gloss: gloss.into(),
            extra: None,
        }
    }

    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        let extra = extra.into();
        self.extra = (!extra.is_empty()).then_some(extra);
        self
    }

    /// `[headword](link) : 【reading】, (tags), gloss[, extra]`
    pub fn render(&self, link: LinkScheme) -> String {
        let mut line = format!(
            "[{}]({}) : 【{}】, ({}), {}",
            self.headword,
            link.url_for(&self.headword),
            self.reading,
            self.tags,
            self.gloss
        );
        if let Some(extra) = &self.extra {
            line.push_str(", ");
            line.push_str(extra);
        }
        line
    }

    /// `headword<TAB>reading<TAB>gloss`
    pub fn flashcard_row(&self) -> String {
        format!(
            "{}\t{}\t{}",
            flashcard_field(&self.headword),
            flashcard_field(&self.reading),
            flashcard_field(&self.gloss)
        )
    }
}

fn flashcard_field(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Source unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
