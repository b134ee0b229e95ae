use std::path::Path;

use sieve_config::SourceKind;
use sieve_core::dictionary::{LookupError, LookupSource};

use crate::memory::MemorySource;
use crate::sqlite::{SqliteSource, TableSchema};

fn schema_for(kind: SourceKind) -> TableSchema {
    match kind {
        SourceKind::Core => TableSchema::Core,
        SourceKind::User => TableSchema::User,
        SourceKind::Jmdict => TableSchema::Jmdict,
    }
}

/// Open the file backing a source slot, picking the reader by extension
pub fn open_source(kind: SourceKind, path: &Path) -> Result<Box<dyn LookupSource>, LookupError> {
    if !path.is_file() {
        return Err(LookupError::NotFound(path.display().to_string()));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    tracing::debug!(source = %kind, path = %path.display(), "opening source");

    let source: Box<dyn LookupSource> = match extension.as_str() {
        "db" | "sqlite" | "sqlite3" => {
            Box::new(SqliteSource::open(kind.as_str(), path, schema_for(kind))?)
        }
        "json" => {
            let json = std::fs::read_to_string(path)?;
            let source = MemorySource::from_jmdict_json(kind.as_str(), &json)?;
            Box::new(source.with_reading_lookup(kind == SourceKind::Jmdict))
        }
        "tsv" | "txt" => {
            let text = std::fs::read_to_string(path)?;
            let source = MemorySource::from_tsv(kind.as_str(), &text);
            Box::new(source.with_reading_lookup(kind == SourceKind::Jmdict))
        }
        other => {
            return Err(LookupError::InvalidFormat(format!(
                "{}: unsupported extension '{other}'",
                path.display()
            )));
        }
    };
    Ok(source)
}
