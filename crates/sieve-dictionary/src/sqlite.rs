use std::path::Path;

use rusqlite::{Connection, OpenFlags, OptionalExtension, Row};
use sieve_core::dictionary::{Definition, LookupError, LookupSource};

/// Table layout of a dictionary database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSchema {
    /// `main(kanji, kana, pos, eng)`
    Core,
    /// `user(kanji, kana, eng, pos, jp)`, or the same columns in `main`
    User,
    /// `words_jp(ID, kanji, reading, tags)` joined to `words_en(JPID, def)`
    Jmdict,
}

impl TableSchema {
    fn candidate_tables(&self) -> &'static [&'static str] {
        match self {
            TableSchema::Core => &["main"],
            TableSchema::User => &["user", "main"],
            TableSchema::Jmdict => &["words_jp"],
        }
    }

    fn key_query(&self, table: &str) -> String {
        match self {
            TableSchema::Core => {
                format!("SELECT kanji, kana, pos, eng FROM {table} WHERE kanji = ?1 LIMIT 1")
            }
            TableSchema::User => {
                format!("SELECT kanji, kana, pos, eng, jp FROM {table} WHERE kanji = ?1 LIMIT 1")
            }
            TableSchema::Jmdict => Self::jmdict_query("kanji"),
        }
    }

    fn jmdict_query(column: &str) -> String {
        format!(
            "SELECT words_jp.kanji, words_jp.reading, words_jp.tags, words_en.def \
             FROM words_jp INNER JOIN words_en ON words_jp.ID = words_en.JPID \
             WHERE words_jp.{column} = ?1 LIMIT 1"
        )
    }
}

/// Read-only lookup source over one SQLite database
pub struct SqliteSource {
    name: String,
    conn: Connection,
    schema: TableSchema,
    key_query: String,
}

impl SqliteSource {
    pub fn open(
        name: impl Into<String>,
        path: &Path,
        schema: TableSchema,
    ) -> Result<Self, LookupError> {
        if !path.is_file() {
            return Err(LookupError::NotFound(path.display().to_string()));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| LookupError::Unavailable(format!("{}: {e}", path.display())))?;

        let source = Self::from_connection(name, conn, schema)?;
        tracing::info!(source = %source.name, path = %path.display(), "opened sqlite source");
        Ok(source)
    }

    /// Wrap an already open connection, checking that the schema's table exists
    pub fn from_connection(
        name: impl Into<String>,
        conn: Connection,
        schema: TableSchema,
    ) -> Result<Self, LookupError> {
        let name = name.into();
        let table = find_table(&conn, schema.candidate_tables())?.ok_or_else(|| {
            LookupError::Unavailable(format!(
                "{name}: expected table {}",
                schema.candidate_tables().join(" or ")
            ))
        })?;
        let key_query = schema.key_query(&table);
        Ok(Self {
            name,
            conn,
            schema,
            key_query,
        })
    }

    fn query(&self, sql: &str, term: &str) -> Result<Option<Definition>, LookupError> {
        let schema = self.schema;
        let mut statement = self.conn.prepare_cached(sql).map_err(query_error)?;
        statement
            .query_row([term], |row| definition_from_row(schema, row))
            .optional()
            .map_err(query_error)
    }
}

impl LookupSource for SqliteSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup_by_key(&self, term: &str) -> Result<Option<Definition>, LookupError> {
        self.query(&self.key_query, term)
    }

    fn supports_reading(&self) -> bool {
        self.schema == TableSchema::Jmdict
    }

    fn lookup_by_reading(&self, term: &str) -> Result<Option<Definition>, LookupError> {
        if !self.supports_reading() {
            return Ok(None);
        }
        self.query(&TableSchema::jmdict_query("reading"), term)
    }
}

fn find_table(conn: &Connection, candidates: &[&str]) -> Result<Option<String>, LookupError> {
    let mut statement = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1")
        .map_err(|e| LookupError::Unavailable(e.to_string()))?;
    for table in candidates {
        let found = statement
            .exists([table])
            .map_err(|e| LookupError::Unavailable(e.to_string()))?;
        if found {
            return Ok(Some(table.to_string()));
        }
    }
    Ok(None)
}

fn definition_from_row(schema: TableSchema, row: &Row<'_>) -> rusqlite::Result<Definition> {
    let definition = Definition::new(
        text(row, 0)?,
        text(row, 1)?,
        text(row, 2)?,
        text(row, 3)?,
    );
    Ok(match schema {
        TableSchema::User => definition.with_extra(text(row, 4)?),
        _ => definition,
    })
}

// NULL columns read as empty text
fn text(row: &Row<'_>, index: usize) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(index)?.unwrap_or_default())
}

fn query_error(e: rusqlite::Error) -> LookupError {
    LookupError::Query(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn core_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE main (kanji TEXT, kana TEXT, pos TEXT, eng TEXT);
             INSERT INTO main VALUES ('猫', 'ねこ', 'Noun', 'cat');
             INSERT INTO main VALUES ('本', 'ほん', NULL, 'book');",
        )
        .unwrap();
        conn
    }

    fn jmdict_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE words_jp (ID INTEGER, kanji TEXT, reading TEXT, tags TEXT);
             CREATE TABLE words_en (JPID INTEGER, def TEXT);
             INSERT INTO words_jp VALUES (1, '矢張り', 'やはり', 'adv');
             INSERT INTO words_en VALUES (1, 'as expected');
             INSERT INTO words_jp VALUES (2, '犬', 'いぬ', 'n');
             INSERT INTO words_en VALUES (2, 'dog');",
        )
        .unwrap();
        conn
    }

    #[test]
    fn core_lookup_by_kanji() {
        let source = SqliteSource::from_connection("core", core_db(), TableSchema::Core).unwrap();

        assert_eq!(
            source.lookup_by_key("猫").unwrap(),
            Some(Definition::new("猫", "ねこ", "Noun", "cat"))
        );
        assert_eq!(source.lookup_by_key("犬").unwrap(), None);
        assert!(!source.supports_reading());
        assert_eq!(source.lookup_by_reading("ねこ").unwrap(), None);
    }

    #[test]
    fn null_columns_become_empty() {
        let source = SqliteSource::from_connection("core", core_db(), TableSchema::Core).unwrap();
        let book = source.lookup_by_key("本").unwrap().unwrap();
        assert_eq!(book.tags, "");
    }

    #[test]
    fn user_table_carries_extra_column() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE user (kanji TEXT, kana TEXT, eng TEXT, pos TEXT, jp TEXT);
             INSERT INTO user VALUES ('笊', 'ざる', 'colander', 'noun', '竹で編んだ器');",
        )
        .unwrap();
        let source = SqliteSource::from_connection("user", conn, TableSchema::User).unwrap();

        let zaru = source.lookup_by_key("笊").unwrap().unwrap();
        assert_eq!(zaru.gloss, "colander");
        assert_eq!(zaru.tags, "noun");
        assert_eq!(zaru.extra.as_deref(), Some("竹で編んだ器"));
    }

    #[test]
    fn jmdict_supports_reading() {
        let source =
            SqliteSource::from_connection("jmdict", jmdict_db(), TableSchema::Jmdict).unwrap();

        assert!(source.supports_reading());
        assert_eq!(source.lookup_by_key("犬").unwrap().unwrap().gloss, "dog");
        assert_eq!(source.lookup_by_key("やはり").unwrap(), None);

        let yahari = source.lookup_by_reading("やはり").unwrap().unwrap();
        assert_eq!(yahari.headword, "矢張り");
    }

    #[test]
    fn missing_table_is_unavailable() {
        let conn = Connection::open_in_memory().unwrap();
        let err = SqliteSource::from_connection("jmdict", conn, TableSchema::Jmdict)
            .err()
            .unwrap();
        assert!(matches!(err, LookupError::Unavailable(_)));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = SqliteSource::open("core", &dir.path().join("core.db"), TableSchema::Core)
            .err()
            .unwrap();
        assert!(matches!(err, LookupError::NotFound(_)));
    }

    #[test]
    fn opens_database_file_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("core.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                "CREATE TABLE main (kanji TEXT, kana TEXT, pos TEXT, eng TEXT);
                 INSERT INTO main VALUES ('猫', 'ねこ', 'Noun', 'cat');",
            )
            .unwrap();
        }

        let source = SqliteSource::open("core", &path, TableSchema::Core).unwrap();
        assert_eq!(source.lookup_by_key("猫").unwrap().unwrap().reading, "ねこ");
    }
}
