//! Table-backed translation source.

use rusqlite::{
    Connection,
    params,
};

use super::{
    MessageMap,
    SourceError,
};

/// Default name of the source-message table.
pub const DEFAULT_SOURCE_TABLE: &str = "source_message";
/// Default name of the translated-message table.
pub const DEFAULT_MESSAGE_TABLE: &str = "message";

/// Reads translations from a relational table pair: a source-message table
/// (`id`, `category`, `message`) joined with a translated-message table
/// (`source_id`, `language`, `translation`).
#[derive(Debug)]
pub struct TableTranslationSource {
    conn: Connection,
    source_table: String,
    message_table: String,
}

impl TableTranslationSource {
    /// Source over the default table names.
    #[must_use]
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            source_table: DEFAULT_SOURCE_TABLE.to_string(),
            message_table: DEFAULT_MESSAGE_TABLE.to_string(),
        }
    }

    /// Source over custom table names. Names are interpolated into SQL, so
    /// only plain identifiers are accepted.
    ///
    /// # Errors
    /// A table name is not a valid SQL identifier.
    pub fn with_tables(
        conn: Connection,
        source_table: impl Into<String>,
        message_table: impl Into<String>,
    ) -> Result<Self, SourceError> {
        let source_table = source_table.into();
        let message_table = message_table.into();
        validate_identifier(&source_table)?;
        validate_identifier(&message_table)?;
        Ok(Self { conn, source_table, message_table })
    }

    /// The underlying connection, for hosts that manage schema or seeding
    /// themselves.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Create the table pair if it does not exist yet.
    ///
    /// # Errors
    /// Database error.
    pub fn bootstrap_schema(&self) -> Result<(), SourceError> {
        self.conn
            .execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {src} (
                     id INTEGER PRIMARY KEY,
                     category TEXT NOT NULL,
                     message TEXT NOT NULL
                 );
                 CREATE TABLE IF NOT EXISTS {msg} (
                     source_id INTEGER NOT NULL,
                     language TEXT NOT NULL,
                     translation TEXT NOT NULL
                 );",
                src = self.source_table,
                msg = self.message_table,
            ))
            .map_err(|err| SourceError::Db(err.to_string()))
    }

    /// Fetch the mapping for one (language, category) pair.
    ///
    /// Zero matching rows yield `Ok(None)`. When the same source message
    /// appears in several rows, the last row in query order wins; the query
    /// carries no ORDER BY, so callers must not rely on a specific winner.
    ///
    /// # Errors
    /// Database error.
    pub fn fetch(&self, language: &str, category: &str) -> Result<Option<MessageMap>, SourceError> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT s.message, m.translation
                 FROM {src} s
                 JOIN {msg} m ON m.source_id = s.id
                 WHERE s.category = ?1 AND m.language = ?2",
                src = self.source_table,
                msg = self.message_table,
            ))
            .map_err(|err| SourceError::Db(err.to_string()))?;
        let rows = stmt
            .query_map(params![category, language], |row| {
                let message: String = row.get(0)?;
                let translation: String = row.get(1)?;
                Ok((message, translation))
            })
            .map_err(|err| SourceError::Db(err.to_string()))?;

        let mut map = MessageMap::new();
        for row in rows {
            let (message, translation) = row.map_err(|err| SourceError::Db(err.to_string()))?;
            map.insert(message, translation);
        }

        if map.is_empty() { Ok(None) } else { Ok(Some(map)) }
    }
}

/// Reject anything that is not a plain SQL identifier.
fn validate_identifier(name: &str) -> Result<(), SourceError> {
    let valid = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(SourceError::Db(format!("invalid table name '{name}'")))
    }
}
