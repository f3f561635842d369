//! Card repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `cards` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Card::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - `finish` is the only state mutation and always writes `done`.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::card::{Card, CardId, CardState, CardValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

const CARD_SELECT_SQL: &str = "SELECT uuid, name, state FROM cards";

const REQUIRED_CARD_COLUMNS: &[&str] = &["uuid", "name", "state", "created_at", "updated_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for card persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(CardValidationError),
    Db(DbError),
    NotFound(CardId),
    InvalidData(String),
    /// Connection has not been migrated to the schema this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "card not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted card data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} has not been migrated to {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CardValidationError> for RepoError {
    fn from(value: CardValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing cards.
#[derive(Debug, Clone, Default)]
pub struct CardListQuery {
    pub state: Option<CardState>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for card CRUD operations.
pub trait CardRepository {
    /// Persists a card and returns its store-assigned identity.
    fn add_card(&self, card: &Card) -> RepoResult<CardId>;
    fn get_card(&self, id: CardId) -> RepoResult<Option<Card>>;
    fn list_cards(&self, query: &CardListQuery) -> RepoResult<Vec<Card>>;
    fn count(&self) -> RepoResult<u64>;
    /// Moves the card to `done` regardless of its current state.
    fn finish(&self, id: CardId) -> RepoResult<()>;
    fn delete_all(&self) -> RepoResult<()>;
}

/// SQLite-backed card repository.
pub struct SqliteCardRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCardRepository<'conn> {
    /// Wraps a connection without schema checks.
    ///
    /// Callers must have verified the schema, e.g. via `try_new`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Wraps a connection after verifying it carries the expected schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the `cards`
    ///   table shape does not match this binary.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'cards'
            );",
            [],
            |row| row.get(0),
        )?;
        if table_exists == 0 {
            return Err(RepoError::MissingRequiredTable("cards"));
        }

        let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('cards');")?;
        let mut rows = stmt.query([])?;
        let mut columns = Vec::new();
        while let Some(row) = rows.next()? {
            columns.push(row.get::<_, String>(0)?);
        }
        for column in REQUIRED_CARD_COLUMNS {
            if !columns.iter().any(|name| name == column) {
                return Err(RepoError::MissingRequiredColumn {
                    table: "cards",
                    column,
                });
            }
        }

        Ok(Self { conn })
    }
}

impl CardRepository for SqliteCardRepository<'_> {
    fn add_card(&self, card: &Card) -> RepoResult<CardId> {
        card.validate()?;

        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO cards (uuid, name, state) VALUES (?1, ?2, ?3);",
            params![id.to_string(), card.name.as_str(), card.state.as_str()],
        )?;

        Ok(id)
    }

    fn get_card(&self, id: CardId) -> RepoResult<Option<Card>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CARD_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_card_row(row)?));
        }

        Ok(None)
    }

    fn list_cards(&self, query: &CardListQuery) -> RepoResult<Vec<Card>> {
        let mut sql = format!("{CARD_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(state) = query.state {
            sql.push_str(" AND state = ?");
            bind_values.push(Value::Text(state.as_str().to_string()));
        }

        sql.push_str(" ORDER BY created_at ASC, uuid ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut cards = Vec::new();

        while let Some(row) = rows.next()? {
            cards.push(parse_card_row(row)?);
        }

        Ok(cards)
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM cards;", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn finish(&self, id: CardId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE cards
             SET
                state = 'done',
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_all(&self) -> RepoResult<()> {
        self.conn.execute("DELETE FROM cards;", [])?;
        Ok(())
    }
}

fn parse_card_row(row: &Row<'_>) -> RepoResult<Card> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in cards.uuid"))
    })?;

    let state_text: String = row.get("state")?;
    let state = CardState::from_str(&state_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid state value `{state_text}` in cards.state"))
    })?;

    let card = Card {
        id: Some(uuid),
        name: row.get("name")?,
        state,
    };
    card.validate()?;
    Ok(card)
}
