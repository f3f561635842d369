//! Store facade owning the SQLite connection.
//!
//! # Responsibility
//! - Provide the card store API consumed by tests and the CLI.
//! - Root on-disk state under a single caller-provided directory.
//!
//! # Invariants
//! - The backing connection is schema-verified before first use.
//! - The owning directory must outlive the store handle.

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::card::{Card, CardId};
use crate::repo::card_repo::{
    CardListQuery, CardRepository, RepoError, RepoResult, SqliteCardRepository,
};
use log::info;
use rusqlite::Connection;
use std::path::Path;

const DB_FILE_NAME: &str = "cards.db";

/// Handle to a card store rooted at a directory.
///
/// Construct with [`CardsDB::open`], use for zero or more operations,
/// then release resources explicitly with [`CardsDB::close`] (dropping
/// the handle also releases them).
pub struct CardsDB {
    conn: Connection,
}

impl CardsDB {
    /// Opens (creating if necessary) a store rooted at `dir`.
    ///
    /// The database file lives at `<dir>/cards.db`. A freshly created
    /// store reports `count() == 0`.
    pub fn open(dir: impl AsRef<Path>) -> RepoResult<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(DbError::Io)?;

        let conn = open_db(dir.join(DB_FILE_NAME))?;
        // Schema is verified once here; per-call repositories skip the check.
        SqliteCardRepository::try_new(&conn)?;

        info!(
            "event=store_open module=service status=ok root={}",
            dir.display()
        );
        Ok(Self { conn })
    }

    /// Opens a store with no on-disk state. Intended for tests.
    pub fn open_in_memory() -> RepoResult<Self> {
        let conn = open_db_in_memory()?;
        SqliteCardRepository::try_new(&conn)?;
        Ok(Self { conn })
    }

    fn repo(&self) -> SqliteCardRepository<'_> {
        SqliteCardRepository::new(&self.conn)
    }

    /// Persists a card and returns its store-assigned identity.
    pub fn add_card(&self, card: &Card) -> RepoResult<CardId> {
        self.repo().add_card(card)
    }

    /// Fetches a card by identity.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when no card has this id.
    pub fn get_card(&self, id: CardId) -> RepoResult<Card> {
        self.repo().get_card(id)?.ok_or(RepoError::NotFound(id))
    }

    /// Lists cards using filter and pagination options.
    pub fn list_cards(&self, query: &CardListQuery) -> RepoResult<Vec<Card>> {
        self.repo().list_cards(query)
    }

    /// Returns the number of stored cards.
    pub fn count(&self) -> RepoResult<u64> {
        self.repo().count()
    }

    /// Moves the card to `done` regardless of its current state.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when no card has this id.
    pub fn finish(&self, id: CardId) -> RepoResult<()> {
        self.repo().finish(id)
    }

    /// Removes every card. Afterwards `count() == 0`.
    pub fn delete_all(&self) -> RepoResult<()> {
        self.repo().delete_all()
    }

    /// Releases the underlying connection explicitly.
    ///
    /// Dropping the handle has the same effect; the explicit form exists
    /// so callers can observe close failures.
    pub fn close(self) -> RepoResult<()> {
        self.conn.close().map_err(|(_conn, err)| err)?;
        info!("event=store_close module=service status=ok");
        Ok(())
    }
}
