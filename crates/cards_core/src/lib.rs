//! Core domain logic for the cards store.
//! This crate is the single source of truth for card invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::card::{Card, CardId, CardState, CardValidationError, ParseCardStateError};
pub use repo::card_repo::{
    CardListQuery, CardRepository, RepoError, RepoResult, SqliteCardRepository,
};
pub use service::cards_db::CardsDB;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
