//! Card domain model.
//!
//! # Responsibility
//! - Define the canonical card record and its workflow state.
//! - Provide constructors and validation used by every write path.
//!
//! # Invariants
//! - `id` is assigned by the store on insertion and never reused.
//! - `state` is mutated only through the store's `finish` operation.
//! - `name` must contain at least one non-whitespace character.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for a stored card.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type CardId = Uuid;

/// Workflow state of a card.
///
/// The textual forms (`todo`, `in prog`, `done`) are shared by the
/// database encoding, serde wire format, and CLI output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardState {
    /// Created but not started.
    #[default]
    #[serde(rename = "todo")]
    Todo,
    /// Work is in progress.
    #[serde(rename = "in prog")]
    InProgress,
    /// Completed.
    #[serde(rename = "done")]
    Done,
}

impl CardState {
    /// Canonical textual form, identical across DB, serde and CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in prog",
            Self::Done => "done",
        }
    }
}

impl Display for CardState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognized card state text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCardStateError(pub String);

impl Display for ParseCardStateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown card state `{}`; expected todo|in prog|done",
            self.0
        )
    }
}

impl Error for ParseCardStateError {}

impl FromStr for CardState {
    type Err = ParseCardStateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "todo" => Ok(Self::Todo),
            "in prog" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(ParseCardStateError(other.to_string())),
        }
    }
}

/// Validation errors raised before any card write reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardValidationError {
    /// Name is empty or whitespace-only.
    EmptyName,
}

impl Display for CardValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "card name must not be empty"),
        }
    }
}

impl Error for CardValidationError {}

/// Canonical domain record for a tracked card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// `None` until the store assigns an identity on insertion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CardId>,
    /// Short human-readable label.
    pub name: String,
    /// Workflow state; defaults to `todo` for new cards.
    pub state: CardState,
}

impl Card {
    /// Creates an unstored card in the default `todo` state.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_state(name, CardState::default())
    }

    /// Creates an unstored card with an explicit starting state.
    pub fn with_state(name: impl Into<String>, state: CardState) -> Self {
        Self {
            id: None,
            name: name.into(),
            state,
        }
    }

    /// Checks invariants that must hold before persistence.
    pub fn validate(&self) -> Result<(), CardValidationError> {
        if self.name.trim().is_empty() {
            return Err(CardValidationError::EmptyName);
        }
        Ok(())
    }

    /// Returns whether the card has reached its terminal state.
    pub fn is_done(&self) -> bool {
        self.state == CardState::Done
    }
}
