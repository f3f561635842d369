//! Domain model for the cards store.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every stored card is identified by a stable `CardId`.
//! - Workflow state changes flow through the store, never ad hoc.

pub mod card;
