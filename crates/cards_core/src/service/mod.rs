//! Store facade over the repository layer.
//!
//! # Responsibility
//! - Orchestrate repository calls into the public store API.
//! - Keep CLI/test callers decoupled from storage details.

pub mod cards_db;
