//! Domain model for sticky note records and settings.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep one record shape shared by text and checklist projections.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - A checklist is persisted only as its flat text encoding; structured
//!   items are transient and derived.

pub mod checklist;
pub mod note;
pub mod patch;
pub mod settings;
