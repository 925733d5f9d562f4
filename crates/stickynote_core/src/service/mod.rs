//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into controller-level operations.
//! - Keep platform/window layers decoupled from storage details.
//!
//! # Invariants
//! - Every mutation funnels through `SyncController`; no other path
//!   touches the store after startup.

pub mod autosave;
pub mod controller;
pub mod instance;
pub mod surfaces;
