//! Core engine for the sticky-note widget: note state, persistence, and
//! multi-surface synchronization.
//!
//! Window creation, native menus, font loading and styling live outside
//! this crate; they are consumed through the `platform` and
//! `service::surfaces` interfaces. This crate is the single source of
//! truth for record invariants, the on-disk layout, and the broadcast
//! protocol that keeps every live surface consistent.

pub mod cascade;
pub mod logging;
pub mod model;
pub mod platform;
pub mod service;
pub mod store;

pub use cascade::{effective, EffectiveAppearance, BASE_HEIGHT, BASE_WIDTH};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::checklist::{decode, encode, ChecklistItem};
pub use model::note::{Bounds, Note, NoteColor, NoteId, NoteType, PALETTE};
pub use model::patch::{AppearancePatch, FontSettingsPatch, GlobalSettingsPatch, NotePatch};
pub use model::settings::{ColorType, CustomFont, GlobalSettings};
pub use platform::PlatformHooks;
pub use service::autosave::{AutosavePolicy, IDLE_FLUSH};
pub use service::controller::SyncController;
pub use service::instance::{InstanceLock, InstanceLockError};
pub use service::surfaces::{SpawnHints, SurfaceHost, SurfaceKey, SPAWN_OFFSET};
pub use store::{sanitize_title, FsNoteStore, NoteStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
