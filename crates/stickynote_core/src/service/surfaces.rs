//! Surface identity and the platform host contract.
//!
//! # Responsibility
//! - Name live presentation surfaces (`SurfaceKey`).
//! - Define the thin platform interface the controller drives.
//!
//! # Invariants
//! - Window creation, focus, resize and close carry no business logic;
//!   they are plumbing calls the host forwards to the platform.
//! - Manager and settings surfaces are singletons without a backing note.

use crate::model::note::{Bounds, Note, NoteId};
use crate::model::settings::GlobalSettings;

/// Identity of one live surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SurfaceKey {
    /// A sticky note surface, bound to exactly one record.
    Note(NoteId),
    /// The note-manager overview, a singleton.
    Manager,
    /// The appearance-settings surface, a singleton.
    Settings,
}

/// Platform window host driven by the sync controller.
///
/// Implementations create frameless always-on-top windows, forward focus
/// and geometry calls, and deliver controller broadcasts into each
/// surface's working copy. The controller owns the only registry of live
/// keys; hosts must not track liveness themselves.
pub trait SurfaceHost {
    /// Materializes a surface for `note`. `None` bounds means the record
    /// has no persisted placement yet; the platform chooses one.
    fn create_surface(&mut self, note: &Note, bounds: Option<Bounds>);

    /// Raises an existing surface.
    fn focus(&mut self, key: SurfaceKey);

    /// Moves/resizes an existing surface.
    fn set_bounds(&mut self, key: SurfaceKey, bounds: Bounds);

    /// Destroys a surface.
    fn close_surface(&mut self, key: SurfaceKey);

    /// Pushes authoritative note state to its own surface.
    fn push_note(&mut self, note: &Note);

    /// Pushes authoritative global settings to one live surface.
    fn push_settings(&mut self, key: SurfaceKey, settings: &GlobalSettings);

    /// Signals the manager overview to re-pull the full record set.
    fn refresh_note_list(&mut self, notes: &[Note]);

    /// Last reported placement of a live surface, when the platform can
    /// answer synchronously. Used for spawn offsets and resize comparison.
    fn current_bounds(&self, key: SurfaceKey) -> Option<Bounds>;
}

/// Seed hints for a note spawned from an existing surface.
///
/// Carries the creator's identity so the new note can start offset from
/// its window and with a color distinct from its creator's.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpawnHints {
    pub from: Option<NoteId>,
}

impl SpawnHints {
    pub fn from_note(id: NoteId) -> Self {
        Self { from: Some(id) }
    }
}

/// Offset applied to a spawned note relative to its creator's position.
pub const SPAWN_OFFSET: i32 = 30;
