//! Sync controller: the single serialization point for all mutation.
//!
//! # Responsibility
//! - Apply every note/settings mutation against the store, then rebroadcast
//!   authoritative state to each affected live surface.
//! - Own the only registry of live surfaces and the surface lifecycle
//!   (create, restore, soft-close, hard-delete, startup policy).
//!
//! # Invariants
//! - All mutating entry points take `&mut self`; processing one inbound
//!   message to completion serializes record mutation without locking.
//! - A brand-new note is persisted before its surface materializes: every
//!   visible surface has a corresponding durable record.
//! - Store failures degrade to "state did not change on disk" with a log
//!   entry; the in-memory record stays authoritative and the next edit
//!   retries. No path here panics or surfaces a blocking error.
//! - Registry entries are removed synchronously on close notification;
//!   the registry is never handed out.

use crate::cascade::effective;
use crate::model::note::{Bounds, Note, NoteColor, NoteId};
use crate::model::patch::{GlobalSettingsPatch, NotePatch};
use crate::model::settings::GlobalSettings;
use crate::platform::PlatformHooks;
use crate::service::instance::InstanceLock;
use crate::service::surfaces::{SpawnHints, SurfaceHost, SurfaceKey, SPAWN_OFFSET};
use crate::store::{FsNoteStore, NoteStore};
use log::{debug, info, warn};
use std::collections::{BTreeMap, BTreeSet};

/// Controller-process hub coordinating store, records and live surfaces.
pub struct SyncController<S: NoteStore, H: SurfaceHost> {
    store: S,
    host: H,
    notes: BTreeMap<NoteId, Note>,
    settings: GlobalSettings,
    live: BTreeSet<SurfaceKey>,
}

impl<S: NoteStore, H: SurfaceHost> SyncController<S, H> {
    /// Loads all durable state and starts with no live surfaces.
    ///
    /// A failing record scan degrades to an empty set with a log entry;
    /// it never prevents the controller from starting.
    pub fn new(store: S, host: H) -> Self {
        let settings = store.load_global_settings();
        let notes = match store.load_all() {
            Ok(notes) => notes,
            Err(err) => {
                warn!("event=note_scan_failed error={err} starting=empty");
                BTreeMap::new()
            }
        };
        Self {
            store,
            host,
            notes,
            settings,
            live: BTreeSet::new(),
        }
    }

    /// Startup policy: open every record flagged open; when none are but
    /// records exist, open exactly the single most recently modified one;
    /// with no records at all, create one fresh default note.
    pub fn startup(&mut self) {
        if self.notes.is_empty() {
            info!("event=startup policy=create_first_note");
            self.create(SpawnHints::default());
            return;
        }

        let open_ids: Vec<NoteId> = self
            .notes
            .values()
            .filter(|note| note.is_open)
            .map(|note| note.id)
            .collect();

        if open_ids.is_empty() {
            // Most recent record by modification time, id as tie-break.
            let most_recent = self
                .notes
                .values()
                .max_by_key(|note| (note.last_modified, note.id))
                .map(|note| note.id);
            if let Some(id) = most_recent {
                info!("event=startup policy=open_most_recent id={id}");
                self.open_note(id);
            }
            return;
        }

        info!("event=startup policy=restore_open count={}", open_ids.len());
        for id in open_ids {
            self.open_note(id);
        }
    }

    /// Creates a new note, seeded from spawn hints, persisted before its
    /// surface becomes visible. Returns the new stable id.
    pub fn create(&mut self, hints: SpawnHints) -> NoteId {
        let mut note = Note::new();

        if let Some(from) = hints.from {
            if let Some(creator) = self.notes.get(&from) {
                note.color = NoteColor::distinct_from(creator.color);
            }
            let origin = self
                .host
                .current_bounds(SurfaceKey::Note(from))
                .or_else(|| self.notes.get(&from).and_then(Note::bounds));
            if let Some(origin) = origin {
                note.set_bounds(Bounds {
                    x: origin.x + SPAWN_OFFSET,
                    y: origin.y + SPAWN_OFFSET,
                    width: origin.width,
                    height: origin.height,
                });
            }
        }

        let id = note.id;
        self.persist(&mut note);
        self.notes.insert(id, note);
        info!("event=note_created id={id}");
        self.open_note(id);
        self.refresh_manager();
        id
    }

    /// Realizes or reuses exactly one surface for `id`.
    ///
    /// An already-live surface is focused, never duplicated. Reopening a
    /// soft-closed record flips it back to open and persists.
    pub fn open_note(&mut self, id: NoteId) {
        let key = SurfaceKey::Note(id);
        if self.live.contains(&key) {
            self.host.focus(key);
            return;
        }
        let note = match self.notes.get_mut(&id) {
            Some(note) => note,
            None => {
                debug!("event=open_ignored reason=unknown_id id={id}");
                return;
            }
        };
        if !note.is_open {
            note.is_open = true;
            if let Err(err) = self.store.save(note) {
                warn!("event=note_save_failed id={id} error={err} retry=next_edit");
            }
        }
        let snapshot = note.clone();
        self.host.create_surface(&snapshot, snapshot.bounds());
        self.live.insert(key);
    }

    /// Merge-patches one record, persists, and pushes the merged state to
    /// the note's surface. Unknown `id` is a silent no-op: the record may
    /// have been deleted concurrently with an in-flight edit.
    pub fn edit(&mut self, id: NoteId, patch: &NotePatch) -> Option<Note> {
        let note = match self.notes.get_mut(&id) {
            Some(note) => note,
            None => {
                debug!("event=edit_ignored reason=unknown_id id={id}");
                return None;
            }
        };
        patch.apply(note);
        if let Err(err) = self.store.save(note) {
            warn!("event=note_save_failed id={id} error={err} retry=next_edit");
        }
        let snapshot = note.clone();
        if self.live.contains(&SurfaceKey::Note(id)) {
            self.host.push_note(&snapshot);
        }
        Some(snapshot)
    }

    /// Advances a note's color one palette step, wrapping at the end.
    pub fn cycle_color(&mut self, id: NoteId) {
        let next = match self.notes.get(&id) {
            Some(note) => note.color.next(),
            None => {
                debug!("event=color_cycle_ignored reason=unknown_id id={id}");
                return;
            }
        };
        self.edit(
            id,
            &NotePatch {
                color: Some(next),
                ..NotePatch::default()
            },
        );
    }

    /// Persists move/resize completion geometry verbatim. Never triggers
    /// derived-geometry recomputation.
    pub fn set_note_bounds(&mut self, id: NoteId, bounds: Bounds) {
        let note = match self.notes.get_mut(&id) {
            Some(note) => note,
            None => {
                debug!("event=bounds_ignored reason=unknown_id id={id}");
                return;
            }
        };
        note.set_bounds(bounds);
        if let Err(err) = self.store.save(note) {
            warn!("event=note_save_failed id={id} error={err} retry=next_edit");
        }
    }

    /// Ordinary close: the record is retained with `is_open = false`.
    pub fn soft_delete(&mut self, id: NoteId) {
        let key = SurfaceKey::Note(id);
        if self.live.remove(&key) {
            self.host.close_surface(key);
        }
        self.mark_closed(id);
        info!("event=note_soft_deleted id={id}");
        self.refresh_manager();
    }

    /// Delete-forever: every physical artifact for `id` is removed.
    pub fn hard_delete(&mut self, id: NoteId) {
        let key = SurfaceKey::Note(id);
        if self.live.remove(&key) {
            self.host.close_surface(key);
        }
        self.notes.remove(&id);
        if let Err(err) = self.store.delete(id) {
            warn!("event=note_delete_failed id={id} error={err}");
        }
        info!("event=note_hard_deleted id={id}");
        self.refresh_manager();
    }

    /// All records, most recently modified first, id as tie-break.
    pub fn list_all(&self) -> Vec<Note> {
        let mut notes: Vec<Note> = self.notes.values().cloned().collect();
        notes.sort_by(|a, b| {
            b.last_modified
                .cmp(&a.last_modified)
                .then_with(|| a.id.cmp(&b.id))
        });
        notes
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.get(&id)
    }

    pub fn global_settings(&self) -> &GlobalSettings {
        &self.settings
    }

    /// Patches the settings singleton, persists, broadcasts to every live
    /// surface, and resizes surfaces whose derived geometry no longer
    /// matches after a scale change.
    ///
    /// Resizing compares against each note's own length multiplier, so a
    /// global scale change never clobbers an individual length preference.
    pub fn update_global_settings(&mut self, patch: &GlobalSettingsPatch) {
        let scale_changed = patch.changes_scale(&self.settings);
        patch.apply(&mut self.settings);
        if let Err(err) = self.store.save_global_settings(&self.settings) {
            warn!("event=settings_save_failed error={err} retry=next_edit");
        }

        let keys: Vec<SurfaceKey> = self.live.iter().copied().collect();
        for key in &keys {
            self.host.push_settings(*key, &self.settings);
        }

        if scale_changed {
            for key in keys {
                if let SurfaceKey::Note(id) = key {
                    self.resize_to_derived(id);
                }
            }
        }
    }

    /// Signals the manager overview to re-pull the full record set.
    pub fn broadcast_note_list_refresh(&mut self) {
        self.refresh_manager();
    }

    /// Registers an externally materialized singleton surface (manager or
    /// appearance settings). A note key here is a host defect and ignored.
    ///
    /// The manager gets an immediate full-list pull on registration.
    pub fn surface_opened(&mut self, key: SurfaceKey) {
        match key {
            SurfaceKey::Note(id) => {
                debug!("event=surface_open_ignored reason=note_keys_are_controller_created id={id}");
            }
            SurfaceKey::Manager | SurfaceKey::Settings => {
                if !self.live.insert(key) {
                    self.host.focus(key);
                    return;
                }
                let settings = self.settings.clone();
                self.host.push_settings(key, &settings);
                if key == SurfaceKey::Manager {
                    self.refresh_manager();
                }
            }
        }
    }

    /// Handles a user-initiated surface close reported by the host.
    ///
    /// For a note this is the ordinary close action: registry entry is
    /// removed synchronously and the record soft-closes. Hosts must not
    /// echo controller-initiated closes back here.
    pub fn surface_closed(&mut self, key: SurfaceKey) {
        if !self.live.remove(&key) {
            return;
        }
        if let SurfaceKey::Note(id) = key {
            self.mark_closed(id);
            self.refresh_manager();
        }
    }

    /// Second-launch redirect: raise every live surface.
    pub fn bring_all_to_front(&mut self) {
        let keys: Vec<SurfaceKey> = self.live.iter().copied().collect();
        for key in keys {
            self.host.focus(key);
        }
    }

    /// Whether a surface is currently live. Read-only; the registry itself
    /// is never exposed.
    pub fn is_live(&self, key: SurfaceKey) -> bool {
        self.live.contains(&key)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    fn mark_closed(&mut self, id: NoteId) {
        let note = match self.notes.get_mut(&id) {
            Some(note) => note,
            None => return,
        };
        if note.is_open {
            note.is_open = false;
            if let Err(err) = self.store.save(note) {
                warn!("event=note_save_failed id={id} error={err} retry=next_edit");
            }
        }
    }

    fn persist(&mut self, note: &mut Note) {
        if let Err(err) = self.store.save(note) {
            warn!(
                "event=note_save_failed id={} error={err} retry=next_edit",
                note.id
            );
        }
    }

    fn refresh_manager(&mut self) {
        if self.live.contains(&SurfaceKey::Manager) {
            let notes = self.list_all();
            self.host.refresh_note_list(&notes);
        }
    }

    fn resize_to_derived(&mut self, id: NoteId) {
        let key = SurfaceKey::Note(id);
        let (target, current) = match self.notes.get(&id) {
            Some(note) => {
                let resolved = effective(&self.settings, note);
                let target = (resolved.derived_width(), resolved.derived_height());
                // The platform placed the surface even when the record has
                // no persisted geometry yet; ask it before giving up.
                let current = note.bounds().or_else(|| self.host.current_bounds(key));
                (target, current)
            }
            None => return,
        };
        if let Some(bounds) = current {
            if (bounds.width, bounds.height) == target {
                return;
            }
        }
        let note = match self.notes.get_mut(&id) {
            Some(note) => note,
            None => return,
        };
        match current {
            Some(origin) => {
                // Size changes; the surface keeps its position.
                let bounds = Bounds {
                    x: origin.x,
                    y: origin.y,
                    width: target.0,
                    height: target.1,
                };
                note.set_bounds(bounds);
                if let Err(err) = self.store.save(note) {
                    warn!("event=note_save_failed id={id} error={err} retry=next_edit");
                }
                self.host.set_bounds(key, bounds);
            }
            None => {
                // No known placement to resize against: record the derived
                // size so the next materialization uses it, and leave
                // position untouched.
                note.width = Some(target.0);
                note.height = Some(target.1);
                if let Err(err) = self.store.save(note) {
                    warn!("event=note_save_failed id={id} error={err} retry=next_edit");
                }
            }
        }
    }
}

impl<H: SurfaceHost> SyncController<FsNoteStore, H> {
    /// Relocates the persistence root through the directory picker.
    ///
    /// Cancellation is a no-op. On confirmation the single-instance lock
    /// moves under the new root first; when another controller already
    /// holds it there, the relocation aborts and nothing changes. Then the
    /// store is repointed, records are reloaded, and the manager overview
    /// is refreshed. Artifacts are not migrated.
    pub fn relocate_root(&mut self, hooks: &mut dyn PlatformHooks, lock: &mut InstanceLock) {
        let new_root = match hooks.pick_directory() {
            Some(path) => path,
            None => {
                debug!("event=relocate_cancelled");
                return;
            }
        };
        if let Err(err) = lock.move_to(&new_root) {
            warn!(
                "event=relocate_aborted reason=lock path={} error={err}",
                new_root.display()
            );
            return;
        }
        info!("event=root_relocated path={}", new_root.display());
        self.store.set_root(new_root);
        self.settings = self.store.load_global_settings();
        self.notes = match self.store.load_all() {
            Ok(notes) => notes,
            Err(err) => {
                warn!("event=note_scan_failed error={err} starting=empty");
                BTreeMap::new()
            }
        };
        self.refresh_manager();
    }
}
