//! File-backed note store: one JSON artifact per record.
//!
//! # Responsibility
//! - Scan, read and write note artifacts under one configurable root.
//! - Keep filenames human-browsable (sanitized title) while the embedded
//!   `id` stays authoritative via suffix matching.
//!
//! # Invariants
//! - `save` stamps `last_modified` and restores the at-most-one-artifact
//!   invariant in the same logical operation (write new, delete stale).
//! - `delete` is idempotent: deleting a missing record is not an error.
//! - Suffix matching uses only the `id` component, so a title rename can
//!   never orphan a record.

use crate::model::note::{Note, NoteId};
use crate::model::settings::GlobalSettings;
use crate::store::{StoreError, StoreResult};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Singular settings artifact, excluded from note scans.
pub const SETTINGS_FILE_NAME: &str = "app_settings.json";

/// Filename component used when the sanitized title is empty.
const EMPTY_TITLE_PLACEHOLDER: &str = "Untitled";

/// Maximum sanitized-title length in the filename.
const MAX_TITLE_COMPONENT_LEN: usize = 50;

static ILLEGAL_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1f]"#).expect("valid filename filter regex"));

/// Durable storage contract for note records and global settings.
pub trait NoteStore {
    /// Scans the persistence root and indexes every well-formed record by
    /// its embedded `id`. Corrupt records are skipped and logged.
    fn load_all(&self) -> StoreResult<BTreeMap<NoteId, Note>>;

    /// Persists one record, stamping `last_modified` and sweeping stale
    /// artifacts left by a title rename.
    fn save(&self, note: &mut Note) -> StoreResult<()>;

    /// Removes every physical artifact for `id`. Idempotent.
    fn delete(&self, id: NoteId) -> StoreResult<()>;

    /// Reads the settings singleton, falling back to defaults when the
    /// artifact is absent or unparsable.
    fn load_global_settings(&self) -> GlobalSettings;

    /// Persists the settings singleton.
    fn save_global_settings(&self, settings: &GlobalSettings) -> StoreResult<()>;
}

/// Filesystem-backed store over one root directory, created on demand.
pub struct FsNoteStore {
    root: PathBuf,
}

impl FsNoteStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Current persistence root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Points the store at a different root, for the relocate flow.
    /// Existing artifacts are not migrated; callers re-load afterwards.
    pub fn set_root(&mut self, root: impl Into<PathBuf>) {
        self.root = root.into();
    }

    fn ensure_root(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })
    }

    /// Canonical artifact name: `<sanitized title>_<id>.json`.
    fn artifact_name(note: &Note) -> String {
        format!("{}_{}.json", sanitize_title(&note.title), note.id)
    }

    /// Whether `file_name` is an artifact for `id`, regardless of the
    /// title component it was written under.
    fn matches_id(file_name: &str, id: NoteId) -> bool {
        file_name.ends_with(&format!("{id}.json"))
    }

    fn note_artifacts(&self) -> StoreResult<Vec<PathBuf>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: self.root.clone(),
                source,
            })?;
            let path = entry.path();
            let is_json = path.extension().is_some_and(|ext| ext == "json");
            let is_settings = path
                .file_name()
                .is_some_and(|name| name == SETTINGS_FILE_NAME);
            if is_json && !is_settings {
                paths.push(path);
            }
        }
        Ok(paths)
    }

    fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE_NAME)
    }
}

impl NoteStore for FsNoteStore {
    fn load_all(&self) -> StoreResult<BTreeMap<NoteId, Note>> {
        let mut notes: BTreeMap<NoteId, Note> = BTreeMap::new();
        for path in self.note_artifacts()? {
            let raw = match fs::read_to_string(&path) {
                Ok(raw) => raw,
                Err(err) => {
                    warn!(
                        "event=note_load_skipped reason=io path={} error={err}",
                        path.display()
                    );
                    continue;
                }
            };
            let note: Note = match serde_json::from_str(&raw) {
                Ok(note) => note,
                Err(err) => {
                    warn!(
                        "event=note_load_skipped reason=parse path={} error={err}",
                        path.display()
                    );
                    continue;
                }
            };
            // Duplicate artifacts for one id can exist after an interrupted
            // rename; the most recently modified record wins, the stale one
            // is swept by the next save.
            match notes.get(&note.id) {
                Some(existing) if existing.last_modified >= note.last_modified => {
                    warn!(
                        "event=note_load_duplicate id={} kept_last_modified={}",
                        note.id, existing.last_modified
                    );
                }
                _ => {
                    notes.insert(note.id, note);
                }
            }
        }
        Ok(notes)
    }

    fn save(&self, note: &mut Note) -> StoreResult<()> {
        self.ensure_root()?;
        note.last_modified = now_epoch_ms();

        let file_name = Self::artifact_name(note);
        let path = self.root.join(&file_name);
        let body = serde_json::to_string_pretty(note)?;

        // Write the new artifact first; deleting the stale one is only safe
        // once the id's content exists under its new name.
        fs::write(&path, body).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        for stale in self.note_artifacts()? {
            let stale_name = match stale.file_name().and_then(|name| name.to_str()) {
                Some(name) => name,
                None => continue,
            };
            if stale_name != file_name && Self::matches_id(stale_name, note.id) {
                if let Err(err) = fs::remove_file(&stale) {
                    warn!(
                        "event=stale_artifact_sweep_failed id={} path={} error={err}",
                        note.id,
                        stale.display()
                    );
                }
            }
        }
        Ok(())
    }

    fn delete(&self, id: NoteId) -> StoreResult<()> {
        for path in self.note_artifacts()? {
            let name = match path.file_name().and_then(|name| name.to_str()) {
                Some(name) => name,
                None => continue,
            };
            if Self::matches_id(name, id) {
                match fs::remove_file(&path) {
                    Ok(()) => info!("event=note_deleted id={id} path={}", path.display()),
                    Err(source) if source.kind() == std::io::ErrorKind::NotFound => {}
                    Err(source) => return Err(StoreError::Io { path, source }),
                }
            }
        }
        Ok(())
    }

    fn load_global_settings(&self) -> GlobalSettings {
        let path = self.settings_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => return GlobalSettings::default(),
        };
        match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(
                    "event=settings_load_failed path={} error={err} using=defaults",
                    path.display()
                );
                GlobalSettings::default()
            }
        }
    }

    fn save_global_settings(&self, settings: &GlobalSettings) -> StoreResult<()> {
        self.ensure_root()?;
        let path = self.settings_path();
        let body = serde_json::to_string_pretty(settings)?;
        fs::write(&path, body).map_err(|source| StoreError::Io { path, source })
    }
}

/// Reduces a title to a filename-safe component.
///
/// Strips characters illegal in filenames, caps length, trims whitespace;
/// an empty result falls back to a fixed placeholder. Applied identically
/// on write and never on read: read-side matching uses the id suffix only.
pub fn sanitize_title(title: &str) -> String {
    let cleaned = ILLEGAL_FILENAME_CHARS.replace_all(title, "");
    let capped: String = cleaned.chars().take(MAX_TITLE_COMPONENT_LEN).collect();
    let trimmed = capped.trim();
    if trimmed.is_empty() {
        EMPTY_TITLE_PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
