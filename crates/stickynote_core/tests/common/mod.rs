#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use stickynote_core::{
    Bounds, GlobalSettings, Note, PlatformHooks, SurfaceHost, SurfaceKey,
};

/// Test double recording every platform call the controller makes.
#[derive(Default)]
pub struct RecordingHost {
    pub created: Vec<(SurfaceKey, Option<Bounds>)>,
    pub focused: Vec<SurfaceKey>,
    pub closed: Vec<SurfaceKey>,
    pub resized: Vec<(SurfaceKey, Bounds)>,
    pub pushed_notes: Vec<Note>,
    pub settings_pushes: Vec<(SurfaceKey, GlobalSettings)>,
    pub list_refreshes: Vec<Vec<Note>>,
    live_bounds: BTreeMap<SurfaceKey, Bounds>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created_note_keys(&self) -> Vec<SurfaceKey> {
        self.created.iter().map(|(key, _)| *key).collect()
    }
}

impl SurfaceHost for RecordingHost {
    fn create_surface(&mut self, note: &Note, bounds: Option<Bounds>) {
        let key = SurfaceKey::Note(note.id);
        self.created.push((key, bounds));
        if let Some(bounds) = bounds {
            self.live_bounds.insert(key, bounds);
        }
    }

    fn focus(&mut self, key: SurfaceKey) {
        self.focused.push(key);
    }

    fn set_bounds(&mut self, key: SurfaceKey, bounds: Bounds) {
        self.resized.push((key, bounds));
        self.live_bounds.insert(key, bounds);
    }

    fn close_surface(&mut self, key: SurfaceKey) {
        self.closed.push(key);
        self.live_bounds.remove(&key);
    }

    fn push_note(&mut self, note: &Note) {
        self.pushed_notes.push(note.clone());
    }

    fn push_settings(&mut self, key: SurfaceKey, settings: &GlobalSettings) {
        self.settings_pushes.push((key, settings.clone()));
    }

    fn refresh_note_list(&mut self, notes: &[Note]) {
        self.list_refreshes.push(notes.to_vec());
    }

    fn current_bounds(&self, key: SurfaceKey) -> Option<Bounds> {
        self.live_bounds.get(&key).copied()
    }
}

/// Platform hooks double with a scripted directory-picker answer.
pub struct ScriptedHooks {
    pub picker_answer: Option<PathBuf>,
    pub launch_at_login: bool,
}

impl ScriptedHooks {
    pub fn cancelling() -> Self {
        Self {
            picker_answer: None,
            launch_at_login: false,
        }
    }

    pub fn picking(path: PathBuf) -> Self {
        Self {
            picker_answer: Some(path),
            launch_at_login: false,
        }
    }
}

impl PlatformHooks for ScriptedHooks {
    fn pick_directory(&mut self) -> Option<PathBuf> {
        self.picker_answer.clone()
    }

    fn set_launch_at_login(&mut self, enabled: bool) {
        self.launch_at_login = enabled;
    }

    fn launch_at_login(&self) -> bool {
        self.launch_at_login
    }

    fn register_font(&mut self, path: &std::path::Path) -> Result<String, String> {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
            .ok_or_else(|| "unreadable font path".to_string())
    }
}

/// Writes a note artifact directly, bypassing the store's stamping, so
/// tests can control `last_modified` exactly.
pub fn write_artifact(root: &std::path::Path, note: &Note) {
    std::fs::create_dir_all(root).unwrap();
    let name = format!("{}_{}.json", stickynote_core::sanitize_title(&note.title), note.id);
    std::fs::write(root.join(name), serde_json::to_string_pretty(note).unwrap()).unwrap();
}
