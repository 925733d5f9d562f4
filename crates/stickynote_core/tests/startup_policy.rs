use stickynote_core::{FsNoteStore, Note, NoteStore, SurfaceKey, SyncController};

mod common;
use common::{write_artifact, RecordingHost};

fn note_with(title: &str, is_open: bool, last_modified: i64) -> Note {
    let mut note = Note::new();
    note.title = title.to_string();
    note.is_open = is_open;
    note.last_modified = last_modified;
    note
}

#[test]
fn empty_root_creates_exactly_one_fresh_note() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = SyncController::new(FsNoteStore::new(dir.path()), RecordingHost::new());

    controller.startup();

    assert_eq!(controller.list_all().len(), 1);
    assert_eq!(controller.host().created.len(), 1);
    assert_eq!(FsNoteStore::new(dir.path()).load_all().unwrap().len(), 1);
}

#[test]
fn all_closed_records_open_only_the_most_recent() {
    let dir = tempfile::tempdir().unwrap();
    let older = note_with("A", false, 10);
    let newer = note_with("B", false, 20);
    write_artifact(dir.path(), &older);
    write_artifact(dir.path(), &newer);

    let mut controller = SyncController::new(FsNoteStore::new(dir.path()), RecordingHost::new());
    controller.startup();

    assert_eq!(
        controller.host().created_note_keys(),
        vec![SurfaceKey::Note(newer.id)]
    );
    assert!(controller.is_live(SurfaceKey::Note(newer.id)));
    assert!(!controller.is_live(SurfaceKey::Note(older.id)));
    // The reopened record is flipped to open and persisted.
    let on_disk = FsNoteStore::new(dir.path()).load_all().unwrap();
    assert_eq!(on_disk.get(&newer.id).map(|n| n.is_open), Some(true));
    assert_eq!(on_disk.get(&older.id).map(|n| n.is_open), Some(false));
}

#[test]
fn open_flags_win_over_recency() {
    let dir = tempfile::tempdir().unwrap();
    let open_note = note_with("A", true, 10);
    let closed_note = note_with("B", false, 20);
    write_artifact(dir.path(), &open_note);
    write_artifact(dir.path(), &closed_note);

    let mut controller = SyncController::new(FsNoteStore::new(dir.path()), RecordingHost::new());
    controller.startup();

    assert_eq!(
        controller.host().created_note_keys(),
        vec![SurfaceKey::Note(open_note.id)]
    );
    assert!(!controller.is_live(SurfaceKey::Note(closed_note.id)));
}

#[test]
fn every_open_record_is_restored() {
    let dir = tempfile::tempdir().unwrap();
    let first = note_with("A", true, 10);
    let second = note_with("B", true, 20);
    let archived = note_with("C", false, 30);
    write_artifact(dir.path(), &first);
    write_artifact(dir.path(), &second);
    write_artifact(dir.path(), &archived);

    let mut controller = SyncController::new(FsNoteStore::new(dir.path()), RecordingHost::new());
    controller.startup();

    assert!(controller.is_live(SurfaceKey::Note(first.id)));
    assert!(controller.is_live(SurfaceKey::Note(second.id)));
    assert!(!controller.is_live(SurfaceKey::Note(archived.id)));
    assert_eq!(controller.host().created.len(), 2);
}

#[test]
fn startup_restores_persisted_geometry_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let mut note = note_with("Placed", true, 10);
    note.x = Some(40);
    note.y = Some(60);
    note.width = Some(400);
    note.height = Some(500);
    write_artifact(dir.path(), &note);

    let mut controller = SyncController::new(FsNoteStore::new(dir.path()), RecordingHost::new());
    controller.startup();

    let (key, bounds) = controller.host().created[0];
    assert_eq!(key, SurfaceKey::Note(note.id));
    assert_eq!(bounds, note.bounds());
}
