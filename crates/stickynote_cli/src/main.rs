//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `stickynote_core` linkage.
//! - Inspect a persistence root from the command line without a window
//!   host attached.

use std::path::PathBuf;
use stickynote_core::{FsNoteStore, NoteStore};

fn main() {
    println!("stickynote_core version={}", stickynote_core::core_version());

    let Some(root) = std::env::args().nth(1).map(PathBuf::from) else {
        return;
    };

    let store = FsNoteStore::new(&root);
    match store.load_all() {
        Ok(notes) => {
            println!("root={} records={}", root.display(), notes.len());
            for note in notes.values() {
                println!(
                    "  {} title={:?} open={} last_modified={}",
                    note.id, note.title, note.is_open, note.last_modified
                );
            }
        }
        Err(err) => {
            eprintln!("failed to scan {}: {err}", root.display());
            std::process::exit(1);
        }
    }
}
