//! Consumed platform collaborator interfaces.
//!
//! # Responsibility
//! - Name the thin platform services core consumes but never implements:
//!   directory picking, login-item registration, font file loading.
//!
//! # Invariants
//! - No default implementation lives in core; hosts supply these.
//! - Cancellation (`None` from the picker) is a normal outcome, never an
//!   error.

use std::path::{Path, PathBuf};

/// Platform services consumed by the controller.
pub trait PlatformHooks {
    /// Opens a directory picker for relocating the persistence root.
    /// Returns `None` when the user cancels.
    fn pick_directory(&mut self) -> Option<PathBuf>;

    /// Registers or unregisters the application as a login item.
    fn set_launch_at_login(&mut self, enabled: bool);

    /// Whether the application is currently registered as a login item.
    fn launch_at_login(&self) -> bool;

    /// Loads a font file and returns its registerable family name.
    fn register_font(&mut self, path: &Path) -> Result<String, String>;
}
