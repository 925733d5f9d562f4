//! Single-controller-process lock.
//!
//! # Responsibility
//! - Guarantee at most one controller process per persistence root.
//! - Let a second launch detect the running instance and redirect into a
//!   bring-to-front action instead of starting a second note universe.
//!
//! # Invariants
//! - The lock artifact lives inside the store root, so relocating the
//!   root also scopes the lock.
//! - Dropping the guard releases the lock; a crashed process leaves a
//!   stale file that only an explicit `force` acquisition clears.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

const LOCK_FILE_NAME: &str = ".controller.lock";

/// Failure to acquire the single-instance lock.
#[derive(Debug)]
pub enum InstanceLockError {
    /// Another controller already holds the lock for this root.
    AlreadyRunning { lock_path: PathBuf },
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for InstanceLockError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyRunning { lock_path } => write!(
                f,
                "another controller instance holds `{}`",
                lock_path.display()
            ),
            Self::Io { path, source } => {
                write!(f, "instance lock I/O failure at `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for InstanceLockError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AlreadyRunning { .. } => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Held lock; releases on drop.
#[derive(Debug)]
pub struct InstanceLock {
    lock_path: PathBuf,
}

impl InstanceLock {
    /// Acquires the lock under `root`, failing when another instance
    /// already holds it.
    pub fn acquire(root: &Path) -> Result<Self, InstanceLockError> {
        std::fs::create_dir_all(root).map_err(|source| InstanceLockError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        let lock_path = root.join(LOCK_FILE_NAME);
        let result = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path);
        match result {
            Ok(mut file) => {
                let _ = write!(file, "{}", std::process::id());
                Ok(Self { lock_path })
            }
            Err(source) if source.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(InstanceLockError::AlreadyRunning { lock_path })
            }
            Err(source) => Err(InstanceLockError::Io {
                path: lock_path,
                source,
            }),
        }
    }

    /// Clears any stale lock and acquires. Only for recovery paths where
    /// the caller has established no live instance exists.
    pub fn force_acquire(root: &Path) -> Result<Self, InstanceLockError> {
        let lock_path = root.join(LOCK_FILE_NAME);
        match std::fs::remove_file(&lock_path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(InstanceLockError::Io {
                    path: lock_path,
                    source,
                })
            }
        }
        Self::acquire(root)
    }

    /// Moves the held lock under a different root, for the relocate flow.
    ///
    /// Acquires under `new_root` first and only then releases the old
    /// artifact, so the process is never unlocked in between. On failure
    /// the old lock stays held and the caller must abort the relocation.
    pub fn move_to(&mut self, new_root: &Path) -> Result<(), InstanceLockError> {
        if new_root.join(LOCK_FILE_NAME) == self.lock_path {
            return Ok(());
        }
        let moved = Self::acquire(new_root)?;
        let old_path = std::mem::replace(&mut self.lock_path, moved.lock_path.clone());
        // The guard for the new artifact is consumed here; `self` owns it
        // from now on.
        std::mem::forget(moved);
        let _ = std::fs::remove_file(old_path);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.lock_path
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.lock_path);
    }
}
