//! Append-only line writer with size-based rotation.
//!
//! When appending a line would push the active file past `max_bytes`, the file
//! is shifted to `<name>.1`, older backups move up one slot (`.1` → `.2`, ...)
//! and anything beyond `backups` slots is removed.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Default size at which the trace file rotates (10 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Default number of rotated files kept.
pub const DEFAULT_BACKUPS: usize = 3;

/// Rotation limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_bytes: u64,
    pub backups: usize,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            backups: DEFAULT_BACKUPS,
        }
    }
}

/// Line writer that rotates its file by size.
///
/// The file is opened lazily on the first write, so construction never touches
/// the filesystem.
pub struct RotatingFile {
    path: PathBuf,
    policy: RotationPolicy,
    state: Mutex<ActiveFile>,
}

#[derive(Default)]
struct ActiveFile {
    handle: Option<File>,
    written: u64,
}

impl RotatingFile {
    #[must_use]
    pub const fn new(path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            path,
            policy,
            state: Mutex::new(ActiveFile { handle: None, written: 0 }),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline, rotating first if the line would not fit.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the parent directory cannot be created, a
    /// rotation rename fails, or the write itself fails.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace writer poisoned: {e}")))?;

        if state.handle.is_none() {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            state.written = fs::metadata(&self.path).map_or(0, |m| m.len());
        }

        let incoming = line.len() as u64 + 1;
        if state.written > 0 && state.written + incoming > self.policy.max_bytes {
            state.handle = None;
            self.rotate()?;
            state.written = 0;
        }

        if state.handle.is_none() {
            state.handle = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        if let Some(file) = state.handle.as_mut() {
            writeln!(file, "{line}")?;
            file.flush()?;
        }
        state.written += incoming;
        Ok(())
    }

    fn backup_path(&self, slot: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".{slot}"));
        PathBuf::from(name)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.policy.backups == 0 {
            return fs::remove_file(&self.path).or_else(ignore_missing);
        }

        fs::remove_file(self.backup_path(self.policy.backups)).or_else(ignore_missing)?;
        for slot in (1..self.policy.backups).rev() {
            let from = self.backup_path(slot);
            if from.exists() {
                fs::rename(&from, self.backup_path(slot + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1)).or_else(ignore_missing)
    }
}

fn ignore_missing(err: io::Error) -> io::Result<()> {
    if err.kind() == io::ErrorKind::NotFound {
        Ok(())
    } else {
        Err(err)
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
