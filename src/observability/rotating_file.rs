//! Append-only line file that rolls over by size.
//!
//! When the live file grows past its limit it is renamed with a
//! `chrono` timestamp suffix and a fresh file is started. Only the newest
//! backups are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Size at which the live file is rolled over (10 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Backups retained after a rollover.
pub const DEFAULT_MAX_BACKUPS: usize = 3;

/// Backup suffix format. Lexical order matches age.
const BACKUP_SUFFIX_FORMAT: &str = "%Y%m%dT%H%M%S%.6f";

/// Thread-safe rotating writer for newline-delimited records.
///
/// The handle is opened lazily on the first write, so construction never
/// touches the filesystem.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    handle: Mutex<Option<File>>,
}

impl RotatingFile {
    /// Creates a writer with the default 10 MiB / 3 backup limits.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, DEFAULT_MAX_BYTES, DEFAULT_MAX_BACKUPS)
    }

    #[must_use]
    pub const fn with_limits(path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self { path, max_bytes, max_backups, handle: Mutex::new(None) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline, rolling the file over first if it is
    /// already past the size limit.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the rollover, open, or write fails, or if the
    /// lock was poisoned by a panicking writer.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace file lock poisoned: {e}")))?;

        if self.needs_rollover() {
            *handle = None;
            self.roll_over()?;
        }

        let file = match handle.as_mut() {
            Some(file) => file,
            None => handle.insert(OpenOptions::new().create(true).append(true).open(&self.path)?),
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rollover(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|m| m.len() > self.max_bytes)
    }

    fn roll_over(&self) -> io::Result<()> {
        let suffix = chrono::Local::now().format(BACKUP_SUFFIX_FORMAT);
        let backup = self.path.with_file_name(format!("{}.{suffix}", self.file_name()?));
        fs::rename(&self.path, backup)?;
        self.prune_backups()
    }

    /// Paths of existing backups, newest first.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the parent directory cannot be read.
    pub fn backups(&self) -> io::Result<Vec<PathBuf>> {
        let prefix = format!("{}.", self.file_name()?);
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut backups: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();
        backups.sort_unstable_by(|a, b| b.cmp(a));
        Ok(backups)
    }

    fn prune_backups(&self) -> io::Result<()> {
        // Not logged: this runs inside the trace exporter.
        for stale in self.backups()?.iter().skip(self.max_backups) {
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }

    fn file_name(&self) -> io::Result<&str> {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "trace file path has no file name"))
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines_without_rolling_under_the_limit() {
        let dir = tempfile::tempdir().expect("tempdir");
        let writer = RotatingFile::new(dir.path().join("trace.json"));

        writer.write_line("{\"a\":1}").expect("first write");
        writer.write_line("{\"b\":2}").expect("second write");

        let contents = fs::read_to_string(writer.path()).expect("read trace");
        assert_eq!(contents, "{\"a\":1}\n{\"b\":2}\n");
        assert!(writer.backups().expect("list backups").is_empty());
    }

    #[test]
    fn rolls_over_and_keeps_a_bounded_number_of_backups() {
        let dir = tempfile::tempdir().expect("tempdir");
        let writer = RotatingFile::with_limits(dir.path().join("trace.json"), 8, 2);

        for i in 0..6 {
            writer.write_line(&format!("record-number-{i}")).expect("write");
        }

        let backups = writer.backups().expect("list backups");
        assert!(!backups.is_empty());
        assert!(backups.len() <= 2);

        let live = fs::read_to_string(writer.path()).expect("read live file");
        assert_eq!(live, "record-number-5\n");
    }

    #[test]
    fn unrelated_files_are_not_treated_as_backups() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("other.json.1"), "x").expect("write decoy");
        let writer = RotatingFile::new(dir.path().join("trace.json"));
        assert!(writer.backups().expect("list backups").is_empty());
    }
}
