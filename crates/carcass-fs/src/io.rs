//! Atomic writes, recursive delete and recursive copy

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so a reader never observes a partially
/// written configuration file.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Temp file lives in the same directory so the rename stays on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    fs::rename(&temp_path, &native_path).map_err(|e| Error::io(&native_path, e))?;

    Ok(())
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Remove a directory tree if it exists.
///
/// Returns `true` when something was removed.
pub fn remove_dir_if_exists(path: &NormalizedPath) -> Result<bool> {
    let native_path = path.to_native();
    match fs::remove_dir_all(&native_path) {
        Ok(()) => {
            tracing::debug!(path = %path, "Removed directory tree");
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(native_path, e)),
    }
}

/// Delete any existing directory at `path` and create it again, empty.
pub fn recreate_dir(path: &NormalizedPath) -> Result<()> {
    remove_dir_if_exists(path)?;
    let native_path = path.to_native();
    fs::create_dir_all(&native_path).map_err(|e| Error::io(native_path, e))
}

/// Create each named subdirectory under `parent`.
pub fn create_subdirectories(parent: &NormalizedPath, names: &[&str]) -> Result<()> {
    for name in names {
        let native_path = parent.join(name).to_native();
        fs::create_dir_all(&native_path).map_err(|e| Error::io(native_path, e))?;
    }
    Ok(())
}

/// List the immediate entries of a directory sorted by file name.
///
/// Platform listing order is unspecified, so callers that pick "the first"
/// entry get a stable lexicographic order instead.
pub fn sorted_entries(dir: &Path) -> Result<Vec<fs::DirEntry>> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| Error::io(dir, e))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::io(dir, e))?;
    entries.sort_by_key(|entry| entry.file_name());
    Ok(entries)
}

/// Copy a single file into `dir`, keeping its file name. Overwrites.
pub fn copy_file_into(source: &Path, dir: &Path) -> Result<PathBuf> {
    let file_name = source.file_name().ok_or_else(|| {
        Error::io(
            source,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;
    let destination = dir.join(file_name);
    fs::copy(source, &destination).map_err(|e| Error::io(source, e))?;
    Ok(destination)
}

/// Recursively copy the directory `source` to `destination`.
///
/// `destination` itself must not exist yet; it is created, never merged into.
pub fn copy_dir_recursive(source: &Path, destination: &Path) -> Result<u64> {
    fs::create_dir(destination).map_err(|e| Error::io(destination, e))?;

    let mut copied = 0;
    for entry in sorted_entries(source)? {
        let entry_path = entry.path();
        let target = destination.join(entry.file_name());
        // Follows symlinks so a linked data directory is copied as a directory
        let metadata = fs::metadata(&entry_path).map_err(|e| Error::io(&entry_path, e))?;

        if metadata.is_dir() {
            copied += copy_dir_recursive(&entry_path, &target)?;
        } else {
            fs::copy(&entry_path, &target).map_err(|e| Error::io(&entry_path, e))?;
            copied += 1;
        }
    }
    Ok(copied)
}
