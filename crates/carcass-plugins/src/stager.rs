//! Copy resolved plugins into a server's plugin directory

use std::fmt;
use std::path::{Path, PathBuf};

use carcass_fs::{NormalizedPath, io};
use carcass_meta::PluginReference;

use crate::error::{Error, Result};
use crate::reference::ReferencePattern;

/// Why a reference could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// Literal file reference that does not exist
    MissingFile,
    /// Pattern directory exists but no file name starts with the prefix
    NoMatch { prefix: String },
    /// Folder reference that does not exist
    MissingFolder,
    /// Folder reference that exists but is not a directory
    NotADirectory,
}

/// A non-fatal problem found while staging plugins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginWarning {
    Unresolved {
        reference: String,
        reason: UnresolvedReason,
    },
    InvalidDirectory {
        reference: String,
        directory: PathBuf,
    },
}

impl PluginWarning {
    pub fn reference(&self) -> &str {
        match self {
            PluginWarning::Unresolved { reference, .. }
            | PluginWarning::InvalidDirectory { reference, .. } => reference,
        }
    }
}

impl fmt::Display for PluginWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginWarning::Unresolved { reference, reason } => match reason {
                UnresolvedReason::MissingFile => {
                    write!(f, "plugin file {reference} does not exist, skipping")
                }
                UnresolvedReason::NoMatch { prefix } => write!(
                    f,
                    "no plugin starting with '{prefix}' found for {reference}, skipping"
                ),
                UnresolvedReason::MissingFolder => {
                    write!(f, "plugin folder {reference} does not exist, skipping")
                }
                UnresolvedReason::NotADirectory => {
                    write!(f, "plugin folder {reference} is not a directory, skipping")
                }
            },
            PluginWarning::InvalidDirectory {
                reference,
                directory,
            } => write!(
                f,
                "plugin directory {} for {reference} is invalid, skipping",
                directory.display()
            ),
        }
    }
}

/// Outcome of staging one server's plugins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagingReport {
    /// Files and folders created in the target directory
    pub copied: Vec<PathBuf>,
    pub warnings: Vec<PluginWarning>,
}

impl StagingReport {
    fn warn(&mut self, warning: PluginWarning) {
        tracing::warn!(reference = warning.reference(), "{warning}");
        self.warnings.push(warning);
    }
}

/// Stage plugin files and plugin data folders into `target_dir`.
///
/// Missing or unmatched references are collected as warnings and never stop
/// later references from being staged. A folder whose destination already
/// exists is an error; folders are never merged.
pub fn stage_plugins(
    file_refs: &[PluginReference],
    folder_refs: &[PluginReference],
    target_dir: &Path,
) -> Result<StagingReport> {
    let mut report = StagingReport::default();

    for reference in file_refs {
        stage_file(reference.as_str(), target_dir, &mut report)?;
    }

    for reference in folder_refs {
        stage_folder(reference.as_str(), target_dir, &mut report)?;
    }

    tracing::debug!(
        target = %target_dir.display(),
        copied = report.copied.len(),
        warnings = report.warnings.len(),
        "Staged plugins"
    );
    Ok(report)
}

fn stage_file(reference: &str, target_dir: &Path, report: &mut StagingReport) -> Result<()> {
    let literal = NormalizedPath::new(reference);
    if literal.is_file() {
        let copied = io::copy_file_into(&literal.to_native(), target_dir)?;
        tracing::debug!(reference, destination = %copied.display(), "Copied plugin");
        report.copied.push(copied);
        return Ok(());
    }

    match ReferencePattern::parse(reference) {
        ReferencePattern::Prefix { directory, prefix } => {
            if !directory.is_dir() {
                report.warn(PluginWarning::InvalidDirectory {
                    reference: reference.to_string(),
                    directory: directory.to_native(),
                });
                return Ok(());
            }

            match first_file_with_prefix(&directory.to_native(), &prefix)? {
                Some(source) => {
                    let copied = io::copy_file_into(&source, target_dir)?;
                    tracing::debug!(
                        reference,
                        matched = %source.display(),
                        "Copied plugin matched by prefix"
                    );
                    report.copied.push(copied);
                }
                None => report.warn(PluginWarning::Unresolved {
                    reference: reference.to_string(),
                    reason: UnresolvedReason::NoMatch { prefix },
                }),
            }
        }
        ReferencePattern::Literal(_) => report.warn(PluginWarning::Unresolved {
            reference: reference.to_string(),
            reason: UnresolvedReason::MissingFile,
        }),
    }
    Ok(())
}

/// First regular file in `directory`, by file name order, starting with `prefix`.
fn first_file_with_prefix(directory: &Path, prefix: &str) -> Result<Option<PathBuf>> {
    for entry in io::sorted_entries(directory)? {
        let name = entry.file_name();
        if !name.to_string_lossy().starts_with(prefix) {
            continue;
        }
        let path = entry.path();
        if path.is_file() {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

fn stage_folder(reference: &str, target_dir: &Path, report: &mut StagingReport) -> Result<()> {
    let source = NormalizedPath::new(reference);

    if !source.exists() {
        report.warn(PluginWarning::Unresolved {
            reference: reference.to_string(),
            reason: UnresolvedReason::MissingFolder,
        });
        return Ok(());
    }
    if !source.is_dir() {
        report.warn(PluginWarning::Unresolved {
            reference: reference.to_string(),
            reason: UnresolvedReason::NotADirectory,
        });
        return Ok(());
    }

    let name = folder_name(&source)?;
    let destination = target_dir.join(&name);
    if destination.exists() {
        return Err(Error::DestinationExists { path: destination });
    }

    let files = io::copy_dir_recursive(&source.to_native(), &destination)?;
    tracing::debug!(reference, files, destination = %destination.display(), "Copied plugin folder");
    report.copied.push(destination);
    Ok(())
}

/// Final segment naming the folder, resolving `.`/`..` through the filesystem.
fn folder_name(source: &NormalizedPath) -> Result<String> {
    if let Some(name) = source.file_name().filter(|n| *n != "." && *n != "..") {
        return Ok(name.to_string());
    }

    let native = source.to_native();
    let canonical =
        std::fs::canonicalize(&native).map_err(|e| carcass_fs::Error::io(&native, e))?;
    canonical
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Error::UnnamedFolder {
            path: canonical.clone(),
        })
}
