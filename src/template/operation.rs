use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A single filesystem step planned by one of the setup tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldOperation {
    /// Create a directory and its parents, tolerating existing ones.
    CreateDirectory { target: PathBuf, target_exists: bool },
    /// Create-or-replace: write unconditionally.
    Write { target: PathBuf, content: String, target_exists: bool },
    /// Create-if-absent: write only when nothing is at `target`.
    CreateIfAbsent { target: PathBuf, content: String, target_exists: bool },
}

impl ScaffoldOperation {
    pub fn create_directory(target: PathBuf) -> Self {
        let target_exists = target.is_dir();
        ScaffoldOperation::CreateDirectory { target, target_exists }
    }

    pub fn write(target: PathBuf, content: impl Into<String>) -> Self {
        let target_exists = target.exists();
        ScaffoldOperation::Write { target, content: content.into(), target_exists }
    }

    pub fn create_if_absent(target: PathBuf, content: impl Into<String>) -> Self {
        let target_exists = target.exists();
        ScaffoldOperation::CreateIfAbsent { target, content: content.into(), target_exists }
    }

    pub fn target(&self) -> &Path {
        match self {
            ScaffoldOperation::CreateDirectory { target, .. }
            | ScaffoldOperation::Write { target, .. }
            | ScaffoldOperation::CreateIfAbsent { target, .. } => target,
        }
    }

    /// Gets a message describing the operation and its status.
    ///
    /// # Arguments
    /// * `dry_run` - Whether this is a dry run (no actual file operations)
    pub fn get_message(&self, dry_run: bool) -> String {
        let prefix = if dry_run { "[DRY RUN] " } else { "" };

        match self {
            ScaffoldOperation::CreateDirectory { target, target_exists } => {
                if *target_exists {
                    format!(
                        "{}Skipping directory creation '{}' (already exists)",
                        prefix,
                        target.display()
                    )
                } else {
                    format!("{}Creating directory '{}'", prefix, target.display())
                }
            }
            ScaffoldOperation::Write { target, target_exists, .. } => {
                if *target_exists {
                    format!(
                        "{}Writing to '{}' (overwriting existing file)",
                        prefix,
                        target.display()
                    )
                } else {
                    format!("{}Writing to '{}'", prefix, target.display())
                }
            }
            ScaffoldOperation::CreateIfAbsent { target, target_exists, .. } => {
                if *target_exists {
                    format!(
                        "{}Skipping write to '{}' (target already exists)",
                        prefix,
                        target.display()
                    )
                } else {
                    format!("{}Writing to '{}'", prefix, target.display())
                }
            }
        }
    }

    /// Performs the operation unless `dry_run` is set.
    ///
    /// Returns whether the filesystem was changed. A create-if-absent write
    /// uses an exclusive create, so a file that appeared after planning is
    /// left untouched as well.
    pub fn apply(&self, dry_run: bool) -> Result<bool> {
        if dry_run {
            return Ok(false);
        }

        match self {
            ScaffoldOperation::CreateDirectory { target, .. } => {
                std::fs::create_dir_all(target)
                    .map_err(|e| Error::fs("create directory", target, e))?;
                Ok(true)
            }
            ScaffoldOperation::Write { target, content, .. } => {
                ensure_parent(target)?;
                std::fs::write(target, content).map_err(|e| Error::fs("write", target, e))?;
                Ok(true)
            }
            ScaffoldOperation::CreateIfAbsent { target, content, .. } => {
                ensure_parent(target)?;
                let file = OpenOptions::new().write(true).create_new(true).open(target);
                match file {
                    Ok(mut file) => {
                        file.write_all(content.as_bytes())
                            .map_err(|e| Error::fs("write", target, e))?;
                        Ok(true)
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                        log::debug!("'{}' already exists, leaving it untouched", target.display());
                        Ok(false)
                    }
                    Err(e) => Err(Error::fs("create", target, e)),
                }
            }
        }
    }
}

/// Applies every operation in order, logging each outcome.
///
/// Failures do not stop later operations; they are logged at the point of
/// origin with `context` as a prefix and returned to the caller.
pub fn apply_all<'a, I>(operations: I, dry_run: bool, context: &str) -> Vec<Error>
where
    I: IntoIterator<Item = &'a ScaffoldOperation>,
{
    operations.into_iter().filter_map(|op| apply_logged(op, dry_run, context)).collect()
}

/// Applies one operation, returning the error if it failed.
pub fn apply_logged(op: &ScaffoldOperation, dry_run: bool, context: &str) -> Option<Error> {
    log::debug!("Handling operation: {op:?}");
    match op.apply(dry_run) {
        Ok(_) => {
            log::info!("{}", op.get_message(dry_run));
            None
        }
        Err(e) => {
            log::error!("❌ {context}: {e}");
            Some(e)
        }
    }
}

fn ensure_parent(target: &Path) -> Result<()> {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|e| Error::fs("create directory", parent, e)),
        _ => Ok(()),
    }
}
