use crate::constants::{DEFAULT_TARGET, SOURCE_DIR};
use std::path::{Path, PathBuf};

/// Locations derived from the CLI target argument.
///
/// Resolved once per invocation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    /// The target argument as the user typed it (or the default).
    pub target: String,
    /// Absolute directory that receives the manifest and dotfiles.
    pub project_root: PathBuf,
    /// `<project_root>/src`, home of all generated application code.
    pub source_root: PathBuf,
    /// Whether the project root is the working directory itself.
    pub is_current_dir: bool,
}

/// Derives the project and source roots from the optional target argument.
///
/// A missing or empty target falls back to `.`. Relative targets are joined
/// onto `cwd`; absolute targets are used as-is. This is pure path
/// arithmetic and never touches the filesystem.
pub fn resolve_project_paths(target: Option<&str>, cwd: &Path) -> ProjectPaths {
    let target = match target {
        Some(t) if !t.trim().is_empty() => t.to_string(),
        _ => DEFAULT_TARGET.to_string(),
    };

    let project_root =
        if target == DEFAULT_TARGET { cwd.to_path_buf() } else { cwd.join(&target) };
    let source_root = project_root.join(SOURCE_DIR);
    // Component-wise comparison treats `./` and an absolute cwd as the current directory too.
    let is_current_dir = project_root == cwd;

    ProjectPaths { target, project_root, source_root, is_current_dir }
}
