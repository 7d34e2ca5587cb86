use crate::error::Error;
use crate::template::operation::{apply_all, ScaffoldOperation};
use std::path::Path;

/// Plans the directory skeleton: the source root first, then every folder beneath it.
pub fn plan_tree(source_root: &Path, folders: &[&str]) -> Vec<ScaffoldOperation> {
    std::iter::once(source_root.to_path_buf())
        .chain(folders.iter().map(|folder| source_root.join(folder)))
        .map(ScaffoldOperation::create_directory)
        .collect()
}

/// Creates `source_root` and each folder under it, tolerating existing directories.
///
/// Every failure is logged and collected; a failing folder does not stop
/// the others from being attempted.
pub fn ensure_tree(source_root: &Path, folders: &[&str], dry_run: bool) -> Vec<Error> {
    let operations = plan_tree(source_root, folders);
    log::debug!("Planned {} directories under {}", operations.len(), source_root.display());
    apply_all(&operations, dry_run, "Error creating folders")
}
