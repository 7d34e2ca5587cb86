use crate::error::Error;
use crate::template::files::TemplateFile;
use crate::template::operation::{apply_logged, ScaffoldOperation};
use rayon::prelude::*;
use std::path::Path;

/// Plans a create-or-replace write for every template under `root`.
pub fn plan_templates(root: &Path, templates: &[TemplateFile]) -> Vec<ScaffoldOperation> {
    templates
        .iter()
        .map(|file| ScaffoldOperation::write(root.join(file.path), file.content))
        .collect()
}

/// Writes every template under `root`, overwriting existing files.
///
/// Writes are independent and run in parallel with no ordering between
/// them. Each write creates its own parent directory, so it does not wait
/// for the tree builder. A failed write is logged and collected while the
/// others proceed.
pub fn write_all(root: &Path, templates: &[TemplateFile], dry_run: bool) -> Vec<Error> {
    plan_templates(root, templates)
        .par_iter()
        .filter_map(|op| apply_logged(op, dry_run, "Error creating project files"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::files::SOURCES;
    use tempfile::TempDir;

    #[test]
    fn writes_exact_content() {
        let tmp = TempDir::new().unwrap();
        let failures = write_all(tmp.path(), SOURCES, false);
        assert!(failures.is_empty());
        for file in SOURCES {
            let written = std::fs::read_to_string(tmp.path().join(file.path)).unwrap();
            assert_eq!(written, file.content, "{} differs", file.path);
        }
    }

    #[test]
    fn overwrites_modified_files() {
        let tmp = TempDir::new().unwrap();
        write_all(tmp.path(), SOURCES, false);
        std::fs::write(tmp.path().join("app.js"), "// edited").unwrap();

        assert!(write_all(tmp.path(), SOURCES, false).is_empty());

        let app = SOURCES.iter().find(|f| f.path == "app.js").unwrap();
        assert_eq!(std::fs::read_to_string(tmp.path().join("app.js")).unwrap(), app.content);
    }

    #[test]
    fn failed_write_leaves_siblings_written() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("routes"), "blocks the routes folder").unwrap();

        let failures = write_all(tmp.path(), SOURCES, false);

        assert_eq!(failures.len(), 1);
        assert!(tmp.path().join("server.js").is_file());
        assert!(tmp.path().join("config/db.js").is_file());
    }

    #[test]
    fn plan_marks_existing_targets() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("server.js"), "old").unwrap();
        let plan = plan_templates(tmp.path(), SOURCES);
        let server = plan.iter().find(|op| op.target().ends_with("server.js")).unwrap();
        assert!(matches!(server, ScaffoldOperation::Write { target_exists: true, .. }));
    }
}
