use crate::error::Error;
use crate::manifest::plan_manifest;
use crate::template::files::TemplateFile;
use crate::template::operation::{apply_all, apply_logged, ScaffoldOperation};
use std::path::Path;

/// Plans a create-if-absent write for every root file (`.gitignore`, `.env`).
pub fn plan_root_files(project_root: &Path, files: &[TemplateFile]) -> Vec<ScaffoldOperation> {
    files
        .iter()
        .map(|file| ScaffoldOperation::create_if_absent(project_root.join(file.path), file.content))
        .collect()
}

/// Writes root files that do not exist yet; existing ones are never touched.
pub fn write_root_files(project_root: &Path, files: &[TemplateFile], dry_run: bool) -> Vec<Error> {
    apply_all(&plan_root_files(project_root, files), dry_run, "Error creating environment files")
}

/// Merges the manifest and writes the root files.
///
/// A manifest that cannot be read or parsed is replaced by defaults; only
/// write failures are reported.
pub fn setup_manifest_and_environment(
    project_root: &Path,
    scripts: &[(&str, &str)],
    root_files: &[TemplateFile],
    dry_run: bool,
) -> Vec<Error> {
    let mut failures: Vec<Error> = match plan_manifest(project_root, scripts) {
        Ok(op) => apply_logged(&op, dry_run, "Error updating package.json").into_iter().collect(),
        Err(e) => {
            log::error!("❌ Error updating package.json: {e}");
            vec![e]
        }
    };
    failures.extend(write_root_files(project_root, root_files, dry_run));
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Manifest;
    use crate::template::files::{ROOT_FILES, SCRIPTS};
    use tempfile::TempDir;

    #[test]
    fn writes_missing_root_files() {
        let tmp = TempDir::new().unwrap();
        assert!(write_root_files(tmp.path(), ROOT_FILES, false).is_empty());
        assert_eq!(
            std::fs::read_to_string(tmp.path().join(".gitignore")).unwrap(),
            ".env\nnode_modules\n"
        );
        assert!(std::fs::read_to_string(tmp.path().join(".env"))
            .unwrap()
            .contains("JWT_SECRET=your_jwt_secret"));
    }

    #[test]
    fn existing_env_is_left_alone() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(".env"), "MONGO_URI=mongodb://prod/\n").unwrap();

        assert!(write_root_files(tmp.path(), ROOT_FILES, false).is_empty());

        assert_eq!(
            std::fs::read_to_string(tmp.path().join(".env")).unwrap(),
            "MONGO_URI=mongodb://prod/\n"
        );
        assert!(tmp.path().join(".gitignore").is_file());
    }

    #[test]
    fn setup_creates_project_root_and_manifest() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("fresh");

        let failures = setup_manifest_and_environment(&root, SCRIPTS, ROOT_FILES, false);

        assert!(failures.is_empty());
        assert!(Manifest::path(&root).is_file());
        assert!(root.join(".env").is_file());
    }

    #[test]
    fn setup_reports_unwritable_root() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("taken");
        std::fs::write(&root, "a file where the project should go").unwrap();

        let failures = setup_manifest_and_environment(&root, SCRIPTS, ROOT_FILES, false);

        // package.json, .gitignore and .env all fail.
        assert_eq!(failures.len(), 3);
    }
}
