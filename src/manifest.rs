//! Creating and merging the project's `package.json`.

use crate::constants::{manifest as defaults, DEFAULT_PACKAGE_NAME, MANIFEST_FILE};
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::template::operation::ScaffoldOperation;
use cruet::case::kebab::to_kebab_case;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// The package manifest, kept as its top-level JSON object.
///
/// Values are never coerced into a schema, so a field of any JSON type
/// survives a merge untouched and keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest(IndexMap<String, Value>);

impl Manifest {
    pub fn path<P: AsRef<Path>>(project_root: P) -> PathBuf {
        project_root.as_ref().join(MANIFEST_FILE)
    }

    /// A fresh manifest for a project living in `project_root`.
    pub fn with_defaults(project_root: &Path) -> Self {
        let mut manifest = Manifest::default();
        manifest.fill_defaults(project_root);
        manifest
    }

    /// Reads and parses an existing manifest. Anything but a JSON object is
    /// rejected.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let parse_error = |reason: String| Error::ManifestParseError {
            path: path.display().to_string(),
            reason,
        };
        let content = std::fs::read_to_string(path).map_err(|e| parse_error(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))
    }

    /// Loads the manifest in `project_root`, or builds a default one when it
    /// is missing, unreadable or not a JSON object. Never fails.
    pub fn load_or_default(project_root: &Path) -> Self {
        let path = Self::path(project_root);
        if !path.exists() {
            log::debug!("No manifest at {}, starting from defaults", path.display());
            return Self::with_defaults(project_root);
        }
        match Self::load(&path) {
            Ok(mut manifest) => {
                manifest.fill_defaults(project_root);
                manifest
            }
            Err(e) => {
                log::warn!("{e}. Falling back to a default manifest.");
                Self::with_defaults(project_root)
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Inserts fields whose key is absent; present keys keep their value,
    /// whatever its type.
    fn fill_defaults(&mut self, project_root: &Path) {
        let fields = [
            ("name", package_name(project_root)),
            ("version", defaults::VERSION.to_string()),
            ("main", defaults::ENTRY_POINT.to_string()),
            ("type", defaults::MODULE_TYPE.to_string()),
        ];
        for (key, value) in fields {
            self.0.entry(key.to_string()).or_insert(Value::String(value));
        }
    }

    /// Overwrites the owned script entries, keeping every other script.
    ///
    /// A `scripts` field that is not an object is replaced by one.
    pub fn apply_scripts(&mut self, scripts: &[(&str, &str)]) {
        let entry = self
            .0
            .entry("scripts".to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            log::warn!("Replacing non-object \"scripts\" field in {MANIFEST_FILE}");
            *entry = Value::Object(Map::new());
        }
        if let Value::Object(entries) = entry {
            for (name, command) in scripts {
                entries.insert(name.to_string(), Value::String(command.to_string()));
            }
        }
    }

    /// Pretty-printed JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// Derives an npm-compatible package name from the project directory.
pub fn package_name(project_root: &Path) -> String {
    project_root
        .base_name()
        .map(|name| to_kebab_case(&name))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_PACKAGE_NAME.to_string())
}

/// Plans the read-merge-write cycle for the manifest in `project_root`.
pub fn plan_manifest(
    project_root: &Path,
    scripts: &[(&str, &str)],
) -> Result<ScaffoldOperation> {
    let mut manifest = Manifest::load_or_default(project_root);
    manifest.apply_scripts(scripts);
    Ok(ScaffoldOperation::write(Manifest::path(project_root), manifest.to_json()?))
}
