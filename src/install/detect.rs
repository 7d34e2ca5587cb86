use crate::install::interface::{CommandRunner, CommandSpec};
use clap::ValueEnum;
use std::fmt::Display;
use std::path::PathBuf;
use std::time::Duration;

/// How long the `--version` check may take before the faster tool is considered absent.
const VERSION_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Package managers kiln knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum PackageManager {
    /// The faster alternative, preferred when installed.
    Pnpm,
    /// The default that ships with Node.js.
    Npm,
}

impl PackageManager {
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm",
            PackageManager::Npm => "npm",
        }
    }
}

impl Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program())
    }
}

/// Decides which package manager performs the installation.
pub trait ToolDetector {
    fn detect(&self) -> PackageManager;
}

/// Always answers with the same package manager (used for `--package-manager`).
#[derive(Debug, Clone, Copy)]
pub struct FixedDetector(pub PackageManager);

impl ToolDetector for FixedDetector {
    fn detect(&self) -> PackageManager {
        self.0
    }
}

/// Checks for pnpm with `pnpm --version` and falls back to npm.
pub struct VersionCheckDetector<'a> {
    runner: &'a dyn CommandRunner,
    cwd: PathBuf,
}

impl<'a> VersionCheckDetector<'a> {
    pub fn new(runner: &'a dyn CommandRunner, cwd: impl Into<PathBuf>) -> Self {
        Self { runner, cwd: cwd.into() }
    }
}

impl ToolDetector for VersionCheckDetector<'_> {
    fn detect(&self) -> PackageManager {
        let check = CommandSpec::new(PackageManager::Pnpm.program(), ["--version"], &self.cwd)
            .with_timeout(Some(VERSION_CHECK_TIMEOUT));
        match self.runner.run(&check) {
            Ok(output) if output.success() => {
                log::debug!("Found pnpm {}", output.stdout.trim());
                PackageManager::Pnpm
            }
            Ok(output) => {
                log::debug!("pnpm version check failed with {}, using npm", output.status());
                PackageManager::Npm
            }
            Err(e) => {
                log::debug!("pnpm is not available ({e}), using npm");
                PackageManager::Npm
            }
        }
    }
}
