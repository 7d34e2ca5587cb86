use crate::error::{Error, Result};
use crate::install::detect::PackageManager;
use crate::install::interface::{CommandRunner, CommandSpec};
use crate::manifest::Manifest;
use std::path::Path;
use std::time::Duration;

/// Installs the blueprint's dependencies with a package manager.
pub struct Installer<'a> {
    runner: &'a dyn CommandRunner,
    timeout: Option<Duration>,
}

impl<'a> Installer<'a> {
    pub fn new(runner: &'a dyn CommandRunner, timeout: Option<Duration>) -> Self {
        Self { runner, timeout }
    }

    /// The commands `install` will run, in order.
    ///
    /// `init -y` is only needed when no manifest exists yet.
    pub fn plan(
        &self,
        project_root: &Path,
        package_manager: PackageManager,
        dependencies: &[&str],
        dev_dependencies: &[&str],
    ) -> Vec<CommandSpec> {
        let program = package_manager.program();
        let mut commands = Vec::new();

        if !Manifest::path(project_root).exists() {
            commands.push(CommandSpec::new(program, ["init", "-y"], project_root));
        }
        if !dependencies.is_empty() {
            let args = std::iter::once("install").chain(dependencies.iter().copied());
            commands.push(CommandSpec::new(program, args, project_root));
        }
        if !dev_dependencies.is_empty() {
            let args = ["install", "-D"].into_iter().chain(dev_dependencies.iter().copied());
            commands.push(CommandSpec::new(program, args, project_root));
        }

        commands.into_iter().map(|c| c.with_timeout(self.timeout)).collect()
    }

    /// Runs the install commands synchronously in `project_root`.
    ///
    /// Stops at the first command that does not exit with code 0.
    pub fn install(
        &self,
        project_root: &Path,
        package_manager: PackageManager,
        dependencies: &[&str],
        dev_dependencies: &[&str],
    ) -> Result<()> {
        for spec in self.plan(project_root, package_manager, dependencies, dev_dependencies) {
            log::info!("Running '{}'", spec.command_line());
            let output = self.runner.run(&spec)?;
            if !output.stdout.trim().is_empty() {
                log::debug!("{}", output.stdout.trim_end());
            }
            if !output.success() {
                let message = match output.stderr.trim() {
                    "" => output.stdout.trim().to_string(),
                    stderr => stderr.to_string(),
                };
                return Err(Error::InstallationError {
                    package_manager: package_manager.to_string(),
                    command: spec.command_line(),
                    status: output.status(),
                    message,
                });
            }
        }
        Ok(())
    }
}
