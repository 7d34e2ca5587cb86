use crate::{
    cli::{report::next_steps, Args},
    environment::setup_manifest_and_environment,
    error::{Error, Result},
    install::{
        CancelFlag, CommandRunner, FixedDetector, Installer, PackageManager, SystemCommandRunner,
        ToolDetector, VersionCheckDetector,
    },
    paths::{resolve_project_paths, ProjectPaths},
    template::{files::Blueprint, writer::write_all},
    tree::ensure_tree,
};
use std::path::PathBuf;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub paths: ProjectPaths,
    /// The package manager used, if the install phase ran.
    pub package_manager: Option<PackageManager>,
    pub installed: bool,
}

/// Main CLI runner that orchestrates resolve, setup, install and report
pub struct Runner<'a> {
    args: Args,
    cwd: PathBuf,
    blueprint: Blueprint,
    command_runner: &'a dyn CommandRunner,
    detector: Option<&'a dyn ToolDetector>,
}

impl<'a> Runner<'a> {
    pub fn new(args: Args, cwd: PathBuf, command_runner: &'a dyn CommandRunner) -> Self {
        Self { args, cwd, blueprint: Blueprint::default(), command_runner, detector: None }
    }

    pub fn with_blueprint(mut self, blueprint: Blueprint) -> Self {
        self.blueprint = blueprint;
        self
    }

    /// Replaces the pnpm version check; `--package-manager` still takes precedence.
    pub fn with_detector(mut self, detector: &'a dyn ToolDetector) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Executes the complete scaffolding workflow
    pub fn run(self) -> Result<Outcome> {
        self.blueprint.validate()?;

        let paths = resolve_project_paths(Some(self.args.target.as_str()), &self.cwd);
        println!("\n🚀 Setting up project in: {}\n", paths.project_root.display());

        self.materialize(&paths)?;

        if self.args.dry_run {
            println!("\nDry run complete, nothing was written.");
            return Ok(Outcome { paths, package_manager: None, installed: false });
        }

        let package_manager = if self.args.skip_install {
            log::info!("Skipping dependency installation");
            None
        } else {
            Some(self.install(&paths)?)
        };

        println!("\n🎉 Setup Complete! Run the following commands to start:\n");
        println!("{}", next_steps(&paths));

        Ok(Outcome { installed: package_manager.is_some(), paths, package_manager })
    }

    /// Runs the tree builder, template writer and manifest/environment setup
    /// concurrently and joins them.
    ///
    /// The three tasks touch disjoint paths. Every failure from any of them
    /// is collected; if there is at least one, the whole setup fails so the
    /// installer never runs against a partial tree.
    fn materialize(&self, paths: &ProjectPaths) -> Result<()> {
        let blueprint = self.blueprint;
        let dry_run = self.args.dry_run;

        let (tree_failures, (template_failures, manifest_failures)) = rayon::join(
            || ensure_tree(&paths.source_root, blueprint.folders, dry_run),
            || {
                rayon::join(
                    || write_all(&paths.source_root, blueprint.sources, dry_run),
                    || {
                        setup_manifest_and_environment(
                            &paths.project_root,
                            blueprint.scripts,
                            blueprint.root_files,
                            dry_run,
                        )
                    },
                )
            },
        );

        let failures: Vec<Error> = tree_failures
            .into_iter()
            .chain(template_failures)
            .chain(manifest_failures)
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::SetupFailed { failures })
        }
    }

    /// Picks a package manager and installs the blueprint's dependencies.
    fn install(&self, paths: &ProjectPaths) -> Result<PackageManager> {
        let package_manager = match (self.args.package_manager, self.detector) {
            (Some(forced), _) => FixedDetector(forced).detect(),
            (None, Some(detector)) => detector.detect(),
            (None, None) => {
                VersionCheckDetector::new(self.command_runner, &paths.project_root).detect()
            }
        };

        println!("📦 Installing dependencies using {package_manager}...");
        let installer = Installer::new(self.command_runner, self.args.install_timeout());
        installer.install(
            &paths.project_root,
            package_manager,
            self.blueprint.dependencies,
            self.blueprint.dev_dependencies,
        )?;
        println!("✅ Dependencies installed successfully!");

        Ok(package_manager)
    }
}

/// Main entry point for CLI execution
pub fn run(args: Args) -> Result<Outcome> {
    let cwd = std::env::current_dir()?;
    let command_runner = SystemCommandRunner::with_cancel_flag(CancelFlag::on_interrupt());
    Runner::new(args, cwd, &command_runner).run()
}
