use crate::constants::{verbosity, DEFAULT_INSTALL_TIMEOUT_SECS, DEFAULT_TARGET};
use crate::install::PackageManager;
use clap::Parser;
use log::LevelFilter;
use std::time::Duration;

/// CLI arguments for kiln.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory to set the project up in (`.` for the current directory).
    #[arg(value_name = "TARGET", default_value = DEFAULT_TARGET)]
    pub target: String,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Preview actions without touching the filesystem or installing anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Generate files but do not install dependencies.
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Package manager to use instead of probing for pnpm.
    #[arg(long = "package-manager", value_enum)]
    pub package_manager: Option<PackageManager>,

    /// Seconds before the install is aborted (0 waits forever).
    #[arg(
        long = "install-timeout",
        value_name = "SECS",
        default_value_t = DEFAULT_INSTALL_TIMEOUT_SECS
    )]
    pub install_timeout: u64,
}

impl Args {
    /// Arguments for `target` with every option at its default.
    pub fn for_target(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            verbose: verbosity::OFF,
            dry_run: false,
            skip_install: false,
            package_manager: None,
            install_timeout: DEFAULT_INSTALL_TIMEOUT_SECS,
        }
    }

    pub fn install_timeout(&self) -> Option<Duration> {
        match self.install_timeout {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

/// Parse command line arguments, exiting with clap's message on errors.
pub fn get_args() -> Args {
    Args::parse()
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
