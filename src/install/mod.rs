//! Dependency installation through an external package manager
//!
//! - `interface`: the `CommandRunner` seam and its request/response types
//! - `system`: the real child-process runner with timeout and cancellation
//! - `detect`: choosing between pnpm and npm
//! - `installer`: the install command sequence

pub mod detect;
pub mod installer;
pub mod interface;
pub mod system;

pub use detect::{FixedDetector, PackageManager, ToolDetector, VersionCheckDetector};
pub use installer::Installer;
pub use interface::{CommandOutput, CommandRunner, CommandSpec};
pub use system::{CancelFlag, SystemCommandRunner};
