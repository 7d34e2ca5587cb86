//! Constants used throughout the kiln application

/// Target used when no positional argument is given (the current directory)
pub const DEFAULT_TARGET: &str = ".";

/// Name of the directory holding generated application code
pub const SOURCE_DIR: &str = "src";

/// Package manifest file name
pub const MANIFEST_FILE: &str = "package.json";

/// Package name used when the project directory has no usable base name
pub const DEFAULT_PACKAGE_NAME: &str = "backend";

/// Seconds the dependency installation may run before it is killed
pub const DEFAULT_INSTALL_TIMEOUT_SECS: u64 = 600;

/// Command printed as the last step of the success instructions
pub const START_COMMAND: &str = "node src/server.js";

/// Manifest defaults applied to fresh manifests and missing fields
pub mod manifest {
    pub const VERSION: &str = "1.0.0";
    pub const ENTRY_POINT: &str = "server.js";
    pub const MODULE_TYPE: &str = "module";
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
