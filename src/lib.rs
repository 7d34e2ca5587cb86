/// Handles argument parsing and orchestrates a run.
pub mod cli;

/// Constants shared across modules.
pub mod constants;

/// Defines custom error types.
pub mod error;

/// Manifest merge and create-if-absent environment files.
pub mod environment;

/// Extension traits for standard library types.
pub mod ext;

/// Package manager detection and dependency installation.
pub mod install;

/// Reading, merging and writing `package.json`.
pub mod manifest;

/// Resolves the project and source roots from the CLI target.
pub mod paths;

/// The generated file set and how it is written.
pub mod template;

/// Creates the source directory skeleton.
pub mod tree;
