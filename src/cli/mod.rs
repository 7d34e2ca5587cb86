pub mod args;
pub mod report;
pub mod runner;

pub use args::{get_args, get_log_level_from_verbose, Args};
pub use runner::{run, Outcome, Runner};
