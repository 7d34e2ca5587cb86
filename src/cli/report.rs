use crate::constants::START_COMMAND;
use crate::paths::ProjectPaths;

/// Renders the commands a user runs to start the generated server.
///
/// The `cd` step is left out when the project was generated in place.
pub fn next_steps(paths: &ProjectPaths) -> String {
    let mut steps = String::new();
    if !paths.is_current_dir {
        steps.push_str(&format!("  cd {}\n", paths.target));
    }
    steps.push_str(&format!("  {START_COMMAND}\n"));
    steps
}
