#![allow(dead_code)]

use kiln::cli::{Args, Outcome, Runner};
use kiln::error::{Error, Result};
use kiln::install::{CommandOutput, CommandRunner, CommandSpec};
use std::cell::RefCell;
use std::path::Path;
use walkdir::WalkDir;

const REGISTRY_404: &str = "npm ERR! 404 Not Found - GET https://registry.npmjs.org/expresss\n";

type Responder = Box<dyn Fn(&CommandSpec) -> Result<CommandOutput>>;

/// A `CommandRunner` that records every command and answers from a script.
pub struct FakeCommandRunner {
    calls: RefCell<Vec<CommandSpec>>,
    respond: Responder,
}

impl FakeCommandRunner {
    pub fn new(respond: impl Fn(&CommandSpec) -> Result<CommandOutput> + 'static) -> Self {
        Self { calls: RefCell::new(Vec::new()), respond: Box::new(respond) }
    }

    /// Every command exits with code 0, so pnpm is detected.
    pub fn succeeding() -> Self {
        Self::new(|_| Ok(exit(0, "", "")))
    }

    /// `pnpm` cannot be spawned; everything else succeeds.
    pub fn without_pnpm() -> Self {
        Self::new(|spec| {
            if spec.program == "pnpm" {
                Err(Error::ProcessExecutionError {
                    command: spec.command_line(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
                })
            } else {
                Ok(exit(0, "", ""))
            }
        })
    }

    /// Every `install` invocation exits with `code` and a registry error on stderr.
    pub fn failing_install(code: i32) -> Self {
        Self::new(move |spec| {
            if spec.args.first().map(String::as_str) == Some("install") {
                Ok(exit(code, "", REGISTRY_404))
            } else {
                Ok(exit(0, "", ""))
            }
        })
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(CommandSpec::command_line).collect()
    }
}

impl CommandRunner for FakeCommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(spec.clone());
        (self.respond)(spec)
    }
}

pub fn exit(code: i32, stdout: &str, stderr: &str) -> CommandOutput {
    CommandOutput { code: Some(code), stdout: stdout.to_string(), stderr: stderr.to_string() }
}

/// Runs kiln for `target` as if it had been started from `cwd`.
pub fn run_in(cwd: &Path, target: &str, runner: &FakeCommandRunner) -> Result<Outcome> {
    run_with(cwd, Args::for_target(target), runner)
}

pub fn run_with(cwd: &Path, args: Args, runner: &FakeCommandRunner) -> Result<Outcome> {
    Runner::new(args, cwd.to_path_buf(), runner).run()
}

/// Lists every entry below `root` as a sorted relative path; directories end with `/`.
pub fn list_tree(root: &Path) -> Vec<String> {
    let mut entries: Vec<String> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| {
            let rel = entry.path().strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/");
            if entry.file_type().is_dir() {
                format!("{rel}/")
            } else {
                rel
            }
        })
        .collect();
    entries.sort();
    entries
}
