use crate::error::{Error, Result};
use crate::install::interface::{CommandOutput, CommandRunner, CommandSpec};
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Raised by the SIGINT/SIGTERM handler; only an atomic store happens there.
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// A cloneable flag that asks a running command to stop.
///
/// A flag built with [`CancelFlag::on_interrupt`] is also raised when the
/// process receives SIGINT or SIGTERM.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    raised: Arc<AtomicBool>,
    follows_signals: bool,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the interrupt handlers (unix only) and returns a flag that
    /// follows them.
    pub fn on_interrupt() -> Self {
        install_interrupt_handlers();
        Self { raised: Arc::default(), follows_signals: true }
    }

    pub fn cancel(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
            || (self.follows_signals && INTERRUPTED.load(Ordering::SeqCst))
    }
}

#[cfg(unix)]
fn install_interrupt_handlers() {
    static INSTALL: std::sync::Once = std::sync::Once::new();

    extern "C" fn on_signal(_: libc::c_int) {
        INTERRUPTED.store(true, Ordering::SeqCst);
    }

    INSTALL.call_once(|| unsafe {
        libc::signal(libc::SIGINT, on_signal as libc::sighandler_t);
        libc::signal(libc::SIGTERM, on_signal as libc::sighandler_t);
    });
}

// On Windows the console delivers Ctrl+C to the child as well, so the default
// handling already stops both processes.
#[cfg(not(unix))]
fn install_interrupt_handlers() {}

/// Runs commands as real child processes.
///
/// The program is executed in `CommandSpec::cwd` with stdout and stderr
/// captured. On unix it runs directly, in a process group of its own so a
/// timeout or cancellation can stop everything it started. On Windows it
/// runs through `cmd /C`, which is what resolves the `npm.cmd` and
/// `pnpm.cmd` shims.
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner {
    cancel: CancelFlag,
}

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel_flag(cancel: CancelFlag) -> Self {
        Self { cancel }
    }

    /// Polls the child until it exits, the deadline passes or the flag is raised.
    fn wait(&self, child: &mut Child, spec: &CommandSpec) -> Result<Option<i32>> {
        let started = Instant::now();

        loop {
            let status = child.try_wait().map_err(|source| Error::ProcessExecutionError {
                command: spec.command_line(),
                source,
            })?;
            if let Some(status) = status {
                return Ok(status.code());
            }

            if self.cancel.is_cancelled() {
                kill(child);
                return Err(Error::CommandCancelled { command: spec.command_line() });
            }

            if let Some(timeout) = spec.timeout {
                if started.elapsed() >= timeout {
                    kill(child);
                    return Err(Error::CommandTimeout {
                        command: spec.command_line(),
                        timeout_secs: timeout.as_secs(),
                    });
                }
            }

            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        log::debug!("Running '{}' in {}", spec.command_line(), spec.cwd.display());

        if self.cancel.is_cancelled() {
            return Err(Error::CommandCancelled { command: spec.command_line() });
        }

        let mut child = command_for(spec)
            .current_dir(&spec.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| Error::ProcessExecutionError {
                command: spec.command_line(),
                source,
            })?;

        // Drain both pipes while waiting so a chatty process never blocks on a full pipe.
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let code = self.wait(&mut child, spec)?;

        Ok(CommandOutput { code, stdout: collect(stdout)?, stderr: collect(stderr)? })
    }
}

/// Builds the platform command line for `spec`, without I/O settings.
fn command_for(spec: &CommandSpec) -> Command {
    let mut command = if cfg!(windows) {
        let mut command = Command::new("cmd");
        command.arg("/C").arg(&spec.program);
        command
    } else {
        Command::new(&spec.program)
    };
    command.args(&spec.args);

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    command
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Err(e) = reader.read_to_end(&mut buf) {
            log::warn!("Failed to read command output: {e}");
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn collect(handle: Option<JoinHandle<String>>) -> Result<String> {
    match handle {
        Some(handle) => handle
            .join()
            .map_err(|_| Error::Other(anyhow::anyhow!("command output reader panicked"))),
        None => Ok(String::new()),
    }
}

/// Kills the child together with every process it started, then reaps it.
fn kill(child: &mut Child) {
    if let Err(e) = kill_tree(child) {
        log::warn!("Failed to kill process tree {}: {e}", child.id());
        if let Err(e) = child.kill() {
            log::warn!("Failed to kill process {}: {e}", child.id());
        }
    }
    // Reap the child so it does not linger as a zombie.
    let _ = child.wait();
}

#[cfg(unix)]
fn kill_tree(child: &Child) -> std::io::Result<()> {
    // The child leads its own process group, see `command_for`.
    let group = libc::pid_t::try_from(child.id())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    if unsafe { libc::kill(-group, libc::SIGKILL) } == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(windows)]
fn kill_tree(child: &Child) -> std::io::Result<()> {
    let status = Command::new("taskkill")
        .args(["/T", "/F", "/PID", &child.id().to_string()])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other(format!("taskkill exited with {status}")))
    }
}
