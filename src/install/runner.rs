//! Child process execution, either attached to a pseudo-terminal or captured.

use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::sync::mpsc as std_mpsc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::error::PopstarError;
use crate::util::shell_quote;

/// How long the calling thread waits for stdin before re-checking the child.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long to wait for trailing pty output after the child exits.
const DRAIN_GRACE: Duration = Duration::from_millis(500);

/// How a child process is connected to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Attachment {
    /// The child owns a pseudo-terminal mirrored to the real one.
    PseudoTerminal,
    /// Stdin is null; stdout is collected and returned.
    #[default]
    Captured,
}

/// A program invocation. Arguments are passed verbatim; no shell is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Executable name or path.
    pub program: String,
    /// Arguments, not including the program.
    pub args: Vec<String>,
    /// Terminal attachment strategy.
    pub attachment: Attachment,
}

impl CommandSpec {
    /// What: Build a captured invocation of `program` with `args`.
    ///
    /// Inputs:
    /// - `program`: Executable name
    /// - `args`: Arguments
    ///
    /// Output: `CommandSpec` with `Attachment::Captured`
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            attachment: Attachment::Captured,
        }
    }

    /// Switch this invocation to a pseudo-terminal.
    #[must_use]
    pub fn attached(mut self) -> Self {
        self.attachment = Attachment::PseudoTerminal;
        self
    }

    /// Render the command line for logs and messages.
    #[must_use]
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
    /// Captured stdout; empty for pty-attached runs.
    pub stdout: Vec<u8>,
}

/// Executes child processes. Implemented by [`SystemRunner`] and by test fakes.
pub trait ProcessRunner: Send + Sync {
    /// What: Run `cmd` to completion.
    ///
    /// Inputs:
    /// - `cmd`: Program, arguments and attachment
    ///
    /// Output:
    /// - `Ok(RunOutput)` on a zero exit status; `ProcessSpawn` if the child
    ///   could not be started; `ProcessExit` on a non-zero status.
    fn run(&self, cmd: &CommandSpec) -> Result<RunOutput, PopstarError>;
}

/// Runner that spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, cmd: &CommandSpec) -> Result<RunOutput, PopstarError> {
        match cmd.attachment {
            Attachment::Captured => run_captured(cmd),
            Attachment::PseudoTerminal => run_attached(cmd),
        }
    }
}

/// What: Run `cmd` with null stdin and collected stdout.
///
/// Inputs:
/// - `cmd`: Invocation
///
/// Output: Captured stdout, or the spawn/exit error.
fn run_captured(cmd: &CommandSpec) -> Result<RunOutput, PopstarError> {
    let command = cmd.display();
    tracing::debug!("[Runner] captured: {command}");
    let out = Command::new(&cmd.program)
        .args(&cmd.args)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| PopstarError::ProcessSpawn {
            command: command.clone(),
            source,
        })?;
    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr);
        tracing::warn!(
            code = ?out.status.code(),
            stderr = %stderr.trim(),
            "[Runner] `{command}` failed"
        );
        return Err(PopstarError::ProcessExit {
            command,
            code: out.status.code(),
        });
    }
    Ok(RunOutput { stdout: out.stdout })
}

/// Wrap a pty-layer failure as a spawn error for `command`.
fn pty_error(command: &str, err: impl std::fmt::Display) -> PopstarError {
    PopstarError::ProcessSpawn {
        command: command.to_string(),
        source: std::io::Error::other(err.to_string()),
    }
}

/// What: Run `cmd` on a fresh pseudo-terminal mirrored to the real terminal.
///
/// Inputs:
/// - `cmd`: Invocation
///
/// Output: Empty `RunOutput` on success, or the spawn/exit error.
///
/// Details:
/// - The pty is sized like the real terminal and the child starts in the
///   current working directory.
/// - One helper thread copies pty output to stdout; this thread forwards
///   stdin into the pty until the child exits.
/// - Raw mode is enabled for the duration and restored to its prior state.
fn run_attached(cmd: &CommandSpec) -> Result<RunOutput, PopstarError> {
    use portable_pty::{ChildKiller as _, CommandBuilder, PtySize, native_pty_system};

    let command = cmd.display();
    tracing::info!("[Runner] attached: {command}");

    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    let pair = native_pty_system()
        .openpty(PtySize {
            rows,
            cols,
            pixel_width: 0,
            pixel_height: 0,
        })
        .map_err(|e| pty_error(&command, e))?;

    let mut builder = CommandBuilder::new(&cmd.program);
    builder.args(&cmd.args);
    let cwd = std::env::current_dir().map_err(|e| PopstarError::filesystem(".", e))?;
    builder.cwd(cwd);

    let raw = RawModeGuard::enable();
    let mut child = pair
        .slave
        .spawn_command(builder)
        .map_err(|e| pty_error(&command, e))?;
    drop(pair.slave);

    let streams = pair
        .master
        .try_clone_reader()
        .and_then(|reader| Ok((reader, pair.master.take_writer()?)));
    let (reader, mut writer) = match streams {
        Ok(streams) => streams,
        Err(e) => {
            let _ = child.kill();
            let _ = child.wait();
            return Err(pty_error(&command, e));
        }
    };

    let drain = OutputDrain::spawn(reader);
    let mut input = InputForwarder::default();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break Ok(status),
            Ok(None) => input.forward(&mut *writer, POLL_INTERVAL),
            Err(e) => {
                tracing::error!("[Runner] error waiting for `{command}`: {e}");
                let _ = child.kill();
                break Err(e);
            }
        }
    };
    drop(writer);
    drain.finish(DRAIN_GRACE);
    drop(pair.master);
    drop(raw);

    match status {
        Ok(status) if status.success() => Ok(RunOutput::default()),
        Ok(status) => {
            tracing::warn!("[Runner] `{command}` exited with {}", status.exit_code());
            Err(PopstarError::ProcessExit {
                command,
                code: i32::try_from(status.exit_code()).ok(),
            })
        }
        Err(_) => Err(PopstarError::ProcessExit {
            command,
            code: None,
        }),
    }
}

/// Helper thread copying pty output to stdout.
struct OutputDrain {
    /// Signalled with the byte count when the pty reaches end-of-stream.
    done_rx: std_mpsc::Receiver<u64>,
    /// The copying thread.
    handle: JoinHandle<()>,
}

impl OutputDrain {
    /// Start copying `reader` to stdout on a new thread.
    fn spawn(mut reader: Box<dyn Read + Send>) -> Self {
        let (done_tx, done_rx) = std_mpsc::channel();
        let handle = std::thread::spawn(move || {
            let mut stdout = std::io::stdout();
            let mut buf = [0u8; 4096];
            let mut total = 0u64;
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        total += n as u64;
                        if stdout
                            .write_all(&buf[..n])
                            .and_then(|()| stdout.flush())
                            .is_err()
                        {
                            break;
                        }
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                    // Linux reports EIO once the last slave descriptor closes.
                    Err(e) => {
                        tracing::debug!("[Runner] pty read ended: {e}");
                        break;
                    }
                }
            }
            let _ = done_tx.send(total);
        });
        Self { done_rx, handle }
    }

    /// What: Wait up to `grace` for the drain to reach end-of-stream.
    ///
    /// Inputs:
    /// - `grace`: Upper bound on the wait
    ///
    /// Output: None
    ///
    /// Details:
    /// - Background processes started by the child (e.g. `gpg-agent`) may
    ///   inherit the pty and keep it open; the thread is then detached.
    fn finish(self, grace: Duration) {
        match self.done_rx.recv_timeout(grace) {
            Ok(total) => {
                let _ = self.handle.join();
                tracing::debug!("[Runner] pty drained ({total} bytes)");
            }
            Err(_) => tracing::warn!("[Runner] pty still held open after exit; detaching reader"),
        }
    }
}

/// Forwards bytes typed on the real terminal into the pty.
#[derive(Default)]
struct InputForwarder {
    /// Set once stdin reports end-of-file or an error.
    closed: bool,
}

impl InputForwarder {
    /// What: Wait up to `timeout` for stdin input and copy it to `writer`.
    ///
    /// Inputs:
    /// - `writer`: Pty master writer
    /// - `timeout`: Maximum time to block
    ///
    /// Output: None
    #[cfg(unix)]
    fn forward(&mut self, writer: &mut dyn Write, timeout: Duration) {
        use nix::poll::{PollFd, PollFlags, PollTimeout, poll};
        use std::os::fd::AsFd;

        if self.closed {
            std::thread::sleep(timeout);
            return;
        }
        let stdin = std::io::stdin();
        let millis = u16::try_from(timeout.as_millis()).unwrap_or(u16::MAX);
        let ready = {
            let mut fds = [PollFd::new(stdin.as_fd(), PollFlags::POLLIN)];
            matches!(poll(&mut fds, PollTimeout::from(millis)), Ok(n) if n > 0)
        };
        if !ready {
            return;
        }
        // At least the stdin buffer size, so reads bypass it and poll stays accurate.
        let mut buf = [0u8; 8192];
        match stdin.lock().read(&mut buf) {
            Ok(0) | Err(_) => self.closed = true,
            Ok(n) => {
                if writer
                    .write_all(&buf[..n])
                    .and_then(|()| writer.flush())
                    .is_err()
                {
                    self.closed = true;
                }
            }
        }
    }

    /// Input forwarding needs `poll(2)`; elsewhere the child gets no input.
    #[cfg(not(unix))]
    fn forward(&mut self, _writer: &mut dyn Write, timeout: Duration) {
        self.closed = true;
        std::thread::sleep(timeout);
    }
}

/// Enables terminal raw mode and restores the previous state on drop.
struct RawModeGuard {
    /// Whether raw mode was already on when the guard was created.
    was_enabled: bool,
}

impl RawModeGuard {
    /// Enable raw mode if it is not already on. Failures (no tty) are ignored.
    fn enable() -> Self {
        let was_enabled = crossterm::terminal::is_raw_mode_enabled().unwrap_or(false);
        if !was_enabled {
            let _ = crossterm::terminal::enable_raw_mode();
        }
        Self { was_enabled }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if !self.was_enabled {
            let _ = crossterm::terminal::disable_raw_mode();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Attachment, CommandSpec, ProcessRunner, SystemRunner};
    use crate::error::PopstarError;

    #[test]
    /// What: Command lines render with shell quoting.
    ///
    /// - Input: Program with a spaced argument
    /// - Output: Quoted rendering; default attachment is captured
    fn display_quotes_arguments() {
        let cmd = CommandSpec::new("git", ["clone", "https://x/y.git", "/tmp/a b"]);
        assert_eq!(cmd.display(), "git clone https://x/y.git '/tmp/a b'");
        assert_eq!(cmd.attachment, Attachment::Captured);
        assert_eq!(cmd.attached().attachment, Attachment::PseudoTerminal);
    }

    #[cfg(unix)]
    #[test]
    /// What: Captured runs return stdout and map failures.
    ///
    /// - Input: `echo hi`, `false`, a nonexistent program
    /// - Output: `hi\n`; `ProcessExit` with code 1; `ProcessSpawn`
    fn captured_runs_map_status() {
        let runner = SystemRunner;
        let out = runner
            .run(&CommandSpec::new("echo", ["hi"]))
            .expect("echo runs");
        assert_eq!(out.stdout, b"hi\n");
        assert!(matches!(
            runner.run(&CommandSpec::new("false", Vec::<String>::new())),
            Err(PopstarError::ProcessExit { code: Some(1), .. })
        ));
        assert!(matches!(
            runner.run(&CommandSpec::new(
                "popstar-definitely-missing-binary",
                Vec::<String>::new()
            )),
            Err(PopstarError::ProcessSpawn { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    #[ignore = "needs a host that can allocate pseudo-terminals"]
    /// What: Attached runs report the child's exit status.
    ///
    /// - Input: `true` and `false` on a pty
    /// - Output: `Ok` and `ProcessExit`
    fn attached_runs_map_status() {
        let runner = SystemRunner;
        assert!(
            runner
                .run(&CommandSpec::new("true", Vec::<String>::new()).attached())
                .is_ok()
        );
        assert!(matches!(
            runner.run(&CommandSpec::new("false", Vec::<String>::new()).attached()),
            Err(PopstarError::ProcessExit { .. })
        ));
    }
}
