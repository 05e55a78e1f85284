//! Shell command execution
//!
//! [`ShellExecutor`] is the boundary between the task runner and the operating
//! system. [`SystemShell`] runs commands through `sh -c` (`cmd /C` on Windows)
//! with the directive environment layered over the inherited one.

use std::io;
use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command as ProcessCommand};
use tokio::sync::mpsc;
use tracing::trace;

use crate::configs::environment::EnvironmentTable;

/// Exit code the shell uses when it cannot locate an executable
#[cfg(not(windows))]
pub const NOT_FOUND_EXIT_CODE: i32 = 127;
#[cfg(windows)]
pub const NOT_FOUND_EXIT_CODE: i32 = 9009;

const READ_BUFFER_SIZE: usize = 8 * 1024;

/// Final result of a captured command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    /// Merged stdout and stderr, final newline included
    pub output: String,
}

/// A running command whose merged output can be read line by line
#[allow(async_fn_in_trait)]
pub trait ShellProcess {
    /// Next complete output line without its line terminator, `None` once the
    /// output is exhausted
    async fn next_line(&mut self) -> Option<String>;

    /// Wait for the process to exit, draining any output not yet read
    async fn finish(self) -> io::Result<ShellOutput>;
}

/// Spawns shell commands for the task runner
#[allow(async_fn_in_trait)]
pub trait ShellExecutor {
    type Process: ShellProcess;

    /// Start `command` with its output captured
    fn spawn(&self, command: &str, env: &EnvironmentTable) -> io::Result<Self::Process>;

    /// Run `command` attached to the terminal's stdio and return its exit code
    async fn run_inherited(&self, command: &str, env: &EnvironmentTable)
        -> io::Result<Option<i32>>;
}

/// Executor backed by the system shell
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShell;

impl SystemShell {
    fn shell_command(command: &str, env: &EnvironmentTable) -> ProcessCommand {
        let (shell, flag) = if cfg!(windows) {
            ("cmd", "/C")
        } else {
            ("sh", "-c")
        };

        let mut cmd = ProcessCommand::new(shell);
        cmd.arg(flag).arg(command).envs(env.iter());
        cmd
    }
}

impl ShellExecutor for SystemShell {
    type Process = SystemProcess;

    fn spawn(&self, command: &str, env: &EnvironmentTable) -> io::Result<SystemProcess> {
        trace!(target: "listr::shell", %command, "spawn");

        let mut child = Self::shell_command(command, env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let (tx, rx) = mpsc::unbounded_channel();
        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(forward_chunks(stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward_chunks(stderr, tx));
        }

        Ok(SystemProcess {
            child,
            chunks: rx,
            captured: Vec::new(),
            pending: Vec::new(),
        })
    }

    async fn run_inherited(
        &self,
        command: &str,
        env: &EnvironmentTable,
    ) -> io::Result<Option<i32>> {
        trace!(target: "listr::shell", %command, "spawn inherited");

        let status = Self::shell_command(command, env).status().await?;
        Ok(status.code())
    }
}

/// A command spawned by [`SystemShell`]
pub struct SystemProcess {
    child: Child,
    chunks: mpsc::UnboundedReceiver<Vec<u8>>,
    /// Everything read so far, in arrival order
    captured: Vec<u8>,
    /// Bytes read but not yet returned as a line
    pending: Vec<u8>,
}

impl ShellProcess for SystemProcess {
    async fn next_line(&mut self) -> Option<String> {
        loop {
            if let Some(end) = self.pending.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = self.pending.drain(..=end).collect();
                return Some(decode_line(&line));
            }

            match self.chunks.recv().await {
                Some(chunk) => {
                    self.captured.extend_from_slice(&chunk);
                    self.pending.extend_from_slice(&chunk);
                }
                None if self.pending.is_empty() => return None,
                None => {
                    let line = std::mem::take(&mut self.pending);
                    return Some(decode_line(&line));
                }
            }
        }
    }

    async fn finish(mut self) -> io::Result<ShellOutput> {
        while let Some(chunk) = self.chunks.recv().await {
            self.captured.extend_from_slice(&chunk);
        }

        let status = self.child.wait().await?;
        trace!(target: "listr::shell", code = ?status.code(), "exited");

        Ok(ShellOutput {
            exit_code: status.code(),
            output: String::from_utf8_lossy(&self.captured).into_owned(),
        })
    }
}

async fn forward_chunks<R>(mut reader: R, tx: mpsc::UnboundedSender<Vec<u8>>)
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; READ_BUFFER_SIZE];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                if tx.send(buf[..n].to_vec()).is_err() {
                    break;
                }
            }
        }
    }
}

fn decode_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(['\n', '\r'])
        .to_string()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    async fn collect_lines(process: &mut SystemProcess) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = process.next_line().await {
            lines.push(line);
        }
        lines
    }

    #[tokio::test]
    async fn test_runs_echo_command() {
        let mut process = SystemShell
            .spawn("echo hello", &EnvironmentTable::new())
            .unwrap();

        assert_eq!(collect_lines(&mut process).await, vec!["hello"]);

        let output = process.finish().await.unwrap();
        assert_eq!(output.exit_code, Some(0));
        assert_eq!(output.output, "hello\n");
    }

    #[tokio::test]
    async fn test_merges_stdout_and_stderr() {
        let mut process = SystemShell
            .spawn("echo out; echo err 1>&2", &EnvironmentTable::new())
            .unwrap();

        let mut lines = collect_lines(&mut process).await;
        lines.sort();
        assert_eq!(lines, vec!["err", "out"]);

        let output = process.finish().await.unwrap();
        assert!(output.output.contains("out\n"));
        assert!(output.output.contains("err\n"));
    }

    #[tokio::test]
    async fn test_captures_exit_code() {
        let process = SystemShell.spawn("exit 42", &EnvironmentTable::new()).unwrap();
        let output = process.finish().await.unwrap();

        assert_eq!(output.exit_code, Some(42));
        assert_eq!(output.output, "");
    }

    #[tokio::test]
    async fn test_finish_without_reading_lines() {
        let process = SystemShell
            .spawn("printf 'a\\nb'", &EnvironmentTable::new())
            .unwrap();
        let output = process.finish().await.unwrap();

        assert_eq!(output.output, "a\nb");
    }

    #[tokio::test]
    async fn test_unterminated_last_line() {
        let mut process = SystemShell
            .spawn("printf 'one\\ntwo'", &EnvironmentTable::new())
            .unwrap();

        assert_eq!(collect_lines(&mut process).await, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_applies_environment_table() {
        let mut env = EnvironmentTable::new();
        env.set("LISTR_TEST_GREETING", "hi there");

        let process = SystemShell
            .spawn("echo \"$LISTR_TEST_GREETING\"", &env)
            .unwrap();
        let output = process.finish().await.unwrap();

        assert_eq!(output.output, "hi there\n");
    }

    #[tokio::test]
    async fn test_missing_command_exit_code() {
        let process = SystemShell
            .spawn("listr-command-that-does-not-exist", &EnvironmentTable::new())
            .unwrap();
        let output = process.finish().await.unwrap();

        assert_eq!(output.exit_code, Some(NOT_FOUND_EXIT_CODE));
        assert!(output.output.contains("not found"));
    }

    #[tokio::test]
    async fn test_run_inherited_returns_exit_code() {
        let env = EnvironmentTable::new();

        assert_eq!(SystemShell.run_inherited("true", &env).await.unwrap(), Some(0));
        assert_eq!(SystemShell.run_inherited("exit 3", &env).await.unwrap(), Some(3));
    }
}
