//! The boundary with the external tools. Every build, settings query and coverage
//! report goes through a [`ToolInvoker`], so the orchestration can be exercised
//! without a real toolchain

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use color_eyre::{
    eyre::{bail, eyre, Context},
    Result,
};

use super::arguments::Arguments;
use crate::utils::constants::tools;

/// Exit code reported when a process ended without one (killed by a signal)
pub const NO_EXIT_CODE: i32 = -1;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A request to run a shell command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: String,
    pub working_dir: Option<PathBuf>,
    /// Collect stdout and stderr instead of streaming them to the console
    pub capture: bool,
    /// A pipeline fails if any of its stages does
    pub pipefail: bool,
}

impl Invocation {
    /// The output of the command goes straight to the console
    pub fn streamed(command: &Arguments<'_>) -> Self {
        Self {
            command: command.to_string(),
            working_dir: None,
            capture: false,
            pipefail: false,
        }
    }

    /// The output of the command is collected and handed back
    pub fn captured(command: &Arguments<'_>) -> Self {
        Self {
            capture: true,
            ..Self::streamed(command)
        }
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_pipefail(mut self) -> Self {
        self.pipefail = true;
        self
    }

    /// The script handed to the shell
    pub fn script(&self) -> String {
        if self.pipefail {
            format!("set -o pipefail; {}", self.command)
        } else {
            self.command.clone()
        }
    }
}

/// What an external tool left after running
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InvocationOutput {
    pub exit_code: i32,
    /// Only present for captured invocations
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl InvocationOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn stdout(&self) -> &str {
        self.stdout.as_deref().unwrap_or_default()
    }

    pub fn stderr(&self) -> &str {
        self.stderr.as_deref().unwrap_or_default()
    }
}

/// Runs external command lines, blocking until they finish.
///
/// An `Err` means the tool couldn't be run to completion (not found, timed out...).
/// A tool that ran and failed is an `Ok` with a non zero exit code
pub trait ToolInvoker {
    fn invoke(&self, invocation: &Invocation) -> Result<InvocationOutput>;
}

/// Runs the command lines through `bash -c`, like a CI job script would
#[derive(Debug, Default, Clone)]
pub struct SystemShell {
    /// `None` waits forever
    pub timeout: Option<Duration>,
}

impl SystemShell {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    fn command(&self, invocation: &Invocation) -> std::process::Command {
        let mut command = std::process::Command::new(tools::SHELL);
        command.arg("-c").arg(invocation.script());
        if let Some(dir) = &invocation.working_dir {
            command.current_dir(dir);
        }

        // A group of its own, so a timeout also reaches what the shell spawned
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            if self.timeout.is_some() {
                command.process_group(0);
            }
        }

        command
    }

    /// Waits for `child`, killing it once the timeout (if any) expires
    fn wait(&self, child: &mut Child, invocation: &Invocation) -> Result<ExitStatus> {
        let Some(timeout) = self.timeout else {
            return child
                .wait()
                .with_context(|| format!("Command {:?} failed!", invocation.command));
        };

        let started = Instant::now();
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if started.elapsed() >= timeout {
                log::error!("Killing {:?} after {timeout:?}", invocation.command);
                kill_process_group(child)?;
                child.wait()?;
                bail!("Command {:?} timed out after {timeout:?}", invocation.command);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl ToolInvoker for SystemShell {
    fn invoke(&self, invocation: &Invocation) -> Result<InvocationOutput> {
        log::debug!(
            "Executing command => {:?} (in {:?})",
            invocation.script(),
            invocation.working_dir.as_deref().unwrap_or(Path::new("."))
        );

        let mut command = self.command(invocation);
        if invocation.capture {
            command.stdout(Stdio::piped()).stderr(Stdio::piped());
        }

        let mut child = command
            .spawn()
            .with_context(|| format!("Unable to launch {:?}", invocation.command))?;

        // Drained on their own threads, so a chatty tool never blocks on a full pipe
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let status = self.wait(&mut child, invocation)?;
        let exit_code = status.code().unwrap_or(NO_EXIT_CODE);
        log::debug!("Command {:?} exited with: {status}", invocation.command);

        Ok(InvocationOutput {
            exit_code,
            stdout: stdout.map(collect).transpose()?,
            stderr: stderr.map(collect).transpose()?,
        })
    }
}

/// Kills `child` and every process of its group
#[cfg(unix)]
fn kill_process_group(child: &mut Child) -> Result<()> {
    let group = format!("-{}", child.id());
    let killed = std::process::Command::new("kill")
        .args(["-KILL", "--", group.as_str()])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false);

    if !killed {
        log::warn!("Unable to kill the process group {group}, killing only the shell");
        child.kill()?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn kill_process_group(child: &mut Child) -> Result<()> {
    Ok(child.kill()?)
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<std::io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        pipe.read_to_end(&mut buffer).map(|_| buffer)
    })
}

fn collect(handle: JoinHandle<std::io::Result<Vec<u8>>>) -> Result<String> {
    let bytes = handle
        .join()
        .map_err(|_| eyre!("The thread reading the command output panicked"))?
        .with_context(|| "Unable to read the command output")?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command_line(line: &'static str) -> Arguments<'static> {
        line.split(' ').map(Into::into).collect()
    }

    #[test]
    fn test_pipefail_script() {
        let invocation = Invocation::streamed(&command_line("xcodebuild build | xcpretty"));
        assert_eq!(invocation.script(), "xcodebuild build | xcpretty");

        let invocation = invocation.with_pipefail();
        assert_eq!(
            invocation.script(),
            "set -o pipefail; xcodebuild build | xcpretty"
        );
    }

    #[test]
    fn test_captured_invocation_in_dir() {
        let invocation = Invocation::captured(&command_line("xcrun llvm-cov report")).in_dir("/tmp");

        assert!(invocation.capture);
        assert!(!invocation.pipefail);
        assert_eq!(invocation.working_dir, Some(PathBuf::from("/tmp")));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_shell_captures_output_and_exit_code() -> Result<()> {
        let shell = SystemShell::default();
        let output = shell.invoke(&Invocation::captured(&command_line(
            "echo KEY = VALUE; echo oops >&2; exit 3",
        )))?;

        assert_eq!(output.exit_code, 3);
        assert_eq!(output.stdout(), "KEY = VALUE\n");
        assert_eq!(output.stderr(), "oops\n");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_system_shell_pipefail_reports_the_failing_stage() -> Result<()> {
        let shell = SystemShell::default();
        let failing_pipeline = command_line("false | cat");

        let without = shell.invoke(&Invocation::streamed(&failing_pipeline))?;
        let with = shell.invoke(&Invocation::streamed(&failing_pipeline).with_pipefail())?;

        assert!(without.success());
        assert!(!with.success());
        assert!(with.stdout.is_none());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_system_shell_timeout() {
        let shell = SystemShell::new(Some(Duration::from_millis(200)));
        let result = shell.invoke(&Invocation::streamed(&command_line("sleep 5")));
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_what_the_shell_spawned() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let marker = temp.path().join("still-running");
        let script = format!("(sleep 1; touch {}) & wait", marker.display());
        let command = Arguments::from_vec(vec![script.into()]);

        let shell = SystemShell::new(Some(Duration::from_millis(200)));
        assert!(shell.invoke(&Invocation::streamed(&command)).is_err());

        thread::sleep(Duration::from_secs(2));
        assert!(!marker.exists());
        Ok(())
    }
}
