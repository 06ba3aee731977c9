//! Execution of generated scripts.
//!
//! The matplotlib probe is bounded by a timeout: an interpreter that hangs
//! past it is killed and the probe fails.

use std::io::Read;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::error::{Error, Result};

/// Result of a command run with a timeout.
#[derive(Debug)]
enum ProbeResult {
    Success,
    Failed { status: ExitStatus, stderr: Vec<u8> },
    SpawnError(String),
    Timeout,
}

/// Runs a command, waiting at most `timeout` for it to finish.
///
/// Stderr is drained on a worker thread; a command still running at the
/// deadline is killed and reaped.
fn run_with_timeout(program: &str, args: &[&str], timeout: Duration) -> ProbeResult {
    let mut child = match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => return ProbeResult::SpawnError(e.to_string()),
    };

    let (tx, rx) = mpsc::channel();
    if let Some(mut pipe) = child.stderr.take() {
        thread::spawn(move || {
            let mut stderr = Vec::new();
            let _ = pipe.read_to_end(&mut stderr);
            let _ = tx.send(stderr);
        });
    } else {
        let _ = tx.send(Vec::new());
    }

    match rx.recv_timeout(timeout) {
        Ok(stderr) => match child.wait() {
            Ok(status) if status.success() => ProbeResult::Success,
            Ok(status) => ProbeResult::Failed { status, stderr },
            Err(e) => ProbeResult::SpawnError(e.to_string()),
        },
        Err(mpsc::RecvTimeoutError::Timeout) => {
            let _ = child.kill();
            let _ = child.wait();
            ProbeResult::Timeout
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            let _ = child.kill();
            let _ = child.wait();
            ProbeResult::SpawnError("stderr reader exited".to_string())
        }
    }
}

/// Runs generated scripts with a Python interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRunner {
    interpreter: String,
    probe_timeout: Duration,
}

impl Default for ScriptRunner {
    fn default() -> Self {
        Self::new("python")
    }
}

impl ScriptRunner {
    /// Creates a runner for `interpreter` with a five second probe timeout.
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
            probe_timeout: Duration::from_secs(5),
        }
    }

    /// Sets how long [`probe`](Self::probe) waits for the interpreter.
    #[must_use]
    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Interpreter command.
    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    /// Checks that the interpreter starts and can import matplotlib.
    pub fn probe(&self) -> Result<()> {
        let missing = |reason: String| Error::ExternalToolMissing {
            tool: format!("matplotlib ({})", self.interpreter),
            reason,
        };
        match run_with_timeout(
            &self.interpreter,
            &["-c", "import matplotlib"],
            self.probe_timeout,
        ) {
            ProbeResult::Success => {
                log::debug!("{} can import matplotlib", self.interpreter);
                Ok(())
            }
            ProbeResult::Failed { status, stderr } => {
                let stderr = String::from_utf8_lossy(&stderr);
                let reason = stderr
                    .lines()
                    .rev()
                    .find(|l| !l.trim().is_empty())
                    .map_or_else(|| status.to_string(), str::to_owned);
                Err(missing(reason))
            }
            ProbeResult::SpawnError(reason) => Err(missing(reason)),
            ProbeResult::Timeout => Err(missing(format!(
                "no answer within {}ms",
                self.probe_timeout.as_millis()
            ))),
        }
    }

    /// Runs `script` from its own directory.
    ///
    /// A blocking run waits for the interpreter and fails on a non-zero exit
    /// status; otherwise the process is left running.
    pub fn run(&self, script: &Path, blocking: bool) -> Result<()> {
        let mut command = Command::new(&self.interpreter);
        match (script.parent(), script.file_name()) {
            (Some(dir), Some(name)) if !dir.as_os_str().is_empty() => {
                command.arg(name).current_dir(dir);
            }
            _ => {
                command.arg(script);
            }
        }
        log::info!("running {} {}", self.interpreter, script.display());

        if blocking {
            let status = command.status().map_err(|e| Error::io(script, e))?;
            if !status.success() {
                return Err(Error::ScriptFailed {
                    script: script.to_path_buf(),
                    status: status.to_string(),
                });
            }
        } else {
            let child = command.spawn().map_err(|e| Error::io(script, e))?;
            log::debug!("started process {}", child.id());
        }
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::time::Instant;

    fn executable(dir: &Path, name: &str, body: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.display().to_string()
    }

    #[test]
    fn test_probe_success() {
        assert!(ScriptRunner::new("true").probe().is_ok());
    }

    #[test]
    fn test_probe_missing_interpreter() {
        let err = ScriptRunner::new("this_interpreter_does_not_exist_12345")
            .probe()
            .unwrap_err();
        assert!(matches!(err, Error::ExternalToolMissing { .. }));
    }

    #[test]
    fn test_probe_reports_last_stderr_line() {
        let dir = tempfile::tempdir().unwrap();
        let fake = executable(
            dir.path(),
            "fakepy",
            "echo 'Traceback' >&2\necho \"ModuleNotFoundError: No module named 'matplotlib'\" >&2\nexit 1",
        );
        match ScriptRunner::new(fake).probe().unwrap_err() {
            Error::ExternalToolMissing { reason, .. } => {
                assert!(reason.contains("No module named"), "{reason}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_probe_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let slow = executable(dir.path(), "slowpy", "sleep 10");
        let start = Instant::now();
        let err = ScriptRunner::new(slow)
            .probe_timeout(Duration::from_millis(100))
            .probe()
            .unwrap_err();
        assert!(matches!(err, Error::ExternalToolMissing { .. }));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_probe_timeout_kills_interpreter() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("pid");
        let slow = executable(
            dir.path(),
            "slowpy",
            &format!("echo $$ > '{}'\nexec sleep 30", pid_file.display()),
        );
        let err = ScriptRunner::new(slow)
            .probe_timeout(Duration::from_millis(500))
            .probe()
            .unwrap_err();
        assert!(matches!(err, Error::ExternalToolMissing { .. }));

        let pid = std::fs::read_to_string(&pid_file).unwrap();
        let alive = Command::new("kill")
            .args(["-0", pid.trim()])
            .stderr(Stdio::null())
            .status()
            .unwrap();
        assert!(!alive.success(), "interpreter {} still running", pid.trim());
    }

    #[test]
    fn test_blocking_run_uses_script_directory() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("figure.py");
        std::fs::write(&script, "touch ran\n").unwrap();
        ScriptRunner::new("sh").run(&script, true).unwrap();
        assert!(dir.path().join("ran").exists());
    }

    #[test]
    fn test_blocking_run_failure() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("broken.py");
        std::fs::write(&script, "exit 3\n").unwrap();
        let err = ScriptRunner::new("sh").run(&script, true).unwrap_err();
        assert!(matches!(err, Error::ScriptFailed { .. }));
        assert!(err.to_string().contains("broken.py"));
    }
}
