use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to spawn test runner '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("test runner process error: {0}")]
    Wait(std::io::Error),

    #[error("test runner waiter thread failed unexpectedly")]
    WaiterThreadFailed,
}

/// Result of one scoped test run
///
/// Elapsed time is absent exactly when the run hit the wall-clock timeout;
/// the variant split keeps that invariant in the type.
#[derive(Debug)]
pub enum RunOutcome {
    Completed {
        elapsed: Duration,
        stdout: String,
        exit_code: i32,
    },
    TimedOut,
}

/// Run the configured test runner scoped to `file_path` in verbose mode
///
/// Blocks until the child exits or the configured timeout elapses. Elapsed
/// time is measured here with `Instant`, not taken from the child. On
/// timeout the child is terminated and `RunOutcome::TimedOut` is returned.
pub fn run_scoped_tests(config: &Config, file_path: &str) -> Result<RunOutcome, RunnerError> {
    let (program, args) = config.scoped_run_args(file_path);
    let timeout = Duration::from_secs(config.timeout_secs);

    tracing::debug!(%program, ?args, timeout_secs = config.timeout_secs, "starting scoped test run");

    let start_time = Instant::now();

    let mut child = Command::new(&program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| RunnerError::Spawn {
            program: program.clone(),
            source,
        })?;

    // Wait for completion on a separate thread so the timeout can be
    // enforced with recv_timeout.
    let (tx, rx) = mpsc::channel();
    let child_id = child.id();

    thread::spawn(move || {
        let result = child.wait_with_output();
        let _ = tx.send(result);
    });

    match rx.recv_timeout(timeout) {
        Ok(Ok(output)) => {
            let elapsed = start_time.elapsed();
            let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
            // Killed-by-signal children carry no exit code; treat as failure
            let exit_code = output.status.code().unwrap_or(1);

            tracing::debug!(exit_code, elapsed_ms = elapsed.as_millis() as u64, "scoped test run finished");

            Ok(RunOutcome::Completed {
                elapsed,
                stdout,
                exit_code,
            })
        }
        Ok(Err(e)) => Err(RunnerError::Wait(e)),
        Err(mpsc::RecvTimeoutError::Timeout) => {
            kill_child(child_id);
            tracing::warn!(%program, timeout_secs = config.timeout_secs, "scoped test run timed out");
            Ok(RunOutcome::TimedOut)
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(RunnerError::WaiterThreadFailed),
    }
}

/// Terminate a timed-out child: SIGTERM first, SIGKILL shortly after
fn kill_child(child_id: u32) {
    #[cfg(unix)]
    {
        unsafe {
            libc::kill(child_id as i32, libc::SIGTERM);
            thread::sleep(Duration::from_millis(100));
            libc::kill(child_id as i32, libc::SIGKILL);
        }
    }

    #[cfg(windows)]
    {
        let _ = Command::new("taskkill")
            .args(["/PID", &child_id.to_string(), "/F"])
            .output();
    }
}
