#![cfg(unix)]

use test_perf_hooks::config::Config;
use test_perf_hooks::runner::{run_scoped_tests, RunOutcome, RunnerError};

fn shell_config(script: &str, timeout_secs: u64) -> Config {
    // The scoped file path and --verbose land in $0/$1 of the -c script,
    // which these fixtures ignore.
    Config {
        runner_command: vec!["sh".to_string(), "-c".to_string(), script.to_string()],
        timeout_secs,
    }
}

#[test]
fn unit_runner_captures_stdout_and_exit_code() {
    let cfg = shell_config("echo '  ok test (42ms)'; exit 0", 10);
    let outcome = run_scoped_tests(&cfg, "a.test.ts").expect("run");

    match outcome {
        RunOutcome::Completed {
            elapsed,
            stdout,
            exit_code,
        } => {
            assert_eq!(exit_code, 0);
            assert!(stdout.contains("ok test (42ms)"));
            assert!(elapsed.as_secs() < 10);
        }
        RunOutcome::TimedOut => panic!("run should not time out"),
    }
}

#[test]
fn unit_runner_forwards_nonzero_exit_code() {
    let cfg = shell_config("exit 3", 10);
    match run_scoped_tests(&cfg, "a.test.ts").expect("run") {
        RunOutcome::Completed { exit_code, .. } => assert_eq!(exit_code, 3),
        RunOutcome::TimedOut => panic!("run should not time out"),
    }
}

#[test]
fn unit_runner_times_out_and_kills_child() {
    let cfg = shell_config("sleep 30", 1);
    let start = std::time::Instant::now();
    match run_scoped_tests(&cfg, "a.test.ts").expect("run") {
        RunOutcome::TimedOut => {}
        RunOutcome::Completed { .. } => panic!("run must hit the timeout"),
    }
    // Returns at the deadline, not after the child would have finished
    assert!(start.elapsed().as_secs() < 10);
}

#[test]
fn unit_runner_spawn_failure_is_typed() {
    let cfg = Config {
        runner_command: vec!["definitely-not-a-test-runner-9c41".to_string()],
        timeout_secs: 5,
    };
    match run_scoped_tests(&cfg, "a.test.ts") {
        Err(RunnerError::Spawn { program, .. }) => {
            assert_eq!(program, "definitely-not-a-test-runner-9c41");
        }
        other => panic!("expected spawn error, got {:?}", other),
    }
}
