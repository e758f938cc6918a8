use anyhow::{Context, Result};
use std::io::{self, Read};
use std::time::Duration;

use test_perf_hooks::analysis::slow_tests::{collect_slow_tests, SlowTestRecord};
use test_perf_hooks::config::load_config;
use test_perf_hooks::runner::{run_scoped_tests, RunOutcome};
use test_perf_hooks::{extract_file_path, is_monitored_test_file, HookInput};

/// Exit code reserved for a timed-out test run
const EXIT_TIMED_OUT: i32 = 2;

/// Main function for the test performance monitoring hook
///
/// This is an advisory PostToolUse hook: it reports slow tests but never
/// blocks the workflow on its own failure. Internal errors degrade to a
/// status-0 no-op; only a test-run timeout uses a distinct exit code.
fn main() {
    // Diagnostics go to stderr and stay off unless RUST_LOG is set, so the
    // hook's stdout report stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error monitoring tests: {}", e);
            0
        }
    };

    std::process::exit(exit_code);
}

fn run() -> Result<i32> {
    // Read hook input from stdin
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;

    // Parse the input
    let hook_input: HookInput =
        serde_json::from_str(&buffer).context("Failed to parse input JSON")?;

    let file_path = extract_file_path(&hook_input.tool_input);

    // Only monitor recognized test files; everything else passes through
    if file_path.is_empty() || !is_monitored_test_file(&file_path) {
        return Ok(0);
    }

    println!("⏱️  Monitoring test performance for {}...", file_path);

    let config = load_config();

    match run_scoped_tests(&config, &file_path)? {
        RunOutcome::Completed {
            elapsed,
            stdout,
            exit_code,
        } => {
            let slow_tests = collect_slow_tests(&stdout);
            print_report(elapsed, &slow_tests);

            // Slow tests warn, they never fail the run; forward the
            // runner's own exit code.
            Ok(exit_code)
        }
        RunOutcome::TimedOut => {
            eprintln!("❌ Tests timed out");
            Ok(EXIT_TIMED_OUT)
        }
    }
}

/// Print the timing report for a completed run
fn print_report(elapsed: Duration, slow_tests: &[SlowTestRecord]) {
    println!("\nTotal test time: {:.2}s", elapsed.as_secs_f64());

    if slow_tests.is_empty() {
        println!("✓ All tests running within acceptable time");
    } else {
        println!("\n⚠️  Found {} slow test(s):", slow_tests.len());
        for test in slow_tests {
            println!("  - {}: {:.2}s", test.name, test.duration_secs);
        }
        println!("\nConsider optimizing these tests or mocking expensive operations.");
    }
}
