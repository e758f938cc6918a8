use serde::Deserialize;
use std::collections::HashMap;

/// Common utilities for Claude Code test performance hooks

/// Modules for running the project's test command with a timeout
pub mod runner;


/// Environment-driven configuration
pub mod config;

// Re-export commonly used types for convenience
pub use analysis::slow_tests::{collect_slow_tests, SlowTestRecord, SLOW_TEST_THRESHOLD_SECS};
pub use config::{load_config, Config};
pub use runner::{run_scoped_tests, RunOutcome, RunnerError};

/// Claude Code Hook input data structure - actual fields from Claude Code
#[derive(Debug, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub tool_name: String,
    #[serde(default)]
    pub tool_input: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub cwd: Option<String>, // Current working directory
    #[serde(default)]
    pub hook_event_name: Option<String>,
}

/// Get file path from tool input
pub fn extract_file_path(tool_input: &HashMap<String, serde_json::Value>) -> String {
    tool_input
        .get("file_path")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

/// Test file suffix validation
///
/// Only files the test runner recognizes as test modules are monitored;
/// everything else is a silent no-op for the hook.
pub fn is_monitored_test_file(file_path: &str) -> bool {
    let test_suffixes = [".test.ts", ".test.tsx", ".spec.ts", ".spec.tsx"];

    test_suffixes.iter().any(|suffix| file_path.ends_with(suffix))
}
