/// Hard wall-clock limit for a scoped test run, in seconds
pub const DEFAULT_TEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    /// Program and leading arguments of the test runner; the monitored file
    /// path and `--verbose` are appended at invocation time.
    pub runner_command: Vec<String>,
    /// Wall-clock timeout for one scoped run
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runner_command: vec!["npm".to_string(), "test".to_string(), "--".to_string()],
            timeout_secs: DEFAULT_TEST_TIMEOUT_SECS,
        }
    }
}

pub fn load_config() -> Config {
    let mut cfg = Config::default();

    // Runner override, whitespace-split. Empty values keep the default.
    if let Ok(val) = std::env::var("TESTPERF_RUNNER") {
        let parts = val
            .split_whitespace()
            .map(|s| s.to_string())
            .collect::<Vec<_>>();
        if !parts.is_empty() {
            cfg.runner_command = parts;
        }
    }

    // Timeout override with sane bounds
    if let Ok(val) = std::env::var("TESTPERF_TIMEOUT_SECS") {
        cfg.timeout_secs = val
            .parse::<u64>()
            .unwrap_or(DEFAULT_TEST_TIMEOUT_SECS)
            .clamp(1, 600);
    }

    cfg
}

impl Config {
    /// Build the full argument vector for one scoped run of `file_path`
    pub fn scoped_run_args(&self, file_path: &str) -> (String, Vec<String>) {
        let program = self.runner_command[0].clone();
        let mut args: Vec<String> = self.runner_command[1..].to_vec();
        args.push(file_path.to_string());
        args.push("--verbose".to_string());
        (program, args)
    }
}
