//! Subprocess execution with a bounded wait

use super::BuildError;
use super::toolchain::CommandSpec;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Captured result of a process that ran to completion
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub exit_code: Option<i32>,
    pub success: bool,
    /// stdout followed by stderr
    pub output: String,
    pub elapsed: Duration,
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `spec` to completion. A non-zero exit is an `Ok` output; only
    /// failing to start, or outliving the timeout, is an error.
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, BuildError>;
}

/// Runs commands with `tokio::process`; a timed out child is killed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCommandRunner;

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, BuildError> {
        debug!("Running `{}` in {}", spec, spec.working_dir.display());
        let started = Instant::now();

        let child = Command::new(&spec.program)
            .args(&spec.args)
            .current_dir(&spec.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| BuildError::LaunchFailed { command: spec.to_string(), source })?;

        let output = match timeout(spec.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|source| BuildError::LaunchFailed { command: spec.to_string(), source })?,
            Err(_) => {
                return Err(BuildError::TimedOut { command: spec.to_string(), secs: spec.timeout.as_secs() });
            }
        };

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            if !combined.is_empty() && !combined.ends_with('\n') {
                combined.push('\n');
            }
            combined.push_str(&stderr);
        }

        Ok(CommandOutput {
            exit_code: output.status.code(),
            success: output.status.success(),
            output: combined,
            elapsed: started.elapsed(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn shell(script: &str) -> CommandSpec {
        CommandSpec::new("sh", ["-c", script])
    }

    #[tokio::test]
    async fn test_captures_combined_output() {
        let output = TokioCommandRunner.run(&shell("echo out; echo err >&2")).await.unwrap();
        assert!(output.success);
        assert_eq!(output.exit_code, Some(0));
        assert_eq!(output.output, "out\nerr\n");
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_not_an_error() {
        let output = TokioCommandRunner.run(&shell("exit 3")).await.unwrap();
        assert!(!output.success);
        assert_eq!(output.exit_code, Some(3));
    }

    #[tokio::test]
    async fn test_missing_executable_fails_to_launch() {
        let spec = CommandSpec::new("porter-definitely-missing-tool", Vec::<String>::new());
        let result = TokioCommandRunner.run(&spec).await;
        assert!(matches!(result, Err(BuildError::LaunchFailed { .. })));
    }

    #[tokio::test]
    async fn test_timeout() {
        let spec = shell("sleep 5").with_timeout(Duration::from_millis(100));
        let result = TokioCommandRunner.run(&spec).await;
        assert!(matches!(result, Err(BuildError::TimedOut { .. })));
    }
}
