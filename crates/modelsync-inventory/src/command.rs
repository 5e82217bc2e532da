//! Ordered command strategies with a uniform success predicate.
//!
//! A lookup that can be served by several invocations (host binary first, then
//! the same command inside a container) is described as a list of
//! [`CommandStrategy`] values and run through [`first_success`].

use std::fmt;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::InventoryError;

/// One way of invoking an external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStrategy {
    program: String,
    args: Vec<String>,
}

impl CommandStrategy {
    /// Create a strategy for the given program with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Builder method to append arguments.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run `inner` through `docker exec <container>`.
    pub fn docker_exec(container: &str, inner: &CommandStrategy) -> Self {
        Self::new("docker")
            .with_args(["exec", container])
            .with_args(std::iter::once(inner.program.clone()).chain(inner.args.iter().cloned()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Run the command and return its stdout.
    ///
    /// Succeeds only on exit status zero with non-blank stdout. The child is
    /// killed if it outlives `timeout`.
    pub async fn run(&self, timeout: Duration) -> Result<String, InventoryError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(command = %self, "Running command");

        let output = match tokio::time::timeout(timeout, cmd.output()).await {
            Ok(result) => result.map_err(|source| InventoryError::Spawn {
                program: self.program.clone(),
                source,
            })?,
            Err(_) => {
                return Err(InventoryError::Timeout {
                    target: self.to_string(),
                    secs: timeout.as_secs(),
                })
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(command = %self, stderr = %stderr.trim(), "Command failed");
            return Err(InventoryError::NonZeroExit {
                program: self.program.clone(),
                code: output.status.code().unwrap_or(-1),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if stdout.trim().is_empty() {
            return Err(InventoryError::EmptyOutput {
                program: self.program.clone(),
            });
        }

        Ok(stdout)
    }
}

impl fmt::Display for CommandStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Try each strategy in order and return the first parsed result.
///
/// A strategy counts as failed when [`CommandStrategy::run`] fails or when
/// `parse` rejects its output. Returns `None` when every strategy failed.
pub async fn first_success<T, F>(
    strategies: &[CommandStrategy],
    timeout: Duration,
    mut parse: F,
) -> Option<T>
where
    F: FnMut(&str) -> Result<T, InventoryError>,
{
    for strategy in strategies {
        match strategy.run(timeout).await.and_then(|stdout| parse(&stdout)) {
            Ok(value) => {
                info!(command = %strategy, "Command strategy succeeded");
                return Some(value);
            }
            Err(e) => {
                debug!(command = %strategy, error = %e, "Command strategy failed, trying next");
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> CommandStrategy {
        CommandStrategy::new("sh").with_args(["-c", script])
    }

    #[test]
    fn test_docker_exec_wraps_inner_command() {
        let inner = CommandStrategy::new("ollama").with_args(["list"]);
        let wrapped = CommandStrategy::docker_exec("ollama", &inner);

        assert_eq!(wrapped.program(), "docker");
        assert_eq!(wrapped.args(), ["exec", "ollama", "ollama", "list"]);
        assert_eq!(wrapped.to_string(), "docker exec ollama ollama list");
    }

    #[tokio::test]
    async fn test_run_success() {
        let out = sh("echo hello").run(Duration::from_secs(5)).await.unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[tokio::test]
    async fn test_run_failures() {
        let timeout = Duration::from_secs(5);

        let err = CommandStrategy::new("modelsync-definitely-missing-binary")
            .run(timeout)
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::Spawn { .. }));

        let err = sh("echo out; exit 3").run(timeout).await.unwrap_err();
        assert!(matches!(err, InventoryError::NonZeroExit { code: 3, .. }));

        let err = sh("printf '  \\n'").run(timeout).await.unwrap_err();
        assert!(matches!(err, InventoryError::EmptyOutput { .. }));
    }

    #[tokio::test]
    async fn test_run_timeout() {
        let err = sh("sleep 5").run(Duration::from_millis(100)).await.unwrap_err();
        assert!(matches!(err, InventoryError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_first_success_falls_through() {
        let strategies = vec![
            CommandStrategy::new("modelsync-definitely-missing-binary"),
            sh("exit 1"),
            sh("echo second"),
            sh("echo third"),
        ];

        let out = first_success(&strategies, Duration::from_secs(5), |s| Ok(s.trim().to_string())).await;
        assert_eq!(out.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_first_success_treats_parse_failure_as_strategy_failure() {
        let strategies = vec![sh("echo 'not json'"), sh("echo '{\"ok\": true}'")];

        let out = first_success(&strategies, Duration::from_secs(5), |s| {
            serde_json::from_str::<serde_json::Value>(s).map_err(InventoryError::from)
        })
        .await;
        assert_eq!(out, Some(serde_json::json!({"ok": true})));
    }

    #[tokio::test]
    async fn test_first_success_none_when_all_fail() {
        let strategies = vec![sh("exit 1"), sh("true")];
        let out = first_success(&strategies, Duration::from_secs(5), |s| Ok(s.to_string())).await;
        assert!(out.is_none());
    }
}
