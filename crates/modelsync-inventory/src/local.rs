//! Local runtime model listing.

use std::collections::HashSet;
use std::time::Duration;

use modelsync_core::ModelId;
use tracing::{info, warn};

use crate::command::{first_success, CommandStrategy};

/// Lists models installed in the local runtime.
#[derive(Debug, Clone)]
pub struct LocalRuntime {
    strategies: Vec<CommandStrategy>,
    timeout: Duration,
}

impl Default for LocalRuntime {
    /// `ollama list` on the host, then inside the `ollama` container.
    fn default() -> Self {
        let list = CommandStrategy::new("ollama").with_args(["list"]);
        Self {
            strategies: vec![list.clone(), CommandStrategy::docker_exec("ollama", &list)],
            timeout: Duration::from_secs(10),
        }
    }
}

impl LocalRuntime {
    /// Create a runtime lister with custom strategies.
    pub fn new(strategies: Vec<CommandStrategy>) -> Self {
        Self {
            strategies,
            ..Self::default()
        }
    }

    /// Builder method to set the per-strategy timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn strategies(&self) -> &[CommandStrategy] {
        &self.strategies
    }

    /// Model ids from the first strategy that succeeds, in listing order.
    ///
    /// Returns an empty list when every strategy fails.
    pub async fn list_local_models(&self) -> Vec<ModelId> {
        let models = first_success(&self.strategies, self.timeout, |stdout| {
            Ok(parse_model_table(stdout))
        })
        .await;

        match models {
            Some(models) => {
                info!(count = models.len(), "Listed local models");
                models
            }
            None => {
                warn!("No strategy could list local models");
                Vec::new()
            }
        }
    }
}

/// Parse `ollama list` output.
///
/// The first line is the header. Each remaining non-blank line contributes its
/// first whitespace-delimited token. Duplicates keep their first position.
pub fn parse_model_table(stdout: &str) -> Vec<ModelId> {
    let mut seen = HashSet::new();
    stdout
        .trim()
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().next())
        .filter(|id| seen.insert(id.to_string()))
        .map(ModelId::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
NAME                    ID              SIZE      MODIFIED
llama3.2:3b             a80c4f17acd5    2.0 GB    2 weeks ago
qwen2.5-coder:7b        2b0496514337    4.7 GB    3 weeks ago

mistral-small:latest    8039dd90c113    14 GB     5 weeks ago
";

    #[test]
    fn test_parse_model_table() {
        let models = parse_model_table(LISTING);
        assert_eq!(
            models,
            vec![
                ModelId::new("llama3.2:3b"),
                ModelId::new("qwen2.5-coder:7b"),
                ModelId::new("mistral-small:latest"),
            ]
        );
    }

    #[test]
    fn test_parse_header_only_and_empty() {
        assert!(parse_model_table("NAME ID SIZE MODIFIED\n").is_empty());
        assert!(parse_model_table("").is_empty());
    }

    #[test]
    fn test_parse_drops_duplicates() {
        let models = parse_model_table("NAME\na:1 x\nb:2 y\na:1 z\n");
        assert_eq!(models, vec![ModelId::new("a:1"), ModelId::new("b:2")]);
    }

    #[test]
    fn test_default_strategies() {
        let runtime = LocalRuntime::default();
        let commands: Vec<String> = runtime.strategies().iter().map(ToString::to_string).collect();
        assert_eq!(commands, vec!["ollama list", "docker exec ollama ollama list"]);
    }

    #[tokio::test]
    async fn test_list_uses_first_working_strategy() {
        let runtime = LocalRuntime::new(vec![
            CommandStrategy::new("modelsync-definitely-missing-binary").with_args(["list"]),
            CommandStrategy::new("sh").with_args(["-c", "printf 'NAME ID\\nllama3.2:3b abc\\n'"]),
        ])
        .with_timeout(Duration::from_secs(5));

        assert_eq!(runtime.list_local_models().await, vec![ModelId::new("llama3.2:3b")]);
    }

    #[tokio::test]
    async fn test_list_empty_when_all_fail() {
        let runtime = LocalRuntime::new(vec![CommandStrategy::new("sh").with_args(["-c", "exit 1"])]);
        assert!(runtime.list_local_models().await.is_empty());
    }
}
