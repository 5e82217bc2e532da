//! Capability probe seam and the tool-capability filter.

use async_trait::async_trait;
use modelsync_core::{Blocklist, CapabilityLookup, FilterOutcome, ModelId, Verdict};
use tracing::{debug, info};

use crate::http::OllamaClient;

/// Source of per-model capability information.
#[async_trait]
pub trait CapabilityProbe: Send + Sync {
    /// Capabilities of `model`. Must not fail; failures map to `Unknown`.
    async fn capabilities(&self, model: &ModelId) -> CapabilityLookup;
}

#[async_trait]
impl CapabilityProbe for OllamaClient {
    async fn capabilities(&self, model: &ModelId) -> CapabilityLookup {
        self.fetch_capabilities(model).await
    }
}

/// Split `models` into accepted, no-tools and blocklisted partitions.
///
/// Blocklisted models are rejected without querying the probe. Lookups run one
/// at a time in input order.
pub async fn filter_tool_capable<P>(
    models: Vec<ModelId>,
    blocklist: &Blocklist,
    probe: &P,
) -> FilterOutcome
where
    P: CapabilityProbe + ?Sized,
{
    let mut outcome = FilterOutcome::new();

    for model in models {
        if blocklist.contains(&model) {
            debug!(model = %model, "Skipping blocklisted model");
            outcome.reject_blocklisted(model);
            continue;
        }

        let lookup = probe.capabilities(&model).await;
        let label = model.to_string();
        match outcome.record(model, &lookup) {
            Verdict::Accept => debug!(model = %label, "Model supports tools"),
            Verdict::NoTools => debug!(model = %label, "Model lacks tools capability"),
            Verdict::Unverified => debug!(model = %label, "Model capability unknown"),
        }
    }

    info!(
        accepted = outcome.accepted.len(),
        no_tools = outcome.no_tools.len(),
        blocklisted = outcome.blocklisted.len(),
        "Filtered local models"
    );

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use modelsync_core::CapabilitySet;

    /// Probe answering from a fixed table and recording every query.
    struct TableProbe {
        answers: HashMap<String, CapabilityLookup>,
        queried: Mutex<Vec<String>>,
    }

    impl TableProbe {
        fn new(answers: Vec<(&str, CapabilityLookup)>) -> Self {
            Self {
                answers: answers
                    .into_iter()
                    .map(|(id, lookup)| (id.to_string(), lookup))
                    .collect(),
                queried: Mutex::new(Vec::new()),
            }
        }

        fn queried(&self) -> Vec<String> {
            self.queried.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CapabilityProbe for TableProbe {
        async fn capabilities(&self, model: &ModelId) -> CapabilityLookup {
            self.queried.lock().unwrap().push(model.to_string());
            self.answers
                .get(model.as_str())
                .cloned()
                .unwrap_or(CapabilityLookup::Unknown)
        }
    }

    fn reported(tags: &[&str]) -> CapabilityLookup {
        CapabilityLookup::Reported(tags.iter().copied().collect::<CapabilitySet>())
    }

    fn ids(raw: &[&str]) -> Vec<ModelId> {
        raw.iter().copied().map(ModelId::from).collect()
    }

    #[tokio::test]
    async fn test_blocklisted_models_never_queried() {
        let probe = TableProbe::new(vec![
            ("llama3.2:3b", reported(&["tools", "completion"])),
            ("qwen2.5-coder:7b", reported(&["tools"])),
            ("mistral-small:latest", reported(&["tools"])),
        ]);

        let outcome = filter_tool_capable(
            ids(&["llama3.2:3b", "qwen2.5-coder:7b", "mistral-small:latest"]),
            &Blocklist::default(),
            &probe,
        )
        .await;

        assert_eq!(outcome.accepted, ids(&["llama3.2:3b"]));
        assert_eq!(outcome.blocklisted, ids(&["qwen2.5-coder:7b", "mistral-small:latest"]));
        assert!(outcome.no_tools.is_empty());
        assert_eq!(probe.queried(), vec!["llama3.2:3b"]);
    }

    #[tokio::test]
    async fn test_failed_lookup_is_excluded_as_no_tools() {
        let probe = TableProbe::new(vec![
            ("llama3.2:3b", reported(&["tools", "completion"])),
            ("gemma3:4b", CapabilityLookup::Unknown),
            ("nomic-embed-text:latest", reported(&["embedding"])),
        ]);

        let outcome = filter_tool_capable(
            ids(&["llama3.2:3b", "gemma3:4b", "nomic-embed-text:latest"]),
            &Blocklist::default(),
            &probe,
        )
        .await;

        assert_eq!(outcome.accepted, ids(&["llama3.2:3b"]));
        assert_eq!(outcome.no_tools, ids(&["gemma3:4b", "nomic-embed-text:latest"]));
        assert_eq!(outcome.unverified, ids(&["gemma3:4b"]));
        assert_eq!(
            outcome.diagnostics(),
            vec!["Skipped (no tools capability): gemma3:4b, nomic-embed-text:latest".to_string()]
        );
    }

    #[tokio::test]
    async fn test_accepted_always_report_tools() {
        let probe = TableProbe::new(vec![
            ("a:1", reported(&["tools"])),
            ("b:1", reported(&[])),
            ("c:1", reported(&["completion", "tools"])),
            ("mistral-small:24b", reported(&["tools"])),
        ]);
        let blocklist = Blocklist::default();
        let models = ids(&["a:1", "b:1", "c:1", "d:1", "mistral-small:24b"]);

        let outcome = filter_tool_capable(models, &blocklist, &probe).await;

        for id in &outcome.accepted {
            assert!(!blocklist.contains(id));
            assert!(probe.capabilities(id).await.supports_tools());
        }
        assert_eq!(outcome.accepted, ids(&["a:1", "c:1"]));
    }
}
