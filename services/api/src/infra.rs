use healthinfo::config::KnowledgeBaseConfig;
use healthinfo::symptoms::{KnowledgeBase, KnowledgeBaseError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load the configured table, falling back to the built-in one.
pub(crate) fn load_knowledge_base(
    config: &KnowledgeBaseConfig,
) -> Result<KnowledgeBase, KnowledgeBaseError> {
    let knowledge = match &config.path {
        Some(path) => {
            info!(path = %path.display(), "loading symptom knowledge base from file");
            KnowledgeBase::from_path(path)?
        }
        None => KnowledgeBase::standard()?,
    };

    Ok(knowledge.with_policy(config.lookup))
}
