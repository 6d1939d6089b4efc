use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{SymptomCheckResponse, SymptomRequest};
use super::intake::{IntakeViolation, SymptomIntake, SymptomSubmission};
use super::knowledge::{KnowledgeBase, KnowledgeBaseInfo};
use super::scoring::SymptomScorer;

/// Symptom names offered to the client-side picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomCatalog {
    pub symptoms: Vec<String>,
    pub total: usize,
}

/// Facade composing intake validation, the shared knowledge base, and the scorer.
pub struct SymptomCheckService {
    knowledge: Arc<KnowledgeBase>,
    scorer: SymptomScorer,
    intake: SymptomIntake,
}

impl SymptomCheckService {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self::with_scorer(knowledge, SymptomScorer::standard())
    }

    pub fn with_scorer(knowledge: Arc<KnowledgeBase>, scorer: SymptomScorer) -> Self {
        Self {
            knowledge,
            scorer,
            intake: SymptomIntake,
        }
    }

    /// Validate a raw submission and score it.
    pub fn check(
        &self,
        submission: SymptomSubmission,
    ) -> Result<SymptomCheckResponse, IntakeViolation> {
        let request = match self.intake.request_from_submission(submission) {
            Ok(request) => request,
            Err(violation) => {
                warn!(%violation, "symptom submission rejected");
                return Err(violation);
            }
        };

        Ok(self.assess(&request))
    }

    /// Score an already validated request.
    pub fn assess(&self, request: &SymptomRequest) -> SymptomCheckResponse {
        let conditions = self.scorer.score(self.knowledge.as_ref(), request);
        info!(
            age = request.age,
            gender = %request.gender,
            symptoms = request.symptoms.len(),
            conditions = conditions.len(),
            "symptom check completed"
        );
        SymptomCheckResponse::new(conditions)
    }

    pub fn catalog(&self, query: Option<&str>) -> SymptomCatalog {
        let symptoms: Vec<String> = self
            .knowledge
            .search(query.unwrap_or_default())
            .into_iter()
            .map(str::to_string)
            .collect();
        let total = symptoms.len();
        SymptomCatalog { symptoms, total }
    }

    pub fn info(&self) -> &KnowledgeBaseInfo {
        self.knowledge.info()
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }
}
