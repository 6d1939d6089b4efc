use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::symptoms::domain::{ConditionEntry, Gender, PossibleCondition, SymptomRequest};
use crate::symptoms::intake::SymptomSubmission;
use crate::symptoms::knowledge::KnowledgeBase;
use crate::symptoms::{symptom_router, SymptomCheckService};

pub(super) fn standard_knowledge() -> KnowledgeBase {
    KnowledgeBase::standard().expect("standard table loads")
}

/// Small table from the symptom checker walkthrough.
pub(super) fn headache_knowledge() -> KnowledgeBase {
    KnowledgeBase::from_entries(
        "walkthrough",
        vec![
            ("Headache", ConditionEntry::new("Migraine", "Severe recurring headaches", 75.0)),
            (
                "Headache",
                ConditionEntry::new("Tension Headache", "Pressure around the forehead", 65.0),
            ),
            ("Headache", ConditionEntry::new("Sinusitis", "Inflamed sinuses", 40.0)),
        ],
    )
}

pub(super) fn request(age: u8, gender: Gender, symptoms: &[&str]) -> SymptomRequest {
    SymptomRequest::new(age, gender, symptoms.iter().copied())
}

pub(super) fn submission(age: i64, gender: &str, symptoms: &[&str]) -> SymptomSubmission {
    SymptomSubmission {
        age,
        gender: gender.to_string(),
        symptoms: symptoms.iter().map(|symptom| symptom.to_string()).collect(),
    }
}

pub(super) fn find<'a>(conditions: &'a [PossibleCondition], name: &str) -> &'a PossibleCondition {
    conditions
        .iter()
        .find(|condition| condition.name == name)
        .unwrap_or_else(|| panic!("{name} missing from {conditions:?}"))
}

pub(super) fn names(conditions: &[PossibleCondition]) -> Vec<&str> {
    conditions
        .iter()
        .map(|condition| condition.name.as_str())
        .collect()
}

pub(super) fn build_service() -> Arc<SymptomCheckService> {
    Arc::new(SymptomCheckService::new(Arc::new(standard_knowledge())))
}

pub(super) fn router_with_service(service: Arc<SymptomCheckService>) -> axum::Router {
    symptom_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
