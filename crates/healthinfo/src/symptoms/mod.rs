//! Rule-based symptom checker.
//!
//! Reported symptoms are looked up in a static knowledge base, matches are
//! grouped per condition, and each condition gets a heuristic probability
//! (0..=100) and urgency (1..=5). The output is an explainable ranking, not a
//! diagnosis.

pub mod domain;
pub mod intake;
pub mod knowledge;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ConditionEntry, Gender, PossibleCondition, SymptomCheckResponse, SymptomKey, SymptomRequest,
    DISCLAIMER,
};
pub use intake::{IntakeViolation, SymptomIntake, SymptomSubmission};
pub use knowledge::{
    ConditionLookup, KnowledgeBase, KnowledgeBaseError, KnowledgeBaseInfo, LookupPolicy,
};
pub use router::symptom_router;
pub use scoring::{
    score, Cohort, DemographicRule, DemographicRules, SymptomScorer, UrgencyPolicy,
    UrgencyThreshold, MAX_CONDITIONS,
};
pub use service::{SymptomCatalog, SymptomCheckService};
