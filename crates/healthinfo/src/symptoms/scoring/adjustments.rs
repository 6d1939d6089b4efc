use crate::symptoms::domain::{Gender, SymptomRequest};
use serde::{Deserialize, Serialize};

/// Patient group a demographic rule targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Cohort {
    /// Strictly older than the given age.
    OlderThan(u8),
    Gender(Gender),
}

impl Cohort {
    pub fn includes(&self, request: &SymptomRequest) -> bool {
        match self {
            Cohort::OlderThan(age) => request.age > *age,
            Cohort::Gender(gender) => request.gender == *gender,
        }
    }
}

/// Additive probability change for conditions whose name mentions a keyword.
/// Negative deltas lower the probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicRule {
    pub id: String,
    pub cohort: Cohort,
    pub keywords: Vec<String>,
    pub delta: i16,
}

impl DemographicRule {
    pub fn new(id: &str, cohort: Cohort, keywords: &[&str], delta: i16) -> Self {
        Self {
            id: id.to_string(),
            cohort,
            keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
            delta,
        }
    }

    pub fn applies(&self, request: &SymptomRequest, condition: &str) -> bool {
        self.cohort.includes(request)
            && self
                .keywords
                .iter()
                .any(|keyword| contains_ignore_case(condition, keyword))
    }
}

/// Ordered rule table. Every matching rule contributes its delta; the sum is
/// applied once and the result clamped to 0..=100.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DemographicRules {
    rules: Vec<DemographicRule>,
}

impl DemographicRules {
    pub fn new(rules: Vec<DemographicRule>) -> Self {
        Self { rules }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            DemographicRule::new(
                "older-adult-joint-cardiac",
                Cohort::OlderThan(60),
                &["Arthritis", "Heart"],
                10,
            ),
            DemographicRule::new(
                "pregnancy-associated",
                Cohort::Gender(Gender::Female),
                &["Morning Sickness"],
                20,
            ),
        ])
    }

    pub fn rules(&self) -> &[DemographicRule] {
        &self.rules
    }

    pub fn matching<'a>(
        &'a self,
        request: &'a SymptomRequest,
        condition: &'a str,
    ) -> impl Iterator<Item = &'a DemographicRule> + 'a {
        self.rules
            .iter()
            .filter(move |rule| rule.applies(request, condition))
    }

    pub fn adjust(&self, request: &SymptomRequest, condition: &str, probability: f64) -> f64 {
        let delta: f64 = self
            .matching(request, condition)
            .map(|rule| f64::from(rule.delta))
            .sum();
        (probability + delta).clamp(0.0, 100.0)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
