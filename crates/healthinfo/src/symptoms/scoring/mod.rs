mod adjustments;
mod aggregate;
mod urgency;

pub use adjustments::{Cohort, DemographicRule, DemographicRules};
pub use urgency::{UrgencyPolicy, UrgencyThreshold};

use crate::symptoms::domain::{PossibleCondition, SymptomKey, SymptomRequest};
use crate::symptoms::knowledge::ConditionLookup;
use aggregate::CandidateAccumulator;
use tracing::debug;

/// Most conditions returned for a single request.
pub const MAX_CONDITIONS: usize = 5;

/// Multiplier applied to the matched share of symptoms before capping at 1.0.
pub const COVERAGE_BOOST: f64 = 1.5;

/// Pure heuristic scorer turning reported symptoms into ranked conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct SymptomScorer {
    rules: DemographicRules,
    urgency: UrgencyPolicy,
    max_results: usize,
}

impl Default for SymptomScorer {
    fn default() -> Self {
        Self::standard()
    }
}

impl SymptomScorer {
    pub fn new(rules: DemographicRules, urgency: UrgencyPolicy) -> Self {
        Self {
            rules,
            urgency,
            max_results: MAX_CONDITIONS,
        }
    }

    pub fn standard() -> Self {
        Self::new(DemographicRules::standard(), UrgencyPolicy::standard())
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn rules(&self) -> &DemographicRules {
        &self.rules
    }

    pub fn urgency_policy(&self) -> &UrgencyPolicy {
        &self.urgency
    }

    pub fn score<L>(&self, lookup: &L, request: &SymptomRequest) -> Vec<PossibleCondition>
    where
        L: ConditionLookup + ?Sized,
    {
        let requested = request.symptoms.len();
        if requested == 0 {
            return Vec::new();
        }

        let mut accumulator = CandidateAccumulator::default();
        let mut matches = 0usize;
        for symptom in &request.symptoms {
            let key = SymptomKey::new(symptom);
            for entry in lookup.lookup(&key) {
                accumulator.record(entry);
                matches += 1;
            }
        }
        let candidates = accumulator.len();

        let mut conditions: Vec<PossibleCondition> = accumulator
            .into_candidates()
            .into_iter()
            .map(|candidate| {
                let base = candidate.base_probability(requested);
                let probability = self.rules.adjust(request, &candidate.name, base);
                let urgency = self.urgency.urgency_for(&candidate.name, probability);
                PossibleCondition {
                    name: candidate.name,
                    description: candidate.description,
                    probability,
                    urgency,
                }
            })
            .collect();

        // stable: equal probabilities keep discovery order
        conditions.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        conditions.truncate(self.max_results);

        debug!(
            requested,
            matches,
            candidates,
            returned = conditions.len(),
            "scored symptom request"
        );

        conditions
    }
}

/// Score a request with the standard rule table and urgency policy.
pub fn score<L>(lookup: &L, request: &SymptomRequest) -> Vec<PossibleCondition>
where
    L: ConditionLookup + ?Sized,
{
    SymptomScorer::standard().score(lookup, request)
}
