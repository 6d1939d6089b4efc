use crate::symptoms::domain::ConditionEntry;
use std::collections::HashMap;

use super::COVERAGE_BOOST;

/// Running totals for one condition across every matched symptom.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Candidate {
    pub name: String,
    pub description: String,
    pub match_count: usize,
    pub probability_sum: f64,
}

impl Candidate {
    /// Share of the reported symptoms explained by this condition, boosted and capped at 1.0.
    pub fn coverage(&self, requested: usize) -> f64 {
        if requested == 0 {
            return 0.0;
        }
        (self.match_count as f64 / requested as f64 * COVERAGE_BOOST).min(1.0)
    }

    pub fn average_probability(&self) -> f64 {
        if self.match_count == 0 {
            return 0.0;
        }
        self.probability_sum / self.match_count as f64
    }

    /// Rounded 0..=100 score before demographic adjustments.
    pub fn base_probability(&self, requested: usize) -> f64 {
        (self.average_probability() * self.coverage(requested)).round()
    }
}

/// Per-request grouping of matches by condition name, in first-discovered order.
#[derive(Debug, Default)]
pub(crate) struct CandidateAccumulator {
    candidates: Vec<Candidate>,
    index: HashMap<String, usize>,
}

impl CandidateAccumulator {
    pub fn record(&mut self, entry: &ConditionEntry) {
        let position = match self.index.get(&entry.condition) {
            Some(position) => *position,
            None => {
                self.candidates.push(Candidate {
                    name: entry.condition.clone(),
                    description: entry.description.clone(),
                    match_count: 0,
                    probability_sum: 0.0,
                });
                let position = self.candidates.len() - 1;
                self.index.insert(entry.condition.clone(), position);
                position
            }
        };

        let candidate = &mut self.candidates[position];
        candidate.match_count += 1;
        candidate.probability_sum += entry.probability;
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn into_candidates(self) -> Vec<Candidate> {
        self.candidates
    }
}
