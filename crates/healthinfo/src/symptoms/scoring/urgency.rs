use crate::symptoms::domain::{MAX_URGENCY, MIN_URGENCY};
use serde::{Deserialize, Serialize};

/// Probability strictly above `above` raises urgency to at least `urgency`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UrgencyThreshold {
    pub above: f64,
    pub urgency: u8,
}

/// Derives the reported urgency from the adjusted probability.
///
/// Conditions whose name contains an emergency keyword always report the
/// maximum urgency. The advisory urgency stored in the knowledge base is not
/// consulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "UrgencyPolicyData")]
pub struct UrgencyPolicy {
    thresholds: Vec<UrgencyThreshold>,
    emergency_keywords: Vec<String>,
}

/// Decoded form of a policy; normalized through `UrgencyPolicy::new`.
#[derive(Deserialize)]
struct UrgencyPolicyData {
    thresholds: Vec<UrgencyThreshold>,
    #[serde(default)]
    emergency_keywords: Vec<String>,
}

impl From<UrgencyPolicyData> for UrgencyPolicy {
    fn from(data: UrgencyPolicyData) -> Self {
        Self::new(data.thresholds, data.emergency_keywords)
    }
}

impl UrgencyPolicy {
    pub fn new(mut thresholds: Vec<UrgencyThreshold>, emergency_keywords: Vec<String>) -> Self {
        for threshold in &mut thresholds {
            threshold.urgency = threshold.urgency.clamp(MIN_URGENCY, MAX_URGENCY);
        }
        thresholds.sort_by(|a, b| b.above.total_cmp(&a.above));

        Self {
            thresholds,
            emergency_keywords,
        }
    }

    pub fn standard() -> Self {
        Self::new(
            vec![
                UrgencyThreshold {
                    above: 80.0,
                    urgency: 4,
                },
                UrgencyThreshold {
                    above: 60.0,
                    urgency: 3,
                },
                UrgencyThreshold {
                    above: 40.0,
                    urgency: 2,
                },
            ],
            vec!["Heart Attack".to_string(), "Appendicitis".to_string()],
        )
    }

    pub fn thresholds(&self) -> &[UrgencyThreshold] {
        &self.thresholds
    }

    pub fn is_emergency(&self, condition: &str) -> bool {
        let condition = condition.to_lowercase();
        self.emergency_keywords
            .iter()
            .filter(|keyword| !keyword.is_empty())
            .any(|keyword| condition.contains(&keyword.to_lowercase()))
    }

    pub fn urgency_for(&self, condition: &str, probability: f64) -> u8 {
        if self.is_emergency(condition) {
            return MAX_URGENCY;
        }

        self.thresholds
            .iter()
            .find(|threshold| probability > threshold.above)
            .map(|threshold| threshold.urgency)
            .unwrap_or(MIN_URGENCY)
    }
}

impl Default for UrgencyPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
