use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Text returned alongside every assessment.
pub const DISCLAIMER: &str = "This assessment is for informational purposes only and does not constitute medical advice. Please consult with a healthcare professional for proper diagnosis and treatment.";

/// Lowest and highest urgency the checker reports.
pub const MIN_URGENCY: u8 = 1;
pub const MAX_URGENCY: u8 = 5;

/// Normalized symptom name used to address the knowledge base.
///
/// Zero-width characters are stripped, runs of whitespace collapse to a single
/// space, and the result is lowercased, so `"  Sore   THROAT"` and
/// `"sore throat"` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymptomKey(String);

impl SymptomKey {
    pub fn new(raw: &str) -> Self {
        let cleaned = raw.replace(['\u{feff}', '\u{200b}'], "");
        let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
        Self(collapsed.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SymptomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SymptomKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One knowledge base row: a candidate condition reachable from a symptom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionEntry {
    pub condition: String,
    pub description: String,
    /// Base likelihood on a 0..=100 scale.
    pub probability: f64,
    /// Advisory urgency recorded with the row; reported urgency is derived by the scorer.
    pub urgency: u8,
}

impl ConditionEntry {
    pub fn new(condition: &str, description: &str, probability: f64) -> Self {
        Self {
            condition: condition.to_string(),
            description: description.to_string(),
            probability,
            urgency: MIN_URGENCY,
        }
    }

    pub fn with_urgency(mut self, urgency: u8) -> Self {
        self.urgency = urgency;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported gender '{0}'")]
pub struct ParseGenderError(pub String);

impl FromStr for Gender {
    type Err = ParseGenderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(ParseGenderError(value.to_string())),
        }
    }
}

/// Validated input to the scorer. Build one through `SymptomIntake` when the
/// values come from outside the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomRequest {
    pub age: u8,
    pub gender: Gender,
    pub symptoms: Vec<String>,
}

impl SymptomRequest {
    pub fn new<I, S>(age: u8, gender: Gender, symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            age,
            gender,
            symptoms: symptoms.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ranked candidate returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PossibleCondition {
    pub name: String,
    pub description: String,
    /// Adjusted likelihood, always within 0..=100.
    pub probability: f64,
    /// 1 (low) through 5 (emergency).
    pub urgency: u8,
}

/// Payload returned by the symptom checker endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomCheckResponse {
    pub conditions: Vec<PossibleCondition>,
    pub disclaimer: String,
}

impl SymptomCheckResponse {
    pub fn new(conditions: Vec<PossibleCondition>) -> Self {
        Self {
            conditions,
            disclaimer: DISCLAIMER.to_string(),
        }
    }
}
