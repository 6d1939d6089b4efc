use serde::{Deserialize, Serialize};

use super::domain::{Gender, SymptomRequest};

pub const MIN_AGE: u8 = 1;
pub const MAX_AGE: u8 = 120;

/// Raw payload posted by the symptom checker form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomSubmission {
    pub age: i64,
    pub gender: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
}

/// Reasons a submission never reaches the scorer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("age must be between 1 and 120 (found {age})")]
    AgeOutOfRange { age: i64 },
    #[error("gender must be one of male, female, other (found '{value}')")]
    UnsupportedGender { value: String },
    #[error("at least one symptom is required")]
    NoSymptoms,
    #[error("symptom at position {index} is blank")]
    BlankSymptom { index: usize },
}

/// Validation layer in front of the scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymptomIntake;

impl SymptomIntake {
    /// Check ranges and trim symptom names. Order and duplicates are kept.
    pub fn request_from_submission(
        &self,
        submission: SymptomSubmission,
    ) -> Result<SymptomRequest, IntakeViolation> {
        let age = u8::try_from(submission.age)
            .ok()
            .filter(|age| (MIN_AGE..=MAX_AGE).contains(age))
            .ok_or(IntakeViolation::AgeOutOfRange {
                age: submission.age,
            })?;

        let gender = submission
            .gender
            .parse::<Gender>()
            .map_err(|_| IntakeViolation::UnsupportedGender {
                value: submission.gender.clone(),
            })?;

        if submission.symptoms.is_empty() {
            return Err(IntakeViolation::NoSymptoms);
        }

        let mut symptoms = Vec::with_capacity(submission.symptoms.len());
        for (index, symptom) in submission.symptoms.into_iter().enumerate() {
            let trimmed = symptom.trim();
            if trimmed.is_empty() {
                return Err(IntakeViolation::BlankSymptom { index });
            }
            symptoms.push(trimmed.to_string());
        }

        Ok(SymptomRequest {
            age,
            gender,
            symptoms,
        })
    }
}
