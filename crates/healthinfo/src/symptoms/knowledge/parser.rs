use super::KnowledgeBaseError;
use crate::symptoms::domain::{ConditionEntry, MAX_URGENCY, MIN_URGENCY};
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct KnowledgeRecord {
    pub(crate) symptom: String,
    pub(crate) entry: ConditionEntry,
}

/// Parse `symptom,condition,description,probability[,urgency]` rows.
pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<KnowledgeRecord>, KnowledgeBaseError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, record) in csv_reader.deserialize::<KnowledgeRow>().enumerate() {
        // header is line 1
        let row = index + 2;
        records.push(record?.into_record(row)?);
    }

    if records.is_empty() {
        return Err(KnowledgeBaseError::Empty);
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct KnowledgeRow {
    symptom: String,
    condition: String,
    #[serde(default)]
    description: String,
    probability: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    urgency: Option<String>,
}

impl KnowledgeRow {
    fn into_record(self, row: usize) -> Result<KnowledgeRecord, KnowledgeBaseError> {
        if self.symptom.is_empty() {
            return Err(KnowledgeBaseError::MissingField {
                row,
                field: "symptom",
            });
        }
        if self.condition.is_empty() {
            return Err(KnowledgeBaseError::MissingField {
                row,
                field: "condition",
            });
        }

        let probability = parse_probability(&self.probability).ok_or_else(|| {
            KnowledgeBaseError::InvalidProbability {
                row,
                value: self.probability.clone(),
            }
        })?;

        let urgency = match self.urgency.as_deref() {
            Some(raw) => parse_urgency(raw).ok_or_else(|| KnowledgeBaseError::InvalidUrgency {
                row,
                value: raw.to_string(),
            })?,
            None => MIN_URGENCY,
        };

        Ok(KnowledgeRecord {
            symptom: self.symptom,
            entry: ConditionEntry {
                condition: self.condition,
                description: self.description,
                probability,
                urgency,
            },
        })
    }
}

fn parse_probability(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && (0.0..=100.0).contains(value))
}

fn parse_urgency(raw: &str) -> Option<u8> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|value| (MIN_URGENCY..=MAX_URGENCY).contains(value))
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
