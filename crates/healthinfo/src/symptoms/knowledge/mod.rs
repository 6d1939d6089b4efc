//! Static symptom to condition table consulted by the scorer.
//!
//! The table is parsed once at startup and never mutated; swapping it means
//! building a new `KnowledgeBase` and replacing the whole value.

mod parser;

use crate::symptoms::domain::{ConditionEntry, SymptomKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::io::{Cursor, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

const STANDARD_TABLE: &str = include_str!("standard.csv");
const STANDARD_SOURCE: &str = "standard";

/// Errors raised while loading a table. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeBaseError {
    #[error("failed to read knowledge base: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid knowledge base CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: probability '{value}' must be a number between 0 and 100")]
    InvalidProbability { row: usize, value: String },
    #[error("row {row}: urgency '{value}' must be an integer between 1 and 5")]
    InvalidUrgency { row: usize, value: String },
    #[error("row {row}: missing {field}")]
    MissingField { row: usize, field: &'static str },
    #[error("knowledge base contains no rows")]
    Empty,
}

/// How a reported symptom is matched against the known symptom keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupPolicy {
    /// Normalized equality only.
    #[default]
    Exact,
    /// Exact first, then any key containing, or contained in, the reported symptom.
    Permissive,
}

impl LookupPolicy {
    pub const fn label(self) -> &'static str {
        match self {
            LookupPolicy::Exact => "exact",
            LookupPolicy::Permissive => "permissive",
        }
    }
}

impl fmt::Display for LookupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown lookup policy '{0}'")]
pub struct ParseLookupPolicyError(pub String);

impl FromStr for LookupPolicy {
    type Err = ParseLookupPolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(LookupPolicy::Exact),
            "permissive" | "substring" => Ok(LookupPolicy::Permissive),
            _ => Err(ParseLookupPolicyError(value.to_string())),
        }
    }
}

/// Source of candidate conditions for a symptom. Unknown symptoms yield an empty list.
pub trait ConditionLookup {
    fn lookup(&self, symptom: &SymptomKey) -> Vec<&ConditionEntry>;
}

/// Snapshot metadata exposed by the API and CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnowledgeBaseInfo {
    pub source: String,
    pub symptoms: usize,
    pub entries: usize,
    pub lookup: LookupPolicy,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct SymptomGroup {
    label: String,
    key: SymptomKey,
    entries: Vec<ConditionEntry>,
}

/// Immutable symptom table with its lookup policy.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    groups: Vec<SymptomGroup>,
    index: HashMap<SymptomKey, usize>,
    policy: LookupPolicy,
    info: KnowledgeBaseInfo,
}

impl KnowledgeBase {
    /// The table shipped with the service.
    pub fn standard() -> Result<Self, KnowledgeBaseError> {
        let records = parser::parse_records(Cursor::new(STANDARD_TABLE))?;
        Ok(Self::assemble(
            STANDARD_SOURCE,
            records.into_iter().map(|record| (record.symptom, record.entry)),
        ))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, KnowledgeBaseError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let records = parser::parse_records(file)?;
        Ok(Self::assemble(
            &path.display().to_string(),
            records.into_iter().map(|record| (record.symptom, record.entry)),
        ))
    }

    pub fn from_reader<R: Read>(source: &str, reader: R) -> Result<Self, KnowledgeBaseError> {
        let records = parser::parse_records(reader)?;
        Ok(Self::assemble(
            source,
            records.into_iter().map(|record| (record.symptom, record.entry)),
        ))
    }

    /// Build a table from rows already held in memory. Rows are trusted as given.
    pub fn from_entries<I, S>(source: &str, rows: I) -> Self
    where
        I: IntoIterator<Item = (S, ConditionEntry)>,
        S: Into<String>,
    {
        Self::assemble(
            source,
            rows.into_iter().map(|(symptom, entry)| (symptom.into(), entry)),
        )
    }

    pub fn with_policy(mut self, policy: LookupPolicy) -> Self {
        self.policy = policy;
        self.info.lookup = policy;
        self
    }

    pub fn policy(&self) -> LookupPolicy {
        self.policy
    }

    pub fn info(&self) -> &KnowledgeBaseInfo {
        &self.info
    }

    /// Symptom names as first spelled in the source, in load order.
    pub fn symptoms(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.label.as_str())
    }

    /// Case-insensitive substring filter over symptom names; a blank query returns all of them.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let needle = SymptomKey::new(query);
        self.groups
            .iter()
            .filter(|group| needle.is_empty() || group.key.as_str().contains(needle.as_str()))
            .map(|group| group.label.as_str())
            .collect()
    }

    fn assemble<I>(source: &str, rows: I) -> Self
    where
        I: IntoIterator<Item = (String, ConditionEntry)>,
    {
        let mut groups: Vec<SymptomGroup> = Vec::new();
        let mut index: HashMap<SymptomKey, usize> = HashMap::new();
        let mut entries = 0usize;

        for (symptom, entry) in rows {
            let key = SymptomKey::new(&symptom);
            if key.is_empty() {
                continue;
            }
            let position = *index.entry(key.clone()).or_insert_with(|| {
                groups.push(SymptomGroup {
                    label: symptom.trim().to_string(),
                    key,
                    entries: Vec::new(),
                });
                groups.len() - 1
            });
            groups[position].entries.push(entry);
            entries += 1;
        }

        let policy = LookupPolicy::default();
        let info = KnowledgeBaseInfo {
            source: source.to_string(),
            symptoms: groups.len(),
            entries,
            lookup: policy,
            loaded_at: Utc::now(),
        };
        info!(
            source = %info.source,
            symptoms = info.symptoms,
            entries = info.entries,
            "symptom knowledge base loaded"
        );

        Self {
            groups,
            index,
            policy,
            info,
        }
    }
}

impl ConditionLookup for KnowledgeBase {
    fn lookup(&self, symptom: &SymptomKey) -> Vec<&ConditionEntry> {
        if symptom.is_empty() {
            return Vec::new();
        }

        if let Some(position) = self.index.get(symptom) {
            return self.groups[*position].entries.iter().collect();
        }

        match self.policy {
            LookupPolicy::Exact => Vec::new(),
            LookupPolicy::Permissive => self
                .groups
                .iter()
                .filter(|group| {
                    group.key.as_str().contains(symptom.as_str())
                        || symptom.as_str().contains(group.key.as_str())
                })
                .flat_map(|group| group.entries.iter())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[&ConditionEntry]) -> Vec<String> {
        entries.iter().map(|entry| entry.condition.clone()).collect()
    }

    #[test]
    fn standard_table_covers_picker_symptoms() {
        let knowledge = KnowledgeBase::standard().expect("standard table loads");
        assert_eq!(knowledge.info().symptoms, 20);
        assert_eq!(knowledge.info().entries, 78);
        assert_eq!(knowledge.info().source, "standard");
        assert_eq!(knowledge.symptoms().next(), Some("Headache"));
        assert_eq!(knowledge.symptoms().last(), Some("Weight loss"));
    }

    #[test]
    fn lookup_is_case_and_whitespace_insensitive() {
        let knowledge = KnowledgeBase::standard().expect("standard table loads");
        let entries = knowledge.lookup(&SymptomKey::new("  sHORTNESS   of breath "));
        assert_eq!(
            names(&entries),
            vec!["Asthma", "COPD", "Anxiety", "COVID-19"]
        );
    }

    #[test]
    fn exact_policy_ignores_partial_names() {
        let knowledge = KnowledgeBase::standard().expect("standard table loads");
        assert!(knowledge.lookup(&SymptomKey::new("throat")).is_empty());
        assert!(knowledge.lookup(&SymptomKey::new("Hiccups")).is_empty());
    }

    #[test]
    fn permissive_policy_matches_containment_both_ways() {
        let knowledge = KnowledgeBase::standard()
            .expect("standard table loads")
            .with_policy(LookupPolicy::Permissive);

        let contained = knowledge.lookup(&SymptomKey::new("throat"));
        assert_eq!(
            names(&contained),
            vec!["Pharyngitis", "Common Cold", "Strep Throat", "Tonsillitis"]
        );

        let containing = knowledge.lookup(&SymptomKey::new("severe back pain at night"));
        assert_eq!(containing.len(), 4);
        assert_eq!(containing[0].condition, "Muscle Strain");

        assert!(knowledge.lookup(&SymptomKey::new("Hiccups")).is_empty());
        assert!(knowledge.lookup(&SymptomKey::new("   ")).is_empty());
    }

    #[test]
    fn permissive_policy_prefers_exact_key() {
        let knowledge = KnowledgeBase::from_entries(
            "memory",
            vec![
                ("Pain", ConditionEntry::new("Generic Pain", "", 30.0)),
                ("Back pain", ConditionEntry::new("Muscle Strain", "", 75.0)),
            ],
        )
        .with_policy(LookupPolicy::Permissive);

        let entries = knowledge.lookup(&SymptomKey::new("pain"));
        assert_eq!(names(&entries), vec!["Generic Pain"]);
        assert_eq!(knowledge.info().lookup, LookupPolicy::Permissive);
    }

    #[test]
    fn groups_rows_under_first_spelling() {
        let knowledge = KnowledgeBase::from_entries(
            "memory",
            vec![
                ("Rash", ConditionEntry::new("Eczema", "", 70.0)),
                ("Fever", ConditionEntry::new("Influenza", "", 65.0)),
                ("rash ", ConditionEntry::new("Psoriasis", "", 60.0)),
            ],
        );

        assert_eq!(knowledge.symptoms().collect::<Vec<_>>(), vec!["Rash", "Fever"]);
        assert_eq!(
            names(&knowledge.lookup(&SymptomKey::new("RASH"))),
            vec!["Eczema", "Psoriasis"]
        );
        assert_eq!(knowledge.info().entries, 3);
    }

    #[test]
    fn search_filters_symptom_names() {
        let knowledge = KnowledgeBase::standard().expect("standard table loads");
        assert_eq!(
            knowledge.search("PAIN"),
            vec!["Abdominal pain", "Chest pain", "Joint pain", "Back pain"]
        );
        assert_eq!(knowledge.search("").len(), 20);
        assert!(knowledge.search("xyz").is_empty());
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = KnowledgeBase::from_path("./does-not-exist.csv").expect_err("io error");
        match error {
            KnowledgeBaseError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn lookup_policy_parses_aliases() {
        assert_eq!("EXACT".parse::<LookupPolicy>(), Ok(LookupPolicy::Exact));
        assert_eq!(
            " substring ".parse::<LookupPolicy>(),
            Ok(LookupPolicy::Permissive)
        );
        assert!("fuzzy".parse::<LookupPolicy>().is_err());
    }
}
