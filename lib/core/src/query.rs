//! Query interpretation: resolves free-text queries against a trained
//! artifact into a projection, a set of value filters, and the matching
//! records.
//!
//! The interpreter is a single linear pass - tokenize, resolve fields,
//! extract filters, select, filter, project - and holds no state between
//! calls beyond the artifact it is handed.

use crate::record::FlatRecord;
use crate::text::{lowercase, similarity};
use crate::vocab::TrainingArtifact;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// Minimum synonym/token similarity for a query token to reference a field.
const FIELD_MATCH_THRESHOLD: f64 = 0.7;

/// Minimum value/token similarity for a token to become (or satisfy) a
/// value filter.
const VALUE_MATCH_THRESHOLD: f64 = 0.85;

/// Function words dropped during tokenization.
const STOP_WORDS: &[&str] = &["bir", "bana", "tüm", "olan"];

/// Result of interpreting and executing one query. Ephemeral, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    /// SQL-flavored rendering of the inferred query, e.g.
    /// `SELECT ad WHERE yaş=30`.
    pub interpretation: String,
    /// Short count summary, e.g. `2 records found`.
    pub action: String,
    pub results: Vec<FlatRecord>,
}

impl QueryResult {
    #[inline]
    #[must_use]
    pub fn result_count(&self) -> usize {
        self.results.len()
    }
}

/// Interpret `query` against the artifact and return the matching records.
pub fn search(artifact: &TrainingArtifact, query: &str) -> QueryResult {
    let tokens = tokenize(query);
    debug!(?tokens, "query tokenized");

    // Field resolution: a token references a field when any synonym of that
    // field scores above the threshold. Insertion order, no duplicates.
    let mut matched_fields: Vec<&str> = Vec::new();
    for token in &tokens {
        for (name, entry) in &artifact.fields {
            if entry
                .synonyms
                .iter()
                .any(|synonym| similarity(synonym, token) > FIELD_MATCH_THRESHOLD)
                && !matched_fields.contains(&name.as_str())
            {
                debug!(token = token.as_str(), field = name.as_str(), "field matched");
                matched_fields.push(name);
            }
        }
    }

    // Filter extraction: integer tokens constrain every matched numeric
    // field; known value tokens bind to the first record field holding a
    // close-enough value.
    let mut filters: IndexMap<String, String> = IndexMap::new();
    for token in &tokens {
        if token.parse::<i64>().is_ok() {
            for &field in &matched_fields {
                if artifact.fields[field].data_type.is_numeric() {
                    filters.insert(field.to_string(), token.clone());
                }
            }
        } else if artifact.words.contains_key(token.as_str()) {
            'records: for record in &artifact.records {
                for (field, value) in record.iter() {
                    if similarity(value, token) > VALUE_MATCH_THRESHOLD
                        && !filters.contains_key(field)
                    {
                        debug!(token = token.as_str(), field, value, "filter bound");
                        filters.insert(field.to_string(), value.to_string());
                        break 'records;
                    }
                }
            }
        }
    }

    // Projection selection: fields referenced by name but not consumed as
    // filter targets. A bare field reference with no filter still projects.
    let mut select_fields: Vec<&str> = matched_fields
        .iter()
        .copied()
        .filter(|field| !filters.contains_key(*field))
        .collect();
    if select_fields.is_empty() && !matched_fields.is_empty() {
        select_fields = matched_fields.clone();
    }

    // Conjunctive filtering: a record survives when every filtered field is
    // present and matches exactly (case-insensitively) or fuzzily. An absent
    // field fails the condition rather than aborting the query.
    let mut survivors: Vec<&FlatRecord> = artifact.records.iter().collect();
    for (field, expected) in &filters {
        survivors.retain(|record| {
            record
                .get(field)
                .map(|value| {
                    lowercase(value) == lowercase(expected)
                        || similarity(value, expected) > VALUE_MATCH_THRESHOLD
                })
                .unwrap_or(false)
        });
    }

    let results: Vec<FlatRecord> = if select_fields.is_empty() {
        survivors.into_iter().cloned().collect()
    } else {
        survivors
            .into_iter()
            .map(|record| record.project(&select_fields))
            .collect()
    };

    let interpretation = render_interpretation(&select_fields, &filters);
    let action = format!("{} records found", results.len());
    debug!(
        interpretation = interpretation.as_str(),
        result_count = results.len(),
        "query executed"
    );

    QueryResult {
        interpretation,
        action,
        results,
    }
}

/// Strip punctuation, split on whitespace, lowercase, and drop stop words.
/// Duplicates are kept; the matching loops tolerate them.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(lowercase)
        .filter(|token| !STOP_WORDS.contains(&token.as_str()))
        .collect()
}

fn render_interpretation(select_fields: &[&str], filters: &IndexMap<String, String>) -> String {
    let select_desc = if select_fields.is_empty() {
        "SELECT *".to_string()
    } else {
        format!("SELECT {}", select_fields.join(", "))
    };

    let filter_desc = if filters.is_empty() {
        String::new()
    } else {
        let conditions: Vec<String> = filters
            .iter()
            .map(|(field, value)| format!("{field}={value}"))
            .collect();
        format!("WHERE {}", conditions.join(" AND "))
    };

    format!("{select_desc} {filter_desc}").trim().to_string()
}
