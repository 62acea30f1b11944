//! Vocabulary construction: turns a list of flat records into the training
//! artifact consumed by the query interpreter.

use crate::error::{Error, Result};
use crate::record::FlatRecord;
use crate::text::{lowercase, normalize, scalar_code};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Characters that delimit value tokens when building the word catalog.
const TOKEN_DELIMITERS: &[char] = &[' ', ',', '.', ';', ':', '-'];

/// Bilingual (Turkish/English) field-name aliases. A field name that contains
/// a table key, or is contained by it, inherits the key's alias list.
const SYNONYM_TABLE: &[(&str, &[&str])] = &[
    ("kod", &["kodu", "kodlar", "kodları", "code", "id", "köd", "ködları"]),
    ("yaş", &["yas", "yaşı", "yası", "age", "yash"]),
    ("ad", &["isim", "name", "adı", "adi"]),
    ("soyad", &["soyisim", "surname", "soyadı", "soyadi"]),
    ("email", &["eposta", "e-posta", "mail", "e-mail"]),
    ("telefon", &["tel", "phone", "gsm", "telefonu"]),
    ("adres", &["address", "adresi"]),
    ("şehir", &["sehir", "city", "il"]),
    ("ülke", &["ulke", "country"]),
];

/// Inferred scalar type of a field, taken from a single sample value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Int,
    Double,
    Bool,
    DateTime,
}

impl DataType {
    #[inline]
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, DataType::Int | DataType::Double)
    }
}

/// Catalog entry for one distinct field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub name: String,
    /// Deterministic code derived from the normalized name; same name always
    /// yields the same code.
    pub code: u64,
    pub data_type: DataType,
    pub synonyms: Vec<String>,
}

/// The combined output of training: the original flat records plus the field
/// and word catalogs built over them. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingArtifact {
    pub records: Vec<FlatRecord>,
    pub fields: IndexMap<String, FieldEntry>,
    pub words: IndexMap<String, u64>,
}

impl TrainingArtifact {
    /// Build an artifact from flattened records.
    ///
    /// Fields and words are cataloged in first-seen order. Errors with
    /// [`Error::InvalidInput`] when the record list is empty.
    pub fn build(records: Vec<FlatRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::InvalidInput(
                "JSON document produced no records".to_string(),
            ));
        }

        info!(records = records.len(), "training started");

        let mut fields: IndexMap<String, FieldEntry> = IndexMap::new();
        for record in &records {
            for name in record.field_names() {
                if !fields.contains_key(name) {
                    let entry = FieldEntry {
                        name: name.to_string(),
                        code: scalar_code(name),
                        data_type: infer_data_type(&records, name),
                        synonyms: generate_synonyms(name),
                    };
                    debug!(field = name, code = entry.code, data_type = ?entry.data_type, "field cataloged");
                    fields.insert(name.to_string(), entry);
                }
            }
        }

        let mut words: IndexMap<String, u64> = IndexMap::new();
        for record in &records {
            for (_, value) in record.iter() {
                for token in value.split(TOKEN_DELIMITERS).filter(|t| !t.is_empty()) {
                    let token = lowercase(token);
                    if !words.contains_key(&token) {
                        let code = scalar_code(&token);
                        words.insert(token, code);
                    }
                }
            }
        }

        info!(
            fields = fields.len(),
            words = words.len(),
            "training complete"
        );

        Ok(Self {
            records,
            fields,
            words,
        })
    }

    #[inline]
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    #[inline]
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

/// Infer a field's type from the first record carrying it, trying
/// int → double → bool → datetime and falling back to string.
///
/// The sample is not re-verified against other records; a field whose first
/// value parses as an integer is numeric for the whole artifact.
fn infer_data_type(records: &[FlatRecord], field: &str) -> DataType {
    let Some(sample) = records.iter().find_map(|r| r.get(field)) else {
        return DataType::String;
    };

    if sample.parse::<i64>().is_ok() {
        DataType::Int
    } else if sample.parse::<f64>().is_ok() {
        DataType::Double
    } else if sample.eq_ignore_ascii_case("true") || sample.eq_ignore_ascii_case("false") {
        DataType::Bool
    } else if parses_as_datetime(sample) {
        DataType::DateTime
    } else {
        DataType::String
    }
}

fn parses_as_datetime(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || NaiveDate::parse_from_str(value, "%d.%m.%Y").is_ok()
        || NaiveDate::parse_from_str(value, "%d/%m/%Y").is_ok()
}

/// Synonym set for a field name: the normalized name itself plus the alias
/// lists of every table key that matches by substring in either direction.
fn generate_synonyms(field: &str) -> Vec<String> {
    let normalized = normalize(field);
    let mut synonyms = vec![normalized.clone()];

    for (key, aliases) in SYNONYM_TABLE {
        let key_normalized = normalize(key);
        if normalized.contains(&key_normalized) || key_normalized.contains(&normalized) {
            for alias in *aliases {
                if !synonyms.iter().any(|s| s == alias) {
                    synonyms.push((*alias).to_string());
                }
            }
        }
    }

    synonyms
}
