//! # lexiq Core
//!
//! Core library for the lexiq lexical query engine.
//!
//! This crate provides the three-stage pipeline:
//!
//! - [`flatten`](flatten::flatten) - turns an arbitrary nested JSON value
//!   into a list of [`FlatRecord`]s
//! - [`TrainingArtifact`] - the field and word catalogs built over those
//!   records ("vectorization" via a deterministic scalar hash, synonym
//!   expansion, type inference)
//! - [`search`](query::search) - interprets a free-text query against an
//!   artifact and returns the matching records
//!
//! ## Example
//!
//! ```rust
//! use lexiq_core::{flatten, search, TrainingArtifact};
//!
//! let document = serde_json::json!([
//!     {"ad": "Ali", "yaş": "30"},
//!     {"ad": "Veli", "yaş": "25"}
//! ]);
//!
//! let records = flatten(&document);
//! let artifact = TrainingArtifact::build(records).unwrap();
//!
//! let result = search(&artifact, "yaş 30");
//! assert_eq!(result.result_count(), 1);
//! ```

pub mod error;
pub mod flatten;
pub mod query;
pub mod record;
pub mod text;
pub mod vocab;

pub use error::{Error, Result};
pub use flatten::flatten;
pub use query::{search, tokenize, QueryResult};
pub use record::FlatRecord;
pub use text::{levenshtein, normalize, scalar_code, similarity};
pub use vocab::{DataType, FieldEntry, TrainingArtifact};
