//! # lexiq
//!
//! A lightweight lexical query engine: train it on an arbitrary nested JSON
//! document, then query it with free text.
//!
//! Training flattens the document into tabular records and builds a field
//! catalog (scalar codes, inferred types, bilingual synonym sets) plus a word
//! catalog over every value token. A query is interpreted by fuzzy-matching
//! its tokens against field synonyms (projection) and record values
//! (filtering), and answered with the matching records alongside a
//! SQL-flavored rendering of the inferred query.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! cargo install lexiq
//! lexiq --http-port 5055
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use lexiq::prelude::*;
//!
//! let document = serde_json::json!([
//!     {"ad": "Ali", "yaş": "30", "şehir": "Ankara"},
//!     {"ad": "Veli", "yaş": "25", "şehir": "İzmir"}
//! ]);
//!
//! let artifact = TrainingArtifact::build(flatten(&document)).unwrap();
//!
//! // "isim" resolves to the field "ad" through the synonym table,
//! // "ankara" binds a value filter on "şehir".
//! let result = search(&artifact, "ankara isim");
//! assert_eq!(result.interpretation, "SELECT ad WHERE şehir=Ankara");
//! assert_eq!(result.result_count(), 1);
//! ```
//!
//! ## Crate Structure
//!
//! lexiq is composed of several crates:
//!
//! - [`lexiq-core`](https://docs.rs/lexiq-core) - flattening, vocabulary
//!   training, query interpretation
//! - [`lexiq-storage`](https://docs.rs/lexiq-storage) - session registry and
//!   on-disk artifact persistence
//! - [`lexiq-api`](https://docs.rs/lexiq-api) - REST endpoints
//!
//! ## Features
//!
//! - **JSON Flattening**: arbitrary nesting, `parent_child` key joining,
//!   nested-array explosion
//! - **Fuzzy Matching**: Levenshtein similarity with Turkish diacritic
//!   folding
//! - **Query Interpretation**: free text in, projection + filters out
//! - **Session Slots**: per-session artifacts plus one durable slot

// Re-export core types
pub use lexiq_core::{
    flatten, search, tokenize,
    DataType, Error, FieldEntry, FlatRecord, QueryResult, Result, TrainingArtifact,
};

// Re-export storage
pub use lexiq_storage::{ArtifactFile, ArtifactStore, StoreStatus, TrainingStatus};

// Re-export API
pub use lexiq_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        flatten, search, tokenize,
        ArtifactStore, DataType, Error, FieldEntry, FlatRecord, QueryResult, Result,
        RestApi, TrainingArtifact,
    };
}

/// Text canonicalization and scoring primitives
pub mod text {
    pub use lexiq_core::text::{levenshtein, lowercase, normalize, scalar_code, similarity};
}
