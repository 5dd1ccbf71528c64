//! Keyword index with frequency-ranked occurrence lists and a top-5 "OR" query.

pub mod error;
pub mod index;
pub mod query;
pub mod ranked;
pub mod snapshot;
pub mod tokenizer;

pub use error::{IndexError, Result};
pub use index::{load_manifest, DocumentKeywords, KeywordIndex, Occurrence};
pub use query::{merge_top, QueryEngine, TOP_MATCHES};
pub use ranked::RankedList;
pub use tokenizer::NoiseWords;
