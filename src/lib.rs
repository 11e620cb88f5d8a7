//! Downsample - Blocking-Aware Down-Sampling for Entity Matching
//!
//! Reduces a pair of large tables (S and B) to small samples that still contain a
//! realistic mix of matching and non-matching record pairs, so that matchers can
//! be developed and labelled on a manageable subset.
//!
//! # Overview
//!
//! - **Tokenizing**: string-typed columns of a row are lower-cased, split on
//!   whitespace and stripped of English stop words
//! - **Indexing**: an inverted index maps every token of S to the S rows holding it
//! - **Probing**: each sampled B row looks up its tokens in the index and keeps up
//!   to `y / 2` hits ("positives"), topped up to `y` with random rows ("negatives")
//! - **Metadata**: table-level metadata (key column, foreign keys, provenance) is
//!   copied from each input table onto its sample through a [`Catalog`]
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use arrow::array::{Int64Array, StringArray};
//! use arrow::datatypes::{DataType, Field, Schema};
//! use downsample::{down_sample_with_config, InMemoryCatalog, SampleConfig, Table};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let schema = Arc::new(Schema::new(vec![
//!     Field::new("id", DataType::Int64, false),
//!     Field::new("title", DataType::Utf8, false),
//! ]));
//! let s_table = Table::try_new(schema.clone(), vec![
//!     Arc::new(Int64Array::from(vec![0, 1, 2, 3, 4, 5])),
//!     Arc::new(StringArray::from(vec![
//!         "acme laptop", "globex monitor", "acme mouse", "hooli dock", "stark cable", "acme dock",
//!     ])),
//! ])?;
//! let b_table = Table::try_new(schema, vec![
//!     Arc::new(Int64Array::from(vec![0, 1, 2])),
//!     Arc::new(StringArray::from(vec!["Acme Laptop 15in", "Hooli dock", "stark usb cable"])),
//! ])?;
//!
//! let mut catalog = InMemoryCatalog::new();
//! catalog.set_key(&s_table, "id")?;
//! catalog.set_key(&b_table, "id")?;
//!
//! let config = SampleConfig::new().with_seed(42);
//! let result = down_sample_with_config(&s_table, &b_table, 2, 2, &mut catalog, &config)?;
//!
//! assert_eq!(result.b_sample().len(), 2);
//! assert_eq!(catalog.key(result.s_sample().id()), Some("id"));
//! # Ok(())
//! # }
//! ```
//!
//! # Randomness
//!
//! Every random choice comes from one generator per call. Seed it through
//! [`SampleConfig::with_seed`] or pass your own to [`down_sample_with_rng`] to get
//! reproducible samples.
pub mod catalog;
pub mod errors;
pub mod index_structure;
pub mod sampling;
pub mod stop_words;
pub mod table;
pub mod tokenizer;
#[cfg(test)]
pub mod unit_tests;

// ============================================================================
// Public API
// ============================================================================

pub use crate::catalog::{Catalog, ForeignKeys, InMemoryCatalog, NoCatalog, TableProperties};
pub use crate::errors::{CatalogError, DownSampleError, Result};
pub use crate::index_structure::inverted_index::InvertedIndex;
pub use crate::sampling::config::SampleConfig;
pub use crate::sampling::down_sample::{
    down_sample, down_sample_with_config, down_sample_with_rng, DownSampleResult,
};
pub use crate::sampling::probe::{probe_index, ProbeResult, ProbeStats};
pub use crate::table::{Table, TableId};
pub use crate::tokenizer::{RowTokenizer, TokenSet};
