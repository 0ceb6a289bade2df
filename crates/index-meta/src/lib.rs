//! # Index Meta
//!
//! Records which analyzer, version and similarity function built a search
//! index, and checks them against the configuration used at search time.
//!
//! ## Flow
//!
//! ```text
//! Indexer config ──> write_metadata ──> <dir>/metadata.xml (read-only)
//!                                              │
//! Search config ──> MetadataComparison ──> read_metadata
//!                          │
//!                          └─> same_version / same_analyzer / same_similarity
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use index_meta::{write_metadata, MetadataComparison, MetadataTriple};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let indexed = MetadataTriple::new("LUCENE_50", "EnglishAnalyzer@1b6d", "DefaultSimilarity");
//!     write_metadata(&indexed, Path::new("books-index"))?;
//!
//!     let search = MetadataTriple::new("LUCENE_50", "EnglishAnalyzer@4554", "BM25Similarity");
//!     let mut cmp = MetadataComparison::new(search, "books-index");
//!     cmp.load_index_metadata()?;
//!     assert!(cmp.same_analyzer());
//!     assert!(!cmp.same_similarity());
//!     Ok(())
//! }
//! ```

mod compare;
mod config;
mod error;
mod normalize;
mod reader;
mod triple;
mod writer;

pub use compare::{assess_compatibility, CompatibilityReport, MetadataComparison, MismatchReason};
pub use config::{MetadataStoreConfig, DEFAULT_METADATA_FILE_NAME, DIR_ENV, FILE_ENV};
pub use error::{LoadError, ParseError, ParseResult, WriteError, WriteResult};
pub use normalize::{normalize_label, IDENTITY_SEPARATOR};
pub use reader::{parse_metadata_str, read_metadata, read_metadata_or_absent};
pub use triple::{ConfigSnapshot, MetadataTriple};
pub use writer::{
    render_metadata, write_metadata, write_metadata_best_effort, write_metadata_with,
    MetadataWriter,
};
