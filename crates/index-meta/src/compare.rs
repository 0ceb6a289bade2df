use crate::config::MetadataStoreConfig;
use crate::error::LoadError;
use crate::reader::read_metadata;
use crate::triple::MetadataTriple;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MismatchReason {
    MetadataMissing,
    VersionMismatch,
    AnalyzerMismatch,
    SimilarityMismatch,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct CompatibilityReport {
    pub compatible: bool,
    #[serde(default)]
    pub mismatches: Vec<MismatchReason>,
}

#[must_use]
pub fn assess_compatibility(
    index: Option<&MetadataTriple>,
    search: &MetadataTriple,
) -> CompatibilityReport {
    let mut mismatches = Vec::new();

    match index {
        None => mismatches.push(MismatchReason::MetadataMissing),
        Some(index) => {
            if index.version != search.version {
                mismatches.push(MismatchReason::VersionMismatch);
            }
            if index.analyzer != search.analyzer {
                mismatches.push(MismatchReason::AnalyzerMismatch);
            }
            if index.similarity != search.similarity {
                mismatches.push(MismatchReason::SimilarityMismatch);
            }
        }
    }

    let compatible = mismatches.is_empty();
    CompatibilityReport {
        compatible,
        mismatches,
    }
}

/// Compares the configuration recorded at index time with the one used for search.
///
/// The search-time analyzer label is normalized on construction. The index-time
/// triple is only available after [`MetadataComparison::load_index_metadata`]
/// succeeds; until then every `same_*` predicate returns `false`.
#[derive(Debug, Clone)]
pub struct MetadataComparison {
    search: MetadataTriple,
    index: Option<MetadataTriple>,
    store: MetadataStoreConfig,
}

impl MetadataComparison {
    pub fn new(search: MetadataTriple, location: impl Into<PathBuf>) -> Self {
        Self::with_store(search, MetadataStoreConfig::new(location))
    }

    pub fn with_store(search: MetadataTriple, store: MetadataStoreConfig) -> Self {
        Self {
            search: search.normalized(),
            index: None,
            store,
        }
    }

    /// Search-time configuration that only knows its similarity function.
    pub fn for_similarity(similarity: impl Into<String>, location: impl Into<PathBuf>) -> Self {
        Self::new(MetadataTriple::new("", "", similarity), location)
    }

    /// Search-time configuration that only knows its analyzer and version.
    pub fn for_analyzer_and_version(
        analyzer: impl Into<String>,
        version: impl Into<String>,
        location: impl Into<PathBuf>,
    ) -> Self {
        Self::new(MetadataTriple::new(version, analyzer, ""), location)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.store.metadata_path()
    }

    /// Reads the index-time triple from `location/metadata.xml`.
    pub fn load_index_metadata(&mut self) -> Result<&MetadataTriple, LoadError> {
        let path = self.metadata_path();
        match read_metadata(&path) {
            Ok(triple) => Ok(self.index.insert(triple)),
            Err(err) => {
                log::warn!("No index metadata read from {}: {err}", path.display());
                Err(LoadError::Absent {
                    path,
                    reason: err.to_string(),
                })
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.index.is_some()
    }

    pub fn index_metadata(&self) -> Option<&MetadataTriple> {
        self.index.as_ref()
    }

    pub fn search_metadata(&self) -> &MetadataTriple {
        &self.search
    }

    pub fn index_version(&self) -> Option<&str> {
        self.index.as_ref().map(|t| t.version.as_str())
    }

    pub fn index_analyzer(&self) -> Option<&str> {
        self.index.as_ref().map(|t| t.analyzer.as_str())
    }

    pub fn index_similarity(&self) -> Option<&str> {
        self.index.as_ref().map(|t| t.similarity.as_str())
    }

    pub fn search_version(&self) -> &str {
        &self.search.version
    }

    pub fn search_analyzer(&self) -> &str {
        &self.search.analyzer
    }

    pub fn search_similarity(&self) -> &str {
        &self.search.similarity
    }

    pub fn same_version(&self) -> bool {
        self.index_version() == Some(self.search_version())
    }

    pub fn same_analyzer(&self) -> bool {
        self.index_analyzer() == Some(self.search_analyzer())
    }

    pub fn same_similarity(&self) -> bool {
        self.index_similarity() == Some(self.search_similarity())
    }

    pub fn assess(&self) -> CompatibilityReport {
        assess_compatibility(self.index.as_ref(), &self.search)
    }
}
