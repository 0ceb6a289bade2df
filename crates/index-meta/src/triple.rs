use crate::normalize::normalize_label;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Source of the three labels recorded for an index build.
///
/// Implemented by whatever owns the analyzer, similarity function and version
/// objects; only their textual identities are consumed here.
pub trait ConfigSnapshot {
    fn version_label(&self) -> String;
    fn analyzer_label(&self) -> String;
    fn similarity_label(&self) -> String;
}

/// Version, analyzer and similarity labels of one index configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
pub struct MetadataTriple {
    pub version: String,
    pub analyzer: String,
    pub similarity: String,
}

impl MetadataTriple {
    pub fn new(
        version: impl Into<String>,
        analyzer: impl Into<String>,
        similarity: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            analyzer: analyzer.into(),
            similarity: similarity.into(),
        }
    }

    /// Captures a snapshot with the analyzer label normalized.
    pub fn from_snapshot(snapshot: &dyn ConfigSnapshot) -> Self {
        Self::new(
            snapshot.version_label(),
            normalize_label(&snapshot.analyzer_label()),
            snapshot.similarity_label(),
        )
    }

    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.analyzer = normalize_label(&self.analyzer).to_string();
        self
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Names of the fields that are still empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.version.is_empty() {
            missing.push("version");
        }
        if self.analyzer.is_empty() {
            missing.push("analyzer");
        }
        if self.similarity.is_empty() {
            missing.push("similarity");
        }
        missing
    }
}

impl ConfigSnapshot for MetadataTriple {
    fn version_label(&self) -> String {
        self.version.clone()
    }

    fn analyzer_label(&self) -> String {
        self.analyzer.clone()
    }

    fn similarity_label(&self) -> String {
        self.similarity.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FakeConfig;

    impl ConfigSnapshot for FakeConfig {
        fn version_label(&self) -> String {
            "LUCENE_50".to_string()
        }

        fn analyzer_label(&self) -> String {
            "org.apache.lucene.analysis.en.EnglishAnalyzer@6d06d69c".to_string()
        }

        fn similarity_label(&self) -> String {
            "BM25(k1=1.2,b=0.75)".to_string()
        }
    }

    #[test]
    fn from_snapshot_normalizes_analyzer_only() {
        let triple = MetadataTriple::from_snapshot(&FakeConfig);
        assert_eq!(
            triple,
            MetadataTriple::new(
                "LUCENE_50",
                "org.apache.lucene.analysis.en.EnglishAnalyzer",
                "BM25(k1=1.2,b=0.75)"
            )
        );
    }

    #[test]
    fn similarity_is_not_normalized() {
        let triple = MetadataTriple::new("v", "A@1", "Sim@2").normalized();
        assert_eq!(triple.analyzer, "A");
        assert_eq!(triple.similarity, "Sim@2");
    }

    #[test]
    fn reports_missing_fields() {
        let triple = MetadataTriple::new("LUCENE_50", "", "");
        assert!(!triple.is_complete());
        assert_eq!(triple.missing_fields(), vec!["analyzer", "similarity"]);
        assert!(MetadataTriple::new("a", "b", "c").is_complete());
    }
}
