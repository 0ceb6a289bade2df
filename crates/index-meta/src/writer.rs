use crate::config::{metadata_path_in, MetadataStoreConfig};
use crate::error::{WriteError, WriteResult};
use crate::triple::{ConfigSnapshot, MetadataTriple};
use quick_xml::escape::escape;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub(crate) const ROOT_ELEMENT: &str = "indexinfo";
pub(crate) const VERSION_ELEMENT: &str = "uses-version";
pub(crate) const ANALYZER_ELEMENT: &str = "uses-analyzer";
pub(crate) const SIMILARITY_ELEMENT: &str = "uses-similarity";

/// Renders the side-file document. Labels are written as given, XML-escaped.
pub fn render_metadata(triple: &MetadataTriple) -> String {
    let mut out = String::with_capacity(
        256 + triple.version.len() + triple.analyzer.len() + triple.similarity.len(),
    );
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n\n");
    out.push_str(&format!("<{ROOT_ELEMENT}>\n\n"));
    for (element, text) in [
        (VERSION_ELEMENT, &triple.version),
        (ANALYZER_ELEMENT, &triple.analyzer),
        (SIMILARITY_ELEMENT, &triple.similarity),
    ] {
        out.push_str(&format!("\t<{element}>\n"));
        out.push_str(&format!("\t\t{}\n", escape(text.as_str())));
        out.push_str(&format!("\t</{element}>\n\n"));
    }
    out.push_str(&format!("</{ROOT_ELEMENT}>"));
    out
}

/// Writes `directory/metadata.xml` for the given configuration and marks it read-only.
///
/// An empty `directory` targets the current working directory.
///
/// An existing file is removed before the new one is written, so a failure
/// after that point leaves no metadata file behind.
pub fn write_metadata(snapshot: &dyn ConfigSnapshot, directory: &Path) -> WriteResult<PathBuf> {
    write_metadata_with(&MetadataStoreConfig::new(directory), snapshot)
}

pub fn write_metadata_with(
    config: &MetadataStoreConfig,
    snapshot: &dyn ConfigSnapshot,
) -> WriteResult<PathBuf> {
    let path = metadata_path_in(&config.directory, &config.file_name);

    if config.has_directory() && !config.directory.exists() {
        match fs::create_dir(&config.directory) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {}
            Err(source) => {
                return Err(WriteError::CreateDir {
                    path: config.directory.clone(),
                    source,
                })
            }
        }
    }

    if path.exists() {
        fs::remove_file(&path).map_err(|source| WriteError::RemoveExisting {
            path: path.clone(),
            source,
        })?;
    }

    let triple = MetadataTriple::from_snapshot(snapshot);
    let body = render_metadata(&triple);
    write_file(&path, &body).map_err(|source| WriteError::Io {
        path: path.clone(),
        source,
    })?;

    mark_read_only(&path);
    log::info!("Wrote index metadata to {}", path.display());
    Ok(path)
}

/// Like [`write_metadata`], but failures are logged instead of returned.
///
/// Returns whether the file was written.
pub fn write_metadata_best_effort(snapshot: &dyn ConfigSnapshot, directory: &Path) -> bool {
    log_write_outcome(write_metadata(snapshot, directory))
}

fn log_write_outcome(result: WriteResult<PathBuf>) -> bool {
    match result {
        Ok(_) => true,
        Err(err) => {
            log::error!("Index metadata was not written: {err}");
            false
        }
    }
}

fn write_file(path: &Path, body: &str) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(body.as_bytes())?;
    out.flush()
}

fn mark_read_only(path: &Path) {
    let result = fs::metadata(path).and_then(|meta| {
        let mut perms = meta.permissions();
        perms.set_readonly(true);
        fs::set_permissions(path, perms)
    });
    if let Err(err) = result {
        log::warn!(
            "Failed to mark index metadata {} read-only: {err}",
            path.display()
        );
    }
}

/// Holds the indexing configuration and destination between writes.
#[derive(Debug, Clone)]
pub struct MetadataWriter {
    triple: MetadataTriple,
    config: MetadataStoreConfig,
}

impl MetadataWriter {
    pub fn new(snapshot: &dyn ConfigSnapshot, config: MetadataStoreConfig) -> Self {
        Self {
            triple: MetadataTriple::from_snapshot(snapshot),
            config,
        }
    }

    pub fn set_snapshot(&mut self, snapshot: &dyn ConfigSnapshot) {
        self.triple = MetadataTriple::from_snapshot(snapshot);
    }

    pub fn set_directory(&mut self, directory: impl Into<PathBuf>) {
        self.config.directory = directory.into();
    }

    pub fn config(&self) -> &MetadataStoreConfig {
        &self.config
    }

    pub fn triple(&self) -> &MetadataTriple {
        &self.triple
    }

    pub fn write(&self) -> WriteResult<PathBuf> {
        write_metadata_with(&self.config, &self.triple)
    }

    pub fn write_best_effort(&self) -> bool {
        log_write_outcome(self.write())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_fixed_layout() {
        let triple = MetadataTriple::new(
            "LUCENE_50",
            "org.apache.lucene.analysis.en.EnglishAnalyzer",
            "DefaultSimilarity",
        );
        let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n\n\
<indexinfo>\n\n\
\t<uses-version>\n\t\tLUCENE_50\n\t</uses-version>\n\n\
\t<uses-analyzer>\n\t\torg.apache.lucene.analysis.en.EnglishAnalyzer\n\t</uses-analyzer>\n\n\
\t<uses-similarity>\n\t\tDefaultSimilarity\n\t</uses-similarity>\n\n\
</indexinfo>";
        assert_eq!(render_metadata(&triple), expected);
    }

    #[test]
    fn escapes_markup_in_labels() {
        let triple = MetadataTriple::new("v<1>", "A&B", "Sim");
        let rendered = render_metadata(&triple);
        assert!(rendered.contains("\t\tv&lt;1&gt;\n"));
        assert!(rendered.contains("\t\tA&amp;B\n"));
    }

    #[test]
    fn setters_replace_snapshot_and_directory() {
        let mut writer = MetadataWriter::new(
            &MetadataTriple::new("LUCENE_46", "GreekAnalyzer@1", "BM25"),
            MetadataStoreConfig::default(),
        );
        writer.set_snapshot(&MetadataTriple::new("LUCENE_50", "EnglishAnalyzer@2", "Default"));
        writer.set_directory("index-dir");

        assert_eq!(
            writer.triple(),
            &MetadataTriple::new("LUCENE_50", "EnglishAnalyzer", "Default")
        );
        assert_eq!(
            writer.config().metadata_path(),
            Path::new("index-dir").join("metadata.xml")
        );
    }
}
