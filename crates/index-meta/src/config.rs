use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_METADATA_FILE_NAME: &str = "metadata.xml";

pub const DIR_ENV: &str = "INDEX_META_DIR";
pub const FILE_ENV: &str = "INDEX_META_FILE";

/// Where the metadata side-file lives.
///
/// An empty `directory` means the current working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataStoreConfig {
    pub directory: PathBuf,
    pub file_name: String,
}

impl Default for MetadataStoreConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::new(),
            file_name: DEFAULT_METADATA_FILE_NAME.to_string(),
        }
    }
}

impl MetadataStoreConfig {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Reads `INDEX_META_DIR` / `INDEX_META_FILE`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = lookup(DIR_ENV).filter(|v| !v.trim().is_empty()) {
            config.directory = PathBuf::from(dir);
        }
        if let Some(name) = lookup(FILE_ENV).filter(|v| !v.trim().is_empty()) {
            config.file_name = name;
        }
        config
    }

    pub fn has_directory(&self) -> bool {
        !self.directory.as_os_str().is_empty()
    }

    pub fn metadata_path(&self) -> PathBuf {
        metadata_path_in(&self.directory, &self.file_name)
    }
}

pub(crate) fn metadata_path_in(directory: &Path, file_name: &str) -> PathBuf {
    if directory.as_os_str().is_empty() {
        PathBuf::from(file_name)
    } else {
        directory.join(file_name)
    }
}
