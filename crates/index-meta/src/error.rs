use std::path::PathBuf;
use thiserror::Error;

pub type WriteResult<T> = std::result::Result<T, WriteError>;
pub type ParseResult<T> = std::result::Result<T, ParseError>;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("failed to create metadata directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove existing metadata file {}: {source}", .path.display())]
    RemoveExisting {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write metadata file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to open metadata file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed metadata file: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("no index metadata available at {}: {reason}", .path.display())]
    Absent { path: PathBuf, reason: String },
}
