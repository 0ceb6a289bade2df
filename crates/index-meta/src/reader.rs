use crate::error::{ParseError, ParseResult};
use crate::triple::MetadataTriple;
use crate::writer::{ANALYZER_ELEMENT, SIMILARITY_ELEMENT, VERSION_ELEMENT};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Which recognized element the parser is currently inside.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ActiveField {
    Idle,
    Version,
    Analyzer,
    Similarity,
}

impl ActiveField {
    fn from_element(name: &[u8]) -> Option<Self> {
        if name == VERSION_ELEMENT.as_bytes() {
            Some(Self::Version)
        } else if name == ANALYZER_ELEMENT.as_bytes() {
            Some(Self::Analyzer)
        } else if name == SIMILARITY_ELEMENT.as_bytes() {
            Some(Self::Similarity)
        } else {
            None
        }
    }

    fn slot(self, triple: &mut MetadataTriple) -> Option<&mut String> {
        match self {
            Self::Idle => None,
            Self::Version => Some(&mut triple.version),
            Self::Analyzer => Some(&mut triple.analyzer),
            Self::Similarity => Some(&mut triple.similarity),
        }
    }
}

/// Reads the metadata side-file at `path`.
///
/// Elements other than the three recognized ones are skipped; a recognized
/// element that never appears leaves its field empty.
pub fn read_metadata(path: &Path) -> ParseResult<MetadataTriple> {
    let file = File::open(path).map_err(|source| ParseError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let triple = parse_metadata(BufReader::new(file))?;
    if !triple.is_complete() {
        log::debug!(
            "Index metadata {} is missing {:?}",
            path.display(),
            triple.missing_fields()
        );
    }
    Ok(triple)
}

/// Like [`read_metadata`], but any failure is logged and reported as `None`.
pub fn read_metadata_or_absent(path: &Path) -> Option<MetadataTriple> {
    match read_metadata(path) {
        Ok(triple) => Some(triple),
        Err(err) => {
            log::warn!("No index metadata read from {}: {err}", path.display());
            None
        }
    }
}

pub fn parse_metadata_str(xml: &str) -> ParseResult<MetadataTriple> {
    parse_metadata(xml.as_bytes())
}

fn parse_metadata<R: BufRead>(source: R) -> ParseResult<MetadataTriple> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();

    let mut triple = MetadataTriple::default();
    let mut active = ActiveField::Idle;
    let mut region_depth = 0usize;
    let mut depth = 0usize;
    let mut saw_root = false;
    let mut root_closed = false;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(start) => {
                if root_closed {
                    return Err(content_after_root());
                }
                depth += 1;
                saw_root = true;
                if active == ActiveField::Idle {
                    if let Some(field) = ActiveField::from_element(start.name().as_ref()) {
                        active = field;
                        region_depth = depth;
                        text.clear();
                    }
                }
            }
            Event::End(_) => {
                if active != ActiveField::Idle && depth == region_depth {
                    if let Some(slot) = active.slot(&mut triple) {
                        *slot = text.trim().to_string();
                    }
                    active = ActiveField::Idle;
                }
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    root_closed = true;
                }
            }
            Event::Empty(_) => {
                if root_closed {
                    return Err(content_after_root());
                }
                if depth == 0 {
                    root_closed = true;
                }
                saw_root = true;
            }
            Event::Text(chunk) if depth == 0 => {
                if !chunk.iter().all(u8::is_ascii_whitespace) {
                    return Err(ParseError::Malformed(
                        "text outside the root element".to_string(),
                    ));
                }
            }
            Event::CData(_) if depth == 0 => {
                return Err(ParseError::Malformed(
                    "CDATA outside the root element".to_string(),
                ));
            }
            Event::Text(chunk) if active != ActiveField::Idle => {
                text.push_str(&chunk.unescape()?);
            }
            Event::CData(chunk) if active != ActiveField::Idle => {
                let raw = std::str::from_utf8(&chunk).map_err(|err| {
                    ParseError::Malformed(format!("CDATA is not valid UTF-8: {err}"))
                })?;
                text.push_str(raw);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(ParseError::Malformed("no root element".to_string()));
    }
    if depth != 0 {
        return Err(ParseError::Malformed(format!(
            "{depth} element(s) left unclosed at end of file"
        )));
    }
    Ok(triple)
}

fn content_after_root() -> ParseError {
    ParseError::Malformed("element after the root element".to_string())
}
