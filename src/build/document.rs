use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

/// The marker line that opens and closes a front matter block.
const DELIMITER: &str = "---";

// =============================================================================
// Source documents
// =============================================================================

/// A markdown file read from the input directory.
///
/// Immutable once read; the pipeline derives everything else from it.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Full path of the file on disk
    pub path: PathBuf,
    /// The file contents, exactly as read
    pub raw_text: String,
}

impl SourceDocument {
    /// Read a document from disk.
    pub fn read(path: &Path) -> std::io::Result<Self> {
        let raw_text = std::fs::read_to_string(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            raw_text,
        })
    }

    /// The file name without its directory (e.g., "hello.md").
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Title derived from the file name, used when the front matter has none.
    /// "getting-started.md" -> "Getting Started"
    pub fn fallback_title(&self) -> String {
        let name = self.file_name();
        let stem = name.strip_suffix(".md").unwrap_or(&name);
        let title = title_from_stem(stem);
        if title.is_empty() {
            "Untitled".to_string()
        } else {
            title
        }
    }
}

/// "getting-started" -> "Getting Started". Words are separated by `-`, `_`
/// or spaces; runs of separators collapse to one space.
fn title_from_stem(stem: &str) -> String {
    let mut title = String::with_capacity(stem.len());
    for word in stem.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !title.is_empty() {
            title.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            title.extend(first.to_uppercase());
            title.push_str(chars.as_str());
        }
    }
    title
}

// =============================================================================
// Front matter
// =============================================================================

/// Metadata parsed from a document's front matter.
///
/// Keys are kept sorted so that anything iterating the mapping
/// (templates included) sees a stable order.
pub type Metadata = BTreeMap<String, Value>;

#[derive(thiserror::Error, Debug)]
pub enum FrontMatterError {
    #[error("front matter opened with '---' but never closed")]
    Unterminated,

    #[error("invalid YAML in front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("front matter must be a mapping, found {found}")]
    NotAMapping { found: &'static str },

    #[error("front matter key must be a string, number or boolean, found {key}")]
    InvalidKey { key: &'static str },
}

/// Result of splitting front matter from markdown content.
#[derive(Debug, Default, PartialEq)]
pub struct ParsedContent {
    /// The parsed metadata (empty if the document has no front matter)
    pub metadata: Metadata,
    /// The markdown content after the front matter block
    pub body: String,
}

/// Split a document into front matter and markdown body.
///
/// Front matter is a YAML mapping between two `---` lines, the first of
/// which must be the very first line of the document:
///
/// ```markdown
/// ---
/// title: My Page
/// tags: [rust, docs]
/// ---
/// # Content starts here
/// ```
///
/// A document that does not open with the delimiter is returned untouched
/// with empty metadata. A document consisting of nothing but the opening
/// delimiter yields empty metadata and an empty body.
pub fn parse_front_matter(raw: &str) -> Result<ParsedContent, FrontMatterError> {
    let mut lines = raw.split_inclusive('\n');

    let opens_with_delimiter = lines.next().is_some_and(is_delimiter);
    if !opens_with_delimiter {
        return Ok(ParsedContent {
            metadata: Metadata::new(),
            body: raw.to_string(),
        });
    }

    let header_start = raw.find('\n').map(|i| i + 1).unwrap_or(raw.len());
    if raw[header_start..].trim().is_empty() {
        return Ok(ParsedContent::default());
    }

    let mut offset = header_start;
    for line in lines {
        if is_delimiter(line) {
            let metadata = parse_metadata(&raw[header_start..offset])?;
            let body = raw[offset + line.len()..].to_string();
            return Ok(ParsedContent { metadata, body });
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated)
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Parse the text between the delimiters into a metadata mapping.
fn parse_metadata(header: &str) -> Result<Metadata, FrontMatterError> {
    if header.trim().is_empty() {
        return Ok(Metadata::new());
    }

    match serde_yaml::from_str::<Value>(header)? {
        // A header holding only comments parses as null
        Value::Null => Ok(Metadata::new()),
        Value::Mapping(mapping) => mapping
            .into_iter()
            .map(|(key, value)| metadata_key(key).map(|key| (key, value)))
            .collect(),
        other => Err(FrontMatterError::NotAMapping {
            found: value_kind(&other),
        }),
    }
}

/// Scalar keys are stringified; YAML allows `1: one` or `true: yes`.
fn metadata_key(key: Value) -> Result<String, FrontMatterError> {
    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(FrontMatterError::InvalidKey {
            key: value_kind(&other),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
