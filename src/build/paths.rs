//! Path conversion utilities.
//!
//! Output files sit flat in the output directory and are named after their
//! source file with the markdown extension swapped for `.html`. Names are
//! handled as `OsStr` throughout, so a file name that is not valid UTF-8 is
//! still a document.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Suffix identifying markdown documents.
pub const MARKDOWN_SUFFIX: &str = ".md";

/// Extension given to generated pages.
pub const HTML_EXTENSION: &str = "html";

/// Returns true if the file name marks a markdown document.
///
/// Matching is on the file name suffix and is case-sensitive.
pub fn is_markdown(file_name: &OsStr) -> bool {
    file_name
        .as_encoded_bytes()
        .ends_with(MARKDOWN_SUFFIX.as_bytes())
}

/// Convert a markdown file name to the name of its output page.
///
/// # Examples
/// ```ignore
/// output_file_name("hello.md") => Some("hello.html")
/// output_file_name("notes.v2.md") => Some("notes.v2.html")
/// output_file_name("style.css") => None
/// ```
pub fn output_file_name(file_name: &OsStr) -> Option<OsString> {
    if !is_markdown(file_name) {
        return None;
    }
    // A bare `.md` is a dotfile to `Path`, with no extension to swap
    if file_name == MARKDOWN_SUFFIX {
        return Some(OsString::from(format!(".{HTML_EXTENSION}")));
    }
    Some(
        Path::new(file_name)
            .with_extension(HTML_EXTENSION)
            .into_os_string(),
    )
}

/// Convert a source file path to its output path inside `output_dir`.
pub fn source_to_output_path(source: &Path, output_dir: &Path) -> Option<PathBuf> {
    output_file_name(source.file_name()?).map(|name| output_dir.join(name))
}
