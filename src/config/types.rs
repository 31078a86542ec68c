//! Configuration type definitions.
//!
//! These types are pure data - no I/O or complex logic.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// =============================================================================
// Site configuration
// =============================================================================

/// Everything a build needs to know, as read from `quire.yaml`.
///
/// ```yaml
/// input: content
/// output: public
/// template: page.html
/// template_dir: layouts
/// preview:
///   enabled: true
///   port: 4000
/// ```
///
/// Every field is optional; an empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Directory holding the markdown sources
    #[serde(default = "default_input")]
    pub input: PathBuf,
    /// Directory the generated pages are written to
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// File name of the page template, looked up in `template_dir`
    #[serde(default = "default_template")]
    pub template: String,
    /// Directory templates are loaded from
    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,
    #[serde(default)]
    pub preview: PreviewConfig,
}

fn default_input() -> PathBuf {
    PathBuf::from("input")
}

fn default_output() -> PathBuf {
    PathBuf::from("output")
}

fn default_template() -> String {
    "base.html".to_string()
}

fn default_template_dir() -> PathBuf {
    PathBuf::from("templates")
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            template: default_template(),
            template_dir: default_template_dir(),
            preview: PreviewConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Resolve relative directories against `base_path`.
    ///
    /// Paths in a config file are relative to the file, not to wherever
    /// the command happens to be run from.
    pub fn relative_to(mut self, base_path: &Path) -> Self {
        for path in [&mut self.input, &mut self.output, &mut self.template_dir] {
            if path.is_relative() {
                *path = base_path.join(&*path);
            }
        }
        self
    }
}

// =============================================================================
// Preview server configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Serve the output directory after building
    #[serde(default)]
    pub enabled: bool,
    /// Port to bind on localhost
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8000
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_port(),
        }
    }
}
