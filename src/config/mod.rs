//! Configuration loading and types for quire.
//!
//! This module handles all aspects of configuration:
//! - Type definitions for config structures (`types`)
//! - Loading configs from files (`load`)

mod load;
mod types;

use std::path::PathBuf;

pub use types::SiteConfig;

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to encode config file path as a unicode string: {}", .0.display())]
    EncodePath(PathBuf),

    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to deserialize config: {0}")]
    Deserialize(#[from] config::ConfigError),

    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),
}
