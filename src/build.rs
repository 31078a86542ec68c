mod builder;
pub mod document;
pub mod markdown;
mod paths;
pub mod pipeline;
mod placeholder;
pub mod render;
mod source;

pub use builder::{BuildResult, Builder};
