//! Default pipeline stages.
//!
//! The standard document processing pipeline consists of:
//!
//! 1. **FrontMatterStage** - Split the YAML front matter from the markdown body
//! 2. **MarkdownStage** - Convert the markdown body to HTML
//! 3. **TemplateStage** - Wrap the HTML in the page template
//! 4. **WriteStage** - Write the final page to the output directory

mod front_matter;
mod markdown;
mod template;
mod write;

pub use front_matter::FrontMatterStage;
pub use markdown::MarkdownStage;
pub use template::TemplateStage;
pub use write::WriteStage;
