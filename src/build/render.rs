use std::path::{Path, PathBuf};

use serde::Serialize;
use tera::{Context, Tera};

use super::document::Metadata;
use super::placeholder::Placeholders;

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("template '{name}' not found in {}: {reason}", .search_path.display())]
    TemplateNotFound {
        name: String,
        search_path: PathBuf,
        reason: String,
    },

    #[error("failed to build template context: {0}")]
    Context(#[from] serde_json::Error),

    #[error("template error: {0}")]
    Render(#[from] tera::Error),
}

/// A page template loaded from the template directory.
///
/// Loaded once per build and shared by every page. Rendering takes `&self`
/// and builds a fresh context each time, so nothing carries over between
/// pages.
#[derive(Debug)]
pub struct Template {
    name: String,
    tera: Tera,
    placeholders: Placeholders,
}

impl Template {
    /// Load the template `name` from `template_dir`.
    ///
    /// Fails with [`RenderError::TemplateNotFound`] if the file is missing or
    /// is not a valid Tera template.
    pub fn load(template_dir: &Path, name: &str) -> Result<Self, RenderError> {
        let not_found = |reason: String| RenderError::TemplateNotFound {
            name: name.to_string(),
            search_path: template_dir.to_path_buf(),
            reason,
        };

        let path = template_dir.join(name);
        if !path.is_file() {
            return Err(not_found("no such file".to_string()));
        }

        let source = std::fs::read_to_string(&path).map_err(|e| not_found(e.to_string()))?;

        let mut tera = Tera::default();
        // Pages embed pre-rendered HTML, so nothing is escaped
        tera.autoescape_on(vec![]);
        tera.register_tester("defined", is_defined);
        tera.register_tester("undefined", is_undefined);
        tera.add_raw_template(name, &source)
            .map_err(|e| not_found(describe_tera_error(&e)))?;

        tracing::debug!(template = %path.display(), "loaded template");

        Ok(Self {
            name: name.to_string(),
            tera,
            placeholders: Placeholders::scan(&source),
        })
    }

    /// The name the template was loaded under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render a page with the given context.
    ///
    /// Variables the template mentions but the context lacks render as
    /// empty instead of failing.
    pub fn render(&self, context: &PageContext) -> Result<String, RenderError> {
        let mut value = serde_json::to_value(context)?;
        if let serde_json::Value::Object(map) = &mut value {
            self.placeholders.fill_missing(map);
        }

        let tera_context = Context::from_value(value)?;
        Ok(self.tera.render(&self.name, &tera_context)?)
    }
}

/// Missing placeholders are filled with null, so null counts as undefined.
fn is_defined(value: Option<&tera::Value>, _args: &[tera::Value]) -> tera::Result<bool> {
    Ok(value.is_some_and(|v| !v.is_null()))
}

fn is_undefined(value: Option<&tera::Value>, args: &[tera::Value]) -> tera::Result<bool> {
    is_defined(value, args).map(|defined| !defined)
}

/// Tera puts the interesting part of a parse failure in the error source.
fn describe_tera_error(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Context passed to page templates.
#[derive(Debug, Serialize)]
pub struct PageContext<'a> {
    /// Rendered HTML of the document body
    pub content: &'a str,
    /// Front matter, accessible as `metadata.*` in templates
    pub metadata: &'a Metadata,
    /// Information derived from the source file
    pub page: PageInfo,
}

/// Information about the current page.
#[derive(Debug, Clone, Serialize)]
pub struct PageInfo {
    /// `metadata.title` when it is a string, otherwise derived from the file name
    pub title: String,
    /// Input file name (e.g., "hello.md")
    pub source: String,
    /// Output file name (e.g., "hello.html")
    pub url: String,
}

#[cfg(test)]
mod tests {
    use serde_yaml::Value;

    use super::*;

    const BASE: &str = r#"<!DOCTYPE html>
<html>
<head><title>{{ metadata.title }}</title></head>
<body>
{{ content }}
</body>
</html>
"#;

    fn template_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, source) in files {
            std::fs::write(dir.path().join(name), source).unwrap();
        }
        dir
    }

    fn page_info() -> PageInfo {
        PageInfo {
            title: "Hello".to_string(),
            source: "hello.md".to_string(),
            url: "hello.html".to_string(),
        }
    }

    fn metadata(pairs: &[(&str, &str)]) -> Metadata {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect()
    }

    #[test]
    fn test_load_missing_template() {
        let dir = template_dir(&[]);
        let err = Template::load(dir.path(), "base.html").unwrap_err();
        match err {
            RenderError::TemplateNotFound {
                name, search_path, ..
            } => {
                assert_eq!(name, "base.html");
                assert_eq!(search_path, dir.path());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_invalid_template() {
        let dir = template_dir(&[("base.html", "{{ content ")]);
        let err = Template::load(dir.path(), "base.html").unwrap_err();
        assert!(matches!(err, RenderError::TemplateNotFound { .. }));
    }

    #[test]
    fn test_render_binds_content_and_metadata() {
        let dir = template_dir(&[("base.html", BASE)]);
        let template = Template::load(dir.path(), "base.html").unwrap();
        assert_eq!(template.name(), "base.html");

        let metadata = metadata(&[("title", "Test")]);
        let html = template
            .render(&PageContext {
                content: "<p>Body text</p>\n",
                metadata: &metadata,
                page: page_info(),
            })
            .unwrap();

        assert!(html.contains("<title>Test</title>"));
        assert!(html.contains("<p>Body text</p>"));
    }

    #[test]
    fn test_render_missing_placeholders_are_empty() {
        let dir = template_dir(&[(
            "base.html",
            "[{{ metadata.title }}][{{ metadata.author.name }}][{{ nothing }}]{{ content }}",
        )]);
        let template = Template::load(dir.path(), "base.html").unwrap();

        let metadata = Metadata::new();
        let html = template
            .render(&PageContext {
                content: "<h1>Hi</h1>",
                metadata: &metadata,
                page: page_info(),
            })
            .unwrap();

        assert_eq!(html, "[][][]<h1>Hi</h1>");
    }

    fn render_empty(source: &str) -> Result<String, RenderError> {
        let dir = template_dir(&[("base.html", source)]);
        let template = Template::load(dir.path(), "base.html").unwrap();
        let metadata = Metadata::new();
        template.render(&PageContext {
            content: "",
            metadata: &metadata,
            page: page_info(),
        })
    }

    #[test]
    fn test_render_loop_over_missing_value_is_empty() {
        assert_eq!(
            render_empty("[{% for t in metadata.tags %}{{ t }}{% endfor %}]").unwrap(),
            "[]"
        );
        assert_eq!(
            render_empty("[{% for k, v in metadata.links %}{{ k }}{% endfor %}]").unwrap(),
            "[]"
        );
        assert_eq!(
            render_empty("[{% for t in metadata.tags %}{{ t }}{% else %}none{% endfor %}]")
                .unwrap(),
            "[none]"
        );
    }

    #[test]
    fn test_render_filter_on_missing_value_is_empty() {
        assert_eq!(
            render_empty("[{{ metadata.title | upper }}]").unwrap(),
            "[]"
        );
        assert_eq!(
            render_empty(r#"[{{ metadata.authors | join(sep=", ") }}]"#).unwrap(),
            "[]"
        );
        assert_eq!(
            render_empty(r#"[{{ metadata.title | default(value="Untitled") }}]"#).unwrap(),
            "[Untitled]"
        );
    }

    #[test]
    fn test_render_missing_value_is_not_defined() {
        assert_eq!(
            render_empty("[{% if metadata.title is defined %}yes{% else %}no{% endif %}]").unwrap(),
            "[no]"
        );
        assert_eq!(
            render_empty(
                "[{% if metadata.title is defined %}{{ metadata.title | upper }}{% endif %}]"
            )
            .unwrap(),
            "[]"
        );
        assert_eq!(
            render_empty("[{% if metadata.title is undefined %}yes{% endif %}]").unwrap(),
            "[yes]"
        );
    }

    #[test]
    fn test_render_present_value_is_defined() {
        let dir = template_dir(&[(
            "base.html",
            "{% if metadata.title is defined %}{{ metadata.title | upper }}{% endif %}",
        )]);
        let template = Template::load(dir.path(), "base.html").unwrap();
        let metadata = metadata(&[("title", "Test")]);
        let html = template
            .render(&PageContext {
                content: "",
                metadata: &metadata,
                page: page_info(),
            })
            .unwrap();
        assert_eq!(html, "TEST");
    }

    #[test]
    fn test_render_does_not_leak_between_pages() {
        let dir = template_dir(&[("base.html", "{{ metadata.title }}|{{ metadata.author }}")]);
        let template = Template::load(dir.path(), "base.html").unwrap();

        let first = metadata(&[("title", "One"), ("author", "Ann")]);
        let html = template
            .render(&PageContext {
                content: "",
                metadata: &first,
                page: page_info(),
            })
            .unwrap();
        assert_eq!(html, "One|Ann");

        let second = metadata(&[("title", "Two")]);
        let html = template
            .render(&PageContext {
                content: "",
                metadata: &second,
                page: page_info(),
            })
            .unwrap();
        assert_eq!(html, "Two|");
    }

    #[test]
    fn test_title_change_only_touches_placeholder() {
        let dir = template_dir(&[("base.html", BASE)]);
        let template = Template::load(dir.path(), "base.html").unwrap();

        let render = |title: &str| {
            let metadata = metadata(&[("title", title)]);
            template
                .render(&PageContext {
                    content: "<p>same</p>",
                    metadata: &metadata,
                    page: page_info(),
                })
                .unwrap()
        };

        let a = render("Alpha");
        let b = render("Beta");
        assert_ne!(a, b);
        assert_eq!(a.replacen("Alpha", "Beta", 1), b);
    }

    #[test]
    fn test_render_does_not_escape_content() {
        let dir = template_dir(&[("page.html", "{{ content }}")]);
        let template = Template::load(dir.path(), "page.html").unwrap();

        let metadata = Metadata::new();
        let html = template
            .render(&PageContext {
                content: "<em>raw</em>",
                metadata: &metadata,
                page: page_info(),
            })
            .unwrap();
        assert_eq!(html, "<em>raw</em>");
    }

    #[test]
    fn test_render_page_info_and_nested_metadata() {
        let dir = template_dir(&[(
            "base.html",
            "{{ page.title }} ({{ page.source }} -> {{ page.url }}){% for tag in metadata.tags %} #{{ tag }}{% endfor %}",
        )]);
        let template = Template::load(dir.path(), "base.html").unwrap();

        let mut metadata = Metadata::new();
        metadata.insert(
            "tags".to_string(),
            serde_yaml::from_str::<Value>("[rust, docs]").unwrap(),
        );
        let html = template
            .render(&PageContext {
                content: "",
                metadata: &metadata,
                page: page_info(),
            })
            .unwrap();
        assert_eq!(html, "Hello (hello.md -> hello.html) #rust #docs");
    }
}
