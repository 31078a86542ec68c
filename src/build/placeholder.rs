//! Placeholder discovery for permissive template rendering.
//!
//! Tera refuses to render `{{ metadata.title }}` when the context has no
//! `metadata.title`. Pages built from hand-written front matter routinely
//! leave fields out, so every variable path a template mentions is recorded
//! when the template is loaded, and any path missing from a page's context
//! is filled with an empty stand-in before rendering.
//!
//! The stand-in depends on how the template uses the path:
//!
//! | usage                                  | filled with |
//! |----------------------------------------|-------------|
//! | `{{ x }}`, `{% if x %}`, `x \| default` | `null`      |
//! | `x \| upper` and other filters          | `""`        |
//! | `{% for v in x %}`, `x \| join`         | `[]`        |
//! | `{% for k, v in x %}`, `x \| get`       | `{}`        |
//!
//! Null is kept wherever Tera accepts it, since it is the only value the
//! `default` filter replaces. Paths tested with `is defined` always get
//! null; the page template treats null as undefined.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

/// `{{ ... }}` and `{% ... %}` tags. Comments (`{# #}`) are not scanned.
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{-?(.*?)-?\}\}|\{%-?(.*?)-?%\}").expect("Invalid tag regex")
});

/// Quoted string literals inside a tag.
static STRING_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""[^"]*"|'[^']*'|`[^`]*`"#).expect("Invalid string literal regex")
});

/// A dotted variable path such as `metadata.author.name`.
static VARIABLE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z0-9_]+)*").expect("Invalid path regex")
});

/// `for v in x` or `for k, v in x`; group 1 is present for key-value loops,
/// group 2 is the container.
static FOR_LOOP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*for\s+[A-Za-z_][A-Za-z0-9_]*\s*(,\s*[A-Za-z_][A-Za-z0-9_]*\s*)?\bin\s+([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z0-9_]+)*)",
    )
    .expect("Invalid for loop regex")
});

/// `is defined`, `is not undefined` and friends, right after a path.
static DEFINED_TEST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^is\s+(?:not\s+)?(?:defined|undefined)\b").expect("Invalid defined test regex")
});

/// Filters that only accept arrays.
const ARRAY_FILTERS: &[&str] = &[
    "join", "first", "last", "nth", "sort", "unique", "slice", "group_by", "filter", "map",
    "concat",
];

/// How a template uses a path, ordered by how much structure its stand-in
/// needs. A path used several ways gets the stand-in of the greatest usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
enum Usage {
    #[default]
    Plain,
    Filtered,
    List,
    Map,
}

impl Usage {
    /// Work out the usage from the tag text following a path.
    fn from_following(rest: &str) -> Self {
        let Some(filter) = rest.strip_prefix('|') else {
            return Usage::Plain;
        };
        let name = filter
            .trim_start()
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .next()
            .unwrap_or_default();

        match name {
            "default" => Usage::Plain,
            "get" => Usage::Map,
            name if ARRAY_FILTERS.contains(&name) => Usage::List,
            _ => Usage::Filtered,
        }
    }
}

/// The set of variable paths referenced by a template, stored as a tree of
/// path segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placeholders {
    children: BTreeMap<String, Placeholders>,
    usage: Usage,
    tested: bool,
}

impl Placeholders {
    /// Collect the variable paths referenced inside the tags of `source`.
    ///
    /// The scan is lexical: keywords, filter names and loop variables are
    /// recorded too. Filling those is harmless since Tera resolves them
    /// before it ever consults the context.
    pub fn scan(source: &str) -> Self {
        let mut placeholders = Self::default();

        for tag in TAG.captures_iter(source) {
            let (inner, is_statement) = match (tag.get(1), tag.get(2)) {
                (Some(expression), _) => (expression.as_str(), false),
                (None, Some(statement)) => (statement.as_str(), true),
                (None, None) => continue,
            };
            let inner = STRING_LITERAL.replace_all(inner, " ");

            let container = is_statement
                .then(|| FOR_LOOP.captures(&inner))
                .flatten()
                .and_then(|caps| {
                    let usage = if caps.get(1).is_some() {
                        Usage::Map
                    } else {
                        Usage::List
                    };
                    caps.get(2).map(|path| (path.start(), usage))
                });

            for path in VARIABLE_PATH.find_iter(&inner) {
                // Skip the fractional part of number literals such as `1.5`
                if inner[..path.start()].ends_with('.') {
                    continue;
                }

                let rest = inner[path.end()..].trim_start();
                let usage = match container {
                    Some((start, usage)) if start == path.start() => usage,
                    _ => Usage::from_following(rest),
                };
                let tested = DEFINED_TEST.is_match(rest);

                placeholders.insert(path.as_str().split('.'), usage, tested);
            }
        }

        placeholders
    }

    fn insert<'a>(&mut self, segments: impl Iterator<Item = &'a str>, usage: Usage, tested: bool) {
        let mut node = self;
        for segment in segments {
            node = node.children.entry(segment.to_string()).or_default();
        }
        node.usage = node.usage.max(usage);
        node.tested |= tested;
    }

    /// Returns true if the template mentions the given dotted path.
    #[cfg(test)]
    pub fn contains(&self, path: &str) -> bool {
        let mut node = self;
        for segment in path.split('.') {
            match node.children.get(segment) {
                Some(child) => node = child,
                None => return false,
            }
        }
        true
    }

    /// Fill every recorded path missing from `context` with its stand-in.
    ///
    /// Intermediate segments are created as empty objects. Values already
    /// present are never replaced, and paths that run through a non-object
    /// value are left alone.
    pub fn fill_missing(&self, context: &mut Map<String, Value>) {
        for (key, child) in &self.children {
            let value = context
                .entry(key.clone())
                .or_insert_with(|| child.stand_in());
            if let Value::Object(map) = value {
                child.fill_missing(map);
            }
        }
    }

    fn stand_in(&self) -> Value {
        if !self.children.is_empty() {
            return Value::Object(Map::new());
        }
        if self.tested {
            return Value::Null;
        }
        match self.usage {
            Usage::Plain => Value::Null,
            Usage::Filtered => Value::String(String::new()),
            Usage::List => Value::Array(Vec::new()),
            Usage::Map => Value::Object(Map::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn filled(template: &str) -> Value {
        let mut context = json!({ "metadata": {} });
        Placeholders::scan(template).fill_missing(context.as_object_mut().unwrap());
        context
    }

    #[test]
    fn test_scan_variable_blocks() {
        let placeholders =
            Placeholders::scan("<title>{{ metadata.title }}</title>{{- content -}}");
        assert!(placeholders.contains("metadata.title"));
        assert!(placeholders.contains("metadata"));
        assert!(placeholders.contains("content"));
        assert!(!placeholders.contains("title"));
    }

    #[test]
    fn test_scan_statements_and_filters() {
        let placeholders = Placeholders::scan(
            r#"{% if metadata.author.name %}{{ metadata.author.name | upper }}{% endif %}
{% for tag in metadata.tags %}{{ tag }}{% endfor %}"#,
        );
        assert!(placeholders.contains("metadata.author.name"));
        assert!(placeholders.contains("metadata.tags"));
        assert!(placeholders.contains("upper"));
    }

    #[test]
    fn test_scan_ignores_text_comments_and_strings() {
        let placeholders = Placeholders::scan(
            r#"metadata.outside {# metadata.commented #} {{ metadata.x | default(value="metadata.quoted") }} {{ 1.5 }}"#,
        );
        assert!(placeholders.contains("metadata.x"));
        assert!(!placeholders.contains("metadata.outside"));
        assert!(!placeholders.contains("metadata.commented"));
        assert!(!placeholders.contains("metadata.quoted"));
        assert!(!placeholders.contains("5"));
    }

    #[test]
    fn test_fill_missing_adds_nulls() {
        let context = filled("{{ metadata.title }} {{ metadata.author.name }} {{ extra }}");

        assert_eq!(
            context,
            json!({
                "metadata": { "title": null, "author": { "name": null } },
                "extra": null,
            })
        );
    }

    #[test]
    fn test_fill_missing_by_usage() {
        let context = filled(
            r#"{% for tag in metadata.tags %}{% endfor %}
{%- for name, url in metadata.links -%}{% endfor %}
{{ metadata.title | upper }} {{ metadata.authors | join(sep=", ") }}
{{ metadata.extra | get(key="x", default="") }} {{ metadata.summary | default(value="none") }}"#,
        );

        let metadata = &context["metadata"];
        assert_eq!(metadata["tags"], json!([]));
        assert_eq!(metadata["links"], json!({}));
        assert_eq!(metadata["title"], json!(""));
        assert_eq!(metadata["authors"], json!([]));
        assert_eq!(metadata["extra"], json!({}));
        assert_eq!(metadata["summary"], Value::Null);
    }

    #[test]
    fn test_fill_missing_most_demanding_usage_wins() {
        let context = filled(
            "{{ metadata.tags }} {% for t in metadata.tags | reverse %}{% endfor %} {{ metadata.title }} {{ metadata.title | lower }}",
        );
        assert_eq!(context["metadata"]["tags"], json!([]));
        assert_eq!(context["metadata"]["title"], json!(""));
    }

    #[test]
    fn test_fill_missing_defined_tests_stay_null() {
        let context = filled(
            "{% if metadata.title is defined %}{{ metadata.title | upper }}{% endif %}{% if metadata.draft is not undefined %}{% endif %}",
        );
        assert_eq!(context["metadata"]["title"], Value::Null);
        assert_eq!(context["metadata"]["draft"], Value::Null);
    }

    #[test]
    fn test_fill_missing_keeps_existing_values() {
        let placeholders = Placeholders::scan(
            "{{ metadata.title | upper }} {{ metadata.tags.first }} {% for x in metadata.list %}{% endfor %}",
        );
        let mut context =
            json!({ "metadata": { "title": "Kept", "tags": ["a", "b"], "list": null } });
        let expected = context.clone();

        placeholders.fill_missing(context.as_object_mut().unwrap());

        assert_eq!(context, expected);
    }
}
