//! Render context.
//!
//! Carries template variables and source information into a render.

use std::path::Path;

use serde_json::{Map, Value};

/// Context provided to every tag handler and `{{ variable }}` lookup during a render.
///
/// The context is borrowed for the duration of a single render, so one
/// compiled template can be rendered against many contexts, from many threads.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tk_template::RenderContext;
///
/// let vars = json!({ "page": { "title": "Draft" } });
/// let ctx = RenderContext::new(vars.as_object().unwrap());
///
/// assert_eq!(ctx.lookup("page.title"), Some(&json!("Draft")));
/// assert_eq!(ctx.lookup("page.missing"), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Template variables.
    pub variables: &'a Map<String, Value>,
    /// Path to the template being rendered (if known).
    pub source_path: Option<&'a Path>,
}

impl<'a> RenderContext<'a> {
    /// Create a context over the given variables.
    #[must_use]
    pub fn new(variables: &'a Map<String, Value>) -> Self {
        Self {
            variables,
            source_path: None,
        }
    }

    /// Set the source path.
    #[must_use]
    pub fn with_source_path(mut self, path: &'a Path) -> Self {
        self.source_path = Some(path);
        self
    }

    /// Resolve a dotted variable path (`page.title`, `items.0`).
    ///
    /// Numeric segments index into arrays. Returns `None` if any segment is missing.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&'a Value> {
        let mut segments = path.split('.');
        let mut current = self.variables.get(segments.next()?)?;

        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }

        Some(current)
    }
}

/// Render a variable value as output text.
///
/// Strings are emitted as-is, `null` as nothing, everything else as JSON.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
