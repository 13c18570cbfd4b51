//! Template engine.

use std::sync::Arc;

use crate::{RenderContext, TagRegistry, Template, TemplateError};

/// Parsing options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Reject templates that use unregistered tags.
    ///
    /// When `false`, unknown tags are left in the output verbatim and reported
    /// through [`Template::warnings`].
    ///
    /// Default: `false`
    pub strict_tags: bool,
}

/// Template engine bound to a tag registry.
///
/// The registry is fixed once the engine is built. Cloning an engine is cheap
/// and clones share the registry.
///
/// # Example
///
/// ```
/// use serde_json::Map;
/// use tk_template::{Engine, RenderContext, TagError, TagHandler, TagInvocation, TagRegistry};
///
/// struct Rule;
///
/// impl TagHandler for Rule {
///     fn configure(_invocation: &TagInvocation) -> Result<Self, TagError> { Ok(Self) }
///     fn render(&self, _ctx: &RenderContext<'_>) -> String { "<hr>".to_owned() }
/// }
///
/// let registry = TagRegistry::new().with_tag::<Rule>("rule").unwrap();
/// let engine = Engine::new(registry);
///
/// let vars = Map::new();
/// let html = engine.render_str("a{% rule %}b", &RenderContext::new(&vars)).unwrap();
/// assert_eq!(html, "a<hr>b");
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Arc<TagRegistry>,
    options: EngineOptions,
}

impl Engine {
    /// Create an engine with default options.
    #[must_use]
    pub fn new(registry: TagRegistry) -> Self {
        Self::with_options(registry, EngineOptions::default())
    }

    /// Create an engine with custom options.
    #[must_use]
    pub fn with_options(registry: TagRegistry, options: EngineOptions) -> Self {
        tracing::debug!(
            tags = registry.len(),
            strict_tags = options.strict_tags,
            "Template engine created"
        );
        Self {
            registry: Arc::new(registry),
            options,
        }
    }

    /// The registry this engine resolves tags against.
    #[must_use]
    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    /// The engine's options.
    #[must_use]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Parse template source, configuring every tag occurrence.
    pub fn parse(&self, source: &str) -> Result<Template, TemplateError> {
        Template::compile(source, &self.registry, &self.options)
    }

    /// Parse and render in one step.
    pub fn render_str(
        &self,
        source: &str,
        ctx: &RenderContext<'_>,
    ) -> Result<String, TemplateError> {
        Ok(self.parse(source)?.render(ctx))
    }
}
