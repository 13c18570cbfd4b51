//! Liquid-style template engine with pluggable tags.
//!
//! This crate provides an [`Engine`] that parses `{% tag %}` and
//! `{{ variable }}` syntax and dispatches every tag occurrence to a handler
//! registered in an explicit [`TagRegistry`].
//!
//! # Architecture
//!
//! Tags are handled in two phases:
//!
//! 1. **Configure** ([`TagHandler::configure`]): runs once per tag occurrence
//!    when the template is parsed, with the tag name and raw arguments.
//!
//! 2. **Render** ([`TagHandler::render`]): runs every time the parsed
//!    [`Template`] is rendered, with that render's [`RenderContext`].
//!
//! The registry is built up front and handed to the engine; there is no
//! process-wide registration. Besides registered tags the parser understands
//! `{% raw %}`, `{% comment %}` and the `{%-`/`-%}` whitespace-control markers.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use tk_template::{Engine, RenderContext, TagError, TagHandler, TagInvocation, TagRegistry};
//!
//! struct Byline {
//!     author: String,
//! }
//!
//! impl TagHandler for Byline {
//!     fn configure(invocation: &TagInvocation) -> Result<Self, TagError> {
//!         Ok(Self { author: invocation.markup.raw().to_owned() })
//!     }
//!
//!     fn render(&self, _ctx: &RenderContext<'_>) -> String {
//!         format!("<p class=\"byline\">By {}</p>", self.author)
//!     }
//! }
//!
//! let registry = TagRegistry::new().with_tag::<Byline>("byline").unwrap();
//! let engine = Engine::new(registry);
//!
//! let vars = json!({ "title": "Council vote" });
//! let ctx = RenderContext::new(vars.as_object().unwrap());
//! let html = engine.render_str("<h1>{{ title }}</h1>{% byline Jo Doe %}", &ctx).unwrap();
//! assert_eq!(html, "<h1>Council vote</h1><p class=\"byline\">By Jo Doe</p>");
//! ```

mod context;
mod engine;
mod error;
mod markup;
mod parser;
mod registry;
mod tag;
mod template;

pub use context::RenderContext;
pub use engine::{Engine, EngineOptions};
pub use error::{RegistryError, TagError, TemplateError};
pub use markup::TagMarkup;
pub use registry::TagRegistry;
pub use tag::{TagHandler, TagInvocation};
pub use template::Template;
