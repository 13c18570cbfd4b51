//! Tag handler trait.
//!
//! Tags use Liquid syntax: `{% name markup %}`

use crate::{RenderContext, TagError, TagMarkup};

/// One occurrence of a tag in template source, as seen at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInvocation {
    /// Tag name as written (e.g. "tk").
    pub name: String,
    /// Argument text following the name.
    pub markup: TagMarkup,
    /// Line where the tag appears (1-indexed).
    pub line: usize,
}

impl TagInvocation {
    /// Create an invocation, parsing the raw markup.
    #[must_use]
    pub fn new(name: impl Into<String>, raw_markup: &str, line: usize) -> Self {
        Self {
            name: name.into(),
            markup: TagMarkup::parse(raw_markup),
            line,
        }
    }
}

/// Handler for a custom tag: `{% name markup %}`
///
/// Handling happens in two steps:
///
/// 1. [`configure`](Self::configure) runs once per occurrence when the template
///    is parsed, receiving the tag name and its raw arguments.
/// 2. [`render`](Self::render) runs every time the compiled template is
///    rendered, receiving that render's [`RenderContext`].
///
/// # Thread Safety
///
/// Handlers are `Send + Sync`: a compiled template may be rendered from several
/// threads at once, so `render` takes `&self` and must not rely on interior state.
///
/// # Example
///
/// ```
/// use tk_template::{RenderContext, TagError, TagHandler, TagInvocation};
///
/// struct Shout {
///     text: String,
/// }
///
/// impl TagHandler for Shout {
///     fn configure(invocation: &TagInvocation) -> Result<Self, TagError> {
///         if invocation.markup.is_empty() {
///             return Err(TagError::new("shout needs some text"));
///         }
///         Ok(Self { text: invocation.markup.raw().to_uppercase() })
///     }
///
///     fn render(&self, _ctx: &RenderContext<'_>) -> String {
///         format!("<strong>{}</strong>", self.text)
///     }
/// }
/// ```
pub trait TagHandler: Send + Sync {
    /// Build the handler for one tag occurrence.
    ///
    /// Returning an error aborts parsing of the template.
    fn configure(invocation: &TagInvocation) -> Result<Self, TagError>
    where
        Self: Sized;

    /// Produce the output that replaces the tag.
    fn render(&self, ctx: &RenderContext<'_>) -> String;
}
