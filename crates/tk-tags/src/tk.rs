//! The `tk` placeholder tag.

use tk_template::{RenderContext, TagError, TagHandler, TagInvocation, TagMarkup};

/// Name the tag is registered under.
pub const TK_TAG_NAME: &str = "tk";

/// Markup every `{% tk %}` renders to.
pub const TK_MARKER: &str = r#"<span class="yellow bold">TK</span>"#;

/// Placeholder for content still to come: `{% tk %}`
///
/// Renders [`TK_MARKER`] regardless of its arguments or the render context.
/// Anything written after the tag name is kept (see [`markup`](Self::markup))
/// but never shows up in the output.
///
/// # Example
///
/// ```
/// use serde_json::Map;
/// use tk_tags::{TK_MARKER, TkTag};
/// use tk_template::{RenderContext, TagHandler, TagInvocation};
///
/// let tag = TkTag::configure(&TagInvocation::new("tk", "quote from the mayor", 1)).unwrap();
///
/// let vars = Map::new();
/// assert_eq!(tag.render(&RenderContext::new(&vars)), TK_MARKER);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TkTag {
    markup: TagMarkup,
}

impl TkTag {
    /// Argument text the tag was written with.
    #[must_use]
    pub fn markup(&self) -> &TagMarkup {
        &self.markup
    }
}

impl TagHandler for TkTag {
    fn configure(invocation: &TagInvocation) -> Result<Self, TagError> {
        Ok(Self {
            markup: invocation.markup.clone(),
        })
    }

    fn render(&self, _ctx: &RenderContext<'_>) -> String {
        TK_MARKER.to_owned()
    }
}
