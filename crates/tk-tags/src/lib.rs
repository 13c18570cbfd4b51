//! TK placeholder tag for Liquid-style templates.
//!
//! `{% tk %}` marks content that is still to come. Wherever it appears it
//! renders as [`TK_MARKER`], a highlighted `TK` span, so unfinished spots stand
//! out on a rendered page:
//!
//! ```
//! use serde_json::Map;
//! use tk_template::{Engine, RenderContext, TagRegistry};
//!
//! let mut registry = TagRegistry::new();
//! tk_tags::register(&mut registry).unwrap();
//! let engine = Engine::new(registry);
//!
//! let vars = Map::new();
//! let html = engine
//!     .render_str("Turnout was {% tk final figure %} percent.", &RenderContext::new(&vars))
//!     .unwrap();
//! assert_eq!(html, r#"Turnout was <span class="yellow bold">TK</span> percent."#);
//! ```

mod setup;
mod tk;

pub use setup::{BUNDLED_TAGS, SetupError, engine_from_config, register, register_bundled};
pub use tk::{TK_MARKER, TK_TAG_NAME, TkTag};
