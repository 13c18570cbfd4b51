//! Compiled templates.

use std::fmt;

use crate::context::display_value;
use crate::parser::{self, Node};
use crate::{EngineOptions, RenderContext, TagHandler, TagInvocation, TagRegistry, TemplateError};

enum Compiled {
    Text(String),
    Output(String),
    Tag {
        name: String,
        handler: Box<dyn TagHandler>,
    },
}

/// A parsed template, ready to render any number of times.
///
/// Every tag occurrence was configured once at parse time; rendering only
/// calls [`TagHandler::render`].
pub struct Template {
    nodes: Vec<Compiled>,
    warnings: Vec<String>,
}

impl Template {
    pub(crate) fn compile(
        source: &str,
        registry: &TagRegistry,
        options: &EngineOptions,
    ) -> Result<Self, TemplateError> {
        let parsed = parser::parse(source)?;
        let mut nodes = Vec::with_capacity(parsed.len());
        let mut warnings = Vec::new();

        for node in parsed {
            match node {
                Node::Text(text) => nodes.push(Compiled::Text(text.to_owned())),
                Node::Output { path } => nodes.push(Compiled::Output(path.to_owned())),
                Node::Tag {
                    name,
                    markup,
                    line,
                    source,
                } => {
                    let invocation = TagInvocation::new(name, markup, line);
                    match registry.configure(&invocation) {
                        Some(Ok(handler)) => nodes.push(Compiled::Tag {
                            name: invocation.name,
                            handler,
                        }),
                        Some(Err(err)) => {
                            return Err(TemplateError::Configure {
                                name: invocation.name,
                                line,
                                source: err,
                            });
                        }
                        None if options.strict_tags => {
                            return Err(TemplateError::UnknownTag {
                                name: invocation.name,
                                line,
                            });
                        }
                        None => {
                            tracing::warn!(tag = name, line, "Unknown tag left in output");
                            warnings.push(format!("line {line}: unknown tag '{name}'"));
                            nodes.push(Compiled::Text(source.to_owned()));
                        }
                    }
                }
            }
        }

        tracing::debug!(
            nodes = nodes.len(),
            warnings = warnings.len(),
            "Template parsed"
        );
        Ok(Self { nodes, warnings })
    }

    /// Render the template against a context.
    ///
    /// Missing variables render as an empty string.
    #[must_use]
    pub fn render(&self, ctx: &RenderContext<'_>) -> String {
        let mut output = String::new();

        for node in &self.nodes {
            match node {
                Compiled::Text(text) => output.push_str(text),
                Compiled::Output(path) => {
                    if let Some(value) = ctx.lookup(path) {
                        output.push_str(&display_value(value));
                    }
                }
                Compiled::Tag { handler, .. } => output.push_str(&handler.render(ctx)),
            }
        }

        output
    }

    /// Names of the tags used by this template, in source order.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(|node| match node {
            Compiled::Tag { name, .. } => Some(name.as_str()),
            _ => None,
        })
    }

    /// Warnings generated while parsing (unknown tags in lenient mode).
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("nodes", &self.nodes.len())
            .field("tags", &self.tag_names().collect::<Vec<_>>())
            .field("warnings", &self.warnings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TagError;
    use pretty_assertions::assert_eq;
    use serde_json::{Map, Value, json};

    struct TestStar;

    impl TagHandler for TestStar {
        fn configure(_invocation: &TagInvocation) -> Result<Self, TagError> {
            Ok(Self)
        }

        fn render(&self, _ctx: &RenderContext<'_>) -> String {
            "*".to_owned()
        }
    }

    struct TestGreet {
        who: String,
    }

    impl TagHandler for TestGreet {
        fn configure(invocation: &TagInvocation) -> Result<Self, TagError> {
            let who = invocation
                .markup
                .positional()
                .first()
                .cloned()
                .ok_or_else(|| TagError::new("greet needs a name"))?;
            Ok(Self { who })
        }

        fn render(&self, ctx: &RenderContext<'_>) -> String {
            let greeting = ctx
                .lookup("greeting")
                .and_then(Value::as_str)
                .unwrap_or("Hello");
            format!("{greeting}, {}", self.who)
        }
    }

    fn registry() -> TagRegistry {
        TagRegistry::new()
            .with_tag::<TestStar>("star")
            .unwrap()
            .with_tag::<TestGreet>("greet")
            .unwrap()
    }

    fn render(source: &str, vars: &Value) -> String {
        let template = Template::compile(source, &registry(), &EngineOptions::default()).unwrap();
        template.render(&RenderContext::new(vars.as_object().unwrap()))
    }

    #[test]
    fn test_text_and_tags() {
        assert_eq!(render("a{% star %}b{% star %}", &json!({})), "a*b*");
    }

    #[test]
    fn test_tag_reads_context() {
        assert_eq!(
            render("{% greet Ada %}", &json!({ "greeting": "Hi" })),
            "Hi, Ada"
        );
        assert_eq!(render("{% greet Ada %}", &json!({})), "Hello, Ada");
    }

    #[test]
    fn test_variable_output() {
        assert_eq!(
            render(
                "{{ page.title }} ({{ page.words }}){{ missing }}",
                &json!({ "page": { "title": "Draft", "words": 120 } })
            ),
            "Draft (120)"
        );
    }

    #[test]
    fn test_configure_error() {
        let err = Template::compile("\n{% greet %}", &registry(), &EngineOptions::default())
            .unwrap_err();
        assert_eq!(
            err,
            TemplateError::Configure {
                name: "greet".to_owned(),
                line: 2,
                source: TagError::new("greet needs a name"),
            }
        );
    }

    #[test]
    fn test_unknown_tag_lenient() {
        let template = Template::compile(
            "x {%  nope  a %} y",
            &registry(),
            &EngineOptions::default(),
        )
        .unwrap();

        let vars = Map::new();
        assert_eq!(
            template.render(&RenderContext::new(&vars)),
            "x {%  nope  a %} y"
        );
        assert_eq!(template.warnings(), ["line 1: unknown tag 'nope'"]);
    }

    #[test]
    fn test_unknown_tag_strict() {
        let options = EngineOptions { strict_tags: true };
        let err = Template::compile("ok\n\n{% nope %}", &registry(), &options).unwrap_err();
        assert_eq!(
            err,
            TemplateError::UnknownTag {
                name: "nope".to_owned(),
                line: 3
            }
        );
    }

    #[test]
    fn test_stray_end_tag_is_unknown() {
        let template =
            Template::compile("{% endraw %}", &registry(), &EngineOptions::default()).unwrap();
        assert_eq!(template.warnings().len(), 1);
    }

    #[test]
    fn test_tag_names() {
        let template = Template::compile(
            "{% star %}{% greet Bo %}{% star %}",
            &registry(),
            &EngineOptions::default(),
        )
        .unwrap();
        assert_eq!(
            template.tag_names().collect::<Vec<_>>(),
            ["star", "greet", "star"]
        );
    }

    #[test]
    fn test_render_is_repeatable() {
        let template =
            Template::compile("{% star %}", &registry(), &EngineOptions::default()).unwrap();
        let vars = Map::new();
        let ctx = RenderContext::new(&vars);
        assert_eq!(template.render(&ctx), template.render(&ctx));
    }
}
