//! Template source parsing.
//!
//! Splits source into text, `{{ variable }}` outputs and `{% tag %}` nodes.
//! `{% raw %}` and `{% comment %}` blocks are resolved here and never reach
//! the registry.

use crate::TemplateError;
use crate::registry::{is_tag_name_char, is_valid_tag_name};

/// Parsed node borrowing from the template source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node<'a> {
    /// Literal text.
    Text(&'a str),
    /// Variable output: `{{ path }}`
    Output { path: &'a str },
    /// Tag: `{% name markup %}`
    Tag {
        name: &'a str,
        markup: &'a str,
        line: usize,
        /// The tag exactly as written, delimiters included.
        source: &'a str,
    },
}

/// Delimited section found in the source.
struct Delimited<'a> {
    /// Byte offset of the opening delimiter.
    start: usize,
    /// Byte offset just past the closing delimiter.
    end: usize,
    /// Content between the delimiters, without whitespace-control dashes.
    inner: &'a str,
    trim_before: bool,
    trim_after: bool,
}

/// Parse template source into nodes.
pub(crate) fn parse(source: &str) -> Result<Vec<Node<'_>>, TemplateError> {
    let mut parser = Parser {
        source,
        nodes: Vec::new(),
        line: 1,
        trim_next: false,
    };
    parser.run()?;
    Ok(parser.nodes)
}

struct Parser<'a> {
    source: &'a str,
    nodes: Vec<Node<'a>>,
    line: usize,
    /// Set by `-%}` / `-}}`: strip leading whitespace from the next text.
    trim_next: bool,
}

impl<'a> Parser<'a> {
    fn run(&mut self) -> Result<(), TemplateError> {
        let source = self.source;
        let mut pos = 0;

        while pos < source.len() {
            let Some(open) = find_open(&source[pos..]).map(|i| pos + i) else {
                self.push_text(&source[pos..]);
                break;
            };

            self.push_text(&source[pos..open]);
            self.advance_lines(pos, open);

            let is_tag = source[open..].starts_with("{%");
            let close = if is_tag { "%}" } else { "}}" };
            let delimited = delimited_at(source, open, close).ok_or(
                TemplateError::Unterminated {
                    delimiter: if is_tag { "{%" } else { "{{" },
                    line: self.line,
                },
            )?;

            if delimited.trim_before {
                self.trim_previous();
            }

            pos = if is_tag {
                self.tag(&delimited)?
            } else {
                self.nodes.push(Node::Output {
                    path: delimited.inner.trim(),
                });
                self.trim_next = delimited.trim_after;
                self.advance_lines(open, delimited.end);
                delimited.end
            };
        }

        Ok(())
    }

    /// Handle a `{% ... %}` section. Returns the offset to continue from.
    fn tag(&mut self, delimited: &Delimited<'a>) -> Result<usize, TemplateError> {
        let source = self.source;
        let line = self.line;
        let inner = delimited.inner.trim();
        if inner.is_empty() {
            return Err(TemplateError::EmptyTag { line });
        }

        let (name, markup) = split_name(inner);
        if !is_valid_tag_name(name) {
            let word = inner.split_whitespace().next().unwrap_or(inner);
            return Err(TemplateError::InvalidTagName {
                name: word.to_owned(),
                line,
            });
        }

        let block = match name {
            "raw" => Some("raw"),
            "comment" => Some("comment"),
            _ => None,
        };

        let Some(block) = block else {
            self.nodes.push(Node::Tag {
                name,
                markup,
                line,
                source: &source[delimited.start..delimited.end],
            });
            self.trim_next = delimited.trim_after;
            self.advance_lines(delimited.start, delimited.end);
            return Ok(delimited.end);
        };

        let end_name = if block == "raw" { "endraw" } else { "endcomment" };
        let end_tag = find_end_tag(source, delimited.end, end_name)
            .ok_or(TemplateError::UnclosedBlock { block, line })?;

        if block == "raw" {
            self.trim_next = delimited.trim_after;
            self.push_text(&source[delimited.end..end_tag.start]);
            if end_tag.trim_before {
                self.trim_previous();
            }
        }

        self.trim_next = end_tag.trim_after;
        self.advance_lines(delimited.start, end_tag.end);
        Ok(end_tag.end)
    }

    fn push_text(&mut self, text: &'a str) {
        let text = if self.trim_next {
            text.trim_start()
        } else {
            text
        };
        self.trim_next = false;
        if !text.is_empty() {
            self.nodes.push(Node::Text(text));
        }
    }

    /// Strip trailing whitespace from the preceding text node, for `{%-` / `{{-`.
    fn trim_previous(&mut self) {
        if let Some(Node::Text(text)) = self.nodes.last_mut() {
            *text = text.trim_end();
            if text.is_empty() {
                self.nodes.pop();
            }
        }
    }

    fn advance_lines(&mut self, from: usize, to: usize) {
        self.line += self.source[from..to].matches('\n').count();
    }
}

/// Find the next `{%` or `{{`.
fn find_open(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    bytes
        .windows(2)
        .position(|w| w[0] == b'{' && (w[1] == b'%' || w[1] == b'{'))
}

/// Read the delimited section whose opening delimiter starts at `open`.
fn delimited_at<'a>(source: &'a str, open: usize, close: &str) -> Option<Delimited<'a>> {
    let body_start = open + 2;
    let body_len = source[body_start..].find(close)?;
    let end = body_start + body_len + close.len();

    let mut inner = &source[body_start..body_start + body_len];
    let trim_before = inner.starts_with('-');
    if trim_before {
        inner = &inner[1..];
    }
    let trim_after = inner.ends_with('-');
    if trim_after {
        inner = &inner[..inner.len() - 1];
    }

    Some(Delimited {
        start: open,
        end,
        inner,
        trim_before,
        trim_after,
    })
}

/// Find the `{% end_name %}` tag closing a block body that starts at `from`.
fn find_end_tag<'a>(source: &'a str, from: usize, end_name: &str) -> Option<Delimited<'a>> {
    let mut cursor = from;

    while let Some(offset) = source[cursor..].find("{%") {
        let open = cursor + offset;
        let delimited = delimited_at(source, open, "%}")?;
        if split_name(delimited.inner.trim()).0 == end_name {
            return Some(delimited);
        }
        cursor = open + 2;
    }

    None
}

/// Split trimmed tag content into (name, markup).
///
/// The name is the leading run of name characters; everything after it is
/// markup, so `tk: note` is the tag `tk` with markup `: note`.
fn split_name(inner: &str) -> (&str, &str) {
    let end = inner
        .find(|c: char| !is_tag_name_char(c))
        .unwrap_or(inner.len());
    (&inner[..end], inner[end..].trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tag<'a>(name: &'a str, markup: &'a str, line: usize, source: &'a str) -> Node<'a> {
        Node::Tag {
            name,
            markup,
            line,
            source,
        }
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(parse("just text").unwrap(), vec![Node::Text("just text")]);
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_single_tag() {
        assert_eq!(
            parse("{% tk %}").unwrap(),
            vec![tag("tk", "", 1, "{% tk %}")]
        );
    }

    #[test]
    fn test_tag_with_markup() {
        assert_eq!(
            parse("a {%  tk some unused text  %} b").unwrap(),
            vec![
                Node::Text("a "),
                tag("tk", "some unused text", 1, "{%  tk some unused text  %}"),
                Node::Text(" b"),
            ]
        );
    }

    #[test]
    fn test_tag_without_spaces() {
        assert_eq!(parse("{%tk%}").unwrap(), vec![tag("tk", "", 1, "{%tk%}")]);
    }

    #[test]
    fn test_output() {
        assert_eq!(
            parse("Hi {{ page.author }}!").unwrap(),
            vec![
                Node::Text("Hi "),
                Node::Output {
                    path: "page.author"
                },
                Node::Text("!"),
            ]
        );
    }

    #[test]
    fn test_line_numbers() {
        let nodes = parse("one\n{% a %}\n\n{% b\n x %}\n{% c %}").unwrap();
        let lines: Vec<_> = nodes
            .iter()
            .filter_map(|n| match n {
                Node::Tag { name, line, .. } => Some((*name, *line)),
                _ => None,
            })
            .collect();
        assert_eq!(lines, vec![("a", 2), ("b", 4), ("c", 6)]);
    }

    #[test]
    fn test_whitespace_control() {
        assert_eq!(
            parse("a  \n{%- tk -%}\n  b").unwrap(),
            vec![
                Node::Text("a"),
                tag("tk", "", 2, "{%- tk -%}"),
                Node::Text("b")
            ]
        );
        assert_eq!(
            parse("x {{- v -}} y").unwrap(),
            vec![Node::Text("x"), Node::Output { path: "v" }, Node::Text("y")]
        );
    }

    #[test]
    fn test_trim_removes_whitespace_only_text() {
        assert_eq!(
            parse("{% a -%}   {% b %}").unwrap(),
            vec![tag("a", "", 1, "{% a -%}"), tag("b", "", 1, "{% b %}")]
        );
    }

    #[test]
    fn test_raw_block() {
        assert_eq!(
            parse("{% raw %}{% tk %} {{ x }}{% endraw %}!").unwrap(),
            vec![Node::Text("{% tk %} {{ x }}"), Node::Text("!")]
        );
    }

    #[test]
    fn test_raw_block_line_tracking() {
        let nodes = parse("{% raw %}\n\n{% endraw %}{% tk %}").unwrap();
        assert_eq!(nodes.last(), Some(&tag("tk", "", 3, "{% tk %}")));
    }

    #[test]
    fn test_comment_block() {
        assert_eq!(
            parse("a{% comment %} {% tk %} notes {% endcomment %}b").unwrap(),
            vec![Node::Text("a"), Node::Text("b")]
        );
    }

    #[test]
    fn test_unclosed_raw() {
        assert_eq!(
            parse("\n{% raw %}{% tk %}"),
            Err(TemplateError::UnclosedBlock {
                block: "raw",
                line: 2
            })
        );
    }

    #[test]
    fn test_unclosed_comment() {
        assert_eq!(
            parse("{% comment %}"),
            Err(TemplateError::UnclosedBlock {
                block: "comment",
                line: 1
            })
        );
    }

    #[test]
    fn test_unterminated_tag() {
        assert_eq!(
            parse("ok\n{% tk"),
            Err(TemplateError::Unterminated {
                delimiter: "{%",
                line: 2
            })
        );
        assert_eq!(
            parse("{{ x"),
            Err(TemplateError::Unterminated {
                delimiter: "{{",
                line: 1
            })
        );
    }

    #[test]
    fn test_empty_tag() {
        assert_eq!(parse("{% %}"), Err(TemplateError::EmptyTag { line: 1 }));
        assert_eq!(parse("{%- -%}"), Err(TemplateError::EmptyTag { line: 1 }));
    }

    #[test]
    fn test_invalid_tag_name() {
        assert_eq!(
            parse("{% @foo bar %}"),
            Err(TemplateError::InvalidTagName {
                name: "@foo".to_owned(),
                line: 1
            })
        );
        assert_eq!(
            parse("\n{% :tk %}"),
            Err(TemplateError::InvalidTagName {
                name: ":tk".to_owned(),
                line: 2
            })
        );
    }

    #[test]
    fn test_name_ends_at_punctuation() {
        assert_eq!(
            parse("{% tk: final figure %}").unwrap(),
            vec![tag("tk", ": final figure", 1, "{% tk: final figure %}")]
        );
        assert_eq!(
            parse("{%tk, needs quote%}").unwrap(),
            vec![tag("tk", ", needs quote", 1, "{%tk, needs quote%}")]
        );
        assert_eq!(
            parse("{% foo@bar %}").unwrap(),
            vec![tag("foo", "@bar", 1, "{% foo@bar %}")]
        );
    }

    #[test]
    fn test_single_braces_are_text() {
        assert_eq!(
            parse("fn() { 1 } %}").unwrap(),
            vec![Node::Text("fn() { 1 } %}")]
        );
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("tk"), ("tk", ""));
        assert_eq!(split_name("tk  a b"), ("tk", "a b"));
        assert_eq!(split_name("tk\nnext"), ("tk", "next"));
        assert_eq!(split_name("tk:x"), ("tk", ":x"));
        assert_eq!(split_name("to-come_2.v"), ("to-come_2", ".v"));
        assert_eq!(split_name("\"tk\""), ("", "\"tk\""));
    }
}
