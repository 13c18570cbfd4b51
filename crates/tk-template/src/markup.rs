//! Tag markup parsing.
//!
//! Splits the raw text after a tag name (`{% name markup %}`) into positional
//! tokens and `key=value` / `key: value` attributes.

use std::collections::HashMap;

/// Raw argument text of a tag occurrence, with a structured view of it.
///
/// The raw text is always available through [`raw`](Self::raw), so handlers
/// that don't care about arguments can simply ignore the parsed parts.
///
/// # Example
///
/// ```
/// use tk_template::TagMarkup;
///
/// let markup = TagMarkup::parse(r#"gallery.html title="Summer trip" columns=3"#);
/// assert_eq!(markup.positional(), ["gallery.html"]);
/// assert_eq!(markup.get("title"), Some("Summer trip"));
/// assert_eq!(markup.get("columns"), Some("3"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMarkup {
    raw: String,
    positional: Vec<String>,
    attrs: HashMap<String, String>,
}

impl TagMarkup {
    /// Parse tag markup. Leading and trailing whitespace is dropped.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let mut markup = Self {
            raw: raw.to_owned(),
            ..Self::default()
        };

        let mut remaining = raw;
        while !remaining.is_empty() {
            remaining = remaining.trim_start();
            if remaining.is_empty() {
                break;
            }

            if let Some((key, value, rest)) = parse_key_value(remaining) {
                markup.attrs.insert(key.to_owned(), value.to_owned());
                remaining = rest;
            } else {
                let (token, rest) = parse_token(remaining);
                markup.positional.push(token.to_owned());
                remaining = rest;
            }
        }

        markup
    }

    /// The markup exactly as written (trimmed).
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether the tag was written without any arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Arguments that are not `key=value` pairs, in order. Quotes are stripped.
    #[must_use]
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Get an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }
}

/// Parse one positional token: a quoted string or a run of non-whitespace.
///
/// Returns (token, rest). An unterminated quote swallows the rest of the input.
fn parse_token(s: &str) -> (&str, &str) {
    for quote in ['"', '\''] {
        if let Some(stripped) = s.strip_prefix(quote) {
            return match stripped.find(quote) {
                Some(end) => (&stripped[..end], &stripped[end + 1..]),
                None => (stripped, ""),
            };
        }
    }

    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    (&s[..end], &s[end..])
}

/// Parse a key-value pair at the start of `s`.
///
/// Supports `key="value"`, `key='value'`, `key=value` and the Liquid-style
/// `key: value`. The key must be a bare word directly followed by the separator.
fn parse_key_value(s: &str) -> Option<(&str, &str, &str)> {
    let key_end = s.find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-'))?;
    let key = &s[..key_end];
    if key.is_empty() {
        return None;
    }

    let after_key = &s[key_end..];
    let after_sep = if let Some(rest) = after_key.strip_prefix('=') {
        rest
    } else {
        after_key.strip_prefix(':')?.trim_start()
    };

    for quote in ['"', '\''] {
        if let Some(stripped) = after_sep.strip_prefix(quote) {
            let end_quote = stripped.find(quote)?;
            return Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]));
        }
    }

    let end = after_sep
        .find(char::is_whitespace)
        .unwrap_or(after_sep.len());
    Some((key, &after_sep[..end], &after_sep[end..]))
}
