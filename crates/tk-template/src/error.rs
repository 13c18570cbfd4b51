//! Error types for tag registration and template parsing.

/// Error registering a tag handler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// Tag name is empty or contains characters other than alphanumerics, `-` and `_`.
    #[error("invalid tag name: {0:?}")]
    InvalidName(String),

    /// Tag name is claimed by a built-in block (`raw`, `comment`).
    #[error("tag name is reserved: {0}")]
    Reserved(String),

    /// A handler is already registered under this name.
    #[error("tag already registered: {0}")]
    Duplicate(String),
}

/// Error raised by a tag handler while configuring itself from its markup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TagError {
    message: String,
}

impl TagError {
    /// Create a tag error with a human-readable message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error parsing template source.
///
/// Every variant carries the 1-indexed line where the problem starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TemplateError {
    /// `{%` or `{{` without its closing delimiter.
    #[error("line {line}: unterminated {delimiter}")]
    Unterminated {
        /// Opening delimiter that was never closed.
        delimiter: &'static str,
        /// Line of the opening delimiter.
        line: usize,
    },

    /// `{% %}` with nothing inside.
    #[error("line {line}: empty tag")]
    EmptyTag {
        /// Line of the tag.
        line: usize,
    },

    /// Tag name with characters the registry would never accept.
    #[error("line {line}: invalid tag name {name:?}")]
    InvalidTagName {
        /// Offending name.
        name: String,
        /// Line of the tag.
        line: usize,
    },

    /// `{% raw %}` or `{% comment %}` without its end tag.
    #[error("line {line}: {block} block is never closed (missing {{% end{block} %}})")]
    UnclosedBlock {
        /// Block name (`raw` or `comment`).
        block: &'static str,
        /// Line of the opening tag.
        line: usize,
    },

    /// Tag with no registered handler (strict mode only).
    #[error("line {line}: unknown tag '{name}'")]
    UnknownTag {
        /// Tag name.
        name: String,
        /// Line of the tag.
        line: usize,
    },

    /// The handler rejected its markup.
    #[error("line {line}: failed to configure tag '{name}': {source}")]
    Configure {
        /// Tag name.
        name: String,
        /// Line of the tag.
        line: usize,
        /// Handler error.
        source: TagError,
    },
}

impl TemplateError {
    /// Line where the error was detected (1-indexed).
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::Unterminated { line, .. }
            | Self::EmptyTag { line }
            | Self::InvalidTagName { line, .. }
            | Self::UnclosedBlock { line, .. }
            | Self::UnknownTag { line, .. }
            | Self::Configure { line, .. } => *line,
        }
    }
}
