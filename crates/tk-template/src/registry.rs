//! Tag registry.
//!
//! Maps tag names to handler types. The registry is an ordinary value handed
//! to [`Engine`](crate::Engine) at construction; nothing is registered globally.

use std::collections::BTreeMap;
use std::fmt;

use crate::{RegistryError, TagError, TagHandler, TagInvocation};

/// Names handled by the parser itself.
pub(crate) const RESERVED_NAMES: [&str; 4] = ["raw", "endraw", "comment", "endcomment"];

type Constructor = fn(&TagInvocation) -> Result<Box<dyn TagHandler>, TagError>;

#[derive(Clone, Copy)]
struct TagEntry {
    construct: Constructor,
    type_name: &'static str,
}

fn construct<T: TagHandler + 'static>(
    invocation: &TagInvocation,
) -> Result<Box<dyn TagHandler>, TagError> {
    Ok(Box::new(T::configure(invocation)?))
}

impl TagEntry {
    fn of<T: TagHandler + 'static>() -> Self {
        Self {
            construct: construct::<T>,
            type_name: std::any::type_name::<T>(),
        }
    }
}

/// Registry of custom tag handlers.
///
/// # Example
///
/// ```
/// use tk_template::{RenderContext, TagError, TagHandler, TagInvocation, TagRegistry};
///
/// struct Year;
///
/// impl TagHandler for Year {
///     fn configure(_invocation: &TagInvocation) -> Result<Self, TagError> { Ok(Self) }
///     fn render(&self, _ctx: &RenderContext<'_>) -> String { "2024".to_owned() }
/// }
///
/// let mut registry = TagRegistry::new();
/// registry.register::<Year>("year").unwrap();
///
/// assert!(registry.contains("year"));
/// assert!(registry.register::<Year>("year").is_err());
/// ```
#[derive(Clone, Default)]
pub struct TagRegistry {
    tags: BTreeMap<String, TagEntry>,
}

impl TagRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register handler type `T` under `name`.
    ///
    /// Fails if the name is invalid, reserved, or already taken. On failure the
    /// registry is left unchanged.
    pub fn register<T: TagHandler + 'static>(&mut self, name: &str) -> Result<(), RegistryError> {
        validate_name(name)?;
        if self.tags.contains_key(name) {
            return Err(RegistryError::Duplicate(name.to_owned()));
        }

        let entry = TagEntry::of::<T>();
        tracing::debug!(tag = name, handler = entry.type_name, "Registered tag");
        self.tags.insert(name.to_owned(), entry);
        Ok(())
    }

    /// Register handler type `T` under `name`, overwriting any existing entry.
    ///
    /// Returns `true` if an earlier registration was replaced.
    pub fn replace<T: TagHandler + 'static>(&mut self, name: &str) -> Result<bool, RegistryError> {
        validate_name(name)?;

        let entry = TagEntry::of::<T>();
        let previous = self.tags.insert(name.to_owned(), entry);
        if let Some(previous) = &previous {
            tracing::warn!(
                tag = name,
                previous = previous.type_name,
                handler = entry.type_name,
                "Replaced tag registration"
            );
        } else {
            tracing::debug!(tag = name, handler = entry.type_name, "Registered tag");
        }
        Ok(previous.is_some())
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_tag<T: TagHandler + 'static>(mut self, name: &str) -> Result<Self, RegistryError> {
        self.register::<T>(name)?;
        Ok(self)
    }

    /// Check whether a handler is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// Registered tag names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    /// Number of registered tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Check if no tags are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Configure a handler for one tag occurrence.
    ///
    /// Returns `None` if no handler is registered under the invocation's name.
    pub(crate) fn configure(
        &self,
        invocation: &TagInvocation,
    ) -> Option<Result<Box<dyn TagHandler>, TagError>> {
        let entry = self.tags.get(&invocation.name)?;
        Some((entry.construct)(invocation))
    }
}

impl fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.tags.iter().map(|(name, entry)| (name, entry.type_name)))
            .finish()
    }
}

/// Check if a name is a valid tag name.
///
/// Valid names contain only alphanumeric characters, hyphens, and underscores.
pub(crate) fn is_valid_tag_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_tag_name_char)
}

pub(crate) fn is_tag_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn validate_name(name: &str) -> Result<(), RegistryError> {
    if !is_valid_tag_name(name) {
        return Err(RegistryError::InvalidName(name.to_owned()));
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(RegistryError::Reserved(name.to_owned()));
    }
    Ok(())
}
