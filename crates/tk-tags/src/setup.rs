//! Registration of the bundled tags.

use tk_config::Config;
use tk_template::{Engine, EngineOptions, RegistryError, TagRegistry};

use crate::tk::{TK_TAG_NAME, TkTag};

/// Names of all tags this crate provides.
pub const BUNDLED_TAGS: [&str; 1] = [TK_TAG_NAME];

/// Error setting up bundled tags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    /// The registry rejected a bundled tag (e.g. the name is already taken).
    #[error("failed to register bundled tag")]
    Registry(#[from] RegistryError),

    /// Configuration enables a tag this crate doesn't provide.
    #[error("unknown bundled tag '{0}' (available: {available})", available = BUNDLED_TAGS.join(", "))]
    UnknownBundledTag(String),
}

/// Register the `tk` tag.
///
/// # Example
///
/// ```
/// use tk_template::TagRegistry;
///
/// let mut registry = TagRegistry::new();
/// tk_tags::register(&mut registry).unwrap();
/// assert!(registry.contains("tk"));
/// ```
pub fn register(registry: &mut TagRegistry) -> Result<(), RegistryError> {
    registry.register::<TkTag>(TK_TAG_NAME)
}

/// Register each of the named bundled tags.
///
/// All names are checked before anything is registered, so an unknown name,
/// a repeated name or a name the registry already holds leaves the registry
/// untouched.
pub fn register_bundled<S: AsRef<str>>(
    registry: &mut TagRegistry,
    enabled: &[S],
) -> Result<(), SetupError> {
    let names: Vec<&str> = enabled.iter().map(AsRef::<str>::as_ref).collect();

    for (idx, &name) in names.iter().enumerate() {
        if !BUNDLED_TAGS.contains(&name) {
            return Err(SetupError::UnknownBundledTag(name.to_owned()));
        }
        if registry.contains(name) || names[..idx].contains(&name) {
            return Err(RegistryError::Duplicate(name.to_owned()).into());
        }
    }

    for name in names {
        if name == TK_TAG_NAME {
            register(registry)?;
        }
    }

    Ok(())
}

/// Build an engine with the bundled tags and options from configuration.
///
/// # Example
///
/// ```
/// use serde_json::Map;
/// use tk_config::Config;
/// use tk_template::RenderContext;
///
/// let engine = tk_tags::engine_from_config(&Config::default()).unwrap();
///
/// let vars = Map::new();
/// let html = engine.render_str("{% tk %}", &RenderContext::new(&vars)).unwrap();
/// assert_eq!(html, tk_tags::TK_MARKER);
/// ```
pub fn engine_from_config(config: &Config) -> Result<Engine, SetupError> {
    let mut registry = TagRegistry::new();
    match &config.tags.enabled {
        Some(enabled) => register_bundled(&mut registry, enabled.as_slice())?,
        None => register_bundled(&mut registry, &BUNDLED_TAGS)?,
    }

    let options = EngineOptions {
        strict_tags: config.template.strict_tags,
    };
    Ok(Engine::with_options(registry, options))
}
