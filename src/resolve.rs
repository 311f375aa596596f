//! Option interpolation against the triggering event.
//!
//! Stored options may contain placeholders such as `{{host}}`. Before every
//! invocation the host resolves them into plain strings; the writer only
//! ever sees the result.

use handlebars::Handlebars;

use crate::config::{AgentOptions, ConfigError};

/// Payload of an event received from an upstream agent.
pub type EventPayload = serde_json::Map<String, serde_json::Value>;

/// Turns stored options plus an optional triggering event into the options
/// for one invocation.
pub trait ConfigResolver: Send + Sync {
    /// Resolves every option against `event` (or against nothing, on a scheduled run).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTemplate`] if an option cannot be rendered.
    fn resolve(
        &self,
        options: &AgentOptions,
        event: Option<&EventPayload>,
    ) -> Result<AgentOptions, ConfigError>;
}

/// Uses stored options as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticResolver;

impl ConfigResolver for StaticResolver {
    fn resolve(
        &self,
        options: &AgentOptions,
        _event: Option<&EventPayload>,
    ) -> Result<AgentOptions, ConfigError> {
        Ok(options.clone())
    }
}

/// Renders each option as a Handlebars template with the event payload as context.
///
/// Output is not HTML-escaped, since line protocol routinely contains quotes.
/// Variables missing from the event render as empty strings. On a scheduled
/// run there is no event and templates render against an empty object.
///
/// # Example
///
/// ```
/// use influx_writer::config::AgentOptions;
/// use influx_writer::resolve::{ConfigResolver, EventPayload, TemplateResolver};
///
/// let options = AgentOptions {
///     data: Some("cpu,host={{host}} value={{value}}".to_string()),
///     ..AgentOptions::default()
/// };
/// let event: EventPayload = serde_json::from_str(r#"{"host": "a", "value": 1}"#).unwrap();
///
/// let resolved = TemplateResolver::new().resolve(&options, Some(&event)).unwrap();
/// assert_eq!(resolved.data.as_deref(), Some("cpu,host=a value=1"));
/// ```
#[derive(Debug)]
pub struct TemplateResolver {
    registry: Handlebars<'static>,
}

impl TemplateResolver {
    /// Creates a resolver with escaping disabled.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        Self { registry }
    }
}

impl Default for TemplateResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigResolver for TemplateResolver {
    fn resolve(
        &self,
        options: &AgentOptions,
        event: Option<&EventPayload>,
    ) -> Result<AgentOptions, ConfigError> {
        let empty = EventPayload::new();
        let context = event.unwrap_or(&empty);

        options.try_map(|field, value| {
            if !value.contains("{{") {
                return Ok(value.to_string());
            }

            self.registry
                .render_template(value, context)
                .map_err(|e| ConfigError::InvalidTemplate {
                    field,
                    reason: e.to_string(),
                })
        })
    }
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
