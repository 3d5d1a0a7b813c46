//! Object-safe plugin abstraction.
//!
//! A [`Plugin`] inspects an incoming user message and, when the message
//! falls within its competence, produces a block of context that the
//! response pipeline hands to the language model. Plugins that do not
//! recognise the message return `Ok(None)` and the pipeline moves on.

use core::fmt;
use core::future::Future;
use core::pin::Pin;

/// Boxed future returned by [`Plugin::process`].
pub type PluginFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Option<String>, PluginError>> + Send + 'a>>;

/// Descriptive metadata for a plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginMetadata {
    /// Stable identifier, used as the source label in responses.
    pub name: &'static str,
    /// Human-readable summary of what the plugin contributes.
    pub description: &'static str,
}

/// A unit of domain capability that can enrich a user message with context.
///
/// Implementations must be cheap to construct and safe to share across
/// tasks; any I/O happens inside [`process`](Plugin::process).
pub trait Plugin: Send + Sync + 'static {
    /// Returns the plugin's metadata.
    fn metadata(&self) -> PluginMetadata;

    /// Processes `message`, returning contributed context.
    ///
    /// Returns `Ok(None)` when the message is outside the plugin's
    /// competence, `Ok(Some(context))` when it produced something for
    /// the model, and `Err` when an attempt at processing failed.
    fn process<'a>(&'a self, message: &'a str) -> PluginFuture<'a>;
}

impl fmt::Debug for dyn Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("name", &self.metadata().name)
            .finish_non_exhaustive()
    }
}

/// Error produced by a plugin while processing a message.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// The plugin's underlying data source or computation failed.
    #[error("plugin execution failed: {message}")]
    Execution {
        /// Description of the failure.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<Box<dyn core::error::Error + Send + Sync>>,
    },

    /// The plugin could not serialize its output.
    #[error("plugin output serialization failed")]
    Serialization(#[from] serde_json::Error),
}

impl PluginError {
    /// Creates an execution error from a message alone.
    #[must_use]
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an execution error wrapping an underlying cause.
    #[must_use]
    pub fn execution_with_source(
        message: impl Into<String>,
        source: impl core::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Execution {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl Plugin for Echo {
        fn metadata(&self) -> PluginMetadata {
            PluginMetadata {
                name: "echo",
                description: "repeats the message back",
            }
        }

        fn process<'a>(&'a self, message: &'a str) -> PluginFuture<'a> {
            Box::pin(async move { Ok(Some(message.to_owned())) })
        }
    }

    #[tokio::test]
    async fn plugin_is_object_safe_and_callable() {
        let plugin: Box<dyn Plugin> = Box::new(Echo);
        let out = plugin.process("hello").await.unwrap();
        assert_eq!(out.as_deref(), Some("hello"));
        assert_eq!(plugin.metadata().name, "echo");
    }

    #[test]
    fn execution_error_displays_message() {
        let err = PluginError::execution("request timed out");
        assert_eq!(err.to_string(), "plugin execution failed: request timed out");
    }
}
