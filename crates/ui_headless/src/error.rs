use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors surfaced by component state containers and their host bindings.
pub enum UiError {
    /// A consumer component was rendered outside the provider that owns its context.
    #[error("`{component}` must be used within `{provider}`")]
    MissingContext {
        /// Component that requested the context.
        component: &'static str,
        /// Provider component expected above it.
        provider: &'static str,
    },
    /// A component received a parameter combination it cannot honor.
    #[error("invalid `{component}` parameter: {reason}")]
    InvalidParameter {
        /// Component or type that rejected the parameter.
        component: &'static str,
        /// Human-readable reason.
        reason: String,
    },
    /// A browser interop call failed or is unavailable on this target.
    #[error("{operation} failed: {message}")]
    Interop {
        /// Interop operation name.
        operation: &'static str,
        /// Message reported by the host.
        message: String,
    },
    /// Library configuration could not be parsed or validated.
    #[error("invalid ui configuration: {0}")]
    Config(String),
}

impl UiError {
    /// Builds a [`UiError::MissingContext`].
    pub fn missing_context(component: &'static str, provider: &'static str) -> Self {
        Self::MissingContext {
            component,
            provider,
        }
    }

    /// Builds a [`UiError::InvalidParameter`].
    pub fn invalid(component: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            component,
            reason: reason.into(),
        }
    }

    /// Builds a [`UiError::Interop`].
    pub fn interop(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Interop {
            operation,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_context_names_component_and_provider() {
        let err = UiError::missing_context("ToggleGroupItem", "ToggleGroup");
        assert_eq!(
            err.to_string(),
            "`ToggleGroupItem` must be used within `ToggleGroup`"
        );
    }

    #[test]
    fn interop_error_mentions_operation() {
        let err = UiError::interop("mount chart", "echarts is not loaded");
        assert_eq!(err.to_string(), "mount chart failed: echarts is not loaded");
    }
}
