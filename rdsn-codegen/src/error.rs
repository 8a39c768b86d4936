//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Descriptor loading error.
    #[error("schema parse error: {0}")]
    Parse(#[from] rdsn_schema::ParseError),

    /// Schema validation error.
    #[error("schema error: {0}")]
    Schema(#[from] rdsn_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed statement template.
    #[error("template error in '{template}': {message}")]
    Template {
        /// Offending template.
        template: String,
        /// Error message.
        message: String,
    },

    /// Invalid generator parameter.
    #[error("invalid generator parameter '{parameter}': {message}")]
    Config {
        /// Offending parameter.
        parameter: String,
        /// Error message.
        message: String,
    },

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates a template error.
    pub fn template(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Template {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            parameter: parameter.into(),
            message: message.into(),
        }
    }
}
