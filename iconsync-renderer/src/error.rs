//! Error types for iconsync-renderer.

use thiserror::Error;

/// All errors that can arise while rendering or formatting generated code.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error (loading or rendering an embedded template).
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// JSON serialization error (building tera context).
    #[error("context serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A single icon could not be turned into a fragment.
    #[error("cannot render icon '{icon}': {message}")]
    Template { icon: String, message: String },

    /// A generated artifact failed to parse or format.
    #[error("generation of {artifact} failed: {message}")]
    Generation { artifact: String, message: String },

    /// Code generation options that cannot produce valid output.
    #[error("invalid codegen options: {0}")]
    InvalidOptions(String),
}

pub(crate) fn template_err(icon: impl Into<String>, message: impl Into<String>) -> RenderError {
    RenderError::Template {
        icon: icon.into(),
        message: message.into(),
    }
}

pub(crate) fn generation_err(artifact: &str, message: impl std::fmt::Display) -> RenderError {
    RenderError::Generation {
        artifact: artifact.to_string(),
        message: message.to_string(),
    }
}

/// Flatten an error and its sources into one line; tera nests the useful part.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
