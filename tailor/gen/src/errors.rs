//! Error types for the tailor generator.

use tailor_define::{Diagnostics, EvalError};
use thiserror::Error;

/// Errors that can occur during code generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The design failed to evaluate.
    #[error("Design evaluation failed:\n{0}")]
    Design(#[from] Diagnostics),

    /// A template could not be parsed when registering it.
    #[error("Invalid template '{id}': {reason}")]
    TemplateRegistration { id: String, reason: String },

    /// Rendering a template failed (unknown template or data mismatch).
    #[error("Failed to render template '{id}': {reason}")]
    TemplateRender { id: String, reason: String },

    /// A type reference could not be resolved.
    #[error(transparent)]
    UnresolvableReference(#[from] EvalError),

    /// The schema node is none of primitive, object, array or map.
    #[error("Cannot publicize '{target}': unsupported type {type_name}")]
    UnsupportedType { target: String, type_name: String },

    /// Nesting went deeper than any acyclic schema should.
    #[error("Cannot publicize '{target}': nesting exceeds depth {depth}")]
    RecursionLimit { target: String, depth: usize },

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}
