//! Error types for design evaluation.

use std::fmt;

use thiserror::Error;

/// Errors reported while evaluating a design.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A name was defined twice in the same scope.
    #[error("{kind} {name} is defined twice")]
    DuplicateDefinition {
        /// What was being defined (e.g. "response", "header").
        kind: &'static str,
        name: String,
    },

    /// A DSL operation was invoked while the wrong kind of definition was
    /// active.
    #[error("invalid use of {operation} in {found}, expected {expected}")]
    IncompatibleContext {
        operation: &'static str,
        expected: &'static str,
        found: String,
    },

    /// A positional response argument could not be used.
    #[error("response {response}: {reason}")]
    InvalidTemplateArgument { response: String, reason: String },

    /// A type reference is dangling or part of a cycle.
    #[error("unresolvable type reference {name}: {reason}")]
    UnresolvableReference { name: String, reason: String },
}

/// A collected error together with the definition path it was reported in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Path of the active definitions, e.g. `resource "bottle" / action "show"`.
    pub context: String,
    pub error: EvalError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.context.is_empty() {
            write!(f, "{}", self.error)
        } else {
            write!(f, "{}: {}", self.context, self.error)
        }
    }
}

/// All diagnostics collected during one evaluation, reported together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics(pub Vec<Diagnostic>);

impl Diagnostics {
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", lines.join("\n"))
    }
}

impl std::error::Error for Diagnostics {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_display_one_per_line() {
        let diags = Diagnostics(vec![
            Diagnostic {
                context: "resource \"bottle\"".to_string(),
                error: EvalError::DuplicateDefinition {
                    kind: "response",
                    name: "OK".to_string(),
                },
            },
            Diagnostic {
                context: String::new(),
                error: EvalError::IncompatibleContext {
                    operation: "status",
                    expected: "response",
                    found: "design root".to_string(),
                },
            },
        ]);

        assert_eq!(
            diags.to_string(),
            "resource \"bottle\": response OK is defined twice\n\
             invalid use of status in design root, expected response"
        );
    }
}
