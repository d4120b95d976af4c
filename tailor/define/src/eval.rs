//! Design evaluation state.
//!
//! The [`Evaluator`] keeps a stack of the definitions currently being built.
//! Running a configuration block pushes its target, runs the block, and pops
//! the target back off. DSL operations (see [`crate::dsl`]) look at the top of
//! the stack and report [`EvalError::IncompatibleContext`] when it is not the
//! kind of definition they apply to.
//!
//! Errors never abort evaluation. They are collected as [`Diagnostic`]s and
//! returned together by [`Evaluator::finish`], so one broken definition does
//! not hide problems in its siblings.

use tracing::{debug, warn};

use crate::errors::{Diagnostic, Diagnostics, EvalError};
use crate::expr::{ActionExpr, ResourceExpr, ResponseExpr, ResponseScope, Root};
use crate::types::AttributeExpr;

/// A configuration block run against the active definition.
pub type Dsl = Box<dyn FnOnce(&mut Evaluator)>;

/// Wraps a closure as a [`Dsl`] block.
pub fn dsl(block: impl FnOnce(&mut Evaluator) + 'static) -> Dsl {
    Box::new(block)
}

/// A definition under construction.
#[derive(Debug)]
pub enum Definition {
    Resource(ResourceExpr),
    Action(ActionExpr),
    Response(ResponseExpr),
    Headers(AttributeExpr),
}

impl Definition {
    /// Human readable description used in diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Self::Resource(r) => format!("resource {:?}", r.name),
            Self::Action(a) => format!("action {:?}", a.name),
            Self::Response(r) => format!("response {:?}", r.name),
            Self::Headers(_) => "headers".to_string(),
        }
    }

    pub(crate) fn as_scope(&self) -> Option<&dyn ResponseScope> {
        match self {
            Self::Resource(r) => Some(r),
            Self::Action(a) => Some(a),
            _ => None,
        }
    }

    pub(crate) fn as_scope_mut(&mut self) -> Option<&mut dyn ResponseScope> {
        match self {
            Self::Resource(r) => Some(r),
            Self::Action(a) => Some(a),
            _ => None,
        }
    }
}

/// Evaluates design DSL against a [`Root`].
///
/// ## Examples
///
/// ```
/// use tailor_define::prelude::*;
///
/// let mut ev = Evaluator::new(Root::new());
/// ev.resource("bottle", dsl(|ev| {
///     ev.default_media("application/vnd.bottle");
///     ev.action("show", dsl(|ev| {
///         ev.response("OK", vec![]);
///         ev.response("NotFound", vec![]);
///     }));
/// }));
///
/// let root = ev.finish().unwrap();
/// let show = root.resource("bottle").unwrap().action("show").unwrap();
/// assert_eq!(show.responses.len(), 2);
/// assert_eq!(show.responses[0].media_type, "application/vnd.bottle");
/// assert_eq!(show.responses[1].status, 404);
/// ```
#[derive(Debug)]
pub struct Evaluator {
    pub(crate) root: Root,
    pub(crate) stack: Vec<Definition>,
    diagnostics: Vec<Diagnostic>,
}

impl Evaluator {
    pub fn new(root: Root) -> Self {
        Self {
            root,
            stack: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn root(&self) -> &Root {
        &self.root
    }

    /// The definition currently being configured, if any.
    pub fn current(&self) -> Option<&Definition> {
        self.stack.last()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Ends evaluation, returning the root or every collected diagnostic.
    pub fn finish(self) -> Result<Root, Diagnostics> {
        if self.diagnostics.is_empty() {
            Ok(self.root)
        } else {
            Err(Diagnostics(self.diagnostics))
        }
    }

    /// Records an error against the current definition path.
    pub fn report_error(&mut self, error: EvalError) {
        let context = self.context_path();
        warn!(context = %context, "{}", error);
        self.diagnostics.push(Diagnostic { context, error });
    }

    /// Reports that `operation` cannot run in the current context.
    pub(crate) fn incompatible(&mut self, operation: &'static str, expected: &'static str) {
        let found = self
            .current()
            .map(Definition::describe)
            .unwrap_or_else(|| "design root".to_string());
        self.report_error(EvalError::IncompatibleContext {
            operation,
            expected,
            found,
        });
    }

    /// Runs `block` with `target` as the active definition.
    ///
    /// Returns the (possibly modified) target and whether the block ran
    /// without reporting any error.
    pub(crate) fn execute(&mut self, block: Dsl, target: Definition) -> Option<(Definition, bool)> {
        let errors_before = self.diagnostics.len();
        let depth = self.stack.len();
        debug!(definition = %target.describe(), depth, "entering block");
        self.stack.push(target);
        block(self);
        let target = self.stack.pop()?;
        Some((target, self.diagnostics.len() == errors_before))
    }

    fn context_path(&self) -> String {
        self.stack
            .iter()
            .map(Definition::describe)
            .collect::<Vec<_>>()
            .join(" / ")
    }
}
