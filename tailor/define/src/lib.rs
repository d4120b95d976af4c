//! Tailor Design Library
//!
//! This crate provides the design model used by `tailor-gen`: structural
//! types describing payloads, and a small DSL for declaring the HTTP
//! responses of resources and actions.
//!
//! ## Core Types
//!
//! ### Schema Types
//!
//! - [`DataType`] - Primitive, object, array, map, named and reference types
//! - [`AttributeExpr`] - A schema node with its required fields
//! - [`UserTypeExpr`] / [`MediaTypeExpr`] - Named types
//! - [`TypeRegistry`] - Named types by name, used to resolve references
//!
//! ### Design Expressions
//!
//! - [`ResponseExpr`] - One named HTTP response
//! - [`ResourceExpr`] / [`ActionExpr`] - Scopes owning responses
//! - [`Root`] - Types, user-defined responses, default responses, resources
//! - [`StandardResponse`] - Built-in default responses by status name
//!
//! ### Evaluation
//!
//! - [`Evaluator`] - Runs DSL blocks and collects [`Diagnostics`]
//! - [`ResponseArg`] - Positional arguments of [`Evaluator::response`]
//!
//! ## Examples
//!
//! ```
//! use tailor_define::prelude::*;
//!
//! let mut ev = Evaluator::new(Root::new());
//! ev.resource("bottle", dsl(|ev| {
//!     ev.response("NotFound", vec![]);
//!     ev.response("OK", vec!["text/plain".into()]);
//! }));
//!
//! let diagnostics = ev.finish().unwrap_err();
//! assert_eq!(diagnostics.len(), 1);
//! ```

pub mod classify;
pub mod dsl;
pub mod errors;
pub mod eval;
pub mod expr;
pub mod prelude;
pub mod types;

// Re-export main types at crate root
pub use dsl::{MediaArg, ResponseArg};
pub use errors::{Diagnostic, Diagnostics, EvalError};
pub use eval::{Definition, Dsl, Evaluator, dsl};
pub use expr::{ActionExpr, ResourceExpr, ResponseExpr, ResponseScope, Root, ScopeRef, StandardResponse};
pub use types::{
    ArrayType, AttributeExpr, DataType, MapType, MediaTypeExpr, Object, Primitive, TypeRegistry,
    UserTypeExpr,
};
