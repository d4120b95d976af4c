//! Convenient re-exports for writing designs.
//!
//! ```
//! use tailor_define::prelude::*;
//!
//! let account = UserTypeExpr::new(
//!     "Account",
//!     AttributeExpr::object([("id", AttributeExpr::from(Primitive::Integer))]).require(["id"]),
//! );
//! let mut types = TypeRegistry::new();
//! types.register_user_type(account);
//! let ev = Evaluator::new(Root::with_types(types));
//! assert!(ev.finish().is_ok());
//! ```

pub use crate::dsl::{MediaArg, ResponseArg};
pub use crate::errors::{Diagnostics, EvalError};
pub use crate::eval::{Dsl, Evaluator, dsl};
pub use crate::expr::{ResponseExpr, ResponseScope, Root, StandardResponse};
pub use crate::types::{
    AttributeExpr, DataType, MediaTypeExpr, Primitive, TypeRegistry, UserTypeExpr,
};
