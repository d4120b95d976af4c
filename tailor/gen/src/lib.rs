//! Tailor code generator library.
//!
//! This crate turns designs created with `tailor-define` into Go code that
//! converts the private representation of each named object type into its
//! public one. For a type `Account` the generated method is:
//!
//! ```text
//! // Publicize creates Account from account
//! func (ut *account) Publicize() *Account {
//!     var pub Account
//!     pub.ID = *ut.ID
//!     if ut.Name != nil {
//!         pub.Name = ut.Name
//!     }
//!     return &pub
//! }
//! ```
//!
//! ## Modules
//!
//! - [`publicizer`] - Recursive, type-directed synthesis of copy statements
//! - [`render`] - Handlebars templates for every emitted statement
//! - [`gotype`] - Go type expressions for allocations
//! - [`naming`] - Go identifiers from design names
//! - [`output`] - File assembly and atomic writing
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```
//! use std::path::Path;
//! use tailor_definitions::define_cellar;
//! use tailor_gen::output::generate_and_write;
//!
//! let root = define_cellar().unwrap();
//!
//! // dry_run=true prints instead of writing
//! let code = generate_and_write(&root, "app", Path::new("gen/app"), true).unwrap();
//! assert!(code.contains("func (ut *bottleMedia) Publicize() *BottleMedia"));
//! ```

pub mod errors;
pub mod gotype;
pub mod naming;
pub mod output;
pub mod publicizer;
pub mod render;

#[cfg(test)]
mod test_utils;
