//! Tailor Design Definitions
//!
//! Designs written with `tailor-define`. Each design lives in its own
//! module and exposes a `define_*` function returning the evaluated root.
//!
//! ## Available Designs
//!
//! - [`cellar`] - Wine cellar accounts and bottles
//!
//! ## Examples
//!
//! ```
//! use tailor_definitions::define_cellar;
//!
//! let root = define_cellar().unwrap();
//! assert_eq!(root.resources.len(), 2);
//! assert!(root.types.get("BottleMedia").is_some());
//! ```

pub mod cellar;

pub use cellar::define_cellar;
