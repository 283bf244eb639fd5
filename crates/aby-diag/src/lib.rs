//! Stacked error and warning contexts.
//!
//! Code paths open a named context, record errors and warnings into it, and
//! fold it back into the context underneath when they return. Folding keeps
//! the grouping: a message recorded in `function` while `root` was below it
//! ends up tagged `root > function`.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`message`] | `Message`, `Severity` |
//! | [`context`] | `ErrorContext` |
//! | [`aggregator`] | `ErrorAggregator` (the context stack) |
//!
//! # Quick start
//!
//! ```rust
//! use aby_diag::ErrorAggregator;
//!
//! let mut diag = ErrorAggregator::new("root");
//! diag.add_error("An error message");
//!
//! diag.push("function");
//! diag.add_error("an error inside the pushed context");
//! diag.fold();
//!
//! let out = diag.to_string();
//! assert_eq!(
//!     out,
//!     "Error : [root] : An error message\n\
//!      Error : [root > function] : an error inside the pushed context\n"
//! );
//! ```

pub mod aggregator;
pub mod context;
pub mod message;

pub use aggregator::ErrorAggregator;
pub use context::ErrorContext;
pub use message::{Message, Severity};
