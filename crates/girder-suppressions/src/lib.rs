//! Valgrind/Memcheck suppression-file syntax checking.
//!
//! Suppression files are line-oriented:
//!
//! ```text
//! {
//!    name_of_the_suppression
//!    Memcheck:Leak
//!    fun:frame_to_match
//!    obj:object_to_match
//!    ...
//! }
//! ```
//!
//! The checker is a single pass over each file: blank and `#` lines are
//! skipped, the small fixed grammar is recognized, and every line matching
//! none of its forms becomes a diagnostic. All problems across a changed
//! file set are accumulated and reported together, including suppression
//! names duplicated between files.

pub mod checker;
pub mod report;

// Re-exports for convenience.
pub use checker::{is_suppression_file, CheckError, SuppressionCheck};
pub use report::{CheckReport, Diagnostic};
