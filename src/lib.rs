//! codescrub - comment and logging-call stripper for mobile/web codebases
//!
//! codescrub walks a source tree (Swift/Objective-C, Kotlin/Java,
//! TypeScript/JavaScript) and removes comments and known logging calls while
//! keeping a leading copyright or license header intact. It defaults to a dry
//! run that only reports which files would change.
//!
//! ## Pipeline
//!
//! - [`rules`] loads extension sets, excluded directories and logging patterns
//!   from `rules.toml` (embedded at compile time, or supplied by the operator)
//! - [`walker`] lists candidate files under the target root
//! - [`cleaner`] and [`transform`] turn file text into new file text
//! - [`runner`] ties them together one file at a time and reports the outcome
//!
//! Matching is regex-based and best-effort; nothing here parses source code.

pub mod cleaner;
pub mod rules;
pub mod runner;
pub mod transform;
pub mod walker;

// Re-export commonly used items
pub use cleaner::{split_header, Cleaner};
pub use rules::{Rules, SourceCategory};
pub use runner::{FileChange, RunSummary, Runner};
pub use transform::{DocBlockPruner, LogRewriter, Transform};
pub use walker::{is_excluded_dir, SourceFile, Walker};
