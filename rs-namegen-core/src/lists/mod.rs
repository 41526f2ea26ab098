//! Word list pipeline: corpus paths in, finalized sampling lists out.
//!
//! - Selection of corpus paths with include/exclude globs (`select`)
//! - Grouping of selected files into lists (`merge`)
//! - Token normalization and deduplication (`normalize`)

/// Include/exclude glob selection over corpus paths.
pub mod select;

/// Merge strategies and the `WordList` type.
pub mod merge;

/// Case folding, ASCII and length filters, stable dedup.
pub mod normalize;

pub use merge::{MergeStrategy, WordList};
pub use normalize::Normalization;
