//! Name generation.
//!
//! - Generator configuration and default resolution (`Options`)
//! - Thread-safe generation over finalized word lists (`Generator`)
//! - Random suffixes (`slug`)

/// High-level generator: construction from a corpus and name generation.
///
/// Exposes the buffer-filling, string-returning and writer-based generation
/// calls, all safe to use from many threads at once.
pub mod generator;

/// Generator configuration.
///
/// Stores selection globs, merge strategy, normalization filters, word count
/// bounds, delimiter, slug length and seed.
pub mod options;

/// Base32 slug appender backed by the operating system's random source.
pub mod slug;
