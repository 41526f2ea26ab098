//! Word-list based name generation library.
//!
//! This crate builds human-readable names such as `brave_otter` or
//! `cobalt-heron-k3x9qa` including:
//! - A word corpus (bundled lists, directories, binary snapshots)
//! - Glob selection, merging and normalization of word lists
//! - A thread-safe, seedable generator with optional random slugs
//!
//! ```
//! use rs_namegen_core::{Generator, MergeStrategy, Options};
//!
//! let generator = Generator::new(
//!     Options::default()
//!         .include("adjectives/*")
//!         .include("nouns/*")
//!         .with_strategy(MergeStrategy::PerDirectory)
//!         .with_words(2)
//!         .with_seed(42),
//! )?;
//! let name = generator.generate(None);
//! assert_eq!(name.split('_').count(), 2);
//! # Ok::<(), rs_namegen_core::Error>(())
//! ```

/// Word corpus: parsing, bundled lists, directory loading and snapshots.
pub mod corpus;

/// Error type shared by the crate.
pub mod error;

/// Selection, merging and normalization of word lists.
pub mod lists;

/// Generator, configuration and slug generation.
pub mod model;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use corpus::Corpus;
pub use error::{Error, Result};
pub use lists::{MergeStrategy, Normalization, WordList};
pub use model::generator::Generator;
pub use model::options::Options;
