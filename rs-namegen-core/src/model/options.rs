use std::time::{SystemTime, UNIX_EPOCH};

use log::warn;
use rand::TryRngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::lists::{MergeStrategy, Normalization};

/// Delimiter used when none is configured.
pub const DEFAULT_DELIMITER: u8 = b'_';

/// Configuration of a `Generator`: list selection, normalization and
/// generation behavior.
///
/// Every field is optional. Zero values mean "unset" and are resolved when
/// the generator is built:
/// - `delimiter == 0` → `_`
/// - `seed == 0` → a seed drawn from the secure random source
/// - `words == 0` → a count in `min_words..=max_words` (2 when both are 0)
/// - `slug_length == 0` → no slug
/// - `min_len == 0` / `max_len == 0` → no length bound
///
/// Deserializes from any subset of its fields.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Options {
	/// Globs selecting corpus files. Empty selects every file.
	pub include_globs: Vec<String>,

	/// Globs removing corpus files from the selection.
	pub exclude_globs: Vec<String>,

	/// How selected files are grouped into lists.
	pub strategy: MergeStrategy,

	/// Exact number of words per name.
	pub words: usize,

	/// Lower bound of the random word count, used when `words` is 0.
	pub min_words: usize,

	/// Upper bound of the random word count, used when `words` is 0.
	pub max_words: usize,

	/// Byte placed between words and before the slug.
	pub delimiter: u8,

	/// Number of slug characters appended to each name.
	pub slug_length: usize,

	/// Fold words to lowercase.
	pub lowercase: bool,

	/// Drop words with non-ASCII bytes.
	pub ascii_only: bool,

	/// Minimum word length in bytes.
	pub min_len: usize,

	/// Maximum word length in bytes.
	pub max_len: usize,

	/// Remove from each list the words already present in an earlier list.
	pub cross_dedup: bool,

	/// Seed of the generator's random stream.
	pub seed: u64,
}

impl Options {
	/// Resolves `delimiter` and `seed` defaults in place.
	///
	/// Already set values are left untouched, so calling this twice is harmless.
	pub fn normalize(&mut self) {
		if self.delimiter == 0 {
			self.delimiter = DEFAULT_DELIMITER;
		}
		if self.seed == 0 {
			self.seed = draw_seed(&mut OsRng);
		}
	}

	/// Token filters derived from these options.
	pub fn normalization(&self) -> Normalization {
		Normalization {
			lowercase: self.lowercase,
			ascii_only: self.ascii_only,
			min_len: self.min_len,
			max_len: self.max_len,
		}
	}

	/// Adds an include glob.
	pub fn include(mut self, glob: impl Into<String>) -> Self {
		self.include_globs.push(glob.into());
		self
	}

	/// Adds an exclude glob.
	pub fn exclude(mut self, glob: impl Into<String>) -> Self {
		self.exclude_globs.push(glob.into());
		self
	}

	/// Sets the merge strategy.
	pub fn with_strategy(mut self, strategy: MergeStrategy) -> Self {
		self.strategy = strategy;
		self
	}

	/// Sets an exact word count.
	pub fn with_words(mut self, words: usize) -> Self {
		self.words = words;
		self
	}

	/// Sets an inclusive random word count range and clears the exact count.
	pub fn with_word_range(mut self, min_words: usize, max_words: usize) -> Self {
		self.words = 0;
		self.min_words = min_words;
		self.max_words = max_words;
		self
	}

	/// Sets the delimiter byte.
	pub fn with_delimiter(mut self, delimiter: u8) -> Self {
		self.delimiter = delimiter;
		self
	}

	/// Sets the slug length (0 disables the slug).
	pub fn with_slug_length(mut self, slug_length: usize) -> Self {
		self.slug_length = slug_length;
		self
	}

	/// Sets the seed (0 draws a random one).
	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = seed;
		self
	}

	/// Sets every token filter at once.
	pub fn with_normalization(mut self, normalization: Normalization) -> Self {
		self.lowercase = normalization.lowercase;
		self.ascii_only = normalization.ascii_only;
		self.min_len = normalization.min_len;
		self.max_len = normalization.max_len;
		self
	}

	/// Enables or disables cross-list deduplication.
	pub fn with_cross_dedup(mut self, cross_dedup: bool) -> Self {
		self.cross_dedup = cross_dedup;
		self
	}
}

/// Draws a 64-bit seed from `rng`, falling back to the wall clock when the
/// source fails.
pub(crate) fn draw_seed<R: TryRngCore + ?Sized>(rng: &mut R) -> u64 {
	match rng.try_next_u64() {
		Ok(seed) => seed,
		Err(err) => {
			warn!("secure random source unavailable ({err}), seeding from the clock");
			clock_seed()
		}
	}
}

fn clock_seed() -> u64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|elapsed| elapsed.as_nanos() as u64)
		.unwrap_or(1)
		.max(1)
}
