use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Token filters applied to every merged list.
///
/// `min_len` and `max_len` are byte lengths; `0` disables the bound.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Normalization {
	/// Fold tokens to lowercase before any other check.
	pub lowercase: bool,
	/// Drop tokens containing any non-ASCII byte.
	pub ascii_only: bool,
	/// Minimum token length in bytes.
	pub min_len: usize,
	/// Maximum token length in bytes.
	pub max_len: usize,
}

impl Normalization {
	/// Returns the normalized form of `token`, or `None` if a filter rejects it.
	///
	/// Order of checks: lowercase, ASCII, minimum length, maximum length.
	pub fn apply(&self, token: &str) -> Option<String> {
		let token = if self.lowercase {
			token.to_lowercase()
		} else {
			token.to_owned()
		};

		if self.ascii_only && !token.is_ascii() {
			return None;
		}
		if self.min_len > 0 && token.len() < self.min_len {
			return None;
		}
		if self.max_len > 0 && token.len() > self.max_len {
			return None;
		}
		Some(token)
	}

	/// Filters and deduplicates a token sequence.
	///
	/// Only the first occurrence of each surviving token is kept, and the
	/// relative order of survivors is preserved.
	pub fn normalize<I, S>(&self, tokens: I) -> Vec<String>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut seen = HashSet::new();
		tokens
			.into_iter()
			.filter_map(|token| self.apply(token.as_ref()))
			.filter(|token| seen.insert(token.clone()))
			.collect()
	}
}
