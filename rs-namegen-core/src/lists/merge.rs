use std::collections::{BTreeMap, HashSet};

use log::debug;
use serde::{Deserialize, Serialize};

use super::normalize::Normalization;
use crate::corpus::Corpus;

/// Identifier of the list grouping files that sit at the corpus root.
pub const ROOT_DIRECTORY: &str = ".";

/// Identifier of the single list built by [`MergeStrategy::Flattened`].
pub const FLATTENED_NAME: &str = "all";

/// How selected files are grouped into word lists.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
	/// One list per file, named after the file path.
	#[default]
	PerFile,
	/// One list per parent directory, named after the directory.
	PerDirectory,
	/// A single list holding every selected file, named `"all"`.
	Flattened,
}

/// A named sampling pool of distinct words.
///
/// Immutable once built. The name is the file path, the directory or
/// `"all"`, depending on the merge strategy.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct WordList {
	name: String,
	words: Vec<String>,
}

impl WordList {
	/// Creates a list from already normalized words.
	pub fn new(name: impl Into<String>, words: Vec<String>) -> Self {
		Self { name: name.into(), words }
	}

	/// List identifier.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Words in sampling order.
	pub fn words(&self) -> &[String] {
		&self.words
	}

	/// Word at `index`, if any.
	pub fn get(&self, index: usize) -> Option<&str> {
		self.words.get(index).map(String::as_str)
	}

	/// Number of words.
	pub fn len(&self) -> usize {
		self.words.len()
	}

	/// Returns `true` if the list has no word.
	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}
}

/// Returns the parent directory of a slash-separated path.
///
/// `nouns/animals.txt` → `nouns`, `top.txt` → `.`
fn parent_directory(path: &str) -> &str {
	match path.rsplit_once('/') {
		Some((dir, _)) if !dir.is_empty() => dir,
		_ => ROOT_DIRECTORY,
	}
}

/// Groups selected files into normalized word lists.
///
/// # Parameters
/// - `corpus`: source of the words
/// - `selected`: paths chosen by [`super::select::select`]
/// - `strategy`: grouping policy
/// - `normalization`: filters applied to every candidate list
/// - `cross_dedup`: remove from each list the words already present in an earlier one
///
/// # Behavior
/// - Files are concatenated in path order; groups are emitted in name order.
/// - A candidate list that normalizes to nothing is dropped entirely.
/// - Cross-dedup runs after normalization and never touches the first list.
///   A later list it empties keeps its slot.
///
/// An empty result is not an error here; the generator reports it.
pub fn merge(
	corpus: &Corpus,
	selected: &[String],
	strategy: MergeStrategy,
	normalization: &Normalization,
	cross_dedup: bool,
) -> Vec<WordList> {
	let mut names: Vec<&str> = selected.iter().map(String::as_str).collect();
	names.sort_unstable();
	names.dedup();

	let words_of = |path: &str| corpus.words(path).unwrap_or_default();

	let candidates: Vec<(String, Vec<&String>)> = match strategy {
		MergeStrategy::PerFile => names
			.iter()
			.copied()
			.map(|name| (name.to_owned(), words_of(name).iter().collect()))
			.collect(),
		MergeStrategy::PerDirectory => {
			let mut buckets: BTreeMap<&str, Vec<&String>> = BTreeMap::new();
			for name in names.iter().copied() {
				buckets.entry(parent_directory(name)).or_default().extend(words_of(name));
			}
			buckets
				.into_iter()
				.map(|(dir, words)| (dir.to_owned(), words))
				.collect()
		}
		MergeStrategy::Flattened => {
			let words = names.iter().copied().flat_map(|name| words_of(name)).collect();
			vec![(FLATTENED_NAME.to_owned(), words)]
		}
	};

	let mut lists: Vec<WordList> = candidates
		.into_iter()
		.filter_map(|(name, words)| {
			let words = normalization.normalize(words);
			if words.is_empty() {
				debug!("dropping list {name}: empty after normalization");
				None
			} else {
				Some(WordList::new(name, words))
			}
		})
		.collect();

	if cross_dedup && lists.len() > 1 {
		let mut seen: HashSet<String> = HashSet::new();
		for list in &mut lists {
			list.words.retain(|word| seen.insert(word.clone()));
			if list.is_empty() {
				debug!("list {} emptied by cross-list dedup", list.name);
			}
		}
	}

	lists
}
