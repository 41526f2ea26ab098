use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::io;

/// Word files bundled into the binary, keyed by their path below `lists/`.
const BUILTIN: &[(&str, &str)] = &[
	("adjectives/colors.txt", include_str!("../lists/adjectives/colors.txt")),
	("adjectives/moods.txt", include_str!("../lists/adjectives/moods.txt")),
	("ipsum/lorem.txt", include_str!("../lists/ipsum/lorem.txt")),
	("nouns/animals.txt", include_str!("../lists/nouns/animals.txt")),
	("nouns/birds.txt", include_str!("../lists/nouns/birds.txt")),
	("verbs/motion.txt", include_str!("../lists/verbs/motion.txt")),
];

/// Extension of the files picked up by [`Corpus::load_dir`].
const WORD_FILE_EXTENSION: &str = "txt";

/// Extension of the snapshot written by [`Corpus::load_cached`].
const SNAPSHOT_EXTENSION: &str = "bin";

/// Read-only collection of word files.
///
/// Maps a relative, slash-separated path (`nouns/animals.txt`) to the
/// ordered words of that file. The map is kept sorted by path.
///
/// # Invariants
/// - Every stored word sequence is non-empty
/// - Paths always use `/` as separator
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Corpus {
	files: BTreeMap<String, Vec<String>>,
}

/// Splits the contents of a word file into words.
///
/// Each line is trimmed; blank lines and lines starting with `#` are dropped.
/// File order is preserved.
pub fn parse_word_file(text: &str) -> Vec<String> {
	parse_word_lines(text.lines())
}

fn parse_word_lines<I, S>(lines: I) -> Vec<String>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	lines
		.into_iter()
		.filter_map(|line| {
			let line = line.as_ref().trim();
			if line.is_empty() || line.starts_with('#') {
				None
			} else {
				Some(line.to_owned())
			}
		})
		.collect()
}

impl Corpus {
	/// Returns the word lists bundled with the crate.
	///
	/// Directories: `adjectives`, `nouns`, `verbs` and `ipsum`.
	pub fn builtin() -> Self {
		Self::from_files(BUILTIN.iter().copied())
	}

	/// Builds a corpus from `(path, file contents)` pairs.
	///
	/// Contents are parsed with [`parse_word_file`]. Files with no words are skipped.
	pub fn from_files<I, P, T>(files: I) -> Self
	where
		I: IntoIterator<Item = (P, T)>,
		P: AsRef<str>,
		T: AsRef<str>,
	{
		let mut corpus = Self::default();
		for (path, text) in files {
			corpus.insert(path.as_ref(), parse_word_file(text.as_ref()));
		}
		corpus
	}

	/// Builds a corpus from already tokenized `(path, words)` pairs.
	///
	/// Useful for fixtures. Empty word sequences are skipped.
	pub fn from_words<I, P, W, S>(files: I) -> Self
	where
		I: IntoIterator<Item = (P, W)>,
		P: AsRef<str>,
		W: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut corpus = Self::default();
		for (path, words) in files {
			corpus.insert(path.as_ref(), words.into_iter().map(Into::into).collect());
		}
		corpus
	}

	/// Loads every `.txt` file below `dir`, recursively.
	///
	/// # Behavior
	/// - `"."` and `"./"` resolve to the current working directory.
	/// - Keys are paths relative to `dir`, with `/` separators.
	/// - Files are read and parsed in parallel: the file list is split into
	///   chunks (CPU cores * factor), one thread per chunk, and results are
	///   collected over a channel.
	///
	/// # Errors
	/// - `dir` is not a directory
	/// - any file cannot be read
	pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
		let folder = io::normalize_folder(dir);
		if !folder.is_dir() {
			return Err(Error::Io(std::io::Error::new(
				std::io::ErrorKind::InvalidInput,
				format!("Expected a directory, got: {}", folder.display()),
			)));
		}

		let files = io::list_files(&folder, WORD_FILE_EXTENSION)?;
		let mut corpus = Self::default();
		if files.is_empty() {
			return Ok(corpus);
		}

		let cpus = num_cpus::get();
		let factor = 4;
		let chunk_size = files.len().div_ceil(cpus * factor);

		let (tx, rx) = mpsc::channel();
		for chunk in files.chunks(chunk_size) {
			let tx = tx.clone();
			let chunk = chunk.to_vec();

			thread::spawn(move || {
				for (name, path) in chunk {
					let parsed = io::read_file(&path).map(|lines| (name, parse_word_lines(lines)));
					if tx.send(parsed).is_err() {
						// Receiver gave up after an earlier failure
						return;
					}
				}
			});
		}
		drop(tx);

		for parsed in rx {
			let (name, words) = parsed?;
			corpus.insert(&name, words);
		}

		debug!("loaded {} word files from {}", corpus.len(), folder.display());
		Ok(corpus)
	}

	/// Loads a corpus directory, going through a binary snapshot when possible.
	///
	/// - If `<dir>.bin` exists next to `dir`, the corpus is decoded from it.
	/// - Otherwise the directory is loaded with [`Corpus::load_dir`] and the
	///   snapshot is written for the next start.
	///
	/// A stale snapshot is not detected; delete it to force a reload.
	pub fn load_cached<P: AsRef<Path>>(dir: P) -> Result<Self> {
		let folder = io::normalize_folder(dir);
		let snapshot_path = io::build_output_path(&folder, SNAPSHOT_EXTENSION)?;
		if snapshot_path.exists() {
			debug!("loading corpus snapshot {}", snapshot_path.display());
			return Self::load_snapshot(snapshot_path);
		}

		let corpus = Self::load_dir(&folder)?;
		corpus.save_snapshot(snapshot_path)?;
		Ok(corpus)
	}

	/// Encodes the corpus with `postcard`.
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		Ok(postcard::to_stdvec(self)?)
	}

	/// Decodes a corpus previously encoded with [`Corpus::to_bytes`].
	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		let decoded: Self = postcard::from_bytes(bytes)?;
		// Re-apply the insertion rules in case the bytes were produced elsewhere
		let mut corpus = Self::default();
		for (path, words) in decoded.files {
			corpus.insert(&path, words);
		}
		Ok(corpus)
	}

	/// Writes the encoded corpus to `path`.
	pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		std::fs::write(path, self.to_bytes()?)?;
		Ok(())
	}

	/// Reads a corpus written by [`Corpus::save_snapshot`].
	pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Self> {
		let bytes = std::fs::read(path)?;
		Self::from_bytes(&bytes)
	}

	/// Sorted file paths.
	pub fn paths(&self) -> impl Iterator<Item = &str> {
		self.files.keys().map(String::as_str)
	}

	/// Words of a single file, if present.
	pub fn words(&self, path: &str) -> Option<&[String]> {
		self.files.get(path).map(Vec::as_slice)
	}

	/// Iterates `(path, words)` pairs in path order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
		self.files.iter().map(|(path, words)| (path.as_str(), words.as_slice()))
	}

	/// Number of files.
	pub fn len(&self) -> usize {
		self.files.len()
	}

	/// Returns `true` if the corpus holds no file.
	pub fn is_empty(&self) -> bool {
		self.files.is_empty()
	}

	/// Number of words across all files, duplicates included.
	pub fn total_words(&self) -> usize {
		self.files.values().map(Vec::len).sum()
	}

	/// Number of distinct words across all files.
	pub fn unique_words(&self) -> usize {
		self.files.values().flatten().collect::<HashSet<_>>().len()
	}

	fn insert(&mut self, path: &str, words: Vec<String>) {
		if words.is_empty() {
			debug!("skipping word file {path}: no words");
			return;
		}
		self.files.insert(path.replace('\\', "/"), words);
	}
}
