use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::options::Options;
use super::slug::append_slug;
use crate::corpus::Corpus;
use crate::error::{Error, Result};
use crate::lists::merge::merge;
use crate::lists::select::select;
use crate::lists::WordList;

/// Word count used when neither an exact count nor bounds are configured.
pub const DEFAULT_WORD_COUNT: usize = 2;

/// Names of up to this many words are picked without heap allocation.
const INLINE_WORDS: usize = 16;

/// Initial capacity of the buffer used by [`Generator::write_to`].
const WRITE_BUFFER_CAPACITY: usize = 64;

/// Thread-safe name generator.
///
/// Owns a fixed set of word lists and a private random stream. A name is
/// built by cycling through the lists in order (word `i` comes from list
/// `i % lists.len()`), joining the words with the delimiter and optionally
/// appending a random slug:
///
/// `word_1 <delim> word_2 ... <delim> word_n [<delim> slug]`
///
/// # Concurrency
/// The random stream is behind a single mutex, taken once per draw. Any number
/// of threads can share one generator; the words they get are unspecified
/// when calls race, but a single-threaded sequence of calls on a fixed seed
/// is reproducible.
///
/// # Invariants
/// - At least one list
/// - Every list holds at least one word
#[derive(Debug)]
pub struct Generator {
	lists: Vec<WordList>,
	delimiter: u8,
	words_exact: usize,
	min_words: usize,
	max_words: usize,
	slug_length: usize,
	rng: Mutex<StdRng>,
}

impl Generator {
	/// Creates a generator over the word lists bundled with the crate.
	///
	/// # Errors
	/// [`Error::NoListsSelected`] if the options leave no usable list.
	pub fn new(options: Options) -> Result<Self> {
		Self::from_corpus(&Corpus::builtin(), options)
	}

	/// Creates a generator over `corpus`.
	///
	/// # Behavior
	/// - Resolves option defaults (delimiter, seed).
	/// - Selects corpus files with the include/exclude globs.
	/// - Merges the selection into lists and normalizes them.
	///
	/// All the expensive work happens here, once.
	///
	/// # Errors
	/// [`Error::NoListsSelected`] if no file matched or every list ended up empty.
	pub fn from_corpus(corpus: &Corpus, options: Options) -> Result<Self> {
		let selected = select(corpus.paths(), &options.include_globs, &options.exclude_globs);
		debug!("selected {} of {} corpus files", selected.len(), corpus.len());

		let lists = merge(
			corpus,
			&selected,
			options.strategy,
			&options.normalization(),
			options.cross_dedup,
		);
		Self::from_lists(lists, options)
	}

	/// Creates a generator over ready-made lists, in the given order.
	///
	/// Empty lists are discarded. Normalization options are not applied here.
	///
	/// # Errors
	/// [`Error::NoListsSelected`] if no list has a word.
	pub fn from_lists(lists: Vec<WordList>, mut options: Options) -> Result<Self> {
		options.normalize();

		let lists: Vec<WordList> = lists.into_iter().filter(|list| !list.is_empty()).collect();
		if lists.is_empty() {
			return Err(Error::NoListsSelected);
		}
		debug!(
			"generator ready with {} lists ({})",
			lists.len(),
			lists.iter().map(WordList::name).collect::<Vec<_>>().join(", ")
		);

		Ok(Self {
			lists,
			delimiter: options.delimiter,
			words_exact: options.words,
			min_words: options.min_words,
			max_words: options.max_words,
			slug_length: options.slug_length,
			rng: Mutex::new(StdRng::seed_from_u64(options.seed)),
		})
	}

	/// Word lists in sampling order.
	pub fn lists(&self) -> &[WordList] {
		&self.lists
	}

	/// Identifiers of the word lists, in sampling order.
	pub fn list_names(&self) -> Vec<&str> {
		self.lists.iter().map(WordList::name).collect()
	}

	/// Byte placed between words and before the slug.
	pub fn delimiter(&self) -> u8 {
		self.delimiter
	}

	/// Number of slug characters appended to each name (0 when disabled).
	pub fn slug_length(&self) -> usize {
		self.slug_length
	}

	/// Writes a name into `dst` and returns it.
	///
	/// # Parameters
	/// - `dst`: destination buffer; its previous content is discarded
	/// - `words`: overrides the configured word count when `Some(n)` with `n > 0`
	///
	/// # Behavior
	/// - The words are picked first and the exact name length computed.
	/// - If `dst` is too small it is replaced by a buffer of exactly that
	///   capacity, otherwise it is reused as is. With a large enough buffer
	///   (and at most 16 words) no heap allocation happens.
	/// - Each pick takes the random stream lock once.
	///
	/// Never fails.
	pub fn generate_into<'b>(&self, dst: &'b mut Vec<u8>, words: Option<usize>) -> &'b [u8] {
		if self.lists.is_empty() {
			dst.clear();
			return dst.as_slice();
		}

		let count = self.word_count(words);

		let mut inline = [""; INLINE_WORDS];
		let mut spilled = Vec::new();
		let picks: &mut [&str] = if count <= INLINE_WORDS {
			&mut inline[..count]
		} else {
			spilled.resize(count, "");
			&mut spilled
		};

		// Sizing pass: the picked words are kept for the build pass
		let mut total_len = count - 1;
		for (position, pick) in picks.iter_mut().enumerate() {
			let list = &self.lists[position % self.lists.len()];
			*pick = list.words()[self.draw_index(list.len())].as_str();
			total_len += pick.len();
		}
		if self.slug_length > 0 {
			total_len += 1 + self.slug_length;
		}

		if dst.capacity() < total_len {
			*dst = Vec::with_capacity(total_len);
		} else {
			dst.clear();
		}

		// Build pass
		for (position, word) in picks.iter().enumerate() {
			if position > 0 {
				dst.push(self.delimiter);
			}
			dst.extend_from_slice(word.as_bytes());
		}

		if self.slug_length > 0 {
			dst.push(self.delimiter);
			append_slug(dst, self.slug_length);
		}

		dst.as_slice()
	}

	/// Generates a name as a `String`.
	///
	/// Convenience wrapper over [`Generator::generate_into`]; allocates.
	/// A non-ASCII delimiter byte that breaks UTF-8 is replaced with U+FFFD.
	pub fn generate(&self, words: Option<usize>) -> String {
		let mut buf = Vec::new();
		self.generate_into(&mut buf, words);
		String::from_utf8(buf).unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
	}

	/// Writes one name to `writer`.
	///
	/// Returns the number of bytes written.
	///
	/// # Errors
	/// Any error from `writer`.
	pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W, words: Option<usize>) -> io::Result<usize> {
		let mut buf = Vec::with_capacity(WRITE_BUFFER_CAPACITY);
		let name = self.generate_into(&mut buf, words);
		writer.write_all(name)?;
		Ok(name.len())
	}

	/// Number of distinct ordered word sequences of exactly `words` words.
	///
	/// Product of the sizes of the lists visited for each position, saturating
	/// at `u128::MAX`. The slug is not counted.
	pub fn combinations(&self, words: usize) -> u128 {
		if words == 0 || self.lists.is_empty() {
			return 0;
		}
		(0..words)
			.map(|position| self.lists[position % self.lists.len()].len() as u128)
			.try_fold(1u128, u128::checked_mul)
			.unwrap_or(u128::MAX)
	}

	/// Resolves the number of words of the next name.
	///
	/// Priority: positive override, exact configured count, random count.
	/// Never returns 0.
	fn word_count(&self, requested: Option<usize>) -> usize {
		let count = match requested {
			Some(words) if words > 0 => words,
			_ if self.words_exact > 0 => self.words_exact,
			_ => self.random_word_count(),
		};
		count.max(1)
	}

	/// Draws a word count in `max(min_words, 1)..=max(max_words, min)`.
	fn random_word_count(&self) -> usize {
		if self.min_words == 0 && self.max_words == 0 {
			return DEFAULT_WORD_COUNT;
		}
		let min = self.min_words.max(1);
		let max = self.max_words.max(min);
		self.lock_rng().random_range(min..=max)
	}

	/// Draws an index in `0..len`. `len` must be positive.
	fn draw_index(&self, len: usize) -> usize {
		self.lock_rng().random_range(0..len)
	}

	fn lock_rng(&self) -> MutexGuard<'_, StdRng> {
		// The stream is never left half-updated, so a poisoned lock is still usable
		self.rng.lock().unwrap_or_else(PoisonError::into_inner)
	}
}
