use thiserror::Error;

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by generator construction and the corpus provider.
///
/// Generation itself never fails: once a `Generator` exists, every call
/// produces a name.
#[derive(Debug, Error)]
pub enum Error {
	/// Selection, merging and normalization left zero usable word lists.
	#[error("no lists selected (include/exclude globs matched zero files)")]
	NoListsSelected,

	/// Reading a corpus directory or snapshot failed.
	#[error("corpus I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// A corpus snapshot could not be encoded or decoded.
	#[error("corpus snapshot error: {0}")]
	Snapshot(#[from] postcard::Error),
}
