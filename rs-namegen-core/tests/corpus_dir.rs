use std::fs;
use std::path::Path;

use rs_namegen_core::{Corpus, Error, Generator, MergeStrategy, Normalization, Options};

fn write(root: &Path, relative: &str, contents: &str) {
	let path = root.join(relative);
	fs::create_dir_all(path.parent().unwrap()).unwrap();
	fs::write(path, contents).unwrap();
}

fn sample_tree(root: &Path) {
	write(root, "adjectives/colors.txt", "# colors\nred\nblue\n\ngreen\n");
	write(root, "nouns/animals.txt", "otter\n  lynx  \n");
	write(root, "nouns/deep/fish.txt", "cod\n");
	write(root, "nouns/empty.txt", "# only a comment\n");
	write(root, "notes.md", "ignored\n");
}

#[test]
fn load_dir_reads_txt_files_recursively() {
	let dir = tempfile::tempdir().unwrap();
	sample_tree(dir.path());

	let corpus = Corpus::load_dir(dir.path()).unwrap();
	assert_eq!(
		corpus.paths().collect::<Vec<_>>(),
		vec!["adjectives/colors.txt", "nouns/animals.txt", "nouns/deep/fish.txt"]
	);
	assert_eq!(corpus.words("adjectives/colors.txt").unwrap(), ["red", "blue", "green"]);
	assert_eq!(corpus.words("nouns/animals.txt").unwrap(), ["otter", "lynx"]);
}

#[test]
fn load_dir_handles_many_files() {
	let dir = tempfile::tempdir().unwrap();
	for i in 0..200 {
		write(dir.path(), &format!("bulk/file{i:03}.txt"), &format!("word{i}\n"));
	}

	let corpus = Corpus::load_dir(dir.path()).unwrap();
	assert_eq!(corpus.len(), 200);
	assert_eq!(corpus.words("bulk/file042.txt").unwrap(), ["word42"]);
}

#[test]
fn load_dir_rejects_missing_directory() {
	let dir = tempfile::tempdir().unwrap();
	let err = Corpus::load_dir(dir.path().join("missing")).unwrap_err();
	assert!(matches!(err, Error::Io(_)));
}

#[test]
fn deep_files_need_explicit_globs() {
	let dir = tempfile::tempdir().unwrap();
	sample_tree(dir.path());
	let corpus = Corpus::load_dir(dir.path()).unwrap();

	let shallow = Generator::from_corpus(&corpus, Options::default().include("**/*.txt")).unwrap();
	assert_eq!(shallow.list_names(), vec!["adjectives/colors.txt", "nouns/animals.txt"]);

	let deep = Generator::from_corpus(&corpus, Options::default().include("*/*/*.txt")).unwrap();
	assert_eq!(deep.list_names(), vec!["nouns/deep/fish.txt"]);
}

#[test]
fn snapshot_round_trip() {
	let dir = tempfile::tempdir().unwrap();
	sample_tree(dir.path());
	let corpus = Corpus::load_dir(dir.path()).unwrap();

	let snapshot = dir.path().join("corpus.bin");
	corpus.save_snapshot(&snapshot).unwrap();
	assert_eq!(Corpus::load_snapshot(&snapshot).unwrap(), corpus);
}

#[test]
fn corrupt_snapshot_is_reported() {
	let dir = tempfile::tempdir().unwrap();
	let snapshot = dir.path().join("corpus.bin");
	fs::write(&snapshot, [0xff, 0xff, 0xff]).unwrap();
	assert!(matches!(Corpus::load_snapshot(&snapshot), Err(Error::Snapshot(_))));
}

#[test]
fn load_cached_writes_then_reuses_snapshot() {
	let dir = tempfile::tempdir().unwrap();
	let lists = dir.path().join("lists");
	sample_tree(&lists);

	let first = Corpus::load_cached(&lists).unwrap();
	let snapshot = dir.path().join("lists.bin");
	assert!(snapshot.exists());

	// Changes on disk are not seen while the snapshot exists
	write(&lists, "verbs/motion.txt", "run\n");
	let second = Corpus::load_cached(&lists).unwrap();
	assert_eq!(first, second);

	fs::remove_file(&snapshot).unwrap();
	let third = Corpus::load_cached(&lists).unwrap();
	assert!(third.words("verbs/motion.txt").is_some());
}

#[test]
fn generator_over_loaded_directory() {
	let dir = tempfile::tempdir().unwrap();
	sample_tree(dir.path());
	let corpus = Corpus::load_dir(dir.path()).unwrap();

	let generator = Generator::from_corpus(
		&corpus,
		Options::default()
			.with_strategy(MergeStrategy::PerDirectory)
			.with_words(2)
			.with_delimiter(b'-')
			.with_seed(3),
	)
	.unwrap();
	assert_eq!(generator.list_names(), vec!["adjectives", "nouns", "nouns/deep"]);

	let name = generator.generate(None);
	let (color, animal) = name.split_once('-').unwrap();
	assert!(["red", "blue", "green"].contains(&color));
	assert!(["otter", "lynx"].contains(&animal));
}

#[test]
fn non_utf8_file_only_affects_its_bad_words() {
	let dir = tempfile::tempdir().unwrap();
	write(dir.path(), "n/good.txt", "otter\n");
	fs::write(dir.path().join("n/latin1.txt"), b"caf\xe9\nlynx\n").unwrap();

	let corpus = Corpus::load_dir(dir.path()).unwrap();
	assert_eq!(corpus.words("n/good.txt").unwrap(), ["otter"]);
	assert_eq!(corpus.words("n/latin1.txt").unwrap(), ["caf\u{fffd}", "lynx"]);

	let generator = Generator::from_corpus(
		&corpus,
		Options::default()
			.with_strategy(MergeStrategy::Flattened)
			.with_words(1)
			.with_normalization(Normalization { ascii_only: true, ..Normalization::default() })
			.with_seed(11),
	)
	.unwrap();
	assert_eq!(generator.lists()[0].words(), ["otter", "lynx"]);
}
