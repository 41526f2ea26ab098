use std::path::{Path, PathBuf};
use std::{env, fs, io};

use log::warn;
use walkdir::WalkDir;

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
/// - Invalid UTF-8 sequences become U+FFFD in the affected lines only
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let filename = filename.as_ref();
	let contents = fs::read(filename)?;
	if contents.is_empty() {
		return Ok(Vec::new());
	}

	let mut invalid = 0;
	let lines: Vec<String> = contents
		.strip_suffix(b"\n")
		.unwrap_or(contents.as_slice())
		.split(|byte| *byte == b'\n')
		.map(|line| line.strip_suffix(b"\r").unwrap_or(line))
		.map(|line| match std::str::from_utf8(line) {
			Ok(text) => text.to_owned(),
			Err(_) => {
				invalid += 1;
				String::from_utf8_lossy(line).into_owned()
			}
		})
		.collect();

	if invalid > 0 {
		warn!("{}: {invalid} line(s) are not valid UTF-8", filename.display());
	}
	Ok(lines)
}

/// Builds an output path next to an input path, with a new extension.
///
/// Example:
/// `data/lists` + `"bin"` → `data/lists.bin`
pub(crate) fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_name = input_path
		.file_name()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_name);
	output.set_extension(output_extension);

	Ok(output)
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder<P: AsRef<Path>>(input: P) -> PathBuf {
	let input = input.as_ref();
	if input == Path::new(".") || input == Path::new("./") {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		input.to_path_buf()
	}
}

/// Converts a relative path into its slash-separated key form.
///
/// `adjectives\colors.txt` and `adjectives/colors.txt` both become
/// `adjectives/colors.txt`.
pub(crate) fn to_slash<P: AsRef<Path>>(path: P) -> String {
	path.as_ref()
		.components()
		.map(|c| c.as_os_str().to_string_lossy())
		.collect::<Vec<_>>()
		.join("/")
}

/// Recursively lists all files with a given extension below `dir`.
///
/// Returns `(relative slash path, full path)` pairs sorted by relative path.
/// Directories are followed; symlinked files are read through.
pub(crate) fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<(String, PathBuf)>> {
	let dir = dir.as_ref();
	let mut files = Vec::new();

	for entry in WalkDir::new(dir).follow_links(true) {
		let entry = entry.map_err(io::Error::from)?;
		let path = entry.path();

		if !entry.file_type().is_file() || path.extension() != Some(std::ffi::OsStr::new(extension)) {
			continue;
		}
		if let Ok(relative) = path.strip_prefix(dir) {
			files.push((to_slash(relative), path.to_path_buf()));
		}
	}

	files.sort();
	Ok(files)
}
