use std::collections::BTreeSet;
use std::iter::Peekable;
use std::str::Chars;

use glob::{MatchOptions, Pattern};

/// `*` and `?` never match `/`, matching is case-sensitive.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
	case_sensitive: true,
	require_literal_separator: true,
	require_literal_leading_dot: false,
};

/// A shell-style pattern matched against a full slash-separated path.
///
/// Supported syntax: `*` (any run of characters within one segment), `?`
/// (one character other than `/`), `[abc]`, `[a-z]`, `[^abc]` / `[!abc]`,
/// and `\` to escape the next character, inside a bracket expression too.
///
/// A run of `*` is the same as a single `*`: `**/*.txt` matches
/// `nouns/animals.txt` but not `nouns/deep/fish.txt`. There is no
/// multi-segment wildcard.
///
/// Inside a bracket expression `-` and `]` must be escaped unless `-` is
/// the range operator or `]` closes a non-empty set. `[]a]`, `[a-]` and an
/// unterminated `[` are malformed. A bracket expression never matches `/`.
#[derive(Clone, Debug)]
pub struct PathGlob {
	pattern: Pattern,
}

impl PathGlob {
	/// Compiles a pattern. Returns `None` when the pattern is malformed.
	pub fn new(pattern: &str) -> Option<Self> {
		let translated = translate(pattern)?;
		Pattern::new(&translated).ok().map(|pattern| Self { pattern })
	}

	/// Returns `true` if the whole `path` matches.
	pub fn matches(&self, path: &str) -> bool {
		self.pattern.matches_with(path, MATCH_OPTIONS)
	}
}

/// Rewrites a pattern into `glob` syntax with single-segment semantics.
///
/// - runs of `*` collapse into one `*`
/// - `\x` becomes `[x]` for metacharacters, `x` otherwise
/// - bracket expressions are parsed and re-emitted in a form where every
///   member keeps its literal meaning
///
/// Returns `None` for a malformed pattern.
fn translate(pattern: &str) -> Option<String> {
	let mut out = String::with_capacity(pattern.len() + 4);
	let mut chars = pattern.chars().peekable();

	while let Some(c) = chars.next() {
		match c {
			'\\' => {
				let escaped = chars.next()?;
				if matches!(escaped, '*' | '?' | '[' | ']') {
					out.push('[');
					out.push(escaped);
					out.push(']');
				} else {
					out.push(escaped);
				}
			}
			'*' => {
				while chars.peek() == Some(&'*') {
					chars.next();
				}
				out.push('*');
			}
			'[' => parse_class(&mut chars)?.emit(&mut out),
			_ => out.push(c),
		}
	}

	Some(out)
}

/// A parsed bracket expression: inclusive ranges, single members as `(c, c)`.
struct CharClass {
	negated: bool,
	ranges: Vec<(char, char)>,
}

/// Parses a bracket expression, the opening `[` already consumed.
fn parse_class(chars: &mut Peekable<Chars<'_>>) -> Option<CharClass> {
	let negated = matches!(chars.peek(), Some('^' | '!'));
	if negated {
		chars.next();
	}

	let mut ranges = Vec::new();
	loop {
		if !ranges.is_empty() && chars.peek() == Some(&']') {
			chars.next();
			return Some(CharClass { negated, ranges });
		}
		let lo = class_member(chars)?;
		let hi = if chars.peek() == Some(&'-') {
			chars.next();
			class_member(chars)?
		} else {
			lo
		};
		ranges.push((lo, hi));
	}
}

/// Reads one member of a bracket expression. Unescaped `-` and `]` are
/// malformed here, as is the end of the pattern.
fn class_member(chars: &mut Peekable<Chars<'_>>) -> Option<char> {
	match chars.next()? {
		'\\' => chars.next(),
		'-' | ']' => None,
		c => Some(c),
	}
}

impl CharClass {
	/// Writes the class in `glob` syntax.
	///
	/// `glob` gives `!`, `-` and `]` positional meanings inside brackets, so
	/// those are split out of the ranges and placed where they are literal:
	/// `]` first, `!` never first, `-` last unless it must stand in front
	/// of a lone `!`.
	fn emit(&self, out: &mut String) {
		let mut pieces: Vec<(char, char)> = self.ranges.iter().copied().filter(|(lo, hi)| lo <= hi).collect();
		let mut specials = [(b'!', false), (b'-', false), (b']', false)];
		for (special, present) in &mut specials {
			let c = char::from(*special);
			let mut rest = Vec::with_capacity(pieces.len() + 1);
			for (lo, hi) in pieces {
				if lo <= c && c <= hi {
					*present = true;
					if lo < c {
						rest.push((lo, char::from(*special - 1)));
					}
					if c < hi {
						rest.push((char::from(*special + 1), hi));
					}
				} else {
					rest.push((lo, hi));
				}
			}
			pieces = rest;
		}
		let [(_, bang), (_, dash), (_, bracket)] = specials;

		if pieces.is_empty() && !bang && !dash && !bracket {
			// Only reversed ranges: the set is empty.
			out.push_str(if self.negated { "?" } else { "[!\u{0}-\u{10ffff}]" });
			return;
		}
		if !self.negated && !bracket && pieces.is_empty() && bang && !dash {
			out.push('!');
			return;
		}
		// `[!` opens a negation, so a plain class cannot start with `!`
		let lead_dash = dash && !self.negated && !bracket && pieces.is_empty();

		out.push('[');
		if self.negated {
			out.push('!');
		}
		if bracket {
			out.push(']');
		}
		if lead_dash {
			out.push('-');
		}
		for (lo, hi) in pieces {
			out.push(lo);
			out.push('-');
			out.push(hi);
		}
		if bang {
			out.push_str("!-!");
		}
		if dash && !lead_dash {
			out.push('-');
		}
		out.push(']');
	}
}

/// Compiles patterns, silently dropping malformed ones.
fn compile(patterns: &[String]) -> Vec<PathGlob> {
	patterns.iter().filter_map(|p| PathGlob::new(p)).collect()
}

/// Selects corpus paths with include and exclude patterns.
///
/// # Behavior
/// - With no include pattern, every path not excluded is kept.
/// - Otherwise a path is kept if it matches at least one include pattern
///   and no exclude pattern.
/// - Malformed patterns match nothing.
///
/// # Returns
/// The kept paths, deduplicated and sorted lexicographically, whatever the
/// iteration order of `paths`.
pub fn select<'a, I>(paths: I, includes: &[String], excludes: &[String]) -> Vec<String>
where
	I: IntoIterator<Item = &'a str>,
{
	// decided on the raw list: includes that all fail to compile select nothing
	let include_all = includes.is_empty();
	let includes = compile(includes);
	let excludes = compile(excludes);

	paths
		.into_iter()
		.filter(|path| !excludes.iter().any(|g| g.matches(path)))
		.filter(|path| include_all || includes.iter().any(|g| g.matches(path)))
		.map(str::to_owned)
		.collect::<BTreeSet<_>>()
		.into_iter()
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	const PATHS: [&str; 3] = ["adjectives/colors.txt", "nouns/animals.txt", "ipsum/corporate.txt"];

	fn globs(patterns: &[&str]) -> Vec<String> {
		patterns.iter().map(|p| (*p).to_owned()).collect()
	}

	#[test]
	fn no_includes_keeps_everything_not_excluded() {
		assert_eq!(
			select(PATHS, &[], &[]),
			vec!["adjectives/colors.txt", "ipsum/corporate.txt", "nouns/animals.txt"]
		);
		assert_eq!(
			select(PATHS, &[], &globs(&["ipsum/*"])),
			vec!["adjectives/colors.txt", "nouns/animals.txt"]
		);
	}

	#[test]
	fn includes_union_minus_excludes() {
		let kept = select(PATHS, &globs(&["**/*.txt"]), &globs(&["ipsum/**"]));
		assert_eq!(kept, vec!["adjectives/colors.txt", "nouns/animals.txt"]);

		let dir = select(PATHS, &globs(&["adjectives/**"]), &[]);
		assert_eq!(dir, vec!["adjectives/colors.txt"]);
	}

	#[test]
	fn overlapping_includes_are_deduplicated() {
		let kept = select(PATHS, &globs(&["nouns/*", "*/animals.txt", "nouns/animals.txt"]), &[]);
		assert_eq!(kept, vec!["nouns/animals.txt"]);
	}

	#[test]
	fn star_stays_within_one_segment() {
		let g = PathGlob::new("**/*.txt").unwrap();
		assert!(g.matches("nouns/animals.txt"));
		assert!(!g.matches("nouns/deep/fish.txt"));
		assert!(!g.matches("top.txt"));
		assert!(PathGlob::new("*.txt").unwrap().matches("top.txt"));
		assert!(!PathGlob::new("*").unwrap().matches("a/b"));
	}

	#[test]
	fn matching_is_case_sensitive() {
		assert!(!PathGlob::new("Nouns/*").unwrap().matches("nouns/animals.txt"));
	}

	#[test]
	fn classes_and_escapes() {
		assert!(PathGlob::new("nouns/[a-c]*").unwrap().matches("nouns/birds.txt"));
		assert!(!PathGlob::new("nouns/[^a-c]*").unwrap().matches("nouns/birds.txt"));
		assert!(PathGlob::new("nouns/[!a-c]*").unwrap().matches("nouns/zebras.txt"));
		assert!(PathGlob::new(r"odd/\*.txt").unwrap().matches("odd/*.txt"));
		assert!(!PathGlob::new(r"odd/\*.txt").unwrap().matches("odd/x.txt"));
		assert!(PathGlob::new("nouns/animal?.txt").unwrap().matches("nouns/animals.txt"));
	}

	#[test]
	fn escapes_inside_classes_stay_literal() {
		let bang = PathGlob::new(r"d/[\!x].txt").unwrap();
		assert!(bang.matches("d/!.txt"));
		assert!(bang.matches("d/x.txt"));
		assert!(!bang.matches("d/y.txt"));

		let dash = PathGlob::new(r"d/[a\-c].txt").unwrap();
		assert!(dash.matches("d/-.txt"));
		assert!(dash.matches("d/a.txt"));
		assert!(dash.matches("d/c.txt"));
		assert!(!dash.matches("d/b.txt"));

		let bracket = PathGlob::new(r"d/[\]a]").unwrap();
		assert!(bracket.matches("d/]"));
		assert!(bracket.matches("d/a"));
		assert!(!bracket.matches("d/b"));

		let negated = PathGlob::new(r"d/[^\]\-]").unwrap();
		assert!(negated.matches("d/b"));
		assert!(!negated.matches("d/]"));
		assert!(!negated.matches("d/-"));

		assert!(PathGlob::new(r"d/[\!]").unwrap().matches("d/!"));
		assert!(!PathGlob::new(r"d/[\!]").unwrap().matches("d/x"));
		assert!(PathGlob::new(r"d/[\-\!]").unwrap().matches("d/-"));
		assert!(PathGlob::new(r"d/[\-\!]").unwrap().matches("d/!"));
	}

	#[test]
	fn ranges_spanning_special_characters() {
		// '!' (0x21) and '-' (0x2d) both fall inside ' '..'0'
		let g = PathGlob::new("d/[ -0]").unwrap();
		for name in ["d/ ", "d/!", "d/-", "d/0", "d/%"] {
			assert!(g.matches(name), "{name}");
		}
		assert!(!g.matches("d/1"));
		assert!(!PathGlob::new("d/[z-a]").unwrap().matches("d/m"));
	}

	#[test]
	fn empty_or_open_classes_are_malformed() {
		assert!(PathGlob::new("d/[]a]").is_none());
		assert!(PathGlob::new("d/[a-]").is_none());
		assert!(PathGlob::new("d/[-a]").is_none());
		assert!(PathGlob::new("d/[^]").is_none());
		assert!(PathGlob::new("d/[ab").is_none());
	}

	#[test]
	fn malformed_only_includes_select_nothing() {
		let paths = ["nouns/[abc.txt", "nouns/animals.txt"];
		assert!(select(paths, &globs(&["nouns/[a*"]), &[]).is_empty());
		assert_eq!(
			select(paths, &globs(&["nouns/[a*", "nouns/a*"]), &[]),
			vec!["nouns/animals.txt"]
		);
	}

	#[test]
	fn malformed_patterns_match_nothing() {
		assert!(PathGlob::new("nouns/[a-").is_none());
		assert!(PathGlob::new("trailing\\").is_none());
		assert!(select(PATHS, &globs(&["nouns/[a-"]), &[]).is_empty());
		// a broken exclude excludes nothing
		assert_eq!(select(PATHS, &[], &globs(&["["])).len(), PATHS.len());
	}

	proptest! {
		#[test]
		fn selection_ignores_input_order(
			mut paths in prop::collection::vec("[ab]{1,2}/[xyz]{1,2}\\.txt", 0..20),
			seed in any::<u64>(),
		) {
			use rand::SeedableRng;
			use rand::seq::SliceRandom;

			let includes = globs(&["a*/*", "*/x*"]);
			let excludes = globs(&["*/z*"]);
			let first = select(paths.iter().map(String::as_str), &includes, &excludes);
			paths.shuffle(&mut rand::rngs::StdRng::seed_from_u64(seed));
			let second = select(paths.iter().map(String::as_str), &includes, &excludes);
			prop_assert_eq!(first, second);
		}
	}
}
