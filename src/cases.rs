use nom::Err as NomErr;
use nom::IResult;
use nom::Parser;
use nom::error::ErrorKind as NomErrorKind;
use nom::error::ParseError;

use crate::automaton::Automaton;
use crate::trie::Trie;

/// Builds a fresh automaton over `patterns` and returns the maximum
/// nesting count. Every call is an isolated case; nothing survives
/// between calls.
pub fn count_nested_patterns<I, S>(patterns: I) -> usize
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut trie: Trie = Trie::new();
	for pattern in patterns {
		trie.insert(pattern.as_ref());
	}
	Automaton::resolve(trie).max_nesting()
}

/// Runs every case in `input` and returns the accumulated output,
/// one decimal answer per line, in case order.
///
/// A case is a pattern count followed by that many whitespace-delimited
/// pattern tokens; a count of zero stops processing. Malformed input
/// fails fast, distinguishing a malformed count from a truncated
/// pattern list.
pub fn run(input: &str) -> Result<String, CaseError<'_>> {
	let mut remaining: &str = input;
	let mut output: String = String::new();

	loop {
		let count: usize = match parse_count(remaining) {
			Ok((rest, count)) => {
				remaining = rest;
				count
			},
			Err(err) => {
				return Err(CaseError::at(input, err));
			},
		};
		if count == 0 {
			break;
		}

		// No `with_capacity(count)`: the declared count is untrusted input.
		let mut patterns: Vec<&str> = Vec::new();
		for read in 0..count {
			match parse_pattern(remaining) {
				Ok((rest, pattern)) => {
					remaining = rest;
					patterns.push(pattern);
				},
				Err(err) => {
					let mut error: CaseError<'_> = CaseError::at(input, err);
					error.kind = CaseErrorKind::TruncatedPatternList {
						declared: count,
						read,
					};
					return Err(error);
				},
			}
		}

		let nested: usize = count_nested_patterns(patterns);
		debug!("case of {count} patterns nests {nested}");
		output += &nested.to_string();
		output.push('\n');
	}

	Ok(output)
}

#[derive(Debug)]
pub struct CaseError<'a> {
	consumed: &'a str,
	remaining: &'a str,
	kind: CaseErrorKind,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CaseErrorKind {
	MalformedCount,
	TruncatedPatternList { declared: usize, read: usize },
	Nom(NomErrorKind),
}

#[derive(Debug)]
struct CaseParsingError<'a> {
	pub input: &'a str,
	pub kind: CaseErrorKind,
}

impl<'a> ParseError<&'a str> for CaseParsingError<'a> {
	fn from_error_kind(input: &'a str, nom: NomErrorKind) -> Self {
		Self {
			input,
			kind: CaseErrorKind::Nom(nom),
		}
	}

	fn append(_input: &'a str, _kind: NomErrorKind, other: Self) -> Self {
		other
	}
}

impl<'a> CaseParsingError<'a> {
	fn new(input: &'a str, kind: CaseErrorKind) -> Self {
		Self { input, kind }
	}
}

type ParsingResult<'a, T> = IResult<&'a str, T, CaseParsingError<'a>>;

impl<'a> CaseError<'a> {
	fn at(input: &'a str, err: NomErr<CaseParsingError<'a>>) -> Self {
		match err {
			NomErr::Error(err) | NomErr::Failure(err) => {
				let consumed: &str = input.strip_suffix(err.input).unwrap_or(input);
				Self {
					consumed,
					remaining: err.input,
					kind: err.kind,
				}
			},
			// Complete parsers only; a starved parser reports at the end.
			NomErr::Incomplete(_) => Self {
				consumed: input,
				remaining: "",
				kind: CaseErrorKind::Nom(NomErrorKind::Complete),
			},
		}
	}

	pub fn kind(&self) -> CaseErrorKind {
		self.kind
	}

	/// Byte offset into the original input where parsing failed.
	pub fn offset(&self) -> usize {
		self.consumed.len()
	}

	/// Unparsed tail starting at the failure point.
	pub fn remaining(&self) -> &'a str {
		self.remaining
	}
}

impl std::fmt::Display for CaseError<'_> {
	fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			CaseErrorKind::MalformedCount => {
				write!(fmt, "malformed case count at byte {}", self.offset())
			},
			CaseErrorKind::TruncatedPatternList { declared, read } => {
				write!(
					fmt,
					"truncated pattern list at byte {}: case declared {declared} patterns, found {read}",
					self.offset()
				)
			},
			CaseErrorKind::Nom(kind) => {
				write!(fmt, "parse failure ({kind:?}) at byte {}", self.offset())
			},
		}
	}
}

fn parse_count(input: &str) -> ParsingResult<'_, usize> {
	use nom::character::complete::digit1;
	use nom::character::complete::multispace0;
	use nom::sequence::preceded;

	let (remaining, digits): (&str, &str) =
		preceded(multispace0, digit1)
			.parse(input)
			.map_err(|_: NomErr<CaseParsingError<'_>>| {
				NomErr::Error(CaseParsingError::new(input, CaseErrorKind::MalformedCount))
			})?;

	match digits.parse::<usize>() {
		Ok(count) => Ok((remaining, count)),
		Err(_) => Err(NomErr::Error(CaseParsingError::new(
			input,
			CaseErrorKind::MalformedCount,
		))),
	}
}

fn parse_pattern(input: &str) -> ParsingResult<'_, &str> {
	use nom::bytes::complete::take_till1;
	use nom::character::complete::multispace0;
	use nom::sequence::preceded;

	preceded(multispace0, take_till1(char::is_whitespace)).parse(input)
}
