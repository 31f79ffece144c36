use std::fmt::Debug;
use std::iter::Peekable;
use anyhow::{anyhow, Context, Result};

const SEPARATOR: &str = " -> ";

/// One line of a mapping file.
///
/// A line either is a class line, or it is indented and belongs to the class line above it.
#[derive(Debug)]
pub(crate) struct Line {
	line_number: usize,
	indented: bool,
	content: String,
}

impl Line {
	pub(crate) fn new(line_number: usize, line: &str) -> Line {
		Line {
			line_number,
			indented: line.starts_with(char::is_whitespace),
			content: line.trim().to_owned(),
		}
	}

	pub(crate) fn line_number(&self) -> usize {
		self.line_number
	}

	pub(crate) fn is_indented(&self) -> bool {
		self.indented
	}

	pub(crate) fn content(&self) -> &str {
		&self.content
	}

	/// Blank lines and `#` comments carry no mappings.
	pub(crate) fn is_ignored(&self) -> bool {
		self.content.is_empty() || self.content.starts_with('#')
	}

	/// Splits the line into the original name (left) and the obfuscated name (right).
	pub(crate) fn split_mapping(&self) -> Result<(&str, &str)> {
		let (original, obfuscated) = self.content.split_once(SEPARATOR)
			.with_context(|| anyhow!("expected {SEPARATOR:?} in line {}: {:?}", self.line_number, self.content))?;

		Ok((original.trim(), obfuscated.trim()))
	}

	fn depth(&self) -> usize {
		usize::from(self.indented)
	}
}

/// Iterates over lines of at least some depth.
///
/// Calling [`NestedLines::next_level`] gives an iterator that stops at the first line that isn't indented further,
/// so that the lines belonging to a class line can be consumed right after it.
pub(crate) struct NestedLines<'a, I: Iterator> {
	depth: usize,
	iter: &'a mut Peekable<I>,
}

impl<'a, I> NestedLines<'a, I>
where
	I: Iterator<Item=Result<Line>>,
{
	pub(crate) fn new(iter: &'a mut Peekable<I>) -> NestedLines<'a, I> {
		NestedLines { depth: 0, iter }
	}

	pub(crate) fn next_level(&mut self) -> NestedLines<'_, I> {
		NestedLines {
			depth: self.depth + 1,
			iter: self.iter,
		}
	}

	pub(crate) fn on_every_line(mut self, mut f: impl FnMut(&mut Self, Line) -> Result<()>) -> Result<()> {
		while let Some(line) = self.next() {
			let line = line?;
			let line_number = line.line_number();

			f(&mut self, line)
				.with_context(|| anyhow!("in line {line_number}"))?;
		}
		Ok(())
	}
}

impl<I> Iterator for NestedLines<'_, I>
where
	I: Iterator<Item=Result<Line>>,
{
	type Item = Result<Line>;

	fn next(&mut self) -> Option<Self::Item> {
		match self.iter.peek()? {
			Ok(line) if line.depth() < self.depth => None, // cancel an inner loop
			_ => self.iter.next(),
		}
	}
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use anyhow::Result;
	use crate::lines::{Line, NestedLines};

	fn lines(input: &str) -> Vec<Result<Line>> {
		input.lines()
			.enumerate()
			.map(|(line_number, line)| Ok(Line::new(line_number + 1, line)))
			.collect()
	}

	#[test]
	fn split() -> Result<()> {
		let line = Line::new(1, "    12:14:void run() -> a");
		assert!(line.is_indented());
		assert_eq!(line.split_mapping()?, ("12:14:void run()", "a"));

		let line = Line::new(2, "a.b.C -> x:");
		assert!(!line.is_indented());
		assert_eq!(line.split_mapping()?, ("a.b.C", "x:"));

		assert!(Line::new(3, "a.b.C x:").split_mapping().is_err());
		assert!(Line::new(4, "\t# comment").is_ignored());
		assert!(Line::new(5, "   ").is_ignored());
		Ok(())
	}

	#[test]
	fn nesting() -> Result<()> {
		let mut iter = lines("A\n a\n b\nB\nC\n c\n").into_iter().peekable();

		let mut seen = Vec::new();
		NestedLines::new(&mut iter).on_every_line(|iter, line| {
			let mut members = Vec::new();
			iter.next_level().on_every_line(|_, line| {
				members.push(line.content().to_owned());
				Ok(())
			})?;
			seen.push((line.content().to_owned(), members));
			Ok(())
		})?;

		assert_eq!(seen, [
			("A".to_owned(), vec!["a".to_owned(), "b".to_owned()]),
			("B".to_owned(), vec![]),
			("C".to_owned(), vec!["c".to_owned()]),
		]);
		Ok(())
	}
}
