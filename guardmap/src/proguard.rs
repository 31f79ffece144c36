//! Functions to read mappings in the ProGuard/R8 `mapping.txt` format.
//!
//! # Format
//! Each class is introduced by an unindented line, followed by indented lines for its members:
//! ```text
//! # compiler: R8
//! com.example.Service -> a.b:
//!     int counter -> a
//!     12:14:void run(int):40:42 -> a
//!     void stop() -> b
//! ```
//! Class lines map the original name (left) to the obfuscated name (right, with a trailing colon). Member lines
//! may start with a line range like `12:14:`, which is dropped. Fields, recognized by the missing parameter list,
//! aren't kept.
//!
//! # Reading
//! [`load`] and [`load_file`] never fail: any error makes them return an empty [`MappingTable`] after reporting the
//! error to the given [`Diagnostics`]. If you want to handle the error yourself, use [`read`] or [`read_file`].

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use anyhow::{anyhow, bail, Context, Result};
use log::{debug, trace};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::lines::{Line, NestedLines};
use crate::names;
use crate::table::MappingTable;

/// Options for reading a mapping file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
	/// Also create package mappings, by mapping the package of each obfuscated class to the package of the
	/// original class.
	pub derive_packages: bool,
}

impl LoadOptions {
	pub fn with_packages() -> LoadOptions {
		LoadOptions { derive_packages: true }
	}
}

/// Loads a mapping file from the given path.
///
/// A missing or unreadable file gives an empty table, see [`load`].
pub fn load_file(path: impl AsRef<Path>, options: LoadOptions, diagnostics: &dyn Diagnostics) -> MappingTable {
	recover(read_file(path, options, diagnostics), diagnostics)
}

/// Loads mappings from the given reader.
///
/// If the input can't be read, or any class line or member line is malformed, the error is reported to
/// `diagnostics` and an empty table is returned. Member lines that appear before the first class line, and classes
/// whose obfuscated name is already mapped (together with their members), are reported and skipped, without
/// discarding the rest.
///
/// ```
/// use guardmap::{LoadOptions, LogDiagnostics};
///
/// let input = "\
/// se.hirt.jmc.tutorial.hotmethods.HotMethods -> a.a:
///     void main(java.lang.String[]) -> a
/// ";
/// let table = guardmap::proguard::load(&mut input.as_bytes(), LoadOptions::default(), &LogDiagnostics);
///
/// assert_eq!(table.resolve_class("a/a", false), "HotMethods");
/// assert_eq!(table.resolve_method("se/hirt/jmc/tutorial/hotmethods/HotMethods", "a"), "main");
/// ```
pub fn load(reader: impl Read, options: LoadOptions, diagnostics: &dyn Diagnostics) -> MappingTable {
	recover(read(reader, options, diagnostics), diagnostics)
}

fn recover(result: Result<MappingTable>, diagnostics: &dyn Diagnostics) -> MappingTable {
	match result {
		Ok(table) => table,
		Err(error) => {
			diagnostics.report(Diagnostic::LoadFailed { error });
			MappingTable::new()
		},
	}
}

/// Reads a mapping file, by opening the file given by the path.
pub fn read_file(path: impl AsRef<Path>, options: LoadOptions, diagnostics: &dyn Diagnostics) -> Result<MappingTable> {
	let path = path.as_ref();
	let file = File::open(path)
		.with_context(|| anyhow!("failed to open mappings file {path:?}"))?;

	read(file, options, diagnostics)
		.with_context(|| anyhow!("failed to read mappings file {path:?} as proguard mappings"))
}

/// Reads mappings from the given reader.
///
/// Unlike [`load`], this returns the first error encountered. Member lines before the first class line and
/// duplicate classes are still only reported to `diagnostics`.
pub fn read(reader: impl Read, options: LoadOptions, diagnostics: &dyn Diagnostics) -> Result<MappingTable> {
	let mut lines = BufReader::new(reader)
		.lines()
		.enumerate()
		.map(|(line_number, line)| -> Result<Line> {
			let line = line.with_context(|| anyhow!("failed to read line {}", line_number + 1))?;
			// a byte order mark can only be at the start of the file
			let line = if line_number == 0 { line.trim_start_matches('\u{feff}') } else { line.as_str() };
			Ok(Line::new(line_number + 1, line))
		})
		.filter(|line| !matches!(line, Ok(line) if line.is_ignored()))
		.peekable();

	let mut table = MappingTable::new();

	NestedLines::new(&mut lines).on_every_line(|iter, line| {
		if line.is_indented() {
			diagnostics.report(Diagnostic::OrphanMember {
				line_number: line.line_number(),
				line: line.content().to_owned(),
			});
			return Ok(());
		}

		let (original, obfuscated) = line.split_mapping()?;
		let obfuscated = obfuscated.strip_suffix(':')
			.with_context(|| anyhow!("class mapping {obfuscated:?} doesn't end with a colon"))?;
		if original.is_empty() || obfuscated.is_empty() {
			bail!("empty class name in class mapping {:?}", line.content());
		}

		if options.derive_packages {
			derive_package(&mut table, original, obfuscated);
		}

		let mut class = table.add_class(original, obfuscated);
		if class.is_none() {
			diagnostics.report(Diagnostic::DuplicateClass {
				line_number: line.line_number(),
				line: line.content().to_owned(),
			});
		}

		iter.next_level().on_every_line(|_, line| {
			let (original, obfuscated) = line.split_mapping()?;
			if obfuscated.is_empty() {
				bail!("empty obfuscated name in member mapping {:?}", line.content());
			}

			match parse_member(original) {
				Member::Method(signature) => {
					if let Some(class) = &mut class {
						class.add_method(obfuscated, signature);
					}
				},
				Member::Field(field) => {
					trace!("ignoring field mapping {field:?} -> {obfuscated:?}");
				},
			}
			Ok(())
		}).context("reading class members")
	}).context("reading lines")?;

	debug!("read {} class mappings and {} package mappings", table.class_count(), table.package_count());

	Ok(table)
}

fn derive_package(table: &mut MappingTable, original: &str, obfuscated: &str) {
	let original = names::to_internal(original);
	let obfuscated = names::to_internal(obfuscated);

	// classes in the default package have no package to map
	if let (Some(original), Some(obfuscated)) = (names::package_of(&original), names::package_of(&obfuscated)) {
		table.add_package(original, obfuscated);
	}
}

#[derive(Debug, PartialEq)]
enum Member<'a> {
	Method(&'a str),
	Field(&'a str),
}

/// Classifies the left hand side of a member line, stripping the line number information R8 and ProGuard add.
///
/// Entries with a parameter list are methods, entries of the form `type name` are fields. A lone name is taken as
/// a method name.
fn parse_member(entry: &str) -> Member<'_> {
	let entry = strip_line_range(entry.trim());

	if let Some(close) = entry.rfind(')') {
		// R8 puts the original line range after the parameter list: `void run():40:42`
		let (signature, suffix) = entry.split_at(close + 1);
		if suffix.starts_with(':') && suffix.chars().all(|c| c == ':' || c.is_ascii_digit()) {
			return Member::Method(signature);
		}
		Member::Method(entry)
	} else if entry.contains(char::is_whitespace) {
		Member::Field(entry)
	} else {
		Member::Method(entry)
	}
}

/// Strips up to two leading numbers each followed by a colon, as in `12:14:void run()`.
fn strip_line_range(entry: &str) -> &str {
	let mut rest = entry;
	for _ in 0..2 {
		match rest.split_once(':') {
			Some((number, tail)) if !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()) => rest = tail,
			_ => break,
		}
	}
	rest
}

#[cfg(test)]
mod testing {
	use std::cell::RefCell;
	use pretty_assertions::assert_eq;
	use anyhow::Result;
	use crate::diagnostics::Diagnostic;
	use crate::proguard::{load, parse_member, read, strip_line_range, LoadOptions, Member};

	#[test]
	fn line_ranges() {
		assert_eq!(strip_line_range("12:14:void run()"), "void run()");
		assert_eq!(strip_line_range("7:void run()"), "void run()");
		assert_eq!(strip_line_range("void run()"), "void run()");
		assert_eq!(strip_line_range("1:2:3:x"), "3:x");
	}

	#[test]
	fn members() {
		assert_eq!(parse_member("12:14:void run(int)"), Member::Method("void run(int)"));
		assert_eq!(parse_member("13:13:java.util.Map$Entry eldest():168:168"), Member::Method("java.util.Map$Entry eldest()"));
		assert_eq!(parse_member("void <init>()"), Member::Method("void <init>()"));
		assert_eq!(parse_member("run"), Member::Method("run"));
		assert_eq!(parse_member("int counter"), Member::Field("int counter"));
		assert_eq!(parse_member("java.lang.String[] names"), Member::Field("java.lang.String[] names"));
	}

	#[test]
	fn read_classes_and_methods() -> Result<()> {
		let input = "\
# compiler: R8
com.example.Service -> a.b:
    int counter -> a
    12:14:void run(int):40:42 -> a
    void stop() -> b

com.example.Main -> a.c:
    void main(java.lang.String[]) -> a
Standalone -> d:
";
		let table = read(input.as_bytes(), LoadOptions::default(), &|d: Diagnostic| panic!("unexpected {d}"))?;

		assert_eq!(table.class_count(), 3);
		assert_eq!(table.original_class("a/b"), Some("com/example/Service"));
		assert_eq!(table.original_class("a.c"), Some("com/example/Main"));
		assert_eq!(table.resolve_class("d", true), "Standalone");
		assert_eq!(table.resolve_method("com/example/Service", "a"), "run");
		assert_eq!(table.resolve_member("com/example/Service", "a"), Some("void run(int)"));
		assert_eq!(table.resolve_method("com/example/Service", "b"), "stop");
		assert_eq!(table.resolve_method("com/example/Main", "a"), "main");
		assert_eq!(table.package_count(), 0);
		Ok(())
	}

	#[test]
	fn read_packages() -> Result<()> {
		let input = "\
com.example.Service -> a.b:
com.example.Main -> a.c:
com.example.util.Strings -> b.a:
Standalone -> d:
";
		let table = read(input.as_bytes(), LoadOptions::with_packages(), &|d: Diagnostic| panic!("unexpected {d}"))?;

		assert_eq!(table.package_count(), 2);
		assert_eq!(table.resolve_package("a"), Some("com.example".to_owned()));
		assert_eq!(table.resolve_package("b"), Some("com.example.util".to_owned()));
		assert_eq!(table.resolve_package("d"), None);
		Ok(())
	}

	#[test]
	fn orphan_members_are_skipped() {
		let input = "    void run() -> a\ncom.example.Service -> a.b:\n    void stop() -> b\n";
		let reports = RefCell::new(Vec::new());
		let table = load(input.as_bytes(), LoadOptions::default(), &|d: Diagnostic| reports.borrow_mut().push(d));

		assert_eq!(table.resolve_method("com/example/Service", "b"), "stop");

		let reports = reports.into_inner();
		assert_eq!(reports.len(), 1);
		assert!(matches!(&reports[0], Diagnostic::OrphanMember { line_number: 1, line } if line == "void run() -> a"));
	}

	#[test]
	fn duplicate_classes_are_skipped() {
		let input = "\
com.example.Service -> a.b:
    void run() -> a
com.example.Main -> a.b:
    void main(java.lang.String[]) -> a
com.example.Other -> a.c:
    void stop() -> b
";
		let reports = RefCell::new(Vec::new());
		let table = load(input.as_bytes(), LoadOptions::with_packages(), &|d: Diagnostic| reports.borrow_mut().push(d));

		assert_eq!(table.class_count(), 2);
		assert_eq!(table.resolve_class("a/b", true), "com.example.Service");
		assert_eq!(table.resolve_method("com/example/Service", "a"), "run");
		assert_eq!(table.resolve_method("com/example/Main", "a"), "a");
		assert_eq!(table.resolve_method("com/example/Other", "b"), "stop");

		let reports = reports.into_inner();
		assert_eq!(reports.len(), 1);
		assert!(matches!(&reports[0], Diagnostic::DuplicateClass { line_number: 3, line } if line == "com.example.Main -> a.b:"));
	}

	#[test]
	fn byte_order_mark_and_crlf() -> Result<()> {
		let input = "\u{feff}com.example.Service -> a.b:\r\n    void stop() -> b\r\n";
		let table = read(input.as_bytes(), LoadOptions::default(), &|d: Diagnostic| panic!("unexpected {d}"))?;

		assert_eq!(table.original_class("a/b"), Some("com/example/Service"));
		assert_eq!(table.resolve_method("com/example/Service", "b"), "stop");
		Ok(())
	}

	#[test]
	fn malformed_input_gives_empty_table() {
		let inputs = [
			"com.example.Service a.b:\n",
			"com.example.Service -> a.b\n",
			"com.example.Service -> a.b:\n    void run()\n",
			"com.example.Service -> :\n",
		];

		for input in inputs {
			let reports = RefCell::new(Vec::new());
			let table = load(input.as_bytes(), LoadOptions::with_packages(), &|d: Diagnostic| reports.borrow_mut().push(d));

			assert!(table.is_empty(), "{input:?} should give an empty table");
			let reports = reports.into_inner();
			assert!(matches!(reports.as_slice(), [Diagnostic::LoadFailed { .. }]), "{input:?} should report a failure: {reports:?}");
		}
	}
}
