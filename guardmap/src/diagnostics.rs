//! Reporting of problems found while loading mappings.
//!
//! Loading never fails outwards, so this is the only way a caller learns that (parts of) a mapping file were
//! ignored. Use [`LogDiagnostics`] to forward everything to the [`log`] facade, or pass a closure to collect the
//! reports yourself:
//! ```
//! use std::cell::RefCell;
//! use guardmap::{Diagnostic, LoadOptions};
//!
//! let reports = RefCell::new(Vec::new());
//! let sink = |diagnostic: Diagnostic| reports.borrow_mut().push(diagnostic);
//!
//! let table = guardmap::proguard::load(&mut "no separator here".as_bytes(), LoadOptions::default(), &sink);
//!
//! assert!(table.is_empty());
//! assert_eq!(reports.borrow().len(), 1);
//! ```

use std::fmt::{Display, Formatter};
use log::warn;

#[derive(Debug)]
pub enum Diagnostic {
	/// The mapping source was rejected as a whole, an empty table is used instead.
	LoadFailed {
		error: anyhow::Error,
	},
	/// A member line appeared before any class line, and was skipped.
	OrphanMember {
		line_number: usize,
		line: String,
	},
	/// A class line mapped an obfuscated name that was already mapped. It was skipped together with its members.
	DuplicateClass {
		line_number: usize,
		line: String,
	},
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Diagnostic::LoadFailed { error } => write!(f, "failed to load mappings, no deobfuscation will be done: {error:#}"),
			Diagnostic::OrphanMember { line_number, line } => write!(f, "skipping member mapping without a class in line {line_number}: {line:?}"),
			Diagnostic::DuplicateClass { line_number, line } => write!(f, "skipping class mapping for an already mapped class in line {line_number}: {line:?}"),
		}
	}
}

/// A sink for [`Diagnostic`]s.
pub trait Diagnostics {
	fn report(&self, diagnostic: Diagnostic);
}

impl<F: Fn(Diagnostic)> Diagnostics for F {
	fn report(&self, diagnostic: Diagnostic) {
		self(diagnostic)
	}
}

/// Writes every [`Diagnostic`] as a warning to the [`log`] facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
	fn report(&self, diagnostic: Diagnostic) {
		warn!("{diagnostic}");
	}
}
