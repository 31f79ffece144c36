//! Rendering of methods, stack traces and other symbols into readable text.
//!
//! All rendering goes through a [`Renderer`], which holds the [`MappingTable`] used for deobfuscating names. Names
//! given to the renderer are the obfuscated ones, as found in a recording.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;
use anyhow::{anyhow, bail, Context, Error, Result};
use guardmap::MappingTable;

pub mod options;
mod signature;
mod stack_trace;
mod symbols;

pub use signature::UNAVAILABLE;
pub use stack_trace::TRUNCATION_MARKER;
pub use symbols::DEFAULT_PACKAGE;

/// Renders symbols, deobfuscating them with a shared mapping table.
///
/// Cloning a renderer is cheap, the table is shared.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
	mappings: Arc<MappingTable>,
}

impl Renderer {
	pub fn new(mappings: Arc<MappingTable>) -> Renderer {
		Renderer { mappings }
	}

	/// Creates a renderer that shows every name as it is.
	pub fn without_mappings() -> Renderer {
		Renderer::default()
	}

	pub fn mappings(&self) -> &MappingTable {
		&self.mappings
	}
}

/// A method as it's referenced by a frame of a recording: the obfuscated class and method name, and the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodRef {
	pub class_name: String,
	pub method_name: String,
	pub descriptor: String,
}

impl MethodRef {
	pub fn new(class_name: impl Into<String>, method_name: impl Into<String>, descriptor: impl Into<String>) -> MethodRef {
		MethodRef {
			class_name: class_name.into(),
			method_name: method_name.into(),
			descriptor: descriptor.into(),
		}
	}
}

impl Display for MethodRef {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {} {}", self.class_name, self.method_name, self.descriptor)
	}
}

/// Parses a method reference, either as three whitespace separated parts `a/b/C m (I)V`, or in the joined form
/// `a.b.C.m(I)V`.
///
/// ```
/// use jfr_retrace::MethodRef;
///
/// let method: MethodRef = "a/b/C m (I)V".parse().unwrap();
/// assert_eq!(method, MethodRef::new("a/b/C", "m", "(I)V"));
///
/// let method: MethodRef = "a.b.C.m(I)V".parse().unwrap();
/// assert_eq!(method, MethodRef::new("a.b.C", "m", "(I)V"));
/// ```
impl FromStr for MethodRef {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		let parts: Vec<&str> = s.split_whitespace().collect();
		match parts.as_slice() {
			[class_name, method_name, descriptor] => Ok(MethodRef::new(*class_name, *method_name, *descriptor)),
			[joined] => {
				let start = joined.find('(')
					.with_context(|| anyhow!("method reference {s:?} has no descriptor"))?;
				let (qualified, descriptor) = joined.split_at(start);
				let (class_name, method_name) = qualified.rsplit_once('.')
					.with_context(|| anyhow!("method reference {s:?} has no class name"))?;
				if class_name.is_empty() || method_name.is_empty() {
					bail!("method reference {s:?} has an empty class or method name");
				}
				Ok(MethodRef::new(class_name, method_name, descriptor))
			},
			_ => bail!("expected `class method descriptor` or `class.method(descriptor)`, got {s:?}"),
		}
	}
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use anyhow::Result;
	use crate::render::MethodRef;

	#[test]
	fn parse_method_refs() -> Result<()> {
		assert_eq!("a/b/C m (I)V".parse::<MethodRef>()?, MethodRef::new("a/b/C", "m", "(I)V"));
		assert_eq!("  a/b/C\tm   ()V ".parse::<MethodRef>()?, MethodRef::new("a/b/C", "m", "()V"));
		assert_eq!("a.b.C.<init>()V".parse::<MethodRef>()?, MethodRef::new("a.b.C", "<init>", "()V"));
		assert_eq!("Main.main([Ljava/lang/String;)V".parse::<MethodRef>()?, MethodRef::new("Main", "main", "([Ljava/lang/String;)V"));

		assert!("a/b/C m".parse::<MethodRef>().is_err());
		assert!("a/b/C m (I)V extra".parse::<MethodRef>().is_err());
		assert!("main()V".parse::<MethodRef>().is_err());
		assert!("a.b.C.m".parse::<MethodRef>().is_err());
		assert!(".m()V".parse::<MethodRef>().is_err());
		Ok(())
	}

	#[test]
	fn display_parses_back() -> Result<()> {
		let method = MethodRef::new("a/b/C", "m", "(I)V");
		assert_eq!(method.to_string().parse::<MethodRef>()?, method);
		Ok(())
	}
}
