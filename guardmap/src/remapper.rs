//! Remapping of class names and of the class names inside descriptors.
//!
//! In case you want to implement a remapper yourself, you only need to define [`ClassRemapper::map_class_fail`].
//!
//! # What is a "remapper"?
//! A remapper answers the question for you "what is the original name of this obfuscated class?"

use anyhow::{bail, Result};

/// A remapper supporting remapping of class names and descriptors.
///
/// All names are in the internal form (`a/b/C`).
pub trait ClassRemapper {
	/// Maps a class name to its original one, if the mapping exists.
	///
	/// If the mapping doesn't exist, returns `None`.
	fn map_class_fail(&self, class: &str) -> Option<&str>;

	/// Maps a class name to its original one, if the mapping doesn't exist, return the old one.
	///
	/// Do not implement this yourself.
	fn map_class(&self, class: &str) -> String {
		self.map_class_fail(class).unwrap_or(class).to_owned()
	}

	/// Maps all class names in a field, method or return descriptor.
	///
	/// Note that this relies on the fact that for non-existing class mappings class names are just copied over.
	///
	/// Do not implement this yourself.
	///
	/// ```
	/// use guardmap::{ClassRemapper, MappingTable};
	///
	/// let mut table = MappingTable::new();
	/// table.add_class("org/example/Service", "a/a").unwrap();
	///
	/// assert_eq!(
	///     table.map_desc("(La/a;I[La/a;)Ljava/lang/String;").unwrap(),
	///     "(Lorg/example/Service;I[Lorg/example/Service;)Ljava/lang/String;"
	/// );
	/// assert!(table.map_desc("(La/a").is_err());
	/// ```
	fn map_desc(&self, desc: &str) -> Result<String> {
		let mut s = String::with_capacity(desc.len());

		let mut rest = desc;
		while let Some(start) = rest.find('L') {
			let (before, class_and_after) = rest.split_at(start + 1);
			s.push_str(before);

			let Some((class_name, after)) = class_and_after.split_once(';') else {
				bail!("descriptor {desc:?} has a missing semicolon somewhere");
			};

			s.push_str(self.map_class_fail(class_name).unwrap_or(class_name));
			s.push(';');
			rest = after;
		}
		s.push_str(rest);

		Ok(s)
	}
}
