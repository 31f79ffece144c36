use indexmap::IndexMap;
use indexmap::map::Entry;
use log::{debug, trace};
use javadesc::Type;
use crate::names;
use crate::remapper::ClassRemapper;

/// The lookup table from obfuscated names to original names.
///
/// All names are stored in the internal form (`a/b/C`). Methods are stored per original class name, so every key of
/// the method tables is also a value of the class table.
///
/// A table is built once (usually by [`crate::proguard::load`]) and then only read from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingTable {
	classes: IndexMap<String, String>,
	packages: IndexMap<String, String>,
	members: IndexMap<String, ClassMembers>,
}

/// The method mappings of one class, from obfuscated name to the original signature (or plain name).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassMembers {
	methods: IndexMap<String, String>,
}

impl ClassMembers {
	/// Adds a method mapping.
	///
	/// ProGuard gives overloads the same obfuscated name. Only the name of an entry is ever shown, so for a name
	/// that's already mapped the first mapping is kept.
	pub fn add_method(&mut self, obfuscated: impl Into<String>, original: impl Into<String>) -> &mut Self {
		let original: String = original.into();
		match self.methods.entry(obfuscated.into()) {
			Entry::Occupied(e) => {
				trace!("keeping method mapping {:?} -> {:?}, ignoring {original:?}", e.key(), e.get());
			},
			Entry::Vacant(e) => {
				e.insert(original);
			},
		}
		self
	}

	pub fn get(&self, obfuscated: &str) -> Option<&str> {
		self.methods.get(obfuscated).map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.methods.len()
	}

	pub fn is_empty(&self) -> bool {
		self.methods.is_empty()
	}
}

impl MappingTable {
	/// Creates a table without any mappings. Every lookup on it returns the name given.
	pub fn new() -> MappingTable {
		MappingTable::default()
	}

	pub fn is_empty(&self) -> bool {
		self.classes.is_empty() && self.packages.is_empty() && self.members.is_empty()
	}

	pub fn class_count(&self) -> usize {
		self.classes.len()
	}

	pub fn package_count(&self) -> usize {
		self.packages.len()
	}

	/// Adds a class mapping, and returns the (possibly new) method table of the original class.
	///
	/// Names may be given in either form. If the obfuscated name is already mapped, the first mapping is kept and
	/// `None` is returned.
	///
	/// ```
	/// use guardmap::MappingTable;
	///
	/// let mut table = MappingTable::new();
	/// table.add_class("x/Y/Z", "a/b/C").unwrap()
	///     .add_method("m", "run");
	///
	/// assert_eq!(table.resolve_class("a/b/C", false), "Z");
	/// assert_eq!(table.resolve_class("a/b/C", true), "x.Y.Z");
	/// assert_eq!(table.resolve_method("x/Y/Z", "m"), "run");
	/// assert_eq!(table.resolve_method("x/Y/Z", "n"), "n");
	///
	/// assert!(table.add_class("q/R", "a.b.C").is_none());
	/// assert_eq!(table.resolve_class("a/b/C", true), "x.Y.Z");
	/// ```
	pub fn add_class(&mut self, original: &str, obfuscated: &str) -> Option<&mut ClassMembers> {
		let original = names::to_internal(original).into_owned();
		let obfuscated = names::to_internal(obfuscated).into_owned();

		match self.classes.entry(obfuscated) {
			Entry::Occupied(e) => {
				debug!("class {:?} is mapped to both {:?} and {original:?}, keeping the first", e.key(), e.get());
				return None;
			},
			Entry::Vacant(e) => {
				e.insert(original.clone());
			},
		}

		Some(self.members.entry(original).or_default())
	}

	/// Adds a package mapping. If the obfuscated package is already mapped, the first mapping is kept.
	pub fn add_package(&mut self, original: &str, obfuscated: &str) {
		let original = names::to_internal(original).into_owned();
		let obfuscated = names::to_internal(obfuscated).into_owned();

		match self.packages.entry(obfuscated) {
			Entry::Occupied(e) => {
				if *e.get() != original {
					debug!("package {:?} is mapped to both {:?} and {original:?}, keeping the first", e.key(), e.get());
				}
			},
			Entry::Vacant(e) => {
				e.insert(original);
			},
		}
	}

	/// Returns the original name of a class, in the internal form, if there's a mapping for it.
	pub fn original_class(&self, name: &str) -> Option<&str> {
		self.classes.get(&*names::to_internal(name)).map(String::as_str)
	}

	/// Returns the original name of a package, in the internal form, if there's a mapping for it.
	pub fn original_package(&self, name: &str) -> Option<&str> {
		self.packages.get(&*names::to_internal(name)).map(String::as_str)
	}

	/// Returns the name of a class for displaying it, with `.` as separator.
	///
	/// The name is first replaced by its original if there's a mapping, and then cut down to the simple name if
	/// `qualified` is `false`. Unmapped names are only converted.
	pub fn resolve_class(&self, name: &str, qualified: bool) -> String {
		let internal = names::to_internal(name);
		let current = self.classes.get(&*internal).map_or(&*internal, String::as_str);
		names::to_display(current, qualified)
	}

	/// Returns the original name of a package for displaying it, or `None` if the package isn't mapped.
	pub fn resolve_package(&self, name: &str) -> Option<String> {
		self.original_package(name)
			.map(|package| names::to_display(package, true))
	}

	/// Returns the full original entry of a method, as it's written in the mapping file (like `void run(int)`).
	///
	/// The class must be given by its original name.
	pub fn resolve_member(&self, original_class: &str, obfuscated_method: &str) -> Option<&str> {
		self.members.get(&*names::to_internal(original_class))?
			.get(obfuscated_method)
	}

	/// Returns the original name of a method, or `obfuscated_method` if there's no mapping for it.
	///
	/// The class must be given by its original name.
	pub fn resolve_method(&self, original_class: &str, obfuscated_method: &str) -> String {
		self.resolve_member(original_class, obfuscated_method)
			.map_or(obfuscated_method, method_name)
			.to_owned()
	}

	/// Deobfuscates a symbol constant as found in a constant pool of a recording.
	///
	/// Tries, in that order, an array type of a class (`[La/b;`), a class name and a package name. All of these
	/// must be in the internal form, and the result is in the internal form too. Returns `None` if nothing matched.
	///
	/// ```
	/// use guardmap::MappingTable;
	///
	/// let mut table = MappingTable::new();
	/// table.add_class("de/docware/Foo", "a/b").unwrap();
	/// table.add_package("de/docware", "a");
	///
	/// assert_eq!(table.resolve_constant("a/b").as_deref(), Some("de/docware/Foo"));
	/// assert_eq!(table.resolve_constant("[[La/b;").as_deref(), Some("[[Lde/docware/Foo;"));
	/// assert_eq!(table.resolve_constant("a").as_deref(), Some("de/docware"));
	/// assert_eq!(table.resolve_constant("run"), None);
	/// ```
	pub fn resolve_constant(&self, constant: &str) -> Option<String> {
		if constant.starts_with('[') {
			if let Ok(t) = javadesc::decode_type(constant) {
				if let Type::Object(class_name) = t.innermost() {
					if self.classes.contains_key(class_name) {
						return self.map_desc(constant).ok();
					}
				}
			}
		}

		self.classes.get(constant)
			.or_else(|| self.packages.get(constant))
			.cloned()
	}
}

impl ClassRemapper for MappingTable {
	fn map_class_fail(&self, class: &str) -> Option<&str> {
		self.classes.get(class).map(String::as_str)
	}
}

/// Extracts the method name out of an entry like `void run(int)`.
///
/// Plain names are returned as they are.
fn method_name(entry: &str) -> &str {
	let head = entry.split_once('(').map_or(entry, |(head, _)| head).trim_end();
	head.rsplit_once(char::is_whitespace).map_or(head, |(_, name)| name)
}
