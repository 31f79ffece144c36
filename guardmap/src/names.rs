//! Conversions between the `/` separated internal form of names and the `.` separated display form.

use std::borrow::Cow;

pub(crate) const INTERNAL_SEPARATOR: char = '/';
pub(crate) const DISPLAY_SEPARATOR: char = '.';

/// Converts a name in either form to the internal form.
pub(crate) fn to_internal(name: &str) -> Cow<'_, str> {
	if name.contains(DISPLAY_SEPARATOR) {
		Cow::Owned(name.replace(DISPLAY_SEPARATOR, "/"))
	} else {
		Cow::Borrowed(name)
	}
}

/// Converts an internal name to the display form, keeping only the last segment if `qualified` is `false`.
pub(crate) fn to_display(name: &str, qualified: bool) -> String {
	if qualified {
		name.replace(INTERNAL_SEPARATOR, ".")
	} else {
		simple_name(name).to_owned()
	}
}

/// Returns the part after the last separator, or the whole name if there's none.
pub(crate) fn simple_name(name: &str) -> &str {
	name.rsplit_once(INTERNAL_SEPARATOR)
		.map_or(name, |(_, simple)| simple)
}

/// Returns the part before the last separator, or `None` for names in the default package.
pub(crate) fn package_of(name: &str) -> Option<&str> {
	name.rsplit_once(INTERNAL_SEPARATOR)
		.map(|(package, _)| package)
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use crate::names::*;

	#[test]
	fn conversions() {
		assert_eq!(to_internal("java.lang.Object"), "java/lang/Object");
		assert_eq!(to_internal("java/lang/Object"), "java/lang/Object");
		assert_eq!(to_display("java/lang/Object", true), "java.lang.Object");
		assert_eq!(to_display("java/lang/Object", false), "Object");
		assert_eq!(to_display("Object", false), "Object");
	}

	#[test]
	fn packages() {
		assert_eq!(package_of("java/lang/Object"), Some("java/lang"));
		assert_eq!(package_of("Main"), None);
		assert_eq!(simple_name("a/b$c"), "b$c");
	}
}
