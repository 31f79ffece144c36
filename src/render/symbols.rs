use crate::render::Renderer;

/// The name shown for the package without a name.
pub const DEFAULT_PACKAGE: &str = "(default package)";

impl Renderer {
	/// Renders a package name, deobfuscated if there's a mapping for it.
	///
	/// ```
	/// use jfr_retrace::Renderer;
	///
	/// let renderer = Renderer::without_mappings();
	/// assert_eq!(renderer.render_package("java/util"), "java.util");
	/// assert_eq!(renderer.render_package(""), "(default package)");
	/// ```
	pub fn render_package(&self, name: &str) -> String {
		if name.is_empty() {
			return DEFAULT_PACKAGE.to_owned();
		}
		match self.mappings.resolve_package(name) {
			Some(original) if original.is_empty() => DEFAULT_PACKAGE.to_owned(),
			Some(original) => original,
			None => name.replace('/', "."),
		}
	}

	/// Renders a class loader by its (obfuscated) type, followed by its name in parentheses if it has one:
	/// `com.example.PluginLoader ("plugins")`.
	pub fn render_class_loader(&self, type_name: &str, name: Option<&str>) -> String {
		let type_name = self.mappings.resolve_class(type_name, true);
		match name {
			Some(name) if !name.is_empty() => format!("{type_name} (\"{name}\")"),
			_ => type_name,
		}
	}
}
