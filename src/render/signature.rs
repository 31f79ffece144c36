use javadesc::{MethodSignature, Type};
use log::debug;
use crate::render::{MethodRef, Renderer};
use crate::render::options::RenderOptions;

/// The text of a stack trace line whose descriptor can't be decoded.
pub const UNAVAILABLE: &str = "<signature unavailable>";

impl Renderer {
	/// Renders a method as `[return-type ' '] [declaring-class '.'] method-name '(' params ')'`.
	///
	/// The class and method name are the obfuscated ones. Which parts appear, and whether class names are qualified,
	/// is controlled by the `options`.
	///
	/// ```
	/// use jfr_retrace::{Renderer, RenderOptions};
	///
	/// let signature = "(IJZ)V".parse().unwrap();
	/// let text = Renderer::without_mappings()
	///     .render_signature("a/b/C", "m", &signature, &RenderOptions::default());
	///
	/// assert_eq!(text, "void a.b.C.m(int, long, boolean)");
	/// ```
	pub fn render_signature(&self, class_name: &str, method_name: &str, signature: &MethodSignature, options: &RenderOptions) -> String {
		let mut s = String::new();

		if options.show_return_type {
			self.write_type(&mut s, &signature.return_type, options.show_return_type_package);
			s.push(' ');
		}

		if options.show_declaring_class {
			s.push_str(&self.mappings.resolve_class(class_name, options.show_declaring_class_package));
			s.push('.');
		}

		let original_class = self.mappings.original_class(class_name).unwrap_or(class_name);
		s.push_str(&self.mappings.resolve_method(original_class, method_name));

		if signature.parameters.is_empty() {
			s.push_str("()");
		} else if !options.show_arguments {
			s.push_str("(...)");
		} else {
			s.push('(');
			for (index, parameter) in signature.parameters.iter().enumerate() {
				if index > 0 {
					s.push_str(", ");
				}
				self.write_type(&mut s, parameter, options.show_arguments_package);
			}
			s.push(')');
		}

		s
	}

	/// Decodes the descriptor of a method and renders it with [`Renderer::render_signature`].
	///
	/// Returns `None` if the descriptor can't be decoded.
	pub fn render_method(&self, method: &MethodRef, options: &RenderOptions) -> Option<String> {
		match javadesc::decode(&method.descriptor) {
			Ok(signature) => Some(self.render_signature(&method.class_name, &method.method_name, &signature, options)),
			Err(e) => {
				debug!("signature of {}.{} is unavailable: {e}", method.class_name, method.method_name);
				None
			},
		}
	}

	/// Writes the element type first, and then one `[]` for each array dimension.
	fn write_type(&self, s: &mut String, t: &Type, qualified: bool) {
		match t {
			Type::Primitive(primitive) => s.push_str(primitive.name()),
			Type::Object(class_name) => s.push_str(&self.mappings.resolve_class(class_name, qualified)),
			Type::Array(element) => {
				self.write_type(s, element, qualified);
				s.push_str("[]");
			},
		}
	}
}

#[cfg(test)]
mod testing {
	use std::sync::Arc;
	use pretty_assertions::assert_eq;
	use anyhow::{Context, Result};
	use guardmap::MappingTable;
	use javadesc::MethodSignature;
	use crate::render::{MethodRef, Renderer};
	use crate::render::options::RenderOptions;

	fn renderer() -> Result<Renderer> {
		let mut table = MappingTable::new();
		table.add_class("x/Y/Z", "a/b/C").context("class is already mapped")?
			.add_method("m", "void run(x.Y.Z,int)");
		table.add_class("x/Y/Item", "a/b/D").context("class is already mapped")?;
		Ok(Renderer::new(Arc::new(table)))
	}

	#[test]
	fn primitives() -> Result<()> {
		let signature: MethodSignature = "(IJZ)V".parse()?;
		let text = Renderer::without_mappings().render_signature("Main", "go", &signature, &RenderOptions::default());
		assert_eq!(text, "void Main.go(int, long, boolean)");
		Ok(())
	}

	#[test]
	fn arrays_keep_their_depth() -> Result<()> {
		let signature: MethodSignature = "([[Ljava/lang/String;)[I".parse()?;
		let renderer = Renderer::without_mappings();

		let qualified = renderer.render_signature("Main", "go", &signature, &RenderOptions::default());
		assert_eq!(qualified, "int[] Main.go(java.lang.String[][])");

		let short = renderer.render_signature("Main", "go", &signature, &RenderOptions::default().without_packages());
		assert_eq!(short, "int[] Main.go(String[][])");
		Ok(())
	}

	#[test]
	fn deobfuscated() -> Result<()> {
		let renderer = renderer()?;
		let signature: MethodSignature = "(La/b/C;[La/b/D;)La/b/D;".parse()?;

		let text = renderer.render_signature("a/b/C", "m", &signature, &RenderOptions::default());
		assert_eq!(text, "x.Y.Item x.Y.Z.run(x.Y.Z, x.Y.Item[])");

		let text = renderer.render_signature("a/b/C", "m", &signature, &RenderOptions::default().without_packages());
		assert_eq!(text, "Item Z.run(Z, Item[])");

		// unknown methods and classes stay as they are
		let text = renderer.render_signature("a/b/C", "n", &signature, &RenderOptions::default().without_packages());
		assert_eq!(text, "Item Z.n(Z, Item[])");
		let text = renderer.render_signature("q/R", "m", &signature, &RenderOptions::default().without_packages());
		assert_eq!(text, "Item R.m(Z, Item[])");
		Ok(())
	}

	#[test]
	fn parts_can_be_hidden() -> Result<()> {
		let renderer = renderer()?;
		let signature: MethodSignature = "(La/b/C;I)V".parse()?;

		let options = RenderOptions::default().without_return_type();
		assert_eq!(renderer.render_signature("a/b/C", "m", &signature, &options), "x.Y.Z.run(x.Y.Z, int)");

		let options = RenderOptions::default().without_declaring_class();
		assert_eq!(renderer.render_signature("a/b/C", "m", &signature, &options), "void run(x.Y.Z, int)");

		let options = RenderOptions {
			show_return_type: false,
			show_declaring_class: false,
			show_arguments_package: false,
			..RenderOptions::default()
		};
		assert_eq!(renderer.render_signature("a/b/C", "m", &signature, &options), "run(Z, int)");

		let options = RenderOptions {
			show_declaring_class_package: false,
			..RenderOptions::default()
		};
		assert_eq!(renderer.render_signature("a/b/C", "m", &signature, &options), "void Z.run(x.Y.Z, int)");
		Ok(())
	}

	#[test]
	fn hidden_arguments() -> Result<()> {
		let renderer = Renderer::without_mappings();
		let options = RenderOptions::default().without_arguments();

		let signature: MethodSignature = "(I)V".parse()?;
		assert_eq!(renderer.render_signature("Main", "go", &signature, &options), "void Main.go(...)");

		let signature: MethodSignature = "()V".parse()?;
		assert_eq!(renderer.render_signature("Main", "go", &signature, &options), "void Main.go()");
		Ok(())
	}

	#[test]
	fn methods() -> Result<()> {
		let renderer = renderer()?;
		let options = RenderOptions::default().without_packages();

		assert_eq!(renderer.render_method(&MethodRef::new("a.b.C", "m", "()V"), &options).as_deref(), Some("void Z.run()"));
		assert_eq!(renderer.render_method(&MethodRef::new("a/b/C", "m", "(I"), &options), None);
		assert_eq!(renderer.render_method(&MethodRef::new("a/b/C", "m", "(Q)V"), &options), None);
		assert_eq!(renderer.render_method(&MethodRef::new("a/b/C", "m", ""), &options), None);
		Ok(())
	}
}
